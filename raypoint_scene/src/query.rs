// Copyright 2025 the Raypoint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Intersection host interfaces implemented over [`Scene`].

use alloc::vec::Vec;

use glam::{Mat4, Vec3};
use raypoint_intersect::{RawHit, Ray, SceneQuery, SphereQuery};

use crate::scene::Scene;
use crate::types::{NodeId, Shape};

impl Scene {
    /// Committed world matrix and shape of a node that can be hit.
    fn hittable(&self, id: NodeId) -> Option<(Mat4, Mat4, Shape)> {
        let world = self.world_transform(id)?;
        let shape = self.local(id)?.shape?;
        if world.determinant() == 0.0 {
            return None;
        }
        Some((world, world.inverse(), shape))
    }
}

impl SceneQuery<NodeId> for Scene {
    fn world_transform(&self, object: NodeId) -> Option<Mat4> {
        Self::world_transform(self, object)
    }

    /// Casts against the node's shape in its local space.
    ///
    /// Distances are world-space distances from the ray origin, so non-uniform
    /// scale is handled exactly. Only the first surface crossing is reported.
    fn raycast(&self, object: NodeId, ray: &Ray, far: f32, out: &mut Vec<RawHit<NodeId>>) {
        let Some((_, inverse, shape)) = self.hittable(object) else {
            return;
        };
        let origin = inverse.transform_point3(ray.origin);
        let direction = inverse.transform_vector3(ray.direction);
        let Some(hit) = shape.raycast_local(origin, direction) else {
            return;
        };
        let point = ray.at(hit.t);
        let distance = ray.origin.distance(point);
        if distance > far {
            return;
        }
        out.push(RawHit::new(object, distance, point).with_normal(hit.normal));
    }
}

impl SphereQuery<NodeId> for Scene {
    fn intersect_sphere(&self, object: NodeId, center: Vec3, radius: f32) -> Option<RawHit<NodeId>> {
        let (world, inverse, shape) = self.hittable(object)?;
        let local_center = inverse.transform_point3(center);
        let local_closest = shape.closest_point_local(local_center);
        let point = world.transform_point3(local_closest);
        let distance = point.distance(center);
        if distance > radius {
            return None;
        }
        let hit = RawHit::new(object, distance, point);
        let outward = (local_center - local_closest).normalize_or_zero();
        Some(if outward == Vec3::ZERO {
            hit
        } else {
            hit.with_normal(outward)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LocalNode;
    use glam::Quat;

    fn near(a: f32, b: f32) -> bool {
        (a - b) * (a - b) < 1e-8
    }

    fn ball(scene: &mut Scene, transform: Mat4) -> NodeId {
        scene.insert(
            None,
            LocalNode {
                local_transform: transform,
                shape: Some(Shape::Sphere { radius: 1.0 }),
                ..Default::default()
            },
        )
    }

    fn cast(scene: &Scene, id: NodeId, far: f32) -> Vec<RawHit<NodeId>> {
        let mut out = Vec::new();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        SceneQuery::raycast(scene, id, &ray, far, &mut out);
        out
    }

    #[test]
    fn raycast_reports_world_distance() {
        let mut scene = Scene::new();
        let plain = ball(&mut scene, Mat4::from_translation(Vec3::new(0.0, 0.0, -5.0)));
        let scaled = ball(
            &mut scene,
            Mat4::from_scale_rotation_translation(
                Vec3::splat(2.0),
                Quat::IDENTITY,
                Vec3::new(0.0, 0.0, -5.0),
            ),
        );
        scene.commit();

        let hits = cast(&scene, plain, f32::INFINITY);
        assert_eq!(hits.len(), 1);
        assert!(near(hits[0].distance, 4.0));
        assert_eq!(hits[0].normal, Some(Vec3::Z));

        let hits = cast(&scene, scaled, f32::INFINITY);
        assert!(near(hits[0].distance, 3.0));
        assert!(near(hits[0].point.z, -3.0));
    }

    #[test]
    fn raycast_honours_far_and_commit() {
        let mut scene = Scene::new();
        let id = ball(&mut scene, Mat4::from_translation(Vec3::new(0.0, 0.0, -5.0)));
        assert!(cast(&scene, id, f32::INFINITY).is_empty(), "uncommitted");
        scene.commit();
        assert!(cast(&scene, id, 3.5).is_empty());
        assert_eq!(cast(&scene, id, 4.5).len(), 1);
        scene.set_shape(id, None);
        assert!(cast(&scene, id, f32::INFINITY).is_empty());
    }

    #[test]
    fn sphere_query_finds_closest_surface() {
        let mut scene = Scene::new();
        let block = scene.insert(
            None,
            LocalNode {
                shape: Some(Shape::Cuboid {
                    half_extents: Vec3::ONE,
                }),
                ..Default::default()
            },
        );
        scene.commit();
        let touch = scene
            .intersect_sphere(block, Vec3::new(0.2, 0.0, 1.05), 0.07)
            .unwrap();
        assert!(near(touch.distance, 0.05));
        assert!((touch.point - Vec3::new(0.2, 0.0, 1.0)).length() < 1e-5);
        assert!((touch.normal.unwrap() - Vec3::Z).length() < 1e-5);

        assert!(scene.intersect_sphere(block, Vec3::new(0.0, 0.0, 1.2), 0.07).is_none());

        let inside = scene.intersect_sphere(block, Vec3::ZERO, 0.07).unwrap();
        assert_eq!(inside.distance, 0.0);
        assert_eq!(inside.normal, None);
    }
}
