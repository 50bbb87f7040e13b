// Copyright 2025 the Raypoint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ray intersector: a world-space ray cast from a tracked reference object.

use alloc::vec::Vec;

use glam::{Quat, Vec3};

use super::Pose;
use crate::dominance::{Accumulator, IntersectionOptions};
use crate::geometry::Ray;
use crate::intersector::{
    CaptureError, Intersector, SceneQuery, check_capture_kind, local_point,
    point_on_captured_face,
};
use crate::types::{Intersection, IntersectionDetails, IntersectionKind, PointerCapture, RawHit};
use crate::void::void_intersection;

/// Configuration for [`RayIntersector`].
#[derive(Clone, Copy, Debug)]
pub struct RayIntersectorOptions<K> {
    /// Ray direction in the reference object's local space. Defaults to −Z.
    pub direction: Vec3,
    /// Candidate filtering.
    pub intersection: IntersectionOptions<K>,
}

impl<K> Default for RayIntersectorOptions<K> {
    fn default() -> Self {
        Self {
            direction: Vec3::NEG_Z,
            intersection: IntersectionOptions::default(),
        }
    }
}

/// Casts a ray from the current world transform of a reference object.
///
/// ## Usage
///
/// - Construct with the reference object (the "space", e.g. a controller node).
/// - Each pass: [`Intersector::prepare`], one
///   [`Intersector::execute_intersection`] per candidate, then
///   [`Intersector::finalize_intersection`].
/// - While a pointer is captured, call [`Intersector::intersect_pointer_capture`]
///   instead of running candidates.
///
/// The ray origin is the object's world position; its direction is the
/// configured local direction rotated by the object's world orientation. The
/// reported `pointer_quaternion` orients −Z along the cast ray.
#[derive(Debug)]
pub struct RayIntersector<K> {
    space: Option<K>,
    options: RayIntersectorOptions<K>,
    ray: Ray,
    quaternion: Quat,
    world_scale: f32,
    ready: bool,
    hits: Vec<RawHit<K>>,
}

impl<K: Copy> RayIntersector<K> {
    /// Create an intersector for the given reference object.
    pub fn new(space: Option<K>, options: RayIntersectorOptions<K>) -> Self {
        Self {
            space,
            options,
            ray: Ray::default(),
            quaternion: Quat::IDENTITY,
            world_scale: 1.0,
            ready: false,
            hits: Vec::new(),
        }
    }

    /// The reference object rays are cast from.
    pub fn space(&self) -> Option<K> {
        self.space
    }

    /// Replace the reference object; takes effect on the next prepare.
    pub fn set_space(&mut self, space: Option<K>) {
        self.space = space;
        self.ready = false;
    }

    /// The ray computed by the last successful prepare.
    pub fn ray(&self) -> &Ray {
        &self.ray
    }

    /// World scale (X component) of the reference object at the last successful prepare.
    pub fn world_scale(&self) -> f32 {
        self.world_scale
    }

    fn prepare_transformation<S: SceneQuery<K> + ?Sized>(&mut self, scene: &S) -> bool {
        self.ready = false;
        let Some(space) = self.space else {
            tracing::trace!("ray intersector has no space object");
            return false;
        };
        let Some(pose) = scene.world_transform(space).and_then(Pose::from_world) else {
            tracing::trace!("ray intersector space object has no valid world transform");
            return false;
        };
        let local_direction = self.options.direction.normalize_or_zero();
        if local_direction == Vec3::ZERO {
            return false;
        }
        self.ray = Ray::new(pose.position, pose.rotation * local_direction);
        self.quaternion = pose.rotation * Quat::from_rotation_arc(Vec3::NEG_Z, local_direction);
        self.world_scale = pose.scale;
        self.ready = true;
        true
    }
}

impl<K: Copy, S: SceneQuery<K> + ?Sized> Intersector<K, S> for RayIntersector<K> {
    type Input = ();

    fn kind(&self) -> IntersectionKind {
        IntersectionKind::Ray
    }

    fn prepare(&mut self, scene: &S, _input: &()) -> bool {
        self.prepare_transformation(scene)
    }

    fn is_ready(&self) -> bool {
        self.ready
    }

    fn execute_intersection(
        &mut self,
        scene: &S,
        acc: Accumulator<K>,
        object: K,
        order: Option<i32>,
    ) -> Accumulator<K> {
        if !self.ready {
            return acc;
        }
        self.hits.clear();
        scene.raycast(object, &self.ray, f32::INFINITY, &mut self.hits);
        self.options
            .intersection
            .retain(&mut self.hits, self.world_scale);
        acc.fold(&self.hits, order)
    }

    fn finalize_intersection(
        &self,
        scene: &S,
        acc: Accumulator<K>,
        scene_root: K,
    ) -> Intersection<K> {
        match acc.into_best() {
            Some(hit) => Intersection::from_hit(
                hit,
                IntersectionDetails::Ray,
                self.ray.origin,
                self.quaternion,
                local_point(scene, hit.object, hit.point),
            ),
            None => {
                tracing::trace!("ray pass found no candidate; synthesizing void intersection");
                void_intersection(scene_root, &self.ray, self.ray.origin, self.quaternion, |_| {
                    IntersectionDetails::Ray
                })
            }
        }
    }

    fn intersect_pointer_capture(
        &mut self,
        scene: &S,
        capture: &PointerCapture<K>,
        _input: &(),
    ) -> Result<Intersection<K>, CaptureError> {
        check_capture_kind(IntersectionKind::Ray, capture)?;
        let previous = capture.intersection;
        if !self.prepare_transformation(scene) {
            tracing::trace!("ray capture kept previous intersection");
            return Ok(previous);
        }
        let point = self.ray.at(previous.distance);
        let point_on_face = point_on_captured_face(scene, capture, &self.ray).unwrap_or(point);
        Ok(Intersection {
            object: capture.object,
            point,
            point_on_face,
            pointer_position: self.ray.origin,
            pointer_quaternion: self.quaternion,
            ..previous
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestScene;
    use glam::Mat4;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    /// Controller at z = 5 looking down −Z, two discs at z = 0 and z = -2, root object.
    fn scene() -> (TestScene, u32, u32, u32, u32) {
        let mut scene = TestScene::new();
        let root = scene.add(Some(Mat4::IDENTITY), None);
        let controller = scene.add(Some(Mat4::from_translation(Vec3::new(0.0, 0.0, 5.0))), None);
        let near = scene.add(Some(Mat4::IDENTITY), Some(1.0));
        let far = scene.add(Some(Mat4::from_translation(Vec3::new(0.0, 0.0, -2.0))), Some(1.0));
        (scene, root, controller, near, far)
    }

    fn run(
        intersector: &mut RayIntersector<u32>,
        scene: &TestScene,
        candidates: &[(u32, Option<i32>)],
        root: u32,
    ) -> Intersection<u32> {
        let mut acc = Accumulator::new();
        if intersector.prepare(scene, &()) {
            for &(object, order) in candidates {
                acc = intersector.execute_intersection(scene, acc, object, order);
            }
        }
        intersector.finalize_intersection(scene, acc, root)
    }

    #[test]
    fn nearest_candidate_wins_and_fields_are_stamped() {
        let (scene, root, controller, near, far) = scene();
        let mut ray = RayIntersector::new(Some(controller), RayIntersectorOptions::default());
        let hit = run(&mut ray, &scene, &[(far, None), (near, None)], root);
        assert_eq!(hit.object, near);
        assert_eq!(hit.distance, 5.0);
        assert_eq!(hit.kind(), IntersectionKind::Ray);
        assert_eq!(hit.pointer_position, Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(hit.point_on_face, hit.point);
        assert!(close(hit.local_point, Vec3::ZERO));
        let reconstructed = hit.ray().unwrap();
        assert!(close(reconstructed.direction, Vec3::NEG_Z));
    }

    #[test]
    fn explicit_order_beats_distance() {
        let (scene, root, controller, near, far) = scene();
        let mut ray = RayIntersector::new(Some(controller), RayIntersectorOptions::default());
        let hit = run(&mut ray, &scene, &[(near, Some(1)), (far, Some(0))], root);
        assert_eq!(hit.object, far, "lower declared order wins despite distance");
    }

    #[test]
    fn miss_synthesizes_void_on_scene_root() {
        let (scene, root, controller, _near, _far) = scene();
        let mut ray = RayIntersector::new(Some(controller), RayIntersectorOptions::default());
        let hit = run(&mut ray, &scene, &[], root);
        assert_eq!(hit.object, root);
        assert_eq!(hit.kind(), IntersectionKind::Ray);
        assert_eq!(hit.distance, crate::VOID_DISTANCE);
    }

    #[test]
    fn missing_space_is_not_ready_and_misses() {
        let (scene, root, _controller, near, _far) = scene();
        let mut ray = RayIntersector::new(None, RayIntersectorOptions::default());
        assert!(!ray.prepare(&scene, &()));
        assert!(!Intersector::<u32, TestScene>::is_ready(&ray));
        let hit = run(&mut ray, &scene, &[(near, None)], root);
        assert_eq!(hit.object, root);
        assert_eq!(hit.kind(), IntersectionKind::Ray);
    }

    #[test]
    fn invalid_world_transform_is_not_ready() {
        let (mut scene, root, controller, near, _far) = scene();
        scene.set_world(controller, None);
        let mut ray = RayIntersector::new(Some(controller), RayIntersectorOptions::default());
        let hit = run(&mut ray, &scene, &[(near, None)], root);
        assert_eq!(hit.object, root);
        scene.set_world(controller, Some(Mat4::ZERO));
        assert!(!ray.prepare(&scene, &()));
    }

    #[test]
    fn custom_direction_rotates_with_space() {
        let mut scene = TestScene::new();
        let root = scene.add(Some(Mat4::IDENTITY), None);
        let controller = scene.add(Some(Mat4::from_translation(Vec3::new(-5.0, 0.0, 0.0))), None);
        // Disc facing +X at the origin.
        let wall = scene.add(
            Some(Mat4::from_rotation_y(core::f32::consts::FRAC_PI_2)),
            Some(1.0),
        );
        let options = RayIntersectorOptions {
            direction: Vec3::X,
            ..Default::default()
        };
        let mut ray = RayIntersector::new(Some(controller), options);
        let hit = run(&mut ray, &scene, &[(wall, None)], root);
        assert_eq!(hit.object, wall);
        assert!((hit.distance - 5.0) * (hit.distance - 5.0) < 1e-8);
        assert!(close(hit.ray().unwrap().direction, Vec3::X));
    }

    #[test]
    fn min_distance_is_scaled_by_world_scale() {
        let mut scene = TestScene::new();
        let root = scene.add(Some(Mat4::IDENTITY), None);
        // Scale 2: a 8.0 world minimum becomes 4.0 local units.
        let controller = scene.add(
            Some(Mat4::from_scale_rotation_translation(
                Vec3::splat(2.0),
                Quat::IDENTITY,
                Vec3::new(0.0, 0.0, 4.0),
            )),
            None,
        );
        let disc = scene.add(Some(Mat4::IDENTITY), Some(1.0));
        let mut options = RayIntersectorOptions::default();
        options.intersection.min_distance = Some(8.0);
        let mut ray = RayIntersector::new(Some(controller), options);
        let at_boundary = run(&mut ray, &scene, &[(disc, None)], root);
        assert_eq!(at_boundary.object, disc, "hit at exactly the minimum is kept");

        options.intersection.min_distance = Some(8.5);
        let mut ray = RayIntersector::new(Some(controller), options);
        let too_near = run(&mut ray, &scene, &[(disc, None)], root);
        assert_eq!(too_near.object, root);
    }

    fn skip_object_two(hit: &RawHit<u32>) -> bool {
        hit.object != 2
    }

    #[test]
    fn filter_rejects_candidates() {
        let (scene, root, controller, near, far) = scene();
        let mut options = RayIntersectorOptions::default();
        options.intersection.filter = Some(skip_object_two);
        let mut ray = RayIntersector::new(Some(controller), options);
        let hit = run(&mut ray, &scene, &[(near, None), (far, None)], root);
        assert_eq!(near, 2);
        assert_eq!(hit.object, far);
    }

    #[test]
    fn capture_point_on_face_stays_on_tangent_plane() {
        let (mut scene, root, controller, near, _far) = scene();
        let mut ray = RayIntersector::new(Some(controller), RayIntersectorOptions::default());
        let hit = run(&mut ray, &scene, &[(near, None)], root);
        let capture = PointerCapture::new(hit);

        for (position, rotation) in [
            (Vec3::new(0.3, -0.2, 5.0), Quat::IDENTITY),
            (Vec3::new(2.0, 1.0, 3.0), Quat::from_rotation_y(0.4)),
            (Vec3::new(-4.0, 0.5, 6.0), Quat::from_rotation_x(-0.3)),
        ] {
            scene.set_world(controller, Some(Mat4::from_rotation_translation(rotation, position)));
            let moved = ray.intersect_pointer_capture(&scene, &capture, &()).unwrap();
            assert_eq!(moved.object, near);
            assert!(
                moved.point_on_face.z * moved.point_on_face.z < 1e-8,
                "point on face {:?} must lie on the disc plane z = 0",
                moved.point_on_face
            );
            assert!(close(moved.point, ray.ray().at(hit.distance)));
            assert_eq!(moved.pointer_position, position);
        }
    }

    #[test]
    fn capture_past_the_tangent_plane_keeps_point_on_face_ahead() {
        let (mut scene, root, controller, near, _far) = scene();
        let mut ray = RayIntersector::new(Some(controller), RayIntersectorOptions::default());
        let hit = run(&mut ray, &scene, &[(near, None)], root);
        let capture = PointerCapture::new(hit);

        // The controller moved through the disc and still looks down −Z.
        let position = Vec3::new(0.0, 0.0, -3.0);
        scene.set_world(controller, Some(Mat4::from_translation(position)));
        let moved = ray.intersect_pointer_capture(&scene, &capture, &()).unwrap();
        assert_eq!(moved.object, near);
        assert!(close(moved.point, Vec3::new(0.0, 0.0, -8.0)));
        assert_eq!(moved.point_on_face, moved.point);
        assert!(moved.point_on_face.z < position.z);
    }

    #[test]
    fn capture_kind_mismatch_is_rejected() {
        let (scene, root, controller, near, _far) = scene();
        let mut ray = RayIntersector::new(Some(controller), RayIntersectorOptions::default());
        let mut hit = run(&mut ray, &scene, &[(near, None)], root);
        hit.details = IntersectionDetails::Sphere;
        let err = ray
            .intersect_pointer_capture(&scene, &PointerCapture::new(hit), &())
            .unwrap_err();
        assert_eq!(
            err,
            CaptureError::KindMismatch {
                expected: IntersectionKind::Ray,
                found: IntersectionKind::Sphere,
            }
        );
    }

    #[test]
    fn capture_survives_unavailable_space() {
        let (mut scene, root, controller, near, _far) = scene();
        let mut ray = RayIntersector::new(Some(controller), RayIntersectorOptions::default());
        let hit = run(&mut ray, &scene, &[(near, None)], root);
        scene.set_world(controller, None);
        let kept = ray
            .intersect_pointer_capture(&scene, &PointerCapture::new(hit), &())
            .unwrap();
        assert_eq!(kept, hit);
    }
}
