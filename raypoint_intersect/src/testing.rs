// Copyright 2025 the Raypoint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory scene used by unit tests.

use alloc::vec;
use alloc::vec::Vec;

use glam::{Mat4, Vec3};

use crate::geometry::Ray;
use crate::intersector::{SceneQuery, SphereQuery};
use crate::types::RawHit;

#[derive(Clone, Debug)]
struct TestObject {
    world: Option<Mat4>,
    /// Disc in the local XY plane facing +Z.
    disc_radius: Option<f32>,
}

/// Flat list of objects addressed by index.
#[derive(Clone, Debug, Default)]
pub(crate) struct TestScene {
    objects: Vec<TestObject>,
}

impl TestScene {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Add an object; handles are assigned sequentially from 0.
    pub(crate) fn add(&mut self, world: Option<Mat4>, disc_radius: Option<f32>) -> u32 {
        let id = u32::try_from(self.objects.len()).unwrap();
        self.objects.push(TestObject { world, disc_radius });
        id
    }

    pub(crate) fn set_world(&mut self, object: u32, world: Option<Mat4>) {
        self.objects[object as usize].world = world;
    }

    fn get(&self, object: u32) -> Option<&TestObject> {
        self.objects.get(object as usize)
    }
}

impl SceneQuery<u32> for TestScene {
    fn world_transform(&self, object: u32) -> Option<Mat4> {
        self.get(object)?.world
    }

    fn raycast(&self, object: u32, ray: &Ray, far: f32, out: &mut Vec<RawHit<u32>>) {
        let Some(TestObject {
            world: Some(world),
            disc_radius: Some(radius),
        }) = self.get(object)
        else {
            return;
        };
        let inverse = world.inverse();
        let origin = inverse.transform_point3(ray.origin);
        let direction = inverse.transform_vector3(ray.direction);
        if direction.z * direction.z < 1e-12 {
            return;
        }
        let t = -origin.z / direction.z;
        if t < 0.0 || t > far {
            return;
        }
        let local = origin + direction * t;
        if local.truncate().length_squared() > radius * radius {
            return;
        }
        out.push(RawHit::new(object, t, ray.at(t)).with_normal(Vec3::Z));
    }
}

impl SphereQuery<u32> for TestScene {
    fn intersect_sphere(&self, object: u32, center: Vec3, radius: f32) -> Option<RawHit<u32>> {
        let TestObject {
            world: Some(world),
            disc_radius: Some(disc),
        } = self.get(object)?
        else {
            return None;
        };
        let local_center = world.inverse().transform_point3(center);
        let local_closest = local_center.truncate().clamp_length_max(*disc).extend(0.0);
        let point = world.transform_point3(local_closest);
        let distance = point.distance(center);
        (distance <= radius).then(|| RawHit::new(object, distance, point).with_normal(Vec3::Z))
    }
}

/// Every ordering of `0..n`, built by insertion.
pub(crate) fn permutations(n: usize) -> Vec<Vec<usize>> {
    let mut all = vec![Vec::new()];
    for next in 0..n {
        all = all
            .into_iter()
            .flat_map(|partial: Vec<usize>| {
                (0..=partial.len()).map(move |at| {
                    let mut grown = partial.clone();
                    grown.insert(at, next);
                    grown
                })
            })
            .collect();
    }
    all
}

#[test]
fn permutations_cover_every_ordering() {
    let all = permutations(4);
    assert_eq!(all.len(), 24);
    for (i, a) in all.iter().enumerate() {
        assert!(all[i + 1..].iter().all(|b| b != a));
    }
}
