// Copyright 2025 the Raypoint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sphere intersector: a small volume around a tracked object, for grabbing
//! and direct touch.

use alloc::vec::Vec;

use glam::{Quat, Vec3};

use super::Pose;
use crate::dominance::{Accumulator, IntersectionOptions};
use crate::geometry::Ray;
use crate::intersector::{
    CaptureError, Intersector, SceneQuery, SphereQuery, check_capture_kind, local_point,
};
use crate::types::{Intersection, IntersectionDetails, IntersectionKind, PointerCapture, RawHit};
use crate::void::void_intersection;

/// Configuration for [`SphereIntersector`].
#[derive(Clone, Copy, Debug)]
pub struct SphereIntersectorOptions<K> {
    /// Sphere radius in world units. Defaults to 0.07.
    pub radius: f32,
    /// Candidate filtering.
    pub intersection: IntersectionOptions<K>,
}

impl<K> Default for SphereIntersectorOptions<K> {
    fn default() -> Self {
        Self {
            radius: 0.07,
            intersection: IntersectionOptions::default(),
        }
    }
}

/// Finds the closest surface within a sphere centered on a reference object.
///
/// A hit's distance is measured from the sphere center, so the nearest
/// surface wins. While captured, the grabbed point keeps its offset from the
/// pointer and turns with the pointer's orientation.
#[derive(Debug)]
pub struct SphereIntersector<K> {
    space: Option<K>,
    options: SphereIntersectorOptions<K>,
    center: Vec3,
    quaternion: Quat,
    world_scale: f32,
    ready: bool,
    hits: Vec<RawHit<K>>,
}

impl<K: Copy> SphereIntersector<K> {
    /// Create an intersector around the given reference object.
    pub fn new(space: Option<K>, options: SphereIntersectorOptions<K>) -> Self {
        Self {
            space,
            options,
            center: Vec3::ZERO,
            quaternion: Quat::IDENTITY,
            world_scale: 1.0,
            ready: false,
            hits: Vec::new(),
        }
    }

    /// Replace the reference object; takes effect on the next prepare.
    pub fn set_space(&mut self, space: Option<K>) {
        self.space = space;
        self.ready = false;
    }

    /// World-space sphere center from the last successful prepare.
    pub fn center(&self) -> Vec3 {
        self.center
    }

    fn prepare_transformation<S: SceneQuery<K> + ?Sized>(&mut self, scene: &S) -> bool {
        self.ready = false;
        let Some(pose) = self
            .space
            .and_then(|space| scene.world_transform(space))
            .and_then(Pose::from_world)
        else {
            tracing::trace!("sphere intersector space object is unavailable");
            return false;
        };
        self.center = pose.position;
        self.quaternion = pose.rotation;
        self.world_scale = pose.scale;
        self.ready = true;
        true
    }

    // Void misses still need a direction; use the pointer's forward axis.
    fn forward_ray(&self) -> Ray {
        Ray::new(self.center, self.quaternion * Vec3::NEG_Z)
    }
}

impl<K, S> Intersector<K, S> for SphereIntersector<K>
where
    K: Copy,
    S: SceneQuery<K> + SphereQuery<K> + ?Sized,
{
    type Input = ();

    fn kind(&self) -> IntersectionKind {
        IntersectionKind::Sphere
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
        self.hits
            .extend(scene.intersect_sphere(object, self.center, self.options.radius));
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
                IntersectionDetails::Sphere,
                self.center,
                self.quaternion,
                local_point(scene, hit.object, hit.point),
            ),
            None => void_intersection(
                scene_root,
                &self.forward_ray(),
                self.center,
                self.quaternion,
                |_| IntersectionDetails::Sphere,
            ),
        }
    }

    fn intersect_pointer_capture(
        &mut self,
        scene: &S,
        capture: &PointerCapture<K>,
        _input: &(),
    ) -> Result<Intersection<K>, CaptureError> {
        check_capture_kind(IntersectionKind::Sphere, capture)?;
        let previous = capture.intersection;
        if !self.prepare_transformation(scene) {
            return Ok(previous);
        }
        let turn = self.quaternion * previous.pointer_quaternion.inverse();
        let point = turn * (previous.point - previous.pointer_position) + self.center;
        let point_on_face = scene
            .world_transform(capture.object)
            .and_then(|world| previous.world_plane(world))
            .map_or(point, |plane| plane.project_point(self.center));
        Ok(Intersection {
            object: capture.object,
            distance: point.distance(self.center),
            point,
            point_on_face,
            pointer_position: self.center,
            pointer_quaternion: self.quaternion,
            ..previous
        })
    }
}
