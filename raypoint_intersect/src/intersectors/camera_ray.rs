// Copyright 2025 the Raypoint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Camera-ray intersector: 2D pointer input projected through a camera.

use alloc::vec::Vec;
use core::fmt;
use core::marker::PhantomData;

use glam::{Quat, Vec3};
use kurbo::Point;

use super::Pose;
use crate::camera::Camera;
use crate::dominance::{Accumulator, IntersectionOptions};
use crate::geometry::{Plane, Ray};
use crate::intersector::{
    CaptureError, Intersector, SceneQuery, check_capture_kind, local_point,
    point_on_captured_face,
};
use crate::types::{Intersection, IntersectionDetails, IntersectionKind, PointerCapture, RawHit};
use crate::void::void_intersection;

/// Normalized device coordinates of a pointer and the camera they belong to.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CameraProjection {
    /// Pointer position in normalized device coordinates.
    pub ndc: Point,
    /// Camera the coordinates are relative to.
    pub camera: Camera,
}

/// Projects native 2D pointer events into the scene through a camera.
///
/// The transformation callback maps a native event `E` to a
/// [`CameraProjection`], or `None` when the event cannot be projected (for
/// example when it lies outside every viewport). This intersector is always
/// ready, but a pass whose input could not be projected tests no candidate
/// and finalizes as a miss on the scene root.
///
/// Every intersection records its distance in front of the camera's view
/// plane, so a captured pointer can keep dragging the captured point at a
/// constant depth.
pub struct CameraRayIntersector<K, E: ?Sized, F> {
    project: F,
    options: IntersectionOptions<K>,
    ray: Ray,
    view_plane: Plane,
    quaternion: Quat,
    projected: bool,
    hits: Vec<RawHit<K>>,
    _input: PhantomData<fn(&E)>,
}

impl<K, E: ?Sized, F> fmt::Debug for CameraRayIntersector<K, E, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CameraRayIntersector")
            .field("ray", &self.ray)
            .field("view_plane", &self.view_plane)
            .field("projected", &self.projected)
            .finish_non_exhaustive()
    }
}

impl<K, E, F> CameraRayIntersector<K, E, F>
where
    K: Copy,
    E: ?Sized,
    F: FnMut(&E) -> Option<CameraProjection>,
{
    /// Create an intersector around a transformation callback.
    pub fn new(project: F, options: IntersectionOptions<K>) -> Self {
        Self {
            project,
            options,
            ray: Ray::default(),
            view_plane: Plane::from_normal_and_coplanar_point(Vec3::NEG_Z, Vec3::ZERO),
            quaternion: Quat::IDENTITY,
            projected: false,
            hits: Vec::new(),
            _input: PhantomData,
        }
    }

    /// The ray computed by the last successful projection.
    pub fn ray(&self) -> &Ray {
        &self.ray
    }

    /// The camera view plane through the ray origin, from the last successful projection.
    pub fn view_plane(&self) -> &Plane {
        &self.view_plane
    }

    /// Whether the last call to prepare projected the input successfully.
    pub fn projected(&self) -> bool {
        self.projected
    }

    fn prepare_transformation(&mut self, input: &E) -> bool {
        let Some(CameraProjection { ndc, camera }) = (self.project)(input) else {
            tracing::trace!("camera ray input could not be projected");
            self.projected = false;
            return false;
        };
        self.ray = camera.ray_from_ndc(ndc);
        self.view_plane =
            Plane::from_normal_and_coplanar_point(camera.world_direction(), self.ray.origin);
        self.quaternion =
            Pose::from_world(camera.world_transform).map_or(Quat::IDENTITY, |p| p.rotation);
        self.projected = true;
        true
    }

    fn details(&self, point: Vec3) -> IntersectionDetails {
        IntersectionDetails::CameraRay {
            distance_view_plane: self.view_plane.distance_to_point(point),
            direction: self.ray.direction,
        }
    }
}

impl<K, E, F, S> Intersector<K, S> for CameraRayIntersector<K, E, F>
where
    K: Copy,
    E: ?Sized,
    F: FnMut(&E) -> Option<CameraProjection>,
    S: SceneQuery<K> + ?Sized,
{
    type Input = E;

    fn kind(&self) -> IntersectionKind {
        IntersectionKind::CameraRay
    }

    fn prepare(&mut self, _scene: &S, input: &E) -> bool {
        self.prepare_transformation(input)
    }

    fn is_ready(&self) -> bool {
        true
    }

    fn execute_intersection(
        &mut self,
        scene: &S,
        acc: Accumulator<K>,
        object: K,
        order: Option<i32>,
    ) -> Accumulator<K> {
        if !self.projected {
            return acc;
        }
        self.hits.clear();
        scene.raycast(object, &self.ray, f32::INFINITY, &mut self.hits);
        self.options.retain(&mut self.hits, 1.0);
        acc.fold(&self.hits, order)
    }

    fn finalize_intersection(
        &self,
        scene: &S,
        acc: Accumulator<K>,
        scene_root: K,
    ) -> Intersection<K> {
        match acc.into_best().filter(|_| self.projected) {
            Some(hit) => Intersection::from_hit(
                hit,
                self.details(hit.point),
                self.ray.origin,
                self.quaternion,
                local_point(scene, hit.object, hit.point),
            ),
            None => void_intersection(
                scene_root,
                &self.ray,
                self.ray.origin,
                self.quaternion,
                |point| self.details(point),
            ),
        }
    }

    fn intersect_pointer_capture(
        &mut self,
        scene: &S,
        capture: &PointerCapture<K>,
        input: &E,
    ) -> Result<Intersection<K>, CaptureError> {
        check_capture_kind(IntersectionKind::CameraRay, capture)?;
        let previous = capture.intersection;
        let IntersectionDetails::CameraRay {
            distance_view_plane,
            ..
        } = previous.details
        else {
            return Ok(previous);
        };
        if !self.prepare_transformation(input) {
            return Ok(previous);
        }
        let drag_plane = self.view_plane.translated_along_normal(distance_view_plane);
        let Some(point) = self.ray.intersect_plane(&drag_plane) else {
            tracing::trace!("camera ray parallel to drag plane; keeping capture");
            return Ok(previous);
        };
        let point_on_face = point_on_captured_face(scene, capture, &self.ray).unwrap_or(point);
        Ok(Intersection {
            object: capture.object,
            distance: point.distance(self.ray.origin),
            point,
            point_on_face,
            pointer_position: self.ray.origin,
            pointer_quaternion: self.quaternion,
            details: IntersectionDetails::CameraRay {
                distance_view_plane,
                direction: self.ray.direction,
            },
            ..previous
        })
    }
}
