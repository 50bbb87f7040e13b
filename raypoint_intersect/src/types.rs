// Copyright 2025 the Raypoint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Intersection records: raw hits from the host, finalized intersections, and captures.

use glam::{Mat4, Quat, Vec2, Vec3};

use crate::geometry::{Plane, Ray};

/// A triangle face reported by the host raycast.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Face {
    /// First vertex index.
    pub a: u32,
    /// Second vertex index.
    pub b: u32,
    /// Third vertex index.
    pub c: u32,
    /// Face normal in the hit object's local space.
    pub normal: Vec3,
}

/// One raw hit appended by the host's per-object raycast primitive.
///
/// Hits arrive unordered. All positions are world space except `normal` and
/// `face.normal`, which are in the hit object's local space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RawHit<K> {
    /// The object that was hit.
    pub object: K,
    /// Distance from the query origin to `point`.
    pub distance: f32,
    /// Distance between the ray and the hit (line and point primitives).
    pub distance_to_ray: Option<f32>,
    /// Hit position.
    pub point: Vec3,
    /// Closest point on the hit line primitive, if any.
    pub point_on_line: Option<Vec3>,
    /// Hit face.
    pub face: Option<Face>,
    /// Index of the hit face.
    pub face_index: Option<u32>,
    /// Texture coordinates at the hit.
    pub uv: Option<Vec2>,
    /// Secondary texture coordinates at the hit.
    pub uv1: Option<Vec2>,
    /// Interpolated surface normal in local space.
    pub normal: Option<Vec3>,
    /// Instance index for instanced geometry.
    pub instance_id: Option<u32>,
    /// Batch index for batched geometry.
    pub batch_id: Option<u32>,
}

impl<K> RawHit<K> {
    /// A hit with only the required fields set.
    pub const fn new(object: K, distance: f32, point: Vec3) -> Self {
        Self {
            object,
            distance,
            distance_to_ray: None,
            point,
            point_on_line: None,
            face: None,
            face_index: None,
            uv: None,
            uv1: None,
            normal: None,
            instance_id: None,
            batch_id: None,
        }
    }

    /// Set the local-space surface normal.
    pub const fn with_normal(mut self, normal: Vec3) -> Self {
        self.normal = Some(normal);
        self
    }
}

/// Kind of geometric test that produced an intersection.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum IntersectionKind {
    /// World-space ray from a tracked object.
    Ray,
    /// Ray projected from 2D input through a camera.
    CameraRay,
    /// Sphere volume around a tracked object.
    Sphere,
    /// Polyline of ray segments.
    Lines,
}

impl IntersectionKind {
    /// Stable lowercase name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ray => "ray",
            Self::CameraRay => "camera-ray",
            Self::Sphere => "sphere",
            Self::Lines => "lines",
        }
    }
}

impl core::fmt::Display for IntersectionKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-kind data needed to reconstruct the query geometry of an intersection.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum IntersectionDetails {
    /// Produced by a ray intersector.
    Ray,
    /// Produced by a camera-ray intersector.
    CameraRay {
        /// Distance of the point in front of the camera's view plane.
        distance_view_plane: f32,
        /// World-space direction of the projected ray.
        direction: Vec3,
    },
    /// Produced by a sphere intersector.
    Sphere,
    /// Produced by a lines intersector.
    Lines {
        /// Index of the segment that was hit.
        line_index: usize,
        /// World-space segment start.
        start: Vec3,
        /// World-space segment end.
        end: Vec3,
        /// Distance of the point from `start` along the segment.
        distance_on_line: f32,
    },
}

impl IntersectionDetails {
    /// The kind tag of these details.
    pub const fn kind(&self) -> IntersectionKind {
        match self {
            Self::Ray => IntersectionKind::Ray,
            Self::CameraRay { .. } => IntersectionKind::CameraRay,
            Self::Sphere => IntersectionKind::Sphere,
            Self::Lines { .. } => IntersectionKind::Lines,
        }
    }
}

/// The single authoritative result of one intersection pass.
///
/// Created fresh by [`Intersector::finalize_intersection`](crate::Intersector::finalize_intersection)
/// (or re-derived by pointer capture) and not mutated afterwards.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Intersection<K> {
    /// Hit object, or the scene root for a void miss.
    pub object: K,
    /// Distance from the query origin to `point`.
    pub distance: f32,
    /// Distance between the ray and the hit (line and point primitives).
    pub distance_to_ray: Option<f32>,
    /// World-space hit position.
    pub point: Vec3,
    /// Closest point on the hit line primitive, if any.
    pub point_on_line: Option<Vec3>,
    /// Hit face.
    pub face: Option<Face>,
    /// Index of the hit face.
    pub face_index: Option<u32>,
    /// Texture coordinates at the hit.
    pub uv: Option<Vec2>,
    /// Secondary texture coordinates at the hit.
    pub uv1: Option<Vec2>,
    /// Interpolated surface normal in local space.
    pub normal: Option<Vec3>,
    /// Instance index for instanced geometry.
    pub instance_id: Option<u32>,
    /// Batch index for batched geometry.
    pub batch_id: Option<u32>,
    /// World position of the pointer when the intersection was computed.
    pub pointer_position: Vec3,
    /// World orientation of the pointer.
    pub pointer_quaternion: Quat,
    /// Point on the hit surface (equal to `point` unless re-derived by a capture).
    pub point_on_face: Vec3,
    /// `point` in the hit object's local space.
    pub local_point: Vec3,
    /// Kind-specific query data.
    pub details: IntersectionDetails,
}

impl<K> Intersection<K> {
    /// Build a finalized intersection from a raw hit and the pass state.
    pub fn from_hit(
        hit: RawHit<K>,
        details: IntersectionDetails,
        pointer_position: Vec3,
        pointer_quaternion: Quat,
        local_point: Vec3,
    ) -> Self {
        Self {
            object: hit.object,
            distance: hit.distance,
            distance_to_ray: hit.distance_to_ray,
            point: hit.point,
            point_on_line: hit.point_on_line,
            face: hit.face,
            face_index: hit.face_index,
            uv: hit.uv,
            uv1: hit.uv1,
            normal: hit.normal,
            instance_id: hit.instance_id,
            batch_id: hit.batch_id,
            pointer_position,
            pointer_quaternion,
            point_on_face: hit.point,
            local_point,
            details,
        }
    }

    /// Kind of test that produced this intersection.
    pub const fn kind(&self) -> IntersectionKind {
        self.details.kind()
    }

    /// Reconstruct the pointer ray this intersection was computed from.
    ///
    /// Sphere intersections have no ray.
    pub fn ray(&self) -> Option<Ray> {
        match self.details {
            IntersectionDetails::Ray => Some(Ray::new(
                self.pointer_position,
                self.pointer_quaternion * Vec3::NEG_Z,
            )),
            IntersectionDetails::CameraRay { direction, .. } => {
                Some(Ray::new(self.pointer_position, direction))
            }
            IntersectionDetails::Lines { start, end, .. } => {
                Some(Ray::new(start, (end - start).normalize_or_zero()))
            }
            IntersectionDetails::Sphere => None,
        }
    }

    /// World-space plane tangent to the hit surface at `local_point`.
    ///
    /// `object_world` is the hit object's current world matrix, so the plane
    /// follows the object if it moved since the hit. Returns `None` when no
    /// normal was recorded or the matrix is singular.
    pub fn world_plane(&self, object_world: Mat4) -> Option<Plane> {
        let normal = self.normal.or(self.face.map(|f| f.normal))?;
        Plane::from_normal_and_coplanar_point(normal, self.local_point).transformed(object_world)
    }
}

/// A retained intersection paired with the object that captured the pointer.
///
/// Owned by pointer-tracking state outside this crate and handed to
/// [`Intersector::intersect_pointer_capture`](crate::Intersector::intersect_pointer_capture)
/// on each pass while the capture lasts.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerCapture<K> {
    /// The intersection recorded when the capture started.
    pub intersection: Intersection<K>,
    /// The capturing object.
    pub object: K,
}

impl<K: Copy> PointerCapture<K> {
    /// Capture `intersection` for its own hit object.
    pub fn new(intersection: Intersection<K>) -> Self {
        Self {
            object: intersection.object,
            intersection,
        }
    }
}
