// Copyright 2025 the Raypoint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Miss synthesis.
//!
//! A pass in which no candidate won still produces an intersection, so that
//! pointer-move and leave handling can run against the scene root and the
//! query geometry stays recoverable from the result.

use glam::{Quat, Vec3};

use crate::geometry::Ray;
use crate::types::{Intersection, IntersectionDetails};

/// Distance along the ray at which a void miss is placed, in world units.
pub const VOID_DISTANCE: f32 = 10_000_000.0;

/// Build a miss targeting `scene_root`, far along `ray`.
///
/// `details` receives the synthesized world point and must return details of
/// the same kind as the ray that was cast. The normal faces back towards the
/// ray origin.
pub fn void_intersection<K>(
    scene_root: K,
    ray: &Ray,
    pointer_position: Vec3,
    pointer_quaternion: Quat,
    details: impl FnOnce(Vec3) -> IntersectionDetails,
) -> Intersection<K> {
    let point = ray.at(VOID_DISTANCE);
    Intersection {
        object: scene_root,
        distance: VOID_DISTANCE,
        distance_to_ray: None,
        point,
        point_on_line: None,
        face: None,
        face_index: None,
        uv: None,
        uv1: None,
        normal: Some((ray.origin - point).normalize_or_zero()),
        instance_id: None,
        batch_id: None,
        pointer_position,
        pointer_quaternion,
        point_on_face: point,
        local_point: point,
        details: details(point),
    }
}
