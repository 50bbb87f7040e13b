// Copyright 2025 the Raypoint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Concrete intersectors.
//!
//! - `ray`: world-space ray from a tracked object (controllers, gaze).
//! - `camera_ray`: ray projected from 2D input through a camera (mouse, touch).
//! - `sphere`: sphere volume around a tracked object (grab, direct touch).
//! - `lines`: polyline of ray segments from a tracked object (curved pointers).

pub(crate) mod camera_ray;
pub(crate) mod lines;
pub(crate) mod ray;
pub(crate) mod sphere;

pub use camera_ray::{CameraProjection, CameraRayIntersector};
pub use lines::{LinesIntersector, LinesIntersectorOptions};
pub use ray::{RayIntersector, RayIntersectorOptions};
pub use sphere::{SphereIntersector, SphereIntersectorOptions};

use glam::{Mat4, Quat, Vec3};

/// Decomposed world transform of a pointer's reference object.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Pose {
    pub(crate) position: Vec3,
    pub(crate) rotation: Quat,
    /// X component of the world scale; converts world distances to local ones.
    pub(crate) scale: f32,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: 1.0,
        }
    }
}

impl Pose {
    /// Decompose `world`, rejecting non-finite and degenerate matrices.
    pub(crate) fn from_world(world: Mat4) -> Option<Self> {
        if !world.is_finite() || world.determinant() == 0.0 {
            return None;
        }
        let (scale, rotation, position) = world.to_scale_rotation_translation();
        (scale.x != 0.0).then_some(Self {
            position,
            rotation,
            scale: scale.x,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pose_rejects_degenerate_matrices() {
        assert!(Pose::from_world(Mat4::ZERO).is_none());
        assert!(Pose::from_world(Mat4::from_scale(Vec3::new(0.0, 1.0, 1.0))).is_none());
        let mut nan = Mat4::IDENTITY;
        nan.w_axis.x = f32::NAN;
        assert!(Pose::from_world(nan).is_none());
    }

    #[test]
    fn pose_reports_x_scale() {
        let world = Mat4::from_scale_rotation_translation(
            Vec3::new(2.0, 3.0, 4.0),
            Quat::IDENTITY,
            Vec3::new(1.0, 2.0, 3.0),
        );
        let pose = Pose::from_world(world).unwrap();
        assert_eq!(pose.scale, 2.0);
        assert_eq!(pose.position, Vec3::new(1.0, 2.0, 3.0));
    }
}
