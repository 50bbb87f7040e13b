// Copyright 2025 the Raypoint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A minimal camera: world transform plus projection.
//!
//! Normalized device coordinates follow the OpenGL convention: x and y in
//! `[-1, 1]` with y up, and the camera looks down its local −Z axis.

use glam::{Mat4, Vec3};
use kurbo::Point;

use crate::geometry::Ray;

/// Camera projection parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Projection {
    /// Perspective projection.
    Perspective {
        /// Vertical field of view in radians.
        fov_y: f32,
        /// Width over height.
        aspect: f32,
        /// Near clip distance.
        near: f32,
        /// Far clip distance.
        far: f32,
    },
    /// Orthographic projection.
    Orthographic {
        /// Left edge of the view volume.
        left: f32,
        /// Right edge of the view volume.
        right: f32,
        /// Bottom edge of the view volume.
        bottom: f32,
        /// Top edge of the view volume.
        top: f32,
        /// Near clip distance.
        near: f32,
        /// Far clip distance.
        far: f32,
    },
}

impl Projection {
    /// The projection matrix.
    pub fn matrix(&self) -> Mat4 {
        match *self {
            Self::Perspective {
                fov_y,
                aspect,
                near,
                far,
            } => Mat4::perspective_rh_gl(fov_y, aspect, near, far),
            Self::Orthographic {
                left,
                right,
                bottom,
                top,
                near,
                far,
            } => Mat4::orthographic_rh_gl(left, right, bottom, top, near, far),
        }
    }
}

/// A camera positioned in the world.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Camera {
    /// Camera-to-world matrix.
    pub world_transform: Mat4,
    /// Projection parameters.
    pub projection: Projection,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            world_transform: Mat4::IDENTITY,
            projection: Projection::Perspective {
                fov_y: core::f32::consts::FRAC_PI_4,
                aspect: 1.0,
                near: 0.1,
                far: 1000.0,
            },
        }
    }
}

impl Camera {
    /// Create a camera.
    pub const fn new(world_transform: Mat4, projection: Projection) -> Self {
        Self {
            world_transform,
            projection,
        }
    }

    /// World position of the camera.
    pub fn position(&self) -> Vec3 {
        self.world_transform.w_axis.truncate()
    }

    /// World-space viewing direction (local −Z).
    pub fn world_direction(&self) -> Vec3 {
        self.world_transform
            .transform_vector3(Vec3::NEG_Z)
            .normalize_or_zero()
    }

    /// World-to-clip matrix.
    pub fn view_projection(&self) -> Mat4 {
        self.projection.matrix() * self.world_transform.inverse()
    }

    /// World-space ray through the given normalized device coordinates.
    ///
    /// Perspective rays start at the camera position. Orthographic rays start on
    /// the camera plane and run parallel to the viewing direction.
    pub fn ray_from_ndc(&self, ndc: Point) -> Ray {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "NDC values are in [-1, 1]; f32 precision is ample."
        )]
        let (x, y) = (ndc.x as f32, ndc.y as f32);
        let unproject = self.view_projection().inverse();
        match self.projection {
            Projection::Perspective { .. } => {
                let origin = self.position();
                let target = unproject.project_point3(Vec3::new(x, y, 0.5));
                Ray::new(origin, (target - origin).normalize_or_zero())
            }
            Projection::Orthographic { near, far, .. } => {
                let camera_plane_z = (near + far) / (near - far);
                let origin = unproject.project_point3(Vec3::new(x, y, camera_plane_z));
                Ray::new(origin, self.world_direction())
            }
        }
    }

    /// Project a world-space point to normalized device coordinates.
    pub fn project(&self, world: Vec3) -> Point {
        let ndc = self.view_projection().project_point3(world);
        Point::new(f64::from(ndc.x), f64::from(ndc.y))
    }
}
