// Copyright 2025 the Raypoint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rays and planes.
//!
//! Planes follow the Hessian normal form `normal · p + constant = 0`, so a
//! positive [`Plane::distance_to_point`] means the point lies on the side the
//! normal points to.

use glam::{Mat3, Mat4, Vec3};

/// Below this magnitude a ray direction is treated as parallel to a plane.
const PARALLEL_EPSILON: f32 = 1e-8;

/// A world-space ray.
///
/// `direction` is expected to be unit length; distances along the ray are then
/// in world units.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray {
    /// Start of the ray.
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Default for Ray {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            direction: Vec3::NEG_Z,
        }
    }
}

impl Ray {
    /// Create a ray.
    pub const fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Point at distance `t` along the ray.
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Signed distance along the ray to `plane`, or `None` when the ray is parallel to it.
    ///
    /// The result is negative when the plane lies behind the origin.
    pub fn distance_to_plane(&self, plane: &Plane) -> Option<f32> {
        let denom = plane.normal.dot(self.direction);
        if denom > -PARALLEL_EPSILON && denom < PARALLEL_EPSILON {
            return None;
        }
        Some(-plane.distance_to_point(self.origin) / denom)
    }

    /// Intersection of the ray's supporting line with `plane`.
    ///
    /// The returned point may lie behind the origin; only a parallel ray yields `None`.
    pub fn intersect_plane(&self, plane: &Plane) -> Option<Vec3> {
        self.distance_to_plane(plane).map(|t| self.at(t))
    }
}

/// An infinite plane `normal · p + constant = 0`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Plane {
    /// Unit normal.
    pub normal: Vec3,
    /// Negated distance of the plane from the origin along `normal`.
    pub constant: f32,
}

impl Default for Plane {
    fn default() -> Self {
        Self {
            normal: Vec3::Z,
            constant: 0.0,
        }
    }
}

impl Plane {
    /// Plane with the given normal passing through `point`.
    ///
    /// `normal` is normalized; a zero normal yields a degenerate plane that no ray intersects.
    pub fn from_normal_and_coplanar_point(normal: Vec3, point: Vec3) -> Self {
        let normal = normal.normalize_or_zero();
        Self {
            normal,
            constant: -point.dot(normal),
        }
    }

    /// Signed distance from the plane to `point`.
    #[inline]
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.constant
    }

    /// Orthogonal projection of `point` onto the plane.
    pub fn project_point(&self, point: Vec3) -> Vec3 {
        point - self.normal * self.distance_to_point(point)
    }

    /// The point of the plane closest to the origin.
    pub fn coplanar_point(&self) -> Vec3 {
        self.normal * -self.constant
    }

    /// This plane moved by `distance` along its normal.
    pub fn translated_along_normal(&self, distance: f32) -> Self {
        Self {
            normal: self.normal,
            constant: self.constant - distance,
        }
    }

    /// This plane transformed by `matrix`, or `None` when the matrix is singular.
    pub fn transformed(&self, matrix: Mat4) -> Option<Self> {
        let linear = Mat3::from_mat4(matrix);
        if linear.determinant() == 0.0 {
            return None;
        }
        let normal = (linear.inverse().transpose() * self.normal).normalize_or_zero();
        let point = matrix.transform_point3(self.coplanar_point());
        let plane = Self::from_normal_and_coplanar_point(normal, point);
        (plane.normal != Vec3::ZERO && plane.constant.is_finite()).then_some(plane)
    }
}
