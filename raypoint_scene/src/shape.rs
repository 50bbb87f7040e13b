// Copyright 2025 the Raypoint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Local-space geometry for [`Shape`].

use glam::Vec3;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::types::Shape;

/// A ray hit in a shape's local space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct LocalHit {
    /// Ray parameter of the hit.
    pub(crate) t: f32,
    /// Outward surface normal at the hit.
    pub(crate) normal: Vec3,
}

impl Shape {
    /// First non-negative intersection of `origin + t * direction` with the surface.
    ///
    /// `direction` need not be normalized; `t` is expressed in its units. A ray
    /// starting inside the shape hits the surface on the way out.
    pub(crate) fn raycast_local(&self, origin: Vec3, direction: Vec3) -> Option<LocalHit> {
        match *self {
            Self::Sphere { radius } => raycast_sphere(radius, origin, direction),
            Self::Cuboid { half_extents } => raycast_cuboid(half_extents, origin, direction),
        }
    }

    /// Closest point of the solid shape to `point`; `point` itself when inside.
    pub(crate) fn closest_point_local(&self, point: Vec3) -> Vec3 {
        match *self {
            Self::Sphere { radius } => {
                if point.length_squared() <= radius * radius {
                    point
                } else {
                    point.normalize_or_zero() * radius
                }
            }
            Self::Cuboid { half_extents } => point.max(-half_extents).min(half_extents),
        }
    }
}

fn raycast_sphere(radius: f32, origin: Vec3, direction: Vec3) -> Option<LocalHit> {
    let a = direction.length_squared();
    if a == 0.0 {
        return None;
    }
    let b = origin.dot(direction);
    let c = origin.length_squared() - radius * radius;
    let discriminant = b * b - a * c;
    if discriminant < 0.0 {
        return None;
    }
    let root = discriminant.sqrt();
    let near = (-b - root) / a;
    let far = (-b + root) / a;
    let t = if near >= 0.0 {
        near
    } else if far >= 0.0 {
        far
    } else {
        return None;
    };
    Some(LocalHit {
        t,
        normal: (origin + direction * t).normalize_or_zero(),
    })
}

// Slab test.
fn raycast_cuboid(half_extents: Vec3, origin: Vec3, direction: Vec3) -> Option<LocalHit> {
    let mut t_near = f32::NEG_INFINITY;
    let mut t_far = f32::INFINITY;
    let mut near_normal = Vec3::ZERO;
    let mut far_normal = Vec3::ZERO;
    for axis in 0..3 {
        let (o, d, h) = (origin[axis], direction[axis], half_extents[axis]);
        if d == 0.0 {
            if o < -h || o > h {
                return None;
            }
            continue;
        }
        let mut unit = Vec3::ZERO;
        unit[axis] = 1.0;
        let to_min = (-h - o) / d;
        let to_max = (h - o) / d;
        let (enter, exit, enter_normal) = if d > 0.0 {
            (to_min, to_max, -unit)
        } else {
            (to_max, to_min, unit)
        };
        if enter > t_near {
            t_near = enter;
            near_normal = enter_normal;
        }
        if exit < t_far {
            t_far = exit;
            far_normal = -enter_normal;
        }
        if t_near > t_far {
            return None;
        }
    }
    if t_near >= 0.0 {
        Some(LocalHit {
            t: t_near,
            normal: near_normal,
        })
    } else if t_far >= 0.0 {
        Some(LocalHit {
            t: t_far,
            normal: far_normal,
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn near(a: f32, b: f32) -> bool {
        (a - b) * (a - b) < 1e-10
    }

    #[test]
    fn sphere_hit_from_outside_and_inside() {
        let sphere = Shape::Sphere { radius: 1.0 };
        let outside = sphere
            .raycast_local(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z)
            .unwrap();
        assert!(near(outside.t, 4.0));
        assert_eq!(outside.normal, Vec3::Z);

        let inside = sphere.raycast_local(Vec3::ZERO, Vec3::X).unwrap();
        assert!(near(inside.t, 1.0));
        assert_eq!(inside.normal, Vec3::X);

        assert!(
            sphere
                .raycast_local(Vec3::new(0.0, 2.0, 5.0), Vec3::NEG_Z)
                .is_none()
        );
        assert!(
            sphere
                .raycast_local(Vec3::new(0.0, 0.0, 5.0), Vec3::Z)
                .is_none(),
            "sphere behind the ray origin"
        );
    }

    #[test]
    fn unnormalized_direction_scales_t() {
        let sphere = Shape::Sphere { radius: 1.0 };
        let hit = sphere
            .raycast_local(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -2.0))
            .unwrap();
        assert!(near(hit.t, 2.0));
    }

    #[test]
    fn cuboid_slab_hits_entry_face() {
        let cuboid = Shape::Cuboid {
            half_extents: Vec3::new(1.0, 2.0, 3.0),
        };
        let hit = cuboid
            .raycast_local(Vec3::new(-4.0, 0.5, 0.0), Vec3::X)
            .unwrap();
        assert!(near(hit.t, 3.0));
        assert_eq!(hit.normal, Vec3::NEG_X);

        let from_above = cuboid
            .raycast_local(Vec3::new(0.0, 10.0, 0.0), Vec3::NEG_Y)
            .unwrap();
        assert!(near(from_above.t, 8.0));
        assert_eq!(from_above.normal, Vec3::Y);

        let inside = cuboid.raycast_local(Vec3::ZERO, Vec3::Z).unwrap();
        assert!(near(inside.t, 3.0));
        assert_eq!(inside.normal, Vec3::Z);

        assert!(
            cuboid
                .raycast_local(Vec3::new(-4.0, 2.5, 0.0), Vec3::X)
                .is_none()
        );
    }

    #[test]
    fn closest_points() {
        let sphere = Shape::Sphere { radius: 2.0 };
        assert_eq!(
            sphere.closest_point_local(Vec3::new(0.0, 4.0, 0.0)),
            Vec3::new(0.0, 2.0, 0.0)
        );
        assert_eq!(sphere.closest_point_local(Vec3::X), Vec3::X);

        let cuboid = Shape::Cuboid {
            half_extents: Vec3::ONE,
        };
        assert_eq!(
            cuboid.closest_point_local(Vec3::new(3.0, 0.5, -7.0)),
            Vec3::new(1.0, 0.5, -1.0)
        );
    }
}
