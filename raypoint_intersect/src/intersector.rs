// Copyright 2025 the Raypoint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The intersector protocol and the host interfaces it consumes.
//!
//! ## Pass lifecycle
//!
//! One pass moves through idle → prepared → accumulating → finalized:
//!
//! 1) [`Intersector::prepare`] computes the query geometry for this pass.
//! 2) [`Intersector::execute_intersection`] runs once per candidate object and
//!    folds its hits into an [`Accumulator`].
//! 3) [`Intersector::finalize_intersection`] turns the accumulator into exactly
//!    one [`Intersection`], synthesizing a void miss when nothing won.
//!
//! A pass that cannot be prepared still finalizes (as a miss); it never fails.
//!
//! ## Pointer capture
//!
//! While an object holds a [`PointerCapture`],
//! [`Intersector::intersect_pointer_capture`] replaces the candidate search and
//! re-derives the captured intersection from the current pointer state.

use alloc::vec::Vec;

use glam::{Mat4, Vec3};

use crate::dominance::Accumulator;
use crate::geometry::Ray;
use crate::types::{Intersection, IntersectionKind, PointerCapture, RawHit};

/// World transforms and the per-object raycast primitive of the host scene graph.
pub trait SceneQuery<K> {
    /// World matrix of `object`, or `None` if it is not currently valid.
    ///
    /// Implementations ensure the matrix is up to date; `None` signals that
    /// the object is detached, stale, or otherwise not ready this pass.
    fn world_transform(&self, object: K) -> Option<Mat4>;

    /// Append the hits of the world-space `ray` against `object` to `out`.
    ///
    /// Hits farther than `far` may be omitted. Appended hits are unordered.
    fn raycast(&self, object: K, ray: &Ray, far: f32, out: &mut Vec<RawHit<K>>);
}

/// Sphere-volume primitive of the host scene graph.
///
/// Only needed by [`SphereIntersector`](crate::SphereIntersector).
pub trait SphereQuery<K> {
    /// Closest point of `object` within `radius` of the world-space `center`.
    ///
    /// The hit's `distance` is the distance from `center` to its `point`.
    fn intersect_sphere(&self, object: K, center: Vec3, radius: f32) -> Option<RawHit<K>>;
}

/// Contract violations reported by an intersector.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum CaptureError {
    /// The captured intersection was produced by a different kind of intersector.
    #[error("unable to process a pointer capture of kind {found} with a {expected} intersector")]
    KindMismatch {
        /// Kind of the intersector asked to re-resolve the capture.
        expected: IntersectionKind,
        /// Kind recorded in the captured intersection.
        found: IntersectionKind,
    },
}

/// One strategy for turning pointer input into an [`Intersection`].
///
/// `K` is the scene's object handle and `S` the host scene it queries.
pub trait Intersector<K, S: ?Sized> {
    /// Per-pass input, for example the native event a camera ray is projected from.
    type Input: ?Sized;

    /// Kind tag stamped on every intersection this intersector produces.
    fn kind(&self) -> IntersectionKind;

    /// Compute the query geometry for a new pass.
    ///
    /// Returns whether the pass can test candidates. A `false` result is a
    /// normal frame-to-frame condition; the pass will finalize as a miss.
    fn prepare(&mut self, scene: &S, input: &Self::Input) -> bool;

    /// Whether the last [`prepare`](Self::prepare) left this intersector able to test candidates.
    fn is_ready(&self) -> bool;

    /// Test one candidate object and fold its hits into `acc`.
    ///
    /// `order` is the object's declared priority; see [`crate::dominance`].
    fn execute_intersection(
        &mut self,
        scene: &S,
        acc: Accumulator<K>,
        object: K,
        order: Option<i32>,
    ) -> Accumulator<K>;

    /// Produce the pass result, synthesizing a void miss on `scene_root` if nothing won.
    fn finalize_intersection(&self, scene: &S, acc: Accumulator<K>, scene_root: K)
    -> Intersection<K>;

    /// Re-derive a captured intersection from the current pointer state.
    ///
    /// Returns the previous intersection unchanged when the pointer cannot be
    /// prepared, and [`CaptureError::KindMismatch`] when the capture was made by
    /// another kind of intersector.
    fn intersect_pointer_capture(
        &mut self,
        scene: &S,
        capture: &PointerCapture<K>,
        input: &Self::Input,
    ) -> Result<Intersection<K>, CaptureError>;
}

/// Reject captures made by a different kind of intersector.
pub(crate) fn check_capture_kind<K>(
    expected: IntersectionKind,
    capture: &PointerCapture<K>,
) -> Result<(), CaptureError> {
    let found = capture.intersection.kind();
    if found == expected {
        return Ok(());
    }
    tracing::debug!(%expected, %found, "pointer capture kind mismatch");
    Err(CaptureError::KindMismatch { expected, found })
}

/// `point` in the local space of `object`, or `point` itself if the object has no
/// invertible transform.
pub(crate) fn local_point<K, S: SceneQuery<K> + ?Sized>(scene: &S, object: K, point: Vec3) -> Vec3 {
    scene
        .world_transform(object)
        .filter(|world| world.determinant() != 0.0)
        .map_or(point, |world| world.inverse().transform_point3(point))
}

/// Point where `ray` meets the captured object's tangent plane, if it is defined
/// and not behind the ray origin.
pub(crate) fn point_on_captured_face<K: Copy, S: SceneQuery<K> + ?Sized>(
    scene: &S,
    capture: &PointerCapture<K>,
    ray: &Ray,
) -> Option<Vec3> {
    let world = scene.world_transform(capture.object)?;
    let plane = capture.intersection.world_plane(world)?;
    let t = ray.distance_to_plane(&plane).filter(|t| *t >= 0.0)?;
    Some(ray.at(t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestScene;
    use crate::types::{IntersectionDetails, RawHit};
    use glam::{Mat4, Quat};

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    fn captured_board(scene: &mut TestScene) -> PointerCapture<u32> {
        let board = scene.add(Some(Mat4::IDENTITY), Some(1.0));
        let hit = Intersection::from_hit(
            RawHit::new(board, 3.0, Vec3::ZERO).with_normal(Vec3::Z),
            IntersectionDetails::Ray,
            Vec3::new(0.0, 0.0, 3.0),
            Quat::IDENTITY,
            Vec3::ZERO,
        );
        PointerCapture::new(hit)
    }

    #[test]
    fn local_point_inverts_world_transform() {
        let mut scene = TestScene::new();
        let object = scene.add(Some(Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0))), None);
        let local = local_point(&scene, object, Vec3::new(1.0, 2.0, 4.0));
        assert!(close(local, Vec3::Z));
    }

    #[test]
    fn local_point_of_singular_transform_is_the_world_point() {
        let mut scene = TestScene::new();
        let flat = scene.add(Some(Mat4::from_scale(Vec3::new(1.0, 1.0, 0.0))), None);
        let missing = scene.add(None, None);
        let point = Vec3::new(0.5, -1.0, 2.0);
        let local = local_point(&scene, flat, point);
        assert!(local.is_finite());
        assert_eq!(local, point);
        assert_eq!(local_point(&scene, missing, point), point);
    }

    #[test]
    fn captured_face_in_front_of_the_ray_is_met() {
        let mut scene = TestScene::new();
        let capture = captured_board(&mut scene);
        let ray = Ray::new(Vec3::new(0.5, 0.0, 2.0), Vec3::NEG_Z);
        let point = point_on_captured_face(&scene, &capture, &ray).unwrap();
        assert!(close(point, Vec3::new(0.5, 0.0, 0.0)));
    }

    #[test]
    fn captured_face_behind_the_ray_is_not_met() {
        let mut scene = TestScene::new();
        let capture = captured_board(&mut scene);
        let ray = Ray::new(Vec3::new(0.0, 0.0, -3.0), Vec3::NEG_Z);
        assert_eq!(point_on_captured_face(&scene, &capture, &ray), None);
        let parallel = Ray::new(Vec3::new(0.0, 0.0, 1.0), Vec3::X);
        assert_eq!(point_on_captured_face(&scene, &capture, &parallel), None);
    }
}
