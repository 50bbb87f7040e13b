// Copyright 2025 the Raypoint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Running a whole intersection pass.

use crate::dominance::Accumulator;
use crate::intersector::Intersector;
use crate::types::Intersection;

/// Run one complete pass: prepare, test every candidate, finalize.
///
/// `candidates` yields each object to test with its declared order. When the
/// intersector cannot be prepared and is not ready, no candidate is tested and
/// the result is a void miss on `scene_root`.
///
/// ```
/// use glam::{Mat4, Vec3};
/// use raypoint_intersect::{
///     IntersectionKind, RawHit, Ray, RayIntersector, RayIntersectorOptions, SceneQuery,
///     intersect_pass,
/// };
///
/// // A scene of two objects: the controller (0) and a floor plane at y = 0 (1).
/// struct Floor;
///
/// impl SceneQuery<u32> for Floor {
///     fn world_transform(&self, object: u32) -> Option<Mat4> {
///         (object == 0).then(|| Mat4::from_translation(Vec3::new(0.0, 2.0, 0.0)))
///     }
///
///     fn raycast(&self, object: u32, ray: &Ray, _far: f32, out: &mut Vec<RawHit<u32>>) {
///         if object == 1 && ray.direction.y < 0.0 {
///             let t = -ray.origin.y / ray.direction.y;
///             out.push(RawHit::new(1, t, ray.at(t)));
///         }
///     }
/// }
///
/// let options = RayIntersectorOptions { direction: Vec3::NEG_Y, ..Default::default() };
/// let mut ray = RayIntersector::new(Some(0_u32), options);
/// let hit = intersect_pass(&mut ray, &Floor, &(), [(1, None)], 0);
/// assert_eq!(hit.object, 1);
/// assert_eq!(hit.distance, 2.0);
/// assert_eq!(hit.kind(), IntersectionKind::Ray);
/// ```
pub fn intersect_pass<K, S, I>(
    intersector: &mut I,
    scene: &S,
    input: &I::Input,
    candidates: impl IntoIterator<Item = (K, Option<i32>)>,
    scene_root: K,
) -> Intersection<K>
where
    S: ?Sized,
    I: Intersector<K, S> + ?Sized,
{
    let mut acc = Accumulator::new();
    if intersector.prepare(scene, input) || intersector.is_ready() {
        for (object, order) in candidates {
            acc = intersector.execute_intersection(scene, acc, object, order);
        }
    }
    let result = intersector.finalize_intersection(scene, acc, scene_root);
    tracing::trace!(kind = %result.kind(), distance = result.distance, "intersection pass finished");
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intersectors::{RayIntersector, RayIntersectorOptions};
    use crate::testing::{TestScene, permutations};
    use alloc::vec::Vec;
    use glam::{Mat4, Vec3};

    #[test]
    fn pass_resolves_nearest_and_respects_order() {
        let mut scene = TestScene::new();
        let root = scene.add(Some(Mat4::IDENTITY), None);
        let hand = scene.add(Some(Mat4::from_translation(Vec3::new(0.0, 0.0, 3.0))), None);
        let a = scene.add(Some(Mat4::IDENTITY), Some(1.0));
        let b = scene.add(Some(Mat4::from_translation(Vec3::new(0.0, 0.0, -1.0))), Some(1.0));
        let mut ray = RayIntersector::new(Some(hand), RayIntersectorOptions::default());

        let nearest = intersect_pass(&mut ray, &scene, &(), [(b, None), (a, None)], root);
        assert_eq!(nearest.object, a);

        let ordered = intersect_pass(&mut ray, &scene, &(), [(a, Some(5)), (b, Some(1))], root);
        assert_eq!(ordered.object, b);

        let empty = intersect_pass(&mut ray, &scene, &(), [], root);
        assert_eq!(empty.object, root);
    }

    #[test]
    fn unprepared_pass_skips_candidates() {
        let mut scene = TestScene::new();
        let root = scene.add(Some(Mat4::IDENTITY), None);
        let a = scene.add(Some(Mat4::IDENTITY), Some(1.0));
        let mut ray = RayIntersector::new(None, RayIntersectorOptions::default());
        let miss = intersect_pass(&mut ray, &scene, &(), [(a, None)], root);
        assert_eq!(miss.object, root);
    }

    #[test]
    fn pass_winner_is_independent_of_candidate_order() {
        let mut scene = TestScene::new();
        let root = scene.add(Some(Mat4::IDENTITY), None);
        let hand = scene.add(Some(Mat4::from_translation(Vec3::new(0.0, 0.0, 3.0))), None);
        let mut disc_at = |z: f32| scene.add(Some(Mat4::from_translation(Vec3::Z * z)), Some(1.0));
        // Distances from the hand are 1, 5, 10, 7, 2 and 0.5.
        let set = [
            (disc_at(2.0), Some(1)),
            (disc_at(-2.0), None),
            (disc_at(-7.0), Some(0)),
            (disc_at(-4.0), Some(0)),
            (disc_at(1.0), None),
            (disc_at(2.5), Some(2)),
        ];
        let expected = set[4].0;
        let mut ray = RayIntersector::new(Some(hand), RayIntersectorOptions::default());
        for sequence in permutations(set.len()) {
            let candidates: Vec<_> = sequence.iter().map(|&i| set[i]).collect();
            let hit = intersect_pass(&mut ray, &scene, &(), candidates, root);
            assert_eq!(hit.object, expected, "{sequence:?}");
            assert!((hit.distance - 2.0) * (hit.distance - 2.0) < 1e-8);
        }
    }
}
