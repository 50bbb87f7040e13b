// Copyright 2025 the Raypoint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lines intersector: a polyline of ray segments, for curved pointers.

use alloc::vec::Vec;

use glam::{Quat, Vec3};

use super::Pose;
use crate::dominance::{Accumulator, IntersectionOptions};
use crate::geometry::Ray;
use crate::intersector::{
    CaptureError, Intersector, SceneQuery, check_capture_kind, local_point,
    point_on_captured_face,
};
use crate::types::{Intersection, IntersectionDetails, IntersectionKind, PointerCapture, RawHit};
use crate::void::void_intersection;

/// Configuration for [`LinesIntersector`].
#[derive(Clone, Debug)]
pub struct LinesIntersectorOptions<K> {
    /// Polyline points in the reference object's local space.
    pub points: Vec<Vec3>,
    /// Candidate filtering, applied to distances along the whole polyline.
    pub intersection: IntersectionOptions<K>,
}

impl<K> Default for LinesIntersectorOptions<K> {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            intersection: IntersectionOptions::default(),
        }
    }
}

/// One world-space polyline segment.
#[derive(Copy, Clone, Debug)]
struct Segment {
    /// Index of the segment's first point in the configured polyline.
    index: usize,
    ray: Ray,
    end: Vec3,
    length: f32,
    /// Polyline length before this segment.
    offset: f32,
}

/// Casts each segment of a polyline attached to a reference object.
///
/// Hit distances are measured along the whole polyline, so an earlier segment
/// always beats a later one. Zero-length segments are skipped. The pass is
/// not ready until the polyline has a segment.
#[derive(Debug)]
pub struct LinesIntersector<K> {
    space: Option<K>,
    options: LinesIntersectorOptions<K>,
    segments: Vec<Segment>,
    quaternion: Quat,
    world_scale: f32,
    ready: bool,
    scratch: Vec<RawHit<K>>,
    hits: Vec<RawHit<K>>,
    /// Slot in `segments` of each entry in `hits`.
    hit_segments: Vec<usize>,
    /// Slot in `segments` of the accumulated best hit.
    best_segment: Option<usize>,
}

impl<K: Copy> LinesIntersector<K> {
    /// Create an intersector for a polyline attached to `space`.
    pub fn new(space: Option<K>, options: LinesIntersectorOptions<K>) -> Self {
        Self {
            space,
            options,
            segments: Vec::new(),
            quaternion: Quat::IDENTITY,
            world_scale: 1.0,
            ready: false,
            scratch: Vec::new(),
            hits: Vec::new(),
            hit_segments: Vec::new(),
            best_segment: None,
        }
    }

    /// Local-space polyline points.
    pub fn points(&self) -> &[Vec3] {
        &self.options.points
    }

    /// Replace the polyline; takes effect on the next prepare.
    pub fn set_points(&mut self, points: impl IntoIterator<Item = Vec3>) {
        self.options.points.clear();
        self.options.points.extend(points);
        self.ready = false;
    }

    /// Total world-space length of the polyline at the last prepare.
    pub fn length(&self) -> f32 {
        self.segments.last().map_or(0.0, |s| s.offset + s.length)
    }

    fn prepare_transformation<S: SceneQuery<K> + ?Sized>(&mut self, scene: &S) -> bool {
        self.ready = false;
        self.segments.clear();
        self.best_segment = None;
        let Some(world) = self.space.and_then(|space| scene.world_transform(space)) else {
            tracing::trace!("lines intersector space object is unavailable");
            return false;
        };
        let Some(pose) = Pose::from_world(world) else {
            return false;
        };
        self.quaternion = pose.rotation;
        self.world_scale = pose.scale;

        let mut offset = 0.0;
        for (index, pair) in self.options.points.windows(2).enumerate() {
            let start = world.transform_point3(pair[0]);
            let end = world.transform_point3(pair[1]);
            let length = start.distance(end);
            if length == 0.0 {
                continue;
            }
            self.segments.push(Segment {
                index,
                ray: Ray::new(start, (end - start) / length),
                end,
                length,
                offset,
            });
            offset += length;
        }
        self.ready = !self.segments.is_empty();
        self.ready
    }

    // A distance at a joint belongs to the segment that ends there.
    fn segment_at(&self, distance: f32) -> Option<&Segment> {
        self.segments
            .iter()
            .find(|s| distance <= s.offset + s.length)
            .or(self.segments.last())
    }

    fn details(segment: &Segment, distance_on_line: f32) -> IntersectionDetails {
        IntersectionDetails::Lines {
            line_index: segment.index,
            start: segment.ray.origin,
            end: segment.end,
            distance_on_line,
        }
    }

    fn pointer_position(&self) -> Vec3 {
        self.segments.first().map_or(Vec3::ZERO, |s| s.ray.origin)
    }
}

impl<K: Copy, S: SceneQuery<K> + ?Sized> Intersector<K, S> for LinesIntersector<K> {
    type Input = ();

    fn kind(&self) -> IntersectionKind {
        IntersectionKind::Lines
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
        self.hit_segments.clear();
        for (slot, segment) in self.segments.iter().enumerate() {
            self.scratch.clear();
            scene.raycast(object, &segment.ray, segment.length, &mut self.scratch);
            let along = self.scratch.iter().filter(|hit| hit.distance <= segment.length);
            for hit in along {
                let hit = RawHit {
                    distance: segment.offset + hit.distance,
                    ..*hit
                };
                if self.options.intersection.accepts(&hit, self.world_scale) {
                    self.hits.push(hit);
                    self.hit_segments.push(slot);
                }
            }
        }
        let (acc, winner) = acc.fold_indexed(&self.hits, order);
        if let Some(i) = winner {
            self.best_segment = Some(self.hit_segments[i]);
        }
        acc
    }

    fn finalize_intersection(
        &self,
        scene: &S,
        acc: Accumulator<K>,
        scene_root: K,
    ) -> Intersection<K> {
        let pointer_position = self.pointer_position();
        if let Some(hit) = acc.into_best()
            && let Some(segment) = self
                .best_segment
                .and_then(|slot| self.segments.get(slot))
                .or_else(|| self.segment_at(hit.distance))
        {
            return Intersection::from_hit(
                hit,
                Self::details(segment, hit.distance - segment.offset),
                pointer_position,
                self.quaternion,
                local_point(scene, hit.object, hit.point),
            );
        }
        let Some(last) = self.segments.last() else {
            let ray = Ray::new(pointer_position, self.quaternion * Vec3::NEG_Z);
            return void_intersection(scene_root, &ray, pointer_position, self.quaternion, |_| {
                IntersectionDetails::Lines {
                    line_index: 0,
                    start: ray.origin,
                    end: ray.origin,
                    distance_on_line: crate::VOID_DISTANCE,
                }
            });
        };
        let mut void = void_intersection(
            scene_root,
            &last.ray,
            pointer_position,
            self.quaternion,
            |_| Self::details(last, crate::VOID_DISTANCE),
        );
        void.distance += last.offset;
        void
    }

    fn intersect_pointer_capture(
        &mut self,
        scene: &S,
        capture: &PointerCapture<K>,
        _input: &(),
    ) -> Result<Intersection<K>, CaptureError> {
        check_capture_kind(IntersectionKind::Lines, capture)?;
        let previous = capture.intersection;
        let IntersectionDetails::Lines {
            line_index,
            distance_on_line,
            ..
        } = previous.details
        else {
            return Ok(previous);
        };
        if !self.prepare_transformation(scene) {
            return Ok(previous);
        }
        let Some(segment) = self.segments.iter().find(|s| s.index == line_index) else {
            tracing::debug!(line_index, "captured polyline segment no longer exists");
            return Ok(previous);
        };
        let point = segment.ray.at(distance_on_line);
        let point_on_face = point_on_captured_face(scene, capture, &segment.ray).unwrap_or(point);
        Ok(Intersection {
            object: capture.object,
            distance: segment.offset + distance_on_line,
            point,
            point_on_face,
            pointer_position: self.pointer_position(),
            pointer_quaternion: self.quaternion,
            details: Self::details(segment, distance_on_line),
            ..previous
        })
    }
}
