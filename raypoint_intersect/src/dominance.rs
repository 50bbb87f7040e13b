// Copyright 2025 the Raypoint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dominance resolution and the per-pass accumulator.
//!
//! ## Ranking
//!
//! - Hits rank by the key `(order, distance)`, compared lexicographically.
//!   A declared order is an explicit priority; an undeclared one ranks as
//!   [`DEFAULT_ORDER`]. A lower order wins regardless of distance.
//! - Among equal orders the nearest candidate wins. It replaces the
//!   accumulated best only when its key is strictly lower.
//!
//! ## Ties
//!
//! - Within one batch, equal distances resolve to the earliest candidate.
//! - Against the accumulated best, an equal distance keeps the accumulated best.
//! - NaN distances never win.
//!
//! The key is a total order and ties keep what was seen first, so a pass is
//! independent of the order in which objects are executed except when two
//! objects report exactly the same key.

use alloc::vec::Vec;

use crate::types::RawHit;

/// Rank of an object that declares no order.
pub const DEFAULT_ORDER: i32 = 0;

/// Ranking data of the currently accumulated best hit.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ranked {
    /// Distance of the accumulated best hit.
    pub distance: f32,
    /// Declared order of the object that produced it.
    pub order: Option<i32>,
}

/// Decide whether any of `candidates` supersedes `current`.
///
/// Returns the index of the winning candidate, or `None` to keep `current`.
/// `candidates` must already be filtered; their order is not significant
/// except for exact ties.
pub fn resolve<K>(
    current: Option<Ranked>,
    candidates: &[RawHit<K>],
    candidate_order: Option<i32>,
) -> Option<usize> {
    let nearest = nearest_index(candidates)?;
    let Some(current) = current else {
        return Some(nearest);
    };
    let current_order = current.order.unwrap_or(DEFAULT_ORDER);
    let candidate_order = candidate_order.unwrap_or(DEFAULT_ORDER);
    if current_order != candidate_order {
        return (candidate_order < current_order).then_some(nearest);
    }
    (candidates[nearest].distance < current.distance).then_some(nearest)
}

// Single pass without sorting; equal distances keep the earliest index.
fn nearest_index<K>(candidates: &[RawHit<K>]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, c) in candidates.iter().enumerate() {
        if c.distance.is_nan() {
            continue;
        }
        match best {
            Some(j) if candidates[j].distance <= c.distance => {}
            _ => best = Some(i),
        }
    }
    best
}

/// Candidate filtering applied before dominance resolution.
#[derive(Clone, Copy, Debug)]
pub struct IntersectionOptions<K> {
    /// Minimum distance in world units; nearer hits are discarded.
    ///
    /// Converted to the intersector's local units by dividing by its world scale.
    /// A hit exactly at the minimum is kept.
    pub min_distance: Option<f32>,
    /// Optional predicate; hits for which it returns `false` are discarded.
    pub filter: Option<fn(&RawHit<K>) -> bool>,
}

impl<K> Default for IntersectionOptions<K> {
    fn default() -> Self {
        Self {
            min_distance: None,
            filter: None,
        }
    }
}

impl<K> IntersectionOptions<K> {
    /// Remove hits rejected by these options, in place.
    pub fn retain(&self, hits: &mut Vec<RawHit<K>>, world_scale: f32) {
        hits.retain(|hit| self.accepts(hit, world_scale));
    }

    /// Whether `hit` passes these options.
    pub fn accepts(&self, hit: &RawHit<K>, world_scale: f32) -> bool {
        self.min_distance
            .is_none_or(|min| hit.distance >= min / world_scale)
            && self.filter.is_none_or(|f| f(hit))
    }
}

/// The best hit accumulated so far in one intersection pass.
///
/// This is an explicit fold value: each
/// [`execute_intersection`](crate::Intersector::execute_intersection) call takes it by value
/// and returns the updated accumulator, and
/// [`finalize_intersection`](crate::Intersector::finalize_intersection) consumes it.
#[derive(Clone, Debug, PartialEq)]
pub struct Accumulator<K> {
    best: Option<RawHit<K>>,
    order: Option<i32>,
}

impl<K> Default for Accumulator<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Accumulator<K> {
    /// An empty accumulator for a fresh pass.
    pub const fn new() -> Self {
        Self {
            best: None,
            order: None,
        }
    }

    /// The current best hit, if any.
    pub fn best(&self) -> Option<&RawHit<K>> {
        self.best.as_ref()
    }

    /// Declared order of the object that produced the current best.
    pub fn order(&self) -> Option<i32> {
        self.order
    }

    /// True when no candidate has won yet.
    pub fn is_empty(&self) -> bool {
        self.best.is_none()
    }

    /// Consume the accumulator, yielding the winning hit.
    pub fn into_best(self) -> Option<RawHit<K>> {
        self.best
    }

    fn ranked(&self) -> Option<Ranked> {
        self.best.as_ref().map(|b| Ranked {
            distance: b.distance,
            order: self.order,
        })
    }
}

impl<K: Copy> Accumulator<K> {
    /// Fold one object's filtered candidates into the accumulator.
    #[must_use]
    pub fn fold(self, candidates: &[RawHit<K>], order: Option<i32>) -> Self {
        self.fold_indexed(candidates, order).0
    }

    /// Like [`fold`](Self::fold), also returning the index of the candidate
    /// that became the new best.
    #[must_use]
    pub fn fold_indexed(
        mut self,
        candidates: &[RawHit<K>],
        order: Option<i32>,
    ) -> (Self, Option<usize>) {
        let winner = resolve(self.ranked(), candidates, order);
        if let Some(i) = winner {
            self.best = Some(candidates[i]);
            self.order = order;
        }
        (self, winner)
    }
}
