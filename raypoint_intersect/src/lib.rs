// Copyright 2025 the Raypoint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raypoint Intersect: deterministic, `no_std` pointer intersection passes for 3D scenes.
//!
//! ## Overview
//!
//! Each pointer owns an [`Intersector`]. Once per frame (or per input event) the
//! intersector runs a pass over candidate objects and produces exactly one
//! [`Intersection`]: the dominant hit, or a synthesized miss on the scene root.
//! The crate does no geometry of its own beyond rays and planes. Hosts supply
//! world transforms and per-object raycasts through [`SceneQuery`].
//!
//! ## Intersectors
//!
//! - [`RayIntersector`]: a ray cast from a tracked object, such as an XR controller.
//! - [`CameraRayIntersector`]: 2D input (mouse, touch) projected through a [`Camera`].
//! - [`SphereIntersector`]: a small volume around a tracked object, for grabbing.
//! - [`LinesIntersector`]: a polyline of rays, for curved pointers.
//!
//! ## Dominance
//!
//! Hits are ranked by declared order first (lower wins, and an undeclared order
//! ranks as [`DEFAULT_ORDER`]), then by distance. Ties keep what was seen
//! first. See [`dominance`].
//!
//! ## Misses
//!
//! A pass with no winning candidate finalizes to a void intersection
//! [`VOID_DISTANCE`] units along the pointer ray, targeting the scene root and
//! tagged with the intersector's kind. Passes never fail.
//!
//! ## Pointer capture
//!
//! While an object holds a [`PointerCapture`], call
//! [`Intersector::intersect_pointer_capture`] instead of running a pass. It
//! re-derives the captured point from the current pointer pose: ray pointers
//! keep the captured distance, camera pointers keep the depth in front of the
//! view plane, and sphere pointers keep the grab offset.
//!
//! ## Workflow
//!
//! 1) Collect candidates with their declared orders, for example all visible
//!    and pickable objects of the scene.
//! 2) Run [`intersect_pass`] (or drive `prepare` / `execute_intersection` /
//!    `finalize_intersection` yourself).
//! 3) Hand the resulting [`Intersection`] to an event layer that dispatches
//!    pointer events along the target's ancestors.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod camera;
pub mod dominance;
pub mod geometry;
pub mod intersector;
pub mod intersectors;
pub mod pass;
pub mod types;
pub mod void;

#[cfg(test)]
mod testing;

pub use camera::{Camera, Projection};
pub use dominance::{Accumulator, DEFAULT_ORDER, IntersectionOptions, Ranked, resolve};
pub use geometry::{Plane, Ray};
pub use intersector::{CaptureError, Intersector, SceneQuery, SphereQuery};
pub use intersectors::{
    CameraProjection, CameraRayIntersector, LinesIntersector, LinesIntersectorOptions,
    RayIntersector, RayIntersectorOptions, SphereIntersector, SphereIntersectorOptions,
};
pub use pass::intersect_pass;
pub use types::{
    Face, Intersection, IntersectionDetails, IntersectionKind, PointerCapture, RawHit,
};
pub use void::{VOID_DISTANCE, void_intersection};
