// Copyright 2025 the Raypoint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raypoint Scene: a minimal 3D scene graph for pointer intersection.
//!
//! - Represents a hierarchy of nodes with local transforms, optional pickable
//!   shapes, declared intersection orders, and flags.
//! - Batches edits behind a [`Scene::commit`] step that recomputes world matrices.
//! - Implements [`SceneQuery`](raypoint_intersect::SceneQuery) and
//!   [`SphereQuery`](raypoint_intersect::SphereQuery), so any Raypoint
//!   intersector can run passes against it directly.
//!
//! It is not a renderer and does no culling or spatial indexing; a pass tests
//! every node yielded by [`Scene::pickable`].
//!
//! ## API overview
//!
//! - [`Scene`]: container managing nodes and world transforms.
//! - [`LocalNode`]: per-node local data (transform, shape, order, flags).
//! - [`Shape`]: sphere or box geometry, centered on the node's origin.
//! - [`NodeFlags`]: visibility and picking controls.
//! - [`NodeId`]: generational handle of a node.
//!
//! ## Validity
//!
//! A node edited since the last commit (including every node of a moved or
//! reparented subtree) reports no world transform. Intersectors treat that as
//! "not ready this pass" rather than as an error.
//!
//! ### Minimal usage
//!
//! ```
//! use glam::{Mat4, Vec3};
//! use raypoint_intersect::{RayIntersector, RayIntersectorOptions, intersect_pass};
//! use raypoint_scene::{LocalNode, Scene, Shape};
//!
//! let mut scene = Scene::new();
//! let root = scene.insert(None, LocalNode::default());
//! let controller = scene.insert(
//!     Some(root),
//!     LocalNode {
//!         local_transform: Mat4::from_translation(Vec3::new(0.0, 1.0, 4.0)),
//!         ..Default::default()
//!     },
//! );
//! let ball = scene.insert(
//!     Some(root),
//!     LocalNode {
//!         local_transform: Mat4::from_translation(Vec3::new(0.0, 1.0, 0.0)),
//!         shape: Some(Shape::Sphere { radius: 0.5 }),
//!         ..Default::default()
//!     },
//! );
//! scene.commit();
//!
//! let mut ray = RayIntersector::new(Some(controller), RayIntersectorOptions::default());
//! let candidates: Vec<_> = scene.pickable().collect();
//! let hit = intersect_pass(&mut ray, &scene, &(), candidates, root);
//! assert_eq!(hit.object, ball);
//! assert!((hit.distance - 3.5).abs() < 1e-5);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod query;
mod scene;
mod shape;
mod types;

pub use scene::Scene;
pub use types::{LocalNode, NodeFlags, NodeId, Shape};
