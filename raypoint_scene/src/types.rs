// Copyright 2025 the Raypoint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the scene: node identifiers, flags, shapes, and local data.

use glam::{Mat4, Vec3};

/// Identifier for a node in the scene.
///
/// A small, copyable handle made of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `NodeId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `NodeId`.
///
/// Stale `NodeId`s never alias a different live node because the generation must match.
/// Use [`Scene::is_alive`](crate::Scene::is_alive) to check liveness.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Node flags controlling visibility and picking.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node is visible.
        const VISIBLE  = 0b0000_0001;
        /// Node takes part in pointer intersection passes.
        const PICKABLE = 0b0000_0010;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::PICKABLE
    }
}

/// Pickable geometry of a node, centered on its local origin.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Shape {
    /// Solid sphere.
    Sphere {
        /// Radius in local units.
        radius: f32,
    },
    /// Axis-aligned box in local space.
    Cuboid {
        /// Half the box size along each local axis.
        half_extents: Vec3,
    },
}

/// Local data for a node.
#[derive(Clone, Debug)]
pub struct LocalNode {
    /// Transform relative to the parent's space.
    pub local_transform: Mat4,
    /// Pickable geometry; nodes without a shape are never hit.
    pub shape: Option<Shape>,
    /// Declared intersection priority; lower wins over any distance.
    pub order: Option<i32>,
    /// Visibility and picking flags.
    pub flags: NodeFlags,
}

impl Default for LocalNode {
    fn default() -> Self {
        Self {
            local_transform: Mat4::IDENTITY,
            shape: None,
            order: None,
            flags: NodeFlags::default(),
        }
    }
}
