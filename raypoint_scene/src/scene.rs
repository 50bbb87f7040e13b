// Copyright 2025 the Raypoint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core scene implementation: structure, updates, world transforms.

use alloc::vec::Vec;
use glam::Mat4;

use crate::types::{LocalNode, NodeFlags, NodeId, Shape};

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

/// A hierarchy of nodes with local transforms and optional pickable shapes.
///
/// Edits mark the affected subtree dirty; [`Scene::commit`] recomputes world
/// matrices. Until then, dirty nodes report no world transform and are left
/// out of [`Scene::pickable`].
pub struct Scene {
    nodes: Vec<Option<Node>>,
    generations: Vec<u32>,
    free_list: Vec<usize>,
}

impl core::fmt::Debug for Scene {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let dirty = self.nodes.iter().flatten().filter(|n| n.dirty).count();
        f.debug_struct("Scene")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("nodes_dirty", &dirty)
            .field("free_list", &self.free_list.len())
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    local: LocalNode,
    world: Mat4,
    dirty: bool,
}

impl Node {
    fn new(generation: u32, local: LocalNode) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            local,
            world: Mat4::IDENTITY,
            dirty: true,
        }
    }
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Insert a new node as a child of `parent` (or as a root if `None`).
    ///
    /// A stale `parent` inserts the node as a root.
    pub fn insert(&mut self, parent: Option<NodeId>, local: LocalNode) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, local));
            (idx, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, local)));
            self.generations.push(generation);
            (self.nodes.len() - 1, generation)
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "NodeId uses 32-bit indices by design."
        )]
        let id = NodeId::new(idx as u32, generation);
        if let Some(p) = parent.filter(|p| self.is_alive(*p)) {
            self.link_parent(id, p);
        }
        id
    }

    /// Remove a node and its subtree.
    pub fn remove(&mut self, id: NodeId) {
        let Some(node) = self.node(id) else {
            return;
        };
        let parent = node.parent;
        let children = node.children.clone();
        if let Some(parent) = parent {
            self.unlink_parent(id, parent);
        }
        for child in children {
            self.remove(child);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Move `id` under `new_parent`, or make it a root.
    ///
    /// Ignored when either id is stale or when `new_parent` lies inside the
    /// subtree of `id`.
    pub fn reparent(&mut self, id: NodeId, new_parent: Option<NodeId>) {
        let Some(old_parent) = self.node(id).map(|n| n.parent) else {
            return;
        };
        if let Some(p) = new_parent
            && (!self.is_alive(p) || self.path_to_root(p).contains(&id))
        {
            tracing::debug!(?id, parent = ?p, "rejected reparent");
            return;
        }
        if let Some(parent) = old_parent {
            self.unlink_parent(id, parent);
        }
        if let Some(p) = new_parent {
            self.link_parent(id, p);
        }
        self.mark_subtree_dirty(id);
    }

    /// Update the local transform.
    pub fn set_local_transform(&mut self, id: NodeId, transform: Mat4) {
        if let Some(n) = self.node_mut(id) {
            n.local.local_transform = transform;
            self.mark_subtree_dirty(id);
        }
    }

    /// Update the pickable shape.
    pub fn set_shape(&mut self, id: NodeId, shape: Option<Shape>) {
        if let Some(n) = self.node_mut(id) {
            n.local.shape = shape;
        }
    }

    /// Update the declared intersection order.
    pub fn set_order(&mut self, id: NodeId, order: Option<i32>) {
        if let Some(n) = self.node_mut(id) {
            n.local.order = order;
        }
    }

    /// Update node flags.
    pub fn set_flags(&mut self, id: NodeId, flags: NodeFlags) {
        if let Some(n) = self.node_mut(id) {
            n.local.flags = flags;
        }
    }

    /// Recompute world matrices of dirty subtrees. Returns the number of nodes updated.
    pub fn commit(&mut self) -> usize {
        let roots: Vec<NodeId> = self
            .ids()
            .filter(|id| self.node(*id).is_some_and(|n| n.parent.is_none()))
            .collect();
        let mut updated = 0;
        for root in roots {
            self.update_world_recursive(root, Mat4::IDENTITY, false, &mut updated);
        }
        tracing::trace!(updated, "scene commit");
        updated
    }

    /// Returns true if `id` refers to a live node.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Local data of a live node.
    pub fn local(&self, id: NodeId) -> Option<&LocalNode> {
        self.node(id).map(|n| &n.local)
    }

    /// Parent of a live node; `None` for roots and stale ids.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?.parent
    }

    /// Children of a live node, in insertion order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
    }

    /// Committed world matrix of a node.
    ///
    /// `None` for stale ids and for nodes edited since the last commit.
    pub fn world_transform(&self, id: NodeId) -> Option<Mat4> {
        self.node(id).filter(|n| !n.dirty).map(|n| n.world)
    }

    /// Path from the root to `id` (inclusive); empty for stale ids.
    pub fn path_to_root(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut current = self.is_alive(id).then_some(id);
        while let Some(node) = current {
            out.push(node);
            current = self.parent(node);
        }
        out.reverse();
        out
    }

    /// Committed nodes that are visible, pickable, and have a shape, with their declared order.
    ///
    /// This is the candidate list for an intersection pass.
    pub fn pickable(&self) -> impl Iterator<Item = (NodeId, Option<i32>)> + '_ {
        let wanted = NodeFlags::VISIBLE | NodeFlags::PICKABLE;
        self.ids().filter_map(move |id| {
            let node = self.node(id)?;
            (!node.dirty && node.local.shape.is_some() && node.local.flags.contains(wanted))
                .then_some((id, node.local.order))
        })
    }

    // --- internals ---

    fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().enumerate().filter_map(|(i, n)| {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            let idx = i as u32;
            n.as_ref().map(|n| NodeId::new(idx, n.generation))
        })
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes
            .get(id.idx())?
            .as_ref()
            .filter(|n| n.generation == id.1)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes
            .get_mut(id.idx())?
            .as_mut()
            .filter(|n| n.generation == id.1)
    }

    fn mark_subtree_dirty(&mut self, id: NodeId) {
        let Some(node) = self.node_mut(id) else {
            return;
        };
        node.dirty = true;
        let children = node.children.clone();
        for child in children {
            self.mark_subtree_dirty(child);
        }
    }

    fn link_parent(&mut self, id: NodeId, parent: NodeId) {
        if let Some(p) = self.node_mut(parent) {
            p.children.push(id);
        }
        if let Some(n) = self.node_mut(id) {
            n.parent = Some(parent);
        }
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        if let Some(p) = self.node_mut(parent) {
            p.children.retain(|c| *c != id);
        }
        if let Some(n) = self.node_mut(id) {
            n.parent = None;
        }
    }

    fn update_world_recursive(
        &mut self,
        id: NodeId,
        parent_world: Mat4,
        force: bool,
        updated: &mut usize,
    ) {
        let Some(node) = self.node_mut(id) else {
            return;
        };
        let recompute = force || node.dirty;
        if recompute {
            node.world = parent_world * node.local.local_transform;
            node.dirty = false;
            *updated += 1;
        }
        let world = node.world;
        let children = node.children.clone();
        for child in children {
            self.update_world_recursive(child, world, recompute, updated);
        }
    }
}
