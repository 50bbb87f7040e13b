// Copyright 2025 the Raypoint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parent lookup over the Raypoint scene graph.
//!
//! ## Feature
//!
//! Enable with `scene_adapter`.
//!
//! Events bubble along the scene's parent links. Removed nodes have no parent,
//! so an event whose chain is cut by a removal ends at the last live node.

use raypoint_scene::{NodeId, Scene};

use crate::types::ParentLookup;

impl ParentLookup<NodeId> for Scene {
    fn parent_of(&self, node: &NodeId) -> Option<NodeId> {
        self.parent(*node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::RefCell;
    use glam::Vec3;
    use raypoint_intersect::{Camera, Intersection, IntersectionDetails, RawHit};
    use raypoint_scene::LocalNode;

    use crate::dispatch::{ListenerRegistry, emit_pointer_event};
    use crate::event::PointerEvent;
    use crate::types::{EventType, Pointer, PointerType};

    #[test]
    fn click_bubbles_along_scene_parents() {
        let mut scene = Scene::new();
        let root = scene.insert(None, LocalNode::default());
        let group = scene.insert(Some(root), LocalNode::default());
        let leaf = scene.insert(Some(group), LocalNode::default());
        let other = scene.insert(Some(root), LocalNode::default());
        scene.commit();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ListenerRegistry::new();
        for node in [root, group, leaf, other] {
            let seen = Rc::clone(&seen);
            registry.add_listener(node, EventType::Click, move |e: &PointerEvent<NodeId>| {
                seen.borrow_mut().push(e.current_target());
            });
        }

        let event = PointerEvent::of_type(
            EventType::Click,
            (),
            Pointer::new(0, PointerType::Mouse),
            Intersection::from_hit(
                RawHit::new(leaf, 2.0, Vec3::ZERO),
                IntersectionDetails::Ray,
                Vec3::Z * 2.0,
                glam::Quat::IDENTITY,
                Vec3::ZERO,
            ),
            Camera::default(),
        );
        emit_pointer_event(&event, &scene, &mut registry);
        assert_eq!(*seen.borrow(), vec![leaf, group, root]);
    }
}
