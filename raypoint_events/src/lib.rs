// Copyright 2025 the Raypoint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raypoint Events: DOM-style pointer events for 3D scenes.
//!
//! ## Overview
//!
//! This crate turns the result of an intersection pass into events and
//! delivers them along an ancestor chain. It does not perform intersection;
//! feed it the [`Intersection`](raypoint_intersect::Intersection) a pass
//! produced, plus the camera used to render the scene.
//!
//! ## Events
//!
//! A [`PointerEvent`] carries the event type, the native input event, the
//! [`Pointer`] that produced it, the intersection, and the camera. Every copy
//! delivered to a node shares one payload and one propagation state, so a
//! listener on a descendant that calls
//! [`stop_propagation`](PointerEvent::stop_propagation) is seen by the walk.
//! [`WheelEvent`] adds scroll deltas and always bubbles.
//!
//! ## Dispatch
//!
//! [`emit_pointer_event`] visits the target, then each ancestor reported by a
//! [`ParentLookup`], invoking the listeners a [`ListenerLookup`] has for the
//! event type. `pointerenter` and `pointerleave` do not bubble.
//!
//! Deriving enter/leave transitions from successive targets is left to the
//! caller.
//!
//! ### Minimal usage
//!
//! ```
//! use std::{cell::RefCell, rc::Rc};
//!
//! use glam::{Quat, Vec3};
//! use raypoint_events::{
//!     EventType, ListenerRegistry, ParentLookup, Pointer, PointerEvent, PointerType,
//!     emit_pointer_event,
//! };
//! use raypoint_intersect::{Camera, Intersection, IntersectionDetails, RawHit};
//!
//! // Node 2 is a child of 1, which is a child of 0.
//! struct Chain;
//! impl ParentLookup<u32> for Chain {
//!     fn parent_of(&self, node: &u32) -> Option<u32> {
//!         node.checked_sub(1)
//!     }
//! }
//!
//! let visited = Rc::new(RefCell::new(Vec::new()));
//! let mut listeners = ListenerRegistry::new();
//! for node in [0_u32, 1] {
//!     let visited = visited.clone();
//!     listeners.add_listener(node, EventType::PointerDown, move |e: &PointerEvent<u32>| {
//!         visited.borrow_mut().push(e.current_target());
//!         if e.current_target() == 1 {
//!             e.stop_propagation();
//!         }
//!     });
//! }
//!
//! let hit = Intersection::from_hit(
//!     RawHit::new(2_u32, 1.5, Vec3::new(0.0, 0.0, -1.5)),
//!     IntersectionDetails::Ray,
//!     Vec3::ZERO,
//!     Quat::IDENTITY,
//!     Vec3::ZERO,
//! );
//! let event = PointerEvent::of_type(
//!     EventType::PointerDown,
//!     (),
//!     Pointer::new(1, PointerType::Ray),
//!     hit,
//!     Camera::default(),
//! );
//! emit_pointer_event(&event, &Chain, &mut listeners);
//!
//! assert_eq!(*visited.borrow(), [1]);
//! assert!(event.stopped());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod adapters;
pub mod dispatch;
pub mod event;
pub mod types;

pub use dispatch::{Listener, ListenerId, ListenerLookup, ListenerRegistry, emit_pointer_event};
pub use event::{DeltaMode, DispatchEvent, PointerEvent, WheelDelta, WheelEvent};
pub use types::{EventType, NoParent, ParentLookup, Pointer, PointerType, Propagation};
