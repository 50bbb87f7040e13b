// Copyright 2025 the Raypoint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer and wheel events.
//!
//! An event is a cheap handle: retargeting it at an ancestor clones the
//! handle, not the payload. Every retargeted copy shares one propagation cell,
//! so stopping propagation through any copy ends the whole dispatch.

use alloc::rc::Rc;
use core::cell::Cell;
use core::ops::Deref;

use glam::{Vec2, Vec3};
use kurbo::Point;
use raypoint_intersect::{Camera, Face, Intersection, Ray};

use crate::types::{EventType, Pointer, Propagation};

#[derive(Debug)]
struct Shared<K, N, S> {
    event_type: EventType,
    bubbles: bool,
    native_event: N,
    pointer: Pointer<S>,
    intersection: Intersection<K>,
    camera: Camera,
    propagation: Cell<Propagation>,
}

/// A pointer event delivered to an object and its ancestors.
///
/// `K` is the scene's object handle, `N` the native input event that caused
/// it, and `S` the application state attached to the pointer.
#[derive(Debug)]
pub struct PointerEvent<K, N = (), S = ()> {
    shared: Rc<Shared<K, N, S>>,
    current_object: K,
}

impl<K: Copy, N, S> Clone for PointerEvent<K, N, S> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
            current_object: self.current_object,
        }
    }
}

impl<K: Copy, N, S> PointerEvent<K, N, S> {
    /// Create an event targeting the intersection's object.
    ///
    /// Non-bubbling events start with propagation stopped, so they reach
    /// only their target.
    pub fn new(
        event_type: EventType,
        bubbles: bool,
        native_event: N,
        pointer: Pointer<S>,
        intersection: Intersection<K>,
        camera: Camera,
    ) -> Self {
        let current_object = intersection.object;
        Self {
            shared: Rc::new(Shared {
                event_type,
                bubbles,
                native_event,
                pointer,
                intersection,
                camera,
                propagation: Cell::new(Propagation::initial(bubbles)),
            }),
            current_object,
        }
    }

    /// Create an event that bubbles as [`EventType::default_bubbles`] prescribes.
    pub fn of_type(
        event_type: EventType,
        native_event: N,
        pointer: Pointer<S>,
        intersection: Intersection<K>,
        camera: Camera,
    ) -> Self {
        Self::new(
            event_type,
            event_type.default_bubbles(),
            native_event,
            pointer,
            intersection,
            camera,
        )
    }

    /// Event type.
    pub fn event_type(&self) -> EventType {
        self.shared.event_type
    }

    /// Whether the event walks up the ancestors of its target.
    pub fn bubbles(&self) -> bool {
        self.shared.bubbles
    }

    /// The native input event that caused this event.
    pub fn native_event(&self) -> &N {
        &self.shared.native_event
    }

    /// The pointer that caused this event.
    pub fn pointer(&self) -> &Pointer<S> {
        &self.shared.pointer
    }

    /// The intersection this event was created from.
    pub fn intersection(&self) -> &Intersection<K> {
        &self.shared.intersection
    }

    /// The camera active when the event was dispatched.
    pub fn camera(&self) -> &Camera {
        &self.shared.camera
    }

    /// The object currently receiving the event (DOM `currentTarget`).
    pub fn current_object(&self) -> K {
        self.current_object
    }

    /// Alias of [`current_object`](Self::current_object).
    pub fn current_target(&self) -> K {
        self.current_object
    }

    /// The object that was hit; fixed for the whole dispatch.
    pub fn object(&self) -> K {
        self.shared.intersection.object
    }

    /// Alias of [`object`](Self::object).
    pub fn target(&self) -> K {
        self.shared.intersection.object
    }

    /// World-space hit point.
    pub fn point(&self) -> Vec3 {
        self.shared.intersection.point
    }

    /// Distance from the pointer to the hit point.
    pub fn distance(&self) -> f32 {
        self.shared.intersection.distance
    }

    /// Local-space surface normal at the hit, if known.
    pub fn normal(&self) -> Option<Vec3> {
        self.shared.intersection.normal
    }

    /// Texture coordinates at the hit, if known.
    pub fn uv(&self) -> Option<Vec2> {
        self.shared.intersection.uv
    }

    /// Hit face, if known.
    pub fn face(&self) -> Option<Face> {
        self.shared.intersection.face
    }

    /// The hit point projected to normalized device coordinates of the event camera.
    pub fn pointer_ndc(&self) -> Point {
        self.shared.camera.project(self.shared.intersection.point)
    }

    /// The pointer ray the intersection was computed from; `None` for sphere pointers.
    pub fn ray(&self) -> Option<Ray> {
        self.shared.intersection.ray()
    }

    /// Whether propagation to further ancestors was stopped.
    pub fn stopped(&self) -> bool {
        self.shared.propagation.get().stopped
    }

    /// Whether propagation to further listeners was stopped.
    pub fn stopped_immediate(&self) -> bool {
        self.shared.propagation.get().stopped_immediate
    }

    /// Current propagation flags.
    pub fn propagation(&self) -> Propagation {
        self.shared.propagation.get()
    }

    /// Let listeners on the current node finish, then end the dispatch.
    pub fn stop_propagation(&self) {
        let mut state = self.shared.propagation.get();
        state.stopped = true;
        self.shared.propagation.set(state);
    }

    /// End the dispatch immediately, skipping remaining listeners on the current node.
    pub fn stop_immediate_propagation(&self) {
        self.shared.propagation.set(Propagation {
            stopped: true,
            stopped_immediate: true,
        });
    }

    /// A copy of this event delivered to `node`, sharing payload and propagation state.
    #[must_use]
    pub fn retarget(&self, node: K) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
            current_object: node,
        }
    }
}

/// How wheel deltas are measured.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum DeltaMode {
    /// Pixels.
    #[default]
    Pixel,
    /// Lines.
    Line,
    /// Pages.
    Page,
}

/// Scroll amounts of a wheel event.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct WheelDelta {
    /// Horizontal scroll amount.
    pub x: f64,
    /// Vertical scroll amount.
    pub y: f64,
    /// Scroll amount along the depth axis.
    pub z: f64,
    /// Unit of the amounts.
    pub mode: DeltaMode,
}

/// A scroll event. Always of type [`EventType::Wheel`] and always bubbling.
///
/// Derefs to the underlying [`PointerEvent`]; only wheel events carry deltas.
#[derive(Debug)]
pub struct WheelEvent<K, N = (), S = ()> {
    event: PointerEvent<K, N, S>,
    delta: WheelDelta,
}

impl<K: Copy, N, S> Clone for WheelEvent<K, N, S> {
    fn clone(&self) -> Self {
        Self {
            event: self.event.clone(),
            delta: self.delta,
        }
    }
}

impl<K: Copy, N, S> WheelEvent<K, N, S> {
    /// Create a wheel event targeting the intersection's object.
    pub fn new(
        native_event: N,
        pointer: Pointer<S>,
        intersection: Intersection<K>,
        camera: Camera,
        delta: WheelDelta,
    ) -> Self {
        Self {
            event: PointerEvent::new(
                EventType::Wheel,
                true,
                native_event,
                pointer,
                intersection,
                camera,
            ),
            delta,
        }
    }

    /// Scroll amounts.
    pub fn delta(&self) -> WheelDelta {
        self.delta
    }

    /// Horizontal scroll amount.
    pub fn delta_x(&self) -> f64 {
        self.delta.x
    }

    /// Vertical scroll amount.
    pub fn delta_y(&self) -> f64 {
        self.delta.y
    }

    /// Depth scroll amount.
    pub fn delta_z(&self) -> f64 {
        self.delta.z
    }

    /// Unit of the scroll amounts.
    pub fn delta_mode(&self) -> DeltaMode {
        self.delta.mode
    }

    /// A copy of this event delivered to `node`, sharing payload and propagation state.
    #[must_use]
    pub fn retarget(&self, node: K) -> Self {
        Self {
            event: self.event.retarget(node),
            delta: self.delta,
        }
    }

    /// The underlying pointer event.
    pub fn as_pointer_event(&self) -> &PointerEvent<K, N, S> {
        &self.event
    }
}

impl<K, N, S> Deref for WheelEvent<K, N, S> {
    type Target = PointerEvent<K, N, S>;

    fn deref(&self) -> &Self::Target {
        &self.event
    }
}

/// Events that [`emit_pointer_event`](crate::dispatch::emit_pointer_event) can deliver.
pub trait DispatchEvent<K>: Sized {
    /// Type used to select listeners.
    fn event_type(&self) -> EventType;
    /// The node the walk starts from, or is currently at.
    fn current_object(&self) -> K;
    /// A copy delivered to `node` that shares propagation state with `self`.
    #[must_use]
    fn retarget(&self, node: K) -> Self;
    /// Current propagation flags.
    fn propagation(&self) -> Propagation;
}

impl<K: Copy, N, S> DispatchEvent<K> for PointerEvent<K, N, S> {
    fn event_type(&self) -> EventType {
        Self::event_type(self)
    }

    fn current_object(&self) -> K {
        Self::current_object(self)
    }

    fn retarget(&self, node: K) -> Self {
        Self::retarget(self, node)
    }

    fn propagation(&self) -> Propagation {
        Self::propagation(self)
    }
}

impl<K: Copy, N, S> DispatchEvent<K> for WheelEvent<K, N, S> {
    fn event_type(&self) -> EventType {
        self.event.event_type()
    }

    fn current_object(&self) -> K {
        self.event.current_object()
    }

    fn retarget(&self, node: K) -> Self {
        Self::retarget(self, node)
    }

    fn propagation(&self) -> Propagation {
        self.event.propagation()
    }
}
