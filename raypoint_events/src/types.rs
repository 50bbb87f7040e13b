// Copyright 2025 the Raypoint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for pointer events: event types, pointers, propagation state, and lookups.

/// Kind of a pointer event, following the DOM pointer-event vocabulary.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum EventType {
    /// The pointer moved.
    PointerMove,
    /// A button was pressed.
    PointerDown,
    /// A button was released.
    PointerUp,
    /// The pointer moved onto an object or one of its descendants.
    PointerOver,
    /// The pointer moved off an object or one of its descendants.
    PointerOut,
    /// The pointer entered an object. Does not bubble.
    PointerEnter,
    /// The pointer left an object. Does not bubble.
    PointerLeave,
    /// The pointer can no longer produce events.
    PointerCancel,
    /// Press and release on the same object.
    Click,
    /// Two clicks in quick succession.
    DblClick,
    /// Secondary-button click.
    ContextMenu,
    /// An object released its pointer capture.
    LostPointerCapture,
    /// Scroll input. Always bubbles.
    Wheel,
}

impl EventType {
    /// Lowercase DOM event name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PointerMove => "pointermove",
            Self::PointerDown => "pointerdown",
            Self::PointerUp => "pointerup",
            Self::PointerOver => "pointerover",
            Self::PointerOut => "pointerout",
            Self::PointerEnter => "pointerenter",
            Self::PointerLeave => "pointerleave",
            Self::PointerCancel => "pointercancel",
            Self::Click => "click",
            Self::DblClick => "dblclick",
            Self::ContextMenu => "contextmenu",
            Self::LostPointerCapture => "lostpointercapture",
            Self::Wheel => "wheel",
        }
    }

    /// Whether events of this type bubble unless stated otherwise.
    pub const fn default_bubbles(self) -> bool {
        !matches!(self, Self::PointerEnter | Self::PointerLeave)
    }
}

impl core::fmt::Display for EventType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input device class of a pointer.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PointerType {
    /// Mouse.
    Mouse,
    /// Pen or stylus.
    Pen,
    /// Touch contact.
    Touch,
    /// Controller or gaze ray.
    Ray,
    /// Grab volume around a hand or controller.
    Grab,
}

/// A logical pointer.
#[derive(Clone, Debug, PartialEq)]
pub struct Pointer<S = ()> {
    /// Stable identifier for the lifetime of the pointer.
    pub id: u64,
    /// Device class.
    pub pointer_type: PointerType,
    /// Application data associated with the pointer.
    pub state: S,
}

impl Pointer {
    /// A pointer without associated state.
    pub const fn new(id: u64, pointer_type: PointerType) -> Self {
        Self {
            id,
            pointer_type,
            state: (),
        }
    }
}

/// Propagation flags shared by every retargeted copy of one event.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Propagation {
    /// No further ancestors receive the event.
    pub stopped: bool,
    /// No further listeners, even on the current node, receive the event.
    pub stopped_immediate: bool,
}

impl Propagation {
    /// Initial state: non-bubbling events start stopped.
    pub const fn initial(bubbles: bool) -> Self {
        Self {
            stopped: !bubbles,
            stopped_immediate: false,
        }
    }
}

/// Look up the parent of a node to walk its ancestors.
///
/// Consulted by [`emit_pointer_event`](crate::dispatch::emit_pointer_event) after
/// each node has been visited.
pub trait ParentLookup<K> {
    /// Returns the parent of `node`, or `None` if `node` is a root.
    fn parent_of(&self, node: &K) -> Option<K>;
}

/// A no‑op parent provider: every node is a root, so events never bubble past their target.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoParent;

impl<K> ParentLookup<K> for NoParent {
    #[inline]
    fn parent_of(&self, _node: &K) -> Option<K> {
        None
    }
}
