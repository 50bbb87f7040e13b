// Copyright 2025 the Raypoint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listener storage and the bubbling tree walk.
//!
//! ## Walk
//!
//! [`emit_pointer_event`] starts at the event's current object and visits each
//! ancestor in turn:
//!
//! 1) If the node has listeners for the event type, retarget the event at the
//!    node and call them in registration order, stopping as soon as
//!    propagation is stopped immediately.
//! 2) If propagation is stopped, end the walk.
//! 3) Otherwise continue with the node's parent, until there is none.
//!
//! Non-bubbling events start stopped, so only their target is visited.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::event::DispatchEvent;
use crate::types::{EventType, ParentLookup};

/// A registered event callback.
pub type Listener<E> = Box<dyn FnMut(&E)>;

/// Source of listeners for the dispatch walk.
pub trait ListenerLookup<K, E> {
    /// Listeners registered on `node` for `event_type`, in registration order.
    fn listeners_mut(&mut self, node: &K, event_type: EventType) -> Option<&mut [Listener<E>]>;
}

/// Handle of a registered listener, used to remove it again.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ListenerId(u64);

struct Entry<K, E> {
    node: K,
    event_type: EventType,
    ids: Vec<ListenerId>,
    listeners: Vec<Listener<E>>,
}

/// A simple listener store keyed by node and event type.
///
/// Lookups are linear in the number of (node, event type) pairs with
/// listeners, which stays small for typical interactive scenes.
pub struct ListenerRegistry<K, E> {
    entries: Vec<Entry<K, E>>,
    next_id: u64,
}

impl<K, E> Default for ListenerRegistry<K, E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }
}

impl<K: fmt::Debug, E> fmt::Debug for ListenerRegistry<K, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for entry in &self.entries {
            map.entry(
                &(&entry.node, entry.event_type.as_str()),
                &entry.listeners.len(),
            );
        }
        map.finish()
    }
}

impl<K: PartialEq, E> ListenerRegistry<K, E> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` on `node` for `event_type`, after any existing ones.
    pub fn add_listener(
        &mut self,
        node: K,
        event_type: EventType,
        listener: impl FnMut(&E) + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        let entry = match self.position(&node, event_type) {
            Some(i) => &mut self.entries[i],
            None => {
                self.entries.push(Entry {
                    node,
                    event_type,
                    ids: Vec::new(),
                    listeners: Vec::new(),
                });
                let last = self.entries.len() - 1;
                &mut self.entries[last]
            }
        };
        entry.ids.push(id);
        entry.listeners.push(Box::new(listener));
        id
    }

    /// Remove one listener. Returns whether it was registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let Some((i, j)) = self.entries.iter().enumerate().find_map(|(i, entry)| {
            entry.ids.iter().position(|candidate| *candidate == id).map(|j| (i, j))
        }) else {
            return false;
        };
        let entry = &mut self.entries[i];
        entry.ids.remove(j);
        entry.listeners.remove(j);
        if entry.listeners.is_empty() {
            self.entries.remove(i);
        }
        true
    }

    /// Remove every listener on `node` for `event_type`. Returns how many were removed.
    pub fn remove_listeners(&mut self, node: &K, event_type: EventType) -> usize {
        self.position(node, event_type)
            .map_or(0, |i| self.entries.remove(i).listeners.len())
    }

    /// Remove every listener on `node`.
    pub fn remove_node(&mut self, node: &K) {
        self.entries.retain(|entry| entry.node != *node);
    }

    /// Remove every listener.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Total number of registered listeners.
    pub fn len(&self) -> usize {
        self.entries.iter().map(|entry| entry.listeners.len()).sum()
    }

    /// True when no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, node: &K, event_type: EventType) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.event_type == event_type && entry.node == *node)
    }
}

impl<K: PartialEq, E> ListenerLookup<K, E> for ListenerRegistry<K, E> {
    fn listeners_mut(&mut self, node: &K, event_type: EventType) -> Option<&mut [Listener<E>]> {
        let i = self.position(node, event_type)?;
        Some(self.entries[i].listeners.as_mut_slice())
    }
}

/// Deliver `event` to its current object and, while it bubbles, to each ancestor.
///
/// Every listener receives a copy retargeted at its own node. Listeners stop
/// the walk through [`stop_propagation`](crate::PointerEvent::stop_propagation)
/// and [`stop_immediate_propagation`](crate::PointerEvent::stop_immediate_propagation).
pub fn emit_pointer_event<K, E, P, L>(event: &E, parents: &P, listeners: &mut L)
where
    K: Copy + fmt::Debug,
    E: DispatchEvent<K>,
    P: ParentLookup<K> + ?Sized,
    L: ListenerLookup<K, E> + ?Sized,
{
    let event_type = event.event_type();
    let mut node = Some(event.current_object());
    while let Some(current) = node {
        if let Some(list) = listeners.listeners_mut(&current, event_type)
            && !list.is_empty()
        {
            tracing::trace!(event = %event_type, node = ?current, listeners = list.len(), "delivering");
            let retargeted = event.retarget(current);
            for listener in list.iter_mut() {
                listener(&retargeted);
                if retargeted.propagation().stopped_immediate {
                    break;
                }
            }
        }
        if event.propagation().stopped {
            tracing::trace!(event = %event_type, node = ?current, "propagation stopped");
            break;
        }
        node = parents.parent_of(&current);
    }
}
