// Copyright 2025 the Raypoint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mouse picking through a camera, then dragging with pointer capture.
//!
//! A press on a board starts a capture. While captured, mouse moves are
//! re-resolved at the press depth instead of being tested against the scene,
//! so the dragged point stays on a plane parallel to the screen. Leaving the
//! window keeps the last position. A wheel event scrolls the board's parent.
//!
//! Run:
//! - `cargo run -p raypoint_demos --example camera_drag`

use glam::{Mat4, Vec3};
use kurbo::{Point, Size};
use raypoint_events::{
    EventType, ListenerRegistry, Pointer, PointerEvent, PointerType, WheelDelta, WheelEvent,
    emit_pointer_event,
};
use raypoint_intersect::{
    Camera, CameraProjection, CameraRayIntersector, Intersector, PointerCapture, intersect_pass,
};
use raypoint_scene::{LocalNode, NodeId, Scene, Shape};
use tracing::Level;

const WINDOW: Size = Size::new(800.0, 600.0);

/// A native mouse event in window pixels.
#[derive(Copy, Clone, Debug)]
struct Mouse {
    position: Point,
}

fn mouse(x: f64, y: f64) -> Mouse {
    Mouse {
        position: Point::new(x, y),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(Level::DEBUG).init();

    let mut scene = Scene::new();
    let root = scene.insert(None, LocalNode::default());
    let shelf = scene.insert(Some(root), LocalNode::default());
    let board = scene.insert(
        Some(shelf),
        LocalNode {
            shape: Some(Shape::Cuboid {
                half_extents: Vec3::new(1.0, 1.0, 0.05),
            }),
            ..Default::default()
        },
    );
    scene.commit();

    let camera = Camera {
        world_transform: Mat4::from_translation(Vec3::new(0.0, 0.0, 5.0)),
        ..Camera::default()
    };
    let project = move |event: &Mouse| {
        let Point { x, y } = event.position;
        if !(0.0..=WINDOW.width).contains(&x) || !(0.0..=WINDOW.height).contains(&y) {
            return None;
        }
        Some(CameraProjection {
            ndc: Point::new(x / WINDOW.width * 2.0 - 1.0, 1.0 - y / WINDOW.height * 2.0),
            camera,
        })
    };
    let mut intersector = CameraRayIntersector::new(project, Default::default());

    let mut listeners: ListenerRegistry<NodeId, PointerEvent<NodeId, Mouse>> =
        ListenerRegistry::new();
    listeners.add_listener(board, EventType::PointerMove, |e| {
        println!(
            "  board pointermove at ({:.3}, {:.3}, {:.3}), mouse {:?}",
            e.point().x,
            e.point().y,
            e.point().z,
            e.native_event().position
        );
    });
    listeners.add_listener(board, EventType::LostPointerCapture, |_| {
        println!("  board lost pointer capture");
    });

    let pointer = Pointer::new(0, PointerType::Mouse);
    let emit = |listeners: &mut ListenerRegistry<NodeId, PointerEvent<NodeId, Mouse>>,
                event_type: EventType,
                native: Mouse,
                hit| {
        let event = PointerEvent::of_type(event_type, native, pointer.clone(), hit, camera);
        emit_pointer_event(&event, &scene, listeners);
    };

    println!("== Press ==");
    let press = mouse(400.0, 300.0);
    let hit = intersect_pass(&mut intersector, &scene, &press, scene.pickable(), root);
    println!("pressed {:?} at distance {:.3}", hit.object, hit.distance);
    emit(&mut listeners, EventType::PointerDown, press, hit);
    let capture = PointerCapture::new(hit);

    println!("== Drag ==");
    for native in [mouse(500.0, 300.0), mouse(600.0, 200.0), mouse(-20.0, 200.0)] {
        let dragged = intersector.intersect_pointer_capture(&scene, &capture, &native)?;
        emit(&mut listeners, EventType::PointerMove, native, dragged);
    }

    println!("== Release ==");
    let release = mouse(600.0, 200.0);
    let dragged = intersector.intersect_pointer_capture(&scene, &capture, &release)?;
    emit(&mut listeners, EventType::PointerUp, release, dragged);
    emit(&mut listeners, EventType::LostPointerCapture, release, dragged);

    println!("== Wheel ==");
    let mut wheel_listeners: ListenerRegistry<NodeId, WheelEvent<NodeId, Mouse>> =
        ListenerRegistry::new();
    wheel_listeners.add_listener(shelf, EventType::Wheel, |e| {
        println!(
            "  shelf scrolled by {} from a wheel over {:?}",
            e.delta_y(),
            e.target()
        );
    });
    let over = mouse(400.0, 300.0);
    let hit = intersect_pass(&mut intersector, &scene, &over, scene.pickable(), root);
    let wheel = WheelEvent::new(
        over,
        pointer.clone(),
        hit,
        camera,
        WheelDelta {
            y: -120.0,
            ..Default::default()
        },
    );
    emit_pointer_event(&wheel, &scene, &mut wheel_listeners);

    Ok(())
}
