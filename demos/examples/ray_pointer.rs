// Copyright 2025 the Raypoint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Controller ray and curved pointer.
//!
//! A controller aims a straight ray at a panel with a button, then at the
//! sky. Pointer events bubble from the button to the panel; a click on the
//! button stops there. Finally a curved polyline pointer lands on the floor.
//!
//! Run:
//! - `cargo run -p raypoint_demos --example ray_pointer`

use glam::{Mat4, Quat, Vec3};
use raypoint_events::{
    EventType, ListenerRegistry, Pointer, PointerEvent, PointerType, emit_pointer_event,
};
use raypoint_intersect::{
    Camera, Intersection, LinesIntersector, LinesIntersectorOptions, RayIntersector,
    RayIntersectorOptions, intersect_pass,
};
use raypoint_scene::{LocalNode, NodeId, Scene, Shape};
use tracing::Level;

const CONTROLLER_HEIGHT: f32 = 1.2;

fn boxed(scene: &mut Scene, parent: NodeId, at: Vec3, half_extents: Vec3) -> NodeId {
    scene.insert(
        Some(parent),
        LocalNode {
            local_transform: Mat4::from_translation(at),
            shape: Some(Shape::Cuboid { half_extents }),
            ..Default::default()
        },
    )
}

fn describe(scene_names: &[(NodeId, &str)], hit: &Intersection<NodeId>) -> String {
    let name = scene_names
        .iter()
        .find(|(id, _)| *id == hit.object)
        .map_or("?", |(_, name)| *name);
    format!(
        "{name} at ({:.2}, {:.2}, {:.2}), distance {:.3}, kind {}",
        hit.point.x,
        hit.point.y,
        hit.point.z,
        hit.distance,
        hit.kind()
    )
}

fn main() {
    tracing_subscriber::fmt().with_max_level(Level::TRACE).init();

    let mut scene = Scene::new();
    let root = scene.insert(None, LocalNode::default());
    let controller = scene.insert(
        Some(root),
        LocalNode {
            local_transform: Mat4::from_translation(Vec3::Y * CONTROLLER_HEIGHT),
            ..Default::default()
        },
    );
    let floor = boxed(&mut scene, root, Vec3::ZERO, Vec3::new(5.0, 0.01, 5.0));
    let panel = boxed(
        &mut scene,
        root,
        Vec3::new(0.0, CONTROLLER_HEIGHT, -2.0),
        Vec3::new(0.5, 0.3, 0.01),
    );
    let button = boxed(
        &mut scene,
        panel,
        Vec3::new(0.2, 0.0, 0.02),
        Vec3::new(0.08, 0.04, 0.01),
    );
    scene.commit();
    let names = [
        (root, "sky"),
        (floor, "floor"),
        (panel, "panel"),
        (button, "button"),
    ];

    let mut listeners = ListenerRegistry::new();
    listeners.add_listener(panel, EventType::PointerMove, |e: &PointerEvent<NodeId>| {
        println!(
            "  panel sees pointermove (target is {})",
            if e.target() == e.current_target() { "panel" } else { "a child" }
        );
    });
    listeners.add_listener(button, EventType::Click, |e: &PointerEvent<NodeId>| {
        println!("  button clicked; stopping propagation");
        e.stop_propagation();
    });
    listeners.add_listener(panel, EventType::Click, |_: &PointerEvent<NodeId>| {
        println!("  panel clicked");
    });

    let pointer = Pointer::new(1, PointerType::Ray);
    let mut ray = RayIntersector::new(Some(controller), RayIntersectorOptions::default());
    let aims = [
        ("straight ahead", Quat::IDENTITY),
        ("at the button", Quat::from_rotation_y(-(0.2_f32).atan2(1.97))),
        ("at the sky", Quat::from_rotation_x(1.0)),
    ];

    println!("== Ray pointer ==");
    for (label, rotation) in aims {
        scene.set_local_transform(
            controller,
            Mat4::from_rotation_translation(rotation, Vec3::Y * CONTROLLER_HEIGHT),
        );
        scene.commit();

        let hit = intersect_pass(&mut ray, &scene, &(), scene.pickable(), root);
        println!("aim {label}: {}", describe(&names, &hit));

        for event_type in [EventType::PointerMove, EventType::Click] {
            let event = PointerEvent::of_type(
                event_type,
                (),
                pointer.clone(),
                hit,
                Camera::default(),
            );
            emit_pointer_event(&event, &scene, &mut listeners);
        }
    }

    scene.set_local_transform(controller, Mat4::from_translation(Vec3::Y * CONTROLLER_HEIGHT));
    scene.commit();
    let mut curve = LinesIntersector::new(
        Some(controller),
        LinesIntersectorOptions {
            points: vec![
                Vec3::ZERO,
                Vec3::new(0.0, 0.0, -1.0),
                Vec3::new(0.0, -0.6, -1.8),
                Vec3::new(0.0, -1.6, -2.2),
            ],
            ..Default::default()
        },
    );
    let hit = intersect_pass(&mut curve, &scene, &(), scene.pickable(), root);
    println!("== Curved pointer ==");
    println!("{}", describe(&names, &hit));
    println!("details: {:?}", hit.details);
}
