// Copyright 2025 the Raypoint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use glam::{Mat4, Vec3};
use raypoint_intersect::{
    RayIntersector, RayIntersectorOptions, SphereIntersector, SphereIntersectorOptions,
    intersect_pass,
};
use raypoint_scene::{LocalNode, NodeId, Scene, Shape};

/// An `n` x `n` grid of alternating spheres and boxes in the z = -5 plane,
/// with a pointer node at the origin.
fn grid_scene(n: usize, cell: f32) -> (Scene, NodeId, NodeId) {
    let mut scene = Scene::new();
    let root = scene.insert(None, LocalNode::default());
    let pointer = scene.insert(Some(root), LocalNode::default());
    let half = n as f32 * cell * 0.5;
    for y in 0..n {
        for x in 0..n {
            let center = Vec3::new(x as f32 * cell - half, y as f32 * cell - half, -5.0);
            let shape = if (x + y) % 2 == 0 {
                Shape::Sphere { radius: cell * 0.4 }
            } else {
                Shape::Cuboid {
                    half_extents: Vec3::splat(cell * 0.4),
                }
            };
            scene.insert(
                Some(root),
                LocalNode {
                    local_transform: Mat4::from_translation(center),
                    shape: Some(shape),
                    ..Default::default()
                },
            );
        }
    }
    scene.commit();
    (scene, root, pointer)
}

fn bench_ray_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("ray_pass");
    for &n in &[8_usize, 32, 64] {
        let (scene, root, pointer) = grid_scene(n, 1.0);
        let candidates: Vec<_> = scene.pickable().collect();
        group.throughput(Throughput::Elements(candidates.len() as u64));
        group.bench_function(format!("grid_n{n}"), |b| {
            let mut ray = RayIntersector::new(Some(pointer), RayIntersectorOptions::default());
            b.iter(|| {
                let hit = intersect_pass(
                    &mut ray,
                    &scene,
                    &(),
                    candidates.iter().copied(),
                    root,
                );
                black_box(hit.distance)
            });
        });
    }
    group.finish();
}

fn bench_sphere_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("sphere_pass");
    for &n in &[8_usize, 32, 64] {
        let (scene, root, pointer) = grid_scene(n, 1.0);
        let candidates: Vec<_> = scene.pickable().collect();
        group.throughput(Throughput::Elements(candidates.len() as u64));
        group.bench_function(format!("grid_n{n}"), |b| {
            let mut sphere =
                SphereIntersector::new(Some(pointer), SphereIntersectorOptions::default());
            b.iter(|| {
                let hit = intersect_pass(
                    &mut sphere,
                    &scene,
                    &(),
                    candidates.iter().copied(),
                    root,
                );
                black_box(hit.distance)
            });
        });
    }
    group.finish();
}

fn bench_commit(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene_commit");
    for &n in &[32_usize, 64] {
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("move_root_n{n}"), |b| {
            b.iter_batched(
                || grid_scene(n, 1.0),
                |(mut scene, root, _)| {
                    scene.set_local_transform(root, Mat4::from_translation(Vec3::X));
                    black_box(scene.commit())
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_ray_pass, bench_sphere_pass, bench_commit);
criterion_main!(benches);
