use crate::simulator::{
    components::{
        bodies::{Body, BodyKey, BodyStore},
        connections::ConnectivityGraph,
    },
    ressources::simulator_vars::{MinDistance, WorldSize},
    systems::force_compute::{apply_velocity_deltas, velocity_deltas},
};

/// Advances every sphere by one frame.
///
/// 1. Spring and damping forces of all connections change the velocities.
/// 2. Spheres that are neither `dragged` nor locked move by their velocity.
/// 3. Moved spheres that cross a wall are put back against it and have
///    that velocity component reversed.
///
/// The whole step runs on `&mut BodyStore`, so no reader observes a
/// partially updated store.
pub fn step(
    bodies: &mut BodyStore,
    graph: &ConnectivityGraph,
    dragged: Option<&BodyKey>,
    world_size: WorldSize,
    min_distance: MinDistance,
) {
    let deltas = velocity_deltas(bodies, graph, min_distance);
    apply_velocity_deltas(bodies, &deltas);
    update_positions(bodies, dragged, world_size);
}

/// Explicit Euler position update followed by wall collisions.
pub fn update_positions(bodies: &mut BodyStore, dragged: Option<&BodyKey>, world_size: WorldSize) {
    for (key, body) in bodies.iter_mut() {
        if dragged == Some(key) || body.locked {
            continue;
        }
        body.position += body.velocity;
        resolve_boundary(body, world_size);
    }
}

/// Keeps `body` within `world_size`, reflecting the velocity on every axis
/// where it was pushed back. Returns whether a wall was hit.
///
/// If a sphere is wider than the world on some axis, it rests against the
/// lower wall on that axis.
pub fn resolve_boundary(body: &mut Body, world_size: WorldSize) -> bool {
    let radius = body.radius();
    let hit_x = reflect_axis(&mut body.position.x, &mut body.velocity.x, radius, world_size.width);
    let hit_y = reflect_axis(&mut body.position.y, &mut body.velocity.y, radius, world_size.height);
    hit_x || hit_y
}

fn reflect_axis(position: &mut f64, velocity: &mut f64, radius: f64, extent: f64) -> bool {
    if *position - radius < 0.0 {
        *position = radius;
        *velocity = -*velocity;
        true
    } else if *position + radius > extent {
        *position = extent - radius;
        *velocity = -*velocity;
        true
    } else {
        false
    }
}
