use crate::simulator::{
    components::{
        bodies::{Body, BodyStore},
        connections::{Connection, ConnectivityGraph},
    },
    ressources::simulator_vars::MinDistance,
};
use glam::DVec2;
use log::{trace, warn};
use rayon::prelude::*;

/// Computes the force a connection exerts on `owner`. The neighbor receives
/// the exact negation.
///
/// The spring term follows Hooke's law along the line between both centers.
/// The damping term is proportional to the relative velocity. When the
/// centers are closer than `min_distance`, the spring has no direction and
/// only the damping term remains.
pub fn spring_force(owner: &Body, neighbor: &Body, connection: &Connection, min_distance: MinDistance) -> DVec2 {
    let dx = neighbor.position.x - owner.position.x;
    let dy = neighbor.position.y - owner.position.y;
    let distance = (dx * dx + dy * dy).sqrt();

    let spring = if distance > min_distance.0 {
        let magnitude = connection.spring_constant * (distance - connection.length);
        DVec2::new((magnitude * dx) / distance, (magnitude * dy) / distance)
    } else {
        DVec2::ZERO
    };

    let relative_velocity = neighbor.velocity - owner.velocity;
    let damping = relative_velocity * connection.damping_constant;

    spring + damping
}

/// Computes the velocity change of every sphere caused by all connections.
///
/// The returned buffer is indexed in store order. Forces are evaluated
/// against the velocities from before this pass, so the result does not
/// depend on connection order. Connections whose endpoints are missing from
/// `bodies` are skipped.
pub fn velocity_deltas(bodies: &BodyStore, graph: &ConnectivityGraph, min_distance: MinDistance) -> Vec<DVec2> {
    let pairs: Vec<(usize, usize, &Connection)> = graph
        .iter()
        .filter_map(|(id, a, b, connection)| {
            match (bodies.index_of(a), bodies.index_of(b)) {
                (Some(i), Some(j)) => Some((i, j, connection)),
                _ => {
                    warn!("Connection {0} refers to a missing sphere ({1}, {2}), skipped", id, a, b);
                    None
                }
            }
        })
        .collect();

    let forces: Vec<DVec2> = pairs
        .par_iter()
        .map(|&(i, j, connection)| {
            spring_force(bodies.body_at(i), bodies.body_at(j), connection, min_distance)
        })
        .collect();

    let mut deltas = vec![DVec2::ZERO; bodies.len()];
    for (&(i, j, _), force) in pairs.iter().zip(forces) {
        let owner_mass = bodies.body_at(i).mass();
        let neighbor_mass = bodies.body_at(j).mass();
        deltas[i] += force / owner_mass;
        deltas[j] -= force / neighbor_mass;
        trace!("(CEF) [{0}] <-> [{1}] f: {2}", i, j, force);
    }
    deltas
}

/// Adds a delta buffer from [`velocity_deltas`] to the sphere velocities.
pub fn apply_velocity_deltas(bodies: &mut BodyStore, deltas: &[DVec2]) {
    for ((_, body), delta) in bodies.iter_mut().zip(deltas) {
        body.velocity += *delta;
    }
}
