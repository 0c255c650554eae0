use crate::simulator::{
    components::{
        bodies::BodyStore,
        connections::{Connection, ConnectivityGraph},
    },
    ressources::simulator_vars::{sample, ConnectionParams, RestLength},
};
use log::{info, trace};
use rand::Rng;

/// Builds the spring graph from the current sphere layout.
///
/// Every sphere, in store order, connects to a random number of its nearest
/// neighbors: between `1` and `max(max_neighbors, 1)`, drawn independently
/// per sphere. The result is an asymmetric k-nearest-neighbor graph. A pair
/// picked from both sides is stored once; the later pick replaces the
/// spring of the earlier one.
///
/// Fewer than two spheres yield an empty graph.
pub fn build<R: Rng + ?Sized>(bodies: &BodyStore, params: &ConnectionParams, rng: &mut R) -> ConnectivityGraph {
    let mut graph = ConnectivityGraph::new();
    if bodies.len() < 2 {
        return graph;
    }

    let entries: Vec<_> = bodies.iter().collect();
    let mut distances = Vec::with_capacity(entries.len() - 1);

    for (i, (key, body)) in entries.iter().enumerate() {
        distances.clear();
        distances.extend(
            entries
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(j, (_, other))| (j, body.position.distance(other.position))),
        );
        // Stable sort: ties keep store order.
        distances.sort_by(|a, b| a.1.total_cmp(&b.1));

        let count = neighbor_count(rng, params.max_neighbors).min(distances.len());
        for &(j, distance) in &distances[..count] {
            let neighbor_key = entries[j].0;
            let connection = Connection::new(
                rest_length(rng, params.rest_length, distance),
                sample(rng, &params.spring_constant),
                sample(rng, &params.damping_constant),
            );
            trace!(
                "[{0}] -> [{1}] d: {2} | l: {3} | k: {4} | c: {5}",
                key,
                neighbor_key,
                distance,
                connection.length,
                connection.spring_constant,
                connection.damping_constant
            );
            graph.connect(key, neighbor_key, connection);
        }
    }

    info!(
        "Generated {0} connections between {1} spheres",
        graph.len(),
        bodies.len()
    );
    graph
}

/// `1 + floor(random * max_neighbors)`, so never less than one.
fn neighbor_count<R: Rng + ?Sized>(rng: &mut R, max_neighbors: usize) -> usize {
    if max_neighbors == 0 {
        1
    } else {
        1 + rng.gen_range(0..max_neighbors)
    }
}

fn rest_length<R: Rng + ?Sized>(rng: &mut R, policy: RestLength, distance: f64) -> f64 {
    match policy {
        RestLength::Measured => distance,
        RestLength::RandomScale { max_factor } => sample(rng, &(0.0..max_factor)) * distance,
    }
}
