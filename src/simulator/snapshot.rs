//! Read-only views of the simulation handed to the renderer and editor.

use crate::simulator::{
    components::{
        bodies::{Body, BodyKey, BodyStore},
        connections::{Connection, ConnectionId, ConnectivityGraph},
    },
    ressources::events::SelectionEvent,
};
use serde::Serialize;

/// The fields of a sphere as the renderer and editor see them.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BodyFields {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub radius: f64,
    pub mass: f64,
    pub locked: bool,
}

impl From<&Body> for BodyFields {
    fn from(body: &Body) -> Self {
        Self {
            x: body.position.x,
            y: body.position.y,
            vx: body.velocity.x,
            vy: body.velocity.y,
            radius: body.radius(),
            mass: body.mass(),
            locked: body.locked,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BodySnapshot {
    pub key: BodyKey,
    #[serde(flatten)]
    pub fields: BodyFields,
}

/// The fields of a connection, with both endpoints in key order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ConnectionFields {
    pub a: BodyKey,
    pub b: BodyKey,
    #[serde(flatten)]
    pub connection: Connection,
}

/// A connection together with the line segment to draw for it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ConnectionSnapshot {
    pub id: ConnectionId,
    #[serde(flatten)]
    pub fields: ConnectionFields,
    pub from: [f64; 2],
    pub to: [f64; 2],
}

/// Everything the renderer needs to draw one frame.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FrameSnapshot {
    pub frame: u64,
    pub bodies: Vec<BodySnapshot>,
    pub connections: Vec<ConnectionSnapshot>,
    /// Selections raised by events handled during this frame.
    pub selections: Vec<SelectionEvent>,
}

impl FrameSnapshot {
    /// Captures `bodies` and `graph`. Connections with a missing endpoint
    /// are left out.
    pub fn capture(frame: u64, bodies: &BodyStore, graph: &ConnectivityGraph) -> Self {
        let bodies_snapshot = bodies
            .iter()
            .map(|(key, body)| BodySnapshot {
                key: key.clone(),
                fields: body.into(),
            })
            .collect();

        let connections = graph
            .iter()
            .filter_map(|(id, a, b, connection)| {
                let (from, to) = (bodies.get(a)?, bodies.get(b)?);
                Some(ConnectionSnapshot {
                    id,
                    fields: ConnectionFields {
                        a: a.clone(),
                        b: b.clone(),
                        connection: connection.clone(),
                    },
                    from: from.position.to_array(),
                    to: to.position.to_array(),
                })
            })
            .collect();

        Self {
            frame,
            bodies: bodies_snapshot,
            connections,
            selections: Vec::new(),
        }
    }

    pub fn body(&self, key: &BodyKey) -> Option<&BodyFields> {
        self.bodies
            .iter()
            .find(|snapshot| &snapshot.key == key)
            .map(|snapshot| &snapshot.fields)
    }
}
