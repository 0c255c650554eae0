//! Events flowing into and out of the simulator.

use crate::simulator::{
    components::{bodies::BodyKey, connections::ConnectionId},
    editor::{ConnectionEdit, SphereEdit},
    ressources::simulator_vars::{CursorPosition, WorldSize},
    snapshot::{BodyFields, ConnectionFields},
};
use serde::Serialize;

/// Describes an event received by the [`Simulator`](crate::simulator::Simulator).
#[derive(Clone, Debug, PartialEq)]
pub enum SimulatorEvent {
    /// The pointer was pressed on a sphere.
    PointerDown { key: BodyKey, cursor: CursorPosition },

    /// The pointer moved.
    PointerMove(CursorPosition),

    /// The pointer was released.
    PointerUp,

    /// The pointer left the stage. Ends a drag like [`SimulatorEvent::PointerUp`].
    PointerLeave,

    /// The stage was clicked.
    Click(CursorPosition),

    /// A sphere was double-clicked. Toggles its lock.
    DoubleClick(BodyKey),

    /// The editor submitted new sphere properties.
    EditSphere { key: BodyKey, edit: SphereEdit },

    /// The editor submitted new connection properties.
    EditConnection { id: ConnectionId, edit: ConnectionEdit },

    /// The viewport changed size.
    Resized(WorldSize),

    /// Replace all spheres and connections with freshly sampled ones.
    Reset,
}

/// An element picked for the editor, carrying its current fields.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SelectionEvent {
    Sphere {
        key: BodyKey,
        #[serde(flatten)]
        fields: BodyFields,
    },
    Connection {
        #[serde(rename = "key")]
        id: ConnectionId,
        #[serde(flatten)]
        fields: ConnectionFields,
    },
}
