//! Spheres connected by damped springs, bouncing inside a bounded 2D world.
//!
//! Each frame, every connection pulls or pushes its two spheres (Hooke's law
//! plus relative-velocity damping). Free spheres then move by their
//! velocity and bounce off the walls. Spheres can be dragged, locked in
//! place, selected and edited.
//!
//! # Example
//! ```no_run
//!use springsim::frame_loop::{CancellationToken, FrameLoop, IntervalTicks};
//!use springsim::prelude::*;
//!
//!let mut simulator = Simulator::builder()
//!    .num_spheres(20)
//!    .max_neighbors(2)
//!    .world_size(WorldSize::new(1280.0, 720.0))
//!    .build();
//!
//!let mut frame_loop = FrameLoop::new(IntervalTicks::per_second(60), CancellationToken::new());
//!frame_loop.run(&mut simulator, |snapshot| {
//!    for body in &snapshot.bodies {
//!        println!("{} at ({}, {})", body.key, body.fields.x, body.fields.y);
//!    }
//!});
//! ```

pub mod error;
pub mod event_dispatcher;
pub mod frame_loop;
pub mod simulator;

/// Exports all the core types of the library.
pub mod prelude {
    pub use crate::error::{EditError, SimulationError};
    pub use crate::event_dispatcher::EventDispatcher;
    pub use crate::simulator::components::bodies::{Body, BodyKey, BodyStore, BodyUpdate};
    pub use crate::simulator::components::connections::{
        Connection, ConnectionId, ConnectionUpdate, ConnectivityGraph,
    };
    pub use crate::simulator::editor::{ConnectionEdit, SphereEdit};
    pub use crate::simulator::ressources::events::{SelectionEvent, SimulatorEvent};
    pub use crate::simulator::ressources::simulator_vars::{
        ConnectionParams, CursorPosition, MinDistance, RestLength, SpawnParams, WorldSize,
    };
    pub use crate::simulator::snapshot::FrameSnapshot;
    pub use crate::simulator::{Simulator, SimulatorBuilder};
}
