use crate::simulator::ressources::events::SimulatorEvent;
use shrev::{EventChannel, ReaderId};
use std::sync::{Arc, PoisonError, RwLock};

/// Queues [`SimulatorEvent`]s from any thread until the simulator reads
/// them at the start of its next step.
///
/// Clones share the same channel.
#[derive(Clone)]
pub struct EventDispatcher {
    pub sim_chan: Arc<RwLock<EventChannel<SimulatorEvent>>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        let chan = EventChannel::<SimulatorEvent>::new();
        Self {
            sim_chan: Arc::new(RwLock::new(chan)),
        }
    }

    pub fn send(&self, event: SimulatorEvent) {
        self.sim_chan
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .single_write(event);
    }

    /// Registers a reader that sees every event sent from now on.
    pub fn register_reader(&self) -> ReaderId<SimulatorEvent> {
        self.sim_chan
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .register_reader()
    }

    /// Events sent since `reader` last read, in arrival order.
    pub fn read(&self, reader: &mut ReaderId<SimulatorEvent>) -> Vec<SimulatorEvent> {
        self.sim_chan
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .read(reader)
            .cloned()
            .collect()
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
