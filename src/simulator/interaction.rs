//! Turns pointer input into drags, lock toggles and selections.

use crate::error::SimulationError;
use crate::simulator::{
    components::{
        bodies::{BodyKey, BodyStore},
        connections::{ConnectionId, ConnectivityGraph},
    },
    ressources::{events::SelectionEvent, simulator_vars::CursorPosition},
    snapshot::ConnectionFields,
    systems::location_detect::point_intersect,
};
use glam::DVec2;
use log::{debug, warn};

/// The sphere currently held by the pointer.
#[derive(Clone, Debug, PartialEq)]
pub struct DragState {
    pub key: BodyKey,
    /// Cursor position relative to the sphere's center when the drag began.
    pub offset: DVec2,
}

#[derive(Clone, Debug, Default)]
pub struct InteractionController {
    drag: Option<DragState>,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drag_state(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    /// Key of the dragged sphere, if any.
    pub fn dragged(&self) -> Option<&BodyKey> {
        self.drag.as_ref().map(|drag| &drag.key)
    }

    /// Starts dragging `key`. The grab offset is kept so the sphere does not
    /// jump to the cursor.
    pub fn on_pointer_down(
        &mut self,
        bodies: &BodyStore,
        key: &BodyKey,
        cursor: CursorPosition,
    ) -> Result<(), SimulationError> {
        let body = bodies
            .get(key)
            .ok_or_else(|| SimulationError::UnknownBody(key.clone()))?;
        debug!("[{0}] Drag start", key);
        self.drag = Some(DragState {
            key: key.clone(),
            offset: cursor.0 - body.position,
        });
        Ok(())
    }

    /// Moves the dragged sphere under the cursor and stops it. Returns
    /// whether a sphere was moved.
    pub fn on_pointer_move(&mut self, bodies: &mut BodyStore, cursor: CursorPosition) -> bool {
        let Some(drag) = &self.drag else {
            return false;
        };
        match bodies.get_mut(&drag.key) {
            Some(body) => {
                body.position = cursor.0 - drag.offset;
                body.velocity = DVec2::ZERO;
                true
            }
            None => {
                warn!("[{0}] Dragged sphere no longer exists, drag ended", drag.key);
                self.drag = None;
                false
            }
        }
    }

    /// Ends the drag, returning the released sphere.
    pub fn on_pointer_up(&mut self) -> Option<BodyKey> {
        let released = self.drag.take().map(|drag| drag.key);
        if let Some(key) = &released {
            debug!("[{0}] Drag end", key);
        }
        released
    }

    /// Selects the first sphere in store order that holds the cursor.
    pub fn on_click(&self, bodies: &BodyStore, cursor: CursorPosition) -> Option<SelectionEvent> {
        let key = point_intersect(bodies, cursor)?;
        let body = bodies.get(key)?;
        debug!("[{0}] Selected", key);
        Some(SelectionEvent::Sphere {
            key: key.clone(),
            fields: body.into(),
        })
    }

    /// Flips the lock of `key` and returns the new state.
    pub fn on_double_click(&self, bodies: &mut BodyStore, key: &BodyKey) -> Result<bool, SimulationError> {
        let body = bodies
            .get_mut(key)
            .ok_or_else(|| SimulationError::UnknownBody(key.clone()))?;
        body.locked = !body.locked;
        debug!("[{0}] Locked: {1}", key, body.locked);
        Ok(body.locked)
    }

    /// Selects a connection for the editor.
    pub fn select_connection(&self, graph: &ConnectivityGraph, id: ConnectionId) -> Option<SelectionEvent> {
        let connection = graph.get(id)?;
        let (a, b) = graph.endpoints(id)?;
        debug!("[{0}] Selected", id);
        Some(SelectionEvent::Connection {
            id,
            fields: ConnectionFields {
                a: a.clone(),
                b: b.clone(),
                connection: connection.clone(),
            },
        })
    }
}
