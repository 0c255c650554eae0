pub mod components;
pub mod editor;
pub mod interaction;
pub mod ressources;
pub mod snapshot;
pub mod systems;

use crate::{
    error::SimulationError,
    event_dispatcher::EventDispatcher,
    simulator::{
        components::{
            bodies::{BodyKey, BodyStore},
            connections::{ConnectionId, ConnectivityGraph},
        },
        editor::{ConnectionEdit, SphereEdit},
        interaction::InteractionController,
        ressources::{
            events::{SelectionEvent, SimulatorEvent},
            simulator_vars::{
                ConnectionParams, CursorPosition, MinDistance, RestLength, SpawnParams, WorldSize,
            },
        },
        snapshot::FrameSnapshot,
        systems::{connectivity, position_update},
    },
};
use log::{debug, info, warn};
use rand::{rngs::StdRng, SeedableRng};
use shrev::ReaderId;
use std::ops::Range;

/// Spheres connected by damped springs inside a bounded world.
///
/// The simulator owns the body store and the connection graph. The
/// renderer calls [`Simulator::step`] once per frame and draws the
/// returned [`FrameSnapshot`]. Pointer and editor input either goes through
/// the direct methods or is queued on the [`EventDispatcher`] and applied
/// at the start of the next step.
pub struct Simulator {
    bodies: BodyStore,
    graph: ConnectivityGraph,
    interaction: InteractionController,
    world_size: WorldSize,
    num_spheres: usize,
    spawn: SpawnParams,
    connection_params: ConnectionParams,
    min_distance: MinDistance,
    rng: StdRng,
    frame: u64,
    dispatcher: EventDispatcher,
    event_reader: ReaderId<SimulatorEvent>,
}

impl Simulator {
    pub fn builder() -> SimulatorBuilder {
        SimulatorBuilder::default()
    }

    /// Runs one frame: applies queued events, then integrates all spheres.
    pub fn step(&mut self) -> FrameSnapshot {
        let mut selections = Vec::new();
        for event in self.dispatcher.read(&mut self.event_reader) {
            if let Some(selection) = self.handle_event(event) {
                selections.push(selection);
            }
        }

        position_update::step(
            &mut self.bodies,
            &self.graph,
            self.interaction.dragged(),
            self.world_size,
            self.min_distance,
        );
        self.frame += 1;

        let mut snapshot = self.snapshot();
        snapshot.selections = selections;
        snapshot
    }

    /// Applies a single event right away. Failures are logged and the event
    /// is dropped.
    pub fn handle_event(&mut self, event: SimulatorEvent) -> Option<SelectionEvent> {
        let result = match event {
            SimulatorEvent::PointerDown { key, cursor } => self.drag_start(&key, cursor),
            SimulatorEvent::PointerMove(cursor) => {
                self.dragged(cursor);
                Ok(())
            }
            SimulatorEvent::PointerUp | SimulatorEvent::PointerLeave => {
                self.drag_end();
                Ok(())
            }
            SimulatorEvent::Click(cursor) => return self.click(cursor),
            SimulatorEvent::DoubleClick(key) => self.toggle_lock(&key).map(|_| ()),
            SimulatorEvent::EditSphere { key, edit } => self.edit_sphere(&key, edit),
            SimulatorEvent::EditConnection { id, edit } => self.edit_connection(id, edit),
            SimulatorEvent::Resized(world_size) => {
                self.resize(world_size);
                Ok(())
            }
            SimulatorEvent::Reset => {
                self.reset();
                Ok(())
            }
        };
        if let Err(err) = result {
            warn!("Event dropped: {0}", err);
        }
        None
    }

    /// Notify simulator that the user started dragging a sphere.
    pub fn drag_start(&mut self, key: &BodyKey, cursor: CursorPosition) -> Result<(), SimulationError> {
        self.interaction.on_pointer_down(&self.bodies, key, cursor)
    }

    /// Update simulator with the current cursor position.
    pub fn dragged(&mut self, cursor: CursorPosition) -> bool {
        self.interaction.on_pointer_move(&mut self.bodies, cursor)
    }

    /// Notify simulator that the user stopped dragging.
    pub fn drag_end(&mut self) -> Option<BodyKey> {
        self.interaction.on_pointer_up()
    }

    /// Selects the sphere under the cursor, if any.
    pub fn click(&self, cursor: CursorPosition) -> Option<SelectionEvent> {
        self.interaction.on_click(&self.bodies, cursor)
    }

    pub fn toggle_lock(&mut self, key: &BodyKey) -> Result<bool, SimulationError> {
        self.interaction.on_double_click(&mut self.bodies, key)
    }

    pub fn select_connection(&self, id: ConnectionId) -> Option<SelectionEvent> {
        self.interaction.select_connection(&self.graph, id)
    }

    /// Applies an editor submission to a sphere. A mass change also sets
    /// the radius.
    pub fn edit_sphere(&mut self, key: &BodyKey, edit: SphereEdit) -> Result<(), SimulationError> {
        edit.validate()?;
        self.bodies.update(key, edit.into_update())?;
        debug!("[{0}] Edited", key);
        Ok(())
    }

    /// Applies an editor submission to a connection.
    pub fn edit_connection(&mut self, id: ConnectionId, edit: ConnectionEdit) -> Result<(), SimulationError> {
        edit.validate()?;
        self.graph.update(id, edit.into_update())?;
        debug!("[{0}] Edited", id);
        Ok(())
    }

    /// Changes the world bounds. Free spheres outside the new bounds are
    /// pushed back in by the next step. Locked and dragged spheres stay
    /// where they are until they are released.
    pub fn resize(&mut self, world_size: WorldSize) {
        info!("Resized to {0}x{1}", world_size.width, world_size.height);
        self.world_size = world_size;
    }

    /// Replaces all spheres and connections with freshly sampled ones.
    pub fn reset(&mut self) {
        self.interaction.on_pointer_up();
        self.bodies = BodyStore::initialize(self.num_spheres, self.world_size, &self.spawn, &mut self.rng);
        self.graph = connectivity::build(&self.bodies, &self.connection_params, &mut self.rng);
        self.frame = 0;
        info!(
            "Reset with {0} spheres and {1} connections",
            self.bodies.len(),
            self.graph.len()
        );
    }

    /// Current state without stepping.
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot::capture(self.frame, &self.bodies, &self.graph)
    }

    pub fn bodies(&self) -> &BodyStore {
        &self.bodies
    }

    pub fn graph(&self) -> &ConnectivityGraph {
        &self.graph
    }

    pub fn world_size(&self) -> WorldSize {
        self.world_size
    }

    /// Number of steps since the last build or reset.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn dragged_sphere(&self) -> Option<&BodyKey> {
        self.interaction.dragged()
    }

    /// A handle for queueing events from the outside.
    pub fn dispatcher(&self) -> EventDispatcher {
        self.dispatcher.clone()
    }
}

/// Builder for `Simulator`
pub struct SimulatorBuilder {
    num_spheres: usize,
    world_size: WorldSize,
    spawn: SpawnParams,
    connection_params: ConnectionParams,
    min_distance: MinDistance,
    seed: Option<u64>,
}

impl SimulatorBuilder {
    /// Get a Instance of `SimulatorBuilder` with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// How many spheres to spawn.
    ///
    /// Default: `20`
    pub fn num_spheres(mut self, num_spheres: usize) -> Self {
        self.num_spheres = num_spheres;
        self
    }

    /// Upper bound of nearest neighbors each sphere connects to.
    /// Each sphere picks at least one neighbor, even when this is `0`.
    ///
    /// Default: `2`
    pub fn max_neighbors(mut self, max_neighbors: usize) -> Self {
        self.connection_params.max_neighbors = max_neighbors;
        self
    }

    /// Size of the world the spheres live in.
    ///
    /// Default: `1280x720`
    pub fn world_size(mut self, world_size: impl Into<WorldSize>) -> Self {
        self.world_size = world_size.into();
        self
    }

    /// Range spawned radii are drawn from. Mass is `radius / 10`.
    ///
    /// Panics when the range is empty or not positive
    ///
    /// Default: `20.0..50.0`
    pub fn radius_range(mut self, radius: Range<f64>) -> Self {
        if radius.start <= 0.0 || radius.end <= radius.start {
            panic!("radius range must be positive and non-empty!");
        }
        self.spawn.radius = radius;
        self
    }

    /// Largest initial speed per axis, in units per frame.
    ///
    /// Default: `1.0`
    pub fn max_initial_speed(mut self, max_speed: f64) -> Self {
        self.spawn.max_speed = max_speed;
        self
    }

    /// Range spring constants are drawn from.
    ///
    /// Panics when the range is not positive or its end lies below its start
    ///
    /// Default: `0.0001..0.0011`
    pub fn spring_constant_range(mut self, spring_constant: Range<f64>) -> Self {
        if !spring_constant.start.is_finite()
            || !spring_constant.end.is_finite()
            || spring_constant.start <= 0.0
            || spring_constant.end < spring_constant.start
        {
            panic!("spring constant range must be positive!");
        }
        self.connection_params.spring_constant = spring_constant;
        self
    }

    /// Range damping constants are drawn from.
    ///
    /// Panics when the range is negative or its end lies below its start
    ///
    /// Default: `0.001..0.002`
    pub fn damping_constant_range(mut self, damping_constant: Range<f64>) -> Self {
        if !damping_constant.start.is_finite()
            || !damping_constant.end.is_finite()
            || damping_constant.start < 0.0
            || damping_constant.end < damping_constant.start
        {
            panic!("damping constant range must not be negative!");
        }
        self.connection_params.damping_constant = damping_constant;
        self
    }

    /// How rest lengths relate to the initial distance between spheres.
    ///
    /// Default: `RestLength::RandomScale { max_factor: 2.0 }`
    pub fn rest_length(mut self, rest_length: RestLength) -> Self {
        self.connection_params.rest_length = rest_length;
        self
    }

    /// Distance below which a spring exerts no spring force.
    ///
    /// Default: `1e-9`
    pub fn min_distance(mut self, min_distance: f64) -> Self {
        self.min_distance = MinDistance(min_distance);
        self
    }

    /// Seed for all random sampling. Without a seed every run differs.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Constructs a instance of `Simulator` with randomly placed spheres
    pub fn build(self) -> Simulator {
        let mut simulator = self.build_from(BodyStore::new(), ConnectivityGraph::new());
        simulator.reset();
        simulator
    }

    /// Constructs a instance of `Simulator` around existing spheres and
    /// connections. A later [`Simulator::reset`] samples fresh ones.
    pub fn build_from(self, bodies: BodyStore, graph: ConnectivityGraph) -> Simulator {
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let dispatcher = EventDispatcher::new();
        let event_reader = dispatcher.register_reader();
        Simulator {
            bodies,
            graph,
            interaction: InteractionController::new(),
            world_size: self.world_size,
            num_spheres: self.num_spheres,
            spawn: self.spawn,
            connection_params: self.connection_params,
            min_distance: self.min_distance,
            rng,
            frame: 0,
            dispatcher,
            event_reader,
        }
    }
}

impl Default for SimulatorBuilder {
    /// Get a Instance of `SimulatorBuilder` with default values
    fn default() -> Self {
        Self {
            num_spheres: 20,
            world_size: WorldSize::default(),
            spawn: SpawnParams::default(),
            connection_params: ConnectionParams::default(),
            min_distance: MinDistance::default(),
            seed: None,
        }
    }
}
