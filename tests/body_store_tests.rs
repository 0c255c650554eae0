use glam::DVec2;
use rand::{rngs::StdRng, SeedableRng};
use springsim::prelude::*;
use springsim::simulator::components::bodies::RADIUS_PER_MASS;

fn spawn(count: usize, world_size: WorldSize, seed: u64) -> BodyStore {
    let mut rng = StdRng::seed_from_u64(seed);
    BodyStore::initialize(count, world_size, &SpawnParams::default(), &mut rng)
}

#[test]
fn initialize_creates_indexed_keys_in_order() {
    let store = spawn(5, WorldSize::default(), 1);
    let keys: Vec<_> = store.keys().map(|k| k.to_string()).collect();
    assert_eq!(keys, ["sphere_0", "sphere_1", "sphere_2", "sphere_3", "sphere_4"]);
}

#[test]
fn initialize_places_spheres_fully_inside() {
    let world = WorldSize::new(640.0, 480.0);
    let store = spawn(200, world, 2);
    for (key, body) in store.iter() {
        let r = body.radius();
        assert!((20.0..50.0).contains(&r), "{key} radius {r}");
        assert!(body.position.x >= r && body.position.x <= world.width - r, "{key} x");
        assert!(body.position.y >= r && body.position.y <= world.height - r, "{key} y");
        assert!(body.velocity.x.abs() <= 1.0 && body.velocity.y.abs() <= 1.0);
        assert!(!body.locked);
    }
}

#[test]
fn initialize_derives_radius_from_mass() {
    let store = spawn(50, WorldSize::default(), 3);
    for (_, body) in store.iter() {
        assert_eq!(body.radius(), body.mass() * RADIUS_PER_MASS);
    }
}

#[test]
fn tiny_world_centers_spheres() {
    let store = spawn(3, WorldSize::new(30.0, 30.0), 4);
    for (_, body) in store.iter() {
        assert_eq!(body.position, DVec2::new(15.0, 15.0));
    }
}

#[test]
fn same_seed_same_store() {
    let a = spawn(10, WorldSize::default(), 9);
    let b = spawn(10, WorldSize::default(), 9);
    for ((ka, ba), (kb, bb)) in a.iter().zip(b.iter()) {
        assert_eq!(ka, kb);
        assert_eq!(ba, bb);
    }
}

#[test]
fn mass_update_recomputes_radius() {
    let mut store = spawn(4, WorldSize::default(), 5);
    let key = BodyKey::indexed(2);
    let body = store.update(&key, BodyUpdate::new().mass(3.7)).unwrap();
    assert_eq!(body.mass(), 3.7);
    assert_eq!(body.radius(), 3.7 * RADIUS_PER_MASS);
}

#[test]
fn update_without_mass_keeps_radius() {
    let mut store = spawn(4, WorldSize::default(), 6);
    let key = BodyKey::indexed(0);
    let before = store.get(&key).unwrap().radius();
    let body = store
        .update(&key, BodyUpdate::new().locked(true).velocity(DVec2::new(2.0, -2.0)))
        .unwrap();
    assert_eq!(body.radius(), before);
    assert!(body.locked);
    assert_eq!(body.velocity, DVec2::new(2.0, -2.0));
}

#[test]
fn update_of_unknown_key_fails_without_side_effects() {
    let mut store = spawn(2, WorldSize::default(), 7);
    let missing = BodyKey::new("sphere_99");
    assert_eq!(
        store.update(&missing, BodyUpdate::new().mass(1.0)).unwrap_err(),
        SimulationError::UnknownBody(missing.clone())
    );
    assert_eq!(store.len(), 2);
    assert!(!store.contains_key(&missing));
}

#[test]
fn invalid_mass_update_is_rejected_whole() {
    let mut store = BodyStore::new();
    let key = BodyKey::new("a");
    store.set(key.clone(), Body::at(DVec2::new(500.0, 500.0), 1.5));

    assert_eq!(
        store
            .update(&key, BodyUpdate::new().mass(0.0).position(DVec2::new(1.0, 1.0)))
            .unwrap_err(),
        SimulationError::InvalidEdit(EditError::NonPositiveMass(0.0))
    );
    assert_eq!(
        store.update(&key, BodyUpdate::new().mass(f64::NAN)).unwrap_err(),
        SimulationError::InvalidEdit(EditError::NotFinite { field: "mass" })
    );

    let body = store.get(&key).unwrap();
    assert_eq!(body.mass(), 1.5);
    assert_eq!(body.radius(), 15.0);
    assert_eq!(body.position, DVec2::new(500.0, 500.0));
}

#[test]
fn rejected_mass_keeps_the_next_step_finite() {
    let mut store = BodyStore::new();
    let key = BodyKey::new("a");
    store.set(key.clone(), Body::at(DVec2::new(500.0, 500.0), 1.0));
    store.set(BodyKey::new("b"), Body::at(DVec2::new(540.0, 500.0), 1.0));
    let mut graph = ConnectivityGraph::new();
    graph.connect(&key, &BodyKey::new("b"), Connection::new(10.0, 0.1, 0.01));

    assert!(store.update(&key, BodyUpdate::new().mass(-2.0)).is_err());
    springsim::simulator::systems::position_update::step(
        &mut store,
        &graph,
        None,
        WorldSize::new(1000.0, 1000.0),
        MinDistance::default(),
    );

    for (_, body) in store.iter() {
        assert!(body.position.is_finite());
        assert!(body.velocity.is_finite());
    }
}

#[test]
fn set_inserts_and_get_reads_back() {
    let mut store = BodyStore::new();
    store.set(BodyKey::new("solo"), Body::at(DVec2::new(1.0, 2.0), 2.0));
    let body = store.get(&BodyKey::new("solo")).unwrap();
    assert_eq!(body.position, DVec2::new(1.0, 2.0));
    assert_eq!(body.radius(), 20.0);
    assert_eq!(store.index_of(&BodyKey::new("solo")), Some(0));
}
