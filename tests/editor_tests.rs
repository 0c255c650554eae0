use glam::DVec2;
use springsim::prelude::*;

fn simulator() -> (Simulator, ConnectionId) {
    let mut bodies = BodyStore::new();
    bodies.set(BodyKey::new("a"), Body::at(DVec2::new(100.0, 100.0), 1.5));
    bodies.set(BodyKey::new("b"), Body::at(DVec2::new(200.0, 100.0), 2.5));
    let mut graph = ConnectivityGraph::new();
    let id = graph
        .connect(&BodyKey::new("a"), &BodyKey::new("b"), Connection::new(80.0, 0.001, 0.001))
        .unwrap();
    let simulator = Simulator::builder().seed(1).build_from(bodies, graph);
    (simulator, id)
}

#[test]
fn sphere_form_parses_mass_and_lock() {
    let edit = SphereEdit::from_form([("mass", "4.5"), ("locked", "true")]).unwrap();
    assert_eq!(edit, SphereEdit::new().mass(4.5).locked(true));
}

#[test]
fn sphere_form_rejects_text() {
    assert_eq!(
        SphereEdit::from_form([("mass", "heavy")]),
        Err(EditError::NotNumeric {
            field: "mass",
            value: "heavy".to_string()
        })
    );
}

#[test]
fn sphere_form_rejects_non_positive_mass() {
    assert_eq!(
        SphereEdit::from_form([("mass", "0")]),
        Err(EditError::NonPositiveMass(0.0))
    );
    assert_eq!(
        SphereEdit::from_form([("mass", "-2")]),
        Err(EditError::NonPositiveMass(-2.0))
    );
}

#[test]
fn sphere_form_rejects_foreign_fields() {
    assert_eq!(
        SphereEdit::from_form([("length", "3")]),
        Err(EditError::UnknownField("length".to_string()))
    );
}

#[test]
fn connection_form_accepts_both_spellings() {
    let camel = ConnectionEdit::from_form([
        ("length", "40"),
        ("springConstant", "0.002"),
        ("dampingConstant", "0"),
    ])
    .unwrap();
    let snake = ConnectionEdit::from_form([
        ("length", "40"),
        ("spring_constant", "0.002"),
        ("damping_constant", "0"),
    ])
    .unwrap();
    assert_eq!(camel, snake);
    assert_eq!(
        camel,
        ConnectionEdit::new()
            .length(40.0)
            .spring_constant(0.002)
            .damping_constant(0.0)
    );
}

#[test]
fn connection_form_rejects_invalid_values() {
    assert_eq!(
        ConnectionEdit::from_form([("length", "-1")]),
        Err(EditError::NegativeLength(-1.0))
    );
    assert_eq!(
        ConnectionEdit::from_form([("springConstant", "0")]),
        Err(EditError::NonPositiveSpringConstant(0.0))
    );
    assert_eq!(
        ConnectionEdit::from_form([("dampingConstant", "-0.5")]),
        Err(EditError::NegativeDampingConstant(-0.5))
    );
    assert!(ConnectionEdit::from_form([("length", "NaN")]).is_err());
}

#[test]
fn mass_edit_resizes_sphere() {
    let (mut simulator, _) = simulator();
    let key = BodyKey::new("a");
    simulator.edit_sphere(&key, SphereEdit::new().mass(3.0)).unwrap();

    let body = simulator.bodies().get(&key).unwrap();
    assert_eq!(body.mass(), 3.0);
    assert_eq!(body.radius(), 30.0);
}

#[test]
fn lock_only_edit_keeps_radius() {
    let (mut simulator, _) = simulator();
    let key = BodyKey::new("b");
    simulator.edit_sphere(&key, SphereEdit::new().locked(true)).unwrap();

    let body = simulator.bodies().get(&key).unwrap();
    assert!(body.locked);
    assert_eq!(body.radius(), 25.0);
}

#[test]
fn rejected_edit_retains_previous_values() {
    let (mut simulator, id) = simulator();
    let key = BodyKey::new("a");

    let err = simulator
        .edit_sphere(&key, SphereEdit::new().mass(-1.0))
        .unwrap_err();
    assert_eq!(err, SimulationError::InvalidEdit(EditError::NonPositiveMass(-1.0)));
    assert_eq!(simulator.bodies().get(&key).unwrap().mass(), 1.5);

    let err = simulator
        .edit_connection(id, ConnectionEdit::new().length(-5.0).spring_constant(0.5))
        .unwrap_err();
    assert_eq!(err, SimulationError::InvalidEdit(EditError::NegativeLength(-5.0)));
    assert_eq!(
        simulator.graph().get(id),
        Some(&Connection::new(80.0, 0.001, 0.001))
    );
}

#[test]
fn connection_edit_updates_only_given_fields() {
    let (mut simulator, id) = simulator();
    simulator
        .edit_connection(id, ConnectionEdit::new().spring_constant(0.05))
        .unwrap();
    assert_eq!(
        simulator.graph().get(id),
        Some(&Connection::new(80.0, 0.05, 0.001))
    );
}

#[test]
fn edits_of_unknown_elements_fail() {
    let (mut simulator, _) = simulator();
    assert_eq!(
        simulator.edit_sphere(&BodyKey::new("x"), SphereEdit::new().mass(1.0)),
        Err(SimulationError::UnknownBody(BodyKey::new("x")))
    );
    assert_eq!(
        simulator.edit_connection(ConnectionId(42), ConnectionEdit::new().length(1.0)),
        Err(SimulationError::UnknownConnection(ConnectionId(42)))
    );
}
