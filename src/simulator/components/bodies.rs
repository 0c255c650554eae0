//! Components which make up a sphere, and the store holding them.

use crate::error::SimulationError;
use crate::simulator::editor::check_mass;
use crate::simulator::ressources::simulator_vars::{sample, SpawnParams, WorldSize};
use glam::DVec2;
use log::info;
use rand::Rng;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Radius of a sphere per unit of mass.
pub const RADIUS_PER_MASS: f64 = 10.0;

/// Stable identity of a sphere, e.g. `sphere_3`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct BodyKey(String);

impl BodyKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The key given to the `i`th sphere of a freshly initialized store.
    pub fn indexed(i: usize) -> Self {
        Self(format!("sphere_{i}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BodyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BodyKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// A circular body.
///
/// Mass is the authoritative property. The radius is always `mass * 10`
/// and can only change through [`Body::set_mass`].
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    pub position: DVec2,
    /// Velocity in units per frame.
    pub velocity: DVec2,
    mass: f64,
    radius: f64,
    /// A locked sphere does not move.
    pub locked: bool,
}

impl Body {
    pub fn new(position: DVec2, velocity: DVec2, mass: f64) -> Self {
        debug_assert!(mass > 0.0, "mass must be positive");
        Self {
            position,
            velocity,
            mass,
            radius: mass * RADIUS_PER_MASS,
            locked: false,
        }
    }

    /// Body at rest at `position`.
    pub fn at(position: DVec2, mass: f64) -> Self {
        Self::new(position, DVec2::ZERO, mass)
    }

    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    #[inline(always)]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    #[inline(always)]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Sets the mass and recomputes the radius from it.
    pub fn set_mass(&mut self, mass: f64) {
        debug_assert!(mass > 0.0, "mass must be positive");
        self.mass = mass;
        self.radius = mass * RADIUS_PER_MASS;
    }

    /// Whether `point` lies inside or on the circumference of this sphere.
    pub fn contains(&self, point: DVec2) -> bool {
        self.position.distance_squared(point) <= self.radius * self.radius
    }
}

/// A partial update of a [`Body`]. Unset fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BodyUpdate {
    pub position: Option<DVec2>,
    pub velocity: Option<DVec2>,
    pub mass: Option<f64>,
    pub locked: Option<bool>,
}

impl BodyUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(mut self, position: DVec2) -> Self {
        self.position = Some(position);
        self
    }

    pub fn velocity(mut self, velocity: DVec2) -> Self {
        self.velocity = Some(velocity);
        self
    }

    pub fn mass(mut self, mass: f64) -> Self {
        self.mass = Some(mass);
        self
    }

    pub fn locked(mut self, locked: bool) -> Self {
        self.locked = Some(locked);
        self
    }

    fn apply(self, body: &mut Body) {
        if let Some(position) = self.position {
            body.position = position;
        }
        if let Some(velocity) = self.velocity {
            body.velocity = velocity;
        }
        if let Some(mass) = self.mass {
            body.set_mass(mass);
        }
        if let Some(locked) = self.locked {
            body.locked = locked;
        }
    }
}

/// All spheres of a session, kept in insertion order.
///
/// Store order is the order used by every pass that iterates spheres,
/// including hit-testing.
#[derive(Clone, Debug, Default)]
pub struct BodyStore {
    entries: Vec<(BodyKey, Body)>,
    index: HashMap<BodyKey, usize>,
}

impl BodyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns `count` spheres at random inside `world_size`.
    ///
    /// Each sphere is inset by its radius so that it starts fully in bounds.
    /// If an axis is too small to fit the sphere, it is centered on that axis.
    pub fn initialize<R: Rng + ?Sized>(
        count: usize,
        world_size: WorldSize,
        params: &SpawnParams,
        rng: &mut R,
    ) -> Self {
        let mut store = Self {
            entries: Vec::with_capacity(count),
            index: HashMap::with_capacity(count),
        };

        for i in 0..count {
            let radius = sample(rng, &params.radius);
            let mass = radius / RADIUS_PER_MASS;
            let x = sample_axis(rng, radius, world_size.width);
            let y = sample_axis(rng, radius, world_size.height);
            let speed = params.max_speed.abs();
            let velocity = DVec2::new(
                sample(rng, &(-speed..speed)),
                sample(rng, &(-speed..speed)),
            );
            store.set(BodyKey::indexed(i), Body::new(DVec2::new(x, y), velocity, mass));
        }

        info!(
            "Initialized {0} spheres in {1}x{2}",
            store.len(),
            world_size.width,
            world_size.height
        );
        store
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &BodyKey) -> bool {
        self.index.contains_key(key)
    }

    pub fn get(&self, key: &BodyKey) -> Option<&Body> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    pub fn get_mut(&mut self, key: &BodyKey) -> Option<&mut Body> {
        match self.index.get(key) {
            Some(&i) => Some(&mut self.entries[i].1),
            None => None,
        }
    }

    /// Inserts `body` under `key`, replacing an existing sphere in place.
    pub fn set(&mut self, key: BodyKey, body: Body) {
        match self.index.get(&key) {
            Some(&i) => self.entries[i].1 = body,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, body));
            }
        }
    }

    /// Applies a partial update to one sphere. A mass change recomputes the
    /// radius in the same call. An invalid mass leaves the sphere untouched.
    pub fn update(&mut self, key: &BodyKey, update: BodyUpdate) -> Result<&Body, SimulationError> {
        let i = *self
            .index
            .get(key)
            .ok_or_else(|| SimulationError::UnknownBody(key.clone()))?;
        if let Some(mass) = update.mass {
            check_mass(mass)?;
        }
        let body = &mut self.entries[i].1;
        update.apply(body);
        Ok(&*body)
    }

    /// Position of `key` in store order.
    pub fn index_of(&self, key: &BodyKey) -> Option<usize> {
        self.index.get(key).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&BodyKey, &Body)> {
        self.entries.iter().map(|(key, body)| (key, body))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&BodyKey, &mut Body)> {
        self.entries.iter_mut().map(|(key, body)| (&*key, body))
    }

    pub fn keys(&self) -> impl Iterator<Item = &BodyKey> {
        self.entries.iter().map(|(key, _)| key)
    }

    pub(crate) fn body_at(&self, i: usize) -> &Body {
        &self.entries[i].1
    }
}

fn sample_axis<R: Rng + ?Sized>(rng: &mut R, radius: f64, extent: f64) -> f64 {
    let (lo, hi) = (radius, extent - radius);
    if hi > lo {
        rng.gen_range(lo..=hi)
    } else {
        extent / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radius_follows_mass() {
        let mut body = Body::at(DVec2::new(1.0, 2.0), 2.5);
        assert_eq!(body.radius(), 25.0);
        body.set_mass(0.3);
        assert_eq!(body.radius(), 0.3 * RADIUS_PER_MASS);
    }

    #[test]
    fn set_replaces_in_place() {
        let mut store = BodyStore::new();
        store.set("a".into(), Body::at(DVec2::ZERO, 1.0));
        store.set("b".into(), Body::at(DVec2::ONE, 1.0));
        store.set("a".into(), Body::at(DVec2::new(5.0, 5.0), 2.0));

        let keys: Vec<_> = store.keys().map(BodyKey::as_str).collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(store.get(&"a".into()).map(Body::mass), Some(2.0));
    }

    #[test]
    fn contains_includes_circumference() {
        let body = Body::at(DVec2::ZERO, 1.0);
        assert!(body.contains(DVec2::new(10.0, 0.0)));
        assert!(!body.contains(DVec2::new(10.0, 0.1)));
    }
}
