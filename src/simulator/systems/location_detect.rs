use crate::simulator::{
    components::bodies::{BodyKey, BodyStore},
    ressources::simulator_vars::CursorPosition,
};
use log::debug;

/// Finds the sphere under the cursor.
///
/// Spheres are tested in store order and the first one whose circle holds
/// the cursor wins, even when a later sphere is closer.
pub fn point_intersect<'a>(bodies: &'a BodyStore, cursor: CursorPosition) -> Option<&'a BodyKey> {
    let hit = bodies
        .iter()
        .find(|(_, body)| body.contains(cursor.0))
        .map(|(key, _)| key);
    if let Some(key) = hit {
        debug!("Point {0} intersect [{1}]", cursor.0, key);
    }
    hit
}
