use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::types::ObjectId;
use crate::assets::manifest::PLANET_IMAGE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyKind {
    Star,
    Planet,
    Moon,
    Asteroid,
    Comet,
    Station,
}

/// A static body drawn on the piloting screen.
///
/// World objects are read-only render inputs: the flight core never moves,
/// spawns or removes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldObject {
    pub id: ObjectId,
    pub kind: BodyKind,
    /// Center in world coordinates.
    pub position: Vec2,
    /// Rendered edge length in pixels.
    pub size: f32,
    /// Manifest name of the image to draw.
    pub sprite: String,
}

impl WorldObject {
    pub fn new(id: ObjectId, kind: BodyKind, position: Vec2, size: f32, sprite: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            position,
            size,
            sprite: sprite.into(),
        }
    }

    pub fn half_size(&self) -> Vec2 {
        Vec2::splat(self.size / 2.0)
    }

    /// Parse a host-supplied object list.
    pub fn list_from_json(json: &str) -> Result<Vec<Self>, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// The stock scene: a single rocky planet.
pub fn default_world() -> Vec<WorldObject> {
    vec![WorldObject::new(
        ObjectId(1),
        BodyKind::Planet,
        Vec2::new(300.0, 200.0),
        100.0,
        PLANET_IMAGE,
    )]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_world_has_rocky_planet() {
        let world = default_world();
        assert_eq!(world.len(), 1);
        assert_eq!(world[0].kind, BodyKind::Planet);
        assert_eq!(world[0].position, Vec2::new(300.0, 200.0));
        assert_eq!(world[0].half_size(), Vec2::splat(50.0));
        assert_eq!(world[0].sprite, PLANET_IMAGE);
    }

    #[test]
    fn parse_object_list() {
        let json = r#"[
            { "id": 7, "kind": "station", "position": [10.0, 20.0], "size": 60.0, "sprite": "dock" }
        ]"#;
        let objects = WorldObject::list_from_json(json).unwrap();
        assert_eq!(objects[0].id, ObjectId(7));
        assert_eq!(objects[0].kind, BodyKind::Station);
        assert_eq!(objects[0].position, Vec2::new(10.0, 20.0));
    }
}
