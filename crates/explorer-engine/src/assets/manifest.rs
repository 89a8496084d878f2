use std::collections::HashMap;
use serde::{Deserialize, Serialize};

use crate::error::AssetError;

/// What an image is used for on the piloting screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageRole {
    Ship,
    Background,
    WorldObject,
}

impl ImageRole {
    pub fn label(self) -> &'static str {
        match self {
            ImageRole::Ship => "ship",
            ImageRole::Background => "background",
            ImageRole::WorldObject => "world_object",
        }
    }
}

/// Describes a single image the host must load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageDescriptor {
    /// Relative path or URL of the image file (e.g., "player-ship.png").
    pub path: String,
    pub role: ImageRole,
}

/// Asset manifest describing every image the piloting screen draws.
/// Loaded from a JSON file at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetManifest {
    /// Named image lookup: name → path + role.
    pub images: HashMap<String, ImageDescriptor>,
}

pub const SHIP_IMAGE: &str = "player-ship";
pub const BACKGROUND_IMAGE: &str = "starfield-bg";
pub const PLANET_IMAGE: &str = "planet-rocky";

impl AssetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, AssetError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The stock image set: ship, starfield and one rocky planet.
    pub fn stock() -> Self {
        let mut images = HashMap::new();
        for (name, role) in [
            (SHIP_IMAGE, ImageRole::Ship),
            (BACKGROUND_IMAGE, ImageRole::Background),
            (PLANET_IMAGE, ImageRole::WorldObject),
        ] {
            images.insert(
                name.to_string(),
                ImageDescriptor {
                    path: format!("{name}.png"),
                    role,
                },
            );
        }
        Self { images }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_manifest() {
        let json = r#"{
            "images": {
                "player-ship": { "path": "ship.png", "role": "ship" },
                "starfield-bg": { "path": "stars.png", "role": "background" },
                "planet-rocky": { "path": "planet.png", "role": "world_object" }
            }
        }"#;
        let manifest = AssetManifest::from_json(json).unwrap();
        assert_eq!(manifest.images.len(), 3);
        assert_eq!(manifest.images["player-ship"].role, ImageRole::Ship);
        assert_eq!(manifest.images["planet-rocky"].path, "planet.png");
    }

    #[test]
    fn unknown_role_is_rejected() {
        let json = r#"{ "images": { "x": { "path": "x.png", "role": "hud" } } }"#;
        assert!(matches!(
            AssetManifest::from_json(json),
            Err(AssetError::Manifest(_))
        ));
    }

    #[test]
    fn stock_has_all_roles() {
        let manifest = AssetManifest::stock();
        assert_eq!(manifest.images[SHIP_IMAGE].role, ImageRole::Ship);
        assert_eq!(manifest.images[BACKGROUND_IMAGE].role, ImageRole::Background);
        assert_eq!(manifest.images[PLANET_IMAGE].role, ImageRole::WorldObject);
    }
}
