use crate::api::types::ImageId;
use crate::assets::manifest::{AssetManifest, ImageRole};
use crate::error::AssetError;

#[derive(Debug, Clone)]
struct ImageEntry {
    name: String,
    path: String,
    role: ImageRole,
    loaded: bool,
}

/// Registry of the images the renderer depends on, built from an AssetManifest.
///
/// Hands out stable [`ImageId`]s (manifest names in sorted order) and acts
/// as the readiness gate: nothing is drawn until every listed image has been
/// reported loaded by the host.
#[derive(Debug, Clone)]
pub struct ImageRegistry {
    entries: Vec<ImageEntry>,
    ship: ImageId,
    background: ImageId,
    failure: Option<String>,
}

impl ImageRegistry {
    /// Build and validate a registry. The manifest must name one ship image,
    /// one background image and at least one world-object image.
    pub fn from_manifest(manifest: &AssetManifest) -> Result<Self, AssetError> {
        let mut names: Vec<&String> = manifest.images.keys().collect();
        names.sort();

        let entries: Vec<ImageEntry> = names
            .into_iter()
            .map(|name| {
                let desc = &manifest.images[name];
                ImageEntry {
                    name: name.clone(),
                    path: desc.path.clone(),
                    role: desc.role,
                    loaded: false,
                }
            })
            .collect();

        let find = |role: ImageRole| {
            entries
                .iter()
                .position(|e| e.role == role)
                .map(|i| ImageId(i as u32))
                .ok_or(AssetError::MissingRole(role.label()))
        };
        let ship = find(ImageRole::Ship)?;
        let background = find(ImageRole::Background)?;
        find(ImageRole::WorldObject)?;

        Ok(Self {
            entries,
            ship,
            background,
            failure: None,
        })
    }

    /// Look up an image by name. Returns None if not listed.
    pub fn id(&self, name: &str) -> Option<ImageId> {
        self.entries
            .iter()
            .position(|e| e.name == name)
            .map(|i| ImageId(i as u32))
    }

    pub fn path(&self, id: ImageId) -> Option<&str> {
        self.entries.get(id.0 as usize).map(|e| e.path.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ship_image(&self) -> ImageId {
        self.ship
    }

    pub fn background_image(&self) -> ImageId {
        self.background
    }

    /// Record that the host finished loading `name`. Returns whether the gate
    /// is now open.
    pub fn mark_loaded(&mut self, name: &str) -> Result<bool, AssetError> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.name == name)
            .ok_or_else(|| AssetError::UnknownImage(name.to_string()))?;
        entry.loaded = true;
        Ok(self.is_ready())
    }

    /// Record a load failure. The gate stays closed for good.
    ///
    /// A name the manifest does not list leaves the gate untouched and
    /// yields [`AssetError::UnknownImage`].
    pub fn mark_failed(&mut self, name: &str, reason: &str) -> AssetError {
        if self.id(name).is_none() {
            return AssetError::UnknownImage(name.to_string());
        }
        self.failure = Some(name.to_string());
        AssetError::LoadFailed {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn failed_image(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// True once every image is loaded and none failed.
    pub fn is_ready(&self) -> bool {
        self.failure.is_none() && !self.entries.is_empty() && self.entries.iter().all(|e| e.loaded)
    }

    /// Drop every loaded handle. The gate closes until images are reloaded.
    pub fn release(&mut self) {
        for entry in &mut self.entries {
            entry.loaded = false;
        }
    }

    /// Names of images still pending, in id order.
    pub fn pending(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|e| !e.loaded)
            .map(|e| e.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::manifest::{BACKGROUND_IMAGE, PLANET_IMAGE, SHIP_IMAGE};

    fn stock() -> ImageRegistry {
        ImageRegistry::from_manifest(&AssetManifest::stock()).unwrap()
    }

    #[test]
    fn ids_follow_sorted_names() {
        let reg = stock();
        assert_eq!(reg.id(PLANET_IMAGE), Some(ImageId(0)));
        assert_eq!(reg.id(SHIP_IMAGE), Some(ImageId(1)));
        assert_eq!(reg.id(BACKGROUND_IMAGE), Some(ImageId(2)));
        assert_eq!(reg.ship_image(), ImageId(1));
        assert_eq!(reg.background_image(), ImageId(2));
        assert_eq!(reg.path(ImageId(1)), Some("player-ship.png"));
    }

    #[test]
    fn gate_opens_after_all_loaded() {
        let mut reg = stock();
        assert!(!reg.is_ready());
        assert!(!reg.mark_loaded(SHIP_IMAGE).unwrap());
        assert!(!reg.mark_loaded(BACKGROUND_IMAGE).unwrap());
        assert!(reg.mark_loaded(PLANET_IMAGE).unwrap());
        assert_eq!(reg.pending().count(), 0);
    }

    #[test]
    fn unknown_image_is_an_error() {
        let mut reg = stock();
        assert!(matches!(
            reg.mark_loaded("nebula"),
            Err(AssetError::UnknownImage(_))
        ));
    }

    #[test]
    fn failure_keeps_gate_closed() {
        let mut reg = stock();
        let err = reg.mark_failed(SHIP_IMAGE, "404");
        assert!(matches!(err, AssetError::LoadFailed { .. }));
        for name in [SHIP_IMAGE, BACKGROUND_IMAGE, PLANET_IMAGE] {
            reg.mark_loaded(name).unwrap();
        }
        assert!(!reg.is_ready());
        assert_eq!(reg.failed_image(), Some(SHIP_IMAGE));
    }

    #[test]
    fn unlisted_failure_leaves_gate_open() {
        let mut reg = stock();
        let err = reg.mark_failed("nebula", "404");
        assert!(matches!(err, AssetError::UnknownImage(ref name) if name == "nebula"));
        assert_eq!(reg.failed_image(), None);
        for name in [SHIP_IMAGE, BACKGROUND_IMAGE, PLANET_IMAGE] {
            reg.mark_loaded(name).unwrap();
        }
        assert!(reg.is_ready());
    }

    #[test]
    fn release_closes_gate() {
        let mut reg = stock();
        for name in [SHIP_IMAGE, BACKGROUND_IMAGE, PLANET_IMAGE] {
            reg.mark_loaded(name).unwrap();
        }
        assert!(reg.is_ready());
        reg.release();
        assert!(!reg.is_ready());
        assert_eq!(reg.pending().count(), 3);
    }

    #[test]
    fn manifest_without_world_sprite_is_rejected() {
        let mut manifest = AssetManifest::stock();
        manifest.images.remove(PLANET_IMAGE);
        assert!(matches!(
            ImageRegistry::from_manifest(&manifest),
            Err(AssetError::MissingRole("world_object"))
        ));
    }
}
