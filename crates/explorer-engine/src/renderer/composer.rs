use glam::Vec2;

use crate::api::config::FlightConfig;
use crate::api::types::Viewport;
use crate::assets::registry::ImageRegistry;
use crate::components::world_object::WorldObject;
use crate::renderer::camera::CameraTracker;
use crate::renderer::instance::{FrameBuffer, SpriteInstance};
use crate::renderer::layer::RenderLayer;
use crate::renderer::trail::{draw_trail, TrailShape};
use crate::ship::state::ShipState;

/// Read-only view of everything one frame draws.
pub struct FrameScene<'a> {
    pub viewport: Viewport,
    pub camera: &'a CameraTracker,
    pub ship: Option<&'a ShipState>,
    pub objects: &'a [WorldObject],
    /// `None` until a manifest has been loaded.
    pub images: Option<&'a ImageRegistry>,
}

/// Builds the frame buffer back-to-front: background, world objects, ship,
/// thrust trail.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderComposer {
    /// Fraction of the camera offset the background follows.
    pub parallax: f32,
    pub ship_size: f32,
    pub trail: TrailShape,
}

impl RenderComposer {
    pub fn from_config(config: &FlightConfig) -> Self {
        Self {
            parallax: config.background_parallax,
            ship_size: config.ship_size,
            trail: TrailShape {
                ship_size: config.ship_size,
                length: config.trail_length,
                width: config.trail_width,
            },
        }
    }

    /// Rebuild `out` for the given scene. Never touches the scene itself.
    ///
    /// Until every image is loaded the frame is a loading placeholder:
    /// `out.loading` is set and nothing else is drawn.
    pub fn compose(&self, scene: &FrameScene<'_>, out: &mut FrameBuffer) {
        out.clear();

        let images = match scene.images {
            Some(images) if images.is_ready() => images,
            _ => {
                out.loading = true;
                return;
            }
        };
        if !scene.viewport.is_usable() {
            return;
        }

        let offset = scene.camera.offset;

        // Background
        let bg_center = offset * self.parallax + scene.viewport.center();
        out.push(
            RenderLayer::Background,
            sprite(bg_center, scene.viewport.size(), 0.0, images.background_image().0),
        );

        // World objects
        for object in scene.objects {
            if !scene
                .camera
                .is_rect_visible(object.position, object.half_size(), scene.viewport)
            {
                continue;
            }
            let Some(image) = images.id(&object.sprite) else {
                continue;
            };
            out.push(
                RenderLayer::Objects,
                sprite(
                    scene.camera.to_screen(object.position),
                    Vec2::splat(object.size),
                    0.0,
                    image.0,
                ),
            );
        }

        // Ship and trail
        if let Some(ship) = scene.ship {
            let center = scene.camera.to_screen(ship.position);
            out.push(
                RenderLayer::Ship,
                sprite(
                    center,
                    Vec2::splat(self.ship_size),
                    ship.rotation,
                    images.ship_image().0,
                ),
            );
            if ship.is_thrusting {
                draw_trail(&mut out.trail, &self.trail, center, ship.rotation);
            }
        }
    }
}

fn sprite(center: Vec2, size: Vec2, rotation: f32, image: u32) -> SpriteInstance {
    SpriteInstance {
        x: center.x,
        y: center.y,
        rotation,
        width: size.x,
        height: size.y,
        image: image as f32,
        alpha: 1.0,
        layer: 0.0,
    }
}
