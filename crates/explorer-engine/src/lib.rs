pub mod api;
pub mod assets;
pub mod components;
pub mod core;
pub mod error;
pub mod input;
pub mod renderer;
pub mod ship;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::config::{FlightConfig, ThrustMode};
pub use api::host::{RecordingHost, ShipHost};
pub use api::types::{ImageId, ObjectId, Viewport};
pub use assets::manifest::{AssetManifest, ImageDescriptor, ImageRole};
pub use assets::registry::ImageRegistry;
pub use components::world_object::{default_world, BodyKind, WorldObject};
pub use crate::core::cell::ShipCell;
pub use crate::core::game_loop::{GameLoop, GameMode};
pub use crate::core::loading::{LoadingSequence, LOADING_MESSAGES};
pub use crate::core::physics::{clamp_speed, integrate, wrap_position};
pub use crate::core::schedule::{Fired, HeadlessScheduler, ScheduleHandle, ScheduleKind, Scheduler};
pub use crate::core::time::{FrameClock, IntervalTimer};
pub use error::{AssetError, ConfigError, ModeError};
pub use input::keys::{FlightKey, KeyEvent};
pub use input::mapper::InputMapper;
pub use renderer::camera::CameraTracker;
pub use renderer::composer::{FrameScene, RenderComposer};
pub use renderer::instance::{FrameBuffer, SpriteInstance};
pub use renderer::layer::RenderLayer;
pub use renderer::vector::{VectorColor, VectorState, VectorVertex};
pub use ship::{ShipClass, ShipSettings, ShipHandling, ShipState, ShipSystems, SystemKind};
pub use systems::energy::EnergyReport;
