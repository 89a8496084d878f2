//! Mode state machine and schedule orchestration for the piloting screen.
//!
//! [`GameLoop`] owns every piece of per-screen state (ship cell, input
//! mapper, camera, frame buffer) and is driven from outside: the host's
//! [`Scheduler`] calls [`GameLoop::dispatch`] whenever one of the three
//! schedules comes due, and input/asset events are forwarded as they arrive.

use glam::Vec2;
use log::{info, warn};

use crate::api::config::{FlightConfig, ThrustMode};
use crate::api::host::ShipHost;
use crate::api::types::Viewport;
use crate::assets::manifest::AssetManifest;
use crate::assets::registry::ImageRegistry;
use crate::components::world_object::{default_world, WorldObject};
use crate::core::cell::ShipCell;
use crate::core::loading::LoadingSequence;
use crate::core::physics::integrate;
use crate::core::schedule::{HeadlessScheduler, ScheduleHandle, ScheduleKind, Scheduler};
use crate::core::time::FrameClock;
use crate::error::{AssetError, ModeError};
use crate::input::keys::{FlightKey, KeyEvent};
use crate::input::mapper::InputMapper;
use crate::renderer::camera::CameraTracker;
use crate::renderer::composer::{FrameScene, RenderComposer};
use crate::renderer::instance::FrameBuffer;
use crate::ship::class::ShipSettings;
use crate::ship::state::{ShipState, SystemKind};
use crate::systems::energy::{self, EnergyReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameMode {
    /// Title screen with the progress bar.
    Loading,
    /// Main menu and setup wizard.
    Menu,
    /// Real-time flight.
    Piloting,
}

pub struct GameLoop<S: Scheduler, H: ShipHost> {
    config: FlightConfig,
    scheduler: S,
    host: H,
    mode: GameMode,
    loading: LoadingSequence,
    cell: ShipCell,
    input: InputMapper,
    camera: CameraTracker,
    composer: RenderComposer,
    frame: FrameBuffer,
    frame_clock: FrameClock,
    frame_delta_ms: f64,
    viewport: Option<Viewport>,
    world: Vec<WorldObject>,
    images: Option<ImageRegistry>,
    schedules: Vec<ScheduleHandle>,
}

impl<S: Scheduler, H: ShipHost> GameLoop<S, H> {
    pub fn new(mut config: FlightConfig, scheduler: S, host: H, seed: u64) -> Self {
        config.sanitize();
        Self {
            input: InputMapper::new(config.thrust_mode),
            camera: CameraTracker::new(config.camera_smoothing),
            composer: RenderComposer::from_config(&config),
            frame: FrameBuffer::with_capacity(config.max_instances),
            config,
            scheduler,
            host,
            mode: GameMode::Loading,
            loading: LoadingSequence::new(seed),
            cell: ShipCell::new(),
            frame_clock: FrameClock::new(),
            frame_delta_ms: 0.0,
            viewport: None,
            world: default_world(),
            images: None,
            schedules: Vec::new(),
        }
    }

    // ---- Accessors ----

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn config(&self) -> &FlightConfig {
        &self.config
    }

    pub fn ship(&self) -> Option<&ShipState> {
        self.cell.get()
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn camera(&self) -> &CameraTracker {
        &self.camera
    }

    pub fn images(&self) -> Option<&ImageRegistry> {
        self.images.as_ref()
    }

    pub fn world(&self) -> &[WorldObject] {
        &self.world
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frame_clock.frames()
    }

    /// Milliseconds between the two most recent render frames.
    pub fn last_frame_delta_ms(&self) -> f64 {
        self.frame_delta_ms
    }

    // ---- Loading ----

    /// Advance the title progress bar. Only moves while in `Loading`.
    pub fn loading_step(&mut self) -> f32 {
        if self.mode == GameMode::Loading {
            self.loading.step();
        }
        self.loading.progress()
    }

    pub fn loading_progress(&self) -> f32 {
        self.loading.progress()
    }

    pub fn loading_message(&self) -> &'static str {
        self.loading.message()
    }

    /// Wait before the next step, or the closing hold once at 100 %.
    pub fn loading_delay_ms(&mut self) -> f64 {
        self.loading.next_delay_ms()
    }

    pub fn loading_complete(&self) -> bool {
        self.loading.is_complete()
    }

    // ---- Mode transitions ----

    fn transition(&mut self, from: GameMode, to: GameMode) -> Result<(), ModeError> {
        if self.mode != from {
            warn!("rejected mode change {:?} -> {:?} (in {:?})", from, to, self.mode);
            return Err(ModeError::InvalidTransition {
                from: self.mode,
                to,
            });
        }
        info!("mode {:?} -> {:?}", from, to);
        self.mode = to;
        Ok(())
    }

    /// Leave the title screen. Refused until the progress bar is full.
    pub fn finish_loading(&mut self) -> Result<(), ModeError> {
        if self.mode == GameMode::Loading && !self.loading.is_complete() {
            warn!("loading at {:.0}%, staying on the title screen", self.loading.progress());
            return Err(ModeError::LoadingIncomplete);
        }
        self.transition(GameMode::Loading, GameMode::Menu)
    }

    /// Launch a fresh ship from the wizard's settings, centered in the viewport.
    pub fn start_piloting(&mut self, settings: &ShipSettings) -> Result<(), ModeError> {
        let center = self.usable_viewport().map_or(Vec2::ZERO, |vp| vp.center());
        self.resume_piloting(ShipState::launch(center, settings))
    }

    /// Enter piloting with a ship handed in by the host.
    pub fn resume_piloting(&mut self, ship: ShipState) -> Result<(), ModeError> {
        self.transition(GameMode::Menu, GameMode::Piloting)?;

        self.cell.load(ship);
        self.input.release_all();
        // No key is down yet, whatever the ship was doing when it was saved.
        self.cell.apply(|ship| ship.is_thrusting = false);
        self.camera.reset();
        self.frame_clock.reset();
        self.frame_delta_ms = 0.0;
        self.frame.clear();

        let physics = Some(self.config.physics_interval_ms);
        let energy = Some(self.config.energy_interval_ms);
        self.schedules = vec![
            self.scheduler.start(ScheduleKind::Render, None),
            self.scheduler.start(ScheduleKind::Physics, physics),
            self.scheduler.start(ScheduleKind::Energy, energy),
        ];
        info!("piloting: {} schedules started", self.schedules.len());

        self.flush();
        Ok(())
    }

    /// Stop all schedules, release images and hand back the final ship.
    pub fn exit_piloting(&mut self) -> Result<Option<ShipState>, ModeError> {
        self.transition(GameMode::Piloting, GameMode::Menu)?;

        for handle in self.schedules.drain(..) {
            self.scheduler.cancel(handle);
        }
        if let Some(images) = self.images.as_mut() {
            images.release();
        }
        self.input.release_all();
        self.cell.apply(|ship| ship.is_thrusting = false);
        self.camera.reset();
        self.frame.clear();
        info!("piloting stopped: schedules cancelled, images released");

        Ok(self.cell.take())
    }

    // ---- Host events ----

    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Some(Viewport::new(width, height));
    }

    pub fn usable_viewport(&self) -> Option<Viewport> {
        self.viewport.filter(Viewport::is_usable)
    }

    pub fn set_world(&mut self, objects: Vec<WorldObject>) {
        self.world = objects;
        self.check_world_sprites();
    }

    pub fn load_manifest(&mut self, manifest: &AssetManifest) -> Result<(), AssetError> {
        let registry = ImageRegistry::from_manifest(manifest)?;
        info!("asset manifest: {} images", registry.len());
        self.images = Some(registry);
        self.check_world_sprites();
        Ok(())
    }

    fn check_world_sprites(&self) {
        let Some(images) = self.images.as_ref() else {
            return;
        };
        for object in &self.world {
            if images.id(&object.sprite).is_none() {
                warn!("world object {:?} uses unlisted image `{}`", object.id, object.sprite);
            }
        }
    }

    /// The host finished loading one image. Returns whether every image is in.
    pub fn image_loaded(&mut self, name: &str) -> Result<bool, AssetError> {
        let images = self
            .images
            .as_mut()
            .ok_or_else(|| AssetError::UnknownImage(name.to_string()))?;
        let ready = images.mark_loaded(name)?;
        if ready {
            info!("all {} images loaded", images.len());
        }
        Ok(ready)
    }

    /// Images the host still has to load, as `(name, path)` pairs.
    pub fn pending_images(&self) -> Vec<(&str, &str)> {
        let Some(images) = self.images.as_ref() else {
            return Vec::new();
        };
        images
            .pending()
            .filter_map(|name| {
                let path = images.id(name).and_then(|id| images.path(id))?;
                Some((name, path))
            })
            .collect()
    }

    /// Image whose failure is holding the readiness gate shut.
    pub fn failed_image(&self) -> Option<&str> {
        self.images.as_ref().and_then(|images| images.failed_image())
    }

    /// The host failed to load an image. Rendering stays on the placeholder.
    pub fn image_failed(&mut self, name: &str, reason: &str) -> AssetError {
        let err = match self.images.as_mut() {
            Some(images) => images.mark_failed(name, reason),
            None => AssetError::LoadFailed {
                name: name.to_string(),
                reason: reason.to_string(),
            },
        };
        warn!("{}", err);
        err
    }

    /// Key press. Returns false for keys the flight controls ignore.
    pub fn key_down(&mut self, key: &str) -> bool {
        FlightKey::from_key(key).map_or(false, |key| self.key_event(KeyEvent::Down(key)))
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        FlightKey::from_key(key).map_or(false, |key| self.key_event(KeyEvent::Up(key)))
    }

    fn key_event(&mut self, event: KeyEvent) -> bool {
        if self.mode != GameMode::Piloting {
            return false;
        }
        let input = &mut self.input;
        self.cell.apply(|ship| input.handle(event, ship));
        self.flush();
        true
    }

    /// Pilot flips a subsystem. Returns false for unknown names or no ship.
    pub fn toggle_system(&mut self, name: &str) -> bool {
        let Some(kind) = SystemKind::from_name(name) else {
            return false;
        };
        let toggled = self.cell.apply(|ship| ship.toggle_system(kind)).is_some();
        self.flush();
        toggled
    }

    // ---- Schedules ----

    /// Run the callback of one due schedule.
    pub fn dispatch(&mut self, kind: ScheduleKind, now_ms: f64) {
        match kind {
            ScheduleKind::Render => self.render_frame(now_ms),
            ScheduleKind::Physics => self.physics_tick(),
            ScheduleKind::Energy => {
                self.energy_tick();
            }
        }
    }

    /// Display-refresh callback: ease the camera and rebuild the frame.
    pub fn render_frame(&mut self, now_ms: f64) {
        if self.mode != GameMode::Piloting {
            return;
        }
        self.frame_delta_ms = self.frame_clock.tick(now_ms);

        let viewport = self.usable_viewport();
        if let Some(vp) = viewport {
            self.camera.follow(self.cell.get().map(|s| s.position), vp);
        }

        let scene = FrameScene {
            viewport: viewport.unwrap_or(Viewport::new(0.0, 0.0)),
            camera: &self.camera,
            ship: self.cell.get(),
            objects: &self.world,
            images: self.images.as_ref(),
        };
        self.composer.compose(&scene, &mut self.frame);
    }

    /// Fixed-period physics callback. Skipped without a usable viewport.
    pub fn physics_tick(&mut self) {
        if self.mode != GameMode::Piloting {
            return;
        }
        let Some(viewport) = self.usable_viewport() else {
            return;
        };

        if self.input.mode() == ThrustMode::PerTick {
            let input = &self.input;
            self.cell.apply(|ship| input.apply_held(ship));
        }
        let friction = self.config.friction;
        self.cell
            .replace_with(|ship| integrate(ship, viewport, friction));
        self.flush();
    }

    /// Fixed-period energy callback.
    pub fn energy_tick(&mut self) -> Option<EnergyReport> {
        if self.mode != GameMode::Piloting {
            return None;
        }
        let report = self.cell.apply(energy::tick)?;
        if report.changed() {
            self.flush();
        }
        Some(report)
    }

    /// Report the ship to the host if it changed since the last report.
    fn flush(&mut self) {
        if let Some(ship) = self.cell.take_pending() {
            self.host.ship_changed(ship);
        }
    }
}

impl<H: ShipHost> GameLoop<HeadlessScheduler, H> {
    /// Drive the loop by virtual time, dispatching every callback that
    /// comes due in chronological order.
    pub fn advance(&mut self, elapsed_ms: f64) {
        for fired in self.scheduler.advance(elapsed_ms) {
            if self.scheduler.is_active(fired.kind) {
                self.dispatch(fired.kind, fired.at_ms);
            }
        }
    }
}
