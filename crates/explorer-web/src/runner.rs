use explorer_engine::{
    AssetError, AssetManifest, FlightConfig, GameLoop, GameMode, ModeError, RenderLayer,
    ScheduleHandle, ScheduleKind, ShipSettings, ShipState, WorldObject,
};

use wasm_bindgen::JsValue;

use crate::host::JsHost;
use crate::scheduler::BrowserScheduler;

/// The flight core wired to browser timers and a JS screen host.
///
/// Lives in a `thread_local!` in the crate root because wasm-bindgen cannot
/// export generic structs directly.
pub struct WebRunner {
    game: GameLoop<BrowserScheduler, JsHost>,
    listener: Option<js_sys::Function>,
}

impl WebRunner {
    pub fn new(config: FlightConfig, seed: u64) -> Self {
        Self {
            game: GameLoop::new(config, BrowserScheduler::new(), JsHost::new(), seed),
            listener: None,
        }
    }

    pub fn set_listener(&mut self, listener: Option<js_sys::Function>) {
        self.listener = listener;
    }

    /// Ship reports waiting for the listener, paired with the listener.
    pub fn take_reports(&mut self) -> Option<(js_sys::Function, Vec<String>)> {
        let reports = self.game.host_mut().drain();
        if reports.is_empty() {
            return None;
        }
        self.listener.clone().map(|listener| (listener, reports))
    }

    // ---- Schedules ----

    pub fn dispatch(&mut self, kind: ScheduleKind, now_ms: f64) {
        self.game.dispatch(kind, now_ms);
    }

    pub fn rearm_frame(&mut self, handle: ScheduleHandle) {
        self.game.scheduler_mut().rearm_frame(handle);
    }

    // ---- Loading ----

    pub fn loading_step(&mut self) -> f32 {
        self.game.loading_step()
    }

    pub fn loading_message(&self) -> &'static str {
        self.game.loading_message()
    }

    pub fn loading_delay_ms(&mut self) -> f64 {
        self.game.loading_delay_ms()
    }

    pub fn finish_loading(&mut self) -> Result<(), ModeError> {
        self.game.finish_loading()
    }

    pub fn mode(&self) -> GameMode {
        self.game.mode()
    }

    // ---- Piloting ----

    pub fn start_piloting(&mut self, settings: &ShipSettings) -> Result<(), ModeError> {
        self.game.start_piloting(settings)
    }

    pub fn resume_piloting(&mut self, ship: ShipState) -> Result<(), ModeError> {
        self.game.resume_piloting(ship)
    }

    pub fn exit_piloting(&mut self) -> Result<Option<ShipState>, ModeError> {
        self.game.exit_piloting()
    }

    pub fn key_down(&mut self, key: &str) -> bool {
        self.game.key_down(key)
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        self.game.key_up(key)
    }

    pub fn toggle_system(&mut self, name: &str) -> bool {
        self.game.toggle_system(name)
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.game.resize(width, height);
    }

    pub fn set_world(&mut self, objects: Vec<WorldObject>) {
        self.game.set_world(objects);
    }

    pub fn ship(&self) -> Option<&ShipState> {
        self.game.ship()
    }

    // ---- Assets ----

    pub fn load_manifest(&mut self, manifest: &AssetManifest) -> Result<(), AssetError> {
        self.game.load_manifest(manifest)
    }

    pub fn image_loaded(&mut self, name: &str) -> Result<bool, AssetError> {
        self.game.image_loaded(name)
    }

    pub fn image_failed(&mut self, name: &str, reason: &str) -> AssetError {
        self.game.image_failed(name, reason)
    }

    /// `[name, path]` pairs the host still has to fetch.
    pub fn pending_images(&self) -> js_sys::Array {
        self.game
            .pending_images()
            .into_iter()
            .map(|(name, path)| {
                js_sys::Array::of2(&JsValue::from_str(name), &JsValue::from_str(path))
            })
            .collect()
    }

    pub fn failed_image(&self) -> Option<String> {
        self.game.failed_image().map(str::to_string)
    }

    // ---- Pointer accessors for host reads ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.game.frame().instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.game.frame().instance_count()
    }

    pub fn trail_ptr(&self) -> *const f32 {
        self.game.frame().trail.buffer_ptr()
    }

    pub fn trail_vertex_count(&self) -> u32 {
        self.game.frame().trail.vertex_count() as u32
    }

    pub fn frame_delta_ms(&self) -> f64 {
        self.game.last_frame_delta_ms()
    }

    pub fn is_loading_frame(&self) -> bool {
        self.game.frame().loading
    }

    pub fn layer_range(&self, layer: RenderLayer) -> (u32, u32) {
        self.game.frame().layer_range(layer)
    }
}
