use std::cell::RefCell;

use explorer_engine::{
    AssetManifest, FlightConfig, RenderLayer, ScheduleHandle, ScheduleKind, ShipSettings,
    ShipState, WorldObject,
};
use wasm_bindgen::prelude::*;

pub mod host;
pub mod runner;
pub mod scheduler;

pub use runner::WebRunner;

thread_local! {
    static RUNNER: RefCell<Option<WebRunner>> = RefCell::new(None);
}

/// Run `f` against the runner, then deliver any ship reports to the JS
/// listener once the runner is released.
///
/// Returns `None` before `game_init()` or on a re-entrant call.
fn with_runner<R>(f: impl FnOnce(&mut WebRunner) -> R) -> Option<R> {
    let (result, reports) = RUNNER.with(|cell| {
        let Ok(mut borrow) = cell.try_borrow_mut() else {
            log::warn!("re-entrant call into the flight core ignored");
            return (None, None);
        };
        let Some(runner) = borrow.as_mut() else {
            log::warn!("flight core not initialized, call game_init() first");
            return (None, None);
        };
        let result = f(runner);
        (Some(result), runner.take_reports())
    });

    if let Some((listener, reports)) = reports {
        for json in reports {
            if let Err(err) = listener.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
                log::warn!("ship listener threw: {:?}", err);
            }
        }
    }
    result
}

pub(crate) fn on_frame(handle: ScheduleHandle, ts: f64) {
    with_runner(|r| {
        r.dispatch(ScheduleKind::Render, ts);
        r.rearm_frame(handle);
    });
}

pub(crate) fn on_interval(kind: ScheduleKind) {
    let now = web_sys::window()
        .and_then(|w| w.performance())
        .map_or(0.0, |p| p.now());
    with_runner(|r| r.dispatch(kind, now));
}

/// Install logging and create the flight core. `config_json` may be omitted
/// or partial; missing fields keep their defaults.
#[wasm_bindgen]
pub fn game_init(config_json: Option<String>) -> bool {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = match config_json.as_deref().map(FlightConfig::from_json) {
        None => FlightConfig::default(),
        Some(Ok(config)) => config,
        Some(Err(err)) => {
            log::error!("{}", err);
            return false;
        }
    };

    let seed = js_sys::Date::now() as u64;
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(WebRunner::new(config, seed));
    });
    log::info!("space-explorer: initialized");
    true
}

#[wasm_bindgen]
pub fn set_ship_listener(listener: Option<js_sys::Function>) {
    with_runner(|r| r.set_listener(listener));
}

// ---- Assets ----

#[wasm_bindgen]
pub fn load_manifest(json: &str) -> bool {
    let manifest = match AssetManifest::from_json(json) {
        Ok(manifest) => manifest,
        Err(err) => {
            log::error!("{}", err);
            return false;
        }
    };
    with_runner(|r| match r.load_manifest(&manifest) {
        Ok(()) => true,
        Err(err) => {
            log::error!("{}", err);
            false
        }
    })
    .unwrap_or(false)
}

/// Returns true once every listed image has loaded.
#[wasm_bindgen]
pub fn image_loaded(name: &str) -> bool {
    with_runner(|r| match r.image_loaded(name) {
        Ok(ready) => ready,
        Err(err) => {
            log::warn!("{}", err);
            false
        }
    })
    .unwrap_or(false)
}

#[wasm_bindgen]
pub fn image_failed(name: &str, reason: &str) {
    with_runner(|r| r.image_failed(name, reason));
}

/// Images still to fetch, as `[name, path]` pairs.
#[wasm_bindgen]
pub fn pending_images() -> js_sys::Array {
    with_runner(|r| r.pending_images()).unwrap_or_else(js_sys::Array::new)
}

/// Name of the image whose load failure keeps the placeholder up.
#[wasm_bindgen]
pub fn failed_image() -> Option<String> {
    with_runner(|r| r.failed_image()).flatten()
}

// ---- Loading sequence ----

#[wasm_bindgen]
pub fn loading_step() -> f32 {
    with_runner(|r| r.loading_step()).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn loading_message() -> String {
    with_runner(|r| r.loading_message().to_string()).unwrap_or_default()
}

#[wasm_bindgen]
pub fn loading_delay_ms() -> f64 {
    with_runner(|r| r.loading_delay_ms()).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn finish_loading() -> bool {
    with_runner(|r| r.finish_loading().is_ok()).unwrap_or(false)
}

#[wasm_bindgen]
pub fn game_mode() -> String {
    with_runner(|r| format!("{:?}", r.mode()).to_lowercase()).unwrap_or_default()
}

// ---- Piloting ----

#[wasm_bindgen]
pub fn start_piloting(settings_json: &str) -> bool {
    let settings = match ShipSettings::from_json(settings_json) {
        Ok(settings) => settings,
        Err(err) => {
            log::error!("ship settings: {}", err);
            return false;
        }
    };
    with_runner(|r| r.start_piloting(&settings).is_ok()).unwrap_or(false)
}

/// Re-enter piloting with a ship the host kept from an earlier flight.
#[wasm_bindgen]
pub fn resume_piloting(ship_json: &str) -> bool {
    let ship = match ShipState::from_json(ship_json) {
        Ok(ship) => ship,
        Err(err) => {
            log::error!("ship state: {}", err);
            return false;
        }
    };
    with_runner(|r| r.resume_piloting(ship).is_ok()).unwrap_or(false)
}

/// Leave piloting. Returns the final ship as JSON.
#[wasm_bindgen]
pub fn exit_piloting() -> Option<String> {
    with_runner(|r| r.exit_piloting().ok().flatten())
        .flatten()
        .and_then(|ship| ship.to_json().ok())
}

#[wasm_bindgen]
pub fn key_down(key: &str) -> bool {
    with_runner(|r| r.key_down(key)).unwrap_or(false)
}

#[wasm_bindgen]
pub fn key_up(key: &str) -> bool {
    with_runner(|r| r.key_up(key)).unwrap_or(false)
}

#[wasm_bindgen]
pub fn toggle_system(name: &str) -> bool {
    with_runner(|r| r.toggle_system(name)).unwrap_or(false)
}

#[wasm_bindgen]
pub fn resize(width: f32, height: f32) {
    with_runner(|r| r.resize(width, height));
}

#[wasm_bindgen]
pub fn set_world(json: &str) -> bool {
    match WorldObject::list_from_json(json) {
        Ok(objects) => with_runner(|r| r.set_world(objects)).is_some(),
        Err(err) => {
            log::error!("world objects: {}", err);
            false
        }
    }
}

#[wasm_bindgen]
pub fn ship_state_json() -> Option<String> {
    with_runner(|r| r.ship().and_then(|ship| ship.to_json().ok())).flatten()
}

// ---- Frame accessors ----

#[wasm_bindgen]
pub fn get_instances_ptr() -> *const f32 {
    with_runner(|r| r.instances_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_instance_count() -> u32 {
    with_runner(|r| r.instance_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_trail_ptr() -> *const f32 {
    with_runner(|r| r.trail_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_trail_vertex_count() -> u32 {
    with_runner(|r| r.trail_vertex_count()).unwrap_or(0)
}

/// Milliseconds between the last two render frames.
#[wasm_bindgen]
pub fn frame_delta_ms() -> f64 {
    with_runner(|r| r.frame_delta_ms()).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn is_loading_frame() -> bool {
    with_runner(|r| r.is_loading_frame()).unwrap_or(true)
}

/// `[start, end)` of one layer: instance indices for 0 = background ..
/// 2 = ship, trail vertex indices for 3 = effects.
#[wasm_bindgen]
pub fn get_layer_range(layer: u8) -> Vec<u32> {
    let Some(layer) = RenderLayer::from_u8(layer) else {
        return vec![0, 0];
    };
    let (start, end) = with_runner(|r| r.layer_range(layer)).unwrap_or((0, 0));
    vec![start, end]
}
