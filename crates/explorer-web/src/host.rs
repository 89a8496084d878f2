use explorer_engine::{ShipHost, ShipState};

/// Collects ship reports as JSON until the bridge can hand them to the
/// JS listener.
///
/// The listener is never called while the runner is borrowed, so it may call
/// straight back into the exports.
#[derive(Debug, Default)]
pub struct JsHost {
    outbox: Vec<String>,
}

impl JsHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&mut self) -> Vec<String> {
        std::mem::take(&mut self.outbox)
    }
}

impl ShipHost for JsHost {
    fn ship_changed(&mut self, ship: &ShipState) {
        match ship.to_json() {
            Ok(json) => self.outbox.push(json),
            Err(err) => log::warn!("ship state not serializable: {}", err),
        }
    }
}
