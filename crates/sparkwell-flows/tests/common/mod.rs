// crates/sparkwell-flows/tests/common/mod.rs
// ============================================================================
// Module: Flow Test Helpers
// Description: Shared fixtures for companion flow tests.
// Purpose: Build companions over scripted gateways and capture observer events.
// ============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]
#![allow(clippy::unwrap_used, reason = "Test-only fixtures unwrap on setup failure.")]

use std::sync::Arc;
use std::sync::Mutex;

use serde_json::Value;
use serde_json::json;
use sparkwell_config::SparkwellConfig;
use sparkwell_core::ContractEvent;
use sparkwell_core::ContractObserver;
use sparkwell_core::ScriptedGateway;
use sparkwell_flows::Companion;

/// PNG signature followed by the start of an IHDR chunk.
pub const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00\x00\x0dIHDR";

/// Returns a model response satisfying the artifact shape.
pub fn artifact_json() -> Value {
    json!({
        "title": "Grounding 5-4-3-2-1",
        "reassurance": "Feeling anxious before an exam is tough, and it shows you care",
        "exercise": "Name five things you can see, four you can touch, three you can hear",
        "realizations": [
            "One exam does not define your future",
            "Nerves and preparation can coexist"
        ],
        "instantCopingStrategy": {
            "title": "Box Breathing",
            "description": "Breathe in for four, hold for four, out for four"
        },
        "musicSuggestion": {
            "title": "Binaural Beats for Focus",
            "description": "Steady beats can help you settle into revision"
        }
    })
}

/// Builds a default-configured companion over a scripted gateway clone.
pub fn companion(gateway: &ScriptedGateway) -> Companion {
    Companion::new(SparkwellConfig::default(), Arc::new(gateway.clone())).unwrap()
}

/// Observer collecting every event in memory.
#[derive(Default)]
pub struct RecordingObserver {
    /// Recorded events in order.
    events: Mutex<Vec<ContractEvent>>,
}

impl RecordingObserver {
    /// Returns a snapshot of the recorded events.
    pub fn events(&self) -> Vec<ContractEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl ContractObserver for RecordingObserver {
    fn record(&self, event: &ContractEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
