use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::source::DEFAULT_URL_TEMPLATE;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Network", inline)]
#[serde(default)]
/// Download policy for identifier lookups.
pub struct NetworkOptions {
    /// Download URL; `{ID}` is replaced by the identifier.
    pub url_template: String,
    /// Whole-request timeout in seconds (connect, send and read).
    /// Clamped to the schema range when used.
    #[schemars(range(min = 1.0, max = 300.0))]
    pub timeout_secs: f32,
    /// Largest response body accepted, in bytes.
    pub max_body_bytes: u64,
}

const MIN_TIMEOUT_SECS: f32 = 1.0;
const MAX_TIMEOUT_SECS: f32 = 300.0;
const DEFAULT_TIMEOUT_SECS: f32 = 30.0;

impl NetworkOptions {
    /// `timeout_secs` as a request timeout, clamped to 1..=300 seconds.
    /// NaN falls back to the default.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        let secs = if self.timeout_secs.is_nan() {
            DEFAULT_TIMEOUT_SECS
        } else {
            self.timeout_secs.clamp(MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS)
        };
        Duration::from_secs_f32(secs)
    }
}

impl Default for NetworkOptions {
    fn default() -> Self {
        Self {
            url_template: DEFAULT_URL_TEMPLATE.to_owned(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_body_bytes: 64 * 1024 * 1024,
        }
    }
}
