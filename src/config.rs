use crate::error::BridgeError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// Razer Kishi over USB.
const DEFAULT_VENDOR_ID: u16 = 0x27F8;
const DEFAULT_PRODUCT_ID: u16 = 0x0BBF;

// Never 0: a zero read timeout makes the HID layer fail every empty poll,
// which burns CPU instead of waiting.
const DEFAULT_READ_TIMEOUT_MS: u32 = 10;

const DEFAULT_REACQUIRE_INTERVAL_MS: u64 = 1000;
const DEFAULT_MAX_REACQUIRE_RETRIES: u32 = 15;

#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(default)]
pub struct BridgeConfig {
    pub vendor_id: u16,
    pub product_id: u16,
    pub read_timeout_ms: u32,
    pub reacquire_interval_ms: u64,
    pub max_reacquire_retries: u32,
    pub verbosity: u8,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        BridgeConfig {
            vendor_id: DEFAULT_VENDOR_ID,
            product_id: DEFAULT_PRODUCT_ID,
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
            reacquire_interval_ms: DEFAULT_REACQUIRE_INTERVAL_MS,
            max_reacquire_retries: DEFAULT_MAX_REACQUIRE_RETRIES,
            verbosity: 0,
        }
    }
}

impl BridgeConfig {
    /// Loads a TOML config file; a missing file means "use defaults",
    /// a present-but-broken file is an error rather than a silent fallback.
    pub fn load(path: &Path) -> Result<Self, BridgeError> {
        if !path.exists() {
            return Ok(BridgeConfig::default());
        }
        let text = fs::read_to_string(path).map_err(|e| BridgeError::Config {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let mut config: BridgeConfig = toml::from_str(&text).map_err(|e| BridgeError::Config {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        if config.read_timeout_ms == 0 {
            config.read_timeout_ms = DEFAULT_READ_TIMEOUT_MS;
        }
        // hidapi takes the timeout as i32; anything that would wrap
        // negative means "block forever" and kills disconnect detection.
        config.read_timeout_ms = config.read_timeout_ms.min(i32::MAX as u32);
        Ok(config)
    }
}
