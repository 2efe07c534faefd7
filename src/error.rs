use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    /// uinput is missing or not writable; the virtual pad cannot exist.
    /// The only fatal condition: everything else re-enters discovery.
    #[error("virtual gamepad driver unavailable: {0}")]
    DriverUnavailable(String),

    #[error("HID enumeration failed: {0}")]
    Enumeration(String),

    #[error("failed to open device stream: {0}")]
    Open(String),

    /// Non-timeout read failure: device unplugged or stream closed.
    #[error("device stream lost: {0}")]
    Disconnected(String),

    #[error("failed to submit report to virtual pad: {0}")]
    Submit(String),

    #[error("invalid config file {path}: {reason}")]
    Config { path: String, reason: String },
}

pub type Result<T> = std::result::Result<T, BridgeError>;
