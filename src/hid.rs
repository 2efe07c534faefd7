use crate::config::BridgeConfig;
use crate::error::{BridgeError, Result};
use crate::logger::{log, Verbosity};
use hidapi::HidApi;

/// Interrupt transfers on full-speed USB top out at 64 bytes; hidapi does
/// not report the device's max input report length, so reads use this.
pub const READ_BUF_LEN: usize = 64;

/// One open read stream on the physical pad.
pub trait ReportStream {
    /// Blocking read with the configured timeout. Ok(0) is the timeout
    /// tick ("no new data"), any Err means the stream is gone.
    fn read_report(&mut self, buf: &mut [u8]) -> Result<usize>;

    fn buf_len(&self) -> usize;
}

/// Enumerates and opens the physical pad. One poll per call; the
/// acquisition state machine owns the retry policy.
pub trait DeviceSource {
    type Stream: ReportStream;

    /// Ok(None) when the device is not attached right now.
    fn try_open(&mut self) -> Result<Option<Self::Stream>>;
}

pub struct HidGamepadSource {
    api: HidApi,
    vendor_id: u16,
    product_id: u16,
    read_timeout_ms: i32,
}

impl HidGamepadSource {
    pub fn new(config: &BridgeConfig) -> Result<Self> {
        let api = HidApi::new().map_err(|e| BridgeError::Enumeration(e.to_string()))?;
        Ok(HidGamepadSource {
            api,
            vendor_id: config.vendor_id,
            product_id: config.product_id,
            read_timeout_ms: config.read_timeout_ms.min(i32::MAX as u32) as i32,
        })
    }
}

impl DeviceSource for HidGamepadSource {
    type Stream = HidReportStream;

    fn try_open(&mut self) -> Result<Option<HidReportStream>> {
        self.api
            .refresh_devices()
            .map_err(|e| BridgeError::Enumeration(e.to_string()))?;

        let Some(info) = self
            .api
            .device_list()
            .find(|d| d.vendor_id() == self.vendor_id && d.product_id() == self.product_id)
        else {
            return Ok(None);
        };

        let name = info.product_string().unwrap_or("(sin nombre)").to_string();
        let device = info.open_device(&self.api).map_err(|e| {
            // El caso clásico: otro proceso (Steam) ya tiene el stream abierto.
            BridgeError::Open(format!("{} ({}): {}", name, "¿otro programa usando el mando?", e))
        })?;

        log(Verbosity::Low, &format!("Dispositivo encontrado: {}", name));
        Ok(Some(HidReportStream {
            device,
            timeout_ms: self.read_timeout_ms,
        }))
    }
}

pub struct HidReportStream {
    device: hidapi::HidDevice,
    timeout_ms: i32,
}

impl ReportStream for HidReportStream {
    fn read_report(&mut self, buf: &mut [u8]) -> Result<usize> {
        // hidapi signals timeout as a zero-length read, not an error.
        self.device
            .read_timeout(buf, self.timeout_ms)
            .map_err(|e| BridgeError::Disconnected(e.to_string()))
    }

    fn buf_len(&self) -> usize {
        READ_BUF_LEN
    }
}
