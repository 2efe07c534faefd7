use std::sync::atomic::{AtomicU8, Ordering};

/// Low = lifecycle + state transitions, Medium = acquisition diagnostics,
/// High = raw report hex dumps.
#[derive(Clone, Copy, PartialEq, PartialOrd)]
pub enum Verbosity {
    Low = 0,
    Medium = 1,
    High = 2,
}

impl Verbosity {
    /// Clamps the config value instead of rejecting it; an over-eager
    /// `verbosity = 9` just means "everything".
    pub fn from_u8(level: u8) -> Self {
        match level {
            0 => Verbosity::Low,
            1 => Verbosity::Medium,
            _ => Verbosity::High,
        }
    }

    fn glyph(self) -> &'static str {
        match self {
            Verbosity::Low => "ℹ️ ",
            Verbosity::Medium => "🔍",
            Verbosity::High => "🐛",
        }
    }
}

static CURRENT_VERBOSITY: AtomicU8 = AtomicU8::new(0);

fn enabled(level: Verbosity) -> bool {
    level <= Verbosity::from_u8(CURRENT_VERBOSITY.load(Ordering::SeqCst))
}

pub fn set_verbosity(level: Verbosity) {
    CURRENT_VERBOSITY.store(level as u8, Ordering::SeqCst);
}

pub fn log(level: Verbosity, message: &str) {
    if enabled(level) {
        println!("{} {}", level.glyph(), message);
    }
}

/// Acquisition state-machine transitions, always visible.
pub fn log_transition(from: &str, to: &str, why: &str) {
    println!("ℹ️  [{} → {}] {}", from, to, why);
}

/// Hex dump of a raw HID report.
pub fn log_data(level: Verbosity, title: &str, data: &[u8]) {
    if enabled(level) {
        let hex = data.iter().map(|b| format!("{:02X}", b)).collect::<Vec<_>>().join(" ");
        println!("{} {}", level.glyph(), title);
        println!("  └─ {}", hex);
        println!();
    }
}
