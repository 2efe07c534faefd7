use crate::mapper::{Axis, Button, Trigger};
use evdev::{AbsoluteAxisType, Key};

/// Layout de un control Xbox 360 real según evtest y el driver xpad.
/// El device virtual se construye con exactamente estos codes y rangos
/// para que los juegos lo vean como un x360 de verdad.
pub struct Xbox360Layout;

impl Xbox360Layout {
    /// The 11 discrete buttons; the D-pad is NOT here, xpad exposes it
    /// as ABS_HAT0X/ABS_HAT0Y.
    pub const BUTTON_KEYS: [Key; 11] = [
        Key::BTN_SOUTH,  // A
        Key::BTN_EAST,   // B
        Key::BTN_NORTH,  // X
        Key::BTN_WEST,   // Y
        Key::BTN_TL,     // LB
        Key::BTN_TR,     // RB
        Key::BTN_SELECT, // Back
        Key::BTN_START,  // Start
        Key::BTN_MODE,   // Guide
        Key::BTN_THUMBL, // Left stick press
        Key::BTN_THUMBR, // Right stick press
    ];

    // Rangos estándar que usa xpad en Linux (evdev)
    pub const STICK_MIN: i32 = -32768;
    pub const STICK_MAX: i32 = 32767;

    pub const TRIGGER_MIN: i32 = 0;
    pub const TRIGGER_MAX: i32 = 255;

    pub const HAT_MIN: i32 = -1;
    pub const HAT_MAX: i32 = 1;

    /// Discrete buttons only; the four directions return None because
    /// they travel over the hat axes instead of key events.
    pub fn button_key(button: Button) -> Option<Key> {
        match button {
            Button::A => Some(Key::BTN_SOUTH),
            Button::B => Some(Key::BTN_EAST),
            Button::X => Some(Key::BTN_NORTH),
            Button::Y => Some(Key::BTN_WEST),
            Button::LeftShoulder => Some(Key::BTN_TL),
            Button::RightShoulder => Some(Key::BTN_TR),
            Button::Back => Some(Key::BTN_SELECT),
            Button::Start => Some(Key::BTN_START),
            Button::Guide => Some(Key::BTN_MODE),
            Button::LeftThumb => Some(Key::BTN_THUMBL),
            Button::RightThumb => Some(Key::BTN_THUMBR),
            Button::Up | Button::Down | Button::Left | Button::Right => None,
        }
    }

    pub fn stick_code(axis: Axis) -> AbsoluteAxisType {
        match axis {
            Axis::LeftX => AbsoluteAxisType::ABS_X,
            Axis::LeftY => AbsoluteAxisType::ABS_Y,
            Axis::RightX => AbsoluteAxisType::ABS_RX,
            Axis::RightY => AbsoluteAxisType::ABS_RY,
        }
    }

    pub fn trigger_code(trigger: Trigger) -> AbsoluteAxisType {
        match trigger {
            Trigger::Left => AbsoluteAxisType::ABS_Z,
            Trigger::Right => AbsoluteAxisType::ABS_RZ,
        }
    }
}
