use crate::codec::{signed_axis, signed_axis_inverted, Dpad};
use crate::error::Result;
use crate::logger::{log_data, Verbosity};

/// Reports shorter than this carry a truncated payload and are dropped
/// whole; the pad never sees a partial update.
pub const MIN_REPORT_LEN: usize = 12;

// Fixed payload layout for the Kishi input report. Byte 0 is the report
// id and is never touched.
const LX_BYTE: usize = 1;
const LY_BYTE: usize = 2;
const RX_BYTE: usize = 3;
const RY_BYTE: usize = 4;
const DPAD_BYTE: usize = 5;
const FACE_BYTE: usize = 7;
const META_BYTE: usize = 8;
// Trigger bytes are swapped relative to index order on the wire.
const RIGHT_TRIGGER_BYTE: usize = 10;
const LEFT_TRIGGER_BYTE: usize = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    A,
    B,
    X,
    Y,
    LeftShoulder,
    RightShoulder,
    LeftThumb,
    RightThumb,
    Back,
    Start,
    Guide,
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    LeftX,
    LeftY,
    RightX,
    RightY,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    Left,
    Right,
}

/// The virtual pad as the mapper sees it: per-field setters plus one
/// atomic submit that publishes everything staged since the last one.
pub trait PadSink {
    fn set_button(&mut self, button: Button, pressed: bool);
    fn set_axis(&mut self, axis: Axis, value: i16);
    fn set_trigger(&mut self, trigger: Trigger, value: u8);
    fn submit(&mut self) -> Result<()>;
}

const FACE_BUTTONS: [(u8, Button); 6] = [
    (0x01, Button::A),
    (0x02, Button::B),
    (0x08, Button::X),
    (0x10, Button::Y),
    (0x40, Button::LeftShoulder),
    (0x80, Button::RightShoulder),
];

const META_BUTTONS: [(u8, Button); 5] = [
    (0x20, Button::LeftThumb),
    (0x40, Button::RightThumb),
    (0x04, Button::Back),
    (0x08, Button::Start),
    (0x10, Button::Guide),
];

/// Maps one raw report onto the pad and submits it as a single update.
/// Returns false (and stages nothing) for short reports. Stateless: every
/// accepted report overwrites the full pad state, there is no diffing.
pub fn apply(report: &[u8], pad: &mut dyn PadSink) -> Result<bool> {
    if report.len() < MIN_REPORT_LEN {
        return Ok(false);
    }

    log_data(Verbosity::High, "HID report", report);

    for (mask, button) in FACE_BUTTONS {
        pad.set_button(button, report[FACE_BYTE] & mask != 0);
    }
    for (mask, button) in META_BUTTONS {
        pad.set_button(button, report[META_BYTE] & mask != 0);
    }

    let dpad = Dpad::from_angle(report[DPAD_BYTE]);
    pad.set_button(Button::Up, dpad.up);
    pad.set_button(Button::Down, dpad.down);
    pad.set_button(Button::Left, dpad.left);
    pad.set_button(Button::Right, dpad.right);

    pad.set_axis(Axis::LeftX, signed_axis(report[LX_BYTE]));
    pad.set_axis(Axis::LeftY, signed_axis_inverted(report[LY_BYTE]));
    pad.set_axis(Axis::RightX, signed_axis(report[RX_BYTE]));
    pad.set_axis(Axis::RightY, signed_axis_inverted(report[RY_BYTE]));

    pad.set_trigger(Trigger::Left, report[LEFT_TRIGGER_BYTE]);
    pad.set_trigger(Trigger::Right, report[RIGHT_TRIGGER_BYTE]);

    pad.submit()?;
    Ok(true)
}


#[cfg(test)]
mod tests {
    use super::recording::RecordingPad;
    use super::*;

    #[test]
    fn short_report_discarded_whole() {
        let mut pad = RecordingPad::default();
        let applied = apply(&[0u8; 11], &mut pad).unwrap();
        assert!(!applied);
        assert_eq!(pad.writes, 0);
        assert_eq!(pad.submits, 0);
    }

    #[test]
    fn empty_report_discarded() {
        let mut pad = RecordingPad::default();
        assert!(!apply(&[], &mut pad).unwrap());
        assert_eq!(pad.writes, 0);
    }

    #[test]
    fn button_a_and_triggers() {
        // Byte 5 = 200 keeps the D-pad released; byte 7 = 0x01 is A;
        // triggers ride in bytes 11 (left) and 10 (right).
        let raw = [0, 0, 0, 0, 0, 200, 0, 0x01, 0, 0, 50, 60];
        let mut pad = RecordingPad::default();
        assert!(apply(&raw, &mut pad).unwrap());

        assert_eq!(pad.pressed(), vec![Button::A]);
        assert_eq!(pad.triggers[&Trigger::Left], 60);
        assert_eq!(pad.triggers[&Trigger::Right], 50);
        assert_eq!(pad.submits, 1);
    }

    #[test]
    fn trigger_bytes_are_swapped_on_the_wire() {
        let mut raw = [0u8; 12];
        raw[5] = 200;
        raw[10] = 0xFF; // right
        raw[11] = 0x01; // left
        let mut pad = RecordingPad::default();
        apply(&raw, &mut pad).unwrap();
        assert_eq!(pad.triggers[&Trigger::Right], 0xFF);
        assert_eq!(pad.triggers[&Trigger::Left], 0x01);
    }

    #[test]
    fn meta_buttons_from_byte_8() {
        let mut raw = [0u8; 12];
        raw[5] = 200;
        raw[8] = 0x20 | 0x04; // LeftThumb + Back
        let mut pad = RecordingPad::default();
        apply(&raw, &mut pad).unwrap();
        assert_eq!(pad.pressed(), vec![Button::Back, Button::LeftThumb]);
    }

    #[test]
    fn dpad_angle_fills_direction_buttons() {
        let mut raw = [0u8; 12];
        raw[5] = 32; // right
        let mut pad = RecordingPad::default();
        apply(&raw, &mut pad).unwrap();
        assert_eq!(pad.pressed(), vec![Button::Right]);

        raw[5] = 16; // up+right diagonal
        let mut pad = RecordingPad::default();
        apply(&raw, &mut pad).unwrap();
        assert_eq!(pad.pressed(), vec![Button::Right, Button::Up]);
    }

    #[test]
    fn sticks_widened_with_inverted_y() {
        let mut raw = [0u8; 12];
        raw[5] = 200;
        raw[1] = 64; // LX right of center
        raw[2] = 64; // LY raw down-positive, must come out negated
        raw[3] = 255;
        raw[4] = 128; // full raw deflection, saturates when negated
        let mut pad = RecordingPad::default();
        apply(&raw, &mut pad).unwrap();

        assert_eq!(pad.axes[&Axis::LeftX], 64 << 8);
        assert_eq!(pad.axes[&Axis::LeftY], -(64 << 8));
        assert_eq!(pad.axes[&Axis::RightX], -256);
        assert_eq!(pad.axes[&Axis::RightY], 32767);
    }

    #[test]
    fn full_overwrite_every_report() {
        // A pressed, then a second report with nothing pressed: the
        // released state must be written out, not skipped as "no change".
        let mut pad = RecordingPad::default();
        let mut raw = [0u8; 12];
        raw[5] = 200;
        raw[7] = 0x01;
        apply(&raw, &mut pad).unwrap();
        assert_eq!(pad.pressed(), vec![Button::A]);

        raw[7] = 0;
        apply(&raw, &mut pad).unwrap();
        assert!(pad.pressed().is_empty());
        assert_eq!(pad.submits, 2);
    }

    #[test]
    fn same_report_twice_is_idempotent() {
        let raw = [0, 10, 20, 30, 40, 5, 0, 0x12, 0x08, 0, 7, 9];
        let mut first = RecordingPad::default();
        let mut second = RecordingPad::default();
        apply(&raw, &mut first).unwrap();
        apply(&raw, &mut second).unwrap();
        apply(&raw, &mut second).unwrap();

        assert_eq!(first.buttons, second.buttons);
        assert_eq!(first.axes, second.axes);
        assert_eq!(first.triggers, second.triggers);
        assert_eq!(second.submits, 2);
    }
}
