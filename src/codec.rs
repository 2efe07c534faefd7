/// Angle value at and above which the hat byte means "released".
/// The Kishi reports the D-pad as a single angular byte: 0 = up,
/// increasing clockwise, 32 = right, 64 = down, 96 = left.
pub const DPAD_RELEASED_MIN: u8 = 120;

// Cardinal sectors are the cardinal angle ±10; the gaps between them are
// the diagonal sectors. Boundaries pinned by the tests below.
const UP_MAX: u8 = 10;
const RIGHT_MIN: u8 = 22;
const RIGHT_MAX: u8 = 42;
const DOWN_MIN: u8 = 54;
const DOWN_MAX: u8 = 74;
const LEFT_MIN: u8 = 86;
const LEFT_MAX: u8 = 106;

/// Widens a raw 8-bit stick sample to the virtual pad's i16 range.
/// The byte is the signed sample (0x80 = full negative deflection); the
/// low output byte stays zero.
pub fn signed_axis(raw: u8) -> i16 {
    ((raw as i8) as i16) << 8
}

/// `signed_axis` with the sign flipped, for the Y sticks: the Kishi's raw
/// Y grows downwards, the Xbox 360 convention grows upwards. Saturating so
/// full deflection (-32768) lands on 32767 instead of wrapping.
pub fn signed_axis_inverted(raw: u8) -> i16 {
    signed_axis(raw).saturating_neg()
}

/// Decomposed D-pad: at most two flags set, and only adjacent pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dpad {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Dpad {
    pub const RELEASED: Dpad = Dpad { up: false, down: false, left: false, right: false };

    /// Maps the angular hat byte to direction flags. Pure: same byte in,
    /// same flags out, no dependency on the previous D-pad state.
    pub fn from_angle(angle: u8) -> Dpad {
        if angle >= DPAD_RELEASED_MIN {
            return Dpad::RELEASED;
        }

        let mut dpad = Dpad::RELEASED;

        // Cardinal sectors
        if angle <= UP_MAX {
            dpad.up = true;
        }
        if (RIGHT_MIN..=RIGHT_MAX).contains(&angle) {
            dpad.right = true;
        }
        if (DOWN_MIN..=DOWN_MAX).contains(&angle) {
            dpad.down = true;
        }
        if (LEFT_MIN..=LEFT_MAX).contains(&angle) {
            dpad.left = true;
        }

        // Diagonal sectors fill the gaps between cardinals
        if angle > UP_MAX && angle < RIGHT_MIN {
            dpad.up = true;
            dpad.right = true;
        }
        if angle > RIGHT_MAX && angle < DOWN_MIN {
            dpad.down = true;
            dpad.right = true;
        }
        if angle > DOWN_MAX && angle < LEFT_MIN {
            dpad.down = true;
            dpad.left = true;
        }
        if angle > LEFT_MAX {
            dpad.up = true;
            dpad.left = true;
        }

        dpad
    }

    pub fn is_released(&self) -> bool {
        !(self.up || self.down || self.left || self.right)
    }
}
