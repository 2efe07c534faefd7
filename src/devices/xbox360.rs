use super::xbox360_layout::Xbox360Layout;
use crate::error::{BridgeError, Result};
use crate::mapper::{Axis, Button, PadSink, Trigger};
use evdev::{
    AbsInfo, AbsoluteAxisType, AttributeSet, EventType, InputEvent, Key, UinputAbsSetup,
    uinput::{VirtualDevice, VirtualDeviceBuilder},
};

/// The virtual pad the rest of the system writes into. Field setters only
/// stage events; `submit()` pushes the whole batch to uinput in one emit,
/// so applications see each HID report as a single input update.
pub struct VirtualXbox360 {
    device: VirtualDevice,
    staged: Vec<InputEvent>,
    hat_x: i32,
    hat_y: i32,
}

impl VirtualXbox360 {
    pub fn create() -> Result<Self> {
        let device = build_uinput_device().map_err(|e| {
            BridgeError::DriverUnavailable(format!("uinput no disponible: {}", e))
        })?;
        Ok(VirtualXbox360 { device, staged: Vec::with_capacity(24), hat_x: 0, hat_y: 0 })
    }
}

impl PadSink for VirtualXbox360 {
    fn set_button(&mut self, button: Button, pressed: bool) {
        match Xbox360Layout::button_key(button) {
            Some(key) => {
                let value = if pressed { 1 } else { 0 };
                self.staged.push(InputEvent::new(EventType::KEY, key.0, value));
            }
            // Directions fold into the hat axes, written at submit time
            // once both halves of each axis are known.
            None => match button {
                Button::Up if pressed => self.hat_y = -1,
                Button::Down if pressed => self.hat_y = 1,
                Button::Left if pressed => self.hat_x = -1,
                Button::Right if pressed => self.hat_x = 1,
                _ => {}
            },
        }
    }

    fn set_axis(&mut self, axis: Axis, value: i16) {
        self.staged.push(InputEvent::new(
            EventType::ABSOLUTE,
            Xbox360Layout::stick_code(axis).0,
            value as i32,
        ));
    }

    fn set_trigger(&mut self, trigger: Trigger, value: u8) {
        self.staged.push(InputEvent::new(
            EventType::ABSOLUTE,
            Xbox360Layout::trigger_code(trigger).0,
            value as i32,
        ));
    }

    fn submit(&mut self) -> Result<()> {
        self.staged.push(InputEvent::new(
            EventType::ABSOLUTE,
            AbsoluteAxisType::ABS_HAT0X.0,
            self.hat_x,
        ));
        self.staged.push(InputEvent::new(
            EventType::ABSOLUTE,
            AbsoluteAxisType::ABS_HAT0Y.0,
            self.hat_y,
        ));

        // emit() appends SYN_REPORT, which is what makes the batch land
        // as one atomic update.
        let result = self.device.emit(&self.staged);
        self.staged.clear();
        self.hat_x = 0;
        self.hat_y = 0;
        result.map_err(|e| BridgeError::Submit(e.to_string()))
    }
}

fn build_uinput_device() -> std::result::Result<VirtualDevice, Box<dyn std::error::Error>> {
    let mut keys = AttributeSet::<Key>::new();
    for &key in Xbox360Layout::BUTTON_KEYS.iter() {
        keys.insert(key);
    }

    let mut builder = VirtualDeviceBuilder::new()?
        .name("Kishi Bridge Virtual Xbox 360")
        .with_keys(&keys)?;

    let stick = || AbsInfo::new(0, Xbox360Layout::STICK_MIN, Xbox360Layout::STICK_MAX, 16, 128, 0);
    let trigger = || AbsInfo::new(0, Xbox360Layout::TRIGGER_MIN, Xbox360Layout::TRIGGER_MAX, 0, 0, 0);
    let hat = || AbsInfo::new(0, Xbox360Layout::HAT_MIN, Xbox360Layout::HAT_MAX, 0, 0, 0);

    let axes = [
        (AbsoluteAxisType::ABS_X, stick()),
        (AbsoluteAxisType::ABS_Y, stick()),
        (AbsoluteAxisType::ABS_RX, stick()),
        (AbsoluteAxisType::ABS_RY, stick()),
        (AbsoluteAxisType::ABS_Z, trigger()),
        (AbsoluteAxisType::ABS_RZ, trigger()),
        (AbsoluteAxisType::ABS_HAT0X, hat()),
        (AbsoluteAxisType::ABS_HAT0Y, hat()),
    ];

    for (axis, info) in axes {
        let setup = UinputAbsSetup::new(axis, info);
        builder = builder.with_absolute_axis(&setup)?;
    }

    Ok(builder.build()?)
}
