//! State of the two sticks and the encoder that sends it.
//!
//! A digital stick only ever drives an axis to one of three values, so the
//! host sees [`AXIS_MIN`], [`AXIS_CENTER`] or [`AXIS_MAX`] and nothing in
//! between. Buttons are a 16-bit mask that only grows until [`reset`].
//!
//! [`reset`]: DualJoystick::reset

use crate::descriptor::{JOYSTICK1_REPORT_ID, JOYSTICK2_REPORT_ID, REPORT_DESCRIPTOR};
use crate::report::{JoystickReport, ReportPayload};
use crate::transport::ReportTransport;

pub const AXIS_MIN: u8 = 0x00;
pub const AXIS_CENTER: u8 = 0x7f;
pub const AXIS_MAX: u8 = 0xff;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub const ALL: [Player; 2] = [Player::One, Player::Two];

    pub const fn report_id(self) -> u8 {
        match self {
            Player::One => JOYSTICK1_REPORT_ID,
            Player::Two => JOYSTICK2_REPORT_ID,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Axis and button state of one stick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JoystickUnit {
    x_axis: u8,
    y_axis: u8,
    buttons: u16,
}

impl JoystickUnit {
    pub const IDLE: JoystickUnit = JoystickUnit {
        x_axis: AXIS_CENTER,
        y_axis: AXIS_CENTER,
        buttons: 0,
    };

    pub const fn new() -> Self {
        Self::IDLE
    }

    pub fn x_axis(&self) -> u8 {
        self.x_axis
    }

    pub fn y_axis(&self) -> u8 {
        self.y_axis
    }

    pub fn buttons(&self) -> u16 {
        self.buttons
    }

    pub fn reset(&mut self) {
        *self = Self::IDLE;
    }

    /// Drives one axis to its extreme. The other axis is left alone, and a
    /// later press of the opposite direction simply overwrites this one.
    pub fn press(&mut self, direction: Direction) {
        match direction {
            Direction::Up => self.y_axis = AXIS_MIN,
            Direction::Down => self.y_axis = AXIS_MAX,
            Direction::Left => self.x_axis = AXIS_MIN,
            Direction::Right => self.x_axis = AXIS_MAX,
        }
    }

    /// ORs `mask` into the button state. Bits are only cleared by [`reset`](Self::reset).
    pub fn button_press(&mut self, mask: u16) {
        self.buttons |= mask;
    }

    pub fn payload(&self) -> ReportPayload {
        let [lo, hi] = self.buttons.to_le_bytes();
        [self.x_axis, self.y_axis, lo, hi, 0x00]
    }
}

impl Default for JoystickUnit {
    fn default() -> Self {
        Self::IDLE
    }
}

/// Both sticks plus the transport their reports go out on.
///
/// Construction installs [`REPORT_DESCRIPTOR`] into the transport; after that
/// the mutators only touch memory and [`usb_update`](Self::usb_update) sends
/// one report per stick.
pub struct DualJoystick<T: ReportTransport> {
    p1: JoystickUnit,
    p2: JoystickUnit,
    transport: T,
}

impl<T: ReportTransport> DualJoystick<T> {
    pub fn new(mut transport: T) -> Result<Self, T::Error> {
        transport.install_descriptor(REPORT_DESCRIPTOR)?;

        #[cfg(feature = "defmt")]
        defmt::info!("report descriptor installed, {} bytes", REPORT_DESCRIPTOR.len());

        Ok(Self {
            p1: JoystickUnit::IDLE,
            p2: JoystickUnit::IDLE,
            transport,
        })
    }

    pub fn unit(&self, player: Player) -> &JoystickUnit {
        match player {
            Player::One => &self.p1,
            Player::Two => &self.p2,
        }
    }

    fn unit_mut(&mut self, player: Player) -> &mut JoystickUnit {
        match player {
            Player::One => &mut self.p1,
            Player::Two => &mut self.p2,
        }
    }

    /// Puts both sticks back to centered axes and no buttons.
    pub fn reset(&mut self) {
        self.p1.reset();
        self.p2.reset();
    }

    pub fn press(&mut self, player: Player, direction: Direction) {
        self.unit_mut(player).press(direction);
    }

    pub fn button_press(&mut self, player: Player, mask: u16) {
        self.unit_mut(player).button_press(mask);
    }

    pub fn p1_up(&mut self) {
        self.press(Player::One, Direction::Up);
    }

    pub fn p1_down(&mut self) {
        self.press(Player::One, Direction::Down);
    }

    pub fn p1_left(&mut self) {
        self.press(Player::One, Direction::Left);
    }

    pub fn p1_right(&mut self) {
        self.press(Player::One, Direction::Right);
    }

    pub fn p1_button_press(&mut self, mask: u16) {
        self.button_press(Player::One, mask);
    }

    pub fn p2_up(&mut self) {
        self.press(Player::Two, Direction::Up);
    }

    pub fn p2_down(&mut self) {
        self.press(Player::Two, Direction::Down);
    }

    pub fn p2_left(&mut self) {
        self.press(Player::Two, Direction::Left);
    }

    pub fn p2_right(&mut self) {
        self.press(Player::Two, Direction::Right);
    }

    pub fn p2_button_press(&mut self, mask: u16) {
        self.button_press(Player::Two, mask);
    }

    /// Snapshot of one stick as the report that would go on the wire.
    pub fn report(&self, player: Player) -> JoystickReport {
        JoystickReport::new(player.report_id(), self.unit(player).payload())
    }

    /// Sends the current state of both sticks.
    ///
    /// A report the transport refuses is dropped; the other stick is still
    /// sent and nothing is retried.
    pub fn usb_update(&mut self) {
        for player in Player::ALL {
            let report = self.report(player);
            if self
                .transport
                .send_report(report.report_id, &report.payload)
                .is_err()
            {
                #[cfg(feature = "defmt")]
                defmt::warn!("report {} dropped", report.report_id);
            }
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }
}
