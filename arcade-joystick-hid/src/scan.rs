//! Debounced switch inputs of an arcade stick.
//!
//! All switches are wired active-low: the pin is pulled up and the switch
//! shorts it to ground when pressed.

use embedded_hal::digital::v2::InputPin;

use crate::error::BindError;
use crate::joystick::{Direction, DualJoystick, Player};
use crate::transport::ReportTransport;

pub const MAX_BUTTONS: usize = 16;

/// A value that only follows its input once the input has held a new value
/// for more than `samples` consecutive updates.
#[derive(Clone, Debug)]
pub struct Debounced<T> {
    stable: T,
    candidate: T,
    held_for: usize,
    samples: usize,
}

impl<T: Clone> Debounced<T> {
    pub fn new(init: T, samples: usize) -> Self {
        Self {
            stable: init.clone(),
            candidate: init,
            held_for: 0,
            samples,
        }
    }

    pub fn get(&self) -> T {
        self.stable.clone()
    }
}

impl<T: PartialEq + Clone> Debounced<T> {
    /// Feeds one raw sample. Returns the new value when it becomes stable,
    /// so the result doubles as an edge trigger.
    pub fn update(&mut self, input: T) -> Option<T> {
        if self.stable == input {
            self.held_for = 0;
            return None;
        }

        if self.candidate == input {
            self.held_for += 1;
        } else {
            self.candidate = input;
            self.held_for = 1;
        }

        if self.held_for <= self.samples {
            return None;
        }

        self.stable = self.candidate.clone();
        self.held_for = 0;
        Some(self.stable.clone())
    }
}

/// One active-low switch behind a debouncer.
pub struct Switch<P> {
    pin: P,
    state: Debounced<bool>,
}

impl<P: InputPin> Switch<P> {
    pub fn new(pin: P, samples: usize) -> Self {
        Self {
            pin,
            state: Debounced::new(false, samples),
        }
    }

    /// Samples the pin. A pin that fails to read counts as released.
    pub fn scan(&mut self) -> Option<bool> {
        let pressed = self.pin.is_low().unwrap_or(false);
        self.state.update(pressed)
    }

    pub fn is_pressed(&self) -> bool {
        self.state.get()
    }
}

pub struct DirectionPins<P> {
    pub up: P,
    pub down: P,
    pub left: P,
    pub right: P,
}

/// Four directions and up to [`MAX_BUTTONS`] buttons of one stick.
pub struct ArcadeStick<P> {
    up: Switch<P>,
    down: Switch<P>,
    left: Switch<P>,
    right: Switch<P>,
    // indexed by button bit
    buttons: [Option<Switch<P>>; MAX_BUTTONS],
    samples: usize,
}

impl<P: InputPin> ArcadeStick<P> {
    pub fn new(pins: DirectionPins<P>, samples: usize) -> Self {
        Self {
            up: Switch::new(pins.up, samples),
            down: Switch::new(pins.down, samples),
            left: Switch::new(pins.left, samples),
            right: Switch::new(pins.right, samples),
            buttons: core::array::from_fn(|_| None),
            samples,
        }
    }

    /// Reports `pin` as button `bit` (0 is button 1 on the host).
    pub fn bind_button(&mut self, bit: u8, pin: P) -> Result<(), BindError> {
        let slot = self
            .buttons
            .get_mut(usize::from(bit))
            .ok_or(BindError::InvalidBit(bit))?;
        if slot.is_some() {
            return Err(BindError::BitInUse(bit));
        }

        *slot = Some(Switch::new(pin, self.samples));
        Ok(())
    }

    pub fn scan(&mut self) {
        for switch in [
            &mut self.up,
            &mut self.down,
            &mut self.left,
            &mut self.right,
        ] {
            switch.scan();
        }
        for switch in self.buttons.iter_mut().flatten() {
            switch.scan();
        }
    }

    pub fn directions(&self) -> impl Iterator<Item = Direction> + '_ {
        [
            (Direction::Up, &self.up),
            (Direction::Down, &self.down),
            (Direction::Left, &self.left),
            (Direction::Right, &self.right),
        ]
        .into_iter()
        .filter(|(_, switch)| switch.is_pressed())
        .map(|(direction, _)| direction)
    }

    pub fn button_mask(&self) -> u16 {
        self.buttons
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.as_ref().is_some_and(Switch::is_pressed))
            .fold(0, |mask, (bit, _)| mask | (1 << bit))
    }

    /// Pushes the debounced state into `joystick` as `player`.
    ///
    /// Nothing is released here; call [`DualJoystick::reset`] first to
    /// rebuild the state from scratch each cycle.
    pub fn apply<T: ReportTransport>(&self, player: Player, joystick: &mut DualJoystick<T>) {
        for direction in self.directions() {
            joystick.press(player, direction);
        }
        joystick.button_press(player, self.button_mask());
    }
}
