#![cfg_attr(not(test), no_std)]

//! Two arcade joysticks as one USB HID device.
//!
//! Each stick has four digital directions and up to sixteen buttons. The
//! directions are folded into 8-bit X/Y axes (0, 127 or 255) and the buttons
//! into a 16-bit mask, then sent as two input reports (IDs 1 and 2) that
//! match [`descriptor::REPORT_DESCRIPTOR`] byte for byte.
//!
//! - [`descriptor`] - the static HID report descriptor and its layout check
//! - [`joystick`] - per-stick state and the encoder that sends it
//! - [`report`] - the input report frame handed to the USB endpoint
//! - [`transport`] - the transport trait and its usb-device implementation
//! - [`scan`] - debounced GPIO inputs feeding the joystick operations

#[cfg(feature = "defmt")]
use defmt as _;

pub mod descriptor;
pub mod error;
pub mod joystick;
pub mod report;
pub mod scan;
pub mod transport;

pub use descriptor::{JOYSTICK1_REPORT_ID, JOYSTICK2_REPORT_ID, REPORT_DESCRIPTOR};
pub use error::{BindError, TransportError};
pub use joystick::{Direction, DualJoystick, JoystickUnit, Player};
pub use report::{JoystickReport, ReportPayload, REPORT_PAYLOAD_LEN};
pub use transport::{ReportTransport, UsbConfig, UsbHidTransport};
