use serde::ser::{Serialize, SerializeTuple, Serializer};
use usbd_hid::descriptor::AsInputReport;

/// Payload bytes per joystick report, not counting the report ID.
pub const REPORT_PAYLOAD_LEN: usize = 5;

/// Bytes on the wire: report ID followed by the payload.
pub const REPORT_FRAME_LEN: usize = REPORT_PAYLOAD_LEN + 1;

/// `[x, y, buttons_lo, buttons_hi, reserved]`
pub type ReportPayload = [u8; REPORT_PAYLOAD_LEN];

/// One joystick input report as pushed to the interrupt IN endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JoystickReport {
    pub report_id: u8,
    pub payload: ReportPayload,
}

impl JoystickReport {
    pub const fn new(report_id: u8, payload: ReportPayload) -> Self {
        Self { report_id, payload }
    }

    pub fn to_bytes(&self) -> [u8; REPORT_FRAME_LEN] {
        let [x, y, lo, hi, reserved] = self.payload;
        [self.report_id, x, y, lo, hi, reserved]
    }
}

// Serialized as a flat byte tuple so usbd-hid sends exactly the frame bytes.
impl Serialize for JoystickReport {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut tuple = serializer.serialize_tuple(REPORT_FRAME_LEN)?;
        for byte in self.to_bytes() {
            tuple.serialize_element(&byte)?;
        }
        tuple.end()
    }
}

impl AsInputReport for JoystickReport {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_starts_with_report_id() {
        let report = JoystickReport::new(0x02, [0x00, 0xff, 0x81, 0x40, 0x00]);
        assert_eq!(report.to_bytes(), [0x02, 0x00, 0xff, 0x81, 0x40, 0x00]);
    }
}
