#![allow(dead_code)]

use arcade_joystick_hid::{DualJoystick, ReportPayload, ReportTransport};

/// Keeps every report it is handed.
#[derive(Default)]
pub struct Recorder {
    pub descriptor: Option<&'static [u8]>,
    pub sent: Vec<(u8, ReportPayload)>,
}

impl ReportTransport for Recorder {
    type Error = ();

    fn install_descriptor(&mut self, descriptor: &'static [u8]) -> Result<(), ()> {
        self.descriptor = Some(descriptor);
        Ok(())
    }

    fn send_report(&mut self, report_id: u8, payload: &ReportPayload) -> Result<(), ()> {
        self.sent.push((report_id, *payload));
        Ok(())
    }
}

impl Recorder {
    pub fn last(&self, report_id: u8) -> Option<ReportPayload> {
        self.sent
            .iter()
            .rev()
            .find(|(id, _)| *id == report_id)
            .map(|(_, payload)| *payload)
    }
}

pub fn joysticks() -> DualJoystick<Recorder> {
    match DualJoystick::new(Recorder::default()) {
        Ok(joy) => joy,
        Err(()) => unreachable!("recorder never refuses the descriptor"),
    }
}
