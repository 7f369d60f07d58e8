use usb_device::class_prelude::{UsbBus, UsbBusAllocator};
use usb_device::device::{
    StringDescriptors, UsbDevice, UsbDeviceBuilder, UsbDeviceState, UsbVidPid,
};
use usb_device::UsbError;
use usbd_hid::hid_class::HIDClass;

use heapless::Deque;

use crate::error::TransportError;
use crate::report::{JoystickReport, ReportPayload};

/// Where joystick reports go.
pub trait ReportTransport {
    type Error;

    /// Called once, before any report is sent.
    fn install_descriptor(&mut self, descriptor: &'static [u8]) -> Result<(), Self::Error>;

    fn send_report(&mut self, report_id: u8, payload: &ReportPayload) -> Result<(), Self::Error>;
}

impl<T: ReportTransport + ?Sized> ReportTransport for &mut T {
    type Error = T::Error;

    fn install_descriptor(&mut self, descriptor: &'static [u8]) -> Result<(), Self::Error> {
        (**self).install_descriptor(descriptor)
    }

    fn send_report(&mut self, report_id: u8, payload: &ReportPayload) -> Result<(), Self::Error> {
        (**self).send_report(report_id, payload)
    }
}

/// USB identity and polling rate of the device.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UsbConfig {
    pub vid: u16,
    pub pid: u16,
    pub manufacturer: &'static str,
    pub product: &'static str,
    pub serial_number: &'static str,
    /// Interrupt endpoint polling interval requested from the host.
    pub poll_ms: u8,
}

impl Default for UsbConfig {
    fn default() -> Self {
        // https://github.com/obdev/v-usb/blob/master/usbdrv/USB-IDs-for-free.txt
        Self {
            vid: 0x16c0,
            pid: 0x27dc,
            manufacturer: "Arcade2USB",
            product: "Arcade2USB dual joystick",
            serial_number: "arcade2usb-rp2040",
            poll_ms: 1,
        }
    }
}

/// Frames that may wait for the IN endpoint, one per report ID.
pub const PENDING_REPORTS: usize = 2;

/// HID class and USB device built on first descriptor install.
///
/// Both joystick reports share one interrupt IN endpoint, which holds a
/// single packet until the host collects it. A report that finds the
/// endpoint busy is queued and written by a later [`send_report`] or
/// [`poll`](Self::poll). A queued frame is replaced by a newer one with the
/// same report ID, so the host always gets the latest state of each stick.
///
/// The device has to be polled with [`poll`](Self::poll) at least every
/// 10ms for the host to keep it enumerated.
///
/// [`send_report`]: ReportTransport::send_report
pub struct UsbHidTransport<'a, B: UsbBus> {
    allocator: &'a UsbBusAllocator<B>,
    config: UsbConfig,
    hid: Option<HIDClass<'a, B>>,
    device: Option<UsbDevice<'a, B>>,
    pending: Deque<JoystickReport, PENDING_REPORTS>,
}

impl<'a, B: UsbBus> UsbHidTransport<'a, B> {
    pub fn new(allocator: &'a UsbBusAllocator<B>, config: UsbConfig) -> Self {
        Self {
            allocator,
            config,
            hid: None,
            device: None,
            pending: Deque::new(),
        }
    }

    pub fn config(&self) -> &UsbConfig {
        &self.config
    }

    pub fn state(&self) -> Option<UsbDeviceState> {
        self.device.as_ref().map(|device| device.state())
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Services the USB device and writes queued reports once the endpoint
    /// is free again. Returns true if the HID class may have new data, same
    /// as `UsbDevice::poll`.
    pub fn poll(&mut self) -> bool {
        let has_data = match (self.device.as_mut(), self.hid.as_mut()) {
            (Some(device), Some(hid)) => device.poll(&mut [hid]),
            _ => return false,
        };

        if let Err(_err) = self.flush() {
            #[cfg(feature = "defmt")]
            defmt::warn!("queued report dropped: {}", _err);
        }

        has_data
    }

    // Writes queued frames in order until the endpoint is busy. A frame the
    // endpoint rejects for any other reason is dropped.
    fn flush(&mut self) -> Result<(), TransportError> {
        let Some(hid) = self.hid.as_ref() else {
            return Err(TransportError::NotInstalled);
        };

        while let Some(report) = self.pending.front() {
            match hid.push_input(report) {
                Ok(_) => {
                    self.pending.pop_front();
                }
                Err(UsbError::WouldBlock) => return Ok(()),
                Err(err) => {
                    self.pending.pop_front();
                    return Err(err.into());
                }
            }
        }

        Ok(())
    }
}

impl<B: UsbBus> ReportTransport for UsbHidTransport<'_, B> {
    type Error = TransportError;

    fn install_descriptor(&mut self, descriptor: &'static [u8]) -> Result<(), TransportError> {
        if self.hid.is_some() {
            return Err(TransportError::AlreadyInstalled);
        }

        // Endpoints have to be allocated before the device is built.
        let hid = HIDClass::new(self.allocator, descriptor, self.config.poll_ms);

        let strings = StringDescriptors::default()
            .manufacturer(self.config.manufacturer)
            .product(self.config.product)
            .serial_number(self.config.serial_number);

        let device = UsbDeviceBuilder::new(
            self.allocator,
            UsbVidPid(self.config.vid, self.config.pid),
        )
        .strings(&[strings])
        .map_err(|_| TransportError::InvalidUsbConfig)?
        .device_class(0)
        .build();

        self.hid = Some(hid);
        self.device = Some(device);

        #[cfg(feature = "defmt")]
        defmt::info!(
            "usb device {=u16:#x}:{=u16:#x} ready",
            self.config.vid,
            self.config.pid
        );

        Ok(())
    }

    fn send_report(&mut self, report_id: u8, payload: &ReportPayload) -> Result<(), TransportError> {
        let Some(device) = self.device.as_ref() else {
            return Err(TransportError::NotInstalled);
        };

        if device.state() != UsbDeviceState::Configured {
            // frames queued for a previous configuration are stale
            self.pending.clear();
            return Err(TransportError::NotConfigured);
        }

        let report = JoystickReport::new(report_id, *payload);
        if let Some(queued) = self
            .pending
            .iter_mut()
            .find(|queued| queued.report_id == report_id)
        {
            *queued = report;
        } else if self.pending.push_back(report).is_err() {
            return Err(TransportError::Usb(UsbError::WouldBlock));
        }

        self.flush()
    }
}
