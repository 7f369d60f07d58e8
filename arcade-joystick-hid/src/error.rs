use usb_device::UsbError;

/// Failures of [`UsbHidTransport`](crate::transport::UsbHidTransport).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    #[error("report descriptor not installed")]
    NotInstalled,
    #[error("report descriptor already installed")]
    AlreadyInstalled,
    #[error("usb device configuration rejected")]
    InvalidUsbConfig,
    #[error("host has not configured the device")]
    NotConfigured,
    #[error("usb error: {0:?}")]
    Usb(UsbError),
}

impl From<UsbError> for TransportError {
    fn from(err: UsbError) -> Self {
        TransportError::Usb(err)
    }
}

/// Failures while wiring buttons onto an [`ArcadeStick`](crate::scan::ArcadeStick).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BindError {
    #[error("button bit {0} is outside 0..=15")]
    InvalidBit(u8),
    #[error("button bit {0} is already bound")]
    BitInUse(u8),
}
