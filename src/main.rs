#![no_std]
#![no_main]

use rp_pico as bsp;

use defmt_rtt as _; // logger
use panic_halt as _;

// The macro for our start-up function
use bsp::entry;
use bsp::hal;
use bsp::hal::gpio::{DynPinId, FunctionSioInput, Pin, PullUp};

use embedded_hal::timer::CountDown;
use fugit::MicrosDurationU64;

// USB Device support
use usb_device::class_prelude::UsbBusAllocator;

use arcade_joystick_hid::scan::{ArcadeStick, DirectionPins};
use arcade_joystick_hid::{DualJoystick, Player, UsbConfig, UsbHidTransport};

type StickPin = Pin<DynPinId, FunctionSioInput, PullUp>;

/// Main loop period. Inputs are sampled and USB is serviced on every tick.
const SCAN_TICK: MicrosDurationU64 = MicrosDurationU64::millis(1);

/// Reports go out every this many ticks.
const REPORT_INTERVAL_TICKS: u32 = 10;

/// A switch has to hold a new level for more than this many ticks.
const DEBOUNCE_SAMPLES: usize = 5;

/// Entry point to our bare-metal application.
///
/// Sets up clocks, the two sticks' GPIO inputs and the USB HID device, then
/// scans the sticks every millisecond and sends both joystick reports every
/// ten.
#[entry]
fn main() -> ! {
    // Grab our singleton objects
    let mut pac = defmt::unwrap!(hal::pac::Peripherals::take());

    // Set up the watchdog driver - needed by the clock setup code
    let mut watchdog = hal::Watchdog::new(pac.WATCHDOG);

    // The default is to generate a 125 MHz system clock
    let clocks = defmt::unwrap!(hal::clocks::init_clocks_and_plls(
        bsp::XOSC_CRYSTAL_FREQ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .ok());

    let sio = hal::Sio::new(pac.SIO);
    let pins = bsp::Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );

    // Player 1: GP2-GP5 directions, GP6-GP9 buttons
    let mut p1: ArcadeStick<StickPin> = ArcadeStick::new(
        DirectionPins {
            up: pins.gpio2.into_pull_up_input().into_dyn_pin(),
            down: pins.gpio3.into_pull_up_input().into_dyn_pin(),
            left: pins.gpio4.into_pull_up_input().into_dyn_pin(),
            right: pins.gpio5.into_pull_up_input().into_dyn_pin(),
        },
        DEBOUNCE_SAMPLES,
    );
    defmt::unwrap!(p1.bind_button(0, pins.gpio6.into_pull_up_input().into_dyn_pin()));
    defmt::unwrap!(p1.bind_button(1, pins.gpio7.into_pull_up_input().into_dyn_pin()));
    defmt::unwrap!(p1.bind_button(2, pins.gpio8.into_pull_up_input().into_dyn_pin()));
    defmt::unwrap!(p1.bind_button(3, pins.gpio9.into_pull_up_input().into_dyn_pin()));

    // Player 2: GP10-GP13 directions, GP14-GP17 buttons
    let mut p2: ArcadeStick<StickPin> = ArcadeStick::new(
        DirectionPins {
            up: pins.gpio10.into_pull_up_input().into_dyn_pin(),
            down: pins.gpio11.into_pull_up_input().into_dyn_pin(),
            left: pins.gpio12.into_pull_up_input().into_dyn_pin(),
            right: pins.gpio13.into_pull_up_input().into_dyn_pin(),
        },
        DEBOUNCE_SAMPLES,
    );
    defmt::unwrap!(p2.bind_button(0, pins.gpio14.into_pull_up_input().into_dyn_pin()));
    defmt::unwrap!(p2.bind_button(1, pins.gpio15.into_pull_up_input().into_dyn_pin()));
    defmt::unwrap!(p2.bind_button(2, pins.gpio16.into_pull_up_input().into_dyn_pin()));
    defmt::unwrap!(p2.bind_button(3, pins.gpio17.into_pull_up_input().into_dyn_pin()));

    let usb_bus = hal::usb::UsbBus::new(
        pac.USBCTRL_REGS,
        pac.USBCTRL_DPRAM,
        clocks.usb_clock,
        true,
        &mut pac.RESETS,
    );

    // Lives for the rest of main, which never returns.
    let usb_bus_allocator = UsbBusAllocator::new(usb_bus);

    let transport = UsbHidTransport::new(&usb_bus_allocator, UsbConfig::default());
    let mut joysticks = defmt::unwrap!(DualJoystick::new(transport));

    let timer = hal::Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);
    let mut tick = timer.count_down();
    tick.start(SCAN_TICK);

    defmt::println!("arcade2usb running");

    let mut ticks: u32 = 0;
    loop {
        // Keep servicing USB until the tick is over.
        while let Err(nb::Error::WouldBlock) = tick.wait() {
            joysticks.transport_mut().poll();
        }

        p1.scan();
        p2.scan();

        ticks = ticks.wrapping_add(1);
        if ticks % REPORT_INTERVAL_TICKS == 0 {
            joysticks.reset();
            p1.apply(Player::One, &mut joysticks);
            p2.apply(Player::Two, &mut joysticks);
            joysticks.usb_update();
        }
    }
}
