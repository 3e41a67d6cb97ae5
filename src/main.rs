//! rich-keypad firmware entry point.
//!
//! A 4-button USB HID keypad: each button edge is mapped to a keyboard
//! key code (R, I, C, H) and sent to the host as an 8-byte boot-keyboard
//! report, with the feedback LED toggled on every transmission.
//!
//! Task layout:
//!   - one `button_task` per key: edge wait → baseline compare → publish
//!   - `report_dispatcher_task`: wake wait → compose → HID write → LED
//!   - `run_usb_device`: enumeration, suspend/resume, remote wakeup
//!
//! Any failure before the tasks are spawned is fatal; after that, faults
//! are logged and the pipeline keeps running until power-down.

#![no_std]
#![no_main]

mod buttons;
mod config;
mod error;
// mapper and report are shared with the host-test library build; parts of
// their API surface only the tests touch.
#[allow(dead_code)]
mod mapper;
#[allow(dead_code)]
mod report;
mod suspend;
mod usb;

use defmt::info;
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_nrf::gpio::{Level, Output, OutputDrive, Pin};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use panic_probe as _;

use crate::report::{ReportState, KEY_C, KEY_H, KEY_I, KEY_R};

/// Coalescing wake signal from the key mappers to the report dispatcher.
///
/// A single-slot notification, not a queue: signals raised before the
/// dispatcher consumes one collapse together, and the dispatcher always
/// re-reads the current report state rather than a history of edits.
pub(crate) type WakeSignal = Signal<CriticalSectionRawMutex, ()>;

static REPORT_STATE: ReportState = ReportState::new();
static REPORT_WAKE: WakeSignal = Signal::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());

    info!("Starting rich-keypad");

    // Feedback LED (LED1 on the DK, active low - starts off).
    let led = Output::new(p.P0_13, Level::High, OutputDrive::Standard);

    let keypad_usb = usb::hid_device::init(p.USBD);
    spawner.must_spawn(usb::hid_device::run_usb_device(keypad_usb.device));
    spawner.must_spawn(usb::hid_device::report_dispatcher_task(
        keypad_usb.keyboard_writer,
        led,
        &REPORT_STATE,
        &REPORT_WAKE,
    ));

    // Button → key assignment (see config.rs for the board pinout).
    // A board without one of these lines simply omits the entry.
    let keys = [
        (p.P0_11.degrade(), KEY_R),
        (p.P0_12.degrade(), KEY_I),
        (p.P0_24.degrade(), KEY_C),
        (p.P0_25.degrade(), KEY_H),
    ];
    for (pin, key) in keys {
        spawner.must_spawn(buttons::button_task(pin, key, &REPORT_STATE, &REPORT_WAKE));
    }
}
