//! USB HID keyboard device and the report dispatcher.
//!
//! Initialises the Embassy USB stack on the nRF52840 hardware USB
//! peripheral, exposes one boot-keyboard HID endpoint, tracks bus
//! suspend state for the button handlers, and runs the dispatch loop
//! that turns report-state changes into HID writes.

use core::sync::atomic::{AtomicBool, Ordering};

use defmt::{info, warn};
use embassy_nrf::gpio::Output;
use embassy_nrf::usb::vbus_detect::HardwareVbusDetect;
use embassy_nrf::usb::Driver;
use embassy_nrf::{self, bind_interrupts, peripherals};
use embassy_usb::class::hid::{Config as HidConfig, HidWriter, State};
use embassy_usb::{Builder, Config, UsbDevice};
use static_cell::StaticCell;

use crate::config;
use crate::error::Error;
use crate::report::{ReportState, KEYBOARD_REPORT_DESCRIPTOR, REPORT_SIZE};
use crate::suspend::{wait_suspend_period, SuspendOutcome, WakeRequest};
use crate::WakeSignal;

bind_interrupts!(struct Irqs {
    USBD => embassy_nrf::usb::InterruptHandler<peripherals::USBD>;
    CLOCK_POWER => embassy_nrf::usb::vbus_detect::InterruptHandler;
});

type UsbDriver = Driver<'static, peripherals::USBD, HardwareVbusDetect>;

static KB_STATE: StaticCell<State> = StaticCell::new();
static USB_CONFIG_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_BOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_MSOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_CTRL_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static USB_BUS_HANDLER: StaticCell<UsbBusHandler> = StaticCell::new();

/// Set from the bus handler when the host suspends the link; read (never
/// written) by the button handlers.
static SUSPENDED: AtomicBool = AtomicBool::new(false);

/// Single-slot request from a button handler to wake the host. Multiple
/// requests before the runner reacts coalesce into one.
static REMOTE_WAKEUP: WakeRequest = WakeRequest::new();

/// Whether the host currently has the bus suspended.
pub fn bus_suspended() -> bool {
    SUSPENDED.load(Ordering::Relaxed)
}

/// Ask the USB runner to issue a remote-wakeup request to the host.
pub fn request_remote_wakeup() {
    REMOTE_WAKEUP.signal(());
}

/// Tracks bus-level state changes delivered by the USB stack.
struct UsbBusHandler;

impl embassy_usb::Handler for UsbBusHandler {
    fn enabled(&mut self, enabled: bool) {
        SUSPENDED.store(false, Ordering::Relaxed);
        info!("USB bus {}", if enabled { "enabled" } else { "disabled" });
    }

    fn reset(&mut self) {
        SUSPENDED.store(false, Ordering::Relaxed);
        info!("USB bus reset");
    }

    fn configured(&mut self, configured: bool) {
        if configured {
            info!("USB device configured by host");
        }
    }

    fn suspended(&mut self, suspended: bool) {
        SUSPENDED.store(suspended, Ordering::Relaxed);
        info!("USB bus {}", if suspended { "suspended" } else { "resumed" });
    }
}

/// Build result containing the USB device runner and the HID writer.
pub struct KeypadUsb {
    pub device: UsbDevice<'static, UsbDriver>,
    pub keyboard_writer: HidWriter<'static, UsbDriver, REPORT_SIZE>,
}

/// Initialise the USB stack and create the keyboard HID device.
///
/// Must be called exactly once.  All static buffers are consumed here.
pub fn init(usbd: peripherals::USBD) -> KeypadUsb {
    // Create the low-level USB driver with hardware VBUS detection.
    let driver = Driver::new(usbd, Irqs, HardwareVbusDetect::new(Irqs));

    // USB device-level configuration.
    let mut usb_config = Config::new(config::USB_VID, config::USB_PID);
    usb_config.manufacturer = Some(config::USB_MANUFACTURER);
    usb_config.product = Some(config::USB_PRODUCT);
    usb_config.serial_number = Some(config::USB_SERIAL_NUMBER);
    usb_config.max_power = 100; // mA
    usb_config.max_packet_size_0 = 64;
    usb_config.supports_remote_wakeup = true;

    // Allocate static descriptor buffers.
    let config_desc = USB_CONFIG_DESC.init([0u8; 256]);
    let bos_desc = USB_BOS_DESC.init([0u8; 256]);
    let msos_desc = USB_MSOS_DESC.init([0u8; 256]);
    let ctrl_buf = USB_CTRL_BUF.init([0u8; 64]);

    // Build the USB device.
    let mut builder = Builder::new(
        driver,
        usb_config,
        config_desc,
        bos_desc,
        msos_desc,
        ctrl_buf,
    );

    let bus_handler = USB_BUS_HANDLER.init(UsbBusHandler);
    builder.handler(bus_handler);

    let kb_state = KB_STATE.init(State::new());
    let kb_config = HidConfig {
        report_descriptor: KEYBOARD_REPORT_DESCRIPTOR,
        request_handler: None,
        poll_ms: config::USB_HID_POLL_MS,
        max_packet_size: 8,
    };
    let keyboard_writer = HidWriter::new(&mut builder, kb_state, kb_config);

    let device = builder.build();

    info!("USB HID keyboard device initialised");

    KeypadUsb {
        device,
        keyboard_writer,
    }
}

/// Run the USB device stack - must be spawned as a dedicated Embassy task.
///
/// This handles USB enumeration, endpoint servicing, and suspend/resume.
/// While suspended it races host resume against a remote-wakeup request
/// from a button handler; a refused wakeup is logged and waits for the
/// host instead.
#[embassy_executor::task]
pub async fn run_usb_device(mut device: UsbDevice<'static, UsbDriver>) {
    info!("USB device task started");
    loop {
        device.run_until_suspend().await;
        match wait_suspend_period(device.wait_resume(), &REMOTE_WAKEUP).await {
            SuspendOutcome::HostResumed => {}
            SuspendOutcome::WakeupRequested => {
                if device.remote_wakeup().await.is_err() {
                    warn!("{}", Error::RemoteWakeup);
                }
            }
        }
    }
}

/// Report dispatcher - the transmit side of the pipeline.
///
/// Waits on the wake signal with no timeout, copies the current report
/// state into a fresh outgoing report, writes it to the HID IN endpoint,
/// and toggles the feedback LED after every attempt. Write failures are
/// logged and skipped; the loop never exits.
#[embassy_executor::task]
pub async fn report_dispatcher_task(
    mut writer: HidWriter<'static, UsbDriver, REPORT_SIZE>,
    mut led: Output<'static>,
    state: &'static ReportState,
    wake: &'static WakeSignal,
) {
    info!("report dispatcher started - waiting for key changes");

    loop {
        wake.wait().await;

        let report = state.compose();
        if writer.write(&report).await.is_err() {
            warn!("{}", Error::UsbWrite);
        }

        // Toggle LED on sent report.
        led.toggle();
    }
}
