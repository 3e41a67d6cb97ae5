//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, USB identity, and protocol constants
//! live here so they can be tuned in one place.

// USB

/// USB VID/PID - use the "pid.codes" open-source test VID.
/// Replace with your own allocated VID/PID for production.
pub const USB_VID: u16 = 0x1209;
pub const USB_PID: u16 = 0x0004;

/// USB device strings.
pub const USB_MANUFACTURER: &str = "Rich Effects";
pub const USB_PRODUCT: &str = "RICH 4-Key Keypad";
pub const USB_SERIAL_NUMBER: &str = "000001";

/// USB HID polling interval (ms).
pub const USB_HID_POLL_MS: u8 = 10;

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; actual `embassy_nrf::peripherals::*` types are
// selected in `main.rs`.  Adjust for your custom PCB.
//
//   Button 1 (key R) → P0.11
//   Button 2 (key I) → P0.12
//   Button 3 (key C) → P0.24
//   Button 4 (key H) → P0.25
//   Feedback LED     → P0.13 (LED1, toggled on every sent report)
