//! USB Device subsystem - presents a boot-keyboard HID device to the host.
//!
//! The nRF52840's built-in USB 2.0 Full-Speed controller is driven by
//! `embassy-usb`.  A single HID interface carries the 8-byte keyboard
//! report; bus suspend/resume state is tracked here so the button
//! handlers can request remote wakeup instead of reporting while the
//! host sleeps.

pub mod hid_device;
