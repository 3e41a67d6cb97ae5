//! Unified error type for rich-keypad.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging.
//!
//! None of these are fatal: a failed pin read or report write is logged
//! and the pipeline simply waits for the next edge or wake. Only
//! initialization faults abort the process, and those panic before the
//! main loop starts.

use defmt::Format;

/// Top-level error type used across the firmware.
#[derive(Debug, Clone, Copy, Format)]
pub enum Error {
    /// Reading a button's GPIO level failed.
    PinRead,

    /// The HID IN endpoint rejected a report write.
    UsbWrite,

    /// The remote-wakeup request was refused by the USB stack.
    RemoteWakeup,
}
