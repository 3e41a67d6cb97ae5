//! Shared HID keyboard report state (boot protocol compatible).
//!
//! Layout of the 8-byte input report:
//! ```text
//! Byte 0: Modifier keys (bitfield, always 0x00 for this keypad)
//! Byte 1: Reserved (0x00)
//! Byte 2: First of the six key code slots (always 0x00 here; the
//!         original firmware's position macros label this offset "LED",
//!         but in the input report it is a key slot - host-visible LED
//!         state travels in the separate output report)
//! Byte 3-6: Further key code slots (always 0x00 here)
//! Byte 7: The one key code slot this keypad actually drives
//! ```
//!
//! Only [`KEYCODE_POS`] is ever mutated. Up to four key mappers write it
//! (one at a time; GPIO interrupts are serialized on this single-core
//! target) and the report dispatcher reads it, so a single atomic byte is
//! sufficient - there is no multi-field consistency to protect.

use core::sync::atomic::{AtomicU8, Ordering};

/// Keyboard report size in bytes.
pub const REPORT_SIZE: usize = 8;

/// Byte position of the modifier bitfield.
pub const MODIFIER_POS: usize = 0;

/// Byte position the original firmware's macros call the LED slot.
/// In the input report this is the first key code slot; always 0 here.
pub const LED_POS: usize = 2;

/// Byte position of the key code this keypad drives.
pub const KEYCODE_POS: usize = 7;

// USB HID usage IDs (keyboard/keypad page) for the four keys.

/// "No key pressed" sentinel.
pub const KEY_NONE: u8 = 0x00;
/// Letter `C`.
pub const KEY_C: u8 = 0x06;
/// Letter `H`.
pub const KEY_H: u8 = 0x0B;
/// Letter `I`.
pub const KEY_I: u8 = 0x0C;
/// Letter `R`.
pub const KEY_R: u8 = 0x15;

/// Latest key code pending transmission, shared between the per-button
/// mappers (writers) and the report dispatcher (reader).
///
/// `publish` only stores a value that differs from the current one and
/// reports whether it did; callers raise the wake signal exactly when it
/// returns `true`. Writes from overlapping button edges are last-write-wins
/// at byte granularity - this keypad does not report chords.
pub struct ReportState {
    keycode: AtomicU8,
}

impl ReportState {
    /// Create an empty state (no key pressed).
    pub const fn new() -> Self {
        Self {
            keycode: AtomicU8::new(KEY_NONE),
        }
    }

    /// Currently published key code.
    pub fn keycode(&self) -> u8 {
        self.keycode.load(Ordering::Acquire)
    }

    /// Publish a new key code.
    ///
    /// Returns `true` if the stored byte changed, `false` if `code` was
    /// already reflected. Re-publishing the current value is a no-op, which
    /// is what keeps bouncy edges from waking the dispatcher.
    pub fn publish(&self, code: u8) -> bool {
        if self.keycode.load(Ordering::Relaxed) == code {
            return false;
        }
        self.keycode.store(code, Ordering::Release);
        true
    }

    /// Compose a fresh outgoing report from the current state.
    ///
    /// All bytes are zero except the key code slot; the copy shares no
    /// ownership with the state afterwards.
    pub fn compose(&self) -> [u8; REPORT_SIZE] {
        let mut report = [0u8; REPORT_SIZE];
        report[KEYCODE_POS] = self.keycode();
        report
    }
}

impl Default for ReportState {
    fn default() -> Self {
        Self::new()
    }
}

// USB HID report descriptor for a boot-protocol keyboard

/// USB HID Report Descriptor for a standard keyboard.
///
/// Matches the 8-byte input report above:
///   - 8 modifier key bits (input)
///   - 1 reserved byte
///   - 5 LED indicators (output)
///   - 6 key code bytes (input)
pub const KEYBOARD_REPORT_DESCRIPTOR: &[u8] = &[
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x06, // Usage (Keyboard)
    0xA1, 0x01, // Collection (Application)
    //
    //   - Modifier keys (8 bits) -
    0x05, 0x07, //   Usage Page (Keyboard/Keypad)
    0x19, 0xE0, //   Usage Minimum (Left Control)
    0x29, 0xE7, //   Usage Maximum (Right GUI)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x01, //   Logical Maximum (1)
    0x75, 0x01, //   Report Size (1)
    0x95, 0x08, //   Report Count (8)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    //   - Reserved byte -
    0x95, 0x01, //   Report Count (1)
    0x75, 0x08, //   Report Size (8)
    0x81, 0x01, //   Input (Constant) - padding
    //
    //   - LED output (5 bits + 3 padding) -
    0x05, 0x08, //   Usage Page (LEDs)
    0x19, 0x01, //   Usage Minimum (Num Lock)
    0x29, 0x05, //   Usage Maximum (Kana)
    0x95, 0x05, //   Report Count (5)
    0x75, 0x01, //   Report Size (1)
    0x91, 0x02, //   Output (Data, Variable, Absolute)
    0x95, 0x01, //   Report Count (1)
    0x75, 0x03, //   Report Size (3)
    0x91, 0x01, //   Output (Constant) - padding
    //
    //   - Key codes (6 bytes) -
    0x05, 0x07, //   Usage Page (Keyboard/Keypad)
    0x19, 0x00, //   Usage Minimum (0)
    0x29, 0xFF, //   Usage Maximum (255)
    0x15, 0x00, //   Logical Minimum (0)
    0x26, 0xFF, 0x00, // Logical Maximum (255)
    0x95, 0x06, //   Report Count (6)
    0x75, 0x08, //   Report Size (8)
    0x81, 0x00, //   Input (Data, Array)
    //
    0xC0, // End Collection
];
