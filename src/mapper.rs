//! Debounced key mapper - turns GPIO edges on one button into key codes.
//!
//! One [`KeyMapper`] instance is bound per physical button. It captures the
//! pin's idle level (the *baseline*) exactly once, before the first edge
//! wait arms the interrupt, and from then on decides the key code by
//! comparing a fresh level read against that baseline. The edge direction
//! reported by the hardware is never trusted: both edges are subscribed,
//! so the handler always re-reads the pin itself.
//!
//! Generic over [`embedded_hal::digital::InputPin`] so the decision logic
//! runs in host tests against a fake pin, including the read-failure path.

use embedded_hal::digital::InputPin;
use embedded_hal_async::digital::Wait;

use crate::report::KEY_NONE;

/// Key code for a freshly read level.
///
/// Differs from the baseline → the assigned key; matches it → no key.
pub fn keycode_for_level(baseline: bool, level: bool, key: u8) -> u8 {
    if level != baseline {
        key
    } else {
        KEY_NONE
    }
}

/// Decision for one edge notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeAction {
    /// Host link is suspended: request remote wakeup, publish nothing.
    RequestWake,
    /// Publish this key code to the report state.
    Publish(u8),
}

/// One button bound to one input pin and one key code.
pub struct KeyMapper<P> {
    pin: P,
    baseline: bool,
    key: u8,
}

impl<P: InputPin> KeyMapper<P> {
    /// Bind a pin to a key code, capturing the baseline level.
    ///
    /// Must be called before the first [`wait_for_edge`](Self::wait_for_edge)
    /// so the first edge is evaluated against a known reference. A failed
    /// read here is an initialization fault, not a transient one.
    pub fn bind(mut pin: P, key: u8) -> Result<Self, P::Error> {
        let baseline = pin.is_high()?;
        Ok(Self { pin, baseline, key })
    }

    /// The assigned key code.
    pub fn key(&self) -> u8 {
        self.key
    }

    /// The captured idle level (`true` = high).
    pub fn baseline(&self) -> bool {
        self.baseline
    }

    /// Re-read the pin and decide the key code for the current level.
    ///
    /// A failed read aborts this invocation only; the caller logs it and
    /// publishes nothing.
    pub fn evaluate(&mut self) -> Result<u8, P::Error> {
        let level = self.pin.is_high()?;
        Ok(keycode_for_level(self.baseline, level, self.key))
    }

    /// Decide what this edge should do.
    ///
    /// While the host link is suspended a wake request takes priority over
    /// reporting: the pin is not read at all and nothing is published.
    /// Otherwise this is [`evaluate`](Self::evaluate).
    pub fn on_edge(&mut self, suspended: bool) -> Result<EdgeAction, P::Error> {
        if suspended {
            return Ok(EdgeAction::RequestWake);
        }
        Ok(EdgeAction::Publish(self.evaluate()?))
    }

    /// Direct pin access, mainly for tests that flip a fake pin's level.
    pub fn pin_mut(&mut self) -> &mut P {
        &mut self.pin
    }
}

impl<P: InputPin + Wait> KeyMapper<P> {
    /// Suspend until the pin sees any edge (rising or falling).
    pub async fn wait_for_edge(&mut self) -> Result<(), P::Error> {
        self.pin.wait_for_any_edge().await
    }
}
