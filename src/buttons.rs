//! GPIO button input with edge-triggered key-code publishing.
//!
//! Four physical buttons (active-low with internal pull-up), one task per
//! button, all running the same generic edge handler. Each task:
//!
//!   1. captures the pin's idle level once, before edges are armed,
//!   2. waits for any edge (rising or falling),
//!   3. while the USB bus is suspended, requests remote wakeup instead,
//!   4. otherwise re-reads the level, maps it to a key code, and publishes
//!      it to the shared report state,
//!   5. raises the wake signal only when the published byte changed.
//!
//! There is no timer in this debounce: re-reading an already-reflected
//! level publishes nothing, so bursts of bouncy edges collapse into a
//! single dispatcher wake.

use defmt::{debug, info, warn};
use embassy_nrf::gpio::{AnyPin, Input, Pull};
use embedded_hal::digital::InputPin;
use embedded_hal_async::digital::Wait;

use crate::error::Error;
use crate::mapper::{EdgeAction, KeyMapper};
use crate::report::ReportState;
use crate::usb::hid_device;
use crate::WakeSignal;

/// What a single edge invocation did.
enum EdgeOutcome {
    /// Bus was suspended; a host wakeup was requested, nothing published.
    WakeRequested,
    /// A new key code was written to the report state.
    Published(u8),
    /// The read level was already reflected; no write, no wake.
    Unchanged,
}

/// Handle one edge on one button.
///
/// Errors are per-invocation: the caller logs them and keeps waiting for
/// the next edge. Must not block beyond the edge wait itself.
async fn handle_edge<P>(
    mapper: &mut KeyMapper<P>,
    state: &ReportState,
) -> Result<EdgeOutcome, Error>
where
    P: InputPin + Wait,
{
    mapper.wait_for_edge().await.map_err(|_| Error::PinRead)?;

    match mapper
        .on_edge(hid_device::bus_suspended())
        .map_err(|_| Error::PinRead)?
    {
        EdgeAction::RequestWake => {
            hid_device::request_remote_wakeup();
            Ok(EdgeOutcome::WakeRequested)
        }
        EdgeAction::Publish(code) => {
            if state.publish(code) {
                Ok(EdgeOutcome::Published(code))
            } else {
                Ok(EdgeOutcome::Unchanged)
            }
        }
    }
}

/// Run a single button's edge loop forever.
#[embassy_executor::task(pool_size = 4)]
pub async fn button_task(
    pin: AnyPin,
    key: u8,
    state: &'static ReportState,
    wake: &'static WakeSignal,
) {
    let input = Input::new(pin, Pull::Up);
    let mut mapper = match KeyMapper::bind(input, key) {
        Ok(m) => m,
        // Fatal: without a captured baseline the first edge would be
        // evaluated against an undefined reference.
        Err(_) => defmt::panic!("failed to capture baseline for key {:02x}", key),
    };
    info!("key {:02x}: armed, baseline level {}", key, mapper.baseline());

    loop {
        match handle_edge(&mut mapper, state).await {
            Ok(EdgeOutcome::Published(code)) => {
                wake.signal(());
                debug!("key {:02x}: published {:02x}", key, code);
            }
            Ok(EdgeOutcome::WakeRequested) => {
                debug!("key {:02x}: bus suspended, host wakeup requested", key);
            }
            Ok(EdgeOutcome::Unchanged) => {}
            Err(e) => warn!("key {:02x}: {}", key, e),
        }
    }
}
