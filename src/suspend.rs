//! Suspend-period policy for the USB runner.
//!
//! While the host has the bus suspended, the runner waits for whichever
//! comes first: the host's own resume, or a remote-wakeup request from a
//! button handler. Requests are a single-slot [`Signal`], so any number
//! raised during one suspend period coalesce into one.
//!
//! A request that loses the race to the host's resume is discarded here;
//! letting it latch would answer the *next* suspend with a stale wakeup.

use core::future::Future;

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

/// Coalescing remote-wakeup request from the button handlers.
pub type WakeRequest = Signal<CriticalSectionRawMutex, ()>;

/// How one suspend period ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuspendOutcome {
    /// The host resumed the bus on its own.
    HostResumed,
    /// A button asked for remote wakeup; the caller should issue it.
    WakeupRequested,
}

/// Wait out one suspend period.
///
/// `resume` is the host-resume future (its output is ignored). Each wake
/// request is confined to its own suspend period: on host resume any
/// pending request is cleared before returning.
pub async fn wait_suspend_period<F: Future>(
    resume: F,
    wake_request: &WakeRequest,
) -> SuspendOutcome {
    match select(resume, wake_request.wait()).await {
        Either::First(_) => {
            wake_request.reset();
            SuspendOutcome::HostResumed
        }
        Either::Second(()) => SuspendOutcome::WakeupRequested,
    }
}
