//! Integration tests for rich-keypad host-testable logic.
//!
//! Drives the mapper → report-state pipeline the way the firmware tasks
//! do, counting publishes as dispatcher wakes.

use embedded_hal::digital::{Error, ErrorKind, ErrorType, InputPin};
use rich_keypad::mapper::{EdgeAction, KeyMapper};
use rich_keypad::report::{ReportState, KEY_I, KEY_NONE, KEY_R};

/// Fake input pin with a settable level and an injectable read fault.
struct FakePin {
    level: bool,
    fail: bool,
}

#[derive(Debug)]
struct FakePinError;

impl Error for FakePinError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

impl ErrorType for FakePin {
    type Error = FakePinError;
}

impl InputPin for FakePin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        if self.fail {
            Err(FakePinError)
        } else {
            Ok(self.level)
        }
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|h| !h)
    }
}

/// One edge invocation: re-read the level and publish the decision.
/// Returns `Ok(true)` when the dispatcher would have been woken.
fn on_edge(mapper: &mut KeyMapper<FakePin>, state: &ReportState) -> Result<bool, FakePinError> {
    let code = mapper.evaluate()?;
    Ok(state.publish(code))
}

#[test]
fn press_then_release_sends_two_reports() {
    let state = ReportState::new();
    let pin = FakePin {
        level: true,
        fail: false,
    };
    let mut mapper = KeyMapper::bind(pin, KEY_R).unwrap();

    // Press: level diverges from baseline → "R" report, one wake.
    mapper.pin_mut().level = false;
    assert!(on_edge(&mut mapper, &state).unwrap());
    assert_eq!(state.compose(), [0, 0, 0, 0, 0, 0, 0, KEY_R]);

    // Release: level returns to baseline → all-zero report, one wake.
    mapper.pin_mut().level = true;
    assert!(on_edge(&mut mapper, &state).unwrap());
    assert_eq!(state.compose(), [0u8; 8]);
}

#[test]
fn bounce_storm_wakes_dispatcher_once() {
    let state = ReportState::new();
    let pin = FakePin {
        level: true,
        fail: false,
    };
    let mut mapper = KeyMapper::bind(pin, KEY_R).unwrap();

    mapper.pin_mut().level = false;
    let wakes = (0..10)
        .filter(|_| on_edge(&mut mapper, &state).unwrap())
        .count();
    assert_eq!(wakes, 1);
}

#[test]
fn two_buttons_in_one_window_last_edge_wins() {
    let state = ReportState::new();
    let mut btn1 = KeyMapper::bind(
        FakePin {
            level: true,
            fail: false,
        },
        KEY_R,
    )
    .unwrap();
    let mut btn2 = KeyMapper::bind(
        FakePin {
            level: true,
            fail: false,
        },
        KEY_I,
    )
    .unwrap();

    // Both buttons go down before the dispatcher gets to compose: the
    // single keycode byte holds only the most recent write.
    btn1.pin_mut().level = false;
    assert!(on_edge(&mut btn1, &state).unwrap());
    btn2.pin_mut().level = false;
    assert!(on_edge(&mut btn2, &state).unwrap());

    assert_eq!(state.compose()[7], KEY_I);

    // Releasing either button maps its own level back to "no key".
    btn1.pin_mut().level = true;
    assert!(on_edge(&mut btn1, &state).unwrap());
    assert_eq!(state.compose()[7], KEY_NONE);
}

#[test]
fn suspended_edge_requests_wakeup_and_sends_nothing() {
    let state = ReportState::new();
    let pin = FakePin {
        level: true,
        fail: false,
    };
    let mut mapper = KeyMapper::bind(pin, KEY_I).unwrap();

    // Press while the host has the bus suspended: the edge becomes a
    // wake request, the report state is untouched, nothing is sent.
    mapper.pin_mut().level = false;
    assert_eq!(mapper.on_edge(true).unwrap(), EdgeAction::RequestWake);
    assert_eq!(state.compose(), [0u8; 8]);

    // After resume the still-held key is reported on its next edge.
    assert!(on_edge(&mut mapper, &state).unwrap());
    assert_eq!(state.compose()[7], KEY_I);
}

#[test]
fn read_fault_leaves_prior_report_valid() {
    let state = ReportState::new();
    let pin = FakePin {
        level: true,
        fail: false,
    };
    let mut mapper = KeyMapper::bind(pin, KEY_R).unwrap();

    mapper.pin_mut().level = false;
    assert!(on_edge(&mut mapper, &state).unwrap());
    assert_eq!(state.compose()[7], KEY_R);

    // A failed level read aborts the invocation: no publish, no wake,
    // and the previously published report stays in effect.
    mapper.pin_mut().fail = true;
    assert!(on_edge(&mut mapper, &state).is_err());
    assert_eq!(state.compose()[7], KEY_R);

    // Recovery on the next successful edge.
    mapper.pin_mut().fail = false;
    mapper.pin_mut().level = true;
    assert!(on_edge(&mut mapper, &state).unwrap());
    assert_eq!(state.compose()[7], KEY_NONE);
}
