use tui_textarea::Input;

use super::Availability;
use super::ExchangeFailure;
use super::SessionReply;

/// Settlements produced by tasks the conversation store spawns. They carry
/// the store generation current at spawn time.
#[derive(Debug)]
pub enum StoreEvent {
    ResponseSettled {
        generation: u64,
        outcome: Result<SessionReply, ExchangeFailure>,
    },
    AvailabilityChecked {
        generation: u64,
        availability: Availability,
    },
}

pub enum Event {
    KeyboardCharInput(Input),
    KeyboardCTRLC(),
    KeyboardCTRLL(),
    KeyboardEnter(),
    KeyboardEsc(),
    KeyboardPaste(String),
    KeyboardTab(),
    Store(StoreEvent),
    UIResize(),
    UIScrollDown(),
    UIScrollUp(),
    UIScrollPageDown(),
    UIScrollPageUp(),
    UITick(),
}
