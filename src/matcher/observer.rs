use log::info;

use super::types::CloseCall;

/// Where a raw key ended up during grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assignment<'a> {
    NewCluster,
    Absorbed { representative: &'a str },
}

/// Receives events from a grouping pass as they happen. Both hooks default to
/// doing nothing.
pub trait GroupingObserver {
    fn on_close_call(&mut self, _event: &CloseCall) {}

    fn on_key_assigned(&mut self, _key: &str, _assignment: Assignment<'_>) {}
}

/// Ignores every event.
impl GroupingObserver for () {}

/// Keeps every close call for the caller.
#[derive(Debug, Default)]
pub struct CloseCallCollector {
    pub events: Vec<CloseCall>,
}

impl CloseCallCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_events(self) -> Vec<CloseCall> {
        self.events
    }
}

impl GroupingObserver for CloseCallCollector {
    fn on_close_call(&mut self, event: &CloseCall) {
        self.events.push(event.clone());
    }
}

/// Writes close calls to the `log` facade at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl GroupingObserver for LogObserver {
    fn on_close_call(&mut self, event: &CloseCall) {
        info!("{}", event);
    }
}
