//! Scan progress notifications.
//!
//! The dispatcher reports every completed task to a [`ScanObserver`]. How
//! (or whether) that is shown to the user is up to the implementation.

use crate::probe::Protocol;
use crate::types::ProbeResult;

/// Receives progress events from the dispatcher.
///
/// Events are delivered from the single collecting loop, one at a time, in
/// completion order. Every method has an empty default.
pub trait ScanObserver: Send {
    /// Called once before any task is submitted.
    fn on_start(&mut self, _total: usize, _protocol: Protocol) {}

    /// Called once per completed task, with `completed` counting up from 1.
    fn on_progress(&mut self, _completed: usize, _total: usize) {}

    /// Called when a completed task produced a result.
    fn on_found(&mut self, _result: &ProbeResult) {}

    /// Called once after the last completion.
    fn on_finish(&mut self, _found: usize, _completed: usize) {}
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentObserver;

impl ScanObserver for SilentObserver {}
