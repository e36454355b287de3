//! Ctrl-C handling for a running scan.
//!
//! The first interrupt during a scan asks the dispatcher to stop after the
//! current batch. A second interrupt, or any interrupt while no scan is
//! running, means the user wants out now.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// What the caller should do after an interrupt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptAction {
    /// The running scan was asked to wind down.
    Drain,
    /// Terminate the process.
    Exit,
}

/// Tracks whether a scan is running and owns its cancel flag.
#[derive(Debug, Default)]
pub struct Interrupt {
    scanning: AtomicBool,
    cancel: Arc<AtomicBool>,
}

impl Interrupt {
    pub fn new() -> Self {
        Self::default()
    }

    /// The flag handed to [`super::ScanJob::with_cancel_flag`].
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Mark a scan as started with a clear cancel flag.
    pub fn begin_scan(&self) {
        self.cancel.store(false, Ordering::SeqCst);
        self.scanning.store(true, Ordering::SeqCst);
    }

    /// Mark the scan as finished.
    pub fn end_scan(&self) {
        self.scanning.store(false, Ordering::SeqCst);
    }

    /// Record one interrupt.
    pub fn interrupt(&self) -> InterruptAction {
        if !self.scanning.load(Ordering::SeqCst) {
            return InterruptAction::Exit;
        }
        if self.cancel.swap(true, Ordering::SeqCst) {
            InterruptAction::Exit
        } else {
            InterruptAction::Drain
        }
    }
}
