// crates/sparkwell-core/src/runtime/observer.rs
// ============================================================================
// Module: Sparkwell JSON Line Observer
// Description: Observer that writes one JSON record per contract event.
// Purpose: Provide audit-grade invocation logs without a logging framework.
// Dependencies: crate::interfaces, serde_json, std
// ============================================================================

//! ## Overview
//! [`JsonLineObserver`] serializes each [`ContractEvent`] as a single JSON
//! line. Write failures are counted and otherwise ignored so that logging can
//! never fail an invocation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::sync::Mutex;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use crate::interfaces::ContractEvent;
use crate::interfaces::ContractObserver;

// ============================================================================
// SECTION: JSON Line Observer
// ============================================================================

/// Observer writing JSON lines to a writer.
pub struct JsonLineObserver<W: Write + Send> {
    /// Output writer for event records.
    writer: Mutex<W>,
    /// Number of records that could not be written.
    dropped: AtomicU64,
}

impl<W: Write + Send> JsonLineObserver<W> {
    /// Creates an observer over the writer.
    pub const fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            dropped: AtomicU64::new(0),
        }
    }

    /// Returns the number of records that failed to write.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Consumes the observer, returning the writer.
    ///
    /// # Errors
    ///
    /// Returns the writer's mutex poison error when a writer panicked.
    pub fn into_inner(self) -> Result<W, std::sync::PoisonError<W>> {
        self.writer.into_inner()
    }

    /// Writes one record, reporting failure.
    fn write_record(&self, event: &ContractEvent) -> Result<(), ()> {
        let mut guard = self.writer.lock().map_err(|_| ())?;
        serde_json::to_writer(&mut *guard, event).map_err(|_| ())?;
        guard.write_all(b"\n").map_err(|_| ())?;
        drop(guard);
        Ok(())
    }
}

impl<W: Write + Send> ContractObserver for JsonLineObserver<W> {
    fn record(&self, event: &ContractEvent) {
        if self.write_record(event).is_err() {
            self.dropped.fetch_add(1, Ordering::Relaxed);
        }
    }
}
