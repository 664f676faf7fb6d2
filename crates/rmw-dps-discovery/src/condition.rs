// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Graph-change notification plumbing.
//!
//! The discovery store does not know how downstream consumers wait for graph
//! changes. It only holds a [`GraphNotifier`] handle and calls `trigger()` when
//! an announcement changed the table. Failures are handed to a [`FaultSink`]
//! and never undo the table update.

use crate::error::Result;
use parking_lot::{Condvar, Mutex};
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// External "graph changed" signal.
pub trait GraphNotifier: Send + Sync {
    /// Fire the signal once.
    fn trigger(&self) -> Result<()>;
}

/// Side-channel diagnostics raised by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fault {
    /// The graph notifier refused to fire. The table update still stands.
    NotificationFailed { reason: String },
}

impl Fault {
    /// Stable category identifier.
    #[must_use]
    pub fn category(&self) -> &'static str {
        match self {
            Self::NotificationFailed { .. } => "notification-failed",
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotificationFailed { reason } => write!(f, "{}: {}", self.category(), reason),
        }
    }
}

/// Receiver for [`Fault`]s. Must not block.
pub trait FaultSink: Send + Sync {
    fn report(&self, fault: Fault);
}

/// Default sink: forwards faults to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogFaultSink;

impl FaultSink for LogFaultSink {
    fn report(&self, fault: Fault) {
        match &fault {
            Fault::NotificationFailed { reason } => {
                log::error!("[rmw_dps] failed to trigger guard condition: {}", reason);
            }
        }
    }
}

/// Manually-triggered wake flag.
///
/// Setting the trigger value to `true` wakes every thread blocked in
/// [`GuardCondition::wait`]. The value stays set until a consumer clears it
/// with [`GuardCondition::take_trigger`] or `set_trigger_value(false)`.
pub struct GuardCondition {
    id: u64,
    trigger_value: AtomicBool,
    waiters: Mutex<()>,
    wake: Condvar,
}

impl GuardCondition {
    pub fn new() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1_000_000);
        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);

        Self {
            id,
            trigger_value: AtomicBool::new(false),
            waiters: Mutex::new(()),
            wake: Condvar::new(),
        }
    }

    /// Unique identifier for this condition.
    #[must_use]
    pub fn condition_id(&self) -> u64 {
        self.id
    }

    pub fn set_trigger_value(&self, value: bool) {
        // Store under the waiter lock so a waiter cannot miss the flip
        // between its check and its park.
        let _guard = self.waiters.lock();
        self.trigger_value.store(value, Ordering::Release);
        if value {
            self.wake.notify_all();
        }
    }

    #[must_use]
    pub fn get_trigger_value(&self) -> bool {
        self.trigger_value.load(Ordering::Acquire)
    }

    /// Read and clear the trigger value.
    pub fn take_trigger(&self) -> bool {
        self.trigger_value.swap(false, Ordering::AcqRel)
    }

    /// Block until triggered or until `timeout` elapses (`None` waits forever).
    ///
    /// A timeout too large to represent as a deadline waits forever as well.
    /// Returns the trigger value observed on exit. Does not clear it.
    pub fn wait(&self, timeout: Option<Duration>) -> bool {
        if self.get_trigger_value() {
            return true;
        }

        let deadline = timeout.and_then(|t| Instant::now().checked_add(t));
        let mut guard = self.waiters.lock();

        while !self.get_trigger_value() {
            match deadline {
                Some(deadline) => {
                    if self.wake.wait_until(&mut guard, deadline).timed_out() {
                        break;
                    }
                }
                None => self.wake.wait(&mut guard),
            }
        }

        self.get_trigger_value()
    }
}

impl Default for GuardCondition {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GuardCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuardCondition")
            .field("id", &self.id)
            .field("trigger_value", &self.get_trigger_value())
            .finish()
    }
}

impl GraphNotifier for GuardCondition {
    fn trigger(&self) -> Result<()> {
        self.set_trigger_value(true);
        Ok(())
    }
}
