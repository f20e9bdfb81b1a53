//! Single-flight scheduler for legacy calculator calls.
//!
//! The legacy kernel is a blocking, non-reentrant native computation: no
//! two calls may proceed in parallel on the same instance. The scheduler
//! yields to the executor before and after every call so other in-flight
//! requests make progress around it, and serialises the calls themselves
//! through an async mutex. The exclusivity guard is released on both the
//! success and cancellation paths: a dropped future drops the guard.

use std::future::Future;

use tokio::sync::Mutex;

/// Serialises calculator calls and yields around them.
#[derive(Default)]
pub struct CalculatorScheduler {
    gate: Mutex<()>,
}

impl CalculatorScheduler {
    pub fn new() -> Self {
        Self { gate: Mutex::new(()) }
    }

    /// Run one calculator call under the single-flight gate.
    ///
    /// Yields before acquiring the gate and after releasing it; the
    /// trailing yield runs whether the call succeeded or returned an error
    /// value. If the caller abandons the request, the in-flight call's
    /// guard is released when the future is dropped.
    pub async fn run<F, T>(&self, call: F) -> T
    where
        F: Future<Output = T>,
    {
        tokio::task::yield_now().await;
        let guard = self.gate.lock().await;
        let outcome = call.await;
        drop(guard);
        tokio::task::yield_now().await;
        outcome
    }
}
