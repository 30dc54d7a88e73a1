//! Debounced "does this email already have an account?" lookup.
//!
//! Every call takes a new generation number. A call whose generation has been
//! overtaken by a later call, either during the debounce delay or while its
//! request was in flight, reports [`ProbeOutcome::Superseded`] so the caller
//! never applies a stale answer.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use pricebook_core::account::AccountView;

use crate::api::PricebookApi;

/// Delay between the last keystroke and the lookup.
pub const DEFAULT_PROBE_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq)]
pub enum ProbeOutcome {
    /// The email belongs to an account; the form switches to update mode.
    Existing(AccountView),
    /// No account (or not an email yet); the form creates a new one.
    NewAccount,
    /// A newer probe started; discard this result.
    Superseded,
}

#[derive(Debug)]
pub struct AccountProbe {
    delay: Duration,
    generation: AtomicU64,
}

impl Default for AccountProbe {
    fn default() -> Self {
        Self::new(DEFAULT_PROBE_DELAY)
    }
}

impl AccountProbe {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: AtomicU64::new(0),
        }
    }

    /// Probe `email` after the debounce delay.
    ///
    /// Input without `@` resolves to [`ProbeOutcome::NewAccount`] at once,
    /// without a request. A 404 is the normal "no account" answer; other
    /// failures are logged and also treated as "no account".
    pub async fn probe(&self, api: &dyn PricebookApi, email: &str) -> ProbeOutcome {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let email = email.trim();

        if !email.contains('@') {
            return self.settle(generation, ProbeOutcome::NewAccount);
        }

        tokio::time::sleep(self.delay).await;
        if !self.is_current(generation) {
            return ProbeOutcome::Superseded;
        }

        let outcome = match api.get_special_prices(email).await {
            Ok(view) => ProbeOutcome::Existing(view),
            Err(e) if e.is_not_found() => ProbeOutcome::NewAccount,
            Err(e) => {
                tracing::warn!(error = %e, email, "Account probe failed");
                ProbeOutcome::NewAccount
            }
        };
        self.settle(generation, outcome)
    }

    /// Invalidate any probe still in flight.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    fn settle(&self, generation: u64, outcome: ProbeOutcome) -> ProbeOutcome {
        if self.is_current(generation) {
            outcome
        } else {
            ProbeOutcome::Superseded
        }
    }
}
