use crate::core::{
    AddressLookupResult, AutofillOutcome, DirectoryClient, FormPort, NoOpReason, StalePolicy,
};
use crate::utils::error::AutofillError;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;

pub const DEFAULT_MIN_LENGTH: usize = 6;

/// 郵遞區號自動填入地址
///
/// Each input event on the pincode field goes through [`handle_input`]. Once
/// the value is long enough a lookup is spawned on the runtime; the caller is
/// never blocked. There is no debounce and no cancellation, so several
/// lookups can be in flight at once and they may complete in any order.
///
/// [`handle_input`]: AddressAutofillResolver::handle_input
pub struct AddressAutofillResolver<D: DirectoryClient, F: FormPort> {
    directory: D,
    form: F,
    min_length: usize,
    policy: StalePolicy,
    generation: AtomicU64,
}

impl<D: DirectoryClient, F: FormPort> AddressAutofillResolver<D, F> {
    pub fn new(directory: D, form: F) -> Self {
        Self {
            directory,
            form,
            min_length: DEFAULT_MIN_LENGTH,
            policy: StalePolicy::default(),
            generation: AtomicU64::new(0),
        }
    }

    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    pub fn with_stale_policy(mut self, policy: StalePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn stale_policy(&self) -> StalePolicy {
        self.policy
    }

    /// 輸入長度是否達到查詢門檻
    ///
    /// Length is measured in UTF-16 code units, the way the browser reports
    /// an input's value length.
    pub fn should_lookup(&self, value: &str) -> bool {
        value.encode_utf16().count() >= self.min_length
    }

    /// Number of lookups issued so far.
    pub fn issued(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Looks up `pincode` and writes the first match into the form.
    ///
    /// The value is sent as-is, without any length or digit check. Every
    /// failure collapses into [`AutofillOutcome::NoOp`] and is only logged.
    pub async fn lookup(&self, pincode: &str) -> AutofillOutcome {
        let generation = self.next_generation();
        self.resolve(pincode, generation).await
    }

    async fn resolve(&self, pincode: &str, generation: u64) -> AutofillOutcome {
        tracing::debug!("📮 Lookup #{} for pincode '{}'", generation, pincode);

        let response = match self.directory.search(pincode).await {
            Ok(response) => response,
            Err(e) => {
                let reason = no_op_reason(&e);
                tracing::error!("❌ Error searching pincode '{}': {}", pincode, e);
                return AutofillOutcome::NoOp(reason);
            }
        };

        if !response.success {
            tracing::warn!(
                "⚠️ Directory lookup for '{}' unsuccessful: {}",
                pincode,
                response.message.as_deref().unwrap_or("no message")
            );
            return AutofillOutcome::NoOp(NoOpReason::Unsuccessful {
                message: response.message,
            });
        }

        let total = response.results.len();
        let Some(first) = response.results.into_iter().next() else {
            tracing::warn!("⚠️ Directory returned no results for '{}'", pincode);
            return AutofillOutcome::NoOp(NoOpReason::EmptyResults);
        };
        if total > 1 {
            tracing::debug!("📮 {} matches for '{}', using the first", total, pincode);
        }

        if self.policy == StalePolicy::LatestOnly {
            let latest = self.generation.load(Ordering::SeqCst);
            if generation != latest {
                tracing::debug!(
                    "⏭️ Dropping stale response #{} for '{}' (latest is #{})",
                    generation,
                    pincode,
                    latest
                );
                return AutofillOutcome::Discarded(first);
            }
        }

        self.apply(pincode, first)
    }

    fn apply(&self, pincode: &str, result: AddressLookupResult) -> AutofillOutcome {
        match self.form.write_fields(&result.form_values()) {
            Ok(()) => {
                tracing::info!(
                    "✅ Autofilled '{}': {}, {}, {}",
                    pincode,
                    result.society,
                    result.city,
                    result.state
                );
                AutofillOutcome::Applied(result)
            }
            Err(e) => {
                tracing::error!("❌ Could not write address for '{}': {}", pincode, e);
                AutofillOutcome::NoOp(NoOpReason::Form(e.to_string()))
            }
        }
    }
}

impl<D, F> AddressAutofillResolver<D, F>
where
    D: DirectoryClient + 'static,
    F: FormPort + 'static,
{
    /// Input-event entry point for the pincode field.
    ///
    /// Values shorter than the minimum length are ignored without a request
    /// and without touching the form. Otherwise the lookup runs as its own
    /// task and the returned handle resolves to its outcome.
    pub fn handle_input(self: &Arc<Self>, value: &str) -> Option<JoinHandle<AutofillOutcome>> {
        if !self.should_lookup(value) {
            tracing::trace!("Pincode input '{}' below {} characters", value, self.min_length);
            return None;
        }

        let generation = self.next_generation();
        let resolver = Arc::clone(self);
        let pincode = value.to_string();
        Some(tokio::spawn(async move {
            resolver.resolve(&pincode, generation).await
        }))
    }
}

fn no_op_reason(error: &AutofillError) -> NoOpReason {
    match error {
        AutofillError::StatusError { status, .. } => NoOpReason::Status(*status),
        AutofillError::SerializationError(e) => NoOpReason::Decode(e.to_string()),
        AutofillError::HttpError(e) if e.is_decode() => NoOpReason::Decode(e.to_string()),
        AutofillError::HttpError(e) => match e.status() {
            Some(status) => NoOpReason::Status(status.as_u16()),
            None => NoOpReason::Transport(e.to_string()),
        },
        other => NoOpReason::Transport(other.to_string()),
    }
}
