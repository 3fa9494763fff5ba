//! Process-wide registry.

use std::sync::{Arc, LazyLock};

use super::AxonPayments;

static SHARED: LazyLock<Arc<AxonPayments>> = LazyLock::new(|| Arc::new(AxonPayments::new()));

/// Returns the process-wide registry, or a fresh one when `force_new` is set.
///
/// The shared registry is created on first access and lives until the
/// process exits. `force_new` returns an independent registry with its own
/// empty cache and leaves the shared one untouched, which suits tests and
/// per-tenant isolation.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use axon_payments::registry::payments;
///
/// let shared = payments(false);
/// let isolated = payments(true);
///
/// assert!(Arc::ptr_eq(&shared, &payments(false)));
/// assert!(!Arc::ptr_eq(&shared, &isolated));
/// ```
#[must_use]
pub fn payments(force_new: bool) -> Arc<AxonPayments> {
    if force_new {
        Arc::new(AxonPayments::new())
    } else {
        Arc::clone(&SHARED)
    }
}
