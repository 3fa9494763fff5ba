//! Cached provider clients.
//!
//! [`AxonPayments`] hands out shared client instances keyed by provider name
//! and constructor arguments. The first request for a key builds the client;
//! every later request with the same key returns the same [`Arc`].
//!
//! Entries are never evicted. A registry lives as long as its owner, so a
//! long-running process that builds clients for many distinct secrets keeps
//! all of them.
//!
//! New providers plug in by implementing [`Provider`]; no call site changes.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use axon_payments::{plisio::Standard, registry::AxonPayments};
//!
//! let registry = AxonPayments::new();
//! let first = registry.plisio::<Standard>("secret-key")?;
//! let second = registry.plisio::<Standard>("secret-key")?;
//!
//! assert!(Arc::ptr_eq(&first, &second));
//! # Ok::<(), axon_payments::error::PaymentsError>(())
//! ```

use std::{
    any::{Any, type_name},
    collections::HashMap,
    fmt,
    sync::Arc,
};

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::{
    error::{PaymentsError, Result},
    plisio::{Mode, PlisioClient},
};

mod singleton;

pub use singleton::payments;

/// A client type the registry can build and cache.
pub trait Provider: Send + Sync + Sized + 'static {
    /// Provider name, the first half of the cache key.
    const NAME: &'static str;

    /// Constructor arguments.
    type Args;

    /// Serializes `args` deterministically, the second half of the cache key.
    ///
    /// Different argument values or order must produce different strings.
    ///
    /// # Errors
    ///
    /// Returns error if the arguments cannot be serialized.
    fn serialize_args(args: &Self::Args) -> Result<String>;

    /// Builds a new instance.
    ///
    /// # Errors
    ///
    /// Returns the provider's construction error.
    fn construct(args: Self::Args) -> Result<Self>;
}

type Instance = Arc<dyn Any + Send + Sync>;

/// Registry of cached provider clients.
#[derive(Default)]
pub struct AxonPayments {
    cache: Mutex<HashMap<String, Instance>>,
}

impl AxonPayments {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached `P` for `args`, building it on first use.
    ///
    /// The lock is held from lookup to insert, so concurrent callers with
    /// the same key always get the same instance. Nothing is cached when
    /// construction fails.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Provider::serialize_args`] and
    /// [`Provider::construct`] unchanged. Returns
    /// [`PaymentsError::ProviderMismatch`] if the key is already taken by a
    /// different type.
    pub fn get<P: Provider>(&self, args: P::Args) -> Result<Arc<P>> {
        let key = format!("{}:{}", P::NAME, P::serialize_args(&args)?);
        let mut cache = self.cache.lock();

        if let Some(instance) = cache.get(&key) {
            trace!(provider = P::NAME, "Reusing cached client");
            return Arc::clone(instance).downcast::<P>().map_err(|_| {
                PaymentsError::ProviderMismatch(format!(
                    "cached '{}' instance is not a {}",
                    P::NAME,
                    type_name::<P>()
                ))
            });
        }

        let instance = Arc::new(P::construct(args)?);
        cache.insert(key, Arc::clone(&instance) as Instance);
        debug!(provider = P::NAME, cached = cache.len(), "Constructed new client");

        Ok(instance)
    }

    /// Returns the cached Plisio client for `secret_key` in mode `M`.
    ///
    /// Shorthand for `get::<PlisioClient<M>>(secret_key)`.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    #[allow(
        clippy::impl_trait_in_params,
        reason = "impl Into<String> is idiomatic for constructors"
    )]
    pub fn plisio<M: Mode>(&self, secret_key: impl Into<String>) -> Result<Arc<PlisioClient<M>>> {
        self.get::<PlisioClient<M>>(secret_key.into())
    }

    /// Number of cached clients.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.lock().len()
    }

    /// Returns `true` if no client has been built yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.lock().is_empty()
    }
}

impl fmt::Debug for AxonPayments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AxonPayments").field("cached", &self.len()).finish()
    }
}
