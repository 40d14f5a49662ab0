//! Package reinstall subscriptions.
//!
//! Every theme package the engine opens gets one subscription on the host's
//! package-event signal. When that package is installed again the
//! subscription clears the package's cache partition and disconnects itself.
//! Opening the package afterwards arms a fresh subscription.
//!
//! ```text
//! Unregistered --ensure_registered--> Registered --install event--> Fired
//!                                         ^                           |
//!                                         +----ensure_registered------+
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use horizon_theme_core::logging::targets;
use horizon_theme_core::{ConnectionGuard, PackageEvent, PackageEvents};
use parking_lot::Mutex;

use crate::cache::ThemeCache;

/// Lifecycle of one package's subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubscriptionState {
    /// No subscription has been made for the package.
    Unregistered,
    /// Waiting for the next install event.
    Registered,
    /// The subscription fired and removed itself.
    Fired,
}

/// An armed subscription disconnects when its guard is dropped.
enum Subscription {
    Registered(ConnectionGuard<PackageEvent>),
    Fired,
}

/// Tracks one-shot reinstall subscriptions for a consumer.
pub struct InvalidationListener {
    consumer: String,
    events: Arc<PackageEvents>,
    cache: Arc<ThemeCache>,
    subscriptions: Mutex<HashMap<String, Subscription>>,
}

impl InvalidationListener {
    /// Create a listener that clears `consumer`'s partitions in `cache`.
    pub fn new(
        consumer: impl Into<String>,
        events: Arc<PackageEvents>,
        cache: Arc<ThemeCache>,
    ) -> Arc<Self> {
        Arc::new(Self {
            consumer: consumer.into(),
            events,
            cache,
            subscriptions: Mutex::new(HashMap::new()),
        })
    }

    /// Subscribe to reinstalls of `package_id` unless already subscribed.
    ///
    /// Returns `true` when a new subscription was made.
    pub fn ensure_registered(self: &Arc<Self>, package_id: &str) -> bool {
        // Held across connect so a concurrent event waits for the id.
        let mut subscriptions = self.subscriptions.lock();
        if let Some(Subscription::Registered(_)) = subscriptions.get(package_id) {
            return false;
        }

        let weak: Weak<Self> = Arc::downgrade(self);
        let package = package_id.to_string();
        let guard = self.events.connect_scoped(move |event: &PackageEvent| {
            if event.package_id() != package || !event.kind().is_install() {
                return;
            }
            if let Some(listener) = weak.upgrade() {
                listener.fire(&package);
            }
        });
        subscriptions.insert(package_id.to_string(), Subscription::Registered(guard));

        tracing::debug!(target: targets::LISTENER, consumer = %self.consumer, package = package_id, "subscribed to package updates");
        true
    }

    /// Current state for `package_id`.
    pub fn state(&self, package_id: &str) -> SubscriptionState {
        match self.subscriptions.lock().get(package_id) {
            None => SubscriptionState::Unregistered,
            Some(Subscription::Registered(_)) => SubscriptionState::Registered,
            Some(Subscription::Fired) => SubscriptionState::Fired,
        }
    }

    /// Number of packages with an armed subscription.
    pub fn registered_count(&self) -> usize {
        self.subscriptions
            .lock()
            .values()
            .filter(|sub| matches!(sub, Subscription::Registered(_)))
            .count()
    }

    fn fire(&self, package_id: &str) {
        let armed = {
            let mut subscriptions = self.subscriptions.lock();
            match subscriptions.get_mut(package_id) {
                Some(sub) if matches!(sub, Subscription::Registered(_)) => {
                    std::mem::replace(sub, Subscription::Fired)
                }
                _ => return,
            }
        };

        // Disconnects outside the map lock.
        drop(armed);
        let removed = self.cache.invalidate(&self.consumer, package_id);
        tracing::info!(target: targets::LISTENER, consumer = %self.consumer, package = package_id, removed, "package updated, cache invalidated");
    }
}

impl std::fmt::Debug for InvalidationListener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvalidationListener")
            .field("consumer", &self.consumer)
            .field("registered", &self.registered_count())
            .finish()
    }
}
