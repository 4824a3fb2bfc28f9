//! Credential change notifications.
//!
//! The key registry publishes a [`CredentialChange`] whenever an API key is added, removed,
//! or retyped. Listeners are held weakly and every subscription is an RAII guard: dropping
//! the [`CredentialSubscription`] detaches the listener, so a dropped character never keeps
//! receiving events.

#[cfg(test)]
mod tests;

use std::sync::{Arc, PoisonError, RwLock, Weak};

use uuid::Uuid;

use crate::model::credential::CredentialChange;

/// Receiver of credential change events.
pub trait CredentialListener: Send + Sync {
    fn on_credential_changed(&self, change: &CredentialChange);
}

/// Identifier of a subscription on a [`CredentialChangeNotifier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

struct Subscriber {
    id: SubscriptionId,
    listener: Weak<dyn CredentialListener>,
}

/// Publisher of credential changes, cheap to clone and share between characters.
#[derive(Clone, Default)]
pub struct CredentialChangeNotifier {
    inner: Arc<RwLock<Vec<Subscriber>>>,
}

impl CredentialChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches `listener` until the returned guard is dropped.
    pub fn subscribe(&self, listener: Weak<dyn CredentialListener>) -> CredentialSubscription {
        let id = SubscriptionId(Uuid::new_v4());

        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Subscriber { id, listener });

        CredentialSubscription {
            id,
            subscribers: Arc::downgrade(&self.inner),
        }
    }

    /// Delivers `change` to every live listener.
    ///
    /// Listeners run on the caller's thread without the subscriber list locked, so a
    /// listener may subscribe or unsubscribe while handling the event. Listeners whose
    /// owner has been dropped are pruned.
    pub fn notify(&self, change: &CredentialChange) {
        let listeners: Vec<Arc<dyn CredentialListener>> = {
            let mut subscribers = self
                .inner
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            subscribers.retain(|s| s.listener.strong_count() > 0);
            subscribers
                .iter()
                .filter_map(|s| s.listener.upgrade())
                .collect()
        };

        tracing::debug!(
            "Publishing {:?} of {} to {} listener(s)",
            change.change,
            change.credential,
            listeners.len()
        );

        for listener in listeners {
            listener.on_credential_changed(change);
        }
    }

    /// Number of attached subscriptions, including ones whose listener was dropped but not
    /// yet pruned.
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Guard detaching a listener from its notifier when dropped.
pub struct CredentialSubscription {
    id: SubscriptionId,
    subscribers: Weak<RwLock<Vec<Subscriber>>>,
}

impl CredentialSubscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }
}

impl Drop for CredentialSubscription {
    fn drop(&mut self) {
        // The notifier may already be gone
        if let Some(subscribers) = self.subscribers.upgrade() {
            subscribers
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .retain(|s| s.id != self.id);
        }
    }
}
