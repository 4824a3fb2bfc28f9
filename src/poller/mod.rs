//! Poller driving the monitors of watched characters.
//!
//! This module provides the `Poller`, a single tokio dispatcher task that periodically
//! walks the monitor registry of every watched character and polls each enabled monitor
//! whose cache has expired through the injected `QueryTransport`. Concurrency is bounded
//! by a semaphore; completions are delivered by the monitors themselves.

mod config;

pub use config::PollerConfig;

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, PoisonError, RwLock, Weak,
};

use chrono::Utc;
use futures::future::join_all;
use tokio::sync::{Mutex, Notify, Semaphore};
use tokio::task::JoinHandle;

use crate::{error::Error, monitor::QueryTransport, subject::Character};

/// Poller for the monitors of a set of characters.
///
/// Cheap to clone; clones share the same dispatcher and watch list.
#[derive(Clone)]
pub struct Poller {
    inner: Arc<PollerRef>,
}

/// Internal poller state shared between clones and the dispatcher task.
struct PollerRef {
    config: PollerConfig,
    transport: Arc<dyn QueryTransport>,
    characters: RwLock<Vec<Weak<Character>>>,
    semaphore: Arc<Semaphore>,
    shutdown: Notify,
    /// Set by `stop()`; checked before every pass so a missed `shutdown` wakeup still
    /// ends the loop within one interval
    stopping: AtomicBool,
    dispatcher: Mutex<Option<JoinHandle<()>>>,
}

impl Poller {
    /// Creates a new poller.
    ///
    /// The poller is created in a stopped state and must be started with `start()`.
    ///
    /// # Arguments
    /// - `config` - Poll interval, concurrency, and shutdown settings
    /// - `transport` - Transport used by monitors to fetch their endpoint
    pub fn new(config: PollerConfig, transport: Arc<dyn QueryTransport>) -> Self {
        // A zero permit semaphore would never grant a poll
        let config = PollerConfig {
            max_concurrent_polls: config.max_concurrent_polls.max(1),
            ..config
        };
        let semaphore = Arc::new(Semaphore::new(config.max_concurrent_polls));

        Self {
            inner: Arc::new(PollerRef {
                config,
                transport,
                characters: RwLock::new(Vec::new()),
                semaphore,
                shutdown: Notify::new(),
                stopping: AtomicBool::new(false),
                dispatcher: Mutex::new(None),
            }),
        }
    }

    /// Adds a character to the watch list.
    ///
    /// Only a weak reference is kept; dropped characters are pruned on the next pass.
    pub fn watch(&self, character: &Arc<Character>) {
        let mut characters = self
            .inner
            .characters
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        if characters
            .iter()
            .any(|c| c.as_ptr() == Arc::as_ptr(character))
        {
            return;
        }

        characters.push(Arc::downgrade(character));
    }

    /// Removes a character from the watch list.
    pub fn unwatch(&self, character: &Arc<Character>) {
        self.inner
            .characters
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|c| c.as_ptr() != Arc::as_ptr(character));
    }

    /// Number of live watched characters.
    pub fn watched_count(&self) -> usize {
        self.inner
            .characters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|c| c.strong_count() > 0)
            .count()
    }

    /// Starts the dispatcher.
    ///
    /// This method is non-blocking and returns immediately after spawning the dispatcher.
    /// It is idempotent - calling it when already running logs a warning and returns.
    pub async fn start(&self) {
        let mut dispatcher = self.inner.dispatcher.lock().await;

        if dispatcher.is_some() {
            tracing::warn!("Poller is already running");
            return;
        }

        tracing::info!(
            "Starting poller (every {:?}, max {} concurrent polls)",
            self.inner.config.poll_interval(),
            self.inner.config.max_concurrent_polls
        );

        self.inner.stopping.store(false, Ordering::Release);

        let inner = Arc::clone(&self.inner);
        *dispatcher = Some(tokio::spawn(async move {
            loop {
                if inner.stopping.load(Ordering::Acquire) {
                    tracing::debug!("Poll dispatcher observed stop request");
                    break;
                }

                // Registering before the pass means a shutdown signalled mid-pass is not missed
                let shutdown = inner.shutdown.notified();
                tokio::pin!(shutdown);
                shutdown.as_mut().enable();

                let polled = Self::run_pass(&inner).await;
                if polled > 0 {
                    tracing::debug!("Polled {} monitor(s)", polled);
                }

                tokio::select! {
                    biased;

                    _ = &mut shutdown => {
                        tracing::debug!("Poll dispatcher received shutdown signal");
                        break;
                    }

                    _ = tokio::time::sleep(inner.config.poll_interval()) => {}
                }
            }

            tracing::info!("Poll dispatcher stopped");
        }));
    }

    /// Runs a single pass over the watched characters without starting the dispatcher.
    ///
    /// # Returns
    /// Number of monitors polled.
    pub async fn poll_once(&self) -> usize {
        Self::run_pass(&self.inner).await
    }

    /// Polls every enabled, registered, due monitor of every live watched character.
    async fn run_pass(inner: &PollerRef) -> usize {
        let characters: Vec<Arc<Character>> = {
            let mut watched = inner
                .characters
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            watched.retain(|c| c.strong_count() > 0);
            watched.iter().filter_map(Weak::upgrade).collect()
        };

        let now = Utc::now();
        let transport = inner.transport.as_ref();
        let polls = characters.iter().flat_map(|character| {
            character
                .monitors()
                .monitors()
                .into_iter()
                .filter(move |monitor| monitor.is_due(now))
                .map(move |monitor| {
                    let semaphore = Arc::clone(&inner.semaphore);
                    async move {
                        // Permit is held until the completion has been delivered
                        let Ok(_permit) = semaphore.acquire_owned().await else {
                            return false;
                        };
                        monitor.poll(transport, character.character_id()).await
                    }
                })
        });

        join_all(polls)
            .await
            .into_iter()
            .filter(|delivered| *delivered)
            .count()
    }

    /// Stops the dispatcher gracefully.
    ///
    /// Signals the dispatcher to stop and waits for it with the configured timeout. A poll
    /// pass in progress finishes first; a dispatcher still running when the timeout
    /// expires is aborted. Idempotent - calling it when already stopped returns
    /// immediately.
    ///
    /// # Returns
    /// - `Ok(())` - Poller stopped (or was not running)
    /// - `Err(Error::InternalError)` - The dispatcher task panicked
    pub async fn stop(&self) -> Result<(), Error> {
        let Some(mut handle) = self.inner.dispatcher.lock().await.take() else {
            tracing::debug!("Poller is already stopped");
            return Ok(());
        };

        tracing::info!("Shutting down poller...");

        self.inner.stopping.store(true, Ordering::Release);
        self.inner.shutdown.notify_waiters();

        match tokio::time::timeout(self.inner.config.shutdown_timeout(), &mut handle).await {
            Ok(Ok(())) => {
                tracing::info!("Poller shut down");
                Ok(())
            }
            Ok(Err(e)) => Err(Error::InternalError(format!(
                "Poll dispatcher panicked: {:?}",
                e
            ))),
            Err(_) => {
                tracing::warn!("Poll dispatcher did not stop within timeout, aborting it");
                handle.abort();
                Ok(())
            }
        }
    }

    /// Checks if the dispatcher is running.
    pub async fn is_running(&self) -> bool {
        self.inner.dispatcher.lock().await.is_some()
    }

    /// Gets the number of polls that could start right now.
    pub fn available_permits(&self) -> usize {
        self.inner.semaphore.available_permits()
    }
}
