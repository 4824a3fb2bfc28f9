use std::{
    future::Future,
    pin::Pin,
    sync::atomic::{AtomicBool, Ordering},
    time::Duration,
};

use corpsync::monitor::{QueryRequest, QueryTransport};

use super::*;

/// Transport whose requests never answer.
#[derive(Default)]
struct HangingTransport {
    requested: Arc<AtomicBool>,
    released: Arc<AtomicBool>,
}

/// Marks the hanging request released once its future is dropped.
struct ReleaseOnDrop(Arc<AtomicBool>);

impl Drop for ReleaseOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

impl QueryTransport for HangingTransport {
    fn fetch<'a>(
        &'a self,
        _: QueryRequest,
    ) -> Pin<Box<dyn Future<Output = Result<serde_json::Value, ApiError>> + Send + 'a>> {
        self.requested.store(true, Ordering::SeqCst);
        let guard = ReleaseOnDrop(Arc::clone(&self.released));

        Box::pin(async move {
            let _guard = guard;
            std::future::pending().await
        })
    }
}

fn fast_config() -> PollerConfig {
    PollerConfig {
        poll_interval_ms: 10,
        ..PollerConfig::new(2)
    }
}

/// Tests starting the poller.
///
/// Expected: the dispatcher polls the watched character without an explicit pass
#[tokio::test]
async fn start_polls_watched_characters() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_credential(CredentialKind::Corporation)
        .build()?;
    let transport = full_transport();
    let poller = Poller::new(fast_config(), transport.clone());
    poller.watch(&test.character);

    poller.start().await;
    for _ in 0..200 {
        if test.character.jobs_import_count() > 0 && test.character.orders_import_count() > 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    poller.stop().await?;

    assert_eq!(transport.requests().len(), 4);
    assert_eq!(test.character.orders_import_count(), 1);
    assert_eq!(test.character.jobs_import_count(), 1);
    Ok(())
}

/// Tests starting and stopping twice.
///
/// Expected: both calls succeed and the running state follows the last call
#[tokio::test]
async fn start_and_stop_are_idempotent() -> Result<(), TestError> {
    let poller = Poller::new(fast_config(), Arc::new(MockTransport::new()));
    assert!(!poller.is_running().await);

    poller.start().await;
    poller.start().await;
    assert!(poller.is_running().await);

    poller.stop().await?;
    assert!(!poller.is_running().await);
    poller.stop().await?;
    Ok(())
}

/// Tests unwatching a character before the poller runs.
///
/// Expected: nothing is requested
#[tokio::test]
async fn unwatched_character_is_not_polled() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_credential(CredentialKind::Corporation)
        .build()?;
    let transport = full_transport();
    let poller = Poller::new(fast_config(), transport.clone());
    poller.watch(&test.character);
    poller.unwatch(&test.character);

    let polled = poller.poll_once().await;

    assert_eq!(polled, 0);
    assert!(transport.requests().is_empty());
    Ok(())
}

/// Tests stopping a dispatcher stuck in a poll pass.
///
/// Expected: stop returns after the shutdown timeout and the stuck pass is aborted
#[tokio::test]
async fn stop_aborts_stuck_dispatcher() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_credential(CredentialKind::Corporation)
        .build()?;
    let transport = Arc::new(HangingTransport::default());
    let config = PollerConfig {
        shutdown_timeout_seconds: 1,
        ..fast_config()
    };
    let poller = Poller::new(config, transport.clone());
    poller.watch(&test.character);

    poller.start().await;
    for _ in 0..200 {
        if transport.requested.load(Ordering::SeqCst) {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(transport.requested.load(Ordering::SeqCst));

    poller.stop().await?;
    assert!(!poller.is_running().await);

    for _ in 0..100 {
        if transport.released.load(Ordering::SeqCst) {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(transport.released.load(Ordering::SeqCst));
    Ok(())
}

/// Tests restarting a stopped poller.
///
/// Expected: the new dispatcher runs passes again
#[tokio::test]
async fn restart_after_stop_polls_again() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_credential(CredentialKind::Corporation)
        .build()?;
    let transport = full_transport();
    let poller = Poller::new(fast_config(), transport.clone());

    poller.start().await;
    poller.stop().await?;

    poller.watch(&test.character);
    poller.start().await;
    for _ in 0..200 {
        if transport.requests().len() == 4 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    poller.stop().await?;

    assert_eq!(transport.requests().len(), 4);
    Ok(())
}
