//! Poller behavior against scripted ticker sources.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use swap_ticker::poller::poll_once;
use swap_ticker::{
    Dashboard, FetchError, Instrument, Poller, SharedDashboard, Ticker, TickerSource,
};
use tokio::time::{sleep, timeout};

const TRACKED: [&str; 3] = ["BTC-USDT-SWAP", "ETH-USDT-SWAP", "BNB-USDT-SWAP"];

/// Source returning the call number as the BTC price.
#[derive(Default)]
struct ScriptedSource {
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    delay: Duration,
    fail: AtomicBool,
}

impl ScriptedSource {
    fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            ..Default::default()
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TickerSource for ScriptedSource {
    async fn fetch_tickers(&self) -> Result<Vec<Ticker>, FetchError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.fail.load(Ordering::SeqCst) {
            return Err(FetchError::Api {
                code: "50001".to_string(),
                msg: "Service temporarily unavailable".to_string(),
            });
        }

        Ok(vec![
            Ticker::new("DOGE-USDT-SWAP", "0.12"),
            Ticker::new("BTC-USDT-SWAP", call.to_string()),
            Ticker::new("ETH-USDT-SWAP", "3500"),
            Ticker::new("BNB-USDT-SWAP", "580"),
        ])
    }

    fn describe(&self) -> String {
        "scripted".to_string()
    }
}

fn new_dashboard() -> SharedDashboard {
    Dashboard::new(TRACKED.into_iter().map(Instrument::new), 20).into_shared()
}

/// Wait until the dashboard satisfies `pred`, failing after two seconds.
async fn wait_until(dashboard: &SharedDashboard, pred: impl Fn(&Dashboard) -> bool) {
    timeout(Duration::from_secs(2), async {
        loop {
            if pred(&*dashboard.lock().await) {
                return;
            }
            sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("condition not reached in time");
}

fn btc_history(dashboard: &Dashboard) -> Vec<Option<f64>> {
    dashboard
        .slot("BTC-USDT-SWAP")
        .expect("tracked")
        .history
        .to_vec()
}

#[tokio::test]
async fn test_poll_once_updates_only_tracked_instruments() {
    let source = ScriptedSource::default();
    let dashboard = new_dashboard();

    let received = poll_once(&source, &dashboard).await.unwrap();
    assert_eq!(received, 4);

    let state = dashboard.lock().await;
    assert_eq!(state.slots().len(), 3);
    assert_eq!(state.visible_slots().count(), 3);
    assert!(state.slot("DOGE-USDT-SWAP").is_none());
    assert_eq!(btc_history(&state), vec![Some(1.0)]);
}

#[tokio::test]
async fn test_failed_poll_leaves_state_unchanged() {
    let source = ScriptedSource::default();
    let dashboard = new_dashboard();

    poll_once(&source, &dashboard).await.unwrap();
    poll_once(&source, &dashboard).await.unwrap();
    let before = dashboard.lock().await.clone();

    source.fail.store(true, Ordering::SeqCst);
    let result = poll_once(&source, &dashboard).await;
    assert!(matches!(result, Err(FetchError::Api { .. })));

    let after = dashboard.lock().await;
    assert_eq!(after.ticks_applied(), before.ticks_applied());
    assert_eq!(after.timestamps(), before.timestamps());
    assert_eq!(after.last_update(), before.last_update());
    for (a, b) in after.slots().iter().zip(before.slots()) {
        assert_eq!(a.snapshot, b.snapshot);
        assert_eq!(a.history, b.history);
    }
}

#[tokio::test]
async fn test_twenty_five_ticks_keep_most_recent_twenty() {
    let source = ScriptedSource::default();
    let dashboard = new_dashboard();

    for _ in 0..25 {
        poll_once(&source, &dashboard).await.unwrap();
    }

    let state = dashboard.lock().await;
    let expected: Vec<Option<f64>> = (6..=25).map(|i| Some(i as f64)).collect();
    assert_eq!(btc_history(&state), expected);
    assert_eq!(state.timestamps().len(), 20);
    for slot in state.slots() {
        assert_eq!(slot.history.len(), 20);
    }
}

#[tokio::test]
async fn test_first_tick_fires_immediately() {
    let source = Arc::new(ScriptedSource::default());
    let dashboard = new_dashboard();

    // Period far longer than the test
    let handle = Poller::new(source.clone(), dashboard.clone(), Duration::from_secs(60)).spawn();

    wait_until(&dashboard, |d| d.ticks_applied() == 1).await;
    assert_eq!(dashboard.lock().await.visible_slots().count(), 3);

    handle.shutdown().await;
}

#[tokio::test]
async fn test_manual_refresh_runs_extra_tick() {
    let source = Arc::new(ScriptedSource::default());
    let dashboard = new_dashboard();
    let handle = Poller::new(source.clone(), dashboard.clone(), Duration::from_secs(60)).spawn();

    wait_until(&dashboard, |d| d.ticks_applied() == 1).await;
    handle.refresh().await;
    wait_until(&dashboard, |d| d.ticks_applied() == 2).await;

    assert_eq!(source.calls(), 2);
    handle.shutdown().await;
}

#[tokio::test]
async fn test_polls_on_interval() {
    let source = Arc::new(ScriptedSource::default());
    let dashboard = new_dashboard();
    let handle = Poller::new(source.clone(), dashboard.clone(), Duration::from_millis(20)).spawn();

    wait_until(&dashboard, |d| d.ticks_applied() >= 4).await;
    handle.shutdown().await;

    let state = dashboard.lock().await;
    let history = btc_history(&state);
    // Samples are appended in order of completion
    assert!(history.windows(2).all(|w| w[0] < w[1]));
}

#[tokio::test]
async fn test_no_updates_after_shutdown() {
    let source = Arc::new(ScriptedSource::default());
    let dashboard = new_dashboard();
    let handle = Poller::new(source.clone(), dashboard.clone(), Duration::from_millis(10)).spawn();

    wait_until(&dashboard, |d| d.ticks_applied() >= 3).await;
    handle.shutdown().await;

    let ticks = dashboard.lock().await.ticks_applied();
    let calls = source.calls();

    // Several periods pass without the timer firing again
    sleep(Duration::from_millis(100)).await;

    assert_eq!(dashboard.lock().await.ticks_applied(), ticks);
    assert_eq!(source.calls(), calls);
}

#[tokio::test]
async fn test_shutdown_discards_in_flight_tick() {
    let source = Arc::new(ScriptedSource::with_delay(Duration::from_millis(200)));
    let dashboard = new_dashboard();
    let handle = Poller::new(source.clone(), dashboard.clone(), Duration::from_secs(60)).spawn();

    // First request is still waiting on its response
    sleep(Duration::from_millis(50)).await;
    assert_eq!(source.calls(), 1);
    handle.shutdown().await;

    sleep(Duration::from_millis(300)).await;

    let state = dashboard.lock().await;
    assert_eq!(state.ticks_applied(), 0);
    assert_eq!(state.visible_slots().count(), 0);
}

#[tokio::test]
async fn test_slow_responses_overlap_ticks() {
    let source = Arc::new(ScriptedSource::with_delay(Duration::from_millis(100)));
    let dashboard = new_dashboard();
    let handle = Poller::new(source.clone(), dashboard.clone(), Duration::from_millis(20)).spawn();

    wait_until(&dashboard, |d| d.ticks_applied() >= 2).await;
    handle.shutdown().await;

    assert!(source.max_in_flight.load(Ordering::SeqCst) >= 2);

    let state = dashboard.lock().await;
    for slot in state.slots() {
        assert_eq!(slot.history.len(), state.timestamps().len());
    }
}

#[tokio::test]
async fn test_recovers_after_failures() {
    let source = Arc::new(ScriptedSource::default());
    source.fail.store(true, Ordering::SeqCst);
    let dashboard = new_dashboard();
    let handle = Poller::new(source.clone(), dashboard.clone(), Duration::from_millis(10)).spawn();

    // Keep failing for a few ticks: no card may appear
    timeout(Duration::from_secs(2), async {
        while source.calls() < 3 {
            sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("source not polled");
    {
        let state = dashboard.lock().await;
        assert_eq!(state.ticks_applied(), 0);
        assert_eq!(state.visible_slots().count(), 0);
        assert!(state.timestamps().is_empty());
    }

    source.fail.store(false, Ordering::SeqCst);
    wait_until(&dashboard, |d| d.visible_slots().count() == 3).await;

    handle.shutdown().await;
}
