use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};
use shared::Player;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};

use crate::transport::Transport;

/// How often the roster is refreshed.
pub const POLL_PERIOD: Duration = Duration::from_millis(shared::POLL_PERIOD_MS);

/// The published roster. Replaced wholesale on every successful fetch;
/// consumers always observe a complete snapshot.
pub type Roster = Arc<Vec<Player>>;

/// Recurring roster refresh. Each subscription runs its own ticker and
/// publishes through a watch channel; failed ticks are logged and skipped so
/// the previous roster stays visible.
pub struct RosterPoller {
    transport: Transport,
    period: Duration,
}

impl RosterPoller {
    pub fn new(transport: Transport) -> Self {
        Self::with_period(transport, POLL_PERIOD)
    }

    pub fn with_period(transport: Transport, period: Duration) -> Self {
        Self { transport, period }
    }

    /// Starts polling and returns the subscription handle. No request is
    /// issued until the first full period has elapsed.
    pub fn subscribe(&self) -> RosterSubscription {
        let (publish, receiver) = watch::channel(Roster::default());
        let generation = Arc::new(AtomicU64::new(0));
        let ticker = tokio::spawn(poll_loop(
            self.transport.clone(),
            self.period,
            Arc::new(publish),
            Arc::clone(&generation),
        ));
        RosterSubscription {
            receiver,
            generation,
            ticker,
        }
    }
}

async fn poll_loop(
    transport: Transport,
    period: Duration,
    publish: Arc<watch::Sender<Roster>>,
    generation: Arc<AtomicU64>,
) {
    // First tick fires one full period after subscription, matching the
    // browser interval this replaces.
    let mut ticker = interval_at(Instant::now() + period, period);
    info!("Roster polling started ({}ms period)", period.as_millis());

    loop {
        ticker.tick().await;

        // Fetches are allowed to overlap; the last one to resolve wins the
        // published value, not the last one to start.
        let transport = transport.clone();
        let publish = Arc::clone(&publish);
        let generation = Arc::clone(&generation);
        let started_in = generation.load(Ordering::Acquire);
        tokio::spawn(async move {
            match transport.players().await {
                Ok(players) => {
                    // A fetch that outlives its subscription must not publish.
                    if generation.load(Ordering::Acquire) == started_in {
                        let _ = publish.send(Arc::new(players));
                    }
                }
                Err(err) => {
                    warn!("Roster refresh failed, keeping previous roster: {err}");
                }
            }
        });
    }
}

/// Handle to an active poll. Dropping it stops the ticker; results of
/// requests already in flight are discarded rather than applied.
pub struct RosterSubscription {
    receiver: watch::Receiver<Roster>,
    generation: Arc<AtomicU64>,
    ticker: JoinHandle<()>,
}

impl RosterSubscription {
    /// The most recently published roster (empty before the first
    /// successful fetch).
    pub fn roster(&self) -> Roster {
        self.receiver.borrow().clone()
    }

    /// Waits for the next published roster. Returns false once the
    /// subscription can no longer produce updates.
    pub async fn changed(&mut self) -> bool {
        self.receiver.changed().await.is_ok()
    }

    /// Stops future ticks. Idempotent; in-flight fetches resolve harmlessly
    /// into a stale generation.
    pub fn stop(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        self.ticker.abort();
    }
}

impl Drop for RosterSubscription {
    fn drop(&mut self) {
        self.stop();
    }
}
