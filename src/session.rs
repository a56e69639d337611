//! One countdown session: resolve location, resolve Maghrib, then tick.
//!
//! The latest [`DisplayState`] is published on a watch channel. Cancelling
//! the session's token stops whichever stage is running and no further
//! state is published.

use crate::config::{Config, LocationConfig};
use crate::countdown::remaining_until;
use crate::display::{DisplayState, ReadyView};
use crate::error::FetchError;
use crate::location::{self, client::TimeClient, models::LocationTime};
use crate::prayer::{self, client::PrayerClient, models::PrayerSchedule};
use anyhow::Result;
use chrono::{DateTime, Local};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Wall-clock source for the countdown.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Owns the watch sender and enforces monotonic state transitions.
pub struct StatePublisher {
    tx: watch::Sender<DisplayState>,
}

impl Default for StatePublisher {
    fn default() -> Self {
        let (tx, _rx) = watch::channel(DisplayState::Loading);
        Self { tx }
    }
}

impl StatePublisher {
    pub fn subscribe(&self) -> watch::Receiver<DisplayState> {
        self.tx.subscribe()
    }

    pub fn current(&self) -> DisplayState {
        self.tx.borrow().clone()
    }

    /// Returns false, leaving the state untouched, if the transition is not
    /// allowed.
    pub fn publish(&self, next: DisplayState) -> bool {
        let next_name = next.name();
        let mut rejected_from = None;

        self.tx.send_if_modified(|current| {
            if current.can_transition_to(&next) {
                *current = next;
                true
            } else {
                rejected_from = Some(current.name());
                false
            }
        });

        match rejected_from {
            Some(from) => {
                log::warn!("ignoring display transition {} -> {}", from, next_name);
                false
            }
            None => true,
        }
    }
}

pub struct Session<C: Clock = SystemClock> {
    location: LocationConfig,
    method: u8,
    time_client: TimeClient,
    prayer_client: PrayerClient,
    clock: C,
    state: StatePublisher,
    cancel: CancellationToken,
}

impl Session<SystemClock> {
    pub fn new(config: &Config) -> Result<Self> {
        let timeout = Duration::from_secs(config.network.request_timeout_secs);
        let time_client =
            TimeClient::new(timeout)?.with_base_url(&config.time_service.api_url);
        let prayer_client = PrayerClient::new(timeout)?.with_base_url(&config.prayer.api_url);

        Ok(Self {
            location: config.location.clone(),
            method: config.prayer.method,
            time_client,
            prayer_client,
            clock: SystemClock,
            state: StatePublisher::default(),
            cancel: CancellationToken::new(),
        })
    }
}

impl<C: Clock> Session<C> {
    /// Swap the wall clock (tests pin it to a fixed instant)
    pub fn with_clock<C2: Clock>(self, clock: C2) -> Session<C2> {
        Session {
            location: self.location,
            method: self.method,
            time_client: self.time_client,
            prayer_client: self.prayer_client,
            clock,
            state: self.state,
            cancel: self.cancel,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<DisplayState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> DisplayState {
        self.state.current()
    }

    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Run the whole pipeline until cancelled or a fetch fails.
    ///
    /// With a blank city or country the prayer lookup is skipped and the
    /// session parks in `Loading` until cancelled.
    pub async fn run(&self) -> Result<(), FetchError> {
        let (location, schedule) = match self.resolve().await? {
            Some(resolved) => resolved,
            None => {
                self.cancel.cancelled().await;
                return Ok(());
            }
        };

        let mut interval = tokio::time::interval(TICK_INTERVAL);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    log::debug!("countdown cancelled");
                    break;
                }
                _ = interval.tick() => {
                    self.state.publish(DisplayState::Ready(self.ready_view(&location, &schedule)));
                }
            }
        }

        Ok(())
    }

    /// Resolve both fetches and publish a single tick, without looping.
    pub async fn snapshot(&self) -> DisplayState {
        if let Ok(Some((location, schedule))) = self.resolve().await {
            self.state
                .publish(DisplayState::Ready(self.ready_view(&location, &schedule)));
        }
        self.state()
    }

    /// The two fetches, in order. `Ok(None)` means cancelled or skipped.
    async fn resolve(&self) -> Result<Option<(LocationTime, PrayerSchedule)>, FetchError> {
        let location = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return Ok(None),
            result = location::resolve_location(&self.time_client, &self.location) => {
                result.map_err(|e| self.fail(e))?
            }
        };

        let schedule = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return Ok(None),
            result = prayer::resolve_prayer_schedule(&self.prayer_client, &location, self.method) => {
                result.map_err(|e| self.fail(e))?
            }
        };

        Ok(schedule.map(|schedule| (location, schedule)))
    }

    fn fail(&self, error: FetchError) -> FetchError {
        self.state.publish(DisplayState::Error(error.to_string()));
        error
    }

    fn ready_view(&self, location: &LocationTime, schedule: &PrayerSchedule) -> ReadyView {
        let remaining = remaining_until(schedule.maghrib_time, &self.clock.now());
        ReadyView {
            remaining,
            maghrib: schedule.maghrib.clone(),
            message: remaining.message().text(),
            location: location.clone(),
        }
    }
}
