//! Playback shell: the always-present player bar state machine.
//!
//! # States
//! ```text
//!  Idle     nothing loaded
//!  Paused   episode loaded, ticker stopped
//!  Playing  episode loaded, ticker armed
//! ```
//!
//! There is no media pipeline behind this: progress is simulated by a
//! repeating ticker that is armed exactly on entry to `Playing` and cancelled
//! on every exit. Ticks are delivered over an mpsc channel to whoever owns the
//! shell, and carry the generation of the ticker that produced them so that a
//! tick already in flight when its ticker was cancelled is ignored.

use std::time::Duration;

use serde::Serialize;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::content::Episode;

/// Period of the simulated progress tick.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);
/// Progress added per tick while playing.
pub const PROGRESS_STEP: f64 = 0.5;
/// Progress at or above this value wraps back to zero on the next tick.
pub const PROGRESS_MAX: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackStatus {
    #[default]
    Idle,
    Paused,
    Playing,
}

/// One tick from a [`ProgressTicker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackTick {
    pub generation: u64,
}

/// Serializable view of the shell for the HTTP API.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlaybackSnapshot {
    pub episode_id: Option<String>,
    pub title: Option<String>,
    pub status: PlaybackStatus,
    pub progress: f64,
}

/// Cancellable repeating task that emits [`PlaybackTick`]s. Dropping the
/// ticker cancels it.
pub struct ProgressTicker {
    cancel: CancellationToken,
}

impl ProgressTicker {
    pub fn spawn(generation: u64, period: Duration, tx: mpsc::Sender<PlaybackTick>) -> Self {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            // The first tick of an interval completes immediately.
            interval.tick().await;
            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    _ = interval.tick() => {
                        if tx.send(PlaybackTick { generation }).await.is_err() {
                            break;
                        }
                    }
                }
            }
            debug!("progress ticker {} stopped", generation);
        });
        Self { cancel }
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

pub struct PlaybackShell {
    current: Option<Episode>,
    playing: bool,
    progress: f64,
    ticker: Option<ProgressTicker>,
    generation: u64,
    period: Duration,
    tick_tx: mpsc::Sender<PlaybackTick>,
}

impl PlaybackShell {
    pub fn new(tick_tx: mpsc::Sender<PlaybackTick>) -> Self {
        Self::with_period(tick_tx, TICK_PERIOD)
    }

    pub fn with_period(tick_tx: mpsc::Sender<PlaybackTick>, period: Duration) -> Self {
        Self {
            current: None,
            playing: false,
            progress: 0.0,
            ticker: None,
            generation: 0,
            period,
            tick_tx,
        }
    }

    pub fn current(&self) -> Option<&Episode> {
        self.current.as_ref()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn status(&self) -> PlaybackStatus {
        match (&self.current, self.playing) {
            (None, _) => PlaybackStatus::Idle,
            (Some(_), false) => PlaybackStatus::Paused,
            (Some(_), true) => PlaybackStatus::Playing,
        }
    }

    /// Tap on an episode's cover: the current episode toggles, any other
    /// episode replaces it and starts from zero.
    pub fn select_episode(&mut self, episode: &Episode) {
        let same = self.current.as_ref().is_some_and(|c| c.id == episode.id);
        if same {
            self.set_playing(!self.playing);
            return;
        }
        debug!("playback: switching to {}", episode.id);
        // Disarm first so the old ticker never outlives its episode.
        self.disarm();
        self.current = Some(episode.clone());
        self.progress = 0.0;
        self.playing = false;
        self.set_playing(true);
    }

    /// No-op while idle.
    pub fn toggle_play_pause(&mut self) {
        if self.current.is_some() {
            self.set_playing(!self.playing);
        }
    }

    pub fn close(&mut self) {
        self.disarm();
        self.current = None;
        self.playing = false;
        self.progress = 0.0;
    }

    /// Apply a tick. Returns true when progress changed.
    pub fn on_tick(&mut self, tick: PlaybackTick) -> bool {
        if !self.playing || self.ticker.is_none() || tick.generation != self.generation {
            return false;
        }
        self.progress = if self.progress >= PROGRESS_MAX {
            0.0
        } else {
            self.progress + PROGRESS_STEP
        };
        true
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            episode_id: self.current.as_ref().map(|e| e.id.clone()),
            title: self.current.as_ref().map(|e| e.title.clone()),
            status: self.status(),
            progress: self.progress,
        }
    }

    fn set_playing(&mut self, playing: bool) {
        if playing == self.playing {
            return;
        }
        self.playing = playing;
        if playing {
            self.arm();
        } else {
            self.disarm();
        }
    }

    fn arm(&mut self) {
        self.disarm();
        self.generation += 1;
        debug!("playback: arming ticker {}", self.generation);
        self.ticker = Some(ProgressTicker::spawn(
            self.generation,
            self.period,
            self.tick_tx.clone(),
        ));
    }

    fn disarm(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            debug!("playback: cancelling ticker {}", self.generation);
            ticker.cancel();
        }
    }
}
