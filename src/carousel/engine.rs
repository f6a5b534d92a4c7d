//! Carousel rotation engine
//!
//! Owns the rotation state machine: which slide is showing, how long it has
//! been showing, and when the next automatic advance is due. The engine is
//! duration-driven, so every slide schedules exactly one advance timer when
//! it is entered, and that timer survives background deck refetches as long
//! as the current position and its resolved duration are unchanged. Swapping
//! in fresh sheet data therefore never makes the display stutter or restart
//! its countdown.
//!
//! All mutation goes through a single mutex held only for short synchronous
//! sections. Timer tasks hold a `Weak` reference back to the shared state and
//! carry the epoch they were armed under; a stale epoch means the slide
//! changed hands while the timer slept and the tick is discarded.

use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Instant};
use utoipa::ToSchema;

use crate::models::{Slide, SlideKind};

/// Timer ticks landing within this much of the deadline count as elapsed.
/// Runtimes can fire a hair early; without the tolerance such a tick would
/// re-arm for a microscopic remainder instead of advancing.
const TICK_TOLERANCE_MS: u64 = 50;

/// Snapshot of the display state, published to every subscriber whenever it
/// changes and served verbatim as the display API payload.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DisplayFrame {
    /// True until the first sheet fetch completes.
    pub loading: bool,
    /// Position of the current slide in the deck.
    pub index: usize,
    /// Deck size.
    pub total: usize,
    /// The slide being shown, absent while loading or when the deck is empty.
    pub slide: Option<Slide>,
    /// Grows by one each time rotation naturally lands on a gallery slide;
    /// renderers take it modulo their image count. Wraps and manual
    /// navigation reset it to zero.
    pub gallery_index: usize,
    /// Reset to zero whenever rotation lands on a video slide so playback
    /// starts from the beginning.
    pub video_index: usize,
    /// Wall-clock moment the current slide was entered.
    pub entered_at: DateTime<Utc>,
    /// Wall-clock moment of the next automatic advance. None exactly when no
    /// timer is armed (loading, empty deck, or after shutdown).
    pub advance_at: Option<DateTime<Utc>>,
}

/// Outcome of a timer tick waking up.
#[derive(Debug, PartialEq)]
enum TickOutcome {
    /// The slide's full duration has elapsed.
    Advance,
    /// Woke early; sleep again for the remaining time.
    Rearm(Duration),
}

/// Decide whether a woken timer should advance or go back to sleep.
fn advance_decision(elapsed: Duration, target: Duration) -> TickOutcome {
    if elapsed + Duration::from_millis(TICK_TOLERANCE_MS) >= target {
        TickOutcome::Advance
    } else {
        TickOutcome::Rearm(target - elapsed)
    }
}

/// Owned handle to the scheduled advance task. Dropping the guard aborts the
/// task, so replacing `pending` is all it takes to cancel a countdown.
struct AdvanceGuard {
    handle: JoinHandle<()>,
}

impl Drop for AdvanceGuard {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

struct EngineState {
    deck: Vec<Slide>,
    loading: bool,
    index: usize,
    gallery_index: usize,
    video_index: usize,
    /// Monotonic anchor for the current slide, used by timer tasks to check
    /// real elapsed time independently of when the runtime woke them.
    entered: Instant,
    /// Wall-clock mirror of `entered`, reported in frames.
    entered_at: DateTime<Utc>,
    /// Bumped every time a slide is (re-)entered. Timer ticks from an older
    /// epoch are discarded.
    epoch: u64,
    pending: Option<AdvanceGuard>,
}

impl EngineState {
    /// Identity of the running countdown: current position plus its resolved
    /// duration. A deck swap that leaves this pair intact must not touch the
    /// timer.
    fn timer_key(&self) -> Option<(usize, u64)> {
        if self.loading {
            return None;
        }
        self.deck.get(self.index).map(|s| (self.index, s.duration_ms))
    }
}

struct EngineShared {
    state: Mutex<EngineState>,
    frames: watch::Sender<DisplayFrame>,
}

impl EngineShared {
    /// A poisoned lock only means a timer task panicked mid-update; the
    /// indices it guards remain usable, so recover the guard.
    fn lock_state(&self) -> MutexGuard<'_, EngineState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Mark the current slide as freshly entered and arm its advance timer.
    /// Cancels whatever countdown was running. No timer is armed while
    /// loading or when the deck is empty.
    fn arm(self: &Arc<Self>, state: &mut EngineState) {
        state.pending = None;
        state.epoch = state.epoch.wrapping_add(1);
        state.entered = Instant::now();
        state.entered_at = Utc::now();

        if state.loading || state.deck.is_empty() {
            return;
        }

        let target = Duration::from_millis(state.deck[state.index].duration_ms);
        let anchor = state.entered;
        let epoch = state.epoch;
        let shared = Arc::downgrade(self);

        let handle = tokio::spawn(async move {
            run_timer(shared, anchor, target, epoch).await;
        });
        state.pending = Some(AdvanceGuard { handle });
    }

    /// Timer callback: advance only if the slide that armed us is still the
    /// one on screen.
    fn advance_if_current(self: &Arc<Self>, epoch: u64) {
        let mut state = self.lock_state();
        if state.epoch != epoch {
            return;
        }
        self.advance_locked(&mut state);
        self.publish_locked(&state);
    }

    /// The natural forward transition, with the sub-index rules: arriving on
    /// a gallery bumps the gallery cursor, arriving on a video rewinds it,
    /// and wrapping to the top of the deck clears both.
    fn advance_locked(self: &Arc<Self>, state: &mut EngineState) {
        let len = state.deck.len();
        if len == 0 {
            return;
        }
        let next = (state.index + 1) % len;
        if next == 0 {
            state.gallery_index = 0;
            state.video_index = 0;
        } else {
            match state.deck[next].kind {
                SlideKind::Gallery => state.gallery_index += 1,
                SlideKind::Video => state.video_index = 0,
                SlideKind::Table => {}
            }
        }
        state.index = next;
        self.arm(state);
    }

    fn frame_locked(&self, state: &EngineState) -> DisplayFrame {
        let slide = state.deck.get(state.index).cloned();
        let advance_at = if state.pending.is_some() {
            slide
                .as_ref()
                .map(|s| state.entered_at + chrono::Duration::milliseconds(s.duration_ms as i64))
        } else {
            None
        };
        DisplayFrame {
            loading: state.loading,
            index: state.index,
            total: state.deck.len(),
            slide,
            gallery_index: state.gallery_index,
            video_index: state.video_index,
            entered_at: state.entered_at,
            advance_at,
        }
    }

    /// Publish the current frame if it differs from the last published one.
    /// Content-identical refetches therefore produce no subscriber traffic.
    fn publish_locked(&self, state: &EngineState) {
        let frame = self.frame_locked(state);
        self.frames.send_if_modified(|current| {
            if *current == frame {
                false
            } else {
                *current = frame;
                true
            }
        });
    }
}

/// Sleep until the slide's duration has really elapsed, then advance. The
/// loop re-arms for the remainder when a tick lands early.
async fn run_timer(shared: Weak<EngineShared>, anchor: Instant, target: Duration, epoch: u64) {
    let mut wait = target;
    loop {
        sleep(wait).await;
        match advance_decision(anchor.elapsed(), target) {
            TickOutcome::Advance => break,
            TickOutcome::Rearm(remaining) => wait = remaining,
        }
    }
    if let Some(shared) = shared.upgrade() {
        shared.advance_if_current(epoch);
    }
}

/// Handle to the rotation engine. Cloning is cheap; clones drive the same
/// underlying state.
#[derive(Clone)]
pub struct CarouselEngine {
    shared: Arc<EngineShared>,
}

impl CarouselEngine {
    pub fn new() -> Self {
        let now = Utc::now();
        let initial = DisplayFrame {
            loading: true,
            index: 0,
            total: 0,
            slide: None,
            gallery_index: 0,
            video_index: 0,
            entered_at: now,
            advance_at: None,
        };
        let (frames, _) = watch::channel(initial);
        let state = EngineState {
            deck: Vec::new(),
            loading: true,
            index: 0,
            gallery_index: 0,
            video_index: 0,
            entered: Instant::now(),
            entered_at: now,
            epoch: 0,
            pending: None,
        };
        Self {
            shared: Arc::new(EngineShared {
                state: Mutex::new(state),
                frames,
            }),
        }
    }

    /// The last published frame.
    pub fn current_frame(&self) -> DisplayFrame {
        self.shared.frames.borrow().clone()
    }

    /// Subscribe to frame changes. The receiver immediately holds the
    /// current frame.
    pub fn subscribe(&self) -> watch::Receiver<DisplayFrame> {
        self.shared.frames.subscribe()
    }

    /// Snapshot of the deck currently in rotation.
    pub fn deck(&self) -> Vec<Slide> {
        self.shared.lock_state().deck.clone()
    }

    /// Swap in a freshly fetched deck.
    ///
    /// The running countdown is left untouched unless the current position
    /// or its resolved duration changed under the swap; only then is the
    /// slide treated as re-entered. Sub-indices always survive a refetch.
    pub fn set_deck(&self, deck: Vec<Slide>) {
        let shared = &self.shared;
        let mut state = shared.lock_state();
        let was_loading = state.loading;
        state.loading = false;

        let old_key = state.timer_key();
        state.deck = deck;

        if state.deck.is_empty() {
            state.index = 0;
            state.gallery_index = 0;
            state.video_index = 0;
            shared.arm(&mut state);
            shared.publish_locked(&state);
            return;
        }

        if state.index >= state.deck.len() {
            state.index %= state.deck.len();
        }

        if was_loading || old_key != state.timer_key() {
            shared.arm(&mut state);
        }
        shared.publish_locked(&state);
    }

    /// Mark the initial load as finished without supplying a deck. Used when
    /// the first fetch fails outright so the display can show its empty
    /// state instead of a spinner forever.
    pub fn mark_loaded(&self) {
        let shared = &self.shared;
        let mut state = shared.lock_state();
        if !state.loading {
            return;
        }
        state.loading = false;
        shared.publish_locked(&state);
    }

    /// Manual step forward. Resets both sub-indices and restarts the
    /// countdown with the new slide's duration.
    pub fn next(&self) -> DisplayFrame {
        self.manual(|index, len| (index + 1) % len)
    }

    /// Manual step backward, wrapping from the first slide to the last.
    pub fn previous(&self) -> DisplayFrame {
        self.manual(|index, len| if index == 0 { len - 1 } else { index - 1 })
    }

    /// Jump straight to a position, clamped into the deck bounds.
    pub fn jump_to(&self, target: i64) -> DisplayFrame {
        self.manual(move |_, len| {
            let max = (len - 1) as i64;
            target.clamp(0, max) as usize
        })
    }

    fn manual(&self, transition: impl FnOnce(usize, usize) -> usize) -> DisplayFrame {
        let shared = &self.shared;
        let mut state = shared.lock_state();
        if !state.deck.is_empty() {
            state.index = transition(state.index, state.deck.len());
            state.gallery_index = 0;
            state.video_index = 0;
            shared.arm(&mut state);
        }
        shared.publish_locked(&state);
        shared.frame_locked(&state)
    }

    /// Cancel the pending advance and stop publishing. Called once on server
    /// shutdown so no timer task outlives the services.
    pub fn shutdown(&self) {
        let shared = &self.shared;
        let mut state = shared.lock_state();
        state.epoch = state.epoch.wrapping_add(1);
        state.pending = None;
        shared.publish_locked(&state);
    }
}

impl Default for CarouselEngine {
    fn default() -> Self {
        Self::new()
    }
}
