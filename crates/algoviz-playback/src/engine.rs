//! The playback engine.

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::debug;

use algoviz_core::{Step, StepSequence};

use crate::token::Token;

/// How often the auto-play loop checks the pause flag and the cancellation
/// token, independent of the per-step delay.
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Fastest and slowest playback speeds. The per-step delay is
/// `1000 / speed` milliseconds.
const MIN_SPEED: u32 = 1;
const MAX_SPEED: u32 = 100;

/// Playback lifecycle: `Stopped → Playing ⇄ Paused → Stopped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
    Paused,
}

/// Step-change callback, invoked once per index change.
type OnStep = Box<dyn FnMut(usize) + Send>;

/// State shared between the engine and its auto-play worker thread.
///
/// The only mutable shared resources are the current index and the
/// play/pause flags, touched by the single worker loop and the synchronous
/// control methods that toggle them.
struct Shared<S> {
    steps: Mutex<Option<Arc<StepSequence<S>>>>,
    index: AtomicUsize,
    state: Mutex<PlaybackState>,
    speed: AtomicU32,
    paused: AtomicBool,
    on_step: Mutex<Option<OnStep>>,
}

impl<S> Shared<S> {
    fn notify(&self, index: usize) {
        if let Some(cb) = self.on_step.lock().unwrap().as_mut() {
            cb(index);
        }
    }
}

/// Replays one step sequence with cooperative auto-play.
///
/// Step **generation** is fully synchronous; only playback suspends.
/// [`play`](Self::play) drives a worker loop that advances the index once
/// per step delay, yielding in short poll slices so [`pause`](Self::pause)
/// and [`stop`](Self::stop) take effect within [`POLL_INTERVAL`] rather
/// than within a full step delay.
pub struct PlaybackEngine<S> {
    shared: Arc<Shared<S>>,
    token: Token,
    worker: Option<JoinHandle<()>>,
}

impl<S> Default for PlaybackEngine<S>
where
    S: Step + Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> PlaybackEngine<S>
where
    S: Step + Clone + Send + Sync + 'static,
{
    /// Create an engine with nothing loaded.
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                steps: Mutex::new(None),
                index: AtomicUsize::new(0),
                state: Mutex::new(PlaybackState::Stopped),
                speed: AtomicU32::new(MIN_SPEED),
                paused: AtomicBool::new(false),
                on_step: Mutex::new(None),
            }),
            token: Token::new(),
            worker: None,
        }
    }

    /// Load a sequence, cancelling any active loop and rewinding to the
    /// init step.
    pub fn load_steps(&mut self, steps: StepSequence<S>) {
        self.halt_worker();
        *self.shared.steps.lock().unwrap() = Some(Arc::new(steps));
        self.shared.index.store(0, Ordering::Relaxed);
        debug!("loaded step sequence");
    }

    /// Register the step-change notification. Raised once per index change,
    /// whether the change came from the auto-play loop or a manual step.
    pub fn set_on_step(&mut self, callback: impl FnMut(usize) + Send + 'static) {
        *self.shared.on_step.lock().unwrap() = Some(Box::new(callback));
    }

    /// The current index into the loaded sequence.
    pub fn current_index(&self) -> usize {
        self.shared.index.load(Ordering::Relaxed)
    }

    /// A copy of the step at the current index, if a sequence is loaded.
    pub fn current_step(&self) -> Option<S> {
        let steps = self.shared.steps.lock().unwrap();
        steps
            .as_ref()
            .and_then(|s| s.get(self.current_index()).cloned())
    }

    /// Current playback state.
    pub fn state(&self) -> PlaybackState {
        *self.shared.state.lock().unwrap()
    }

    /// Begin auto-play from the current index.
    ///
    /// A no-op when already playing, when nothing is loaded, or when the
    /// sequence is exhausted. When paused, behaves like
    /// [`resume`](Self::resume).
    pub fn play(&mut self) {
        match self.state() {
            PlaybackState::Playing => return,
            PlaybackState::Paused => {
                self.resume();
                return;
            }
            PlaybackState::Stopped => {}
        }
        let Some(steps) = self.shared.steps.lock().unwrap().clone() else {
            return;
        };
        if self.current_index() + 1 >= steps.len() {
            return;
        }

        // Reap a finished worker from an earlier run.
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }

        self.token = Token::new();
        self.shared.paused.store(false, Ordering::Relaxed);
        *self.shared.state.lock().unwrap() = PlaybackState::Playing;
        debug!("auto-play started at index {}", self.current_index());

        let shared = Arc::clone(&self.shared);
        let token = self.token.clone();
        self.worker = Some(thread::spawn(move || run_loop(shared, token, steps)));
    }

    /// Pause auto-play. The loop keeps polling but stops advancing.
    pub fn pause(&self) {
        let mut state = self.shared.state.lock().unwrap();
        if *state == PlaybackState::Playing {
            self.shared.paused.store(true, Ordering::Relaxed);
            *state = PlaybackState::Paused;
            debug!("paused at index {}", self.current_index());
        }
    }

    /// Resume a paused loop.
    pub fn resume(&self) {
        let mut state = self.shared.state.lock().unwrap();
        if *state == PlaybackState::Paused {
            self.shared.paused.store(false, Ordering::Relaxed);
            *state = PlaybackState::Playing;
            debug!("resumed at index {}", self.current_index());
        }
    }

    /// Cancel any active loop. The index stays where it is.
    pub fn stop(&mut self) {
        self.halt_worker();
        debug!("stopped at index {}", self.current_index());
    }

    /// Advance the index by one, clamped to the end of the sequence.
    ///
    /// Returns whether the index moved. Refused while auto-play is running
    /// unpaused (manual stepping against the live loop is racy by design,
    /// so the engine rejects it rather than leaving it undefined).
    pub fn step_forward(&mut self) -> bool {
        if self.state() == PlaybackState::Playing {
            return false;
        }
        let len = match self.shared.steps.lock().unwrap().as_ref() {
            Some(s) => s.len(),
            None => return false,
        };
        let i = self.current_index();
        if i + 1 >= len {
            return false;
        }
        self.shared.index.store(i + 1, Ordering::Relaxed);
        self.shared.notify(i + 1);
        true
    }

    /// Move the index back by one, clamped to the start. Returns whether
    /// the index moved. Refused while auto-play is running unpaused.
    pub fn step_backward(&mut self) -> bool {
        if self.state() == PlaybackState::Playing {
            return false;
        }
        if self.shared.steps.lock().unwrap().is_none() {
            return false;
        }
        let i = self.current_index();
        if i == 0 {
            return false;
        }
        self.shared.index.store(i - 1, Ordering::Relaxed);
        self.shared.notify(i - 1);
        true
    }

    /// Cancel any active loop and rewind to the init step.
    pub fn reset(&mut self) {
        self.halt_worker();
        if self.current_index() != 0 {
            self.shared.index.store(0, Ordering::Relaxed);
            self.shared.notify(0);
        }
        debug!("reset to start");
    }

    /// Set the playback speed, clamped to `[1, 100]`. The per-step delay
    /// is `1000 / speed` milliseconds.
    pub fn set_speed(&self, speed: u32) {
        self.shared
            .speed
            .store(speed.clamp(MIN_SPEED, MAX_SPEED), Ordering::Relaxed);
    }

    /// Current playback speed.
    pub fn speed(&self) -> u32 {
        self.shared.speed.load(Ordering::Relaxed)
    }

    /// Whether the index sits on the init step.
    pub fn is_at_start(&self) -> bool {
        self.current_index() == 0
    }

    /// Whether the index sits on the terminal step.
    pub fn is_at_end(&self) -> bool {
        match self.shared.steps.lock().unwrap().as_ref() {
            Some(s) => self.current_index() + 1 >= s.len(),
            None => false,
        }
    }

    /// Progress through the sequence as a percentage in `[0, 100]`.
    pub fn progress(&self) -> u32 {
        match self.shared.steps.lock().unwrap().as_ref() {
            Some(s) if s.len() > 1 => {
                (self.current_index() * 100 / (s.len() - 1)) as u32
            }
            _ => 0,
        }
    }

    /// Cancel the token and join the worker, leaving the engine stopped.
    fn halt_worker(&mut self) {
        self.token.cancel();
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
        self.shared.paused.store(false, Ordering::Relaxed);
        *self.shared.state.lock().unwrap() = PlaybackState::Stopped;
    }
}

impl<S> Drop for PlaybackEngine<S> {
    fn drop(&mut self) {
        self.token.cancel();
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
    }
}

/// The auto-play loop: sleep out the step delay in poll slices, then
/// advance. Runs until cancelled, paused forever, or the sequence ends.
fn run_loop<S: Step>(shared: Arc<Shared<S>>, token: Token, steps: Arc<StepSequence<S>>) {
    'outer: loop {
        if token.is_done() {
            break;
        }
        if shared.paused.load(Ordering::Relaxed) {
            thread::sleep(POLL_INTERVAL);
            continue;
        }

        let speed = shared.speed.load(Ordering::Relaxed).max(MIN_SPEED);
        let delay = Duration::from_millis(1000 / speed as u64);
        let mut slept = Duration::ZERO;
        while slept < delay {
            let slice = POLL_INTERVAL.min(delay - slept);
            thread::sleep(slice);
            slept += slice;
            if token.is_done() {
                break 'outer;
            }
            if shared.paused.load(Ordering::Relaxed) {
                // Pausing mid-delay restarts the delay on resume.
                continue 'outer;
            }
        }

        let i = shared.index.load(Ordering::Relaxed);
        if i + 1 >= steps.len() {
            break;
        }
        shared.index.store(i + 1, Ordering::Relaxed);
        shared.notify(i + 1);
        if i + 2 >= steps.len() {
            break;
        }
    }

    shared.paused.store(false, Ordering::Relaxed);
    *shared.state.lock().unwrap() = PlaybackState::Stopped;
    debug!("auto-play loop finished at index {}", shared.index.load(Ordering::Relaxed));
}
