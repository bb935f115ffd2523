//! **algoviz-playback** — Replays a materialized step sequence.
//!
//! [`PlaybackEngine`] consumes a [`StepSequence`](algoviz_core::StepSequence)
//! and exposes play/pause/step/seek/reset semantics over it. The auto-play
//! loop is cooperative: between steps it sleeps in short poll slices,
//! checking the pause flag and the cancellation [`Token`], so stopping and
//! pausing take effect promptly without any locking discipline beyond a
//! handful of flags.

pub mod engine;
pub mod token;

pub use engine::{PlaybackEngine, PlaybackState};
pub use token::Token;
