//! Temperature-driven output fading for thermofade.
//!
//! A fader maps the highest temperature among a tagged group of sensors onto
//! a PWM duty range, producing smooth fan/light transitions instead of abrupt
//! on/off switching. Below the fade band the output idles; above it the
//! output sits at maximum; inside it the duty ramps linearly.
//!
//! # Architecture
//!
//! - [`FadeBand`] is the pure temperature→duty mapping
//! - [`FaderController`] owns the per-instance state machine: an adaptive
//!   poll countdown, the bound sensor/switch handles, and idempotent dispatch
//! - [`build_faders`] resolves raw config entries against the device registry
//!   at startup (invalid entries are dropped, never fatal)
//! - [`FaderBank`] fans a periodic tick out to every controller; the host
//!   process owns the timer and calls [`FaderBank::tick`] once per second
//!
//! # Design Principles
//!
//! - **Recomputed state**: idle/full/fading is derived from the sampled
//!   temperature on every poll, never stored
//! - **Adaptive cadence**: slow polls while idle or fully on, fast polls
//!   while mid-transition
//! - **Best-effort output**: switch writes are never retried; failures are
//!   logged and the loop moves on

pub mod band;
pub mod bank;
pub mod error;
pub mod factory;
pub mod fader;

pub use band::{FadeBand, FadeRegion};
pub use bank::FaderBank;
pub use error::{ControlError, ControlResult};
pub use factory::build_faders;
pub use fader::{FaderController, PollIntervals};
