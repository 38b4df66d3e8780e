//! Shared foundation for the `algostep` engines.
//!
//! Every algorithm crate in the workspace builds on three things provided
//! here:
//!
//! - [`Point`], a 2D integer coordinate used by the grid-based engines;
//! - the trace machinery ([`Tracer`], [`Control`], [`Cancelled`]) through
//!   which engines deliver step records to a caller-supplied sink;
//! - the common [`Error`] type covering malformed input and cooperative
//!   cancellation.
//!
//! Engines emit one step record per point of interest, synchronously and in
//! strict chronological order. The sink decides after each step whether the
//! algorithm keeps going; pacing, rendering and playback are entirely the
//! caller's concern.

mod error;
mod geom;
mod trace;

pub use error::Error;
pub use geom::Point;
pub use trace::{Cancelled, Control, Tracer, collector, ignore};
