//! Step emission and cooperative cancellation.
//!
//! Engines do not sleep, render or buffer: they hand each step record to a
//! caller-supplied sink the moment it is produced and block until the sink
//! returns. The sink's [`Control`] return value is the only cancellation
//! channel; a `Stop` surfaces inside the engine as a [`Cancelled`] error
//! that unwinds any recursion in flight without corrupting the snapshots
//! already delivered.

use std::fmt;

/// Returned by a step sink to tell the engine whether to keep going.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Control {
    /// Proceed to the next step.
    #[default]
    Continue,
    /// Stop now; the engine emits no further steps.
    Stop,
}

/// The step sink asked the engine to stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("algorithm stopped by caller")
    }
}

impl std::error::Error for Cancelled {}

/// Forwards step records to a sink, tracking the running step index.
///
/// The sink receives each step together with its zero-based index. `emit`
/// returns `Err(Cancelled)` when the sink answers [`Control::Stop`]; the
/// step that triggered the stop has already been delivered, so its snapshot
/// remains valid on the caller's side.
pub struct Tracer<'a, S> {
    sink: Box<dyn FnMut(S, usize) -> Control + 'a>,
    emitted: usize,
}

impl<'a, S> Tracer<'a, S> {
    /// Wrap a step sink.
    pub fn new(sink: impl FnMut(S, usize) -> Control + 'a) -> Self {
        Self {
            sink: Box::new(sink),
            emitted: 0,
        }
    }

    /// Deliver one step to the sink.
    pub fn emit(&mut self, step: S) -> Result<(), Cancelled> {
        let idx = self.emitted;
        self.emitted += 1;
        match (self.sink)(step, idx) {
            Control::Continue => Ok(()),
            Control::Stop => Err(Cancelled),
        }
    }

    /// Number of steps delivered so far.
    pub fn emitted(&self) -> usize {
        self.emitted
    }
}

/// A sink that appends every step to `buf` and never stops the engine.
pub fn collector<S>(buf: &mut Vec<S>) -> impl FnMut(S, usize) -> Control + '_ {
    |step, _| {
        buf.push(step);
        Control::Continue
    }
}

/// A sink that discards every step.
pub fn ignore<S>() -> impl FnMut(S, usize) -> Control {
    |_, _| Control::Continue
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emits_in_order_with_indices() {
        let mut seen = Vec::new();
        let mut tracer = Tracer::new(|step: u32, idx| {
            seen.push((step, idx));
            Control::Continue
        });
        for s in [10, 20, 30] {
            tracer.emit(s).unwrap();
        }
        let emitted = tracer.emitted();
        drop(tracer);
        assert_eq!(seen, vec![(10, 0), (20, 1), (30, 2)]);
        assert_eq!(emitted, 3);
    }

    #[test]
    fn stop_becomes_cancelled() {
        let mut tracer = Tracer::new(|step: u32, _| {
            if step >= 2 {
                Control::Stop
            } else {
                Control::Continue
            }
        });
        assert_eq!(tracer.emit(0), Ok(()));
        assert_eq!(tracer.emit(1), Ok(()));
        assert_eq!(tracer.emit(2), Err(Cancelled));
        // The stopping step was still delivered.
        assert_eq!(tracer.emitted(), 3);
    }

    #[test]
    fn collector_keeps_everything() {
        let mut buf = Vec::new();
        {
            let mut tracer = Tracer::new(collector(&mut buf));
            tracer.emit("a").unwrap();
            tracer.emit("b").unwrap();
        }
        assert_eq!(buf, vec!["a", "b"]);
    }

    #[test]
    fn cancelled_display() {
        assert_eq!(Cancelled.to_string(), "algorithm stopped by caller");
    }
}
