//! Step notifications
//!
//! A [`StepHandler`] is told about every confirmed step after the value has
//! been updated. Handlers run inside the encoder's critical section, so they
//! must return quickly and must never feed readings back into the encoder.
//!
//! Two flavours are provided:
//!
//! - Any `Fn(Step)` closure runs synchronously in the edge context.
//! - [`DeferredSteps`] queues steps on an embassy channel so a task can
//!   handle them outside interrupt context, in confirmation order.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Channel;
use portable_atomic::{AtomicU32, Ordering};

use crate::phase::Direction;

/// A confirmed detent-to-detent step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Step {
    /// Encoder value after the step (clamped to the configured bounds)
    pub value: i32,
    /// Direction of rotation; never `Unknown`
    pub direction: Direction,
}

/// Receiver of confirmed steps
pub trait StepHandler {
    /// Called once per confirmed step
    fn on_step(&self, step: Step);
}

/// No handler registered
impl StepHandler for () {
    fn on_step(&self, _step: Step) {}
}

impl<F> StepHandler for F
where
    F: Fn(Step),
{
    fn on_step(&self, step: Step) {
        self(step)
    }
}

/// Queue steps for a task to handle outside the edge context
///
/// Steps are pushed with `try_send`. If the consumer falls behind and the
/// channel is full, the step is dropped and counted; the encoder value
/// itself is never lost.
pub struct DeferredSteps<'a, M: RawMutex, const N: usize> {
    channel: &'a Channel<M, Step, N>,
    dropped: AtomicU32,
}

impl<'a, M: RawMutex, const N: usize> DeferredSteps<'a, M, N> {
    /// Create a handler feeding `channel`
    pub const fn new(channel: &'a Channel<M, Step, N>) -> Self {
        Self {
            channel,
            dropped: AtomicU32::new(0),
        }
    }

    /// The channel steps are queued on
    pub fn channel(&self) -> &'a Channel<M, Step, N> {
        self.channel
    }

    /// Number of steps dropped because the channel was full
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl<M: RawMutex, const N: usize> StepHandler for DeferredSteps<'_, M, N> {
    fn on_step(&self, step: Step) {
        if self.channel.try_send(step).is_err() {
            self.dropped.fetch_add(1, Ordering::Relaxed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    const CW: Step = Step {
        value: 1,
        direction: Direction::Clockwise,
    };

    #[test]
    fn test_closure_handler() {
        let last = Cell::new(None);
        let handler = |step: Step| last.set(Some(step));

        handler.on_step(CW);
        assert_eq!(last.get(), Some(CW));
    }

    #[test]
    fn test_unit_handler_ignores_steps() {
        ().on_step(CW);
    }

    #[test]
    fn test_deferred_preserves_order() {
        let channel: Channel<NoopRawMutex, Step, 4> = Channel::new();
        let handler = DeferredSteps::new(&channel);

        for value in 1..=3 {
            handler.on_step(Step {
                value,
                direction: Direction::Clockwise,
            });
        }

        for value in 1..=3 {
            assert_eq!(channel.try_receive().map(|s| s.value), Ok(value));
        }
        assert!(channel.try_receive().is_err());
        assert_eq!(handler.dropped(), 0);
    }

    #[test]
    fn test_deferred_counts_drops_when_full() {
        let channel: Channel<NoopRawMutex, Step, 2> = Channel::new();
        let handler = DeferredSteps::new(&channel);

        for _ in 0..5 {
            handler.on_step(CW);
        }

        assert_eq!(handler.dropped(), 3);
        assert_eq!(handler.channel().len(), 2);
    }
}
