//! Inter-task communication
//!
//! The step queue between the encoder's edge handler and the step logger,
//! plus the concrete encoder types the tasks are written against.

use detent_core::{DeferredSteps, Encoder, Step};
use detent_hal_rp2040::EdgeWatcher;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

/// Channel capacity for confirmed steps
///
/// A fast spin outruns the logger; overflow is counted, not queued.
pub const STEP_CHANNEL_SIZE: usize = 16;

/// Confirmed steps, in order, for the step logger
pub static STEP_CHANNEL: Channel<CriticalSectionRawMutex, Step, STEP_CHANNEL_SIZE> =
    Channel::new();

/// Handler queuing steps on [`STEP_CHANNEL`]
pub type StepQueue = DeferredSteps<'static, CriticalSectionRawMutex, STEP_CHANNEL_SIZE>;

/// The knob's encoder
pub type KnobEncoder = Encoder<CriticalSectionRawMutex, StepQueue>;

/// Watcher driving [`KnobEncoder`] from its pins
pub type KnobWatcher = EdgeWatcher<'static, CriticalSectionRawMutex, StepQueue>;
