//! Quadrature encoder
//!
//! The decoding state machine, the lock-guarded shared encoder built on it,
//! step notification and the interrupt binding.

pub mod binding;
pub mod decoder;
pub mod notify;
pub mod shared;

pub use binding::{BindError, EncoderBinding};
pub use decoder::{Decoder, EdgeOutcome};
pub use notify::{DeferredSteps, Step, StepHandler};
pub use shared::Encoder;
