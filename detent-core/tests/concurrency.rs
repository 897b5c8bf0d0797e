//! Encoder shared between threads
//!
//! Uses the std critical-section implementation so `CriticalSectionRawMutex`
//! behaves as it would with edges arriving in an interrupt.

use std::cell::Cell;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::thread;

use detent_core::encoder::EncoderBinding;
use detent_core::{DeferredSteps, Encoder, EncoderConfig, PhaseReading, Step};
use detent_hal::{EdgeInterrupt, InputPin};
use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, NoopRawMutex};
use embassy_sync::channel::Channel;

const CW_DETENT: [PhaseReading; 4] = [
    PhaseReading::B,
    PhaseReading::Both,
    PhaseReading::A,
    PhaseReading::Rest,
];

const DETENTS: i32 = 5_000;

#[test]
fn readers_only_see_confirmed_prefixes() {
    let encoder: Encoder<CriticalSectionRawMutex> = Encoder::new(EncoderConfig::UNBOUNDED, ());
    let done = AtomicBool::new(false);

    thread::scope(|s| {
        for _ in 0..3 {
            s.spawn(|| {
                let mut last = 0;
                while !done.load(Ordering::Acquire) {
                    let value = encoder.value();
                    // Clockwise only: values never go backwards or overshoot
                    assert!(value >= last, "value went backwards: {} -> {}", last, value);
                    assert!(value <= DETENTS);
                    last = value;
                }
            });
        }

        s.spawn(|| {
            for _ in 0..DETENTS {
                for reading in CW_DETENT {
                    encoder.on_edge(reading);
                }
            }
            done.store(true, Ordering::Release);
        });
    });

    assert_eq!(encoder.value(), DETENTS);
}

#[test]
fn concurrent_edges_are_serialized() {
    // Two sources deliver the same edges (a pin bounce seen twice). The
    // handler runs under the encoder lock, so the steps it sees form one
    // chain: each moves the value by exactly its direction's delta from
    // the previous one. A lost update would break the chain.
    let steps = Mutex::new(Vec::new());
    let encoder: Encoder<CriticalSectionRawMutex, _> =
        Encoder::new(EncoderConfig::UNBOUNDED, |step: Step| {
            steps.lock().unwrap().push(step)
        });

    thread::scope(|s| {
        for _ in 0..2 {
            s.spawn(|| {
                for _ in 0..1_000 {
                    for reading in CW_DETENT {
                        encoder.on_edge(reading);
                    }
                }
            });
        }
    });

    let steps = steps.lock().unwrap().clone();
    assert!(steps.len() <= 2_000);

    let mut value = 0;
    for step in &steps {
        assert_eq!(step.value, value + step.direction.delta());
        value = step.value;
    }
    assert_eq!(encoder.value(), value);
    assert_eq!(encoder.reading(), PhaseReading::Rest);
}

#[test]
fn deferred_steps_arrive_in_order() {
    static STEPS: Channel<CriticalSectionRawMutex, Step, 64> = Channel::new();
    let encoder: Encoder<CriticalSectionRawMutex, _> =
        Encoder::new(EncoderConfig::UNBOUNDED, DeferredSteps::new(&STEPS));

    thread::scope(|s| {
        s.spawn(|| {
            for _ in 0..32 {
                for reading in CW_DETENT {
                    encoder.on_edge(reading);
                }
            }
        });
    });

    for expected in 1..=32 {
        assert_eq!(STEPS.try_receive().map(|step| step.value), Ok(expected));
    }
    assert!(STEPS.try_receive().is_err());
    assert_eq!(encoder.handler().dropped(), 0);
}

#[test]
fn panicking_handler_leaves_state_consistent() {
    let encoder: Encoder<NoopRawMutex, _> =
        Encoder::new(EncoderConfig::UNBOUNDED, |step: Step| {
            if step.value == 1 {
                panic!("handler failure");
            }
        });

    let result = catch_unwind(AssertUnwindSafe(|| {
        for reading in CW_DETENT {
            encoder.on_edge(reading);
        }
    }));
    assert!(result.is_err());

    // The step that panicked was fully applied
    assert_eq!(encoder.value(), 1);
    assert_eq!(encoder.reading(), PhaseReading::Rest);

    for reading in CW_DETENT {
        encoder.on_edge(reading);
    }
    assert_eq!(encoder.value(), 2);
}

struct TrackedPin<'a> {
    armed: &'a Cell<bool>,
}

impl InputPin for TrackedPin<'_> {
    fn is_high(&self) -> bool {
        false
    }
}

impl EdgeInterrupt for TrackedPin<'_> {
    type Error = ();

    fn listen_any_edge(&mut self) -> Result<(), ()> {
        self.armed.set(true);
        Ok(())
    }

    fn unlisten(&mut self) {
        self.armed.set(false);
    }

    fn is_listening(&self) -> bool {
        self.armed.get()
    }
}

#[test]
fn binding_released_when_unwinding() {
    let a_armed = Cell::new(false);
    let b_armed = Cell::new(false);
    let encoder: Encoder<NoopRawMutex> = Encoder::new(EncoderConfig::UNBOUNDED, ());

    let result = catch_unwind(AssertUnwindSafe(|| {
        let _binding = EncoderBinding::attach(
            &encoder,
            TrackedPin { armed: &a_armed },
            TrackedPin { armed: &b_armed },
        )
        .unwrap();
        assert!(a_armed.get() && b_armed.get());
        panic!("application failure while bound");
    }));

    assert!(result.is_err());
    assert!(!a_armed.get());
    assert!(!b_armed.get());
}
