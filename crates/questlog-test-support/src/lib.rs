//! Shared test doubles and utilities for Questlog.

mod clock;
mod narration;
mod rng;
mod store;

pub use clock::FixedClock;
pub use narration::{FailingGateway, ScriptedGateway};
pub use rng::{MockRng, SequenceRng};
pub use store::{EmptyRecordStore, FailingRecordStore, ReadOnlyRecordStore};
