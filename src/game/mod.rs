pub mod models;

pub use models::{GameObservation, RawObservation, DEFAULT_TIMEOUTS};
