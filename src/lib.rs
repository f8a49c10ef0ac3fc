//! Win probabilities for the three outcomes of a post-touchdown try.
//!
//! [`wp::project`] turns a game observation into the fail / extra point /
//! two-point states seen by the team receiving the ball next, and
//! [`wp::translate`] scores them with a [`wp::ProbabilityModel`] and flips
//! the result to the leader's side.

pub mod config;
pub mod error;
pub mod game;
pub mod wp;

pub use error::{Result, TryWpError};
pub use game::{GameObservation, RawObservation};
pub use wp::{evaluate, project, translate, ProbabilityModel, TryOutcome, WinProbabilityResult};
