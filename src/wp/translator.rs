use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::error::{Result, TryWpError};
use crate::game::GameObservation;

use super::features::{FeatureMatrix, PostTryState, TryOutcome};
use super::model::{ModelError, ProbabilityModel};
use super::projector::project;

/// Upper bound on a leader probability. Keeps downstream log-odds finite;
/// there is deliberately no lower bound.
pub const MAX_LEADER_WP: f64 = 0.999_999;

/// Leader win probability for each try outcome.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WinProbabilityResult {
    pub fail: f64,
    pub xp_good: f64,
    #[serde(rename = "2pt_good")]
    pub two_pt_good: f64,
}

impl WinProbabilityResult {
    pub fn get(&self, outcome: TryOutcome) -> f64 {
        match outcome {
            TryOutcome::Fail => self.fail,
            TryOutcome::XpGood => self.xp_good,
            TryOutcome::TwoPtGood => self.two_pt_good,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (TryOutcome, f64)> + '_ {
        TryOutcome::ALL.into_iter().map(move |o| (o, self.get(o)))
    }

    /// Keyed by branch label.
    pub fn to_map(&self) -> BTreeMap<&'static str, f64> {
        self.iter().map(|(o, p)| (o.label(), p)).collect()
    }
}

/// Flip an offense win probability to the leader's side and cap it.
pub fn leader_win_probability(offense_wp: f64) -> f64 {
    (1.0 - offense_wp).min(MAX_LEADER_WP)
}

/// Score the three post-try states with one batched model call and convert
/// the offense probabilities to the leader's perspective.
///
/// Model failures propagate as-is; nothing is retried. Outputs that are not
/// finite or fall outside [0, 1] are rejected as `ModelInvocation`, not clamped.
pub fn translate<M>(states: &[PostTryState; 3], model: &M) -> Result<WinProbabilityResult>
where
    M: ProbabilityModel + ?Sized,
{
    if !states.iter().map(|s| s.branch).eq(TryOutcome::ALL) {
        return Err(TryWpError::invalid(
            "states",
            "rows must be ordered fail, xp_good, 2pt_good",
        ));
    }

    let matrix = FeatureMatrix::from_states(states);
    let offense = model.predict(&matrix).map_err(|e| match e {
        ModelError::SchemaMismatch { expected, found } => {
            TryWpError::SchemaMismatch { expected, found }
        }
        ModelError::Failed(msg) => TryWpError::ModelInvocation(msg),
    })?;

    if offense.len() != states.len() {
        return Err(TryWpError::ModelInvocation(format!(
            "model returned {} probabilities for {} rows",
            offense.len(),
            states.len()
        )));
    }
    if let Some(bad) = offense
        .iter()
        .find(|p| !p.is_finite() || !(0.0..=1.0).contains(*p))
    {
        return Err(TryWpError::ModelInvocation(format!(
            "model returned {bad}, outside [0, 1]"
        )));
    }

    let leader: Vec<f64> = offense.iter().copied().map(leader_win_probability).collect();
    for (state, (p_off, p_lead)) in states.iter().zip(offense.iter().zip(&leader)) {
        debug!(
            "{}: offense WP {:.6} -> leader WP {:.6}",
            state.branch, p_off, p_lead
        );
    }

    Ok(WinProbabilityResult {
        fail: leader[0],
        xp_good: leader[1],
        two_pt_good: leader[2],
    })
}

/// Project then translate: the full evaluation for one observation.
pub fn evaluate<M>(
    observation: &GameObservation,
    base_margin: i32,
    model: &M,
) -> Result<WinProbabilityResult>
where
    M: ProbabilityModel + ?Sized,
{
    let states = project(observation, base_margin)?;
    translate(&states, model)
}
