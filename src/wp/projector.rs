//! Builds the three hypothetical post-try game states.
//!
//! After any try the opponent receives the ball, so every row is expressed
//! from the opponent's (offense) perspective: the leader's margin is negated
//! and timeouts swap sides. Field position is neutralized to a generic
//! first possession after a score (own 25, 1st & 10), which is what the
//! win-probability model was trained on.

use tracing::debug;

use crate::error::{Result, TryWpError};
use crate::game::GameObservation;

use super::features::{PostTryState, TryOutcome};

/// Yards from the opponent's goal for the neutral post-score possession.
pub const NEUTRAL_YARDLINE_100: i32 = 75;
pub const NEUTRAL_DOWN: i32 = 1;
pub const NEUTRAL_YARDS_TO_GO: i32 = 10;

/// Offense lead at or above which it is "up two possessions".
pub const TWO_POSSESSION_LEAD: i32 = 9;

/// Late-game thresholds in seconds, in feature order (u120, u60, u30, u15).
pub const TIME_THRESHOLDS: [i32; 4] = [120, 60, 30, 15];

/// Project `observation` into the fail / xp_good / 2pt_good states, in that
/// order. `base_margin` is the leader's lead right after the touchdown,
/// before the try.
///
/// Only the score-derived fields differ between the three rows. Fails with
/// `InvalidInput` when a branch margin cannot be negated within `i32`.
pub fn project(observation: &GameObservation, base_margin: i32) -> Result<[PostTryState; 3]> {
    if base_margin == i32::MIN
        || base_margin
            .checked_add(TryOutcome::TwoPtGood.points())
            .is_none()
    {
        return Err(TryWpError::invalid(
            "base_margin",
            format!("{base_margin} is out of range"),
        ));
    }

    let secs = observation.seconds_remaining_in_game;
    let log_secs = (secs as f64).ln_1p();
    let [u120, u60, u30, u15] = TIME_THRESHOLDS.map(|t| u8::from(secs <= t));

    let posteam_is_home = u8::from(observation.post_try_offense_is_home());
    let posteam_timeouts = observation.post_try_offense_timeouts();
    let defteam_timeouts = observation.post_try_defense_timeouts();

    Ok(TryOutcome::ALL.map(|branch| {
        let leader_margin = base_margin + branch.points();
        let offense_diff = -leader_margin;
        debug!(
            "Projected {} branch: leader margin {:+}, offense differential {:+}",
            branch, leader_margin, offense_diff
        );
        PostTryState {
            quarter: observation.quarter,
            game_seconds_remaining: secs,
            log_secs,
            score_differential: offense_diff,
            yardline_100: NEUTRAL_YARDLINE_100,
            down: NEUTRAL_DOWN,
            ydstogo: NEUTRAL_YARDS_TO_GO,
            posteam_is_home,
            posteam_timeouts_remaining: posteam_timeouts,
            defteam_timeouts_remaining: defteam_timeouts,
            abs_score_diff: offense_diff.abs(),
            two_possession_offense: u8::from(offense_diff >= TWO_POSSESSION_LEAD),
            u120,
            u60,
            u30,
            u15,
            branch,
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn late_game() -> GameObservation {
        GameObservation::new(4, 30).with_timeouts(1, 2)
    }

    fn flags(state: &PostTryState) -> [u8; 4] {
        [state.u120, state.u60, state.u30, state.u15]
    }

    #[test]
    fn always_three_rows_in_branch_order() {
        for margin in [-20, -9, -1, 0, 1, 6, 7, 8, 30] {
            let states = project(&late_game(), margin).unwrap();
            let branches: Vec<_> = states.iter().map(|s| s.branch).collect();
            assert_eq!(branches, TryOutcome::ALL);
        }
    }

    #[test]
    fn differentials_strictly_decrease() {
        let states = project(&late_game(), 6).unwrap();
        let diffs: Vec<_> = states.iter().map(|s| s.score_differential).collect();
        assert_eq!(diffs, [-6, -7, -8]);
        assert!(diffs[0] > diffs[1] && diffs[1] > diffs[2]);
    }

    #[test]
    fn only_score_fields_differ_between_rows() {
        let obs = GameObservation::new(2, 1900)
            .with_timeouts(3, 0)
            .with_offense_home(true);
        let states = project(&obs, 12).unwrap();
        let neutralize = |s: &PostTryState| PostTryState {
            score_differential: 0,
            abs_score_diff: 0,
            two_possession_offense: 0,
            branch: TryOutcome::Fail,
            ..s.clone()
        };
        let first = neutralize(&states[0]);
        for s in &states[1..] {
            assert_eq!(neutralize(s), first);
        }
    }

    #[test]
    fn field_state_is_neutralized() {
        let mut obs = late_game();
        obs.yardline_from_own_goal = Some(98);
        obs.down = Some(4);
        obs.yards_to_go = Some(2);
        for s in project(&obs, 1).unwrap() {
            assert_eq!((s.yardline_100, s.down, s.ydstogo), (75, 1, 10));
        }
    }

    #[test]
    fn timeouts_and_home_flag_follow_possession() {
        let obs = GameObservation::new(3, 900)
            .with_timeouts(3, 1)
            .with_offense_home(true);
        let s = &project(&obs, 7).unwrap()[0];
        assert_eq!(s.posteam_timeouts_remaining, 1);
        assert_eq!(s.defteam_timeouts_remaining, 3);
        assert_eq!(s.posteam_is_home, 1);

        let s = &project(&GameObservation::new(3, 900), 7).unwrap()[0];
        assert_eq!(s.posteam_timeouts_remaining, 2);
        assert_eq!(s.defteam_timeouts_remaining, 2);
        assert_eq!(s.posteam_is_home, 0);
    }

    #[test]
    fn two_possession_boundary() {
        let up_nine = project(&late_game(), -9).unwrap();
        assert_eq!(up_nine[0].score_differential, 9);
        assert_eq!(up_nine[0].two_possession_offense, 1);
        // 9 - 1 = 8 after a good extra point
        assert_eq!(up_nine[1].two_possession_offense, 0);

        let up_eight = project(&late_game(), -8).unwrap();
        assert_eq!(up_eight[0].two_possession_offense, 0);
    }

    #[test]
    fn time_threshold_flags() {
        let at = |secs| flags(&project(&GameObservation::new(4, secs), 1).unwrap()[0]);
        assert_eq!(at(15), [1, 1, 1, 1]);
        assert_eq!(at(16), [1, 1, 1, 0]);
        assert_eq!(at(31), [1, 1, 0, 0]);
        assert_eq!(at(120), [1, 0, 0, 0]);
        assert_eq!(at(121), [0, 0, 0, 0]);
    }

    #[test]
    fn log_seconds_is_ln_one_plus() {
        let s = &project(&GameObservation::new(1, 3600), 7).unwrap()[0];
        assert_relative_eq!(s.log_secs, 3601f64.ln(), epsilon = 1e-12);
        let s = &project(&GameObservation::new(4, 0), 7).unwrap()[0];
        assert_relative_eq!(s.log_secs, 0.0);
    }

    #[test]
    fn extreme_margins_are_invalid_input() {
        for margin in [i32::MAX, i32::MAX - 1, i32::MIN] {
            let err = project(&late_game(), margin).unwrap_err();
            assert!(matches!(err, TryWpError::InvalidInput { field: "base_margin", .. }));
        }
        let states = project(&late_game(), i32::MAX - 2).unwrap();
        assert_eq!(states[2].score_differential, -i32::MAX);
        let states = project(&late_game(), i32::MIN + 1).unwrap();
        assert_eq!(states[0].score_differential, i32::MAX);
    }

    #[test]
    fn late_one_point_lead_scenario() {
        let states = project(&late_game(), 1).unwrap();
        let diffs: Vec<_> = states.iter().map(|s| s.score_differential).collect();
        let abs: Vec<_> = states.iter().map(|s| s.abs_score_diff).collect();
        assert_eq!(diffs, [-1, -2, -3]);
        assert_eq!(abs, [1, 2, 3]);
        assert!(states.iter().all(|s| s.two_possession_offense == 0));
        assert!(states.iter().all(|s| s.posteam_timeouts_remaining == 2));
        assert!(states.iter().all(|s| s.defteam_timeouts_remaining == 1));
    }
}
