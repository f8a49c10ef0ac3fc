//! Feature schema shared between the state projector and whatever model
//! scores the rows.
//!
//! Column order is part of the contract: models are trained against this
//! exact ordering, so any change bumps [`FEATURE_SCHEMA_VERSION`].

use serde::{Deserialize, Serialize};
use std::fmt;

pub const FEATURE_SCHEMA_VERSION: u32 = 1;

pub const FEATURE_COUNT: usize = 16;

pub const FEATURE_COLUMNS: [&str; FEATURE_COUNT] = [
    "quarter",
    "game_seconds_remaining",
    "log_secs",
    "score_differential",
    "yardline_100",
    "down",
    "ydstogo",
    "posteam_is_home",
    "posteam_timeouts_remaining",
    "defteam_timeouts_remaining",
    "abs_score_diff",
    "two_possession_offense",
    "u120",
    "u60",
    "u30",
    "u15",
];

/// Outcome of the try, used as the branch label of each post-try row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TryOutcome {
    #[serde(rename = "fail")]
    Fail,
    #[serde(rename = "xp_good")]
    XpGood,
    #[serde(rename = "2pt_good")]
    TwoPtGood,
}

impl TryOutcome {
    /// Row order of every projection and every result.
    pub const ALL: [TryOutcome; 3] = [TryOutcome::Fail, TryOutcome::XpGood, TryOutcome::TwoPtGood];

    pub fn label(self) -> &'static str {
        match self {
            TryOutcome::Fail => "fail",
            TryOutcome::XpGood => "xp_good",
            TryOutcome::TwoPtGood => "2pt_good",
        }
    }

    /// Points the try adds to the leader's margin.
    pub fn points(self) -> i32 {
        match self {
            TryOutcome::Fail => 0,
            TryOutcome::XpGood => 1,
            TryOutcome::TwoPtGood => 2,
        }
    }
}

impl fmt::Display for TryOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One synthetic game state after the try, seen from the team that receives
/// the ball next. Field names match [`FEATURE_COLUMNS`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostTryState {
    pub quarter: i32,
    pub game_seconds_remaining: i32,
    pub log_secs: f64,
    pub score_differential: i32,
    pub yardline_100: i32,
    pub down: i32,
    pub ydstogo: i32,
    pub posteam_is_home: u8,
    pub posteam_timeouts_remaining: i32,
    pub defteam_timeouts_remaining: i32,
    pub abs_score_diff: i32,
    pub two_possession_offense: u8,
    pub u120: u8,
    pub u60: u8,
    pub u30: u8,
    pub u15: u8,
    /// Not a model feature.
    pub branch: TryOutcome,
}

impl PostTryState {
    /// Numeric features in [`FEATURE_COLUMNS`] order.
    pub fn features(&self) -> [f64; FEATURE_COUNT] {
        [
            self.quarter as f64,
            self.game_seconds_remaining as f64,
            self.log_secs,
            self.score_differential as f64,
            self.yardline_100 as f64,
            self.down as f64,
            self.ydstogo as f64,
            self.posteam_is_home as f64,
            self.posteam_timeouts_remaining as f64,
            self.defteam_timeouts_remaining as f64,
            self.abs_score_diff as f64,
            self.two_possession_offense as f64,
            self.u120 as f64,
            self.u60 as f64,
            self.u30 as f64,
            self.u15 as f64,
        ]
    }
}

/// Rows handed to a [`ProbabilityModel`](super::model::ProbabilityModel) in
/// a single batch. Carries its column names so the model can check them
/// against its training schema.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    pub schema_version: u32,
    pub columns: &'static [&'static str],
    pub rows: Vec<[f64; FEATURE_COUNT]>,
}

impl FeatureMatrix {
    pub fn from_states(states: &[PostTryState]) -> Self {
        FeatureMatrix {
            schema_version: FEATURE_SCHEMA_VERSION,
            columns: &FEATURE_COLUMNS,
            rows: states.iter().map(PostTryState::features).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Serializable view of a projection, for handing the rows to an external
/// scorer.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectionReport<'a> {
    pub schema_version: u32,
    pub columns: &'static [&'static str],
    pub rows: &'a [PostTryState],
}

impl<'a> ProjectionReport<'a> {
    pub fn new(rows: &'a [PostTryState]) -> Self {
        ProjectionReport {
            schema_version: FEATURE_SCHEMA_VERSION,
            columns: &FEATURE_COLUMNS,
            rows,
        }
    }
}
