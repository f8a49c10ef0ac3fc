use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, TryWpError};

/// Timeouts assumed for either side when the observation does not carry them.
pub const DEFAULT_TIMEOUTS: i32 = 2;

/// Game state at the moment the leader has just scored the touchdown,
/// before the try is attempted.
///
/// `leader_*` fields belong to the team that scored (the current possession
/// team); `opponent_*` fields to its defense. Optional fields fall back to
/// documented defaults when the post-try state is built.
#[derive(Debug, Clone, PartialEq)]
pub struct GameObservation {
    /// 1–4, 5 = overtime.
    pub quarter: i32,
    /// Global countdown in seconds.
    pub seconds_remaining_in_game: i32,
    pub yardline_from_own_goal: Option<i32>,
    pub down: Option<i32>,
    pub yards_to_go: Option<i32>,
    pub leader_timeouts_remaining: Option<i32>,
    pub opponent_timeouts_remaining: Option<i32>,
    /// Whether the team receiving the ball after the try is the home team.
    pub offense_is_home_after_try: Option<bool>,
}

impl GameObservation {
    pub fn new(quarter: i32, seconds_remaining_in_game: i32) -> Self {
        GameObservation {
            quarter,
            seconds_remaining_in_game,
            yardline_from_own_goal: None,
            down: None,
            yards_to_go: None,
            leader_timeouts_remaining: None,
            opponent_timeouts_remaining: None,
            offense_is_home_after_try: None,
        }
    }

    pub fn with_timeouts(mut self, leader: i32, opponent: i32) -> Self {
        self.leader_timeouts_remaining = Some(leader);
        self.opponent_timeouts_remaining = Some(opponent);
        self
    }

    pub fn with_offense_home(mut self, is_home: bool) -> Self {
        self.offense_is_home_after_try = Some(is_home);
        self
    }

    /// Possession flips after the try: the opponent's timeouts become the
    /// offense's.
    pub fn post_try_offense_timeouts(&self) -> i32 {
        self.opponent_timeouts_remaining.unwrap_or(DEFAULT_TIMEOUTS)
    }

    pub fn post_try_defense_timeouts(&self) -> i32 {
        self.leader_timeouts_remaining.unwrap_or(DEFAULT_TIMEOUTS)
    }

    /// Unknown home status is treated as "not home". Known approximation:
    /// the real value is derivable from team identities but is not threaded
    /// through here.
    pub fn post_try_offense_is_home(&self) -> bool {
        self.offense_is_home_after_try.unwrap_or(false)
    }
}

/// Loosely typed observation as it arrives from play-by-play exports.
///
/// Accepts both descriptive keys and the play-by-play column names. `null`
/// is treated the same as an absent key.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawObservation {
    #[serde(default, alias = "qtr")]
    pub quarter: Option<Value>,
    #[serde(default, alias = "game_seconds_remaining")]
    pub seconds_remaining_in_game: Option<Value>,
    #[serde(default)]
    pub yardline_from_own_goal: Option<Value>,
    #[serde(default)]
    pub down: Option<Value>,
    #[serde(default, alias = "ydstogo")]
    pub yards_to_go: Option<Value>,
    #[serde(default, alias = "posteam_timeouts_remaining")]
    pub leader_timeouts_remaining: Option<Value>,
    #[serde(default, alias = "defteam_timeouts_remaining")]
    pub opponent_timeouts_remaining: Option<Value>,
    #[serde(
        default,
        alias = "posteam_is_home_after",
        alias = "leader_is_home_after_try"
    )]
    pub offense_is_home_after_try: Option<Value>,
    #[serde(default)]
    pub base_margin: Option<Value>,
}

impl RawObservation {
    /// Coerce into a typed observation plus the optional base margin carried
    /// alongside it.
    pub fn into_parts(self) -> Result<(GameObservation, Option<i32>)> {
        let quarter = self
            .quarter
            .as_ref()
            .ok_or_else(|| TryWpError::invalid("quarter", "missing"))
            .and_then(|v| coerce_int("quarter", v))?;
        let seconds = self
            .seconds_remaining_in_game
            .as_ref()
            .ok_or_else(|| TryWpError::invalid("seconds_remaining_in_game", "missing"))
            .and_then(|v| coerce_int("seconds_remaining_in_game", v))?;

        let observation = GameObservation {
            quarter,
            seconds_remaining_in_game: seconds,
            yardline_from_own_goal: optional_int(
                "yardline_from_own_goal",
                self.yardline_from_own_goal.as_ref(),
            )?,
            down: optional_int("down", self.down.as_ref())?,
            yards_to_go: optional_int("yards_to_go", self.yards_to_go.as_ref())?,
            leader_timeouts_remaining: optional_int(
                "leader_timeouts_remaining",
                self.leader_timeouts_remaining.as_ref(),
            )?,
            opponent_timeouts_remaining: optional_int(
                "opponent_timeouts_remaining",
                self.opponent_timeouts_remaining.as_ref(),
            )?,
            offense_is_home_after_try: self
                .offense_is_home_after_try
                .as_ref()
                .map(|v| coerce_flag("offense_is_home_after_try", v))
                .transpose()?,
        };
        let base_margin = optional_int("base_margin", self.base_margin.as_ref())?;
        Ok((observation, base_margin))
    }
}

/// Integer coercion: JSON integers, finite floats (truncated toward zero) and
/// integer strings.
pub fn coerce_int(field: &'static str, value: &Value) -> Result<i32> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return i32::try_from(i)
                    .map_err(|_| TryWpError::invalid(field, format!("{i} is out of range")));
            }
            match n.as_f64() {
                Some(f) if n.is_f64() && f.is_finite() => {
                    let t = f.trunc();
                    if t < i32::MIN as f64 || t > i32::MAX as f64 {
                        Err(TryWpError::invalid(field, format!("{f} is out of range")))
                    } else {
                        Ok(t as i32)
                    }
                }
                _ => Err(TryWpError::invalid(field, format!("{n} is out of range"))),
            }
        }
        Value::String(s) => s
            .trim()
            .parse::<i32>()
            .map_err(|_| TryWpError::invalid(field, format!("{s:?} is not an integer"))),
        other => Err(TryWpError::invalid(
            field,
            format!("expected an integer, got {other}"),
        )),
    }
}

fn optional_int(field: &'static str, value: Option<&Value>) -> Result<Option<i32>> {
    value.map(|v| coerce_int(field, v)).transpose()
}

fn coerce_flag(field: &'static str, value: &Value) -> Result<bool> {
    match value {
        Value::Bool(b) => Ok(*b),
        other => coerce_int(field, other).map(|i| i != 0),
    }
}
