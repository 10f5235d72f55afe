//! Point awards for a correct answer.
//!
//! Two policies coexist. Each game picks one through [`GameKind::score_policy`];
//! they are not meant to agree with each other.

use crate::model::{Difficulty, GameKind, LevelSpec};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScorePolicy {
    /// 10 + difficulty bonus + up to 5 for time left on the clock.
    TimeBonus,
    /// Difficulty base + 5 per answer already in the current streak.
    Streak,
}

impl GameKind {
    pub fn score_policy(self) -> ScorePolicy {
        match self {
            GameKind::Khipu => ScorePolicy::Streak,
            GameKind::Yupana | GameKind::Chacana => ScorePolicy::TimeBonus,
        }
    }
}

fn difficulty_bonus(d: Difficulty) -> u32 {
    match d {
        Difficulty::Easy => 0,
        Difficulty::Medium => 5,
        Difficulty::Hard => 10,
    }
}

fn streak_base(d: Difficulty) -> u32 {
    match d {
        Difficulty::Easy => 10,
        Difficulty::Medium => 20,
        Difficulty::Hard => 50,
    }
}

impl ScorePolicy {
    pub fn score(self, level: &LevelSpec, time_remaining_secs: u32, streak: u32) -> u32 {
        match self {
            ScorePolicy::TimeBonus => time_bonus_score(level, time_remaining_secs),
            ScorePolicy::Streak => streak_score(level.difficulty, streak),
        }
    }
}

pub fn time_bonus_score(level: &LevelSpec, time_remaining_secs: u32) -> u32 {
    let mut points = 10 + difficulty_bonus(level.difficulty);
    if level.time_limit_seconds > 0 && time_remaining_secs > 0 {
        // Integer form of floor(remaining / limit * 5).
        let bonus = (u64::from(time_remaining_secs) * 5) / u64::from(level.time_limit_seconds);
        points += bonus as u32;
    }
    points
}

pub fn streak_score(difficulty: Difficulty, streak: u32) -> u32 {
    streak_base(difficulty).saturating_add(streak.saturating_mul(5))
}

/// Scores with the policy of the level's own game.
pub fn score(level: &LevelSpec, time_remaining_secs: u32, streak: u32) -> u32 {
    level.kind.score_policy().score(level, time_remaining_secs, streak)
}
