//! Core data models shared by the three counting games.
//! Everything persisted to browser storage lives here so the on-disk layout
//! is visible in one place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameKind {
    /// Knotted cords; place value by cord.
    #[default]
    Khipu,
    /// Andean abacus with pieces worth 1, 3 and 5.
    Yupana,
    /// Stepped cross; symmetric pattern completion.
    Chacana,
}

impl GameKind {
    pub const ALL: [GameKind; 3] = [GameKind::Khipu, GameKind::Yupana, GameKind::Chacana];

    pub fn as_str(self) -> &'static str {
        match self {
            GameKind::Khipu => "khipu",
            GameKind::Yupana => "yupana",
            GameKind::Chacana => "chacana",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            GameKind::Khipu => "Khipu",
            GameKind::Yupana => "Yupana",
            GameKind::Chacana => "Chacana",
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Level difficulty. The catalog spells these in Spanish; the English names
/// are accepted on input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    #[serde(rename = "facil", alias = "easy")]
    Easy,
    #[serde(rename = "medio", alias = "medium", alias = "normal")]
    Medium,
    #[serde(rename = "dificil", alias = "hard")]
    Hard,
}

impl Difficulty {
    /// Infer a difficulty from the top of a target range.
    pub fn from_range_max(max: i64) -> Self {
        if max <= 50 {
            Difficulty::Easy
        } else if max <= 200 {
            Difficulty::Medium
        } else {
            Difficulty::Hard
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

/// One playable level, as read from the catalog. Immutable once loaded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelSpec {
    /// Filled in by the catalog from the section the level was listed under.
    #[serde(default, rename = "game")]
    pub kind: GameKind,
    pub grade: u32,
    pub level: u32,
    pub target_min: i64,
    pub target_max: i64,
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Seconds; 0 means untimed.
    #[serde(default, rename = "time", alias = "time_limit_seconds")]
    pub time_limit_seconds: u32,
    #[serde(default)]
    pub concepts: Vec<String>,
    #[serde(default, rename = "desc", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl LevelSpec {
    pub fn is_timed(&self) -> bool {
        self.time_limit_seconds > 0
    }
}

/// A multiple-choice question for one level attempt. Never persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct Question {
    pub correct_answer: i64,
    /// Shuffled; holds `correct_answer` exactly once and no duplicates.
    pub options: Vec<i64>,
    pub difficulty: Difficulty,
    pub concepts: Vec<String>,
}

impl Question {
    pub fn distractors(&self) -> impl Iterator<Item = i64> + '_ {
        self.options
            .iter()
            .copied()
            .filter(move |v| *v != self.correct_answer)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExplanationKind {
    Success,
    Error,
}

/// Pedagogical feedback attached to an answer.
#[derive(Clone, Debug, PartialEq)]
pub struct Explanation {
    pub kind: ExplanationKind,
    pub message: String,
    pub details: String,
    pub hint: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AnswerResult {
    pub is_correct: bool,
    pub user_answer: i64,
    pub correct_answer: i64,
    pub time_used_seconds: u32,
    pub explanation: Explanation,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelRecord {
    pub completed: bool,
    pub score: u32,
    pub time_used: u32,
    pub completed_at: DateTime<Utc>,
    /// Incremented on every completion, replays included.
    pub attempts: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub icon: String,
    pub unlocked_at: DateTime<Utc>,
}

/// `grade_N` -> `level_N` -> record.
pub type GameRecords = BTreeMap<String, BTreeMap<String, LevelRecord>>;

pub fn grade_key(grade: u32) -> String {
    format!("grade_{grade}")
}

pub fn level_key(level: u32) -> String {
    format!("level_{level}")
}

/// Inverse of [`grade_key`] / [`level_key`].
pub fn parse_key(prefix: &str, key: &str) -> Option<u32> {
    key.strip_prefix(prefix)?.strip_prefix('_')?.parse().ok()
}

/// Serializable root of the progress store.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressData {
    pub khipu: GameRecords,
    pub yupana: GameRecords,
    pub chacana: GameRecords,
    #[serde(default)]
    pub last_played: Option<DateTime<Utc>>,
    #[serde(default)]
    pub total_play_time: u64,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
}

impl ProgressData {
    pub fn game(&self, kind: GameKind) -> &GameRecords {
        match kind {
            GameKind::Khipu => &self.khipu,
            GameKind::Yupana => &self.yupana,
            GameKind::Chacana => &self.chacana,
        }
    }

    pub fn game_mut(&mut self, kind: GameKind) -> &mut GameRecords {
        match kind {
            GameKind::Khipu => &mut self.khipu,
            GameKind::Yupana => &mut self.yupana,
            GameKind::Chacana => &mut self.chacana,
        }
    }

    pub fn record(&self, kind: GameKind, grade: u32, level: u32) -> Option<&LevelRecord> {
        self.game(kind).get(&grade_key(grade))?.get(&level_key(level))
    }

    pub fn is_completed(&self, kind: GameKind, grade: u32, level: u32) -> bool {
        self.record(kind, grade, level).is_some_and(|r| r.completed)
    }

    pub fn has_achievement(&self, id: &str) -> bool {
        self.achievements.iter().any(|a| a.id == id)
    }

    /// Idempotent insert keyed by id. Returns false if the id was already held.
    pub fn unlock(&mut self, achievement: Achievement) -> bool {
        if self.has_achievement(&achievement.id) {
            return false;
        }
        self.achievements.push(achievement);
        true
    }
}

/// Player profile stored next to the progress blob.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    #[serde(default = "default_grade")]
    pub current_grade: u32,
    #[serde(default)]
    pub preferred_difficulty: Difficulty,
    #[serde(default = "default_sound")]
    pub sound_enabled: bool,
    pub created_at: DateTime<Utc>,
}

fn default_grade() -> u32 {
    1
}

fn default_sound() -> bool {
    true
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "Estudiante".to_string(),
            current_grade: 1,
            preferred_difficulty: Difficulty::Medium,
            sound_enabled: true,
            created_at: Utc::now(),
        }
    }
}

/// Whole-store backup document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportBundle {
    pub progress: ProgressData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
    pub exported_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip() {
        assert_eq!(grade_key(3), "grade_3");
        assert_eq!(parse_key("grade", &grade_key(3)), Some(3));
        assert_eq!(parse_key("level", "level_12"), Some(12));
        assert_eq!(parse_key("level", "grade_1"), None);
        assert_eq!(parse_key("level", "level_x"), None);
    }

    #[test]
    fn difficulty_accepts_both_spellings() {
        let d: Difficulty = serde_json::from_str("\"dificil\"").unwrap();
        assert_eq!(d, Difficulty::Hard);
        let d: Difficulty = serde_json::from_str("\"medium\"").unwrap();
        assert_eq!(d, Difficulty::Medium);
        assert_eq!(serde_json::to_string(&Difficulty::Easy).unwrap(), "\"facil\"");
    }

    #[test]
    fn difficulty_from_range() {
        assert_eq!(Difficulty::from_range_max(50), Difficulty::Easy);
        assert_eq!(Difficulty::from_range_max(51), Difficulty::Medium);
        assert_eq!(Difficulty::from_range_max(999), Difficulty::Hard);
    }

    #[test]
    fn unlock_is_idempotent() {
        let mut data = ProgressData::default();
        let a = Achievement {
            id: "first_khipu".into(),
            name: "First".into(),
            description: String::new(),
            icon: String::new(),
            unlocked_at: Utc::now(),
        };
        assert!(data.unlock(a.clone()));
        assert!(!data.unlock(a));
        assert_eq!(data.achievements.len(), 1);
    }

    #[test]
    fn missing_record_is_not_completed() {
        let data = ProgressData::default();
        assert!(!data.is_completed(GameKind::Yupana, 1, 1));
        assert!(data.record(GameKind::Yupana, 1, 1).is_none());
    }

    #[test]
    fn level_spec_reads_catalog_fields() {
        let raw = r#"{"grade":1,"level":2,"target_min":1,"target_max":10,"difficulty":"facil","time":30,"concepts":["conteo"],"desc":"Cuenta"}"#;
        let spec: LevelSpec = serde_json::from_str(raw).unwrap();
        assert_eq!(spec.time_limit_seconds, 30);
        assert_eq!(spec.description.as_deref(), Some("Cuenta"));
        assert!(spec.is_timed());
    }
}
