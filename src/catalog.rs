//! Read-only level catalog, injected into the engine at startup.

use serde::Deserialize;

use crate::error::Result;
use crate::model::{Difficulty, GameKind, LevelSpec};

const EMBEDDED_LEVELS: &str = include_str!("../data/levels.json");

#[derive(Deserialize, Default)]
struct RawCatalog {
    #[serde(default)]
    khipu: Vec<RawLevel>,
    #[serde(default)]
    yupana: Vec<RawLevel>,
    #[serde(default)]
    chacana: Vec<RawLevel>,
}

/// Catalog entry; difficulty is optional and inferred from the range when absent.
#[derive(Deserialize)]
struct RawLevel {
    grade: u32,
    level: u32,
    target_min: i64,
    target_max: i64,
    difficulty: Option<Difficulty>,
    #[serde(default, rename = "time", alias = "time_limit_seconds")]
    time_limit_seconds: u32,
    #[serde(default)]
    concepts: Vec<String>,
    #[serde(default, rename = "desc")]
    description: Option<String>,
}

impl RawLevel {
    fn into_spec(self, kind: GameKind) -> LevelSpec {
        LevelSpec {
            kind,
            grade: self.grade,
            level: self.level,
            target_min: self.target_min,
            target_max: self.target_max,
            difficulty: self
                .difficulty
                .unwrap_or_else(|| Difficulty::from_range_max(self.target_max)),
            time_limit_seconds: self.time_limit_seconds,
            concepts: self.concepts,
            description: self.description,
        }
    }
}

/// Ordered level lists, one per game.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LevelCatalog {
    levels: Vec<LevelSpec>,
}

impl LevelCatalog {
    /// Parses `{ "khipu": [..], "yupana": [..], "chacana": [..] }`.
    pub fn from_json(raw: &str) -> Result<Self> {
        let raw: RawCatalog = serde_json::from_str(raw)?;
        let mut levels = Vec::with_capacity(raw.khipu.len() + raw.yupana.len() + raw.chacana.len());
        for (kind, list) in [
            (GameKind::Khipu, raw.khipu),
            (GameKind::Yupana, raw.yupana),
            (GameKind::Chacana, raw.chacana),
        ] {
            levels.extend(list.into_iter().map(|l| l.into_spec(kind)));
        }
        log::debug!("level catalog loaded: {} levels", levels.len());
        Ok(Self { levels })
    }

    /// The catalog bundled with the game.
    pub fn embedded() -> Result<Self> {
        Self::from_json(EMBEDDED_LEVELS)
    }

    pub fn from_levels(levels: Vec<LevelSpec>) -> Self {
        Self { levels }
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn levels_for(&self, kind: GameKind) -> impl Iterator<Item = &LevelSpec> + '_ {
        self.levels.iter().filter(move |l| l.kind == kind)
    }

    pub fn levels_in_grade(&self, kind: GameKind, grade: u32) -> impl Iterator<Item = &LevelSpec> + '_ {
        self.levels_for(kind).filter(move |l| l.grade == grade)
    }

    pub fn find(&self, kind: GameKind, grade: u32, level: u32) -> Option<&LevelSpec> {
        self.levels_for(kind).find(|l| l.grade == grade && l.level == level)
    }

    /// Distinct grades for a game, in catalog order.
    pub fn grades(&self, kind: GameKind) -> Vec<u32> {
        let mut grades: Vec<u32> = Vec::new();
        for l in self.levels_for(kind) {
            if !grades.contains(&l.grade) {
                grades.push(l.grade);
            }
        }
        grades
    }

    /// Next level in the same grade, else level 1 of the next grade.
    /// `None` means the game is complete.
    pub fn next_level(&self, kind: GameKind, grade: u32, level: u32) -> Option<&LevelSpec> {
        level
            .checked_add(1)
            .and_then(|l| self.find(kind, grade, l))
            .or_else(|| grade.checked_add(1).and_then(|g| self.find(kind, g, 1)))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn spec(kind: GameKind, grade: u32, level: u32) -> LevelSpec {
        LevelSpec {
            kind,
            grade,
            level,
            target_min: 1,
            target_max: 20,
            difficulty: Difficulty::Easy,
            time_limit_seconds: 0,
            concepts: vec!["conteo".into()],
            description: None,
        }
    }

    pub(crate) fn grade_one_of_four(kind: GameKind) -> LevelCatalog {
        LevelCatalog::from_levels((1..=4).map(|l| spec(kind, 1, l)).collect())
    }

    #[test]
    fn next_level_in_same_grade() {
        let catalog = grade_one_of_four(GameKind::Khipu);
        let next = catalog.next_level(GameKind::Khipu, 1, 3).unwrap();
        assert_eq!((next.grade, next.level), (1, 4));
    }

    #[test]
    fn next_level_none_at_end() {
        let catalog = grade_one_of_four(GameKind::Khipu);
        assert!(catalog.next_level(GameKind::Khipu, 1, 4).is_none());
    }

    #[test]
    fn next_level_rolls_into_next_grade() {
        let mut levels: Vec<_> = (1..=2).map(|l| spec(GameKind::Yupana, 1, l)).collect();
        levels.push(spec(GameKind::Yupana, 2, 1));
        let catalog = LevelCatalog::from_levels(levels);
        let next = catalog.next_level(GameKind::Yupana, 1, 2).unwrap();
        assert_eq!((next.grade, next.level), (2, 1));
    }

    #[test]
    fn next_level_ignores_other_games() {
        let mut levels = vec![spec(GameKind::Khipu, 1, 1)];
        levels.push(spec(GameKind::Chacana, 1, 2));
        let catalog = LevelCatalog::from_levels(levels);
        assert!(catalog.next_level(GameKind::Khipu, 1, 1).is_none());
    }

    #[test]
    fn embedded_catalog_parses_and_tags_games() {
        let catalog = LevelCatalog::embedded().unwrap();
        assert!(!catalog.is_empty());
        for kind in GameKind::ALL {
            assert!(catalog.levels_for(kind).all(|l| l.kind == kind));
            assert!(catalog.find(kind, 1, 1).is_some());
            assert!(catalog.levels_for(kind).all(|l| l.target_min <= l.target_max));
        }
        assert_eq!(catalog.grades(GameKind::Khipu), vec![1, 2, 3]);
    }

    #[test]
    fn next_level_at_numeric_limits() {
        let levels = vec![
            spec(GameKind::Khipu, 1, u32::MAX),
            spec(GameKind::Khipu, u32::MAX, 1),
            spec(GameKind::Khipu, u32::MAX, u32::MAX),
        ];
        let catalog = LevelCatalog::from_levels(levels);
        assert!(catalog.next_level(GameKind::Khipu, u32::MAX, u32::MAX).is_none());
        let next = catalog.next_level(GameKind::Khipu, 1, u32::MAX).unwrap();
        assert_eq!((next.grade, next.level), (u32::MAX, 1));
    }

    #[test]
    fn difficulty_inferred_when_absent() {
        let raw = r#"{"yupana": [
            {"grade": 1, "level": 1, "target_min": 1, "target_max": 40},
            {"grade": 1, "level": 2, "target_min": 50, "target_max": 150},
            {"grade": 1, "level": 3, "target_min": 100, "target_max": 900},
            {"grade": 1, "level": 4, "target_min": 1, "target_max": 9, "difficulty": "dificil"}
        ]}"#;
        let catalog = LevelCatalog::from_json(raw).unwrap();
        let got: Vec<_> = catalog.levels_for(GameKind::Yupana).map(|l| l.difficulty).collect();
        assert_eq!(
            got,
            vec![Difficulty::Easy, Difficulty::Medium, Difficulty::Hard, Difficulty::Hard]
        );
    }

    #[test]
    fn missing_sections_default_empty() {
        let catalog = LevelCatalog::from_json(r#"{"khipu": []}"#).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn malformed_catalog_is_an_error() {
        assert!(LevelCatalog::from_json("[1, 2").is_err());
    }
}
