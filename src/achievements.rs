//! Achievement rules.
//!
//! Progress achievements are checked against the persisted store after a level
//! completes. Session badges are checked against the running score and streak
//! of one play session and are not persisted.

use chrono::{DateTime, Utc};
use std::collections::HashSet;

use crate::catalog::LevelCatalog;
use crate::model::{Achievement, GameKind, ProgressData};

pub fn first_completion_id(kind: GameKind) -> String {
    format!("first_{kind}")
}

pub fn grade_mastery_id(kind: GameKind, grade: u32) -> String {
    format!("grade_{grade}_{kind}")
}

/// Unlocked when level 1 of grade 1 has been completed.
fn check_first_completion(
    data: &ProgressData,
    kind: GameKind,
    grade: u32,
    level: u32,
    now: DateTime<Utc>,
) -> Option<Achievement> {
    let id = first_completion_id(kind);
    if grade != 1 || level != 1 || data.has_achievement(&id) || !data.is_completed(kind, 1, 1) {
        return None;
    }
    Some(Achievement {
        id,
        name: format!("First {}", kind.display_name()),
        description: format!("Completed your first {} level", kind.display_name()),
        icon: "🏆".to_string(),
        unlocked_at: now,
    })
}

/// Unlocked when every catalog level of `grade` is completed. Grades with no
/// catalog levels never count as mastered.
fn check_grade_mastery(
    data: &ProgressData,
    catalog: &LevelCatalog,
    kind: GameKind,
    grade: u32,
    now: DateTime<Utc>,
) -> Option<Achievement> {
    let id = grade_mastery_id(kind, grade);
    if data.has_achievement(&id) {
        return None;
    }
    let mut levels = catalog.levels_in_grade(kind, grade).peekable();
    levels.peek()?;
    if !levels.all(|l| data.is_completed(kind, grade, l.level)) {
        return None;
    }
    Some(Achievement {
        id,
        name: format!("Grade {grade} Master"),
        description: format!("Completed every grade {grade} level in {}", kind.display_name()),
        icon: "🎓".to_string(),
        unlocked_at: now,
    })
}

/// Achievements newly earned by completing (kind, grade, level). Every rule
/// reads the same snapshot, so the result does not depend on rule order.
/// Nothing is inserted here; the caller owns the store.
pub fn evaluate(
    data: &ProgressData,
    catalog: &LevelCatalog,
    kind: GameKind,
    grade: u32,
    level: u32,
    now: DateTime<Utc>,
) -> Vec<Achievement> {
    [
        check_first_completion(data, kind, grade, level, now),
        check_grade_mastery(data, catalog, kind, grade, now),
    ]
    .into_iter()
    .flatten()
    .collect()
}

// ---------------- Session badges -----------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionBadge {
    FirstSuccess,
    StreakFive,
    GameMaster,
    IncaExpert,
}

impl SessionBadge {
    pub const ALL: [SessionBadge; 4] = [
        SessionBadge::FirstSuccess,
        SessionBadge::StreakFive,
        SessionBadge::GameMaster,
        SessionBadge::IncaExpert,
    ];

    pub fn id(self, kind: GameKind) -> String {
        match self {
            SessionBadge::FirstSuccess => "first_success".to_string(),
            SessionBadge::StreakFive => "streak_5".to_string(),
            SessionBadge::GameMaster => format!("{kind}_master"),
            SessionBadge::IncaExpert => "inca_expert".to_string(),
        }
    }

    pub fn title(self, kind: GameKind) -> String {
        match self {
            SessionBadge::FirstSuccess => "🎉 First Success!".to_string(),
            SessionBadge::StreakFive => "🔥 Streak of 5!".to_string(),
            SessionBadge::GameMaster => format!("👑 {} Master!", kind.display_name()),
            SessionBadge::IncaExpert => "🏆 Inca Expert!".to_string(),
        }
    }

    fn earned(self, score: u32, streak: u32) -> bool {
        match self {
            SessionBadge::FirstSuccess => streak >= 1,
            SessionBadge::StreakFive => streak >= 5,
            SessionBadge::GameMaster => score >= 100,
            SessionBadge::IncaExpert => score >= 500,
        }
    }
}

/// Tracks which session badges have fired so each fires once.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionBadges {
    unlocked: HashSet<SessionBadge>,
}

impl SessionBadges {
    pub fn check(&mut self, score: u32, streak: u32) -> Vec<SessionBadge> {
        SessionBadge::ALL
            .into_iter()
            .filter(|b| b.earned(score, streak))
            .filter(|b| self.unlocked.insert(*b))
            .collect()
    }

    pub fn is_unlocked(&self, badge: SessionBadge) -> bool {
        self.unlocked.contains(&badge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::grade_one_of_four;
    use crate::model::{grade_key, level_key, LevelRecord};

    fn complete(data: &mut ProgressData, kind: GameKind, grade: u32, level: u32) {
        data.game_mut(kind)
            .entry(grade_key(grade))
            .or_default()
            .insert(
                level_key(level),
                LevelRecord {
                    completed: true,
                    score: 10,
                    time_used: 5,
                    completed_at: Utc::now(),
                    attempts: 1,
                },
            );
    }

    fn unlock_all(data: &mut ProgressData, found: Vec<Achievement>) -> usize {
        found.into_iter().filter(|a| data.unlock(a.clone())).count()
    }

    #[test]
    fn first_completion_fires_once() {
        let catalog = grade_one_of_four(GameKind::Khipu);
        let mut data = ProgressData::default();
        complete(&mut data, GameKind::Khipu, 1, 1);
        let found = evaluate(&data, &catalog, GameKind::Khipu, 1, 1, Utc::now());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "first_khipu");
        assert_eq!(unlock_all(&mut data, found), 1);
        let again = evaluate(&data, &catalog, GameKind::Khipu, 1, 1, Utc::now());
        assert!(again.is_empty());
    }

    #[test]
    fn first_completion_is_per_game() {
        let catalog = grade_one_of_four(GameKind::Yupana);
        let mut data = ProgressData::default();
        complete(&mut data, GameKind::Khipu, 1, 1);
        assert!(evaluate(&data, &catalog, GameKind::Yupana, 1, 1, Utc::now()).is_empty());
    }

    #[test]
    fn grade_mastery_needs_every_level() {
        let catalog = grade_one_of_four(GameKind::Khipu);
        let mut data = ProgressData::default();
        for level in 2..=4 {
            complete(&mut data, GameKind::Khipu, 1, level);
        }
        assert!(evaluate(&data, &catalog, GameKind::Khipu, 1, 4, Utc::now()).is_empty());
        complete(&mut data, GameKind::Khipu, 1, 1);
        let found = evaluate(&data, &catalog, GameKind::Khipu, 1, 1, Utc::now());
        let ids: Vec<_> = found.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["first_khipu", "grade_1_khipu"]);
    }

    #[test]
    fn evaluating_twice_unlocks_once() {
        let catalog = grade_one_of_four(GameKind::Khipu);
        let mut data = ProgressData::default();
        for level in 1..=4 {
            complete(&mut data, GameKind::Khipu, 1, level);
        }
        let first = evaluate(&data, &catalog, GameKind::Khipu, 1, 1, Utc::now());
        assert_eq!(unlock_all(&mut data, first), 2);
        let second = evaluate(&data, &catalog, GameKind::Khipu, 1, 1, Utc::now());
        assert_eq!(unlock_all(&mut data, second), 0);
        assert_eq!(data.achievements.len(), 2);
    }

    #[test]
    fn empty_grade_is_never_mastered() {
        let catalog = LevelCatalog::default();
        let mut data = ProgressData::default();
        complete(&mut data, GameKind::Chacana, 2, 1);
        assert!(evaluate(&data, &catalog, GameKind::Chacana, 2, 1, Utc::now()).is_empty());
    }

    #[test]
    fn session_badges_fire_once() {
        let mut badges = SessionBadges::default();
        assert_eq!(badges.check(10, 1), vec![SessionBadge::FirstSuccess]);
        assert!(badges.check(20, 2).is_empty());
        assert_eq!(
            badges.check(120, 5),
            vec![SessionBadge::StreakFive, SessionBadge::GameMaster]
        );
        assert!(badges.is_unlocked(SessionBadge::GameMaster));
        assert!(!badges.is_unlocked(SessionBadge::IncaExpert));
        assert_eq!(SessionBadge::GameMaster.id(GameKind::Khipu), "khipu_master");
    }
}
