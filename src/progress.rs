//! Player progress: level completions, achievements and the user profile.
//!
//! One `ProgressStore` is built at startup and handed to the UI shell. Every
//! mutating call writes through to storage. Storage failures are logged and
//! swallowed; the in-memory state stays authoritative for the session.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::rc::Rc;

use crate::achievements;
use crate::catalog::LevelCatalog;
use crate::error::{EngineError, Result, StorageError};
use crate::model::{
    grade_key, level_key, parse_key, Achievement, ExportBundle, GameKind, LevelRecord, LevelSpec,
    ProgressData, UserProfile,
};
use crate::storage::{KeyValueStore, PROGRESS_KEY, USER_KEY};

/// Completion summary over a game or one grade of it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompletionSummary {
    pub completed: usize,
    pub total: usize,
    /// Rounded to the nearest whole percent.
    pub percentage: u32,
    /// (grade, level) pairs that are completed.
    pub levels: Vec<(u32, u32)>,
}

impl CompletionSummary {
    fn from_counts(levels: Vec<(u32, u32)>, total: usize) -> Self {
        let completed = levels.len();
        let percentage = if total > 0 {
            ((completed as f64 / total as f64) * 100.0).round() as u32
        } else {
            0
        };
        Self { completed, total, percentage, levels }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportBundle {
    progress: ProgressData,
    #[serde(default)]
    user: Option<UserProfile>,
}

pub struct ProgressStore<S: KeyValueStore> {
    storage: S,
    catalog: Rc<LevelCatalog>,
    data: ProgressData,
    user: UserProfile,
}

fn load_blob<T: DeserializeOwned + Default, S: KeyValueStore>(storage: &S, key: &str) -> T {
    match storage.get(key) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            log::warn!("discarding unreadable `{key}`: {e}");
            T::default()
        }),
        Ok(None) => T::default(),
        Err(e) => {
            log::warn!("could not read `{key}`: {e}");
            T::default()
        }
    }
}

impl<S: KeyValueStore> ProgressStore<S> {
    /// Reads both blobs once; absent or unreadable blobs start from defaults.
    pub fn load(storage: S, catalog: Rc<LevelCatalog>) -> Self {
        let data = load_blob(&storage, PROGRESS_KEY);
        let user = load_blob(&storage, USER_KEY);
        Self { storage, catalog, data, user }
    }

    pub fn data(&self) -> &ProgressData {
        &self.data
    }

    pub fn catalog(&self) -> &LevelCatalog {
        &self.catalog
    }

    pub fn user(&self) -> &UserProfile {
        &self.user
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn record(&self, kind: GameKind, grade: u32, level: u32) -> Option<&LevelRecord> {
        self.data.record(kind, grade, level)
    }

    pub fn is_level_completed(&self, kind: GameKind, grade: u32, level: u32) -> bool {
        self.data.is_completed(kind, grade, level)
    }

    pub fn achievements(&self) -> &[Achievement] {
        &self.data.achievements
    }

    pub fn has_achievement(&self, id: &str) -> bool {
        self.data.has_achievement(id)
    }

    /// Records a completion and returns the achievements it unlocked.
    pub fn complete_level(
        &mut self,
        kind: GameKind,
        grade: u32,
        level: u32,
        score: u32,
        time_used_secs: u32,
    ) -> Vec<Achievement> {
        self.complete_level_at(kind, grade, level, score, time_used_secs, Utc::now())
    }

    pub fn complete_level_at(
        &mut self,
        kind: GameKind,
        grade: u32,
        level: u32,
        score: u32,
        time_used_secs: u32,
        now: DateTime<Utc>,
    ) -> Vec<Achievement> {
        let levels = self.data.game_mut(kind).entry(grade_key(grade)).or_default();
        // Replays keep counting; attempts never goes down.
        let attempts = levels.get(&level_key(level)).map_or(0, |r| r.attempts) + 1;
        levels.insert(
            level_key(level),
            LevelRecord {
                completed: true,
                score,
                time_used: time_used_secs,
                completed_at: now,
                attempts,
            },
        );
        self.data.last_played = Some(now);
        self.data.total_play_time += u64::from(time_used_secs);

        let found = achievements::evaluate(&self.data, &self.catalog, kind, grade, level, now);
        let unlocked: Vec<Achievement> = found
            .into_iter()
            .filter(|a| self.data.unlock(a.clone()))
            .collect();
        for a in &unlocked {
            log::info!("achievement unlocked: {} ({})", a.name, a.id);
        }

        self.persist();
        log::info!("level completed: {kind} G{grade}L{level} score {score} attempt {attempts}");
        unlocked
    }

    /// Next level after (grade, level); `None` once the game is complete.
    pub fn next_level(&self, kind: GameKind, grade: u32, level: u32) -> Option<&LevelSpec> {
        self.catalog.next_level(kind, grade, level)
    }

    /// First catalog level of `kind` that is not completed yet.
    pub fn resume_point(&self, kind: GameKind) -> Option<&LevelSpec> {
        self.catalog
            .levels_for(kind)
            .find(|l| !self.is_level_completed(kind, l.grade, l.level))
    }

    pub fn game_progress(&self, kind: GameKind) -> CompletionSummary {
        let mut done = Vec::new();
        for (gk, levels) in self.data.game(kind) {
            let Some(grade) = parse_key("grade", gk) else { continue };
            for (lk, record) in levels {
                let Some(level) = parse_key("level", lk) else { continue };
                if record.completed && self.catalog.find(kind, grade, level).is_some() {
                    done.push((grade, level));
                }
            }
        }
        done.sort_unstable();
        CompletionSummary::from_counts(done, self.catalog.levels_for(kind).count())
    }

    pub fn grade_progress(&self, kind: GameKind, grade: u32) -> CompletionSummary {
        let mut total = 0;
        let mut done = Vec::new();
        for l in self.catalog.levels_in_grade(kind, grade) {
            total += 1;
            if self.is_level_completed(kind, grade, l.level) {
                done.push((grade, l.level));
            }
        }
        CompletionSummary::from_counts(done, total)
    }

    pub fn update_user(&mut self, f: impl FnOnce(&mut UserProfile)) {
        f(&mut self.user);
        self.persist();
    }

    /// Wipes progress back to defaults. The profile is kept.
    pub fn reset_progress(&mut self) {
        self.data = ProgressData::default();
        self.persist();
        log::info!("progress reset");
    }

    pub fn export_progress(&self) -> ExportBundle {
        ExportBundle {
            progress: self.data.clone(),
            user: Some(self.user.clone()),
            exported_at: Utc::now(),
        }
    }

    pub fn export_json(&self) -> Result<String, StorageError> {
        serde_json::to_string_pretty(&self.export_progress()).map_err(|source| {
            StorageError::Serialize { key: "export".to_string(), source }
        })
    }

    /// Replaces the store from a backup. Nothing changes unless the whole
    /// payload validates.
    pub fn import_progress(&mut self, raw: &str) -> Result<()> {
        let value: serde_json::Value =
            serde_json::from_str(raw).map_err(|e| EngineError::ImportFormat(e.to_string()))?;
        self.import_value(value)
    }

    pub fn import_value(&mut self, value: serde_json::Value) -> Result<()> {
        let bundle: ImportBundle =
            serde_json::from_value(value).map_err(|e| EngineError::ImportFormat(e.to_string()))?;
        validate(&bundle.progress).map_err(EngineError::ImportFormat)?;
        self.data = bundle.progress;
        if let Some(user) = bundle.user {
            self.user = user;
        }
        self.persist();
        log::info!("progress imported");
        Ok(())
    }

    fn persist(&mut self) {
        if let Err(e) = self.try_persist() {
            log::error!("progress not saved: {e}");
        }
    }

    fn try_persist(&mut self) -> Result<(), StorageError> {
        let progress = serde_json::to_string(&self.data).map_err(|source| StorageError::Serialize {
            key: PROGRESS_KEY.to_string(),
            source,
        })?;
        let user = serde_json::to_string(&self.user).map_err(|source| StorageError::Serialize {
            key: USER_KEY.to_string(),
            source,
        })?;
        self.storage.set(PROGRESS_KEY, &progress)?;
        self.storage.set(USER_KEY, &user)?;
        log::debug!("progress saved");
        Ok(())
    }
}

/// Structural checks serde cannot express.
fn validate(data: &ProgressData) -> Result<(), String> {
    for kind in GameKind::ALL {
        for (gk, levels) in data.game(kind) {
            if parse_key("grade", gk).is_none() {
                return Err(format!("{kind}: bad grade key `{gk}`"));
            }
            for (lk, record) in levels {
                if parse_key("level", lk).is_none() {
                    return Err(format!("{kind}/{gk}: bad level key `{lk}`"));
                }
                if record.attempts == 0 {
                    return Err(format!("{kind}/{gk}/{lk}: attempts must be at least 1"));
                }
            }
        }
    }
    let mut ids = HashSet::new();
    if let Some(dup) = data.achievements.iter().find(|a| !ids.insert(a.id.as_str())) {
        return Err(format!("duplicate achievement `{}`", dup.id));
    }
    Ok(())
}
