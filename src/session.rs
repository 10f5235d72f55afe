//! One play session of a level: the reducer the UI shell drives.
//!
//! The session never generates questions or touches storage itself. The shell
//! generates a question, dispatches it, and records a `Won` phase in the
//! progress store.

use std::rc::Rc;
use yew::Reducible;

use crate::achievements::{SessionBadge, SessionBadges};
use crate::model::{AnswerResult, Difficulty, GameKind, LevelSpec, Question};
use crate::timer::{Countdown, CountdownTick};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LossReason {
    Timeout,
    Incorrect,
    Skipped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Ready,
    Playing,
    Paused,
    Won,
    Lost(LossReason),
}

#[derive(Clone, Debug)]
pub enum SessionAction {
    Start { question: Question },
    /// Move on to another level keeping score, streak and badges.
    NextLevel { level: LevelSpec, question: Question },
    /// Retry the same level with a fresh question.
    NewQuestion { question: Question },
    /// Called once per elapsed real second.
    Tick,
    Pause,
    Resume,
    Answer { value: i64 },
    Skip,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameSession {
    pub kind: GameKind,
    pub level: LevelSpec,
    pub question: Option<Question>,
    pub phase: Phase,
    pub score: u32,
    pub streak: u32,
    /// Points awarded by the last correct answer.
    pub last_points: u32,
    pub elapsed_secs: u32,
    pub countdown: Countdown,
    pub last_result: Option<AnswerResult>,
    pub badges: SessionBadges,
    /// Badges unlocked by the last action, for toasts.
    pub new_badges: Vec<SessionBadge>,
}

impl GameSession {
    pub fn new(level: LevelSpec) -> Self {
        Self {
            kind: level.kind,
            countdown: Countdown::new(level.time_limit_seconds),
            level,
            question: None,
            phase: Phase::Ready,
            score: 0,
            streak: 0,
            last_points: 0,
            elapsed_secs: 0,
            last_result: None,
            badges: SessionBadges::default(),
            new_badges: Vec::new(),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.phase == Phase::Playing
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::Won | Phase::Lost(_))
    }

    pub fn time_remaining(&self) -> u32 {
        self.countdown.remaining()
    }

    fn answer(&mut self, value: i64) {
        let Some(question) = &self.question else { return };
        let correct = question.correct_answer;
        let is_correct = value == correct;
        self.last_result = Some(AnswerResult {
            is_correct,
            user_answer: value,
            correct_answer: correct,
            time_used_seconds: self.elapsed_secs,
            explanation: self.kind.explain(value, correct),
        });
        if is_correct {
            let points = self
                .kind
                .score_policy()
                .score(&self.level, self.countdown.remaining(), self.streak);
            self.last_points = points;
            self.score = self.score.saturating_add(points);
            self.streak += 1;
            self.new_badges = self.badges.check(self.score, self.streak);
            self.countdown.stop();
            self.phase = Phase::Won;
        } else {
            self.streak = 0;
            self.last_points = 0;
            // Easy levels allow another try with a new question.
            if self.level.difficulty != Difficulty::Easy {
                self.countdown.stop();
                self.phase = Phase::Lost(LossReason::Incorrect);
            }
        }
    }
}

impl Reducible for GameSession {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use SessionAction::*;
        let mut new = (*self).clone();
        new.new_badges.clear();
        match action {
            Start { question } => {
                let badges = std::mem::take(&mut new.badges);
                new = GameSession::new(new.level);
                new.badges = badges;
                new.question = Some(question);
                new.countdown.start();
                new.phase = Phase::Playing;
            }
            NextLevel { level, question } => {
                let (score, streak) = (new.score, new.streak);
                let badges = std::mem::take(&mut new.badges);
                new = GameSession::new(level);
                new.score = score;
                new.streak = streak;
                new.badges = badges;
                new.question = Some(question);
                new.countdown.start();
                new.phase = Phase::Playing;
            }
            NewQuestion { question } => {
                if new.is_over() {
                    return self;
                }
                new.question = Some(question);
                new.last_result = None;
            }
            Tick => {
                if !new.is_playing() {
                    return self;
                }
                new.elapsed_secs = new.elapsed_secs.saturating_add(1);
                if new.countdown.tick() == CountdownTick::Expired {
                    new.phase = Phase::Lost(LossReason::Timeout);
                }
            }
            Pause => {
                if !new.is_playing() {
                    return self;
                }
                new.countdown.stop();
                new.phase = Phase::Paused;
            }
            Resume => {
                if new.phase != Phase::Paused {
                    return self;
                }
                new.countdown.resume();
                new.phase = Phase::Playing;
            }
            Answer { value } => {
                if !new.is_playing() {
                    return self;
                }
                new.answer(value);
            }
            Skip => {
                if new.is_over() {
                    return self;
                }
                new.countdown.stop();
                new.phase = Phase::Lost(LossReason::Skipped);
            }
        }
        Rc::new(new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::spec;

    fn question(correct: i64) -> Question {
        Question {
            correct_answer: correct,
            options: vec![correct - 1, correct, correct + 1, correct + 2],
            difficulty: Difficulty::Easy,
            concepts: Vec::new(),
        }
    }

    fn started(kind: GameKind, difficulty: Difficulty, limit: u32) -> Rc<GameSession> {
        let mut level = spec(kind, 1, 1);
        level.difficulty = difficulty;
        level.time_limit_seconds = limit;
        Rc::new(GameSession::new(level)).reduce(SessionAction::Start { question: question(7) })
    }

    #[test]
    fn correct_answer_wins_with_time_bonus() {
        let mut s = started(GameKind::Yupana, Difficulty::Hard, 30);
        for _ in 0..15 {
            s = s.reduce(SessionAction::Tick);
        }
        let s = s.reduce(SessionAction::Answer { value: 7 });
        assert_eq!(s.phase, Phase::Won);
        assert_eq!(s.score, 22);
        assert_eq!(s.streak, 1);
        let result = s.last_result.as_ref().unwrap();
        assert!(result.is_correct);
        assert_eq!(result.time_used_seconds, 15);
        assert_eq!(s.new_badges, vec![SessionBadge::FirstSuccess]);
    }

    #[test]
    fn khipu_uses_streak_policy() {
        let s = started(GameKind::Khipu, Difficulty::Medium, 0);
        let s = s.reduce(SessionAction::Answer { value: 7 });
        assert_eq!(s.score, 20);
    }

    #[test]
    fn wrong_answer_on_easy_allows_retry() {
        let s = started(GameKind::Khipu, Difficulty::Easy, 0);
        let s = s.reduce(SessionAction::Answer { value: 8 });
        assert_eq!(s.phase, Phase::Playing);
        assert_eq!(s.streak, 0);
        assert!(!s.last_result.as_ref().unwrap().is_correct);
        let s = s.reduce(SessionAction::NewQuestion { question: question(3) });
        assert!(s.last_result.is_none());
        let s = s.reduce(SessionAction::Answer { value: 3 });
        assert_eq!(s.phase, Phase::Won);
    }

    #[test]
    fn wrong_answer_on_hard_loses() {
        let s = started(GameKind::Chacana, Difficulty::Hard, 0);
        let s = s.reduce(SessionAction::Answer { value: 1 });
        assert_eq!(s.phase, Phase::Lost(LossReason::Incorrect));
        let after = s.clone().reduce(SessionAction::Answer { value: 7 });
        assert!(Rc::ptr_eq(&s, &after));
    }

    #[test]
    fn countdown_expiry_times_out() {
        let mut s = started(GameKind::Yupana, Difficulty::Easy, 2);
        s = s.reduce(SessionAction::Tick);
        assert!(s.is_playing());
        s = s.reduce(SessionAction::Tick);
        assert_eq!(s.phase, Phase::Lost(LossReason::Timeout));
        let after = s.clone().reduce(SessionAction::Tick);
        assert_eq!(after.elapsed_secs, 2);
    }

    #[test]
    fn pause_freezes_clock() {
        let mut s = started(GameKind::Yupana, Difficulty::Easy, 10);
        s = s.reduce(SessionAction::Tick);
        s = s.reduce(SessionAction::Pause);
        s = s.reduce(SessionAction::Tick);
        s = s.reduce(SessionAction::Answer { value: 7 });
        assert_eq!(s.phase, Phase::Paused);
        assert_eq!(s.time_remaining(), 9);
        s = s.reduce(SessionAction::Resume);
        s = s.reduce(SessionAction::Tick);
        assert_eq!(s.time_remaining(), 8);
        assert_eq!(s.elapsed_secs, 2);
    }

    #[test]
    fn restart_keeps_session_badges() {
        let s = started(GameKind::Khipu, Difficulty::Easy, 0);
        let s = s.reduce(SessionAction::Answer { value: 7 });
        assert_eq!(s.new_badges, vec![SessionBadge::FirstSuccess]);
        let s = s.reduce(SessionAction::Start { question: question(4) });
        assert_eq!(s.score, 0);
        let s = s.reduce(SessionAction::Answer { value: 4 });
        assert!(s.new_badges.is_empty());
    }

    #[test]
    fn next_level_carries_streak() {
        let s = started(GameKind::Khipu, Difficulty::Easy, 0);
        let s = s.reduce(SessionAction::Answer { value: 7 });
        let next = spec(GameKind::Khipu, 1, 2);
        let s = s.reduce(SessionAction::NextLevel { level: next, question: question(5) });
        assert_eq!(s.level.level, 2);
        assert!(s.is_playing());
        let s = s.reduce(SessionAction::Answer { value: 5 });
        assert_eq!(s.last_points, 15);
        assert_eq!(s.score, 25);
        assert_eq!(s.streak, 2);
    }

    #[test]
    fn skip_ends_session() {
        let s = started(GameKind::Khipu, Difficulty::Easy, 0);
        let s = s.reduce(SessionAction::Skip);
        assert_eq!(s.phase, Phase::Lost(LossReason::Skipped));
    }
}
