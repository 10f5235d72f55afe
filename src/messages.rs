//! Per-game feedback text and counting helpers.

use crate::model::{Difficulty, Explanation, ExplanationKind, GameKind};

impl GameKind {
    pub fn success_details(self) -> &'static str {
        match self {
            GameKind::Khipu => "You counted every knot on the khipu correctly!",
            GameKind::Yupana => "You represented the number perfectly on the yupana!",
            GameKind::Chacana => "You completed the chacana's symmetry in harmony!",
        }
    }

    pub fn error_details(self, user_answer: i64, correct: i64) -> String {
        let diff = user_answer.abs_diff(correct);
        match self {
            GameKind::Khipu => {
                let tail = if diff > 1 {
                    "Check each cord carefully."
                } else {
                    "You were very close."
                };
                format!("The khipu holds {correct} knots, but you counted {user_answer}. {tail}")
            }
            GameKind::Yupana => {
                let tail = if diff > 5 {
                    "Check the value of each piece."
                } else {
                    "Adjust a few pieces."
                };
                format!("The target was {correct}, but your board adds up to {user_answer}. {tail}")
            }
            GameKind::Chacana => format!(
                "The pattern needs {correct} elements, but you placed {user_answer}. Look at the cross's symmetry."
            ),
        }
    }

    pub fn hint(self) -> &'static str {
        match self {
            GameKind::Khipu => "Hint: count each knot on its own; single and long knots are both worth 1.",
            GameKind::Yupana => "Hint: small pieces are worth 1, medium 3 and large 5.",
            GameKind::Chacana => "Hint: the chacana must be symmetric in every direction.",
        }
    }

    pub fn explain(self, user_answer: i64, correct: i64) -> Explanation {
        if user_answer == correct {
            Explanation {
                kind: ExplanationKind::Success,
                message: "Excellent! Your answer is correct.".to_string(),
                details: self.success_details().to_string(),
                hint: None,
            }
        } else {
            Explanation {
                kind: ExplanationKind::Error,
                message: format!("You chose {user_answer}, but the correct answer is {correct}."),
                details: self.error_details(user_answer, correct),
                hint: Some(match self {
                    GameKind::Yupana => yupana_hint(correct, user_answer),
                    _ => self.hint().to_string(),
                }),
            }
        }
    }
}

/// Hundreds, tens and units of a non-negative number below 1000.
pub fn place_values(n: i64) -> (i64, i64, i64) {
    let n = n.max(0);
    (n / 100, (n % 100) / 10, n % 10)
}

pub fn khipu_place_hint(target: i64) -> String {
    let (h, t, u) = place_values(target);
    format!("💡 Hint: {h} hundreds, {t} tens, {u} units")
}

/// Yupana pieces by value: large = 5, medium = 3, small = 1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct YupanaPieces {
    pub small: u32,
    pub medium: u32,
    pub large: u32,
}

impl YupanaPieces {
    pub const SMALL: i64 = 1;
    pub const MEDIUM: i64 = 3;
    pub const LARGE: i64 = 5;

    /// Fewest pieces per column (hundreds, tens, units), plus a small spare set.
    pub fn for_target(target: i64) -> Self {
        let (h, t, u) = place_values(target);
        let mut pieces = YupanaPieces::default();
        for mut digit in [h, t, u] {
            pieces.large += (digit / Self::LARGE) as u32;
            digit %= Self::LARGE;
            pieces.medium += (digit / Self::MEDIUM) as u32;
            digit %= Self::MEDIUM;
            pieces.small += digit as u32;
        }
        pieces.small += 2;
        pieces.medium += 1;
        pieces.large += 1;
        pieces
    }

    /// Scales the supply so easier levels get more slack.
    pub fn available(self, difficulty: Difficulty) -> Self {
        let factor = match difficulty {
            Difficulty::Easy => 1.5,
            Difficulty::Medium => 1.2,
            Difficulty::Hard => 1.0,
        };
        let scale = |n: u32| (f64::from(n) * factor).ceil() as u32;
        YupanaPieces {
            small: scale(self.small),
            medium: scale(self.medium),
            large: scale(self.large),
        }
    }
}

pub fn yupana_hint(target: i64, current: i64) -> String {
    let diff = target.saturating_sub(current);
    if diff > 0 {
        let piece = if diff >= YupanaPieces::LARGE {
            "Consider large pieces (value 5)."
        } else if diff >= YupanaPieces::MEDIUM {
            "A medium piece (value 3) would fit."
        } else {
            "Use small pieces (value 1)."
        };
        format!("You need {diff} more. {piece}")
    } else if diff < 0 {
        format!("You have {} too many. Remove some pieces.", diff.unsigned_abs())
    } else {
        "Perfect! Your board is correct.".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explanation_kinds() {
        let ok = GameKind::Khipu.explain(12, 12);
        assert_eq!(ok.kind, ExplanationKind::Success);
        assert!(ok.hint.is_none());
        let bad = GameKind::Yupana.explain(10, 12);
        assert_eq!(bad.kind, ExplanationKind::Error);
        assert!(bad.details.contains("Adjust a few pieces"));
        assert_eq!(bad.hint.as_deref(), Some("You need 2 more. Use small pieces (value 1)."));
    }

    #[test]
    fn khipu_error_mentions_closeness() {
        assert!(GameKind::Khipu.error_details(11, 12).contains("very close"));
        assert!(GameKind::Khipu.error_details(5, 12).contains("each cord"));
    }

    #[test]
    fn feedback_survives_extreme_answers() {
        assert!(GameKind::Khipu.error_details(i64::MIN, i64::MAX).contains("each cord"));
        assert!(GameKind::Yupana.error_details(i64::MAX, -1).contains("value of each piece"));
        assert!(yupana_hint(i64::MAX, i64::MIN).starts_with("You need"));
        assert!(yupana_hint(i64::MIN, i64::MAX).contains("too many"));
        let e = GameKind::Yupana.explain(i64::MIN, i64::MAX);
        assert_eq!(e.kind, ExplanationKind::Error);
    }

    #[test]
    fn place_value_hint() {
        assert_eq!(place_values(347), (3, 4, 7));
        assert_eq!(khipu_place_hint(58), "💡 Hint: 0 hundreds, 5 tens, 8 units");
    }

    #[test]
    fn yupana_piece_decomposition() {
        // 9 -> 5 + 3 + 1; 8 -> 5 + 3; 7 -> 5 + 1 + 1
        let p = YupanaPieces::for_target(987);
        assert_eq!(p, YupanaPieces { small: 3 + 2, medium: 2 + 1, large: 3 + 1 });
        let easy = YupanaPieces { small: 2, medium: 1, large: 1 }.available(Difficulty::Easy);
        assert_eq!(easy, YupanaPieces { small: 3, medium: 2, large: 2 });
    }

    #[test]
    fn yupana_hints() {
        assert!(yupana_hint(20, 12).contains("large pieces"));
        assert!(yupana_hint(20, 16).contains("medium"));
        assert!(yupana_hint(20, 22).contains("2 too many"));
        assert!(yupana_hint(20, 20).starts_with("Perfect"));
    }
}
