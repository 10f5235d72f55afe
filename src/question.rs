//! Question generation: a target number plus plausible wrong answers.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{EngineError, Result};
use crate::model::{LevelSpec, Question};

pub const DISTRACTOR_COUNT: usize = 3;
/// Upper bound on perturbation draws before giving up on a level.
pub const MAX_DISTRACTOR_DRAWS: u32 = 1000;
/// Distractors may sit this far below target_min (never below 1)...
pub const DISTRACTOR_PAD_BELOW: i64 = 5;
/// ...and this far above target_max.
pub const DISTRACTOR_PAD_ABOVE: i64 = 10;

/// Common counting mistakes used to derive wrong answers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Perturbation {
    OffByOne,
    OffByTwo,
    Undercount,
    Overcount,
    AnyInRange,
    Double,
    Half,
}

const PERTURBATIONS: [Perturbation; 7] = [
    Perturbation::OffByOne,
    Perturbation::OffByTwo,
    Perturbation::Undercount,
    Perturbation::Overcount,
    Perturbation::AnyInRange,
    Perturbation::Double,
    Perturbation::Half,
];

impl Perturbation {
    fn apply<R: Rng + ?Sized>(self, correct: i64, min: i64, max: i64, rng: &mut R) -> i64 {
        let sign = if rng.gen_bool(0.5) { 1 } else { -1 };
        match self {
            Perturbation::OffByOne => correct.saturating_add(sign),
            Perturbation::OffByTwo => correct.saturating_add(2 * sign),
            Perturbation::Undercount => (correct as f64 * 0.8).floor() as i64,
            Perturbation::Overcount => (correct as f64 * 1.2).ceil() as i64,
            Perturbation::AnyInRange => rng.gen_range(min..=max),
            Perturbation::Double => correct.saturating_mul(2),
            Perturbation::Half => correct.div_euclid(2),
        }
    }
}

/// Inclusive window every distractor must fall in.
pub fn distractor_bounds(level: &LevelSpec) -> (i64, i64) {
    (
        level.target_min.saturating_sub(DISTRACTOR_PAD_BELOW).max(1),
        level.target_max.saturating_add(DISTRACTOR_PAD_ABOVE),
    )
}

/// Builds a fresh question for `level`.
pub fn generate<R: Rng + ?Sized>(level: &LevelSpec, rng: &mut R) -> Result<Question> {
    if level.target_max < level.target_min {
        return Err(EngineError::InvalidLevel {
            min: level.target_min,
            max: level.target_max,
        });
    }
    let correct = rng.gen_range(level.target_min..=level.target_max);
    let mut options = distractors(level, correct, rng)?;
    options.push(correct);
    options.shuffle(rng);
    Ok(Question {
        correct_answer: correct,
        options,
        difficulty: level.difficulty,
        concepts: level.concepts.clone(),
    })
}

/// Thread-local generator with range fallback; what the UI shell calls.
pub fn generate_question(level: &LevelSpec) -> Result<Question> {
    generate_or_fallback(level, &mut rand::thread_rng())
}

/// Range used when a level's own range cannot yield enough distractors.
pub const FALLBACK_RANGE: (i64, i64) = (1, 10);

/// Like [`generate`], but retries on [`FALLBACK_RANGE`] when the level's range
/// is too narrow for distractors. Invalid levels are still an error.
pub fn generate_or_fallback<R: Rng + ?Sized>(level: &LevelSpec, rng: &mut R) -> Result<Question> {
    match generate(level, rng) {
        Err(EngineError::DistractorGeneration { .. }) => {
            log::warn!(
                "falling back to {}..={} for {} grade {} level {}",
                FALLBACK_RANGE.0,
                FALLBACK_RANGE.1,
                level.kind,
                level.grade,
                level.level
            );
            let mut wide = level.clone();
            wide.target_min = FALLBACK_RANGE.0;
            wide.target_max = FALLBACK_RANGE.1;
            generate(&wide, rng)
        }
        other => other,
    }
}

fn distractors<R: Rng + ?Sized>(level: &LevelSpec, correct: i64, rng: &mut R) -> Result<Vec<i64>> {
    let (low, high) = distractor_bounds(level);
    let mut picked: Vec<i64> = Vec::with_capacity(DISTRACTOR_COUNT + 1);
    let mut draws = 0;
    while picked.len() < DISTRACTOR_COUNT {
        if draws >= MAX_DISTRACTOR_DRAWS {
            log::warn!(
                "distractor generation gave up for {} grade {} level {} (answer {correct})",
                level.kind,
                level.grade,
                level.level
            );
            return Err(EngineError::DistractorGeneration {
                correct,
                low,
                high,
                needed: DISTRACTOR_COUNT,
                attempts: draws,
            });
        }
        draws += 1;
        let Some(strategy) = PERTURBATIONS.choose(rng) else { break };
        let candidate = strategy.apply(correct, level.target_min, level.target_max, rng);
        if candidate != correct && (low..=high).contains(&candidate) && !picked.contains(&candidate) {
            picked.push(candidate);
        }
    }
    Ok(picked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::spec;
    use crate::model::GameKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ranged(min: i64, max: i64) -> LevelSpec {
        let mut l = spec(GameKind::Khipu, 1, 1);
        l.target_min = min;
        l.target_max = max;
        l
    }

    fn assert_well_formed(level: &LevelSpec, q: &Question) {
        let (low, high) = distractor_bounds(level);
        assert_eq!(q.options.len(), DISTRACTOR_COUNT + 1);
        assert_eq!(q.options.iter().filter(|v| **v == q.correct_answer).count(), 1);
        let mut sorted = q.options.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), q.options.len(), "duplicate option in {:?}", q.options);
        assert!((level.target_min..=level.target_max).contains(&q.correct_answer));
        for d in q.distractors() {
            assert!((low..=high).contains(&d), "{d} outside [{low}, {high}]");
        }
    }

    #[test]
    fn options_are_well_formed_across_ranges() {
        let ranges = [(1, 5), (1, 9), (10, 20), (50, 150), (500, 999), (7, 7), (3, 4)];
        for (seed, (min, max)) in ranges.iter().enumerate() {
            let level = ranged(*min, *max);
            let mut rng = StdRng::seed_from_u64(seed as u64);
            for _ in 0..200 {
                let q = generate(&level, &mut rng).unwrap();
                assert_well_formed(&level, &q);
            }
        }
    }

    #[test]
    fn question_carries_level_metadata() {
        let level = ranged(1, 9);
        let q = generate(&level, &mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(q.difficulty, level.difficulty);
        assert_eq!(q.concepts, level.concepts);
    }

    #[test]
    fn inverted_range_is_invalid() {
        let level = ranged(10, 5);
        let err = generate(&level, &mut StdRng::seed_from_u64(0)).unwrap_err();
        assert!(matches!(err, EngineError::InvalidLevel { min: 10, max: 5 }));
    }

    #[test]
    fn degenerate_range_hits_safety_bound() {
        // Only 2 and 3 are reachable from an answer of 1.
        let level = ranged(1, 1);
        let err = generate(&level, &mut StdRng::seed_from_u64(3)).unwrap_err();
        match err {
            EngineError::DistractorGeneration { correct, attempts, .. } => {
                assert_eq!(correct, 1);
                assert_eq!(attempts, MAX_DISTRACTOR_DRAWS);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn fallback_recovers_degenerate_range() {
        let level = ranged(1, 1);
        let q = generate_or_fallback(&level, &mut StdRng::seed_from_u64(9)).unwrap();
        assert!((FALLBACK_RANGE.0..=FALLBACK_RANGE.1).contains(&q.correct_answer));
        assert_eq!(q.options.len(), DISTRACTOR_COUNT + 1);
        assert!(generate_or_fallback(&ranged(4, 2), &mut StdRng::seed_from_u64(9)).is_err());
    }

    #[test]
    fn extreme_ranges_do_not_overflow() {
        for (min, max) in [(i64::MAX - 1, i64::MAX), (i64::MIN, i64::MIN + 100)] {
            let level = ranged(min, max);
            for seed in 0..20 {
                match generate(&level, &mut StdRng::seed_from_u64(seed)) {
                    Ok(q) => assert_well_formed(&level, &q),
                    Err(EngineError::DistractorGeneration { .. }) => {}
                    Err(other) => panic!("unexpected error {other:?}"),
                }
            }
        }
        assert_eq!(distractor_bounds(&ranged(i64::MIN, 0)), (1, 10));
        assert_eq!(distractor_bounds(&ranged(1, i64::MAX)), (1, i64::MAX));
    }

    #[test]
    fn bounds_never_drop_below_one() {
        assert_eq!(distractor_bounds(&ranged(2, 9)), (1, 19));
        assert_eq!(distractor_bounds(&ranged(100, 200)), (95, 210));
    }

    #[test]
    fn correct_answer_position_varies() {
        let level = ranged(10, 90);
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = [false; DISTRACTOR_COUNT + 1];
        for _ in 0..200 {
            let q = generate(&level, &mut rng).unwrap();
            let pos = q.options.iter().position(|v| *v == q.correct_answer).unwrap();
            seen[pos] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
