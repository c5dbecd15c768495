//! Random quiz draws without repeats.
//!
//! A draw works on a pool: the questions of the requested category minus
//! every question the player has already seen. An empty pool is exhaustion,
//! the normal end of a quiz, and is reported as `None`.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::types::{Question, QuestionId, QuizCategory};

/// Questions eligible for the next draw, in input order.
pub fn candidate_pool<'a>(
    questions: &'a [Question],
    category: QuizCategory,
    previous: &HashSet<QuestionId>,
) -> Vec<&'a Question> {
    questions
        .iter()
        .filter(|q| category.matches(q.category))
        .filter(|q| !previous.contains(&q.id))
        .collect()
}

/// Pick one unseen question uniformly at random.
///
/// Returns `None` exactly when no question of `category` remains outside
/// `previous`.
pub fn next_question<R: Rng + ?Sized>(
    questions: &[Question],
    category: QuizCategory,
    previous: &HashSet<QuestionId>,
    rng: &mut R,
) -> Option<Question> {
    candidate_pool(questions, category, previous)
        .choose(rng)
        .map(|q| (*q).clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded_rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn bank() -> Vec<Question> {
        vec![
            Question::new(1, "Q1", "A1", 1, 2),
            Question::new(2, "Q2", "A2", 2, 3),
            Question::new(3, "Q3", "A3", 1, 1),
            Question::new(4, "Q4", "A4", 1, 5),
            Question::new(5, "Q5", "A5", 3, 2),
        ]
    }

    #[test]
    fn test_pool_filters_category_and_previous() {
        let questions = bank();
        let previous = HashSet::from([3]);
        let ids: Vec<_> = candidate_pool(&questions, QuizCategory::Specific(1), &previous)
            .iter()
            .map(|q| q.id)
            .collect();
        assert_eq!(ids, vec![1, 4]);
    }

    #[test]
    fn test_all_category_still_excludes_previous() {
        let questions = bank();
        let previous = HashSet::from([1, 2, 3, 4]);
        let mut rng = seeded_rng();
        for _ in 0..20 {
            let q = next_question(&questions, QuizCategory::All, &previous, &mut rng).unwrap();
            assert_eq!(q.id, 5);
        }
    }

    #[test]
    fn test_never_returns_previous_question() {
        let questions = bank();
        let previous = HashSet::from([1, 5]);
        let mut rng = seeded_rng();
        for _ in 0..100 {
            let q = next_question(&questions, QuizCategory::All, &previous, &mut rng).unwrap();
            assert!(!previous.contains(&q.id));
        }
    }

    #[test]
    fn test_draws_cover_the_pool() {
        let questions = bank();
        let mut rng = seeded_rng();
        let mut seen = HashSet::new();
        for _ in 0..200 {
            let q = next_question(&questions, QuizCategory::Specific(1), &HashSet::new(), &mut rng)
                .unwrap();
            seen.insert(q.id);
        }
        assert_eq!(seen, HashSet::from([1, 3, 4]));
    }

    #[test]
    fn test_exhaustion_returns_none() {
        let questions = bank();
        let mut rng = seeded_rng();
        let previous = HashSet::from([1, 3, 4]);
        let unseen = HashSet::new();
        let exhausted = next_question(&questions, QuizCategory::Specific(1), &previous, &mut rng);
        assert!(exhausted.is_none());
        assert!(next_question(&questions, QuizCategory::Specific(9), &unseen, &mut rng).is_none());
        assert!(next_question(&[], QuizCategory::All, &HashSet::new(), &mut rng).is_none());
    }

    #[test]
    fn test_same_seed_same_draw() {
        let questions = bank();
        let a = next_question(&questions, QuizCategory::All, &HashSet::new(), &mut seeded_rng());
        let b = next_question(&questions, QuizCategory::All, &HashSet::new(), &mut seeded_rng());
        assert_eq!(a, b);
    }

    #[test]
    fn test_simulated_quiz_visits_each_question_once() {
        let questions = bank();
        let mut rng = seeded_rng();
        let mut previous = HashSet::new();
        while let Some(q) = next_question(&questions, QuizCategory::All, &previous, &mut rng) {
            assert!(previous.insert(q.id));
        }
        assert_eq!(previous.len(), questions.len());
    }
}
