// tests/scoring_tests.rs

use std::collections::HashMap;

use impact_backend::{
    error::ScoringError,
    quizzes::{self, AI_READINESS, IMPACT_PERSONA, LEADERSHIP_SCORECARD, MONEY_LEAK},
    scoring::{self, CategoryStatus, QuizSession, ScoreState, Urgency, band_for, percentage},
};

fn answers(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(q, o)| (q.to_string(), o.to_string()))
        .collect()
}

fn uniform(slug: &str, option: &str) -> HashMap<String, String> {
    let quiz = quizzes::find(slug).unwrap();
    quiz.questions
        .iter()
        .map(|q| (q.id.to_string(), option.to_string()))
        .collect()
}

#[test]
fn leadership_42_of_50_is_strong_not_exceptional() {
    let quiz = quizzes::find(LEADERSHIP_SCORECARD).unwrap();
    let mut selections = uniform(LEADERSHIP_SCORECARD, "4");
    selections.insert("q1".to_string(), "5".to_string());
    selections.insert("q2".to_string(), "5".to_string());

    let outcome = scoring::evaluate(quiz, &selections).unwrap();

    assert_eq!(outcome.total_score, 42);
    assert_eq!(outcome.max_score, 50);
    assert_eq!(outcome.percentage, 84);
    assert_eq!(outcome.label(), Some("Strong Leader"));
}

#[test]
fn leadership_band_edges() {
    let quiz = quizzes::find(LEADERSHIP_SCORECARD).unwrap();

    let all_fives = scoring::evaluate(quiz, &uniform(LEADERSHIP_SCORECARD, "5")).unwrap();
    assert_eq!(all_fives.percentage, 100);
    assert_eq!(all_fives.label(), Some("Exceptional Leader"));

    let all_ones = scoring::evaluate(quiz, &uniform(LEADERSHIP_SCORECARD, "1")).unwrap();
    assert_eq!(all_ones.percentage, 20);
    assert_eq!(all_ones.label(), Some("Emerging Leader"));
}

#[test]
fn percentage_rounds_half_up() {
    assert_eq!(percentage(42, 50), 84);
    assert_eq!(percentage(1, 8), 13); // 12.5
    assert_eq!(percentage(1, 3), 33);
    assert_eq!(percentage(2, 3), 67);
    assert_eq!(percentage(5, 0), 0);
}

#[test]
fn higher_percentage_never_maps_to_lower_band() {
    let quiz = quizzes::find(LEADERSHIP_SCORECARD).unwrap();
    let bands = match quiz.grading {
        scoring::Grading::Percentage(bands) => bands,
        _ => panic!("leadership scorecard bands on percentage"),
    };
    let position = |value: i64| {
        let band = band_for(bands, value).unwrap();
        bands.iter().position(|b| std::ptr::eq(b, band)).unwrap()
    };

    for p in 0..100 {
        assert!(
            position(p + 1) <= position(p),
            "{}% ranks below {}%",
            p + 1,
            p
        );
    }
}

#[test]
fn money_leak_reverse_scores_question_seven() {
    let quiz = quizzes::find(MONEY_LEAK).unwrap();

    // "Never" trained contributes 5 + 1 - 1 = 5.
    let never_trained = scoring::evaluate(quiz, &uniform(MONEY_LEAK, "1")).unwrap();
    assert_eq!(never_trained.total_score, 6 + 5);

    let mut selections = uniform(MONEY_LEAK, "1");
    selections.insert("q7".to_string(), "5".to_string());
    let always_trained = scoring::evaluate(quiz, &selections).unwrap();
    assert_eq!(always_trained.total_score, 6 + 1);

    assert_eq!(quiz.max_score(), 35);
}

#[test]
fn money_leak_bands_on_raw_total() {
    let quiz = quizzes::find(MONEY_LEAK).unwrap();

    let severe = scoring::evaluate(quiz, &uniform(MONEY_LEAK, "5")).unwrap();
    assert_eq!(severe.total_score, 31);
    assert_eq!(severe.label(), Some("Severe Leak"));
    assert_eq!(severe.result.unwrap().urgency, Some(Urgency::High));

    // 6 * 2 + (6 - 4) = 14 sits just under the moderate threshold.
    let mut selections = uniform(MONEY_LEAK, "2");
    selections.insert("q7".to_string(), "4".to_string());
    let minimal = scoring::evaluate(quiz, &selections).unwrap();
    assert_eq!(minimal.total_score, 14);
    assert_eq!(minimal.label(), Some("Minimal Leak"));

    selections.insert("q7".to_string(), "3".to_string());
    let moderate = scoring::evaluate(quiz, &selections).unwrap();
    assert_eq!(moderate.total_score, 15);
    assert_eq!(moderate.label(), Some("Moderate Leak"));
}

#[test]
fn total_is_sum_of_selected_weights() {
    let quiz = quizzes::find(AI_READINESS).unwrap();
    let selections = answers(&[
        ("tools_current", "3"),
        ("comfort_employees", "5"),
        ("marketing_ai", "1"),
        ("operations_ai", "4"),
        ("hr_ai", "2"),
        ("governance_policies", "2"),
        ("barriers_cost", "5"),
        ("barriers_skills", "3"),
        ("compliance_concerns", "1"),
        ("leadership_support", "4"),
    ]);

    let tally = scoring::tally(quiz, &selections).unwrap();
    let expected: i64 = quiz
        .questions
        .iter()
        .map(|q| {
            let option = q.option(&selections[q.id]).unwrap();
            q.points_for(option)
        })
        .sum();

    assert_eq!(tally.total, expected);
    assert_eq!(tally.total, 4 + 8 + 0 + 3 + 1 + 2 + 4 + 2 + 0 + 3);
    assert_eq!(tally.max, 52);
}

#[test]
fn ai_readiness_breakdown_flags_weak_departments() {
    let quiz = quizzes::find(AI_READINESS).unwrap();
    let mut selections = uniform(AI_READINESS, "5");
    selections.insert("hr_ai".to_string(), "1".to_string());

    let outcome = scoring::evaluate(quiz, &selections).unwrap();
    assert_eq!(outcome.total_score, 48);
    assert_eq!(outcome.percentage, 92);
    assert_eq!(outcome.label(), Some("AI Advanced"));
    assert!(outcome.result.unwrap().track.is_some());

    let hr = outcome
        .breakdown
        .iter()
        .find(|b| b.category == "Human Resources")
        .unwrap();
    assert_eq!(hr.percentage, 0);
    assert_eq!(hr.status, CategoryStatus::NeedsFocus);
    assert_eq!(hr.priority, Urgency::High);

    let tools = outcome
        .breakdown
        .iter()
        .find(|b| b.category == "Current AI Usage")
        .unwrap();
    assert_eq!(tools.status, CategoryStatus::Strong);
    assert_eq!(outcome.breakdown.len(), quiz.questions.len());
}

#[test]
fn unanswered_questions_contribute_zero() {
    let quiz = quizzes::find(MONEY_LEAK).unwrap();
    let tally = scoring::tally(quiz, &answers(&[("q1", "3")])).unwrap();

    // q7 is reverse scored but unanswered, so it adds nothing.
    assert_eq!(tally.total, 3);
    assert_eq!(tally.answers.len(), 1);
}

#[test]
fn incomplete_submission_lists_missing_questions() {
    let quiz = quizzes::find(LEADERSHIP_SCORECARD).unwrap();
    let mut selections = uniform(LEADERSHIP_SCORECARD, "3");
    selections.remove("q3");
    selections.remove("q10");

    let err = scoring::evaluate(quiz, &selections).unwrap_err();
    assert_eq!(
        err,
        ScoringError::Incomplete {
            missing: vec!["q3".to_string(), "q10".to_string()]
        }
    );
}

#[test]
fn unknown_ids_are_rejected() {
    let quiz = quizzes::find(LEADERSHIP_SCORECARD).unwrap();

    let err = scoring::tally(quiz, &answers(&[("q99", "1")])).unwrap_err();
    assert_eq!(err, ScoringError::UnknownQuestion("q99".to_string()));

    let err = scoring::tally(quiz, &answers(&[("q1", "9")])).unwrap_err();
    assert!(matches!(err, ScoringError::UnknownOption { .. }));
}

#[test]
fn persona_routing_picks_top_persona() {
    let quiz = quizzes::find(IMPACT_PERSONA).unwrap();
    let outcome = scoring::evaluate(quiz, &uniform(IMPACT_PERSONA, "a")).unwrap();

    assert_eq!(outcome.top_category.as_deref(), Some("eco_warrior"));
    assert_eq!(outcome.category_scores.get("eco_warrior"), 18);
    assert!(outcome.result.is_none());
}

#[test]
fn persona_tie_goes_to_later_category() {
    let mut state = ScoreState::seeded(&["eco_warrior", "community_builder", "tech_innovator"]);
    state.add("eco_warrior", 5);
    state.add("tech_innovator", 5);

    assert_eq!(state.top_category(), Some("tech_innovator"));
}

#[test]
fn session_rejects_second_answer_to_same_question() {
    let quiz = quizzes::find(LEADERSHIP_SCORECARD).unwrap();
    let mut session = QuizSession::new(quiz);

    let answer = session.record("q1", "4").unwrap();
    assert_eq!(answer.weight, 4);

    let err = session.record("q1", "5").unwrap_err();
    assert_eq!(err, ScoringError::AlreadyAnswered("q1".to_string()));
    assert_eq!(session.tally().total, 4);
}

#[test]
fn session_finishes_only_when_complete() {
    let quiz = quizzes::find(MONEY_LEAK).unwrap();
    let mut session = QuizSession::new(quiz);

    for question in quiz.questions.iter().take(6) {
        session.record(question.id, "3").unwrap();
    }
    assert!(!session.is_complete());
    assert_eq!(session.remaining(), vec!["q7"]);

    let err = session.clone().finish().unwrap_err();
    assert!(matches!(err, ScoringError::Incomplete { .. }));

    session.record("q7", "3").unwrap();
    assert!(session.is_complete());
    let outcome = session.finish().unwrap();
    assert_eq!(outcome.total_score, 18 + 3);
    assert_eq!(outcome.label(), Some("Moderate Leak"));
}
