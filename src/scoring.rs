// src/scoring.rs

//! Quiz scoring engine.
//!
//! Quizzes are static definitions (see `crate::quizzes`). A submission is a
//! mapping from question id to option id; scoring folds the selected options
//! into a total, a percentage of the maximum, a per-category `ScoreState`,
//! and finally a result band or a top category.

use std::collections::{BTreeSet, HashMap};

use serde::{Serialize, Serializer, ser::SerializeMap};

use crate::error::ScoringError;

/// A quiz definition.
#[derive(Debug, Serialize)]
pub struct Quiz {
    pub slug: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub questions: &'static [Question],
    #[serde(skip)]
    pub grading: Grading,
    /// Categories seeded into the score state in declaration order.
    #[serde(skip)]
    pub categories: &'static [&'static str],
}

/// How a finished quiz is turned into a result.
#[derive(Debug)]
pub enum Grading {
    /// Bands looked up by `round(total / max * 100)`.
    Percentage(&'static [Band]),
    /// Bands looked up by the raw total.
    RawTotal(&'static [Band]),
    /// The category with the highest accumulated weight wins.
    TopCategory,
}

#[derive(Debug, Serialize)]
pub struct Question {
    pub id: &'static str,
    pub prompt: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<&'static str>,
    /// Negatively phrased item: contributes `max + 1 - raw`.
    #[serde(skip)]
    pub reverse: bool,
    pub options: &'static [AnswerOption],
}

#[derive(Debug, Serialize)]
pub struct AnswerOption {
    pub id: &'static str,
    pub label: &'static str,
    #[serde(skip)]
    pub weight: i64,
    /// Points awarded to named categories (persona routing).
    #[serde(skip)]
    pub awards: &'static [(&'static str, i64)],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

/// A result band. Bands of a quiz are ordered by descending `min`; the last
/// band is the catch-all.
#[derive(Debug, Serialize)]
pub struct Band {
    #[serde(skip)]
    pub min: i64,
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'static str>,
    pub description: &'static str,
    #[serde(skip_serializing_if = "is_empty_list")]
    pub highlights: &'static [&'static str],
    pub recommendations: &'static [&'static str],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeline: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgency: Option<Urgency>,
}

fn is_empty_list(list: &&'static [&'static str]) -> bool {
    list.is_empty()
}

impl Question {
    fn max_weight(&self) -> i64 {
        self.options.iter().map(|o| o.weight).max().unwrap_or(0)
    }

    fn min_weight(&self) -> i64 {
        self.options.iter().map(|o| o.weight).min().unwrap_or(0)
    }

    /// Points this question contributes for the given option.
    pub fn points_for(&self, option: &AnswerOption) -> i64 {
        if self.reverse {
            self.max_weight() + 1 - option.weight
        } else {
            option.weight
        }
    }

    /// Highest contribution this question can make.
    pub fn max_points(&self) -> i64 {
        if self.reverse {
            self.max_weight() + 1 - self.min_weight()
        } else {
            self.max_weight()
        }
    }

    pub fn option(&self, option_id: &str) -> Option<&'static AnswerOption> {
        self.options.iter().find(|o| o.id == option_id)
    }
}

impl Quiz {
    pub fn question(&self, question_id: &str) -> Option<&'static Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }

    pub fn max_score(&self) -> i64 {
        self.questions.iter().map(Question::max_points).sum()
    }

    fn resolve(
        &self,
        question_id: &str,
        option_id: &str,
    ) -> Result<(&'static Question, &'static AnswerOption), ScoringError> {
        let question = self
            .question(question_id)
            .ok_or_else(|| ScoringError::UnknownQuestion(question_id.to_string()))?;
        let option = question
            .option(option_id)
            .ok_or_else(|| ScoringError::UnknownOption {
                question: question_id.to_string(),
                option: option_id.to_string(),
            })?;
        Ok((question, option))
    }
}

/// A recorded answer. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Answer {
    pub question_id: &'static str,
    pub selected_option_id: &'static str,
    pub weight: i64,
}

/// Accumulated weight per category, kept in first-insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreState {
    entries: Vec<(String, i64)>,
}

impl ScoreState {
    pub fn seeded(categories: &[&str]) -> Self {
        Self {
            entries: categories.iter().map(|c| (c.to_string(), 0)).collect(),
        }
    }

    pub fn add(&mut self, category: &str, weight: i64) {
        match self.entries.iter_mut().find(|(name, _)| name == category) {
            Some((_, total)) => *total += weight,
            None => self.entries.push((category.to_string(), weight)),
        }
    }

    pub fn get(&self, category: &str) -> i64 {
        self.entries
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, total)| *total)
            .unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.entries.iter().map(|(name, total)| (name.as_str(), *total))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Category with the highest weight. A later category wins a tie.
    pub fn top_category(&self) -> Option<&str> {
        self.entries
            .iter()
            .reduce(|best, next| if best.1 > next.1 { best } else { next })
            .map(|(name, _)| name.as_str())
    }
}

impl Serialize for ScoreState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, total) in &self.entries {
            map.serialize_entry(name, total)?;
        }
        map.end()
    }
}

/// Result of folding answers, before grading.
#[derive(Debug, Clone)]
pub struct Tally {
    pub answers: Vec<Answer>,
    pub total: i64,
    pub max: i64,
    pub score_state: ScoreState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CategoryStatus {
    Strong,
    Developing,
    #[serde(rename = "Needs Focus")]
    NeedsFocus,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryBreakdown {
    pub category: String,
    pub score: i64,
    pub max: i64,
    pub percentage: i64,
    pub status: CategoryStatus,
    pub priority: Urgency,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizOutcome {
    pub quiz: &'static str,
    pub total_score: i64,
    pub max_score: i64,
    pub percentage: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<&'static Band>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_category: Option<String>,
    #[serde(skip_serializing_if = "ScoreState::is_empty")]
    pub category_scores: ScoreState,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub breakdown: Vec<CategoryBreakdown>,
}

impl QuizOutcome {
    /// Label describing the outcome: the band label or the top category.
    pub fn label(&self) -> Option<&str> {
        self.result
            .map(|band| band.label)
            .or(self.top_category.as_deref())
    }
}

/// `round(total / max * 100)`, rounding halves up. Zero when `max` is zero.
pub fn percentage(total: i64, max: i64) -> i64 {
    if max <= 0 {
        return 0;
    }
    (200 * total + max).div_euclid(2 * max)
}

/// First band whose threshold the value reaches; the last band catches the rest.
pub fn band_for(bands: &'static [Band], value: i64) -> Option<&'static Band> {
    bands
        .iter()
        .find(|band| value >= band.min)
        .or_else(|| bands.last())
}

fn fold(
    quiz: &'static Quiz,
    picks: impl IntoIterator<Item = (&'static Question, &'static AnswerOption)>,
) -> Tally {
    let mut score_state = ScoreState::seeded(quiz.categories);
    let mut answers = Vec::new();
    let mut total = 0;

    for (question, option) in picks {
        let weight = question.points_for(option);
        total += weight;
        if option.awards.is_empty() {
            if let Some(category) = question.category {
                score_state.add(category, weight);
            }
        } else {
            for (category, points) in option.awards {
                score_state.add(category, *points);
            }
        }
        answers.push(Answer {
            question_id: question.id,
            selected_option_id: option.id,
            weight,
        });
    }

    Tally {
        answers,
        total,
        max: quiz.max_score(),
        score_state,
    }
}

/// Folds the selected options into a tally. Unanswered questions contribute 0.
pub fn tally(
    quiz: &'static Quiz,
    selections: &HashMap<String, String>,
) -> Result<Tally, ScoringError> {
    // Question order, not map order, so category state is deterministic.
    let mut picks = Vec::with_capacity(selections.len());
    for question_id in selections.keys() {
        if quiz.question(question_id).is_none() {
            return Err(ScoringError::UnknownQuestion(question_id.clone()));
        }
    }
    for question in quiz.questions {
        if let Some(option_id) = selections.get(question.id) {
            picks.push(quiz.resolve(question.id, option_id)?);
        }
    }
    Ok(fold(quiz, picks))
}

/// Scores a complete submission. Rejects it unless every question is answered.
pub fn evaluate(
    quiz: &'static Quiz,
    selections: &HashMap<String, String>,
) -> Result<QuizOutcome, ScoringError> {
    let tally = tally(quiz, selections)?;
    let answered: BTreeSet<&str> = tally.answers.iter().map(|a| a.question_id).collect();
    let missing: Vec<String> = quiz
        .questions
        .iter()
        .filter(|q| !answered.contains(q.id))
        .map(|q| q.id.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ScoringError::Incomplete { missing });
    }
    Ok(grade(quiz, tally))
}

/// Turns a tally into an outcome according to the quiz grading.
pub fn grade(quiz: &'static Quiz, tally: Tally) -> QuizOutcome {
    let percentage = percentage(tally.total, tally.max);

    let (result, top_category) = match quiz.grading {
        Grading::Percentage(bands) => (band_for(bands, percentage), None),
        Grading::RawTotal(bands) => (band_for(bands, tally.total), None),
        Grading::TopCategory => (
            None,
            tally.score_state.top_category().map(str::to_string),
        ),
    };

    let breakdown = match quiz.grading {
        Grading::TopCategory => Vec::new(),
        _ => breakdown(quiz, &tally.score_state),
    };

    QuizOutcome {
        quiz: quiz.slug,
        total_score: tally.total,
        max_score: tally.max,
        percentage,
        result,
        top_category,
        category_scores: tally.score_state,
        breakdown,
    }
}

/// Per-category score against the category's own maximum.
fn breakdown(quiz: &Quiz, state: &ScoreState) -> Vec<CategoryBreakdown> {
    let mut maxima = ScoreState::default();
    for question in quiz.questions {
        if let Some(category) = question.category {
            maxima.add(category, question.max_points());
        }
    }

    maxima
        .iter()
        .map(|(category, max)| {
            let score = state.get(category);
            let percentage = percentage(score, max);
            let (status, priority) = if percentage >= 75 {
                (CategoryStatus::Strong, Urgency::Low)
            } else if percentage >= 50 {
                (CategoryStatus::Developing, Urgency::Medium)
            } else {
                (CategoryStatus::NeedsFocus, Urgency::High)
            };
            CategoryBreakdown {
                category: category.to_string(),
                score,
                max,
                percentage,
                status,
                priority,
            }
        })
        .collect()
}

/// An in-progress quiz owned by a single caller.
#[derive(Debug, Clone)]
pub struct QuizSession {
    quiz: &'static Quiz,
    answers: Vec<(&'static Question, &'static AnswerOption)>,
}

impl QuizSession {
    pub fn new(quiz: &'static Quiz) -> Self {
        Self {
            quiz,
            answers: Vec::with_capacity(quiz.questions.len()),
        }
    }

    pub fn quiz(&self) -> &'static Quiz {
        self.quiz
    }

    /// Records an answer. Each question can be answered once.
    pub fn record(&mut self, question_id: &str, option_id: &str) -> Result<Answer, ScoringError> {
        let (question, option) = self.quiz.resolve(question_id, option_id)?;
        if self.answers.iter().any(|(q, _)| q.id == question.id) {
            return Err(ScoringError::AlreadyAnswered(question.id.to_string()));
        }
        self.answers.push((question, option));
        Ok(Answer {
            question_id: question.id,
            selected_option_id: option.id,
            weight: question.points_for(option),
        })
    }

    /// Question ids still unanswered, in quiz order.
    pub fn remaining(&self) -> Vec<&'static str> {
        self.quiz
            .questions
            .iter()
            .filter(|q| !self.answers.iter().any(|(a, _)| a.id == q.id))
            .map(|q| q.id)
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.answers.len() == self.quiz.questions.len()
    }

    /// Running tally over the answers recorded so far.
    pub fn tally(&self) -> Tally {
        fold(self.quiz, self.answers.iter().copied())
    }

    pub fn finish(self) -> Result<QuizOutcome, ScoringError> {
        let missing = self.remaining();
        if !missing.is_empty() {
            return Err(ScoringError::Incomplete {
                missing: missing.into_iter().map(str::to_string).collect(),
            });
        }
        let tally = self.tally();
        Ok(grade(self.quiz, tally))
    }
}
