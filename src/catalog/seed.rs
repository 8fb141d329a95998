//! Built-in demo module used when no catalog files are configured.

use super::{CatalogFile, ModuleQuestion};
use crate::models::{
    AnswerOption, AssessmentCriterion, Difficulty, LearningOutcome, Question, QuestionIntent,
};

pub const SEED_MODULE_ID: &str = "module-1";

fn correct_and_distractor(correct: &str, distractor: &str) -> Vec<AnswerOption> {
    vec![
        AnswerOption::new("o-1", correct, true),
        AnswerOption::new("o-2", distractor, false),
    ]
}

/// Two outcomes, four criteria and eight questions for `module-1`.
pub fn seed_catalog() -> CatalogFile {
    use Difficulty::{Hard, Medium};
    use QuestionIntent::{Practical, Theoretical};

    let learning_outcomes = vec![
        LearningOutcome::new("ra-1", SEED_MODULE_ID, "Understand core concepts and terminology."),
        LearningOutcome::new("ra-2", SEED_MODULE_ID, "Apply concepts to realistic scenarios."),
    ];

    let assessment_criteria = vec![
        AssessmentCriterion::new("ce-1", "ra-1", "Identify definitions."),
        AssessmentCriterion::new("ce-2", "ra-1", "Differentiate concepts."),
        AssessmentCriterion::new("ce-3", "ra-2", "Solve guided exercises."),
        AssessmentCriterion::new("ce-4", "ra-2", "Analyze practical cases."),
    ];

    let questions = [
        Question::true_false("q-1", "Statement about a key definition.", Theoretical, &["ce-1"], true)
            .with_points(1.0),
        Question::multiple_choice(
            "q-2",
            "Pick the correct concept.",
            Theoretical,
            &["ce-2"],
            correct_and_distractor("Correct", "Distractor"),
        )
        .with_points(1.0),
        Question::multiple_choice(
            "q-3",
            "Differentiate similar terms.",
            Theoretical,
            &["ce-2"],
            correct_and_distractor("Correct", "Distractor"),
        )
        .with_difficulty(Medium)
        .with_points(1.0),
        Question::short_answer(
            "q-4",
            "Explain why a scenario works this way.",
            Practical,
            &["ce-3"],
            "Reasoned answer",
        )
        .with_difficulty(Medium)
        .with_points(2.0),
        Question::true_false("q-5", "Evaluate a practical situation quickly.", Practical, &["ce-3"], false)
            .with_points(1.0),
        Question::short_answer(
            "q-6",
            "Analyze and justify an applied decision.",
            Practical,
            &["ce-4"],
            "Structured analysis",
        )
        .with_difficulty(Hard)
        .with_points(2.0),
        Question::multiple_choice(
            "q-7",
            "Choose the best intervention in a case.",
            Practical,
            &["ce-4"],
            correct_and_distractor("Best option", "Less suitable"),
        )
        .with_difficulty(Medium)
        .with_points(1.0),
        Question::multiple_choice(
            "q-8",
            "Recall a foundational concept.",
            Theoretical,
            &["ce-1"],
            correct_and_distractor("Correct", "Distractor"),
        )
        .with_points(1.0),
    ];

    CatalogFile {
        learning_outcomes,
        assessment_criteria,
        questions: questions
            .into_iter()
            .map(|q| ModuleQuestion::new(SEED_MODULE_ID, q))
            .collect(),
    }
}
