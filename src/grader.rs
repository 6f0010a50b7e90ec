//! One grading request end to end: validate the submission, resolve the
//! reference range, compare.
//!
//! Validation failures and missing reference data surface as different
//! `GradeError` variants (see `GradeError::kind`), and both happen before any
//! comparison work starts.

use serde::{Deserialize, Serialize};

use crate::comparator::{ComparisonResult, RangeComparator};
use crate::config::EngineConfig;
use crate::distribution::{normalize_labeled, ActionDistribution, RawHandEntry};
use crate::error::{GradeError, GradeResult};
use crate::reference::{ReferenceBook, SolverInfo};
use crate::scenario::{Position, PreviousAction, ScenarioContext, ScenarioKey, Street};

/// Wire shape of a grading request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeRequest {
    pub position: Position,
    #[serde(default)]
    pub street: Street,
    #[serde(default, rename = "previousActions")]
    pub previous_actions: Vec<PreviousAction>,
    #[serde(rename = "effectiveStack")]
    pub effective_stack: f64,
    pub pot: f64,
    pub hands: Vec<RawHandEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GradeReport {
    pub scenario: ScenarioKey,
    pub source: SolverInfo,
    pub feedback: String,
    pub result: ComparisonResult,
}

pub struct Grader<'a> {
    config: EngineConfig,
    comparator: RangeComparator,
    book: &'a ReferenceBook,
}

impl<'a> Grader<'a> {
    /// `book` must have been keyed with `config.stack`.
    pub fn new(config: EngineConfig, book: &'a ReferenceBook) -> GradeResult<Grader<'a>> {
        if config.stack != *book.stack_config() {
            return Err(GradeError::InvalidValue(
                "engine stack config does not match the one the reference book was keyed with".to_string(),
            ));
        }
        let comparator = RangeComparator::new(config.comparator.clone());
        Ok(Grader {
            config,
            comparator,
            book,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn book(&self) -> &ReferenceBook {
        self.book
    }

    /// Validate raw entries into a distribution using the configured policy.
    pub fn validate(&self, submission: &[RawHandEntry]) -> GradeResult<ActionDistribution> {
        normalize_labeled(submission, &self.config.distribution)
    }

    pub fn grade(&self, context: &ScenarioContext, submission: &[RawHandEntry]) -> GradeResult<GradeReport> {
        let submitted = self.validate(submission)?;
        self.grade_distribution(context, &submitted)
    }

    pub fn grade_distribution(
        &self,
        context: &ScenarioContext,
        submitted: &ActionDistribution,
    ) -> GradeResult<GradeReport> {
        let reference = self.book.resolve(context)?;
        let result = self.comparator.compare(submitted, &reference.distribution);

        log::debug!(
            "graded {}: score {:.3}, {} hands correct",
            reference.key,
            result.score,
            result.count(crate::comparator::Classification::Correct)
        );

        Ok(GradeReport {
            scenario: reference.key.clone(),
            source: reference.source.clone(),
            feedback: result.feedback(),
            result,
        })
    }

    pub fn grade_request(&self, request: &GradeRequest) -> GradeResult<GradeReport> {
        let context = ScenarioContext::new(
            request.position,
            request.previous_actions.clone(),
            request.effective_stack,
            request.pot,
        )?
        .with_street(request.street);
        self.grade(&context, &request.hands)
    }
}
