//! Seed validation.
//!
//! Checks structural integrity of board seed data before a board is
//! built from it. Detects:
//! - Duplicate tour, operation, and template IDs
//! - Inverted tour windows
//! - Inverted operation intervals
//!
//! All problems are collected, not just the first.

use std::collections::HashSet;

use crate::seed::BoardSeed;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two tours share the same ID.
    DuplicateTourId,
    /// Two operations share the same ID (across all tours).
    DuplicateOperationId,
    /// Two templates share the same ID.
    DuplicateTemplateId,
    /// A tour window does not start before it ends.
    InvalidTourWindow,
    /// An operation does not start before it ends.
    InvalidInterval,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a board seed.
///
/// Checks:
/// 1. No duplicate tour IDs
/// 2. No duplicate operation IDs (across all tours)
/// 3. No duplicate template IDs
/// 4. Every tour window has `begin < end`
/// 5. Every operation has `begin < end`
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_seed(seed: &BoardSeed) -> ValidationResult {
    let mut errors = Vec::new();

    let mut tour_ids = HashSet::new();
    let mut operation_ids = HashSet::new();

    for tour in &seed.tours {
        if !tour_ids.insert(tour.tour_id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateTourId,
                format!("Duplicate tour ID: {}", tour.tour_id),
            ));
        }

        if tour.begin_date_time >= tour.end_date_time {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidTourWindow,
                format!(
                    "Tour {} window {} .. {} is empty or inverted",
                    tour.tour_id, tour.begin_date_time, tour.end_date_time
                ),
            ));
        }

        for op in &tour.tour_operations {
            if !operation_ids.insert(op.tour_operation_id) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateOperationId,
                    format!("Duplicate operation ID: {}", op.tour_operation_id),
                ));
            }

            if op.operation_begin_date >= op.operation_end_date {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidInterval,
                    format!(
                        "Operation {} on tour {} has start {} not before end {}",
                        op.tour_operation_id,
                        tour.tour_id,
                        op.operation_begin_date,
                        op.operation_end_date
                    ),
                ));
            }
        }
    }

    let mut template_ids = HashSet::new();
    for template in &seed.templates {
        if !template_ids.insert(template.template_id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateTemplateId,
                format!("Duplicate template ID: {}", template.template_id),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
