use std::ops::RangeInclusive;

use serde::Serialize;

use crate::rating::{Rating, MAX_RATING, MAX_SQUAD_SIZE, MIN_RATING};

const RATING_RANGE: RangeInclusive<Rating> = MIN_RATING..=MAX_RATING;
const SQUAD_SIZE_RANGE: RangeInclusive<usize> = 1..=MAX_SQUAD_SIZE;

/// Inputs checked before any search runs.
#[derive(Debug, Clone, Copy)]
pub struct InputCheck<'a> {
    pub target_rating: u32,
    pub existing_ratings: &'a [Rating],
    pub available_ratings: &'a [Rating],
    pub squad_size: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    fn push(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Runs every check and collects all failures rather than stopping at the first.
pub fn validate_input(input: &InputCheck<'_>) -> ValidationReport {
    let mut report = ValidationReport::default();

    if !RATING_RANGE.contains(&input.target_rating) {
        report.push(format!(
            "Target rating must be a number between {MIN_RATING} and {MAX_RATING}"
        ));
    }
    if !input.existing_ratings.iter().all(|r| RATING_RANGE.contains(r)) {
        report.push(format!(
            "All existing ratings must be numbers between {MIN_RATING} and {MAX_RATING}"
        ));
    }
    if !input.available_ratings.iter().all(|r| RATING_RANGE.contains(r)) {
        report.push(format!(
            "All available ratings must be numbers between {MIN_RATING} and {MAX_RATING}"
        ));
    }
    if !SQUAD_SIZE_RANGE.contains(&input.squad_size) {
        report.push(format!(
            "Squad size must be a number between 1 and {MAX_SQUAD_SIZE}"
        ));
    }
    if input.existing_ratings.len() > input.squad_size {
        report.push("Existing ratings cannot exceed squad size");
    }

    report.valid = !report.has_errors();
    report
}
