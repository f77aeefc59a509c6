use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::{combination_table, validate_input, InputCheck, TABLE_TARGETS};
use crate::optimizer::{
    estimate_search, find_most_efficient_solutions, find_optimal_solutions, find_squad_solutions,
    OptimalSearch, RatingGroup, SquadSearch,
};
use crate::rating::{
    aggregate_rating, calculate_minimum_rating_needed, get_rating_statistics, total_rating_points,
    validate_squad, Rating, SQUAD_CAPACITY,
};

#[derive(Debug, Clone, Serialize)]
pub struct ValidationErrorResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub errors: Vec<String>,
}

impl ValidationErrorResponse {
    fn new(errors: Vec<String>) -> Self {
        Self {
            status: "error",
            message: "Validation failed",
            errors,
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Parse(serde_json::Error),
    #[error("invalid request")]
    Validation(ValidationErrorResponse),
    #[error("{0}")]
    NotFound(String),
    #[error("failed to encode response: {0}")]
    Encode(serde_json::Error),
}

/// Which ranking a solve request uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveMode {
    Cheapest,
    MostEfficient,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RatingsRequest {
    #[serde(default)]
    pub ratings: Vec<Rating>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ValidateSquadRequest {
    pub ratings: Vec<Rating>,
    pub target_rating: u32,
    #[serde(default = "default_squad_size")]
    pub squad_size: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MinimumRequest {
    pub target_rating: u32,
    #[serde(default)]
    pub existing_ratings: Vec<Rating>,
    pub remaining_slots: usize,
}

fn default_squad_size() -> usize {
    SQUAD_CAPACITY
}

#[derive(Debug, Clone, Serialize)]
struct RatingResponse {
    rating: u32,
    total_rating_points: u64,
    members: usize,
}

#[derive(Debug, Clone, Serialize)]
struct MinimumResponse {
    target_rating: u32,
    remaining_slots: usize,
    minimum_rating: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
struct CombinationView {
    total_rating_points: u32,
    squad: Vec<RatingGroup>,
}

#[derive(Debug, Clone, Serialize)]
struct CombinationsResponse {
    target_rating: u32,
    combinations: Vec<CombinationView>,
}

fn parse<'a, T: Deserialize<'a>>(body: &'a str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(ApiError::Parse)
}

fn encode<T: Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value).map_err(ApiError::Encode)
}

fn check(input: &InputCheck<'_>) -> Result<(), ApiError> {
    let report = validate_input(input);
    if report.valid {
        Ok(())
    } else {
        Err(ApiError::Validation(ValidationErrorResponse::new(
            report.errors,
        )))
    }
}

pub fn health_payload() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&serde_json::json!({
        "status": "ok",
        "service": "squad-rating-api",
        "version": env!("CARGO_PKG_VERSION"),
        "precomputed_targets": combination_table().targets().collect::<Vec<_>>(),
    }))
}

pub fn rating_payload(body: &str) -> Result<String, ApiError> {
    let request: RatingsRequest = parse(body)?;
    encode(&RatingResponse {
        rating: aggregate_rating(&request.ratings),
        total_rating_points: total_rating_points(&request.ratings),
        members: request.ratings.len(),
    })
}

pub fn stats_payload(body: &str) -> Result<String, ApiError> {
    let request: RatingsRequest = parse(body)?;
    encode(&get_rating_statistics(&request.ratings))
}

pub fn validate_squad_payload(body: &str) -> Result<String, ApiError> {
    let request: ValidateSquadRequest = parse(body)?;
    encode(&validate_squad(
        &request.ratings,
        request.target_rating,
        request.squad_size,
    ))
}

pub fn minimum_payload(body: &str) -> Result<String, ApiError> {
    let request: MinimumRequest = parse(body)?;
    encode(&MinimumResponse {
        target_rating: request.target_rating,
        remaining_slots: request.remaining_slots,
        minimum_rating: calculate_minimum_rating_needed(
            request.target_rating,
            &request.existing_ratings,
            request.remaining_slots,
        ),
    })
}

pub fn solve_payload(body: &str, mode: SolveMode) -> Result<String, ApiError> {
    let search: SquadSearch = parse(body)?;
    check(&InputCheck {
        target_rating: search.target_rating,
        existing_ratings: &search.existing_ratings,
        available_ratings: &search.available_ratings,
        squad_size: search.squad_size,
    })?;
    let report = match mode {
        SolveMode::Cheapest => find_squad_solutions(&search),
        SolveMode::MostEfficient => find_most_efficient_solutions(&search),
    };
    encode(&report)
}

pub fn optimal_payload(body: &str) -> Result<String, ApiError> {
    let search: OptimalSearch = parse(body)?;
    check(&InputCheck {
        target_rating: search.target_rating,
        existing_ratings: &[],
        available_ratings: &search.available_ratings,
        squad_size: SQUAD_CAPACITY,
    })?;
    encode(&find_optimal_solutions(&search))
}

pub fn estimate_payload(body: &str) -> Result<String, ApiError> {
    let search: SquadSearch = parse(body)?;
    encode(&estimate_search(&search))
}

/// Authored fills for the target in the path segment.
pub fn combinations_payload(target: &str) -> Result<String, ApiError> {
    let target_rating: u32 = target
        .parse()
        .map_err(|_| ApiError::NotFound(format!("Unknown target rating '{target}'")))?;
    if !TABLE_TARGETS.contains(&target_rating) {
        return Err(ApiError::NotFound(format!(
            "No precomputed combinations for target rating {target_rating}"
        )));
    }
    let combinations = combination_table()
        .lookup(target_rating)
        .iter()
        .map(|fill| CombinationView {
            total_rating_points: fill.total_points(),
            squad: fill
                .groups()
                .map(|(rating, count)| RatingGroup { rating, count })
                .collect(),
        })
        .collect();
    encode(&CombinationsResponse {
        target_rating,
        combinations,
    })
}
