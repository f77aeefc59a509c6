use serde::Serialize;

use crate::rating::formula::{aggregate_rating, Rating, SQUAD_CAPACITY};

/// Largest squad size accepted by input validation.
pub const MAX_SQUAD_SIZE: usize = 23;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SquadCheck {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_rating: Option<u32>,
    pub target_rating: u32,
    pub message: String,
}

/// Checks a complete squad against a target rating.
///
/// A squad of the wrong size is rejected before any rating is computed.
pub fn validate_squad(ratings: &[Rating], target_rating: u32, squad_size: usize) -> SquadCheck {
    if ratings.len() != squad_size {
        return SquadCheck {
            valid: false,
            actual_rating: None,
            target_rating,
            message: format!(
                "Squad must have exactly {squad_size} players (got {})",
                ratings.len()
            ),
        };
    }

    let actual = aggregate_rating(ratings);
    let valid = actual >= target_rating;
    let message = if valid {
        format!("Squad rating {actual} meets target {target_rating}")
    } else {
        format!("Squad rating {actual} is below target {target_rating}")
    };

    SquadCheck {
        valid,
        actual_rating: Some(actual),
        target_rating,
        message,
    }
}

/// Average rating the remaining slots need so the squad total reaches `target * 11`.
///
/// This is a plain average bound that ignores the above-average correction, so it
/// overestimates what is actually needed. Capacity is always 11. Returns `None` when
/// there are no slots left to fill.
pub fn calculate_minimum_rating_needed(
    target_rating: u32,
    existing_ratings: &[Rating],
    remaining_slots: usize,
) -> Option<i64> {
    if remaining_slots == 0 {
        return None;
    }
    let required = i64::from(target_rating) * SQUAD_CAPACITY as i64;
    let existing: i64 = existing_ratings.iter().map(|&r| i64::from(r)).sum();
    let slots = i64::try_from(remaining_slots).ok()?;
    let shortfall = required - existing;
    // ceil for a positive divisor
    Some(shortfall.div_euclid(slots) + i64::from(shortfall.rem_euclid(slots) != 0))
}
