//! Team rating formula.
//!
//! A squad is always rated as if it had [SQUAD_CAPACITY] members: missing slots count
//! as zero. Members above the squad average add their surplus as a correction, the
//! corrected total is rounded half-up and the result is floored to a per-member value.
//!
//! The correction is carried scaled by the capacity so the whole computation stays in
//! integers and matches the in-game values exactly.

/// Individual member rating.
pub type Rating = u32;

/// Number of members a rated squad is padded to.
pub const SQUAD_CAPACITY: usize = 11;
/// Lowest accepted member rating.
pub const MIN_RATING: Rating = 45;
/// Highest accepted member rating.
pub const MAX_RATING: Rating = 99;

const CAPACITY: i128 = SQUAD_CAPACITY as i128;

/// Aggregate rating of a (possibly partial) squad. Empty input rates 0 and a result
/// beyond `u32` saturates.
///
/// # Example
/// ```
/// # use squad_rating::rating::aggregate_rating;
/// assert_eq!(aggregate_rating(&[87, 87]), 28);
/// assert_eq!(aggregate_rating(&[85; 11]), 85);
/// ```
pub fn aggregate_rating(ratings: &[Rating]) -> u32 {
    if ratings.is_empty() {
        return 0;
    }

    let sum: i128 = ratings.iter().map(|&r| i128::from(r)).sum();
    // sum of max(0, r - sum / 11), times 11. Zero padding never contributes.
    let surplus: i128 = ratings
        .iter()
        .map(|&r| (CAPACITY * i128::from(r) - sum).max(0))
        .sum();

    // (sum + surplus / 11) rounded half-up, then floored per member.
    let scaled = CAPACITY * sum + surplus;
    let rounded = (2 * scaled + CAPACITY).div_euclid(2 * CAPACITY);
    let rating = rounded.div_euclid(CAPACITY);

    u32::try_from(rating).unwrap_or(u32::MAX)
}

/// Sum of all member ratings; padding slots add nothing. Widened so arbitrary input
/// cannot overflow.
pub fn total_rating_points(ratings: &[Rating]) -> u64 {
    ratings.iter().map(|&r| u64::from(r)).sum()
}
