pub mod formula;
pub mod squad;
pub mod stats;

pub use formula::{
    aggregate_rating, total_rating_points, Rating, MAX_RATING, MIN_RATING, SQUAD_CAPACITY,
};
pub use squad::{calculate_minimum_rating_needed, validate_squad, SquadCheck, MAX_SQUAD_SIZE};
pub use stats::{get_rating_statistics, RatingStatistics};
