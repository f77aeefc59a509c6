pub mod combinations;
pub mod inventory;
pub mod validate;

pub use combinations::{
    combination_table, CombinationTable, PrecomputedCombination, TableError, TABLE_TARGETS,
};
pub use inventory::{count_ratings, get_unique_ratings, Inventory};
pub use validate::{validate_input, InputCheck, ValidationReport};
