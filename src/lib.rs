//! Team rating calculation and squad completion search.
//!
//! [rating] holds the aggregate rating formula and the simple squad helpers,
//! [data] the inventory, the precomputed fill table and input validation, and
//! [optimizer] the precomputed and exhaustive searches. [server] and [cli] expose the
//! same operations over HTTP and the command line.

pub mod cli;
pub mod data;
pub mod error;
pub mod logging;
pub mod optimizer;
pub mod rating;
pub mod server;

pub use error::SolveError;
