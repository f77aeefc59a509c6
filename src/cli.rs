use std::env;
use std::fs;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::optimizer::{
    find_most_efficient_solutions, find_optimal_solutions, find_squad_solutions, sweep_targets,
    OptimalSearch, SolveReport, SquadSearch,
};
use crate::rating::{
    aggregate_rating, calculate_minimum_rating_needed, get_rating_statistics, validate_squad,
    Rating, SQUAD_CAPACITY,
};
use crate::server;

const USAGE: &str =
    "usage: squad-rating <serve|rating|stats|validate|minimum|solve|efficient|optimal|sweep>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Serve,
    Rating,
    Stats,
    Validate,
    Minimum,
    Solve,
    Efficient,
    Optimal,
    Sweep,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("serve") => Some(Command::Serve),
        Some("rating") => Some(Command::Rating),
        Some("stats") => Some(Command::Stats),
        Some("validate") => Some(Command::Validate),
        Some("minimum") => Some(Command::Minimum),
        Some("solve") => Some(Command::Solve),
        Some("efficient") => Some(Command::Efficient),
        Some("optimal") => Some(Command::Optimal),
        Some("sweep") => Some(Command::Sweep),
        _ => None,
    }
}

/// Dispatches a command line and returns the process exit code.
pub fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::Serve) => handle_serve(),
        Some(Command::Rating) => handle_rating(args),
        Some(Command::Stats) => handle_stats(args),
        Some(Command::Validate) => handle_validate(args),
        Some(Command::Minimum) => handle_minimum(args),
        Some(Command::Solve) => handle_solve(args, find_squad_solutions),
        Some(Command::Efficient) => handle_solve(args, find_most_efficient_solutions),
        Some(Command::Optimal) => handle_optimal(args),
        Some(Command::Sweep) => handle_sweep(args),
        None => {
            eprintln!("{USAGE}");
            2
        }
    }
}

fn handle_serve() -> i32 {
    let bind_addr =
        env::var(server::BIND_ENV_VAR).unwrap_or_else(|_| server::DEFAULT_BIND_ADDR.to_string());
    match server::run_server(&bind_addr) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("server error: {err}");
            1
        }
    }
}

fn handle_rating(args: &[String]) -> i32 {
    let Some(ratings) = ratings_arg(args.get(2), "usage: squad-rating rating <r,r,...>") else {
        return 2;
    };
    print_json(&serde_json::json!({
        "rating": aggregate_rating(&ratings),
        "members": ratings.len(),
    }))
}

fn handle_stats(args: &[String]) -> i32 {
    let Some(ratings) = ratings_arg(args.get(2), "usage: squad-rating stats <r,r,...>") else {
        return 2;
    };
    print_json(&get_rating_statistics(&ratings))
}

fn handle_validate(args: &[String]) -> i32 {
    const VALIDATE_USAGE: &str = "usage: squad-rating validate <target> <r,r,...>";
    let Some(target) = number_arg::<u32>(args.get(2), VALIDATE_USAGE) else {
        return 2;
    };
    let Some(ratings) = ratings_arg(args.get(3), VALIDATE_USAGE) else {
        return 2;
    };
    let check = validate_squad(&ratings, target, SQUAD_CAPACITY);
    let code = print_json(&check);
    if code == 0 && !check.valid {
        return 1;
    }
    code
}

fn handle_minimum(args: &[String]) -> i32 {
    const MINIMUM_USAGE: &str = "usage: squad-rating minimum <target> <remaining> [r,r,...]";
    let Some(target) = number_arg::<u32>(args.get(2), MINIMUM_USAGE) else {
        return 2;
    };
    let Some(remaining) = number_arg::<usize>(args.get(3), MINIMUM_USAGE) else {
        return 2;
    };
    let existing = match args.get(4) {
        Some(raw) => match parse_ratings(raw) {
            Some(ratings) => ratings,
            None => {
                eprintln!("{MINIMUM_USAGE}");
                return 2;
            }
        },
        None => Vec::new(),
    };
    print_json(&serde_json::json!({
        "target_rating": target,
        "remaining_slots": remaining,
        "minimum_rating": calculate_minimum_rating_needed(target, &existing, remaining),
    }))
}

fn handle_solve(args: &[String], solve: fn(&SquadSearch) -> SolveReport) -> i32 {
    match request_arg::<SquadSearch>(args.get(2), "usage: squad-rating solve <request.json>") {
        Ok(search) => report_exit(&solve(&search)),
        Err(code) => code,
    }
}

fn handle_optimal(args: &[String]) -> i32 {
    match request_arg::<OptimalSearch>(args.get(2), "usage: squad-rating optimal <request.json>") {
        Ok(search) => report_exit(&find_optimal_solutions(&search)),
        Err(code) => code,
    }
}

fn handle_sweep(args: &[String]) -> i32 {
    const SWEEP_USAGE: &str = "usage: squad-rating sweep <request.json> <from> <to>";
    let Some(from) = number_arg::<u32>(args.get(3), SWEEP_USAGE) else {
        return 2;
    };
    let Some(to) = number_arg::<u32>(args.get(4), SWEEP_USAGE) else {
        return 2;
    };
    let search = match request_arg::<SquadSearch>(args.get(2), SWEEP_USAGE) {
        Ok(search) => search,
        Err(code) => return code,
    };
    print_json(&sweep_targets(&search, from..=to))
}

fn report_exit(report: &SolveReport) -> i32 {
    let code = print_json(report);
    if code == 0 && report.error.is_some() {
        return 1;
    }
    code
}

fn print_json<T: Serialize>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize result: {err}");
            1
        }
    }
}

fn parse_ratings(raw: &str) -> Option<Vec<Rating>> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<Rating>().ok())
        .collect()
}

fn ratings_arg(raw: Option<&String>, usage: &str) -> Option<Vec<Rating>> {
    let parsed = raw.and_then(|value| parse_ratings(value));
    if parsed.is_none() {
        eprintln!("{usage}");
    }
    parsed
}

fn number_arg<T: std::str::FromStr>(raw: Option<&String>, usage: &str) -> Option<T> {
    let parsed = raw.and_then(|value| value.trim().parse::<T>().ok());
    if parsed.is_none() {
        eprintln!("{usage}");
    }
    parsed
}

/// Reads a JSON request file. The error is the exit code to return: 2 when no path was
/// given, 1 when the file cannot be read or parsed.
fn request_arg<T: DeserializeOwned>(raw: Option<&String>, usage: &str) -> Result<T, i32> {
    let Some(path) = raw else {
        eprintln!("{usage}");
        return Err(2);
    };
    let contents = fs::read_to_string(path).map_err(|err| {
        eprintln!("failed to read '{path}': {err}");
        1
    })?;
    serde_json::from_str(&contents).map_err(|err| {
        eprintln!("invalid request in '{path}': {err}");
        1
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|part| part.to_string()).collect()
    }

    #[test]
    fn parses_known_commands() {
        assert_eq!(parse_command(&args(&["squad-rating", "solve"])), Some(Command::Solve));
        assert_eq!(parse_command(&args(&["squad-rating", "sweep"])), Some(Command::Sweep));
        assert_eq!(parse_command(&args(&["squad-rating", "nope"])), None);
        assert_eq!(parse_command(&args(&["squad-rating"])), None);
    }

    #[test]
    fn rating_lists_tolerate_spaces_and_trailing_commas() {
        assert_eq!(parse_ratings("85, 86 ,87,"), Some(vec![85, 86, 87]));
        assert_eq!(parse_ratings("85,x"), None);
        assert_eq!(parse_ratings(""), Some(Vec::new()));
    }

    #[test]
    fn unknown_command_is_a_usage_error() {
        assert_eq!(run_with_args(&args(&["squad-rating", "bogus"])), 2);
    }
}
