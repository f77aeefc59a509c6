use thiserror::Error;

/// Failures a squad search can report instead of solutions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    #[error("{}", .0.join("; "))]
    Validation(Vec<String>),
    #[error("price total overflowed")]
    PriceOverflow,
}

#[cfg(test)]
mod tests {
    use super::SolveError;

    #[test]
    fn validation_messages_are_joined() {
        let err = SolveError::Validation(vec!["first".to_string(), "second".to_string()]);
        assert_eq!(err.to_string(), "first; second");
    }
}
