//! Results of non-fatal steps

use std::fmt::Display;

/// The result of a step whose failure must not abort the enclosing operation.
///
/// Callers branch on [`Outcome::Degraded`] explicitly, usually by logging the reason and
/// carrying on with a fallback.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The step completed
    Ok(T),

    /// The step failed, for the given reason
    Degraded(String),
}

impl<T, E: Display> From<Result<T, E>> for Outcome<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Ok(value),
            Err(err) => Self::Degraded(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_from_ok() {
        let outcome = Outcome::from(Ok::<_, String>(3));

        assert_eq!(outcome, Outcome::Ok(3));
    }

    #[test]
    fn test_outcome_from_err_keeps_reason() {
        let outcome: Outcome<()> = Err::<(), _>("quota exceeded").into();

        assert_eq!(outcome, Outcome::Degraded("quota exceeded".to_string()));
    }
}
