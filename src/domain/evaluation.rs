use crate::domain::validation::ValidationError;

/// A pure check over a candidate request.
pub type Rule<T> = fn(&T) -> Result<(), ValidationError>;

/// Evaluation context wrapping a candidate request until its rules have run.
#[derive(Debug, Clone)]
pub struct InputEvaluation<T> {
    candidate: T,
}

impl<T> InputEvaluation<T> {
    pub fn evaluate(candidate: T) -> Self {
        Self { candidate }
    }

    /// Run `rules` in order and hand back the candidate once all of them pass.
    ///
    /// Evaluation stops at the first failing rule; later rules are not run.
    pub fn with_rules(self, rules: &[Rule<T>]) -> Result<T, ValidationError> {
        rules.iter().try_for_each(|rule| rule(&self.candidate))?;
        Ok(self.candidate)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::domain::validation::{ValidationErrorKind, verify_higher_or_equal_than};

    #[derive(Debug, PartialEq)]
    struct Candidate {
        size: u32,
    }

    fn too_small(candidate: &Candidate) -> Result<(), ValidationError> {
        verify_higher_or_equal_than(candidate, candidate.size, 1, "Size")
    }

    fn always_fails(candidate: &Candidate) -> Result<(), ValidationError> {
        Err(ValidationError::for_request(
            candidate,
            "Other",
            ValidationErrorKind::Empty,
        ))
    }

    thread_local! {
        static CALLS: Cell<u32> = const { Cell::new(0) };
    }

    fn counting(_: &Candidate) -> Result<(), ValidationError> {
        CALLS.with(|calls| calls.set(calls.get() + 1));
        Ok(())
    }

    #[test]
    fn returns_candidate_when_all_rules_pass() {
        let result = InputEvaluation::evaluate(Candidate { size: 3 }).with_rules(&[too_small]);
        assert_eq!(result, Ok(Candidate { size: 3 }));
    }

    #[test]
    fn no_rules_means_success() {
        let result = InputEvaluation::evaluate(Candidate { size: 0 }).with_rules(&[]);
        assert!(result.is_ok());
    }

    #[test]
    fn surfaces_only_the_first_failure() {
        let err = InputEvaluation::evaluate(Candidate { size: 0 })
            .with_rules(&[too_small, always_fails])
            .unwrap_err();
        assert_eq!(err.field(), "Size");
        assert_eq!(err.to_string(), "Size cannot be lower than 1.");
    }

    #[test]
    fn stops_evaluating_after_first_failure() {
        CALLS.with(|calls| calls.set(0));
        let result = InputEvaluation::evaluate(Candidate { size: 0 })
            .with_rules(&[counting, always_fails, counting]);
        assert!(result.is_err());
        assert_eq!(CALLS.with(Cell::get), 1);
    }
}
