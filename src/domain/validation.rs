use std::fmt;

use uuid::Uuid;

use crate::domain::value::PhoneNumber;

/// Why a candidate value was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationErrorKind {
    Empty,
    TooLow { min: i64 },
    TooHigh { max: i64 },
    TooLong { max: usize },
    NotPositive,
    NotFinite,
    InvalidPhoneNumber { input: String },
}

/// A rejected candidate request.
///
/// Carries the short type name of the request being built, the field that failed
/// (as it appears in messages, e.g. `PageSize`) and the violated condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    request: &'static str,
    field: &'static str,
    kind: ValidationErrorKind,
}

impl ValidationError {
    /// Create an error for a candidate of type `R`.
    pub fn for_request<R>(_request: &R, field: &'static str, kind: ValidationErrorKind) -> Self {
        Self::new(short_type_name::<R>(), field, kind)
    }

    pub fn new(request: &'static str, field: &'static str, kind: ValidationErrorKind) -> Self {
        Self {
            request,
            field,
            kind,
        }
    }

    /// Short type name of the candidate that failed.
    pub fn request(&self) -> &'static str {
        self.request
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn kind(&self) -> &ValidationErrorKind {
        &self.kind
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = self.field;
        match &self.kind {
            ValidationErrorKind::Empty => write!(f, "{field} cannot be empty."),
            ValidationErrorKind::TooLow { min } => write!(f, "{field} cannot be lower than {min}."),
            ValidationErrorKind::TooHigh { max } => {
                write!(f, "{field} cannot be higher than {max}.")
            }
            ValidationErrorKind::TooLong { max } => {
                write!(f, "{field} length cannot be higher than {max}.")
            }
            ValidationErrorKind::NotPositive => write!(f, "{field} must be higher than 0."),
            ValidationErrorKind::NotFinite => write!(f, "{field} must be a finite number."),
            ValidationErrorKind::InvalidPhoneNumber { .. } => {
                write!(f, "{field} is not a valid phone number.")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

fn short_type_name<R>() -> &'static str {
    let full = std::any::type_name::<R>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// Fails when `value` is empty or whitespace-only.
pub fn verify_not_empty<R>(
    request: &R,
    value: &str,
    field: &'static str,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::for_request(
            request,
            field,
            ValidationErrorKind::Empty,
        ));
    }
    Ok(())
}

/// Fails when `value` is the nil UUID.
pub fn verify_not_nil<R>(
    request: &R,
    value: &Uuid,
    field: &'static str,
) -> Result<(), ValidationError> {
    if value.is_nil() {
        return Err(ValidationError::for_request(
            request,
            field,
            ValidationErrorKind::Empty,
        ));
    }
    Ok(())
}

/// Fails when `value < min`.
pub fn verify_higher_or_equal_than<R, T>(
    request: &R,
    value: T,
    min: T,
    field: &'static str,
) -> Result<(), ValidationError>
where
    T: PartialOrd + Into<i64>,
{
    if value < min {
        return Err(ValidationError::for_request(
            request,
            field,
            ValidationErrorKind::TooLow { min: min.into() },
        ));
    }
    Ok(())
}

/// Fails when `value > max`.
pub fn verify_lower_or_equal_than<R, T>(
    request: &R,
    value: T,
    max: T,
    field: &'static str,
) -> Result<(), ValidationError>
where
    T: PartialOrd + Into<i64>,
{
    if value > max {
        return Err(ValidationError::for_request(
            request,
            field,
            ValidationErrorKind::TooHigh { max: max.into() },
        ));
    }
    Ok(())
}

/// Fails when `value` has more than `max` characters.
pub fn verify_length_lower_or_equal_than<R>(
    request: &R,
    value: &str,
    max: usize,
    field: &'static str,
) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::for_request(
            request,
            field,
            ValidationErrorKind::TooLong { max },
        ));
    }
    Ok(())
}

/// Fails when `value` is NaN, infinite, zero or negative.
pub fn verify_positive<R>(
    request: &R,
    value: f64,
    field: &'static str,
) -> Result<(), ValidationError> {
    let kind = if !value.is_finite() {
        ValidationErrorKind::NotFinite
    } else if value <= 0.0 {
        ValidationErrorKind::NotPositive
    } else {
        return Ok(());
    };
    Err(ValidationError::for_request(request, field, kind))
}

/// Fails when `value` cannot be parsed as an international phone number.
///
/// See [`PhoneNumber::parse`] for the accepted forms.
pub fn verify_phone_number<R>(
    request: &R,
    value: &str,
    field: &'static str,
) -> Result<(), ValidationError> {
    PhoneNumber::parse(value)
        .map(|_| ())
        .map_err(|kind| ValidationError::for_request(request, field, kind))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Candidate;

    #[test]
    fn display_messages_name_the_field_and_condition() {
        let err = ValidationError::new("R", "DefaultThemeId", ValidationErrorKind::Empty);
        assert_eq!(err.to_string(), "DefaultThemeId cannot be empty.");

        let err = ValidationError::new("R", "PageSize", ValidationErrorKind::TooLow { min: 1 });
        assert_eq!(err.to_string(), "PageSize cannot be lower than 1.");

        let err = ValidationError::new("R", "PageSize", ValidationErrorKind::TooHigh { max: 100 });
        assert_eq!(err.to_string(), "PageSize cannot be higher than 100.");

        let err = ValidationError::new("R", "Brand", ValidationErrorKind::TooLong { max: 18 });
        assert_eq!(err.to_string(), "Brand length cannot be higher than 18.");
    }

    #[test]
    fn errors_carry_the_candidate_type_name() {
        let err = verify_not_empty(&Candidate, "", "UserId").unwrap_err();
        assert_eq!(err.request(), "Candidate");
        assert_eq!(err.field(), "UserId");
        assert_eq!(err.kind(), &ValidationErrorKind::Empty);
    }

    #[test]
    fn not_empty_rejects_whitespace() {
        assert!(verify_not_empty(&Candidate, "US-1", "UserId").is_ok());
        assert!(verify_not_empty(&Candidate, "", "UserId").is_err());
        assert!(verify_not_empty(&Candidate, " \t ", "UserId").is_err());
    }

    #[test]
    fn numeric_bounds_are_closed() {
        assert!(verify_higher_or_equal_than(&Candidate, 1u32, 1, "PageSize").is_ok());
        assert!(verify_higher_or_equal_than(&Candidate, 0u32, 1, "PageSize").is_err());
        assert!(verify_lower_or_equal_than(&Candidate, 100u32, 100, "PageSize").is_ok());
        assert!(verify_lower_or_equal_than(&Candidate, 101u32, 100, "PageSize").is_err());
    }

    #[test]
    fn nil_uuid_is_rejected() {
        assert!(verify_not_nil(&Candidate, &Uuid::nil(), "ThemeId").is_err());
        let id = Uuid::parse_str("cf7f7327-c8f3-4575-b113-0598571b499a").unwrap();
        assert!(verify_not_nil(&Candidate, &id, "ThemeId").is_ok());
    }

    #[test]
    fn length_counts_characters() {
        assert!(verify_length_lower_or_equal_than(&Candidate, "ääää", 4, "Brand").is_ok());
        assert!(verify_length_lower_or_equal_than(&Candidate, "ääääa", 4, "Brand").is_err());
    }

    #[test]
    fn positive_rejects_non_finite_and_non_positive_values() {
        assert!(verify_positive(&Candidate, 0.01, "Amount").is_ok());
        assert_eq!(
            verify_positive(&Candidate, f64::NAN, "Amount").unwrap_err().to_string(),
            "Amount must be a finite number."
        );
        assert_eq!(
            verify_positive(&Candidate, f64::INFINITY, "Amount").unwrap_err().kind(),
            &ValidationErrorKind::NotFinite
        );
        assert_eq!(
            verify_positive(&Candidate, 0.0, "Amount").unwrap_err().to_string(),
            "Amount must be higher than 0."
        );
        assert_eq!(
            verify_positive(&Candidate, -5.0, "Amount").unwrap_err().kind(),
            &ValidationErrorKind::NotPositive
        );
    }

    #[test]
    fn phone_number_accepts_with_or_without_plus() {
        assert!(verify_phone_number(&Candidate, "447700900000", "Number").is_ok());
        assert!(verify_phone_number(&Candidate, "+447700900000", "Number").is_ok());
        assert!(matches!(
            verify_phone_number(&Candidate, "not-a-number", "Number")
                .unwrap_err()
                .kind(),
            ValidationErrorKind::InvalidPhoneNumber { .. }
        ));
        assert_eq!(
            verify_phone_number(&Candidate, " + ", "Number").unwrap_err().kind(),
            &ValidationErrorKind::Empty
        );
    }
}
