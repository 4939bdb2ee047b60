//! Field-level validation rules and the structured error they produce.
//!
//! Every rule reports a [`FieldError`] carrying the location of the
//! offending input (`["body", "price"]`, `["path", "store_id"]`, ...), a
//! human-readable message, and a stable machine-readable error type.
//! Callers collect all failures of a request before rejecting it.

use serde::Serialize;
use utoipa::ToSchema;

/// Where in the request a failing input was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// JSON request body.
    Body,
    /// URL path segment.
    Path,
    /// URL query string.
    Query,
}

impl Location {
    /// Returns the lowercase name used as the first `loc` element.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Body => "body",
            Self::Path => "path",
            Self::Query => "query",
        }
    }
}

/// A single failing input, serialized as one entry of a 422 `detail` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    /// Path to the offending input, e.g. `["body", "name"]`.
    pub loc: Vec<String>,
    /// Human-readable description of the failure.
    pub msg: String,
    /// Stable error type, e.g. `missing` or `greater_than`.
    #[serde(rename = "type")]
    pub kind: String,
}

impl FieldError {
    /// Creates an error for `field` at `location`. An empty `field`
    /// addresses the location as a whole.
    #[must_use]
    pub fn new(location: Location, field: &str, msg: impl Into<String>, kind: &str) -> Self {
        let mut loc = vec![location.as_str().to_string()];
        if !field.is_empty() {
            loc.push(field.to_string());
        }
        Self {
            loc,
            msg: msg.into(),
            kind: kind.to_string(),
        }
    }

    /// A required field was absent.
    #[must_use]
    pub fn missing(location: Location, field: &str) -> Self {
        Self::new(location, field, "Field required", "missing")
    }

    /// The field was present but not a string.
    #[must_use]
    pub fn not_a_string(location: Location, field: &str) -> Self {
        Self::new(location, field, "Input should be a valid string", "string_type")
    }

    /// The field was not a number.
    #[must_use]
    pub fn not_a_number(location: Location, field: &str) -> Self {
        Self::new(location, field, "Input should be a valid number", "float_parsing")
    }

    /// The field was a number, but not a whole one.
    #[must_use]
    pub fn fractional_number(location: Location, field: &str) -> Self {
        Self::new(
            location,
            field,
            "Input should be a valid integer, got a number with a fractional part",
            "int_from_float",
        )
    }

    /// The field was neither a number nor a string.
    #[must_use]
    pub fn not_an_integer_type(location: Location, field: &str) -> Self {
        Self::new(location, field, "Input should be a valid integer", "int_type")
    }

    /// The field was a number outside the finite range.
    #[must_use]
    pub fn not_finite(location: Location, field: &str) -> Self {
        Self::new(location, field, "Input should be a finite number", "float_parsing")
    }

    /// The field was a string that does not parse as an integer.
    #[must_use]
    pub fn not_an_integer(location: Location, field: &str) -> Self {
        Self::new(
            location,
            field,
            "Input should be a valid integer, unable to parse string as an integer",
            "int_parsing",
        )
    }
}

/// Trims `value` and rejects it if nothing is left.
///
/// # Errors
///
/// Returns a `string_too_short` [`FieldError`] for empty or
/// whitespace-only input.
pub fn non_empty_trimmed(
    location: Location,
    field: &str,
    value: &str,
) -> Result<String, FieldError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FieldError::new(
            location,
            field,
            "String should have at least 1 character",
            "string_too_short",
        ));
    }
    Ok(trimmed.to_string())
}

/// Accepts finite values strictly greater than zero.
///
/// # Errors
///
/// Returns a `float_parsing` [`FieldError`] for non-finite input and a
/// `greater_than` one for zero or negative input.
pub fn positive(location: Location, field: &str, value: f64) -> Result<f64, FieldError> {
    if !value.is_finite() {
        Err(FieldError::not_finite(location, field))
    } else if value > 0.0 {
        Ok(value)
    } else {
        Err(FieldError::new(
            location,
            field,
            "Input should be greater than 0",
            "greater_than",
        ))
    }
}

/// Parses a decimal integer, tolerating surrounding whitespace.
///
/// # Errors
///
/// Returns an `int_parsing` [`FieldError`] if `raw` is not an `i64`.
pub fn integer(location: Location, field: &str, raw: &str) -> Result<i64, FieldError> {
    raw.trim()
        .parse()
        .map_err(|_| FieldError::not_an_integer(location, field))
}

/// Accepts numbers without a fractional part that fit in an `i64`.
///
/// # Errors
///
/// Returns an `int_from_float` [`FieldError`] for fractional input and a
/// `float_parsing` one for non-finite or out-of-range input.
#[allow(clippy::cast_possible_truncation)]
pub fn whole_number(location: Location, field: &str, value: f64) -> Result<i64, FieldError> {
    // i64::MAX as f64 rounds up to 2^63, which is already out of range.
    if !value.is_finite() || value < i64::MIN as f64 || value >= i64::MAX as f64 {
        return Err(FieldError::not_finite(location, field));
    }
    if value.fract() != 0.0 {
        return Err(FieldError::fractional_number(location, field));
    }
    Ok(value as i64)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn trims_surrounding_whitespace() {
        let Ok(value) = non_empty_trimmed(Location::Body, "name", "  Acme \t") else {
            panic!("expected valid string");
        };
        assert_eq!(value, "Acme");
    }

    #[test]
    fn whitespace_only_is_too_short() {
        let Err(err) = non_empty_trimmed(Location::Body, "address", "   ") else {
            panic!("expected rejection");
        };
        assert_eq!(err.loc, vec!["body", "address"]);
        assert_eq!(err.kind, "string_too_short");
    }

    #[test]
    fn price_must_be_strictly_positive() {
        assert!(positive(Location::Body, "price", 0.01).is_ok());
        assert!(positive(Location::Body, "price", 0.0).is_err());
        assert!(positive(Location::Body, "price", -3.5).is_err());
    }

    #[test]
    fn non_finite_price_is_a_parsing_error() {
        for value in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            let Err(err) = positive(Location::Body, "price", value) else {
                panic!("expected rejection for {value}");
            };
            assert_eq!(err.kind, "float_parsing");
            assert_eq!(err.msg, "Input should be a finite number");
        }
    }

    #[test]
    fn whole_number_accepts_integral_floats_only() {
        assert_eq!(whole_number(Location::Body, "store_id", 1.0).ok(), Some(1));
        assert_eq!(whole_number(Location::Body, "store_id", -4.0).ok(), Some(-4));

        let Err(err) = whole_number(Location::Body, "store_id", 1.5) else {
            panic!("expected rejection");
        };
        assert_eq!(err.kind, "int_from_float");

        let Err(err) = whole_number(Location::Body, "store_id", 1e20) else {
            panic!("expected rejection");
        };
        assert_eq!(err.kind, "float_parsing");
    }

    #[test]
    fn integer_rejects_garbage() {
        assert_eq!(integer(Location::Path, "store_id", " 12 ").ok(), Some(12));

        let Err(err) = integer(Location::Path, "store_id", "abc") else {
            panic!("expected rejection");
        };
        assert_eq!(err.loc, vec!["path", "store_id"]);
        assert_eq!(err.kind, "int_parsing");
    }

    #[test]
    fn empty_field_addresses_whole_location() {
        let err = FieldError::new(Location::Body, "", "bad body", "json_invalid");
        assert_eq!(err.loc, vec!["body"]);
    }

    #[test]
    fn serializes_kind_as_type() {
        let err = FieldError::missing(Location::Body, "name");
        let Ok(json) = serde_json::to_value(&err) else {
            panic!("serialization failed");
        };
        assert_eq!(json["type"], "missing");
        assert_eq!(json["msg"], "Field required");
        assert_eq!(json["loc"], serde_json::json!(["body", "name"]));
    }
}
