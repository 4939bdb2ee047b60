//! Custom Axum extractors that reject bad input with a 422.
//!
//! Axum's stock `Json`, `Path`, and `Query` rejections answer with plain
//! text. The extractors here convert every rejection into
//! [`CatalogError::Validation`] so clients always get the structured
//! per-field `detail` list.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use serde_json::{Map, Value};

use super::dto::ProductFilterParams;
use crate::domain::validation::{self, FieldError, Location};
use crate::domain::{ProductId, StoreId};
use crate::error::CatalogError;

/// Types that can be built from a JSON request body.
pub trait FromJsonBody: Sized {
    /// Extracts and validates `Self` from `body`.
    ///
    /// # Errors
    ///
    /// Returns every failing field, not just the first.
    fn from_json_body(body: &Value) -> Result<Self, Vec<FieldError>>;
}

/// JSON body extractor that validates into `T`.
#[derive(Debug)]
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: FromJsonBody + Send,
{
    type Rejection = CatalogError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, state)
            .await
            .map_err(json_rejection)?;
        T::from_json_body(&body)
            .map(Self)
            .map_err(CatalogError::Validation)
    }
}

fn json_rejection(rejection: JsonRejection) -> CatalogError {
    let kind = match &rejection {
        JsonRejection::JsonSyntaxError(_) | JsonRejection::JsonDataError(_) => "json_invalid",
        JsonRejection::MissingJsonContentType(_) => "content_type",
        _ => "body_invalid",
    };
    FieldError::new(Location::Body, "", rejection.body_text(), kind).into()
}

/// Integer ids that appear as a named path parameter.
pub trait PathId: From<i64> {
    /// Name of the path parameter, used in error locations.
    const PARAM: &'static str;
}

impl PathId for StoreId {
    const PARAM: &'static str = "store_id";
}

impl PathId for ProductId {
    const PARAM: &'static str = "product_id";
}

/// Extracts and parses an integer id from a single-segment path.
#[derive(Debug)]
pub struct IdPath<T>(pub T);

impl<S, T> FromRequestParts<S> for IdPath<T>
where
    S: Send + Sync,
    T: PathId + Send,
{
    type Rejection = CatalogError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                FieldError::new(
                    Location::Path,
                    T::PARAM,
                    rejection.body_text(),
                    "path_invalid",
                )
            })?;

        let id = validation::integer(Location::Path, T::PARAM, &raw)?;
        Ok(Self(T::from(id)))
    }
}

/// Optional `store_id` equality filter taken from the query string.
#[derive(Debug)]
pub struct StoreFilter(pub Option<StoreId>);

impl<S> FromRequestParts<S> for StoreFilter
where
    S: Send + Sync,
{
    type Rejection = CatalogError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params): Query<ProductFilterParams> = Query::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                FieldError::new(Location::Query, "", rejection.body_text(), "query_invalid")
            })?;

        let store_id = params
            .store_id
            .map(|raw| validation::integer(Location::Query, "store_id", &raw))
            .transpose()?
            .map(StoreId::new);
        Ok(Self(store_id))
    }
}

/// Pulls typed fields out of a JSON object, collecting every failure.
#[derive(Debug)]
pub struct BodyFields<'a> {
    object: Option<&'a Map<String, Value>>,
    errors: Vec<FieldError>,
}

impl<'a> BodyFields<'a> {
    /// Starts reading `body`. A non-object body is itself an error.
    #[must_use]
    pub fn new(body: &'a Value) -> Self {
        let object = body.as_object();
        let errors = if object.is_some() {
            Vec::new()
        } else {
            vec![FieldError::new(
                Location::Body,
                "",
                "Input should be a valid dictionary or object to extract fields from",
                "model_attributes_type",
            )]
        };
        Self { object, errors }
    }

    fn get(&mut self, field: &str) -> Option<&'a Value> {
        let value = self.object?.get(field);
        if value.is_none() {
            self.errors.push(FieldError::missing(Location::Body, field));
        }
        value
    }

    fn record<T>(&mut self, result: Result<T, FieldError>) -> Option<T> {
        result.map_err(|e| self.errors.push(e)).ok()
    }

    /// Reads a string field, trimmed and non-empty.
    pub fn text(&mut self, field: &str) -> Option<String> {
        let result = match self.get(field)? {
            Value::String(s) => validation::non_empty_trimmed(Location::Body, field, s),
            _ => Err(FieldError::not_a_string(Location::Body, field)),
        };
        self.record(result)
    }

    /// Reads a number strictly greater than zero. Numeric strings are
    /// accepted.
    pub fn positive_number(&mut self, field: &str) -> Option<f64> {
        let number = match self.get(field)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        let result = number
            .ok_or_else(|| FieldError::not_a_number(Location::Body, field))
            .and_then(|n| validation::positive(Location::Body, field, n));
        self.record(result)
    }

    /// Reads an integer. Integer strings and whole-number floats are
    /// accepted.
    pub fn integer(&mut self, field: &str) -> Option<i64> {
        let result = match self.get(field)? {
            Value::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(int), _) => Ok(int),
                (None, Some(float)) => validation::whole_number(Location::Body, field, float),
                (None, None) => Err(FieldError::not_finite(Location::Body, field)),
            },
            Value::String(s) => validation::integer(Location::Body, field, s),
            _ => Err(FieldError::not_an_integer_type(Location::Body, field)),
        };
        self.record(result)
    }

    /// Returns `true` if no field has failed so far.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Consumes the reader, returning the collected failures.
    #[must_use]
    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }
}
