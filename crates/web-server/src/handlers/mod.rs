//! HTTP handlers, one module per entity.
//!
//! Every handler follows the same steps: parse path IDs, extract and validate
//! the body, call the service, map the outcome to a status code.

use crate::error::AppError;
use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
    Json,
};
use core_types::{EntityKind, Id, PageQuery, Validate};
use serde::de::DeserializeOwned;

pub mod courses;
pub mod departments;
pub mod students;
pub mod teachers;

/// Path IDs are unsigned 32-bit integers; anything else is a 400 that never
/// reaches the service.
pub fn parse_id(raw: &str, kind: EntityKind) -> Result<Id, AppError> {
    // `u32::from_str` also accepts a leading `+`.
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::invalid_id(kind));
    }
    raw.parse::<u32>()
        .map(Id::from)
        .map_err(|_| AppError::invalid_id(kind))
}

/// A JSON body that has been deserialized and passed [`Validate`].
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        value
            .validate()
            .map_err(|err| AppError::BadRequest(err.to_string()))?;
        Ok(Self(value))
    }
}

/// `page` / `per_page` from the query string. A repeated key keeps its first
/// value; only a query string that cannot be decoded at all is rejected.
pub struct PageParams(pub PageQuery);

#[async_trait]
impl<S> FromRequestParts<S> for PageParams
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        Ok(Self(PageQuery::from_pairs(pairs)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_u32_only() {
        assert_eq!(parse_id("42", EntityKind::Student).unwrap(), 42);
        assert_eq!(parse_id("4294967295", EntityKind::Student).unwrap(), 4_294_967_295);
        assert!(parse_id("-1", EntityKind::Student).is_err());
        assert!(parse_id("abc", EntityKind::Student).is_err());
        assert!(parse_id("4294967296", EntityKind::Student).is_err());
        assert!(parse_id("+1", EntityKind::Student).is_err());
        assert!(parse_id("", EntityKind::Student).is_err());
        assert!(parse_id(" 1", EntityKind::Student).is_err());
    }
}
