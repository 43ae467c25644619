//! Path parameter extractor
//!
//! Section kinds and record ids are parsed straight out of the path, so an
//! unknown kind or a malformed id is a 400 before any handler runs.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::response::ApiError;

/// Typed path parameters, e.g. `ParsedPath<(SectionKind, RecordId)>`
#[derive(Debug, Clone)]
pub struct ParsedPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ParsedPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(inner) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.body_text()))?;

        Ok(ParsedPath(inner))
    }
}
