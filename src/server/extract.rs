use crate::error::WikiError;
use crate::pages::ErrorPage;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use craftwiki_schema::Category;

/// `{category}` path segment, checked against the category allow-list.
///
/// Unknown names are rejected with a 400 JSON payload before any handler runs.
#[derive(Debug, Clone, Copy)]
pub struct CategoryPath(pub Category);

impl<S> FromRequestParts<S> for CategoryPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ErrorPage::NotFound.into_response())?;
        parse_category(&raw).map(CategoryPath)
    }
}

/// `{category}/{id}` path segments.
///
/// A non-integer id renders the 404 page, the same as an unmatched route.
#[derive(Debug, Clone, Copy)]
pub struct EntryPath(pub Category, pub i64);

impl<S> FromRequestParts<S> for EntryPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path((raw, id)) = Path::<(String, i64)>::from_request_parts(parts, state)
            .await
            .map_err(|_| ErrorPage::NotFound.into_response())?;
        parse_category(&raw).map(|category| EntryPath(category, id))
    }
}

fn parse_category(raw: &str) -> Result<Category, Response> {
    raw.parse::<Category>()
        .map_err(|e| WikiError::from(e).into_response())
}
