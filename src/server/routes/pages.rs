use crate::pages::{self, ErrorPage};
use axum::response::Html;

pub(super) async fn index() -> Html<String> {
    pages::index()
}

pub(super) async fn about() -> Html<String> {
    pages::about()
}

pub(super) async fn wiki() -> Html<String> {
    pages::wiki()
}

pub(crate) async fn not_found() -> ErrorPage {
    ErrorPage::NotFound
}
