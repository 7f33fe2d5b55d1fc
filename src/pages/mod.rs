//! HTML pages rendered from the templates under `templates/`.
//!
//! Templates are embedded at compile time and filled by replacing
//! `{{ key }}` placeholders. Every substituted value is a fixed string from
//! this crate, never request data.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use craftwiki_schema::Category;

const SITE_NAME: &str = "Craft Wiki";

const INDEX_TEMPLATE: &str = include_str!("../../templates/index.html");
const ABOUT_TEMPLATE: &str = include_str!("../../templates/about.html");
const WIKI_TEMPLATE: &str = include_str!("../../templates/wiki.html");
const ERROR_TEMPLATE: &str = include_str!("../../templates/error.html");

/// Substitutes each `{{ key }}` in `template`. `site_name` is always available.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = template.replace("{{ site_name }}", SITE_NAME);
    for (key, value) in vars {
        out = out.replace(&format!("{{{{ {key} }}}}"), value);
    }
    out
}

pub fn index() -> Html<String> {
    Html(render(INDEX_TEMPLATE, &[]))
}

pub fn about() -> Html<String> {
    Html(render(ABOUT_TEMPLATE, &[]))
}

pub fn wiki() -> Html<String> {
    let categories: Vec<String> = Category::ALL
        .iter()
        .map(|c| {
            format!(
                "      <li><a href=\"/category/{}\">{}</a></li>",
                c.table_name(),
                c.display_name()
            )
        })
        .collect();
    let categories = categories.join("\n");
    Html(render(WIKI_TEMPLATE, &[("categories", categories.as_str())]))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPage {
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    InternalServerError,
}

impl ErrorPage {
    pub fn from_status(status: StatusCode) -> Option<Self> {
        match status {
            StatusCode::BAD_REQUEST => Some(ErrorPage::BadRequest),
            StatusCode::UNAUTHORIZED => Some(ErrorPage::Unauthorized),
            StatusCode::FORBIDDEN => Some(ErrorPage::Forbidden),
            StatusCode::NOT_FOUND => Some(ErrorPage::NotFound),
            StatusCode::INTERNAL_SERVER_ERROR => Some(ErrorPage::InternalServerError),
            _ => None,
        }
    }

    pub fn status(self) -> StatusCode {
        match self {
            ErrorPage::BadRequest => StatusCode::BAD_REQUEST,
            ErrorPage::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorPage::Forbidden => StatusCode::FORBIDDEN,
            ErrorPage::NotFound => StatusCode::NOT_FOUND,
            ErrorPage::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// `(error_type, error_title, error_subtitle)`
    fn text(self) -> (&'static str, &'static str, &'static str) {
        match self {
            ErrorPage::BadRequest => (
                "Bad Request",
                "Sorry! We cannot process your request.",
                "Double check your inputs and try again.",
            ),
            ErrorPage::Unauthorized => (
                "Unauthorised Access",
                "You do not have authorisation to view this content.",
                "Please log in to access this page.",
            ),
            ErrorPage::Forbidden => (
                "Forbidden",
                "You do not have access to view this content.",
                "Please contact us if you believe this to be a mistake.",
            ),
            ErrorPage::NotFound => (
                "Resource Not Found",
                "Sorry! We could not find that page.",
                "Check the URL or return to the <a href=\"/\">home page</a>.",
            ),
            ErrorPage::InternalServerError => (
                "Internal Server Error",
                "Sorry, something went wrong on our end.",
                "Check back later or report the issue to the site maintainers.",
            ),
        }
    }

    pub fn render(self) -> String {
        let (error_type, error_title, error_subtitle) = self.text();
        render(
            ERROR_TEMPLATE,
            &[
                ("error_type", error_type),
                ("error_title", error_title),
                ("error_subtitle", error_subtitle),
            ],
        )
    }
}

impl IntoResponse for ErrorPage {
    fn into_response(self) -> Response {
        (self.status(), Html(self.render())).into_response()
    }
}
