use crate::server::router::WikiState;
use axum::{
    Router,
    routing::{get, post},
};

mod category;
pub(crate) mod pages;

/// Page routes: home (three aliases), about, wiki.
pub fn pages_router() -> Router<WikiState> {
    Router::new()
        .route("/", get(pages::index))
        .route("/home", get(pages::index))
        .route("/index", get(pages::index))
        .route("/about", get(pages::about))
        .route("/wiki", get(pages::wiki))
}

/// Category data routes. Writes are POST-only; a GET redirects to the wiki page.
pub fn category_router() -> Router<WikiState> {
    Router::new()
        .route("/category/{category}", get(category::category_data))
        .route("/category/{category}/{id}", get(category::entry_data))
        .route(
            "/upload/{category}",
            get(category::redirect_to_wiki).post(category::upload_category_data),
        )
        .route(
            "/edit/{category}/{id}",
            get(category::redirect_to_wiki).post(category::edit_category_data),
        )
        .route(
            "/delete/{category}/{id}",
            post(category::delete_category_data).get(category::redirect_to_wiki),
        )
}
