pub mod extract;
pub mod router;
pub mod routes;

pub use router::{WikiState, error_pages, wiki_router};
