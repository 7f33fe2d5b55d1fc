mod wiki;

pub use wiki::WikiError;
