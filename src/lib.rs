pub mod config;
pub mod db;
pub mod error;
pub mod pages;
pub mod server;

pub use error::WikiError;
