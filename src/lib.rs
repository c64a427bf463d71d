pub mod auth;
pub mod config;
pub mod db;
pub mod observability;
pub mod schedule;
pub mod server;
pub mod view;

pub use config::Config;
pub use db::{create_pool, create_read_pool};
