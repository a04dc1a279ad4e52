pub mod auth;
pub mod db;
pub mod engine;
pub mod error;
pub mod handlers;
pub mod models;

pub use db::create_pool;
