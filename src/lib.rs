pub mod auth;
pub mod bidding;
pub mod config;
pub mod database;
pub mod document_store;
pub mod edition;
pub mod error;
pub mod handlers;
pub mod owner;
pub mod query;
pub mod routes;
pub mod timestamp;
pub mod validation;
