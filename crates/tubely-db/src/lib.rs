//! Tubely record store
//!
//! Video records are reached through the `VideoStore` trait. Postgres backs it in
//! deployments; the in-memory repository serves development runs and tests.

pub mod db;

pub use db::{InMemoryVideoRepository, PgVideoRepository, VideoStore};
