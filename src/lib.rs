pub mod config;
pub mod engine;
pub mod error;
pub mod member;
pub mod repo;
pub mod schedule;
pub mod store;
pub mod web;

pub use engine::Engine;
pub use error::{Result, SchedulerError};
