//! Property Cache - property listings backend
//!
//! Serves listings through a read-through cache that is invalidated on
//! every write, with a response cache in front and hit/miss metrics from
//! the cache store.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod seed;
pub mod services;
pub mod store;
pub mod tasks;

pub use api::{create_router, AppState};
pub use config::Config;
pub use services::PropertyService;
pub use tasks::spawn_cleanup_task;
