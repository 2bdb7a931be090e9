// src/lib.rs

pub mod config;
pub mod error;
pub mod handlers;
pub mod integrations;
pub mod leaderboard;
pub mod models;
pub mod quizzes;
pub mod routes;
pub mod scoring;
pub mod state;
pub mod store;
pub mod subscription;
pub mod utils;

pub use routes::create_router;
