pub mod analyzer;
pub mod bottleneck;
pub mod cli;
pub mod coefficients;
pub mod config;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod models;
pub mod output;
pub mod recommend;
pub mod resources;
pub mod score;
pub mod store;
pub mod traffic;
