pub mod catalog;
pub mod config;
pub mod eligibility;
pub mod engine;
pub mod error;
pub mod output;
pub mod questions;
pub mod server;
pub mod wizard;
