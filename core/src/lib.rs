pub mod api;
pub mod artifact;
pub mod config;
pub mod configuration;
pub mod endpoints;
pub mod errors;
pub mod history;
pub mod progress;
pub mod readiness;
pub mod result;
pub mod service;
pub mod vocabulary;
pub mod workflow;
