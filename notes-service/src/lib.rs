//! notes-service: expands shorthand notes into structured JSON using a
//! generative-language model, and serves the bundled frontend.

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
