//! Folio API: resume storage, template rendering and AI-assisted review.

pub mod ai;
pub mod auth;
pub mod builder;
pub mod config;
pub mod db;
pub mod errors;
pub mod llm_client;
pub mod models;
pub mod render;
pub mod resumes;
pub mod routes;
pub mod state;
pub mod upload;

#[cfg(test)]
mod test_support;
