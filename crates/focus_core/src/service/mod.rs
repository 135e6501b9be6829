//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep shells (CLI, UI bridges) decoupled from storage details.

pub mod board_service;
pub mod preferences;
pub mod quick_add;
pub mod snapshot;
pub mod task_store;
