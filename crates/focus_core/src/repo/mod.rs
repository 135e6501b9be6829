//! Persistence contracts and implementations.
//!
//! # Responsibility
//! - `kv_repo`: durable named records (SQLite or in-memory).
//! - `class_todo_source`: read-through access to the hosted class todo table.
//!
//! # Invariants
//! - Services depend on the traits here, never on `rusqlite` directly.

pub mod class_todo_source;
pub mod kv_repo;
