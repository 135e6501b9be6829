//! Domain records.
//!
//! # Responsibility
//! - `task`: locally owned to-do items.
//! - `assignment`: class-linked records owned by the hosted backend.
//! - `session`: the signed-in identity handed to core by the shell.

pub mod assignment;
pub mod session;
pub mod task;
