//! Derived, read-only projections for rendering.
//!
//! # Responsibility
//! - `grouping`: date buckets for the quick task list.
//! - `board`: status columns for the assignment board.
//! - `due`: days-until-due wording shared by board cards.
//!
//! # Invariants
//! - Nothing here mutates a record; views are recomputed on every read.

pub mod board;
pub mod due;
pub mod grouping;
