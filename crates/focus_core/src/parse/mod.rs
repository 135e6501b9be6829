//! Free-text input parsing.

pub mod date_intent;
