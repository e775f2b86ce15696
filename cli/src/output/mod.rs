//! CLI-specific output implementations
//!
//! Plain terminal rendering of results, errors and the field table for the
//! non-interactive commands.

pub mod terminal;
