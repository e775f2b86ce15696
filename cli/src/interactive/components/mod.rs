//! UI components for interactive mode
//!
//! This module contains the building blocks of the prediction form.

pub mod field_row;
pub mod prediction_form;
pub mod result_panel;
pub mod shell;
pub mod status_line;

pub use prediction_form::FormContext;
pub use shell::Shell;
