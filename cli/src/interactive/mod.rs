//! Interactive mode
//!
//! A full-screen prediction form rendered with iocraft.

pub mod app;
pub mod components;
pub mod message_handler;
pub mod slider;
pub mod task_executor;
pub mod theme;
