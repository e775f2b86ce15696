//! CLI command implementations

pub mod fields;
pub mod interactive;
pub mod ping;
pub mod predict;

pub use fields::fields_command;
pub use interactive::interactive_command;
pub use ping::ping_command;
pub use predict::{predict_command, PredictArgs};
