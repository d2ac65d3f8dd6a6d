//! Console Module
//!
//! Line-oriented front end that drives a shared cache from text commands.

pub mod handlers;
pub mod session;

pub use handlers::{execute, handle_line, ConsoleCache};
pub use session::run_session;
