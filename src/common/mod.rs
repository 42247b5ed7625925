mod console;
mod error;
mod models;

pub use console::*;
pub use error::*;
pub use models::*;
