mod message;
mod smtp;

pub use message::*;
pub use smtp::*;
