mod cameras;
mod disk;
mod models;

pub use cameras::*;
pub use disk::*;
