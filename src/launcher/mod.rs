mod browser;

pub use browser::*;
