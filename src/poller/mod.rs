mod phrases;
mod poller;
mod probe;

pub use phrases::*;
pub use poller::*;
pub use probe::*;
