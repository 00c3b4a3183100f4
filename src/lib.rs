pub mod alloc;
pub mod error;
pub mod io;
pub mod model;

pub use error::{AllocError, Result};

#[cfg(test)]
mod test;
