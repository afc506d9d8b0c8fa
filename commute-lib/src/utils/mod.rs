mod datetime;
mod filesystem;
pub mod logger;
mod string;

pub use datetime::*;
pub use filesystem::*;
pub use string::*;
