pub mod outcome;
pub mod speakers;

pub use outcome::*;
pub use speakers::*;
