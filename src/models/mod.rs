pub mod diarization;
pub mod record;
pub mod roles;
pub mod transcript;

pub use diarization::*;
pub use record::*;
pub use roles::*;
pub use transcript::*;
