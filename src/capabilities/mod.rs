pub mod diarizer;
pub mod http;
pub mod intent;
pub mod sentiment;
pub mod summarizer;
pub mod transcriber;

pub use diarizer::*;
pub use http::*;
pub use intent::*;
pub use sentiment::*;
pub use summarizer::*;
pub use transcriber::*;
