//! Host services: frame pacing and the logging console.

mod desktop;
pub use desktop::*;
