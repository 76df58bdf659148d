// Observer system: every request runs through an ordered chain of observers.
// The first observer to fail short-circuits the chain.

pub mod context;
pub mod error;
pub mod implementations;
pub mod payload;
pub mod pipeline;
pub mod traits;

// Re-export core types
pub use context::*;
pub use error::*;
pub use pipeline::*;
pub use traits::*;
