pub mod checkpoint;
pub mod freshness;
pub mod lead;

pub use checkpoint::*;
pub use freshness::is_fresh_for_public;
pub use lead::*;
