pub mod remote;
pub mod types;

pub use remote::{parse_directions, OrsProvider};
