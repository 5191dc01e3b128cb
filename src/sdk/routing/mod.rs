pub mod coord;
pub mod error;
pub mod provider;
pub mod route;
pub mod service;

pub use coord::{swap, Coordinate};
pub use error::RoutingError;
pub use provider::OrsProvider;
pub use route::RouteSummary;
pub use service::RoutingProvider;
