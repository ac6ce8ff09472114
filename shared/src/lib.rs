pub mod geo;
pub mod protocol;
pub mod route;

pub use geo::*;
pub use protocol::*;
pub use route::*;
