mod navigator;
mod outcome;
mod provider;
pub mod route;

pub use navigator::*;
pub use outcome::*;
pub use provider::*;
pub use route::{MatchedRoute, RouteKind, RouteRecord, RouteTable};
