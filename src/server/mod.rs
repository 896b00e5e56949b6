mod admin;
pub mod dto;
pub mod extract;
mod lookup;
pub mod response;
mod router;
pub mod validation;

pub use admin::admin_router;
pub use lookup::{LookupError, lookup_router};
pub use router::{AppState, create_router};
