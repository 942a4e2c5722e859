//! Configuration loading and schema definitions
//!
//! Settings shared by every ShopFusion delivery tool.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
