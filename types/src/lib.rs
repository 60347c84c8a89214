//! Shared types for the admin dashboard
//!
//! All types are exported to TypeScript via tsify.

pub mod chart;
pub mod config;
pub mod messages;
pub mod options;
pub mod records;

pub use chart::*;
pub use config::*;
pub use messages::*;
pub use options::*;
pub use records::*;
