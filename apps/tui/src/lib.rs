// Export our modules for use in binaries and tests
pub mod config;
pub mod domain;
pub mod net;

pub use domain::{build_center_groups, AreaIndex, AreaRow, CenterGroup};
pub use net::JmaClient;
