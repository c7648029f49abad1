//! VRM 0.x to VRM 1.0 binary migration.
//!
//! The core is a pure function over bytes: parse the GLB container, rewrite
//! the legacy `VRM` JSON extension into the `VRMC_vrm` and `VRMC_springBone`
//! blocks, and reassemble the container with the binary chunk untouched.
//! Node, mesh and material numbering is preserved, so indices resolved
//! against the legacy scene tables stay valid in the output.

pub mod check;
mod error;
pub mod glb;
pub mod migrate;
mod scene;
mod tables;
mod tree;
pub mod vrm1;

pub use error::MigrationError;
pub use migrate::migrate;
