// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # spsurvey-observability
//!
//! Logging setup shared by every spsurvey crate, with per-crate debug flag
//! support.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod init;

pub use cli::*;
pub use init::*;

/// Known spsurvey crate names for debug flags
pub const KNOWN_CRATES: &[&str] = &[
    "spsurvey",
    "spsurvey-config",
    "spsurvey-observability",
    "spsurvey-transports",
];

/// Convert a crate name into the module path prefix used as tracing target.
pub fn crate_target(crate_name: &str) -> String {
    crate_name.replace('-', "_")
}
