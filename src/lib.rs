//! Build helpers for a C project: license header stamping (`stamp-headers`)
//! and version template rendering (`render-version`).

pub mod boundary;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod logging;
pub mod renderer;
pub mod stamper;
pub mod ui;

pub use error::{BuildstampError, Result};
