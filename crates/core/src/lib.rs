//! Core utilities for ShopFusion delivery tools
//!
//! This crate provides shared functionality used by the delivery CLI and any
//! service embedding the delivery engine:
//!
//! - **Error handling**: Errors with codes, context, and recovery suggestions
//! - **Configuration**: TOML-based configuration with validation
//!
//! # Example
//!
//! ```rust,no_run
//! use shopfusion_core::config::Config;
//!
//! let config = Config::load(None).expect("valid configuration");
//! let resolver = config.schema.delivery.build_resolver().expect("valid delivery settings");
//! assert!(!resolver.registry().is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;

pub use error::{Error, ErrorCode, Result, ResultExt};

