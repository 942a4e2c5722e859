//! CLI utilities for ShopFusion delivery tools
//!
//! Provides shared CLI functionality:
//! - Status messages
//! - Plain-text rendering of quotes, store rankings and resolutions

#![warn(missing_docs)]

pub mod output;
pub mod render;
