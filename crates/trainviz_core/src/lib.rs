//! # trainviz_core
//!
//! Core types shared by the trainviz crates.
//!
//! This crate provides:
//! - [`ImageShape`] for reshaping flattened images
//! - [`CoreError`] and the [`Result`] alias
//! - Array helpers ([`min_max`], [`ceil_sqrt`], [`reshape_image`])
//!
//! ## Array Convention
//!
//! Per-sample arrays share their leading axis: index `i` of the labels, the
//! predictions, the images and the probability rows always refers to the
//! same sample.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod array;
mod error;
mod shape;

pub use array::{ceil_sqrt, check_index, min_max, reshape_image};
pub use error::{CoreError, Result};
pub use shape::ImageShape;
