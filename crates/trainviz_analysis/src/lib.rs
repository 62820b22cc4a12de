//! # trainviz_analysis
//!
//! Prediction analysis for trainviz.
//!
//! This crate provides:
//! - Wrong prediction lookup, optionally slicing out the offending images
//! - Confusion matrix computation

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod confusion;
mod mismatch;

pub use confusion::{confusion_matrix, ConfusionMatrix};
pub use mismatch::{
    find_wrong_predictions, find_wrong_predictions_with_images, ImageMismatches, Mismatches,
};
