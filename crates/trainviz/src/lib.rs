//! # trainviz
//!
//! Visualization helpers for inspecting neural network training.
//!
//! trainviz renders the usual "what is my network doing" pictures from arrays
//! you already have:
//!
//! - **Analysis**: wrong-prediction lookup, confusion matrix counts
//! - **Predictions**: sample images next to probability and logit bar charts
//! - **Weights**: dense and convolutional filters, layer activations,
//!   autoencoder weights
//! - **Images**: real vs corrupted vs reconstructed, image collections saved to PNG
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use trainviz::prelude::*;
//!
//! let wrong = find_wrong_predictions(&labels, &predictions)?;
//! println!("{} mistakes", wrong.len());
//!
//! let config = PlotConfig::default();
//! plot_confusion_matrix(&labels, &predictions, 10, &config, &Surface::file("cm.png"))?;
//! save_image_collection(&images, "runs/epoch_5", ImageShape::MNIST, &config)?;
//! ```
//!
//! ## Output
//!
//! Every plotter takes a [`plot::PlotConfig`] (canvas size, bitmap or SVG
//! backend, fonts) and a [`plot::Surface`]: `Surface::Display` returns the
//! rendered frame to the caller, `Surface::File` writes it to disk.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

// Re-export all crates
pub use trainviz_analysis as analysis;
pub use trainviz_core as core;
pub use trainviz_plot as plot;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use trainviz::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use trainviz_core::{CoreError, ImageShape};

    // Analysis
    pub use trainviz_analysis::{
        confusion_matrix, find_wrong_predictions, find_wrong_predictions_with_images,
        ConfusionMatrix, Mismatches,
    };

    // Plotting
    pub use trainviz_plot::{
        compare_images, plot_autoencoder_weights, plot_confusion_matrix, plot_conv_layer,
        plot_conv_weights, plot_dense_weights, plot_predictions, save_image_collection, Backend,
        GridLayout, PlotConfig, PlotError, Rendered, Surface,
    };
}
