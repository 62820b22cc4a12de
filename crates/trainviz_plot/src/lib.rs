//! # trainviz_plot
//!
//! Plot renderers for inspecting neural network training.
//!
//! This crate provides:
//! - Sample images next to probability and logit bar charts
//! - Confusion matrix heat maps
//! - Dense, convolutional, layer-output and autoencoder weight grids
//! - Real / corrupted / reconstructed image comparison
//! - Image collections saved as a single PNG
//!
//! Each plotter comes in two forms: a `*_figure` function that builds a pure
//! [`Figure`] value, and a `plot_*` function that renders it with an explicit
//! [`PlotConfig`] onto an explicit [`Surface`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use ndarray::Array4;
//! use trainviz_plot::{plot_conv_weights, PlotConfig, Surface};
//!
//! let kernels = Array4::<f32>::zeros((5, 5, 3, 16));
//! let config = PlotConfig::default();
//! plot_conv_weights(kernels.view(), 0, &config, &Surface::file("conv1.png"))?;
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod collection;
mod colormap;
mod compare;
mod config;
mod confusion;
mod error;
mod figure;
mod layout;
mod samples;
mod surface;
mod weights;

pub use collection::{collection_figure, collection_path, save_image_collection, COLLECTION_SUFFIX};
pub use colormap::{bar_color, ColorScale, Colormap, BAR_PALETTE};
pub use compare::{compare_figure, compare_images, COMPARE_TITLES};
pub use config::{Backend, PlotConfig};
pub use confusion::{plot_confusion_matrix, ConfusionPlot};
pub use error::{PlotError, Result};
pub use figure::{Aspect, Figure, Panel, PanelContent, Spacing};
pub use layout::GridLayout;
pub use samples::{plot_predictions, predictions_figure};
pub use surface::{render, Draw, Frame, Rendered, Surface};
pub use weights::{
    autoencoder_weights_figure, conv_layer_figure, conv_weights_figure, dense_weights_figure,
    plot_autoencoder_weights, plot_conv_layer, plot_conv_weights, plot_dense_weights,
    AUTOENCODER_GRID, DENSE_GRID, MAX_DENSE_UNITS,
};
