//! trainviz CLI: render training visualizations from `.npy` arrays.

mod npy;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use ndarray::{Ix2, Ix4, IxDyn};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use trainviz_analysis::{confusion_matrix, find_wrong_predictions};
use trainviz_core::ImageShape;
use trainviz_plot::{
    compare_images, plot_autoencoder_weights, plot_confusion_matrix, plot_conv_layer,
    plot_conv_weights, plot_dense_weights, plot_predictions, save_image_collection, Backend,
    PlotConfig, Rendered, Surface,
};

use crate::npy::{read_floats, read_labels};

#[derive(Parser)]
#[command(name = "trainviz")]
#[command(author, version)]
#[command(about = "Render neural network training visualizations from .npy arrays")]
#[command(long_about = "trainviz: plots for inspecting what a network learned.

EXAMPLES:
  # List the misclassified samples
  trainviz mismatches --labels y_test.npy --predictions y_pred.npy

  # Confusion matrix for a 10-class problem
  trainviz confusion --labels y_test.npy --predictions y_pred.npy --classes 10 --output cm.png

  # First-layer convolution kernels, as SVG
  trainviz conv-weights --weights conv1.npy --output conv1.svg

  # Save a batch of 28x28 images as runs/epoch_5_vis.png
  trainviz collection --images batch.npy --output runs/epoch_5

The output format follows the extension of --output (.svg or bitmap), falling
back to the backend of the --config file.")]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// JSON file overriding the default plot configuration
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the indices of wrong predictions
    Mismatches {
        /// True class labels (1D integer array)
        #[arg(long, value_name = "NPY")]
        labels: PathBuf,

        /// Predicted class labels (1D integer array)
        #[arg(long, value_name = "NPY")]
        predictions: PathBuf,

        /// Print the result as JSON
        #[arg(long, default_value = "false")]
        json: bool,
    },
    /// Plot sample images next to their probabilities and logits
    Predictions {
        /// Images, flattened (N, H*W) or (N, H, W)
        #[arg(long, value_name = "NPY")]
        images: PathBuf,

        /// Class probabilities (N, classes)
        #[arg(long, value_name = "NPY")]
        probabilities: PathBuf,

        /// Logits (N, classes)
        #[arg(long, value_name = "NPY")]
        logits: PathBuf,

        /// True class labels
        #[arg(long, value_name = "NPY")]
        labels: PathBuf,

        /// Predicted class labels
        #[arg(long, value_name = "NPY")]
        predictions: PathBuf,

        /// Shape of a flattened image
        #[arg(long, default_value = "28x28", value_name = "HxW")]
        shape: ImageShape,

        /// Output file
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Plot the confusion matrix of labels vs predictions
    Confusion {
        /// True class labels
        #[arg(long, value_name = "NPY")]
        labels: PathBuf,

        /// Predicted class labels
        #[arg(long, value_name = "NPY")]
        predictions: PathBuf,

        /// Number of classes shown on the axes
        #[arg(long, value_name = "N")]
        classes: usize,

        /// Output file
        #[arg(long, value_name = "FILE")]
        output: PathBuf,

        /// Also print the count table
        #[arg(long, default_value = "false")]
        table: bool,
    },
    /// Plot dense-layer weights (flat_input, units) as images
    DenseWeights {
        /// Weight matrix
        #[arg(long, value_name = "NPY")]
        weights: PathBuf,

        /// Shape each weight column is reshaped to
        #[arg(long, default_value = "28x28", value_name = "HxW")]
        shape: ImageShape,

        /// Output file
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Plot convolution kernels (height, width, in, out) for one input channel
    ConvWeights {
        /// Kernel tensor
        #[arg(long, value_name = "NPY")]
        weights: PathBuf,

        /// Input channel to show
        #[arg(long, default_value = "0", value_name = "C")]
        input_channel: usize,

        /// Output file
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Plot convolution layer outputs (batch, height, width, filters) for one sample
    ConvLayer {
        /// Layer output tensor
        #[arg(long, value_name = "NPY")]
        activations: PathBuf,

        /// Sample of the batch to show
        #[arg(long, default_value = "0", value_name = "I")]
        sample: usize,

        /// Output file
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Plot autoencoder weights (input, hidden) on a 10x10 grid
    AutoencoderWeights {
        /// Encoder weight matrix
        #[arg(long, value_name = "NPY")]
        weights: PathBuf,

        /// Shape each hidden unit is reshaped to
        #[arg(long, default_value = "28x28", value_name = "HxW")]
        shape: ImageShape,

        /// Output file
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Show a real, corrupted and reconstructed image side by side
    Compare {
        /// Real images (N, H*W)
        #[arg(long, value_name = "NPY")]
        real: PathBuf,

        /// Corrupted images (N, H*W)
        #[arg(long, value_name = "NPY")]
        corrupted: PathBuf,

        /// Reconstructed images (N, H*W)
        #[arg(long, value_name = "NPY")]
        reconstructed: PathBuf,

        /// Row of the three batches to compare
        #[arg(long, default_value = "0", value_name = "I")]
        index: usize,

        /// Image shape
        #[arg(long, default_value = "28x28", value_name = "HxW")]
        shape: ImageShape,

        /// Output file
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Save a batch of flattened images (N, H*W) as <output>_vis.png
    Collection {
        /// Images
        #[arg(long, value_name = "NPY")]
        images: PathBuf,

        /// Image shape
        #[arg(long, default_value = "28x28", value_name = "HxW")]
        shape: ImageShape,

        /// Path prefix; "_vis.png" is appended
        #[arg(long, value_name = "PATH")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::filter::LevelFilter::from_level(log_level))
        .init();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Mismatches {
            labels,
            predictions,
            json,
        } => handle_mismatches(&labels, &predictions, json),
        Commands::Predictions {
            images,
            probabilities,
            logits,
            labels,
            predictions,
            shape,
            output,
        } => {
            let images = read_floats::<IxDyn>(&images)?;
            let probabilities = read_floats::<Ix2>(&probabilities)?;
            let logits = read_floats::<Ix2>(&logits)?;
            let labels = read_labels(&labels)?;
            let predictions = read_labels(&predictions)?;
            let image_shape = (images.ndim() == 2).then_some(shape);
            let (config, surface) = output_target(&config, &output);
            let rendered = plot_predictions(
                &images,
                probabilities.view(),
                logits.view(),
                &labels,
                &predictions,
                image_shape,
                &config,
                &surface,
            )
            .context("Failed to plot predictions")?;
            report(&rendered);
            Ok(())
        }
        Commands::Confusion {
            labels,
            predictions,
            classes,
            output,
            table,
        } => handle_confusion(&labels, &predictions, classes, &output, table, &config),
        Commands::DenseWeights {
            weights,
            shape,
            output,
        } => {
            let weights = read_floats::<Ix2>(&weights)?;
            let (config, surface) = output_target(&config, &output);
            let rendered = plot_dense_weights(weights.view(), shape, &config, &surface)
                .context("Failed to plot dense weights")?;
            report(&rendered);
            Ok(())
        }
        Commands::ConvWeights {
            weights,
            input_channel,
            output,
        } => {
            let weights = read_floats::<Ix4>(&weights)?;
            let (config, surface) = output_target(&config, &output);
            let rendered = plot_conv_weights(weights.view(), input_channel, &config, &surface)
                .context("Failed to plot convolution weights")?;
            report(&rendered);
            Ok(())
        }
        Commands::ConvLayer {
            activations,
            sample,
            output,
        } => {
            let activations = read_floats::<Ix4>(&activations)?;
            let (config, surface) = output_target(&config, &output);
            let rendered = plot_conv_layer(activations.view(), sample, &config, &surface)
                .context("Failed to plot layer output")?;
            report(&rendered);
            Ok(())
        }
        Commands::AutoencoderWeights {
            weights,
            shape,
            output,
        } => {
            let weights = read_floats::<Ix2>(&weights)?;
            let (config, surface) = output_target(&config, &output);
            let rendered = plot_autoencoder_weights(weights.view(), shape, &config, &surface)
                .context("Failed to plot autoencoder weights")?;
            report(&rendered);
            Ok(())
        }
        Commands::Compare {
            real,
            corrupted,
            reconstructed,
            index,
            shape,
            output,
        } => handle_compare(&real, &corrupted, &reconstructed, index, shape, &output, &config),
        Commands::Collection {
            images,
            shape,
            output,
        } => {
            let images = read_floats::<Ix2>(&images)?;
            let written = save_image_collection(&images, &output, shape, &config)
                .context("Failed to save image collection")?;
            println!("Saved {} images to {}", images.nrows(), written.display());
            Ok(())
        }
    }
}

/// Load the plot configuration, or the defaults when no file is given.
fn load_config(path: Option<&Path>) -> Result<PlotConfig> {
    let Some(path) = path else {
        return Ok(PlotConfig::default());
    };
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open config {}", path.display()))?;
    let config: PlotConfig = serde_json::from_reader(std::io::BufReader::new(file))
        .with_context(|| format!("Failed to parse config {}", path.display()))?;
    tracing::debug!("Loaded plot config from {}: {:?}", path.display(), config);
    Ok(config)
}

/// Pick the backend from the output extension and wrap the path in a surface.
fn output_target(config: &PlotConfig, output: &Path) -> (PlotConfig, Surface) {
    let backend = match output.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("svg") => Backend::Svg,
        Some(_) => Backend::Bitmap,
        None => config.backend,
    };
    (config.clone().with_backend(backend), Surface::file(output))
}

fn report(rendered: &Rendered) {
    if let Some(path) = rendered.path() {
        println!("Saved {}", path.display());
    }
}

fn handle_mismatches(labels: &Path, predictions: &Path, json: bool) -> Result<()> {
    let labels = read_labels(labels)?;
    let predictions = read_labels(predictions)?;
    let wrong = find_wrong_predictions(&labels, &predictions)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&wrong)?);
        return Ok(());
    }

    println!(
        "{} of {} predictions are wrong ({:.2}%)",
        wrong.len(),
        labels.len(),
        wrong.error_rate(labels.len()) * 100.0
    );
    for (index, predicted, actual) in wrong.iter() {
        println!("  #{:<8} predicted {:<4} actual {}", index, predicted, actual);
    }
    Ok(())
}

fn handle_confusion(
    labels: &Path,
    predictions: &Path,
    classes: usize,
    output: &Path,
    table: bool,
    config: &PlotConfig,
) -> Result<()> {
    if classes == 0 {
        bail!("--classes must be at least 1");
    }
    let labels = read_labels(labels)?;
    let predictions = read_labels(predictions)?;

    if table {
        let cm = confusion_matrix(&labels, &predictions)?;
        println!("{}", cm.to_string_table());
        println!("Accuracy: {:.4}", cm.accuracy());
    }

    let (config, surface) = output_target(config, output);
    let rendered = plot_confusion_matrix(&labels, &predictions, classes, &config, &surface)
        .context("Failed to plot confusion matrix")?;
    report(&rendered);
    Ok(())
}

fn handle_compare(
    real: &Path,
    corrupted: &Path,
    reconstructed: &Path,
    index: usize,
    shape: ImageShape,
    output: &Path,
    config: &PlotConfig,
) -> Result<()> {
    let real = read_floats::<Ix2>(real)?;
    let corrupted = read_floats::<Ix2>(corrupted)?;
    let reconstructed = read_floats::<Ix2>(reconstructed)?;

    let rows = batch_rows(&[real.nrows(), corrupted.nrows(), reconstructed.nrows()])?;
    if index >= rows {
        bail!("--index {} is out of range for batches of {} images", index, rows);
    }

    let (config, surface) = output_target(config, output);
    let rendered = compare_images(
        real.row(index),
        corrupted.row(index),
        reconstructed.row(index),
        shape,
        &config,
        &surface,
    )
    .context("Failed to plot image comparison")?;
    report(&rendered);
    Ok(())
}

/// Common row count of batches that must line up image by image.
fn batch_rows(rows: &[usize]) -> Result<usize> {
    let first = rows.first().copied().unwrap_or(0);
    if let Some(other) = rows.iter().find(|&&n| n != first) {
        bail!("Batches have different lengths: {} vs {} images", first, other);
    }
    Ok(first)
}
