//! Saving a batch of images as one grid picture.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use ndarray::{ArrayBase, Axis, Data, Ix2};
use trainviz_core::{reshape_image, ImageShape};

use crate::colormap::{ColorScale, Colormap};
use crate::config::{Backend, PlotConfig};
use crate::error::Result;
use crate::figure::{Figure, Panel, Spacing};
use crate::layout::GridLayout;
use crate::surface::{render, Surface};

/// Appended to the caller's path by [`save_image_collection`].
pub const COLLECTION_SUFFIX: &str = "_vis.png";

/// Build the collection figure: `ceil(sqrt(n))` rows, as many columns as
/// needed, no gaps. `images` holds one flattened image per row.
pub fn collection_figure<S>(images: &ArrayBase<S, Ix2>, image_shape: ImageShape) -> Result<Figure>
where
    S: Data<Elem = f32>,
{
    let layout = GridLayout::packed(images.nrows())?;
    let mut figure = Figure::new(layout, Spacing::NONE);
    for (i, flat) in images.axis_iter(Axis(0)).enumerate() {
        let image = reshape_image(flat, image_shape)?;
        let scale = ColorScale::from_array(&image)?;
        figure.set(i, Panel::image(image, scale, Colormap::Viridis))?;
    }
    Ok(figure)
}

/// `<path>_vis.png`.
pub fn collection_path(path: impl AsRef<Path>) -> PathBuf {
    let mut name = OsString::from(path.as_ref().as_os_str());
    name.push(COLLECTION_SUFFIX);
    PathBuf::from(name)
}

/// Write `images` as a grid PNG to `<path>_vis.png` and return that path.
///
/// Always uses the bitmap backend, whatever `config.backend` says.
pub fn save_image_collection<S>(
    images: &ArrayBase<S, Ix2>,
    path: impl AsRef<Path>,
    image_shape: ImageShape,
    config: &PlotConfig,
) -> Result<PathBuf>
where
    S: Data<Elem = f32>,
{
    let figure = collection_figure(images, image_shape)?;
    let target = collection_path(path);
    let config = PlotConfig {
        backend: Backend::Bitmap,
        ..config.clone()
    };
    render(&figure, &config, &Surface::File(target.clone()))?;
    Ok(target)
}
