//! PNG export of the composition.

mod layout;
mod raster;

pub use layout::{export_filename, fit_image, layout_text, ExportPlan, TextBlock, PRODUCT_MAX_WIDTH};
pub use raster::{download, rasterize};

use crate::scene::Layer;

/// DOM id of the unscaled 1080×1080 composition subtree
pub const EXPORT_CANVAS_ID: &str = "creative-export-canvas";

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ExportError {
    #[error("export canvas not found")]
    TargetMissing,

    #[error("canvas error: {0}")]
    Canvas(String),

    #[error("could not load image: {0}")]
    ImageLoad(String),
}

/// Render `layers` to PNG and hand the file to the browser.
/// Returns the name of the downloaded file.
pub async fn export_png(layers: &[Layer]) -> Result<String, ExportError> {
    let plan = ExportPlan::from_layers(layers);
    log::info!("exporting {} layer(s)", plan.len());

    let data_url = rasterize(&plan).await?;
    let filename = export_filename(js_sys::Date::now() as u64);
    download(&data_url, &filename)?;
    Ok(filename)
}
