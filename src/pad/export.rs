use crate::pad::composite::{composite_over_background, RgbaBuffer};
use crate::pad::history::StrokeHistory;
use crate::pad::model::Color;
use chrono::Local;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_FILE_PREFIX: &str = "signature";

/// Largest side, in pixels, a cropped export may have.
pub const MAX_EXPORT_SIDE: u32 = 16_384;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("nothing has been drawn, there is no content to crop to")]
    EmptyRegion,

    #[error("export region is {width}x{height}, nothing to write")]
    ZeroArea { width: u32, height: u32 },

    #[error("export region {width}x{height} exceeds the {max} pixel limit")]
    TooLarge { width: u32, height: u32, max: u32 },

    #[error("pixel buffer does not match {width}x{height}")]
    InvalidBuffer { width: u32, height: u32 },

    #[error("failed to write PNG to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Extremes over every recorded point, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x_min: i32,
    pub y_min: i32,
    pub x_max: i32,
    pub y_max: i32,
}

impl BoundingBox {
    // the span of two i32 values always fits in a u32
    pub fn width(self) -> u32 {
        (i64::from(self.x_max) - i64::from(self.x_min)) as u32
    }

    pub fn height(self) -> u32 {
        (i64::from(self.y_max) - i64::from(self.y_min)) as u32
    }
}

/// `None` when the history holds no points.
pub fn bounding_box_of(history: &StrokeHistory) -> Option<BoundingBox> {
    let mut points = history.points();
    let (x, y) = points.next()?;
    let mut bounds = BoundingBox {
        x_min: x,
        y_min: y,
        x_max: x,
        y_max: y,
    };
    for (x, y) in points {
        bounds.x_min = bounds.x_min.min(x);
        bounds.y_min = bounds.y_min.min(y);
        bounds.x_max = bounds.x_max.max(x);
        bounds.y_max = bounds.y_max.max(y);
    }
    Some(bounds)
}

/// Picks the pixels to export: the whole surface, or the part spanned by the
/// recorded points. The crop runs from the minimum up to, not including, the
/// maximum coordinate.
pub fn select_region(
    surface: &RgbaBuffer,
    history: &StrokeHistory,
    crop_to_content: bool,
) -> Result<RgbaBuffer, ExportError> {
    let region = if crop_to_content {
        let bounds = bounding_box_of(history).ok_or(ExportError::EmptyRegion)?;
        if bounds.width() > MAX_EXPORT_SIDE || bounds.height() > MAX_EXPORT_SIDE {
            return Err(ExportError::TooLarge {
                width: bounds.width(),
                height: bounds.height(),
                max: MAX_EXPORT_SIDE,
            });
        }
        surface.copy_region(bounds.x_min, bounds.y_min, bounds.width(), bounds.height())
    } else {
        surface.clone()
    };
    if region.is_empty() {
        return Err(ExportError::ZeroArea {
            width: region.width,
            height: region.height,
        });
    }
    Ok(region)
}

/// Composes the exported image without touching the file system.
pub fn render_export(
    surface: &RgbaBuffer,
    history: &StrokeHistory,
    background: Option<Color>,
    crop_to_content: bool,
) -> Result<RgbaBuffer, ExportError> {
    let region = select_region(surface, history, crop_to_content)?;
    Ok(composite_over_background(
        &region,
        background.unwrap_or(Color::TRANSPARENT),
    ))
}

pub fn write_png(image: &RgbaBuffer, path: &Path) -> Result<(), ExportError> {
    let buffer = image::RgbaImage::from_raw(image.width, image.height, image.pixels.clone())
        .ok_or(ExportError::InvalidBuffer {
            width: image.width,
            height: image.height,
        })?;
    buffer
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(|source| ExportError::Write {
            path: path.to_path_buf(),
            source,
        })
}

pub fn timestamped_stem(now: chrono::DateTime<Local>) -> String {
    now.format("%Y%m%d_%H%M%S").to_string()
}

pub fn build_filename(prefix: &str, stem: &str) -> String {
    format!("{}_{}.png", prefix, stem)
}

/// `<dir>/signature_YYYYMMDD_HHMMSS.png` for the given moment.
pub fn default_export_path(dir: &Path, now: chrono::DateTime<Local>) -> PathBuf {
    dir.join(build_filename(DEFAULT_FILE_PREFIX, &timestamped_stem(now)))
}
