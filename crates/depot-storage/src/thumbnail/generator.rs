//! Derivative generator for image files.
//!
//! For an original stored at `path`, writes one resized copy per configured
//! width at `path_<width>`. Each copy is exactly `width` pixels wide with the
//! original aspect ratio, encoded in the original's format when possible.

use std::io::Cursor;
use std::sync::Arc;

use bytes::Bytes;
use futures::future::try_join_all;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageFormat};

use depot_core::error::{AppError, ErrorKind};
use depot_core::result::AppResult;
use depot_core::traits::storage::StorageProvider;

/// Tallest derivative that will be produced. Taller outputs fail instead of
/// allocating an unbounded buffer.
pub const MAX_DERIVATIVE_HEIGHT: u32 = 10_000;

/// Storage key of the derivative of `source_path` at `width`.
pub fn derivative_path(source_path: &str, width: u32) -> String {
    format!("{source_path}_{width}")
}

/// Generates fixed-width derivatives for image files.
#[derive(Debug, Clone)]
pub struct ThumbnailGenerator {
    /// Storage provider for reading originals and writing derivatives.
    provider: Arc<dyn StorageProvider>,
    /// Target widths in pixels.
    widths: Vec<u32>,
}

impl ThumbnailGenerator {
    /// Create a new generator producing the given widths.
    pub fn new(provider: Arc<dyn StorageProvider>, widths: Vec<u32>) -> Self {
        Self { provider, widths }
    }

    /// Configured widths.
    pub fn widths(&self) -> &[u32] {
        &self.widths
    }

    /// Generate every configured derivative of the original at `source_path`.
    ///
    /// The original is read and decoded once; the widths are produced
    /// concurrently. Existing derivatives are overwritten. Returns the
    /// storage keys written.
    pub async fn generate_all(&self, source_path: &str) -> AppResult<Vec<String>> {
        let source_bytes = self.provider.read_bytes(source_path).await?;

        let (image, format) = tokio::task::spawn_blocking(move || decode(&source_bytes))
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Internal, "Decode task panicked", e))??;
        let image = Arc::new(image);

        let jobs = self.widths.iter().map(|&width| {
            let image = Arc::clone(&image);
            let target = derivative_path(source_path, width);
            async move {
                let encoded = tokio::task::spawn_blocking(move || resize(&image, width, format))
                    .await
                    .map_err(|e| {
                        AppError::with_source(ErrorKind::Internal, "Resize task panicked", e)
                    })??;
                self.provider.write(&target, encoded).await?;
                tracing::debug!(source = source_path, width, output = %target, "Generated derivative");
                Ok::<_, AppError>(target)
            }
        });

        try_join_all(jobs).await
    }
}

/// Decode an original and pick the output format for its derivatives.
fn decode(data: &[u8]) -> AppResult<(DynamicImage, ImageFormat)> {
    if data.is_empty() {
        return Err(AppError::internal("Empty image data"));
    }
    let format = image::guess_format(data).ok();
    let img = image::load_from_memory(data)
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to decode image", e))?;
    let output = match format {
        Some(f @ (ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::Gif | ImageFormat::Bmp)) => f,
        _ => ImageFormat::Png,
    };
    Ok((img, output))
}

/// Resize to `width` keeping the aspect ratio and encode.
fn resize(img: &DynamicImage, width: u32, format: ImageFormat) -> AppResult<Bytes> {
    let (w, h) = img.dimensions();
    let height = ((u64::from(h) * u64::from(width)) / u64::from(w.max(1))).max(1);
    if height > u64::from(MAX_DERIVATIVE_HEIGHT) {
        return Err(AppError::internal(format!(
            "Derivative {width}x{height} exceeds the maximum height of {MAX_DERIVATIVE_HEIGHT}"
        )));
    }
    let height = height as u32;
    let resized = img.resize_exact(width, height, FilterType::Lanczos3);

    // JPEG has no alpha channel.
    let resized = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(resized.to_rgb8()),
        _ => resized,
    };

    let mut output = Vec::new();
    resized
        .write_to(&mut Cursor::new(&mut output), format)
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to encode derivative", e))?;
    Ok(Bytes::from(output))
}
