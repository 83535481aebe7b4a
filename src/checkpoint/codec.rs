//! Image codec: reference decode and lossless PNG encode.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageBuffer, ImageFormat};

use crate::compute::{PixelBuffer, PixelBufferError};

/// Channel count every reference image is normalized to (RGB, alpha dropped).
pub const REFERENCE_CHANNELS: usize = 3;

/// Decode `path` into a 3-channel pixel buffer.
pub fn load_reference<P: AsRef<Path>>(path: P) -> Result<PixelBuffer, CodecError> {
    let path = path.as_ref();
    let decoded = image::open(path).map_err(|source| CodecError::Load {
        path: path.to_path_buf(),
        source,
    })?;

    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();
    Ok(PixelBuffer::from_raw(
        width as usize,
        height as usize,
        REFERENCE_CHANNELS,
        rgb.into_raw(),
    )?)
}

/// Encode `buffer` as PNG at `path`.
///
/// The image is written to a sibling `.tmp` file and renamed into place, so
/// an interrupted write never leaves a truncated file at `path`.
pub fn save_png<P: AsRef<Path>>(buffer: &PixelBuffer, path: P) -> Result<(), CodecError> {
    let path = path.as_ref();
    let image = to_dynamic(buffer)?;

    let tmp = temp_path(path);
    if let Err(source) = image.save_with_format(&tmp, ImageFormat::Png) {
        let _ = fs::remove_file(&tmp);
        return Err(CodecError::Write {
            path: path.to_path_buf(),
            source,
        });
    }

    fs::rename(&tmp, path).map_err(|source| {
        let _ = fs::remove_file(&tmp);
        CodecError::Io {
            path: path.to_path_buf(),
            source,
        }
    })
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

fn to_dynamic(buffer: &PixelBuffer) -> Result<DynamicImage, CodecError> {
    let width = buffer.width() as u32;
    let height = buffer.height() as u32;
    let raw = buffer.samples().to_vec();

    let image = match buffer.channels() {
        1 => ImageBuffer::from_raw(width, height, raw).map(DynamicImage::ImageLuma8),
        2 => ImageBuffer::from_raw(width, height, raw).map(DynamicImage::ImageLumaA8),
        3 => ImageBuffer::from_raw(width, height, raw).map(DynamicImage::ImageRgb8),
        4 => ImageBuffer::from_raw(width, height, raw).map(DynamicImage::ImageRgba8),
        n => return Err(CodecError::UnsupportedChannels(n)),
    };

    // PixelBuffer guarantees the sample count, so from_raw cannot come up short.
    image.ok_or(CodecError::UnsupportedChannels(buffer.channels()))
}

/// Codec errors.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("Couldn't load {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Couldn't encode {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Couldn't write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Cannot encode a {0}-channel buffer")]
    UnsupportedChannels(usize),
    #[error(transparent)]
    Buffer(#[from] PixelBufferError),
}
