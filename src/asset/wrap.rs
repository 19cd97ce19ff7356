//! Asset wrapping: PNG sources in, SVG containers out.

use super::raster::{encode_png, normalize};
use super::svg::SvgDocument;
use crate::config::{AssetEntry, AssetsConfig};
use crate::log;
use crate::utils::format::{group_digits, percent_change};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Errors raised while wrapping assets.
#[derive(Debug, Error)]
pub enum WrapError {
    #[error("failed to read `{path}`")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to decode `{path}`")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to re-encode `{path}` as png")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to write `{path}`")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{count} asset(s) could not be wrapped")]
    Failed { count: usize },
}

/// Result of one successful conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub source: PathBuf,
    pub dest: PathBuf,
    pub original_size: (u32, u32),
    pub original_bytes: u64,
    pub output_size: (u32, u32),
    pub output_bytes: u64,
}

/// Outcome of a full run.
#[derive(Debug, Default)]
pub struct WrapSummary {
    pub converted: Vec<Conversion>,
    /// Sources that did not exist.
    pub skipped: Vec<PathBuf>,
}

/// Wrap a single entry, overwriting its destination.
pub fn wrap_file(
    dir: &Path,
    entry: &AssetEntry,
    config: &AssetsConfig,
) -> Result<Conversion, WrapError> {
    let source = dir.join(&entry.source);
    let dest = dir.join(&entry.dest);

    let original_bytes = fs::metadata(&source)
        .map_err(|source_err| WrapError::Read {
            path: source.clone(),
            source: source_err,
        })?
        .len();

    let img = image::open(&source).map_err(|e| WrapError::Decode {
        path: source.clone(),
        source: e,
    })?;
    let original_size = (img.width(), img.height());
    log!(
        "wrap";
        "original: {}x{} ({} bytes)",
        original_size.0,
        original_size.1,
        group_digits(original_bytes)
    );

    let rgba = normalize(img, entry.category, config.max_icon_size);
    let output_size = rgba.dimensions();
    let png = encode_png(&rgba).map_err(|e| WrapError::Encode {
        path: source.clone(),
        source: e,
    })?;

    let file_name = entry
        .source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| entry.source.display().to_string());
    let doc = SvgDocument::from_png(
        &png,
        output_size.0,
        output_size.1,
        format!("{} - {}", config.title, entry.category.label()),
        format!("SVG wrapper embedding {file_name} as a PNG raster"),
    );

    let text = doc.render();
    fs::write(&dest, &text).map_err(|e| WrapError::Write {
        path: dest.clone(),
        source: e,
    })?;

    Ok(Conversion {
        source,
        dest,
        original_size,
        original_bytes,
        output_size,
        output_bytes: text.len() as u64,
    })
}

/// Wrap every configured entry under `dir`.
///
/// Missing sources are reported and skipped. The first conversion error
/// aborts the run unless `keep_going` is set, in which case failures are
/// logged and counted into [`WrapError::Failed`] at the end.
pub fn wrap_all(
    dir: &Path,
    config: &AssetsConfig,
    keep_going: bool,
) -> Result<WrapSummary, WrapError> {
    let mut summary = WrapSummary::default();
    let mut failed = 0;

    for entry in &config.entries {
        let source = dir.join(&entry.source);
        if !source.exists() {
            log!(
                "skip";
                "{} not found in {}",
                entry.source.display(),
                dir.display()
            );
            summary.skipped.push(source);
            continue;
        }

        log!(
            "wrap";
            "{} -> {} ({})",
            entry.source.display(),
            entry.dest.display(),
            entry.category
        );

        match wrap_file(dir, entry, config) {
            Ok(conversion) => {
                report(&conversion);
                summary.converted.push(conversion);
            }
            Err(e) if keep_going => {
                log!("error"; "{}", crate::error::chain(&e));
                failed += 1;
            }
            Err(e) => return Err(e),
        }
    }

    if failed > 0 {
        return Err(WrapError::Failed { count: failed });
    }
    Ok(summary)
}

/// Print the before/after comparison for one conversion.
fn report(conversion: &Conversion) {
    let name = conversion
        .dest
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    log!(
        "wrap";
        "created: {} {}x{} ({} bytes)",
        name,
        conversion.output_size.0,
        conversion.output_size.1,
        group_digits(conversion.output_bytes)
    );
    if conversion.output_size != conversion.original_size {
        log!(
            "wrap";
            "downscaled {} from {}x{}",
            conversion.source.display(),
            conversion.original_size.0,
            conversion.original_size.1
        );
    }
    if let Some(change) = percent_change(conversion.original_bytes, conversion.output_bytes) {
        log!("wrap"; "size change: {}", change);
    }
}
