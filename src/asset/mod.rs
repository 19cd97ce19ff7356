//! PNG to SVG wrapping.
//!
//! Each configured PNG is normalized to RGBA, optionally downscaled,
//! re-encoded with maximum compression and embedded as base64 in an SVG
//! `<image>` element. The result scales like any SVG but still holds a
//! raster; nothing is traced.

mod raster;
mod svg;
mod wrap;

pub use wrap::{WrapError, wrap_all};
