//! `shipkit wrap`: wrap the configured png assets in svg containers.

use crate::{
    asset::wrap_all,
    cli::WrapArgs,
    config::ShipConfig,
    log,
    utils::format::plural_count,
};
use anyhow::Result;

/// Run the asset wrapper and print a summary.
pub fn run_wrap(config: &ShipConfig, args: &WrapArgs) -> Result<()> {
    let dir = config.assets_dir();
    log!("wrap"; "wrapping png assets in svg containers (embedded raster, not traced)");
    log!("wrap"; "directory: {}", dir.display());

    let summary = wrap_all(&dir, &config.assets, args.keep_going)?;

    log!(
        "done";
        "{} wrapped, {} skipped",
        plural_count(summary.converted.len(), "asset"),
        summary.skipped.len()
    );
    if !summary.converted.is_empty() {
        log!("done"; "svg files are next to their png sources in {}", dir.display());
    }
    Ok(())
}
