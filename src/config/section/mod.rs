//! Configuration section definitions.
//!
//! Each module corresponds to a section in `shipkit.toml`:
//!
//! | Module    | TOML Section | Purpose                                   |
//! |-----------|--------------|-------------------------------------------|
//! | `assets`  | `[assets]`   | PNG sources, svg outputs, icon size limit |
//! | `publish` | `[publish]`  | Manifest, secrets, release commands       |

mod assets;
mod publish;

pub use assets::{AssetCategory, AssetEntry, AssetsConfig};
pub use publish::{PublishConfig, ReleaseVars, clean_entry_problem};
