//! Layered configuration resolution.
//!
//! One installation root carries three configuration layers, merged in
//! override order (later wins on key conflict):
//! 1. **shared** — `cnf/shared/app.ini`
//! 2. **mode-shared** — `cnf/targets/<mode>/shared/app.ini`
//! 3. **target** — `cnf/targets/<target>/app.ini`
//!
//! The active target is named by the `cnf/target` marker file. Each layer
//! may carry an `[import]` section whose values name ini files (relative to
//! the installation root) supplying `%key%` substitution values for that
//! layer only.
//!
//! ## Environment Variables
//! - `APPINI_ROOT` — installation root (overrides discovery)

mod imports;
mod layers;
mod loader;
mod merge;
mod paths;
mod store;

pub use imports::{IMPORT_SECTION, ReplacementTable};
pub use layers::{LAYER_FILE, Layer, LayerRole, locate_layers};
pub use loader::{ResolvedConfig, load};
pub use merge::MergedConfig;
pub use paths::{CnfPaths, ROOT_ENV};
pub use store::{ConfigStore, KEY_PREFIX};
