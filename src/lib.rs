//! Layered per-target configuration resolution.
//!
//! One installation root serves many deployment *targets*; the active one
//! is named by the `cnf/target` marker file as `<mode>/<instance>`. The
//! target selects a chain of `app.ini` layers that merge in override order,
//! with per-layer `%key%` import substitution. See the [`config`] module
//! for the resolution pipeline and the lookup store.

pub mod app;
pub mod cli;
pub mod config;
pub mod dsn;
pub mod error;
pub mod format;
pub mod ini;
pub mod target;
