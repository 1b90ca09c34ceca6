//! Config parsing and resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod resolve;

pub use model::GovgateConfigV1;
pub use resolve::{Overrides, ResolvedConfig, DEFAULT_AUDIT_DIR};

/// Parse `govgate.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<GovgateConfigV1> {
    let cfg: GovgateConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective settings (file values + command-line overrides + defaults).
pub fn resolve_config(
    cfg: GovgateConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}
