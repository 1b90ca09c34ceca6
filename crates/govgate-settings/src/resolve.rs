use crate::model::GovgateConfigV1;
use anyhow::Context;
use camino::Utf8PathBuf;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

pub const DEFAULT_AUDIT_DIR: &str = "audit_logs";

/// Command-line values that win over file values.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub audit_dir: Option<String>,
    pub as_of: Option<String>,
    pub require_handshake: Option<bool>,
}

/// The settings the interceptor actually runs with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub audit_dir: Utf8PathBuf,
    pub as_of: Date,
    pub require_handshake: bool,
}

pub fn resolve_config(
    cfg: GovgateConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let audit_dir = overrides
        .audit_dir
        .or(cfg.audit_dir)
        .unwrap_or_else(|| DEFAULT_AUDIT_DIR.to_string());

    let as_of = match overrides.as_of.or(cfg.as_of) {
        Some(text) => parse_as_of(&text)?,
        None => OffsetDateTime::now_utc().date(),
    };

    Ok(ResolvedConfig {
        audit_dir: Utf8PathBuf::from(audit_dir),
        as_of,
        require_handshake: overrides
            .require_handshake
            .or(cfg.require_handshake)
            .unwrap_or(false),
    })
}

fn parse_as_of(text: &str) -> anyhow::Result<Date> {
    let format = format_description!("[year]-[month]-[day]");
    Date::parse(text, &format).with_context(|| format!("invalid as_of date: {text}"))
}
