//! Log output settings for hostlink.
//!
//! Events from the dispatcher and the built-in transports are emitted under
//! targets rooted at [`CONNECT_LOG_TARGET`]. A configured connect log level
//! becomes a `hostlink_connect=<level>` directive appended to the base
//! filter, so dispatch can be traced without raising every other target.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Root target of the events emitted by `hostlink_connect`.
pub const CONNECT_LOG_TARGET: &str = "hostlink_connect";

/// How log records are rendered on stderr.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// One JSON object per event, fields flattened to the top level.
    #[default]
    Json,
    /// One short human-readable line per event.
    Compact,
}

impl LogFormat {
    /// Whether records are machine-readable.
    #[must_use]
    pub const fn is_structured(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Error returned when a [`LogFormat`] name is not recognised.
pub type LogFormatParseError = strum::ParseError;

/// Joins the base filter with the connect-target directive, if any.
///
/// Blank parts are dropped.
#[must_use]
pub fn compose_filter(base: &str, connect_level: Option<&str>) -> String {
    let trimmed = base.trim();
    let directive = connect_level
        .map(str::trim)
        .filter(|level| !level.is_empty())
        .map(|level| format!("{CONNECT_LOG_TARGET}={level}"));
    match directive {
        Some(directive) if trimmed.is_empty() => directive,
        Some(directive) => format!("{trimmed},{directive}"),
        None => trimmed.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::no_level("info", None, "info")]
    #[case::blank_level("info", Some("  "), "info")]
    #[case::appended("warn", Some("debug"), "warn,hostlink_connect=debug")]
    #[case::blank_base(" ", Some("trace"), "hostlink_connect=trace")]
    #[case::trimmed(" info ", Some(" debug "), "info,hostlink_connect=debug")]
    fn compose_filter_appends_connect_directive(
        #[case] base: &str,
        #[case] level: Option<&str>,
        #[case] expected: &str,
    ) {
        assert_eq!(compose_filter(base, level), expected);
    }

    #[rstest]
    #[case::json(LogFormat::Json, true)]
    #[case::compact(LogFormat::Compact, false)]
    fn only_json_is_structured(#[case] format: LogFormat, #[case] expected: bool) {
        assert_eq!(format.is_structured(), expected);
    }
}
