//! Centralized configuration and builder for moedit.
//!
//! - MoConfig::from_env() reads the MOEDIT_* variables listed below.
//! - Fluent `with_*` setters override single fields; `build()` finishes.
//!
//! Defaults:
//! - atomic_save = true  (in-place saves go through <file>.tmp + rename)
//! - fsync = false       (direct saves are not fsynced unless asked)
//! - export_sep = '\t'

use log::warn;
use std::fmt;

use crate::consts::{DEFAULT_EXPORT_SEP, ENV_ATOMIC_SAVE, ENV_EXPORT_SEP, ENV_FSYNC};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoConfig {
    /// Stage saves to a sibling temp file and rename over the target.
    /// Env: MOEDIT_ATOMIC_SAVE (default true; "0|false|off|no" => false)
    pub atomic_save: bool,

    /// fsync after a direct (non-atomic) save. Atomic saves always fsync.
    /// Env: MOEDIT_FSYNC (default false; "1|true|on|yes" => true)
    pub fsync: bool,

    /// Separator of the delimited export/import format.
    /// Env: MOEDIT_EXPORT_SEP (single non-alphanumeric char, not '\n', '\r' or '\\')
    pub export_sep: char,
}

impl Default for MoConfig {
    fn default() -> Self {
        Self {
            atomic_save: true,
            fsync: false,
            export_sep: DEFAULT_EXPORT_SEP,
        }
    }
}

#[inline]
fn parse_flag(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Unset keeps `current`; an unrecognised value keeps it too, with a warning.
fn env_flag(name: &str, current: bool) -> bool {
    match std::env::var(name) {
        Ok(v) => match parse_flag(&v) {
            Some(b) => b,
            None => {
                warn!("{}={:?} is not a boolean, keeping {}", name, v, current);
                current
            }
        },
        Err(_) => current,
    }
}

/// A usable separator: exactly one char, not alphanumeric, not a line break,
/// not the escape char.
pub fn parse_sep(v: &str) -> Option<char> {
    let v = if v == "\\t" { "\t" } else { v };
    let mut it = v.chars();
    match (it.next(), it.next()) {
        (Some(c), None) if !c.is_alphanumeric() && c != '\n' && c != '\r' && c != '\\' => {
            Some(c)
        }
        _ => None,
    }
}

impl MoConfig {
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        cfg.atomic_save = env_flag(ENV_ATOMIC_SAVE, cfg.atomic_save);
        cfg.fsync = env_flag(ENV_FSYNC, cfg.fsync);

        if let Ok(v) = std::env::var(ENV_EXPORT_SEP) {
            match parse_sep(&v) {
                Some(c) => cfg.export_sep = c,
                None => warn!(
                    "{}={:?} is not a usable separator, keeping {:?}",
                    ENV_EXPORT_SEP, v, cfg.export_sep
                ),
            }
        }

        cfg
    }

    pub fn with_atomic_save(mut self, on: bool) -> Self {
        self.atomic_save = on;
        self
    }

    pub fn with_fsync(mut self, on: bool) -> Self {
        self.fsync = on;
        self
    }

    /// Invalid separators are ignored (with a warning).
    pub fn with_export_sep(mut self, sep: char) -> Self {
        if parse_sep(&sep.to_string()).is_some() {
            self.export_sep = sep;
        } else {
            warn!("separator {:?} is not usable, keeping {:?}", sep, self.export_sep);
        }
        self
    }

    pub fn build(self) -> Self {
        self
    }
}

impl fmt::Display for MoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MoConfig {{ atomic_save: {}, fsync: {}, export_sep: {:?} }}",
            self.atomic_save, self.fsync, self.export_sep
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags() {
        assert_eq!(parse_flag(" ON "), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn env_flag_keeps_current_on_garbage() {
        let name = format!("MOEDIT_TEST_FLAG_{}", std::process::id());
        std::env::remove_var(&name);
        assert!(env_flag(&name, true));
        std::env::set_var(&name, "maybe");
        assert!(env_flag(&name, true));
        assert!(!env_flag(&name, false));
        std::env::set_var(&name, "off");
        assert!(!env_flag(&name, true));
        std::env::remove_var(&name);
    }

    #[test]
    fn separators() {
        assert_eq!(parse_sep("\t"), Some('\t'));
        assert_eq!(parse_sep("\\t"), Some('\t'));
        assert_eq!(parse_sep(";"), Some(';'));
        assert_eq!(parse_sep(""), None);
        assert_eq!(parse_sep(";;"), None);
        assert_eq!(parse_sep("\n"), None);
        assert_eq!(parse_sep("\\"), None);
        assert_eq!(parse_sep("7"), None);
        assert_eq!(parse_sep("n"), None);
    }

    #[test]
    fn builder_overrides() {
        let cfg = MoConfig::default()
            .with_atomic_save(false)
            .with_fsync(true)
            .with_export_sep('|')
            .with_export_sep('\n')
            .build();
        assert!(!cfg.atomic_save);
        assert!(cfg.fsync);
        assert_eq!(cfg.export_sep, '|');
        assert_eq!(
            cfg.to_string(),
            "MoConfig { atomic_save: false, fsync: true, export_sep: '|' }"
        );
    }
}
