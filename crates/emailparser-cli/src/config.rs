//! Parser options from a config file and command-line flags.

use std::path::Path;

use anyhow::{Context, Result};
use emailparser::ParserOptions;

/// Grammar flags given on the command line.
#[derive(Debug, Clone, Copy, Default, clap::Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct FlagArgs {
    /// Accept consecutive dots in an unquoted local part
    #[arg(long)]
    pub allow_dot_sequence_in_local: bool,

    /// Accept a local part starting with a dot
    #[arg(long)]
    pub allow_local_begin_with_dot: bool,

    /// Accept a local part ending with a dot
    #[arg(long)]
    pub allow_local_end_with_dot: bool,

    /// Accept `[...]` address literal domains (not supported yet)
    #[arg(long)]
    pub allow_address_literal: bool,
}

/// Loads options from an optional JSON file, then turns on any flag given.
pub fn load(path: Option<&Path>, flags: FlagArgs) -> Result<ParserOptions> {
    let base = match path {
        Some(path) => read_file(path)?,
        None => ParserOptions::default(),
    };
    Ok(merge(base, flags))
}

fn read_file(path: &Path) -> Result<ParserOptions> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let options = serde_json::from_str(&text)
        .with_context(|| format!("Invalid config file {}", path.display()))?;
    tracing::debug!(path = %path.display(), ?options, "Loaded parser options");
    Ok(options)
}

const fn merge(base: ParserOptions, flags: FlagArgs) -> ParserOptions {
    ParserOptions {
        allow_address_literal: base.allow_address_literal || flags.allow_address_literal,
        allow_dot_sequence_in_local: base.allow_dot_sequence_in_local
            || flags.allow_dot_sequence_in_local,
        allow_local_begin_with_dot: base.allow_local_begin_with_dot
            || flags.allow_local_begin_with_dot,
        allow_local_end_with_dot: base.allow_local_end_with_dot || flags.allow_local_end_with_dot,
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::redundant_clone,
    clippy::manual_string_new,
    clippy::needless_collect,
    clippy::unreadable_literal,
    clippy::used_underscore_items,
    clippy::similar_names
)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_turn_on_options() {
        let flags = FlagArgs {
            allow_local_end_with_dot: true,
            ..FlagArgs::default()
        };
        let opts = load(None, flags).unwrap();
        assert_eq!(opts, ParserOptions::new().with_local_end_with_dot(true));
    }

    #[test]
    fn test_config_file_merged_with_flags() {
        let path = std::env::temp_dir().join(format!(
            "emailparser-cli-config-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{"allow_dot_sequence_in_local": true}"#).unwrap();

        let flags = FlagArgs {
            allow_local_begin_with_dot: true,
            ..FlagArgs::default()
        };
        let opts = load(Some(&path), flags).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(
            opts,
            ParserOptions::new()
                .with_dot_sequence_in_local(true)
                .with_local_begin_with_dot(true)
        );
    }

    #[test]
    fn test_missing_config_file() {
        let err = load(Some(Path::new("/nonexistent/emailparser.json")), FlagArgs::default())
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
