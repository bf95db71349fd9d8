pub mod config;
pub mod mcp;

use std::path::Path;

use crate::error::AppError;
use crate::import_export::import_config_from_path;
use crate::services::{ClipboardWriter, SystemClipboard};
use crate::store::ConfigStore;
use crate::cli::ui::{info, success};

/// Parse a `NAME=VALUE` assignment; the value may itself contain `=`.
pub fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("invalid assignment '{raw}': expected NAME=VALUE"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("invalid assignment '{raw}': empty name"));
    }
    Ok((name.to_string(), value.to_string()))
}

fn load_store(input: &Path) -> Result<ConfigStore, AppError> {
    let mut store = ConfigStore::new();
    import_config_from_path(&mut store, input)?;
    Ok(store)
}

fn print_command(command: &str, copy: bool) -> Result<(), AppError> {
    println!("{}", command);
    if copy {
        SystemClipboard::new().write_text(command)?;
        eprintln!("{}", success("✓ Copied to clipboard"));
    } else {
        eprintln!("{}", info("Run this command in Terminal (add --copy to copy it)."));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignment_splits_on_first_equals() {
        assert_eq!(
            parse_assignment("database url=postgres://u:p@h/db?a=b"),
            Ok(("database url".to_string(), "postgres://u:p@h/db?a=b".to_string()))
        );
    }

    #[test]
    fn assignment_requires_name_and_equals() {
        assert!(parse_assignment("novalue").is_err());
        assert!(parse_assignment("=x").is_err());
        assert_eq!(parse_assignment("path="), Ok(("path".into(), String::new())));
    }
}
