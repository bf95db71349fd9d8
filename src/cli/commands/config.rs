use std::path::{Path, PathBuf};

use crate::error::AppError;
use crate::import_export::{build_load_command, build_save_command};
use crate::services::{DirectoryDownloader, ExportService};
use crate::cli::ui::{info, success};

use super::{load_store, print_command};

pub fn load_command(copy: bool) -> Result<(), AppError> {
    print_command(&build_load_command(), copy)
}

pub fn save_command(input: &Path, copy: bool) -> Result<(), AppError> {
    let store = load_store(input)?;
    let command = build_save_command(store.root())?;
    print_command(&command, copy)
}

pub fn export(input: &Path, dir: Option<PathBuf>) -> Result<(), AppError> {
    let store = load_store(input)?;
    let dir = dir.unwrap_or_else(crate::settings::get_download_dir);

    println!("{}", info(&format!("Saving to {}...", dir.display())));
    let mut downloader = DirectoryDownloader::new(dir);
    let path = ExportService::save_as(&store, &mut downloader)?;
    println!("{}", success(&format!("✓ Saved {}", path.display())));

    Ok(())
}
