use std::path::Path;

use crate::cli::i18n::texts;
use crate::cli::ui::{error, highlight, info, success, warning};
use crate::error::AppError;
use crate::import_export::{
    build_load_command, build_save_command, import_config_from_path, import_config_from_text,
};
use crate::services::{DirectoryDownloader, ExportService};
use crate::settings::get_download_dir;
use crate::store::ImportStatus;

use super::utils::{clear_screen, pause, prompt_confirm, prompt_text, show_copied_ack};
use super::Session;

pub fn copy_load_command_interactive(session: &mut Session) -> Result<(), AppError> {
    clear_screen();
    println!("\n{}", highlight(texts::load_command_title()));
    println!("{}", texts::tui_rule(60));

    match ExportService::copy_load_command(&mut *session.clipboard, &mut session.load_copied) {
        Ok(command) => {
            println!("{}\n", command);
            show_copied_ack(&mut session.load_copied)
        }
        Err(AppError::Clipboard(msg)) => {
            println!("{}\n", build_load_command());
            println!("{}", warning(&texts::clipboard_unavailable(&msg)));
            Ok(())
        }
        Err(e) => Err(e),
    }
}

fn confirm_replace(session: &Session) -> Result<bool, AppError> {
    if session.store.is_empty() {
        return Ok(true);
    }
    let prompt = texts::confirm_replace_config(session.store.server_count());
    Ok(prompt_confirm(&prompt, true)?.unwrap_or(false))
}

fn report_import(session: &Session) {
    match session.store.status() {
        ImportStatus::Success => println!(
            "\n{} {}",
            success(texts::import_success()),
            texts::server_count(session.store.server_count())
        ),
        ImportStatus::Error => println!("\n{}", error(texts::import_error())),
        ImportStatus::Idle => {}
    }
}

pub fn paste_config_interactive(session: &mut Session) -> Result<(), AppError> {
    clear_screen();
    println!("\n{}", highlight(texts::paste_title()));
    println!("{}", info(texts::privacy_note()));

    if !confirm_replace(session)? {
        println!("{}", info(texts::cancelled()));
        return Ok(());
    }

    let pasted = edit::edit("").map_err(|e| AppError::Message(texts::editor_failed(&e.to_string())))?;

    // 解析失败已体现在导入状态中
    let _ = import_config_from_text(&mut session.store, &pasted);
    report_import(session);
    pause();
    Ok(())
}

pub fn import_file_interactive(session: &mut Session) -> Result<(), AppError> {
    let Some(path) = prompt_text(texts::enter_import_path(), None, None)? else {
        return Ok(());
    };
    let path = path.trim();
    if path.is_empty() {
        return Ok(());
    }

    if !confirm_replace(session)? {
        println!("{}", info(texts::cancelled()));
        return Ok(());
    }

    if let Err(e) = import_config_from_path(&mut session.store, Path::new(path)) {
        if !e.is_parse_error() {
            println!("{}", error(&e.to_string()));
        }
    }
    report_import(session);
    pause();
    Ok(())
}

pub fn copy_save_command_interactive(session: &mut Session) -> Result<(), AppError> {
    clear_screen();
    println!("\n{}", highlight(texts::save_command_title()));
    println!("{}", texts::tui_rule(60));

    match ExportService::copy_save_command(
        &session.store,
        &mut *session.clipboard,
        &mut session.save_copied,
    ) {
        Ok(command) => {
            println!("{}\n", command);
            show_copied_ack(&mut session.save_copied)
        }
        Err(AppError::Clipboard(msg)) => {
            // 剪贴板不可用时仍展示命令，供手动复制
            println!("{}\n", build_save_command(session.store.root())?);
            println!("{}", warning(&texts::clipboard_unavailable(&msg)));
            Ok(())
        }
        Err(e) => Err(e),
    }
}

pub fn save_as_interactive(session: &Session) -> Result<(), AppError> {
    let default_dir = get_download_dir().display().to_string();
    let Some(dir) = prompt_text(texts::enter_download_dir(), Some(default_dir.as_str()), None)? else {
        return Ok(());
    };

    let mut downloader = DirectoryDownloader::new(dir.trim());
    let path = ExportService::save_as(&session.store, &mut downloader)?;
    println!("{}", success(&texts::saved_to(&path.display().to_string())));
    pause();
    Ok(())
}
