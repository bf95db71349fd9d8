use crate::cli::i18n::{current_language, set_language, texts, Language};
use crate::cli::ui::{highlight, success};
use crate::error::AppError;
use crate::settings::{get_download_dir, get_settings, set_download_dir};

use super::utils::{clear_screen, pause, prompt_select, prompt_text};

pub fn settings_menu() -> Result<(), AppError> {
    loop {
        clear_screen();
        println!("\n{}", highlight(texts::settings_title()));
        println!("{}", texts::tui_rule(60));

        let lang = current_language();
        println!(
            "{}: {}",
            texts::current_language_label(),
            highlight(lang.display_name())
        );
        println!(
            "{}: {}",
            texts::download_dir_label(),
            highlight(&get_download_dir().display().to_string())
        );
        println!();

        let choices = vec![
            texts::change_language(),
            texts::change_download_dir(),
            texts::back(),
        ];

        let Some(choice) = prompt_select(texts::choose_action(), choices)? else {
            break;
        };

        if choice == texts::change_language() {
            change_language_interactive()?;
        } else if choice == texts::change_download_dir() {
            change_download_dir_interactive()?;
        } else {
            break;
        }
    }

    Ok(())
}

fn change_language_interactive() -> Result<(), AppError> {
    clear_screen();
    let languages = vec![Language::English, Language::Chinese];

    let Some(selected) = prompt_select(texts::select_language(), languages)? else {
        return Ok(());
    };

    set_language(selected)?;

    println!("\n{}", success(texts::language_changed()));
    pause();

    Ok(())
}

fn change_download_dir_interactive() -> Result<(), AppError> {
    clear_screen();
    let current = get_settings().download_dir.unwrap_or_default();

    let Some(dir) = prompt_text(
        texts::download_dir_label(),
        Some(current.as_str()),
        Some(texts::download_dir_hint()),
    )?
    else {
        return Ok(());
    };

    let dir = dir.trim();
    set_download_dir((!dir.is_empty()).then(|| dir.to_string()))?;

    println!("\n{}", success(texts::download_dir_changed()));
    pause();

    Ok(())
}
