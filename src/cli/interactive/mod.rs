mod config;
mod mcp;
mod settings;
mod utils;

use crate::cli::i18n::texts;
use crate::cli::ui::{apply_inquire_theme, error, highlight, info, success};
use crate::error::AppError;
use crate::services::{ClipboardWriter, SystemClipboard, TransientFlag};
use crate::store::{ConfigStore, ImportStatus};

use utils::{pause, prompt_select};

/// 交互会话状态：配置只存在于内存中，退出即丢弃
pub struct Session {
    pub store: ConfigStore,
    pub clipboard: Box<dyn ClipboardWriter>,
    pub load_copied: TransientFlag,
    pub save_copied: TransientFlag,
}

impl Session {
    pub fn new(clipboard: Box<dyn ClipboardWriter>) -> Self {
        Self {
            store: ConfigStore::new(),
            clipboard,
            load_copied: TransientFlag::default(),
            save_copied: TransientFlag::default(),
        }
    }
}

pub fn run() -> Result<(), AppError> {
    apply_inquire_theme();
    let mut session = Session::new(Box::new(SystemClipboard::new()));

    print_welcome();

    loop {
        print_status(&session);

        let Some(choice) = show_main_menu(&session)? else {
            println!("\n{}", success(texts::goodbye()));
            break;
        };

        let result = match choice {
            MainMenuChoice::LoadCommand => config::copy_load_command_interactive(&mut session),
            MainMenuChoice::PasteConfig => config::paste_config_interactive(&mut session),
            MainMenuChoice::ImportFile => config::import_file_interactive(&mut session),
            MainMenuChoice::ManageServers => mcp::manage_servers_menu(&mut session),
            MainMenuChoice::CopySaveCommand => config::copy_save_command_interactive(&mut session),
            MainMenuChoice::SaveAs => config::save_as_interactive(&session),
            MainMenuChoice::Settings => settings::settings_menu(),
            MainMenuChoice::Exit => {
                println!("\n{}", success(texts::goodbye()));
                break;
            }
        };

        if let Err(e) = result {
            println!("\n{}", error(&format!("{}: {}", texts::error_prefix(), e)));
            pause();
        }
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MainMenuChoice {
    LoadCommand,
    PasteConfig,
    ImportFile,
    ManageServers,
    CopySaveCommand,
    SaveAs,
    Settings,
    Exit,
}

impl std::fmt::Display for MainMenuChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::LoadCommand => texts::menu_load_command(),
            Self::PasteConfig => texts::menu_paste_config(),
            Self::ImportFile => texts::menu_import_file(),
            Self::ManageServers => texts::menu_manage_servers(),
            Self::CopySaveCommand => texts::menu_copy_save_command(),
            Self::SaveAs => texts::menu_save_as(),
            Self::Settings => texts::menu_settings(),
            Self::Exit => texts::menu_exit(),
        };
        write!(f, "{}", label)
    }
}

fn menu_items(session: &Session) -> Vec<MainMenuChoice> {
    let mut items = vec![
        MainMenuChoice::LoadCommand,
        MainMenuChoice::PasteConfig,
        MainMenuChoice::ImportFile,
    ];
    // 加载配置后才显示编辑与保存入口
    if !session.store.is_empty() {
        items.extend([
            MainMenuChoice::ManageServers,
            MainMenuChoice::CopySaveCommand,
            MainMenuChoice::SaveAs,
        ]);
    }
    items.extend([MainMenuChoice::Settings, MainMenuChoice::Exit]);
    items
}

fn show_main_menu(session: &Session) -> Result<Option<MainMenuChoice>, AppError> {
    prompt_select(texts::main_menu_prompt(), menu_items(session))
}

fn print_welcome() {
    println!("\n{}", "═".repeat(60));
    println!("{}", highlight(texts::welcome_title()));
    println!("{}", "═".repeat(60));
    println!("{}", info(texts::privacy_note()));
    println!();
}

fn print_status(session: &Session) {
    match session.store.status() {
        ImportStatus::Success => println!("{}", success(texts::import_success())),
        ImportStatus::Error => println!("{}", error(texts::import_error())),
        ImportStatus::Idle => {}
    }

    if session.store.is_empty() {
        println!("{}", info(texts::status_no_config()));
    } else {
        println!(
            "{}",
            highlight(&texts::server_count(session.store.server_count()))
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import_export::import_config_from_text;
    use crate::services::MemoryClipboard;

    #[test]
    fn editing_entries_appear_only_after_a_config_is_loaded() {
        let mut session = Session::new(Box::new(MemoryClipboard::default()));
        assert!(!menu_items(&session).contains(&MainMenuChoice::CopySaveCommand));

        import_config_from_text(&mut session.store, r#"{"mcpServers":{}}"#).expect("import");
        let loaded = menu_items(&session);
        assert!(loaded.contains(&MainMenuChoice::ManageServers));
        assert!(loaded.contains(&MainMenuChoice::CopySaveCommand));
        assert!(loaded.contains(&MainMenuChoice::SaveAs));
    }

    #[test]
    fn menu_labels_never_carry_the_copied_ack() {
        let mut session = Session::new(Box::new(MemoryClipboard::default()));
        import_config_from_text(&mut session.store, r#"{"mcpServers":{}}"#).expect("import");
        session.load_copied.raise();
        session.save_copied.raise();
        for item in menu_items(&session) {
            assert!(!item.to_string().starts_with('✓'), "{item}");
        }
    }
}
