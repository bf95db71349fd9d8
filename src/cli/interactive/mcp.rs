use crate::claude_mcp::variable_bindings_for;
use crate::cli::i18n::texts;
use crate::cli::ui::{create_table, error, highlight, info, success, warning};
use crate::error::AppError;
use crate::services::EntryEditor;
use crate::store::ConfigStore;

use super::utils::{clear_screen, pause, prompt_confirm, prompt_select, prompt_text};
use super::Session;

pub fn manage_servers_menu(session: &mut Session) -> Result<(), AppError> {
    let mut editor = None;
    loop {
        clear_screen();
        println!("\n{}", highlight(texts::menu_manage_servers()));
        println!("{}", texts::tui_rule(60));

        let names = session.store.server_names();
        if names.is_empty() {
            println!("{}", info(texts::no_servers()));
            pause();
            return Ok(());
        }
        print_servers_table(session);

        let mut choices: Vec<String> = names;
        choices.push(texts::back().to_string());

        let Some(choice) = prompt_select(texts::select_server(), choices)? else {
            break;
        };
        if choice == texts::back() {
            break;
        }

        edit_server_interactive(session, &choice, &mut editor)?;
    }

    Ok(())
}

fn print_servers_table(session: &Session) {
    let mut table = create_table();
    table.set_header(vec![texts::header_name(), texts::header_command()]);
    for (name, entry) in session.store.servers() {
        let command = match entry {
            Some(entry) => format!("{} {}", entry.command, entry.args.join(" ")),
            None => texts::unsupported_entry().to_string(),
        };
        table.add_row(vec![name, command]);
    }
    println!("{}", table);
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum EditorChoice {
    EditVariable(String),
    Save,
    Delete,
    Back,
}

impl std::fmt::Display for EditorChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EditVariable(name) => write!(f, "{}", texts::edit_variable(name)),
            Self::Save => write!(f, "{}", texts::save_changes()),
            Self::Delete => write!(f, "{}", texts::delete_server()),
            Self::Back => write!(f, "{}", texts::back()),
        }
    }
}

fn editor_choices(editor: &EntryEditor) -> Vec<EditorChoice> {
    let mut choices: Vec<EditorChoice> = editor
        .bindings()
        .iter()
        .map(|b| EditorChoice::EditVariable(b.name.clone()))
        .collect();
    // 有未保存修改时才显示保存按钮
    if editor.has_changes() {
        choices.push(EditorChoice::Save);
    }
    choices.push(EditorChoice::Delete);
    choices.push(EditorChoice::Back);
    choices
}

fn print_editor(editor: &EntryEditor) {
    let entry = editor.entry();
    println!("\n{}", highlight(editor.server_name()));
    println!("{}", texts::tui_rule(60));
    println!("  {}:  {}", texts::command_label(), entry.command);
    println!("  {}:  {}", texts::args_label(), entry.args.join(" "));

    if editor.is_read_only() {
        println!("\n{}", info(texts::read_only_hint()));
        return;
    }

    println!();
    for binding in editor.bindings() {
        let value = editor.value(&binding.name).unwrap_or_default();
        println!("  {} [{}]: {}", binding.name, binding.arg_index, value);
    }
    if editor.has_changes() {
        println!("\n{}", warning(texts::unsaved_changes()));
    }
}

/// 取得所选条目的编辑器：同一条目沿用未保存的修改，换条目时重建
fn editor_for<'a>(
    slot: &'a mut Option<EntryEditor>,
    store: &ConfigStore,
    name: &str,
) -> Option<&'a mut EntryEditor> {
    let Some(entry) = store.server(name) else {
        *slot = None;
        return None;
    };
    let bindings = variable_bindings_for(&entry);
    let editor = match slot.take() {
        Some(mut editor) => {
            editor.reset_for(name, entry, bindings);
            editor
        }
        None => EntryEditor::new(name, entry, bindings),
    };
    Some(slot.insert(editor))
}

fn edit_server_interactive(
    session: &mut Session,
    name: &str,
    slot: &mut Option<EntryEditor>,
) -> Result<(), AppError> {
    let Some(editor) = editor_for(slot, &session.store, name) else {
        return raw_server_interactive(session, name);
    };

    // Esc 离开时保留编辑器，再次进入同一条目可继续
    if !run_editor(session, name, editor)? {
        *slot = None;
    }
    Ok(())
}

/// 返回 false 表示编辑器应被丢弃（已删除或放弃修改）
fn run_editor(session: &mut Session, name: &str, editor: &mut EntryEditor) -> Result<bool, AppError> {
    loop {
        clear_screen();
        print_editor(editor);
        println!();

        let Some(choice) = prompt_select(texts::choose_action(), editor_choices(editor))? else {
            return Ok(true);
        };

        match choice {
            EditorChoice::EditVariable(var) => {
                let current = editor.value(&var).unwrap_or_default().to_string();
                let prompt = texts::enter_variable(name, &var);
                if let Some(value) = prompt_text(&prompt, Some(current.as_str()), None)? {
                    editor.set_value(&var, value)?;
                }
            }
            EditorChoice::Save => {
                // 失败时修改保留在编辑器中，可重试
                match editor.save(&mut session.store) {
                    Ok(()) => println!("\n{}", success(&texts::server_updated(name))),
                    Err(e) => println!("\n{}", error(&format!("{}: {}", texts::error_prefix(), e))),
                }
                pause();
            }
            EditorChoice::Delete => {
                if confirm_delete(session, name)? {
                    return Ok(false);
                }
            }
            EditorChoice::Back => {
                if !editor.has_changes() {
                    return Ok(true);
                }
                if prompt_confirm(texts::discard_changes_confirm(), false)?.unwrap_or(false) {
                    return Ok(false);
                }
            }
        }
    }
}

/// 无法识别为命令条目的服务器：只展示原始 JSON，允许删除
fn raw_server_interactive(session: &mut Session, name: &str) -> Result<(), AppError> {
    let Some(raw) = session.store.raw_server(name) else {
        return Err(AppError::InvalidInput(texts::entity_not_found(name)));
    };
    let json = serde_json::to_string_pretty(raw).map_err(|e| AppError::JsonSerialize { source: e })?;

    clear_screen();
    println!("\n{}", highlight(name));
    println!("{}", texts::tui_rule(60));
    println!("{}", json);
    println!("\n{}", info(texts::read_only_hint()));

    let choices = vec![EditorChoice::Delete, EditorChoice::Back];
    if let Some(EditorChoice::Delete) = prompt_select(texts::choose_action(), choices)? {
        confirm_delete(session, name)?;
    }
    Ok(())
}

/// 返回是否已删除
fn confirm_delete(session: &mut Session, name: &str) -> Result<bool, AppError> {
    let confirmed = prompt_confirm(&texts::confirm_delete(name), false)?.unwrap_or(false);
    if !confirmed {
        println!("{}", info(texts::cancelled()));
        return Ok(false);
    }

    if session.store.delete_server(name)? {
        println!("\n{}", success(&texts::server_deleted(name)));
        pause();
        return Ok(true);
    }
    Err(AppError::InvalidInput(texts::entity_not_found(name)))
}
