use std::path::Path;

use crate::claude_mcp::{known_server_for, variable_bindings_for};
use crate::cli::i18n::texts;
use crate::cli::ui::{create_table, highlight, info};
use crate::error::AppError;
use crate::import_export::build_save_command;
use crate::services::EntryEditor;

use super::{load_store, print_command};

pub fn list_servers(input: &Path) -> Result<(), AppError> {
    let store = load_store(input)?;
    let servers = store.servers();

    if servers.is_empty() {
        println!("{}", info(texts::no_servers()));
        return Ok(());
    }

    let mut table = create_table();
    table.set_header(vec![
        texts::header_name(),
        texts::header_type(),
        texts::header_command(),
        texts::header_variables(),
    ]);

    for (name, entry) in &servers {
        let kind = entry
            .as_ref()
            .and_then(known_server_for)
            .map(|k| k.kind)
            .unwrap_or("-");
        let (command, variables) = match entry {
            Some(entry) => {
                let command = std::iter::once(entry.command.as_str())
                    .chain(entry.args.iter().map(|a| a.as_str()))
                    .collect::<Vec<_>>()
                    .join(" ");
                let vars = variable_bindings_for(entry)
                    .iter()
                    .map(|b| format!("{} = {}", b.name, b.value))
                    .collect::<Vec<_>>()
                    .join("\n");
                (command, vars)
            }
            None => ("-".to_string(), texts::unsupported_entry().to_string()),
        };
        table.add_row(vec![name.clone(), kind.to_string(), command, variables]);
    }

    println!("{}", highlight(&texts::server_count(servers.len())));
    println!("{}", table);
    Ok(())
}

pub fn set_variables(
    input: &Path,
    server: &str,
    assignments: &[(String, String)],
    copy: bool,
) -> Result<(), AppError> {
    let mut store = load_store(input)?;
    let mut editor = EntryEditor::for_server(&store, server)
        .ok_or_else(|| AppError::InvalidInput(texts::entity_not_found(server)))?;

    if editor.is_read_only() {
        return Err(AppError::InvalidInput(texts::server_read_only(server)));
    }

    for (name, value) in assignments {
        editor.set_value(name, value.clone())?;
    }
    editor.save(&mut store)?;

    let command = build_save_command(store.root())?;
    print_command(&command, copy)
}

pub fn delete_server(input: &Path, server: &str, copy: bool) -> Result<(), AppError> {
    let mut store = load_store(input)?;
    if !store.delete_server(server)? {
        return Err(AppError::InvalidInput(texts::entity_not_found(server)));
    }

    let command = build_save_command(store.root())?;
    print_command(&command, copy)
}
