// Core modules
mod claude_mcp;
mod config;
mod error;
mod import_export;
mod services;
mod settings;
mod store;

// CLI module
pub mod cli;

// Public exports
pub use claude_mcp::{
    known_server_for, variable_bindings_for, KnownServer, McpServerEntry, VariableBinding,
    KNOWN_SERVERS,
};
pub use config::{
    CLAUDE_DESKTOP_CONFIG_FILE, CLAUDE_DESKTOP_CONFIG_SHELL_PATH, CONFIG_MIME_TYPE,
    DEFAULT_CONFIG_SKELETON,
};
pub use error::AppError;
pub use import_export::{
    build_load_command, build_save_command, escape_for_shell, import_config_from_path,
    import_config_from_text, to_pretty_json,
};
pub use services::{
    ClipboardWriter, DirectoryDownloader, EntryEditor, ExportService, FileDownloader,
    MemoryClipboard, SystemClipboard, TransientFlag, COPIED_ACK_DURATION,
};
pub use settings::{get_settings, update_settings, AppSettings};
pub use store::{ConfigStore, ImportStatus};
