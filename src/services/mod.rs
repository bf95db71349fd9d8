pub mod clipboard;
pub mod editor;
pub mod transient;

use std::path::PathBuf;

pub use clipboard::{
    ClipboardWriter, DirectoryDownloader, FileDownloader, MemoryClipboard, SystemClipboard,
};
pub use editor::EntryEditor;
pub use transient::{TransientFlag, COPIED_ACK_DURATION};

use crate::config::{CLAUDE_DESKTOP_CONFIG_FILE, CONFIG_MIME_TYPE};
use crate::error::AppError;
use crate::import_export::{build_load_command, build_save_command, to_pretty_json};
use crate::store::ConfigStore;

/// 复制命令与“另存为”相关业务逻辑
pub struct ExportService;

impl ExportService {
    /// 复制读取配置的命令，成功后点亮提示标志
    pub fn copy_load_command(
        clipboard: &mut dyn ClipboardWriter,
        ack: &mut TransientFlag,
    ) -> Result<String, AppError> {
        let command = build_load_command();
        clipboard.write_text(&command)?;
        ack.raise();
        Ok(command)
    }

    /// 复制保存命令；序列化失败时不触碰剪贴板
    pub fn copy_save_command(
        store: &ConfigStore,
        clipboard: &mut dyn ClipboardWriter,
        ack: &mut TransientFlag,
    ) -> Result<String, AppError> {
        let command = build_save_command(store.root()).inspect_err(|err| {
            log::error!("Error generating save command: {err}");
        })?;
        clipboard.write_text(&command)?;
        ack.raise();
        Ok(command)
    }

    /// 将当前配置写成 claude_desktop_config.json
    pub fn save_as(
        store: &ConfigStore,
        downloader: &mut dyn FileDownloader,
    ) -> Result<PathBuf, AppError> {
        let json = to_pretty_json(store.root()).inspect_err(|err| {
            log::error!("Error saving file: {err}");
        })?;
        downloader.download(CLAUDE_DESKTOP_CONFIG_FILE, CONFIG_MIME_TYPE, json.as_bytes())
    }
}
