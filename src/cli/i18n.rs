use crate::settings::{get_settings, update_settings};
use std::sync::OnceLock;
use std::sync::RwLock;

/// Supported languages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    Chinese,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Chinese => "zh",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Chinese => "中文",
        }
    }

    pub fn from_code(code: &str) -> Self {
        match code.to_lowercase().as_str() {
            "zh" | "zh-cn" | "zh-tw" | "chinese" => Language::Chinese,
            _ => Language::English,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Global language state
fn language_store() -> &'static RwLock<Language> {
    static STORE: OnceLock<RwLock<Language>> = OnceLock::new();
    STORE.get_or_init(|| {
        let lang = if cfg!(test) {
            // Keep unit tests deterministic and avoid reading real user settings.
            Language::English
        } else {
            get_settings()
                .language
                .as_deref()
                .map(Language::from_code)
                .unwrap_or(Language::English)
        };
        RwLock::new(lang)
    })
}

/// Get current language
pub fn current_language() -> Language {
    language_store()
        .read()
        .map(|l| *l)
        .unwrap_or(Language::English)
}

/// Set current language for this session only
pub fn set_session_language(lang: Language) {
    if let Ok(mut guard) = language_store().write() {
        *guard = lang;
    }
}

/// Set current language and persist
pub fn set_language(lang: Language) -> Result<(), crate::error::AppError> {
    set_session_language(lang);

    let mut settings = get_settings();
    settings.language = Some(lang.code().to_string());
    update_settings(settings)
}

/// Check if current language is Chinese
pub fn is_chinese() -> bool {
    current_language() == Language::Chinese
}

// ============================================================================
// Localized Text Macros and Functions
// ============================================================================

/// Get localized text based on current language
#[macro_export]
macro_rules! t {
    ($en:expr, $zh:expr) => {
        if $crate::cli::i18n::is_chinese() {
            $zh
        } else {
            $en
        }
    };
}

pub mod texts {
    use super::is_chinese;

    // ============================================
    // MAIN MENU (主菜单)
    // ============================================

    pub fn welcome_title() -> &'static str {
        t!("MCP Manager for Claude Desktop", "Claude Desktop MCP 管理器")
    }

    pub fn main_menu_prompt() -> &'static str {
        t!("What would you like to do?", "请选择操作：")
    }

    pub fn menu_load_command() -> &'static str {
        t!(
            "📋 Step 1: Copy the command that loads your config file",
            "📋 第 1 步：复制读取配置文件的命令"
        )
    }

    pub fn menu_paste_config() -> &'static str {
        t!("📝 Step 2: Paste the copied content", "📝 第 2 步：粘贴复制的内容")
    }

    pub fn menu_import_file() -> &'static str {
        t!("📂 Import from a file", "📂 从文件导入")
    }

    pub fn menu_manage_servers() -> &'static str {
        t!("🔌 Step 3: Modify or delete MCP servers", "🔌 第 3 步：修改或删除 MCP 服务器")
    }

    pub fn menu_copy_save_command() -> &'static str {
        t!("💾 Copy the command that saves your changes", "💾 复制保存修改的命令")
    }

    pub fn menu_save_as() -> &'static str {
        t!("⬇️  Save as claude_desktop_config.json", "⬇️  另存为 claude_desktop_config.json")
    }

    pub fn menu_settings() -> &'static str {
        t!("⚙️  Settings", "⚙️  设置")
    }

    pub fn menu_exit() -> &'static str {
        t!("🚪 Exit", "🚪 退出")
    }

    pub fn goodbye() -> &'static str {
        t!("👋 Goodbye!", "👋 再见！")
    }

    pub fn error_prefix() -> &'static str {
        t!("Error", "错误")
    }

    pub fn press_enter() -> &'static str {
        t!("Press Enter to continue...", "按回车键继续...")
    }

    pub fn cancelled() -> &'static str {
        t!("Cancelled.", "已取消。")
    }

    pub fn back() -> &'static str {
        t!("⬅️  Back", "⬅️  返回")
    }

    pub fn choose_action() -> &'static str {
        t!("Choose an action:", "选择操作：")
    }

    // ============================================
    // STATUS (状态)
    // ============================================

    pub fn status_no_config() -> &'static str {
        t!(
            "No configuration loaded yet. Follow steps 1 and 2.",
            "尚未加载配置，请按第 1、2 步操作。"
        )
    }

    pub fn server_count(count: usize) -> String {
        if is_chinese() {
            format!("共 {} 个 MCP 服务器", count)
        } else {
            format!("{} MCP server(s)", count)
        }
    }

    pub fn import_success() -> &'static str {
        t!("✓ Uploaded successfully.", "✓ 导入成功。")
    }

    pub fn import_error() -> &'static str {
        t!(
            "✗ Error: Please ensure the content is valid JSON.",
            "✗ 错误：请确认内容是有效的 JSON。"
        )
    }

    // ============================================
    // LOAD / IMPORT (读取与导入)
    // ============================================

    pub fn load_command_title() -> &'static str {
        t!(
            "Run this command in Terminal to copy your config file to your clipboard:",
            "在终端运行以下命令，将配置文件复制到剪贴板："
        )
    }

    pub fn paste_title() -> &'static str {
        t!(
            "Paste the copied content into the editor, then save and close it.",
            "在编辑器中粘贴复制的内容，然后保存并关闭。"
        )
    }

    pub fn privacy_note() -> &'static str {
        t!(
            "This data stays in memory on your computer and is never sent anywhere.",
            "数据只保存在本机内存中，不会发送到任何地方。"
        )
    }

    pub fn confirm_replace_config(count: usize) -> String {
        if is_chinese() {
            format!("这将替换当前已加载的配置（{} 个服务器），继续？", count)
        } else {
            format!(
                "This replaces the loaded configuration ({} server(s)). Continue?",
                count
            )
        }
    }

    pub fn enter_import_path() -> &'static str {
        t!("Path to the JSON file:", "JSON 文件路径：")
    }

    pub fn editor_failed(err: &str) -> String {
        if is_chinese() {
            format!("无法打开编辑器: {}", err)
        } else {
            format!("Failed to open editor: {}", err)
        }
    }

    // ============================================
    // SAVE / EXPORT (保存与导出)
    // ============================================

    pub fn save_command_title() -> &'static str {
        t!(
            "After you make changes, save them to the config file by running this command in Terminal:",
            "修改完成后，在终端运行以下命令保存到配置文件："
        )
    }

    pub fn copied_to_clipboard() -> &'static str {
        t!("✓ Copied to clipboard", "✓ 已复制到剪贴板")
    }

    pub fn clipboard_unavailable(err: &str) -> String {
        if is_chinese() {
            format!("剪贴板不可用（{}），请手动复制上面的命令。", err)
        } else {
            format!("Clipboard unavailable ({}); copy the command above manually.", err)
        }
    }

    pub fn enter_download_dir() -> &'static str {
        t!("Save into directory:", "保存到目录：")
    }

    pub fn saved_to(path: &str) -> String {
        if is_chinese() {
            format!("✓ 已保存: {}", path)
        } else {
            format!("✓ Saved: {}", path)
        }
    }

    // ============================================
    // SERVERS (服务器)
    // ============================================

    pub fn no_servers() -> &'static str {
        t!("No MCP servers found.", "未找到 MCP 服务器。")
    }

    pub fn header_name() -> &'static str {
        t!("Name", "名称")
    }

    pub fn header_type() -> &'static str {
        t!("Type", "类型")
    }

    pub fn header_command() -> &'static str {
        t!("Command", "命令")
    }

    pub fn header_variables() -> &'static str {
        t!("Variables", "变量")
    }

    pub fn unsupported_entry() -> &'static str {
        t!("(not a command entry, read-only)", "（非命令条目，只读）")
    }

    pub fn select_server() -> &'static str {
        t!("Select a server:", "选择服务器：")
    }

    pub fn entity_not_found(name: &str) -> String {
        if is_chinese() {
            format!("服务器不存在: {}", name)
        } else {
            format!("Server not found: {}", name)
        }
    }

    pub fn server_read_only(name: &str) -> String {
        if is_chinese() {
            format!("服务器 '{}' 没有可编辑的变量", name)
        } else {
            format!("Server '{}' has no editable variables", name)
        }
    }

    pub fn read_only_hint() -> &'static str {
        t!(
            "This server has no editable variables; paste new JSON in step 2 to change it.",
            "该服务器没有可编辑的变量；如需修改，请在第 2 步粘贴新的 JSON。"
        )
    }

    pub fn command_label() -> &'static str {
        t!("Command", "命令")
    }

    pub fn args_label() -> &'static str {
        t!("Args", "参数")
    }

    pub fn unsaved_changes() -> &'static str {
        t!("● unsaved changes", "● 有未保存的修改")
    }

    pub fn edit_variable(name: &str) -> String {
        if is_chinese() {
            format!("✏️  编辑 {}", name)
        } else {
            format!("✏️  Edit {}", name)
        }
    }

    pub fn enter_variable(server: &str, name: &str) -> String {
        if is_chinese() {
            format!("输入 {} 的 {}：", server, name)
        } else {
            format!("Enter {} {}:", server, name)
        }
    }

    pub fn save_changes() -> &'static str {
        t!("💾 Save Changes", "💾 保存修改")
    }

    pub fn delete_server() -> &'static str {
        t!("🗑️  Delete", "🗑️  删除")
    }

    pub fn confirm_delete(name: &str) -> String {
        if is_chinese() {
            format!("确认删除服务器 '{}'？", name)
        } else {
            format!("Delete server '{}'?", name)
        }
    }

    pub fn discard_changes_confirm() -> &'static str {
        t!("Discard unsaved changes?", "放弃未保存的修改？")
    }

    pub fn server_updated(name: &str) -> String {
        if is_chinese() {
            format!("✓ 已更新服务器 '{}'", name)
        } else {
            format!("✓ Updated server '{}'", name)
        }
    }

    pub fn server_deleted(name: &str) -> String {
        if is_chinese() {
            format!("✓ 已删除服务器 '{}'", name)
        } else {
            format!("✓ Deleted server '{}'", name)
        }
    }

    // ============================================
    // SETTINGS (设置)
    // ============================================

    pub fn settings_title() -> &'static str {
        t!("⚙️  Settings", "⚙️  设置")
    }

    pub fn current_language_label() -> &'static str {
        t!("Current Language", "当前语言")
    }

    pub fn download_dir_label() -> &'static str {
        t!("Download Directory", "下载目录")
    }

    pub fn change_language() -> &'static str {
        t!("🌐 Change Language", "🌐 切换语言")
    }

    pub fn change_download_dir() -> &'static str {
        t!("📁 Change Download Directory", "📁 修改下载目录")
    }

    pub fn select_language() -> &'static str {
        t!("Select language:", "选择语言：")
    }

    pub fn language_changed() -> &'static str {
        t!("✓ Language changed", "✓ 语言已切换")
    }

    pub fn download_dir_changed() -> &'static str {
        t!("✓ Download directory updated", "✓ 下载目录已更新")
    }

    pub fn download_dir_hint() -> &'static str {
        t!("Leave empty to use the system download folder", "留空则使用系统下载目录")
    }

    pub fn tui_rule(width: usize) -> String {
        "─".repeat(width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn language_codes_round_trip() {
        assert_eq!(Language::from_code("zh-CN"), Language::Chinese);
        assert_eq!(Language::from_code("en"), Language::English);
        assert_eq!(Language::from_code("unknown"), Language::English);
        assert_eq!(Language::Chinese.code(), "zh");
    }

    #[test]
    #[serial]
    fn texts_follow_session_language() {
        set_session_language(Language::Chinese);
        assert_eq!(texts::menu_exit(), "🚪 退出");
        assert_eq!(texts::copied_to_clipboard(), "✓ 已复制到剪贴板");

        set_session_language(Language::English);
        assert_eq!(texts::menu_exit(), "🚪 Exit");
        assert_eq!(texts::server_count(2), "2 MCP server(s)");
    }
}
