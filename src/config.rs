use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::AppError;

/// Claude Desktop 配置文件名（下载时使用的文件名）
pub const CLAUDE_DESKTOP_CONFIG_FILE: &str = "claude_desktop_config.json";

/// 下载文件的 MIME 类型
pub const CONFIG_MIME_TYPE: &str = "application/json";

/// 目标配置文件路径，空格已按 shell 规则转义
pub const CLAUDE_DESKTOP_CONFIG_SHELL_PATH: &str =
    "~/Library/Application\\ Support/Claude/claude_desktop_config.json";

/// 目标文件不存在时写入的默认骨架
pub const DEFAULT_CONFIG_SKELETON: &str = "{\n  \"mcpServers\": {}\n}";

/// 本工具自身设置所在目录：~/.mcp-manager
pub fn get_app_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".mcp-manager")
}

/// 设置文件路径：~/.mcp-manager/settings.json
pub fn get_settings_path() -> PathBuf {
    get_app_config_dir().join("settings.json")
}

/// 默认下载目录：优先系统下载目录，其次当前目录
pub fn default_download_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// 读取 UTF-8 文本；`-` 表示标准输入
pub fn read_text_input(source: &Path) -> Result<String, AppError> {
    if source == Path::new("-") {
        let mut buf = String::new();
        std::io::Read::read_to_string(&mut std::io::stdin(), &mut buf)
            .map_err(|e| AppError::io("<stdin>", e))?;
        return Ok(buf);
    }
    fs::read_to_string(source).map_err(|e| AppError::io(source, e))
}

/// 原子写入：先写入同目录临时文件，再重命名覆盖目标
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<(), AppError> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent).map_err(|e| AppError::io(parent, e))?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(|e| AppError::io(parent, e))?;
    tmp.write_all(data).map_err(|e| AppError::io(tmp.path(), e))?;
    tmp.flush().map_err(|e| AppError::io(tmp.path(), e))?;
    tmp.persist(path)
        .map_err(|e| AppError::io(path, e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atomic_write_creates_parent_and_replaces_content() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("out.json");

        atomic_write(&path, b"first").expect("first write");
        atomic_write(&path, b"second").expect("second write");

        assert_eq!(fs::read_to_string(&path).expect("read back"), "second");
    }

    #[test]
    fn read_text_input_reports_missing_file_with_path() {
        let err = read_text_input(Path::new("/definitely/not/here.json"))
            .expect_err("missing file should fail");
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn shell_path_escapes_the_space() {
        assert!(CLAUDE_DESKTOP_CONFIG_SHELL_PATH.contains("Application\\ Support"));
        assert!(!CLAUDE_DESKTOP_CONFIG_SHELL_PATH.contains("Application Support"));
    }
}
