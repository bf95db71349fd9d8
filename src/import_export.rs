use serde_json::Value;
use std::path::Path;

use crate::config::{read_text_input, CLAUDE_DESKTOP_CONFIG_SHELL_PATH, DEFAULT_CONFIG_SKELETON};
use crate::error::AppError;
use crate::store::{ConfigStore, ImportStatus};

/// 解析文本并整体替换配置
///
/// 状态先重置为 Idle；解析失败时配置保持不变，状态为 Error。
pub fn import_config_from_text(store: &mut ConfigStore, text: &str) -> Result<(), AppError> {
    store.set_status(ImportStatus::Idle);

    match parse_config_text(text) {
        Ok(root) => {
            if !root.is_object() {
                log::warn!("imported JSON is not an object; it contains no MCP servers");
            }
            store.replace(root);
            store.set_status(ImportStatus::Success);
            log::info!("imported configuration with {} server(s)", store.server_count());
            Ok(())
        }
        Err(err) => {
            log::error!("Error parsing JSON: {err}");
            store.set_status(ImportStatus::Error);
            Err(err)
        }
    }
}

/// 从文件（或 `-` 表示的标准输入）导入
pub fn import_config_from_path(store: &mut ConfigStore, path: &Path) -> Result<(), AppError> {
    store.set_status(ImportStatus::Idle);
    let text = match read_text_input(path) {
        Ok(text) => text,
        Err(err) => {
            log::error!("Error reading {}: {err}", path.display());
            store.set_status(ImportStatus::Error);
            return Err(err);
        }
    };
    import_config_from_text(store, &text)
}

fn parse_config_text(text: &str) -> Result<Value, AppError> {
    // 部分编辑器会在 UTF-8 文件开头写入 BOM
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    if text.trim().is_empty() {
        return Err(AppError::InvalidJson("输入为空".into()));
    }
    serde_json::from_str(text).map_err(|e| AppError::InvalidJson(e.to_string()))
}

/// 2 空格缩进的 JSON（“另存为”文件内容）
pub fn to_pretty_json(root: &Value) -> Result<String, AppError> {
    serde_json::to_string_pretty(root).map_err(|e| AppError::JsonSerialize { source: e })
}

/// 转义后可放入双引号 shell 字符串：先转义双引号，再把换行替换为 `\n`
pub fn escape_for_shell(json: &str) -> String {
    json.replace('"', "\\\"").replace('\n', "\\n")
}

/// 覆盖目标文件的保存命令
pub fn build_save_command(root: &Value) -> Result<String, AppError> {
    let json = to_pretty_json(root)?;
    Ok(format!(
        "echo \"{}\" > {}",
        escape_for_shell(&json),
        CLAUDE_DESKTOP_CONFIG_SHELL_PATH
    ))
}

/// 读取目标文件到剪贴板的命令；文件不存在时写入默认骨架
pub fn build_load_command() -> String {
    let path = CLAUDE_DESKTOP_CONFIG_SHELL_PATH;
    let skeleton = DEFAULT_CONFIG_SKELETON.replace('\n', "\\n");
    format!(
        "test -f {path} && pbcopy < {path} || (echo '{skeleton}' | tee {path} | pbcopy)"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_input_is_a_parse_failure() {
        let mut store = ConfigStore::new();
        let err = import_config_from_text(&mut store, "   ").expect_err("empty");
        assert!(err.is_parse_error());
        assert_eq!(store.status(), ImportStatus::Error);
    }

    #[test]
    fn failed_import_keeps_previous_configuration() {
        let mut store = ConfigStore::new();
        import_config_from_text(&mut store, r#"{"mcpServers":{"a":{"command":"x","args":[]}}}"#)
            .expect("first import");
        let before = store.root().clone();

        assert!(import_config_from_text(&mut store, "{not json").is_err());
        assert_eq!(store.root(), &before);
        assert_eq!(store.status(), ImportStatus::Error);
    }

    #[test]
    fn error_status_does_not_stick_to_next_import() {
        let mut store = ConfigStore::new();
        let _ = import_config_from_text(&mut store, "nope");
        assert_eq!(store.status(), ImportStatus::Error);
        import_config_from_text(&mut store, "{}").expect("valid");
        assert_eq!(store.status(), ImportStatus::Success);
    }

    #[test]
    fn unreadable_file_replaces_previous_success_status() {
        let mut store = ConfigStore::new();
        import_config_from_text(&mut store, r#"{"mcpServers":{"a":{"command":"x"}}}"#)
            .expect("first import");
        assert_eq!(store.status(), ImportStatus::Success);

        let result = import_config_from_path(&mut store, Path::new("/no/such/config.json"));
        assert!(result.is_err());
        assert_eq!(store.status(), ImportStatus::Error);
        assert_eq!(store.server_names(), vec!["a".to_string()]);
    }

    #[test]
    fn byte_order_mark_is_ignored() {
        let mut store = ConfigStore::new();
        import_config_from_text(&mut store, "\u{feff}{\"mcpServers\":{}}").expect("bom");
        assert_eq!(store.status(), ImportStatus::Success);

        let err = import_config_from_text(&mut store, "\u{feff}").expect_err("bom only");
        assert!(err.is_parse_error());
    }

    #[test]
    fn import_replaces_instead_of_merging() {
        let mut store = ConfigStore::new();
        import_config_from_text(&mut store, r#"{"mcpServers":{"a":{"command":"x"}}}"#)
            .expect("first");
        import_config_from_text(&mut store, r#"{"mcpServers":{"b":{"command":"y"}}}"#)
            .expect("second");
        assert_eq!(store.server_names(), vec!["b".to_string()]);
    }

    #[test]
    fn non_object_json_is_accepted_with_zero_servers() {
        let mut store = ConfigStore::new();
        import_config_from_text(&mut store, "[1, 2]").expect("array accepted");
        assert_eq!(store.status(), ImportStatus::Success);
        assert_eq!(store.server_count(), 0);
        assert_eq!(store.root(), &json!([1, 2]));
    }

    #[test]
    fn missing_file_reports_error_status() {
        let mut store = ConfigStore::new();
        let result = import_config_from_path(&mut store, Path::new("/no/such/config.json"));
        assert!(matches!(result, Err(AppError::Io { .. })));
        assert_eq!(store.status(), ImportStatus::Error);
    }

    #[test]
    fn escaping_touches_only_quotes_and_newlines() {
        assert_eq!(escape_for_shell("{\n  \"a\": 'b' $x\t}"), "{\\n  \\\"a\\\": 'b' $x\t}");
    }

    #[test]
    fn load_command_matches_expected_shell() {
        assert_eq!(
            build_load_command(),
            "test -f ~/Library/Application\\ Support/Claude/claude_desktop_config.json && pbcopy < ~/Library/Application\\ Support/Claude/claude_desktop_config.json || (echo '{\\n  \"mcpServers\": {}\\n}' | tee ~/Library/Application\\ Support/Claude/claude_desktop_config.json | pbcopy)"
        );
    }

    #[test]
    fn pretty_json_uses_two_space_indent() {
        let json = to_pretty_json(&json!({"a": [1]})).expect("serialize");
        assert_eq!(json, "{\n  \"a\": [\n    1\n  ]\n}");
    }
}
