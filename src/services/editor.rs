use indexmap::IndexMap;

use crate::claude_mcp::{variable_bindings_for, McpServerEntry, VariableBinding};
use crate::error::AppError;
use crate::store::ConfigStore;

/// 单个服务器条目的编辑状态
///
/// 本地值按变量名保存，初始化自各 binding 的当前值；保存前不影响配置。
#[derive(Debug, Clone)]
pub struct EntryEditor {
    server_name: String,
    entry: McpServerEntry,
    bindings: Vec<VariableBinding>,
    values: IndexMap<String, String>,
    has_changes: bool,
}

impl EntryEditor {
    pub fn new(
        server_name: impl Into<String>,
        entry: McpServerEntry,
        bindings: Vec<VariableBinding>,
    ) -> Self {
        let values = initial_values(&bindings);
        Self {
            server_name: server_name.into(),
            entry,
            bindings,
            values,
            has_changes: false,
        }
    }

    /// 使用内置的已知服务器目录生成 bindings
    pub fn for_server(store: &ConfigStore, server_name: &str) -> Option<Self> {
        let entry = store.server(server_name)?;
        let bindings = variable_bindings_for(&entry);
        Some(Self::new(server_name, entry, bindings))
    }

    /// 切换到另一个条目时重建本地状态；同名条目保留未保存的修改
    pub fn reset_for(
        &mut self,
        server_name: &str,
        entry: McpServerEntry,
        bindings: Vec<VariableBinding>,
    ) {
        if self.server_name == server_name {
            self.entry = entry;
            return;
        }
        *self = Self::new(server_name, entry, bindings);
    }

    pub fn server_name(&self) -> &str {
        &self.server_name
    }

    pub fn entry(&self) -> &McpServerEntry {
        &self.entry
    }

    pub fn bindings(&self) -> &[VariableBinding] {
        &self.bindings
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(|s| s.as_str())
    }

    pub fn has_changes(&self) -> bool {
        self.has_changes
    }

    /// 没有可编辑变量时只允许删除
    pub fn is_read_only(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> Result<(), AppError> {
        let Some(slot) = self.values.get_mut(name) else {
            return Err(AppError::InvalidInput(format!(
                "'{}' 没有名为 '{name}' 的变量",
                self.server_name
            )));
        };
        *slot = value.into();
        self.has_changes = true;
        Ok(())
    }

    /// 生成写回后的条目副本，仅修改各 binding 对应的 args 位置
    pub fn apply(&self) -> Result<McpServerEntry, AppError> {
        let mut updated = self.entry.clone();
        for binding in &self.bindings {
            let value = self
                .values
                .get(&binding.name)
                .cloned()
                .unwrap_or_else(|| binding.value.clone());
            let len = updated.args.len();
            let slot = updated.args.get_mut(binding.arg_index).ok_or_else(|| {
                AppError::Config(format!(
                    "变量 '{}' 的参数位置 {} 超出范围（args 长度 {len}）",
                    binding.name, binding.arg_index
                ))
            })?;
            *slot = value;
        }
        Ok(updated)
    }

    /// 保存：把更新后的条目交给 on_update；失败时记录日志并保留未保存的修改
    pub fn save_with<F>(&mut self, on_update: F) -> Result<(), AppError>
    where
        F: FnOnce(&str, &McpServerEntry) -> Result<(), AppError>,
    {
        let result = self
            .apply()
            .and_then(|updated| on_update(&self.server_name, &updated).map(|_| updated));

        match result {
            Ok(updated) => {
                for binding in &mut self.bindings {
                    if let Some(v) = updated.args.get(binding.arg_index) {
                        binding.value = v.clone();
                    }
                }
                self.entry = updated;
                self.has_changes = false;
                Ok(())
            }
            Err(err) => {
                log::error!("Error saving configuration for '{}': {err}", self.server_name);
                Err(err)
            }
        }
    }

    pub fn save(&mut self, store: &mut ConfigStore) -> Result<(), AppError> {
        self.save_with(|name, entry| store.update_server(name, entry))
    }

    /// 删除：交给 on_delete，返回条目是否存在
    pub fn delete_with<F>(&self, on_delete: F) -> Result<bool, AppError>
    where
        F: FnOnce(&str) -> Result<bool, AppError>,
    {
        on_delete(&self.server_name)
    }

    pub fn delete(&self, store: &mut ConfigStore) -> Result<bool, AppError> {
        self.delete_with(|name| store.delete_server(name))
    }
}

fn initial_values(bindings: &[VariableBinding]) -> IndexMap<String, String> {
    bindings
        .iter()
        .map(|b| (b.name.clone(), b.value.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run_entry() -> McpServerEntry {
        McpServerEntry::new("npx", vec!["run".into(), "abc".into()])
    }

    #[test]
    fn editing_marks_unsaved_without_touching_entry() {
        let mut editor = EntryEditor::new(
            "svc",
            run_entry(),
            vec![VariableBinding::new("token", "abc", 1)],
        );
        assert!(!editor.has_changes());

        editor.set_value("token", "xyz").expect("set");
        assert!(editor.has_changes());
        assert_eq!(editor.value("token"), Some("xyz"));
        assert_eq!(editor.entry().args[1], "abc");
    }

    #[test]
    fn unknown_field_is_rejected() {
        let mut editor = EntryEditor::new("svc", run_entry(), vec![]);
        assert!(editor.set_value("token", "x").is_err());
        assert!(!editor.has_changes());
        assert!(editor.is_read_only());
    }

    #[test]
    fn out_of_range_binding_keeps_pending_changes() {
        let mut editor = EntryEditor::new(
            "svc",
            run_entry(),
            vec![VariableBinding::new("extra", "", 5)],
        );
        editor.set_value("extra", "v").expect("set");

        let mut called = false;
        let err = editor
            .save_with(|_, _| {
                called = true;
                Ok(())
            })
            .expect_err("index 5 is out of range");
        assert!(matches!(err, AppError::Config(_)));
        assert!(!called);
        assert!(editor.has_changes());
        assert_eq!(editor.value("extra"), Some("v"));
    }

    #[test]
    fn failing_update_callback_keeps_pending_changes() {
        let mut editor = EntryEditor::new(
            "svc",
            run_entry(),
            vec![VariableBinding::new("token", "abc", 1)],
        );
        editor.set_value("token", "xyz").expect("set");

        let result = editor.save_with(|_, _| Err(AppError::Config("boom".into())));
        assert!(result.is_err());
        assert!(editor.has_changes());
        assert_eq!(editor.entry().args[1], "abc");
    }

    #[test]
    fn reset_for_other_server_rebuilds_values() {
        let mut editor = EntryEditor::new(
            "a",
            run_entry(),
            vec![VariableBinding::new("token", "abc", 1)],
        );
        editor.set_value("token", "changed").expect("set");

        editor.reset_for("a", run_entry(), vec![]);
        assert_eq!(editor.value("token"), Some("changed"));

        editor.reset_for(
            "b",
            McpServerEntry::new("uvx", vec!["x".into()]),
            vec![VariableBinding::new("name", "x", 0)],
        );
        assert_eq!(editor.server_name(), "b");
        assert_eq!(editor.value("token"), None);
        assert_eq!(editor.value("name"), Some("x"));
        assert!(!editor.has_changes());
    }

    #[test]
    fn for_server_uses_known_catalog() {
        let store = ConfigStore::from_value(json!({
            "mcpServers": {
                "sqlite": {"command": "uvx", "args": ["mcp-server-sqlite", "--db-path", "/tmp/a.db"]}
            }
        }));
        let editor = EntryEditor::for_server(&store, "sqlite").expect("editor");
        assert_eq!(editor.value("db path"), Some("/tmp/a.db"));
        assert!(EntryEditor::for_server(&store, "missing").is_none());
    }
}
