use serde_json::{Map, Value};

use crate::claude_mcp::{servers_object, servers_object_mut, McpServerEntry};
use crate::error::AppError;

/// 导入状态：每次导入前重置为 Idle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportStatus {
    #[default]
    Idle,
    Success,
    Error,
}

/// 会话内的配置存储（唯一数据源，不落盘）
#[derive(Debug, Clone)]
pub struct ConfigStore {
    root: Value,
    status: ImportStatus,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self {
            root: Value::Object(Map::new()),
            status: ImportStatus::Idle,
        }
    }
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_value(root: Value) -> Self {
        Self {
            root,
            status: ImportStatus::Idle,
        }
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn status(&self) -> ImportStatus {
        self.status
    }

    pub(crate) fn set_status(&mut self, status: ImportStatus) {
        self.status = status;
    }

    /// 整体替换（导入成功时调用），不做合并
    pub(crate) fn replace(&mut self, root: Value) {
        self.root = root;
    }

    /// 空对象视为“尚未加载”
    pub fn is_empty(&self) -> bool {
        match &self.root {
            Value::Object(map) => map.is_empty(),
            _ => false,
        }
    }

    pub fn server_names(&self) -> Vec<String> {
        servers_object(&self.root)
            .map(|m| m.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn server_count(&self) -> usize {
        servers_object(&self.root).map(|m| m.len()).unwrap_or(0)
    }

    pub fn raw_server(&self, name: &str) -> Option<&Value> {
        servers_object(&self.root).and_then(|m| m.get(name))
    }

    pub fn server(&self, name: &str) -> Option<McpServerEntry> {
        self.raw_server(name).and_then(McpServerEntry::from_value)
    }

    /// 按源 JSON 顺序列出所有服务器；无法识别形状的条目为 None
    pub fn servers(&self) -> Vec<(String, Option<McpServerEntry>)> {
        servers_object(&self.root)
            .map(|m| {
                m.iter()
                    .map(|(k, v)| (k.clone(), McpServerEntry::from_value(v)))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// 写回单个服务器定义
    ///
    /// 已存在的键保持原位置，新条目中不存在的键被移除，新增键追加在末尾。
    pub fn update_server(&mut self, name: &str, entry: &McpServerEntry) -> Result<(), AppError> {
        if name.trim().is_empty() {
            return Err(AppError::InvalidInput("MCP 服务器名称不能为空".into()));
        }
        let Value::Object(new_obj) = entry.to_value()? else {
            return Err(AppError::Config(format!("MCP 服务器 '{name}' 不是对象")));
        };

        let servers = servers_object_mut(&mut self.root)?;
        let merged = match servers.get(name).and_then(|v| v.as_object()) {
            Some(existing) => {
                let mut merged = existing.clone();
                merged.retain(|k, _| new_obj.contains_key(k));
                for (k, v) in new_obj {
                    merged.insert(k, v);
                }
                merged
            }
            None => new_obj,
        };

        servers.insert(name.to_string(), Value::Object(merged));
        log::debug!("updated MCP server '{name}'");
        Ok(())
    }

    /// 删除服务器，返回是否存在
    pub fn delete_server(&mut self, name: &str) -> Result<bool, AppError> {
        let Some(servers) = self
            .root
            .get_mut("mcpServers")
            .and_then(|v| v.as_object_mut())
        else {
            return Ok(false);
        };
        // shift_remove 保持其余键的顺序
        let existed = servers.shift_remove(name).is_some();
        if existed {
            log::debug!("deleted MCP server '{name}'");
        }
        Ok(existed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_store_is_empty_and_idle() {
        let store = ConfigStore::new();
        assert!(store.is_empty());
        assert_eq!(store.status(), ImportStatus::Idle);
        assert_eq!(store.server_count(), 0);
    }

    #[test]
    fn delete_removes_only_the_named_server() {
        let mut store = ConfigStore::from_value(json!({
            "mcpServers": {
                "foo": {"command": "a", "args": []},
                "bar": {"command": "b", "args": []}
            }
        }));

        assert!(store.delete_server("foo").expect("delete"));
        assert_eq!(store.server_names(), vec!["bar".to_string()]);
        assert!(!store.delete_server("foo").expect("second delete"));
    }

    #[test]
    fn delete_on_document_without_servers_is_a_noop() {
        let mut store = ConfigStore::from_value(json!([1, 2, 3]));
        assert!(!store.delete_server("foo").expect("delete"));
        assert_eq!(store.root(), &json!([1, 2, 3]));
    }

    #[test]
    fn update_keeps_key_positions_and_siblings() {
        let mut store = ConfigStore::from_value(json!({
            "mcpServers": {
                "first": {"args": ["x"], "env": {"A": "1"}, "command": "c"},
                "second": {"command": "d", "args": []}
            },
            "globalShortcut": "Ctrl+Space"
        }));

        let mut entry = store.server("first").expect("entry");
        entry.args[0] = "y".into();
        store.update_server("first", &entry).expect("update");

        let first = store.raw_server("first").expect("raw").as_object().expect("obj");
        let keys: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["args", "env", "command"]);
        assert_eq!(first["args"], json!(["y"]));
        assert_eq!(store.server_names(), vec!["first", "second"]);
        assert_eq!(store.root()["globalShortcut"], json!("Ctrl+Space"));
    }

    #[test]
    fn update_on_non_object_root_is_a_structural_error() {
        let mut store = ConfigStore::from_value(json!("scalar"));
        let err = store
            .update_server("x", &McpServerEntry::new("echo", vec![]))
            .expect_err("scalar root");
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn servers_lists_unrecognised_shapes_as_none() {
        let store = ConfigStore::from_value(json!({
            "mcpServers": {
                "ok": {"command": "echo", "args": ["hi"]},
                "remote": {"url": "https://example.com/mcp"}
            }
        }));
        let servers = store.servers();
        assert_eq!(servers.len(), 2);
        assert!(servers[0].1.is_some());
        assert!(servers[1].1.is_none());
    }
}
