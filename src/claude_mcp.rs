use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::AppError;

/// mcpServers 中的单个服务器定义
///
/// 只对 `command` 与 `args` 建模，其余字段（如 `env`）原样保留。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McpServerEntry {
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl McpServerEntry {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
            extra: Map::new(),
        }
    }

    /// 从 JSON 值解析；形状不符时返回 None（此类条目只读展示）
    pub fn from_value(value: &Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }

    pub fn to_value(&self) -> Result<Value, AppError> {
        serde_json::to_value(self).map_err(|e| AppError::JsonSerialize { source: e })
    }
}

/// 标记 args 中某个位置可由用户编辑的元数据（不写入 JSON）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableBinding {
    /// 显示名，同一条目内唯一
    pub name: String,
    /// 当前值，对应 args[arg_index]
    pub value: String,
    pub arg_index: usize,
}

impl VariableBinding {
    pub fn new(name: impl Into<String>, value: impl Into<String>, arg_index: usize) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            arg_index,
        }
    }
}

/// 已知服务器类型：按 command 与包名识别，声明可编辑参数位置
#[derive(Debug, Clone, Copy)]
pub struct KnownServer {
    pub kind: &'static str,
    pub command: &'static str,
    pub package: &'static str,
    pub variables: &'static [(&'static str, usize)],
}

pub const KNOWN_SERVERS: &[KnownServer] = &[
    KnownServer {
        kind: "filesystem",
        command: "npx",
        package: "@modelcontextprotocol/server-filesystem",
        variables: &[("path", 2)],
    },
    KnownServer {
        kind: "postgres",
        command: "npx",
        package: "@modelcontextprotocol/server-postgres",
        variables: &[("database url", 2)],
    },
    KnownServer {
        kind: "sqlite",
        command: "uvx",
        package: "mcp-server-sqlite",
        variables: &[("db path", 2)],
    },
    KnownServer {
        kind: "git",
        command: "uvx",
        package: "mcp-server-git",
        variables: &[("repository", 2)],
    },
];

impl KnownServer {
    pub fn matches(&self, entry: &McpServerEntry) -> bool {
        entry.command == self.command && entry.args.iter().any(|a| a == self.package)
    }
}

pub fn known_server_for(entry: &McpServerEntry) -> Option<&'static KnownServer> {
    KNOWN_SERVERS.iter().find(|k| k.matches(entry))
}

/// 为条目生成可编辑变量；越界的声明直接跳过
pub fn variable_bindings_for(entry: &McpServerEntry) -> Vec<VariableBinding> {
    let Some(known) = known_server_for(entry) else {
        return Vec::new();
    };

    known
        .variables
        .iter()
        .filter_map(|(name, idx)| {
            let value = entry.args.get(*idx)?;
            Some(VariableBinding::new(*name, value.clone(), *idx))
        })
        .collect()
}

/// 取出根对象中的 mcpServers；根不是对象或缺少该字段时返回 None
pub fn servers_object(root: &Value) -> Option<&Map<String, Value>> {
    root.get("mcpServers").and_then(|v| v.as_object())
}

pub fn servers_object_mut(root: &mut Value) -> Result<&mut Map<String, Value>, AppError> {
    let obj = root
        .as_object_mut()
        .ok_or_else(|| AppError::Config("配置根必须是 JSON 对象".into()))?;
    if !obj.contains_key("mcpServers") {
        obj.insert("mcpServers".into(), Value::Object(Map::new()));
    }
    obj.get_mut("mcpServers")
        .and_then(|v| v.as_object_mut())
        .ok_or_else(|| AppError::Config("mcpServers 必须是 JSON 对象".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(command: &str, args: &[&str]) -> McpServerEntry {
        McpServerEntry::new(command, args.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn extra_fields_survive_a_parse_cycle() {
        let raw = json!({
            "command": "npx",
            "args": ["-y", "pkg"],
            "env": {"TOKEN": "t"}
        });
        let parsed = McpServerEntry::from_value(&raw).expect("parse entry");
        assert_eq!(parsed.extra.get("env"), Some(&json!({"TOKEN": "t"})));
        assert_eq!(parsed.to_value().expect("to value"), raw);
    }

    #[test]
    fn non_string_args_are_not_an_entry() {
        assert!(McpServerEntry::from_value(&json!({"command": "x", "args": [1]})).is_none());
        assert!(McpServerEntry::from_value(&json!("scalar")).is_none());
    }

    #[test]
    fn filesystem_server_exposes_path_binding() {
        let e = entry(
            "npx",
            &["-y", "@modelcontextprotocol/server-filesystem", "/Users/me/Desktop"],
        );
        assert_eq!(
            variable_bindings_for(&e),
            vec![VariableBinding::new("path", "/Users/me/Desktop", 2)]
        );
    }

    #[test]
    fn declaration_out_of_range_yields_no_binding() {
        let e = entry("uvx", &["mcp-server-git"]);
        assert!(known_server_for(&e).is_some());
        assert!(variable_bindings_for(&e).is_empty());
    }

    #[test]
    fn unknown_servers_have_no_bindings() {
        assert!(variable_bindings_for(&entry("echo", &["hi"])).is_empty());
    }

    #[test]
    fn servers_object_mut_creates_missing_map_and_rejects_non_objects() {
        let mut root = json!({"other": 1});
        servers_object_mut(&mut root).expect("create map");
        assert_eq!(root, json!({"other": 1, "mcpServers": {}}));

        let mut array = json!([1, 2]);
        assert!(servers_object_mut(&mut array).is_err());

        let mut bad = json!({"mcpServers": []});
        assert!(servers_object_mut(&mut bad).is_err());
    }
}
