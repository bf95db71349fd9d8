use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO 错误: {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON 序列化失败: {source}")]
    JsonSerialize {
        #[source]
        source: serde_json::Error,
    },
    #[error("无效的 JSON 内容: {0}")]
    InvalidJson(String),
    #[error("配置错误: {0}")]
    Config(String),
    #[error("无效输入: {0}")]
    InvalidInput(String),
    #[error("剪贴板不可用: {0}")]
    Clipboard(String),
    #[error("{0}")]
    Message(String),
}

impl AppError {
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().display().to_string(),
            source,
        }
    }

    /// Parse failures are reported with a generic message only.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::InvalidJson(_))
    }
}

impl From<inquire::InquireError> for AppError {
    fn from(err: inquire::InquireError) -> Self {
        Self::Message(format!("Prompt failed: {err}"))
    }
}
