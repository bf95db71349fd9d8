use std::fs;
use std::path::PathBuf;

use crate::config::atomic_write;
use crate::error::AppError;

/// 写入系统剪贴板的能力
pub trait ClipboardWriter {
    fn write_text(&mut self, text: &str) -> Result<(), AppError>;
}

/// 将文件交给用户（“下载”）的能力，返回写出的路径
pub trait FileDownloader {
    fn download(&mut self, file_name: &str, mime: &str, contents: &[u8])
        -> Result<PathBuf, AppError>;
}

/// 基于 arboard 的系统剪贴板，首次写入时才连接
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardWriter for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), AppError> {
        if self.inner.is_none() {
            let cb = arboard::Clipboard::new().map_err(|e| AppError::Clipboard(e.to_string()))?;
            self.inner = Some(cb);
        }
        let Some(clipboard) = self.inner.as_mut() else {
            return Err(AppError::Clipboard("clipboard not initialized".into()));
        };
        clipboard
            .set_text(text.to_string())
            .map_err(|e| AppError::Clipboard(e.to_string()))?;
        log::debug!("copied {} bytes to clipboard", text.len());
        Ok(())
    }
}

/// 内存剪贴板，用于无桌面环境与测试
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
    pub writes: usize,
}

impl ClipboardWriter for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), AppError> {
        self.contents = Some(text.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// 写入指定目录的“下载”实现
#[derive(Debug, Clone)]
pub struct DirectoryDownloader {
    dir: PathBuf,
}

impl DirectoryDownloader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl FileDownloader for DirectoryDownloader {
    fn download(
        &mut self,
        file_name: &str,
        mime: &str,
        contents: &[u8],
    ) -> Result<PathBuf, AppError> {
        fs::create_dir_all(&self.dir).map_err(|e| AppError::io(&self.dir, e))?;
        let path = self.dir.join(file_name);
        atomic_write(&path, contents)?;
        log::info!("saved {} ({mime}, {} bytes)", path.display(), contents.len());
        Ok(path)
    }
}
