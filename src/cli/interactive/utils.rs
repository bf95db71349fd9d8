use std::time::Instant;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal;
use inquire::{Confirm, InquireError, Select, Text};

use crate::cli::i18n::texts;
use crate::cli::ui::success;
use crate::error::AppError;
use crate::services::TransientFlag;

pub fn pause() {
    let _ = Text::new(texts::press_enter())
        .with_default("")
        .prompt_skippable();
}

pub fn clear_screen() {
    let _ = console::Term::stdout().clear_screen();
}

/// Esc / Ctrl-C 视为取消，返回 None
fn cancelled_as_none<T>(result: Result<T, InquireError>) -> Result<Option<T>, AppError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

pub fn prompt_select<T: std::fmt::Display>(
    message: &str,
    options: Vec<T>,
) -> Result<Option<T>, AppError> {
    cancelled_as_none(Select::new(message, options).prompt())
}

pub fn prompt_confirm(message: &str, default: bool) -> Result<Option<bool>, AppError> {
    cancelled_as_none(Confirm::new(message).with_default(default).prompt())
}

pub fn prompt_text(
    message: &str,
    default: Option<&str>,
    help: Option<&str>,
) -> Result<Option<String>, AppError> {
    let mut prompt = Text::new(message);
    if let Some(default) = default {
        prompt = prompt.with_initial_value(default);
    }
    if let Some(help) = help {
        prompt = prompt.with_help_message(help);
    }
    cancelled_as_none(prompt.prompt())
}

/// 标志点亮期间应显示的“已复制”提示
fn copied_ack(flag: &TransientFlag, now: Instant) -> Option<&'static str> {
    flag.is_active_at(now).then(texts::copied_to_clipboard)
}

/// 显示“已复制”提示，到期或按任意键后将其擦除
pub fn show_copied_ack(flag: &mut TransientFlag) -> Result<(), AppError> {
    let Some(ack) = copied_ack(flag, Instant::now()) else {
        return Ok(());
    };
    println!("{}", success(ack));

    let waited = wait_for_key_while_active(flag);
    flag.clear();
    let _ = console::Term::stdout().clear_last_lines(1);
    waited
}

fn wait_for_key_while_active(flag: &TransientFlag) -> Result<(), AppError> {
    if terminal::enable_raw_mode().is_err() {
        // 非终端环境（如管道）直接等待到期
        if let Some(left) = flag.remaining() {
            std::thread::sleep(left);
        }
        return Ok(());
    }

    let result = poll_keys_while_active(flag);
    let _ = terminal::disable_raw_mode();
    result
}

fn poll_keys_while_active(flag: &TransientFlag) -> Result<(), AppError> {
    while let Some(left) = flag.remaining() {
        if !event::poll(left).map_err(|e| AppError::Message(e.to_string()))? {
            continue;
        }
        if let Event::Key(key) = event::read().map_err(|e| AppError::Message(e.to_string()))? {
            if key.kind == KeyEventKind::Press {
                break;
            }
        }
    }
    Ok(())
}
