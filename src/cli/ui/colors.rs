use colored::Colorize;

use inquire::set_global_render_config;
use inquire::ui::{Color as InquireColor, RenderConfig, StyleSheet, Styled};

const ACCENT: InquireColor = InquireColor::LightCyan;

fn colors_disabled() -> bool {
    std::env::var_os("NO_COLOR").is_some()
}

/// Install the prompt theme used by the interactive menus.
pub fn apply_inquire_theme() {
    if colors_disabled() {
        set_global_render_config(RenderConfig::empty());
        return;
    }

    let cfg = RenderConfig::default_colored()
        .with_prompt_prefix(Styled::new("?").with_fg(ACCENT))
        .with_answered_prompt_prefix(Styled::new(">").with_fg(ACCENT))
        .with_highlighted_option_prefix(Styled::new(">").with_fg(ACCENT))
        .with_selected_option(Some(StyleSheet::new().with_fg(ACCENT)))
        .with_help_message(StyleSheet::new().with_fg(ACCENT))
        .with_answer(StyleSheet::new().with_fg(ACCENT));

    set_global_render_config(cfg);
}

pub fn success(text: &str) -> String {
    text.green().to_string()
}

pub fn error(text: &str) -> String {
    text.red().to_string()
}

pub fn warning(text: &str) -> String {
    text.yellow().to_string()
}

pub fn info(text: &str) -> String {
    text.cyan().to_string()
}

pub fn highlight(text: &str) -> String {
    text.bright_cyan().bold().to_string()
}
