//! Terminal styling. Plain ANSI escapes, switched off wholesale by
//! `enable_colors = false`.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Title,
    Heading,
    Muted,
    Error,
    Warning,
    Command,
    Success,
    Prompt,
}

impl Style {
    fn code(&self) -> &'static str {
        match self {
            Style::Title => "1;36",
            Style::Heading => "1;34",
            Style::Muted => "3;90",
            Style::Error => "1;31",
            Style::Warning => "1;33",
            Style::Command => "1;37",
            Style::Success => "1;32",
            Style::Prompt => "1;35",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn paint(&self, style: Style, text: &str) -> String {
        if self.enabled {
            format!("\x1b[{}m{}\x1b[0m", style.code(), text)
        } else {
            text.to_string()
        }
    }
}
