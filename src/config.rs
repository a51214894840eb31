use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::history::DEFAULT_CAPACITY;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Auto,
    Light,
    Dark,
}

/// Where math is typeset.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathMode {
    /// Leave delimited TeX in the page for KaTeX auto-render.
    Client,
    /// Convert to MathML while rendering.
    Mathml,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub watch: bool,
    pub standalone: bool,
    pub no_line_numbers: bool,
    pub theme: Option<ThemeMode>,
    pub math: Option<MathMode>,
    pub history_limit: Option<usize>,
    pub log_file: Option<PathBuf>,
}

impl ConfigFlags {
    pub fn union(&self, other: &Self) -> Self {
        Self {
            watch: self.watch || other.watch,
            standalone: self.standalone || other.standalone,
            no_line_numbers: self.no_line_numbers || other.no_line_numbers,
            theme: other.theme.or(self.theme),
            math: other.math.or(self.math),
            history_limit: other.history_limit.or(self.history_limit),
            log_file: other.log_file.clone().or_else(|| self.log_file.clone()),
        }
    }

    pub fn math_mode(&self) -> MathMode {
        self.math.unwrap_or(MathMode::Client)
    }

    pub fn history_capacity(&self) -> usize {
        self.history_limit.unwrap_or(DEFAULT_CAPACITY)
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("markpad").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("markpad")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("markpad").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("markpad")
                .join("config");
        }
    }

    PathBuf::from(".markpadrc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".markpadrc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# markpad defaults (saved with --save)".to_string()];
    if flags.watch {
        lines.push("--watch".to_string());
    }
    if flags.standalone {
        lines.push("--standalone".to_string());
    }
    if flags.no_line_numbers {
        lines.push("--no-line-numbers".to_string());
    }
    if let Some(theme) = flags.theme {
        let theme_str = match theme {
            ThemeMode::Auto => "auto",
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        };
        lines.push(format!("--theme {theme_str}"));
    }
    if let Some(math) = flags.math {
        let math_str = match math {
            MathMode::Client => "client",
            MathMode::Mathml => "mathml",
        };
        lines.push(format!("--math {math_str}"));
    }
    if let Some(limit) = flags.history_limit {
        lines.push(format!("--history-limit {limit}"));
    }
    if let Some(path) = &flags.log_file {
        lines.push(format!("--log-file {}", path.display()));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick known flags out of a token list; anything else is ignored.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        let (name, inline_value) = match token.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (token, None),
        };
        // Value-taking flags accept `--flag value` and `--flag=value`.
        let mut value = || match inline_value {
            Some(value) => Some(value),
            None => {
                let next = tokens.get(i + 1).map(String::as_str);
                if next.is_some() {
                    i += 1;
                }
                next
            }
        };
        match name {
            "--watch" => flags.watch = true,
            "--standalone" => flags.standalone = true,
            "--no-line-numbers" => flags.no_line_numbers = true,
            "--theme" => flags.theme = value().and_then(parse_theme),
            "--math" => flags.math = value().and_then(parse_math),
            "--history-limit" => {
                flags.history_limit = value()
                    .and_then(|v| v.parse::<usize>().ok())
                    .filter(|limit| *limit > 0);
            }
            "--log-file" => flags.log_file = value().map(PathBuf::from),
            _ => {}
        }
        i += 1;
    }
    flags
}

fn parse_theme(s: &str) -> Option<ThemeMode> {
    match s {
        "auto" => Some(ThemeMode::Auto),
        "light" => Some(ThemeMode::Light),
        "dark" => Some(ThemeMode::Dark),
        _ => None,
    }
}

fn parse_math(s: &str) -> Option<MathMode> {
    match s {
        "client" => Some(MathMode::Client),
        "mathml" => Some(MathMode::Mathml),
        _ => None,
    }
}
