//! Markpad - render markdown with math, TOC and highlighted code to HTML.
//!
//! # Usage
//!
//! ```bash
//! markpad notes.md
//! markpad notes.md -o notes.html --standalone
//! markpad --watch notes.md -o notes.html
//! markpad --toc notes.md
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use markpad::config::{
    ConfigFlags, MathMode, ThemeMode, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, parse_flag_tokens, save_config_flags,
};
use markpad::highlight::{HighlightBackground, set_background_mode};
use markpad::logging;
use markpad::page::{PageOptions, standalone_page};
use markpad::render::{RenderOptions, Renderer};
use markpad::session::{Message, Session, update};
use markpad::toc::{outline, toc_tree};
use markpad::watcher::{DEFAULT_DEBOUNCE, DocumentWatcher};

const WATCH_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Render markdown with math, a table of contents and highlighted code
#[derive(Parser, Debug)]
#[command(name = "markpad", version, about, long_about = None)]
struct Cli {
    /// Markdown file to render
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Write HTML here instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Wrap the preview in a complete HTML page
    #[arg(long)]
    standalone: bool,

    /// Print the heading outline instead of HTML
    #[arg(long)]
    toc: bool,

    /// Re-render whenever FILE changes
    #[arg(short, long)]
    watch: bool,

    /// Leave code blocks without a line-number gutter
    #[arg(long)]
    no_line_numbers: bool,

    /// Syntax highlight theme background
    #[arg(long, value_enum, default_value = "auto")]
    theme: ThemeMode,

    /// Typeset math in the browser (KaTeX) or as MathML
    #[arg(long, value_enum, default_value = "client")]
    math: MathMode,

    /// Undo snapshots kept while watching
    #[arg(long, value_name = "N")]
    history_limit: Option<usize>,

    /// Write log events to a file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    logging::init(effective.log_file.as_deref()).context("Failed to initialize logging")?;

    match effective.theme.unwrap_or(ThemeMode::Auto) {
        ThemeMode::Auto => set_background_mode(None),
        ThemeMode::Light => set_background_mode(Some(HighlightBackground::Light)),
        ThemeMode::Dark => set_background_mode(Some(HighlightBackground::Dark)),
    }

    let source = fs::read_to_string(&cli.file)
        .with_context(|| format!("Failed to read {}", cli.file.display()))?;

    let render_options = RenderOptions {
        line_numbers: !effective.no_line_numbers,
        math: effective.math_mode(),
        ..RenderOptions::default()
    };
    let page_options = PageOptions {
        math: render_options.math,
        ..PageOptions::default()
    };
    let renderer = Renderer::new(render_options);
    let session = Session::with_options(&source, renderer, effective.history_capacity());

    if cli.toc {
        print!("{}", outline(&toc_tree(&session.preview.toc)));
        return Ok(());
    }

    let output = Output {
        path: cli.output.as_deref(),
        standalone: effective.standalone,
        page: &page_options,
    };
    output.write(&session)?;

    if effective.watch {
        watch(&cli.file, session, &output)?;
    }
    Ok(())
}

struct Output<'a> {
    path: Option<&'a Path>,
    standalone: bool,
    page: &'a PageOptions,
}

impl Output<'_> {
    fn write(&self, session: &Session) -> Result<()> {
        let html = if self.standalone {
            standalone_page(&session.preview, self.page).context("Failed to build page")?
        } else {
            session.preview.html.clone()
        };
        match self.path {
            Some(path) => fs::write(path, html)
                .with_context(|| format!("Failed to write {}", path.display())),
            None => {
                print!("{html}");
                Ok(())
            }
        }
    }
}

fn watch(file: &Path, mut session: Session, output: &Output<'_>) -> Result<()> {
    let mut watcher = DocumentWatcher::new(file, DEFAULT_DEBOUNCE)
        .with_context(|| format!("Failed to watch {}", file.display()))?;
    watcher.mark_seen(session.text());
    eprintln!("Watching {} (Ctrl+C to stop)", watcher.target_path().display());

    loop {
        match watcher.poll() {
            Ok(Some(content)) => {
                session = update(session, Message::Input(content));
                output.write(&session)?;
                tracing::info!(
                    headings = session.preview.toc.len(),
                    snapshots = session.history().len(),
                    "re-rendered"
                );
            }
            Ok(None) => {}
            Err(err) => tracing::warn!(%err, "reload failed"),
        }
        std::thread::sleep(WATCH_POLL_INTERVAL);
    }
}
