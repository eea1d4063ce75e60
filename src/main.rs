//! Halfnote - inline formatting for reviews and comments.
//!
//! # Usage
//!
//! ```bash
//! halfnote render review.txt
//! echo 'a **b**' | halfnote parse --pretty
//! halfnote toggle --style bold --start 0 --end 5 review.txt
//! halfnote edit review.txt
//! ```

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use halfnote::app::App;
use halfnote::config::{
    ConfigFlags, ThemeMode, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, parse_flag_tokens, save_config_flags,
};
use halfnote::markup::{FormattedText, Selection, StyleKind, active_styles, toggle_markup};
use halfnote::perf;
use halfnote::ui::ansi::render_ansi;

/// Lightweight inline formatting for reviews and comments
#[derive(Parser, Debug)]
#[command(name = "halfnote", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Color theme for the composer
    #[arg(long, value_enum, global = true)]
    theme: Option<ThemeMode>,

    /// Print timing information to stderr
    #[arg(long, global = true)]
    perf: bool,

    /// Write composer events to a file
    #[arg(long, value_name = "PATH", global = true)]
    debug_log: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long, global = true)]
    save: bool,

    /// Clear saved defaults
    #[arg(long, global = true)]
    clear: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print formatted text with terminal styling
    Render {
        /// Review file (reads stdin if omitted)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Print the text without delimiters or styling
        #[arg(long)]
        plain: bool,
    },
    /// Print the parsed lines as JSON
    Parse {
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Indent the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Wrap a byte range in a style's delimiters and print the edit as JSON
    Toggle {
        #[arg(long, value_enum)]
        style: StyleKind,

        /// Selection start (byte offset)
        #[arg(long)]
        start: usize,

        /// Selection end (byte offset, defaults to start)
        #[arg(long)]
        end: Option<usize>,

        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },
    /// Print the styles open at a caret offset as JSON
    Active {
        /// Caret position (byte offset)
        #[arg(long)]
        caret: usize,

        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },
    /// Compose a review interactively
    Edit {
        /// Review file (created on first save)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Hide the formatted preview pane
        #[arg(long)]
        no_preview: bool,

        /// Open without allowing edits
        #[arg(long)]
        read_only: bool,
    },
}

fn read_input(file: Option<&Path>) -> Result<String> {
    let _scope = perf::scope("input.read");
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

fn write_stdout(output: &str) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{output}").context("Failed to write output")
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

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
        tracing::debug!(path = %global_path.display(), "saved default flags");
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);
    tracing::debug!(?effective, "effective flags");

    perf::set_enabled(effective.perf);
    if let Err(err) = perf::set_debug_log_path(effective.debug_log.as_deref()) {
        tracing::warn!(
            path = ?effective.debug_log,
            %err,
            "failed to initialize debug log"
        );
    }

    match cli.command {
        Command::Render { file, plain } => {
            let text = read_input(file.as_deref())?;
            let doc = {
                let _scope = perf::scope("markup.parse");
                FormattedText::parse(&text)
            };
            let output = if plain || effective.plain {
                doc.plain_text()
            } else {
                render_ansi(&doc)
            };
            write_stdout(&output)
        }
        Command::Parse { file, pretty } => {
            let text = read_input(file.as_deref())?;
            let doc = FormattedText::parse(&text);
            let json = if pretty {
                serde_json::to_string_pretty(doc.lines())?
            } else {
                serde_json::to_string(doc.lines())?
            };
            write_stdout(&json)
        }
        Command::Toggle {
            style,
            start,
            end,
            file,
        } => {
            let text = read_input(file.as_deref())?;
            let selection = Selection::checked(&text, start, end.unwrap_or(start))?;
            let edit = toggle_markup(&text, selection.start, selection.end, style);
            tracing::debug!(style = style.name(), caret = edit.caret, "toggled");
            write_stdout(&serde_json::to_string(&edit)?)
        }
        Command::Active { caret, file } => {
            let text = read_input(file.as_deref())?;
            let caret = Selection::checked(&text, caret, caret)?.start;
            write_stdout(&serde_json::to_string(&active_styles(&text, caret))?)
        }
        Command::Edit {
            file,
            no_preview,
            read_only,
        } => {
            let mut app = App::new(file)
                .with_preview(!(no_preview || effective.no_preview))
                .with_read_only(read_only)
                .with_theme(effective.theme.unwrap_or_default());
            app.run().context("Application error")
        }
    }
}
