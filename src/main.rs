// SPDX-License-Identifier: MIT
//
// weft: demo form for the weft widget toolkit.
//
// This is the binary that wires the crates together:
//
//   weft-term    → terminal control, draw targets, input parsing, event loop
//   weft-edit    → the modal EditBox and its line buffer
//   weft-widgets → stock controls and the focus-managed container
//
// Layout:
//
//   ┌─────────────────────────────────────────────────────────┐
//   │ Greetings:                 [ ] Enable the whateverthing │
//   │ ┌───┐   ┌─────────────┐    ┌────────┐                   │
//   │ │12 │   │Greetings!   │    │ Contin │                   │
//   │ └───┘   └─────────────┘    └────────┘                   │
//   │ ┌ EditBox (SQL) ─────────────┐                          │
//   │ │ ...                        │                          │
//   │ └────────────────────────────┘                          │
//   │ ┌ DetailView ───────────┐                               │
//   │ └───────────────────────┘                               │
//   └─────────────────────────────────────────────────────────┘
//
// Usage: weft [--config <path>] [--log]
//
//   --config <path>  read settings from <path> instead of ./weft.toml
//   --log            write tracing output to ./weft.log (RUST_LOG filters)
//
// Tab and shift-tab move focus, Ctrl-C quits.

mod config;
mod dialect;

use std::env;
use std::path::{Path, PathBuf};
use std::process;

use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use weft_edit::{Dialect, EditBox};
use weft_term::surface::Rect;
use weft_widgets::{Button, CheckBox, Column, Container, DetailView, Label, TextBox};

use crate::config::Config;
use crate::dialect::sql_dialect;

// ─── Arguments ──────────────────────────────────────────────────────────────

#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    config: Option<PathBuf>,
    log: bool,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args, String> {
    let mut parsed = Args::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--log" => parsed.log = true,
            "--config" => {
                let path = args.next().ok_or("--config needs a path")?;
                parsed.config = Some(PathBuf::from(path));
            }
            other => return Err(format!("unknown argument `{other}`")),
        }
    }
    Ok(parsed)
}

// ─── Logging ────────────────────────────────────────────────────────────────

/// Send tracing output to `weft.log` in the working directory.
///
/// The returned guard flushes the writer when dropped, so it must live
/// until the program exits. `None` when a subscriber is already set.
fn init_logging() -> Option<WorkerGuard> {
    let appender = tracing_appender::rolling::never(".", "weft.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .ok()
        .map(|()| guard)
}

// ─── Form ───────────────────────────────────────────────────────────────────

fn detail_rows() -> Vec<Vec<String>> {
    [
        ["3", "A", "Other details"],
        ["7", "B", "Yes very many details"],
        ["13", "C", "Such an informative table"],
        ["17", "D", "Abcdefghijklmnopqrst"],
    ]
    .iter()
    .map(|row| row.iter().map(|s| (*s).to_string()).collect())
    .collect()
}

/// Build the demo form. Focus starts on the first text box.
fn build_form(config: &Config, dialect: impl Dialect + 'static) -> Container {
    let style = config.demo.style;

    let mut first = TextBox::new(Rect::new(2, 2, 5, 3), "12");
    first.style = style;

    let mut detail = DetailView::new(
        Rect::new(2, 16, 25, 6),
        vec![
            Column::new("ID", 3),
            Column::new("Name", 5),
            Column::new("More Data", 20),
        ],
    )
    .with_rows(detail_rows());
    detail.style = style;
    detail.colors = config.demo.rows;

    let mut edit = EditBox::new(config.edit.clone());
    edit.set_bounds(Rect::new(2, 6, 30, 10));
    edit.set_dialect(dialect);
    edit.set_text(&config.demo.initial_text);
    edit.on_change(|backend| {
        tracing::debug!(lines = backend.line_count(), "editbox text changed");
    });

    let mut greeting = Label::new(Rect::new(2, 1, 20, 1), "Greetings:");
    greeting.style = style;

    let mut second = TextBox::new(Rect::new(10, 2, 15, 3), "Greetings!");
    second.style = style;

    let mut checkbox = CheckBox::new(Rect::new(27, 1, 30, 1), "Enable the whateverthing");
    checkbox.style = style;

    let mut button = Button::new(Rect::new(27, 2, 10, 3), "Continue!").on_click(|b| {
        info!("button clicked");
        b.text = "Clicked!".to_string();
    });
    button.style = style;

    let mut form = Container::new();
    form.add(first);
    form.add(detail);
    form.add(edit);
    form.add(greeting);
    form.add(second);
    form.add(checkbox);
    form.add(button);
    form
}

// ─── Entry point ────────────────────────────────────────────────────────────

fn main() {
    let args = parse_args(env::args().skip(1)).unwrap_or_else(|e| {
        eprintln!("weft: {e}");
        eprintln!("usage: weft [--config <path>] [--log]");
        process::exit(2);
    });

    let _log_guard = if args.log { init_logging() } else { None };

    let path = args
        .config
        .as_deref()
        .unwrap_or_else(|| Path::new(config::DEFAULT_PATH));
    let config = Config::load(path).unwrap_or_else(|e| {
        eprintln!("weft: {e}");
        process::exit(1);
    });

    let dialect = sql_dialect().unwrap_or_else(|e| {
        eprintln!("weft: bad type pattern: {e}");
        process::exit(1);
    });

    info!(config = %path.display(), "starting");
    if let Err(e) = weft_widgets::run(build_form(&config, dialect)) {
        eprintln!("weft: {e}");
        process::exit(1);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
