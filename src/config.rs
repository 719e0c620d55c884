// SPDX-License-Identifier: MIT
//
// Demo configuration, read from `weft.toml`.
//
// Every key is optional. A missing file is not an error: the demo runs
// with the defaults. A file that exists but cannot be read or parsed is.
//
//   [edit]
//   tab_width = 2
//
//   [edit.palette]
//   keyword = "#5fafff"
//
//   [demo]
//   initial_text = "select 1"
//
//   [demo.rows]
//   selected_bg = "28"

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use weft_edit::EditOptions;
use weft_widgets::{RowColors, Style};

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_PATH: &str = "weft.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub edit: EditOptions,
    #[serde(default)]
    pub demo: DemoConfig,
}

/// Content and colors of the demo form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DemoConfig {
    /// Text the EditBox starts with.
    #[serde(default = "default_initial_text")]
    pub initial_text: String,
    /// Style of the stock controls.
    #[serde(default)]
    pub style: Style,
    /// Row colors of the detail view.
    #[serde(default)]
    pub rows: RowColors,
}

fn default_initial_text() -> String {
    "select id, name\nfrom users\nwhere note = 'it''s';".to_string()
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            initial_text: default_initial_text(),
            style: Style::default(),
            rows: RowColors::default(),
        }
    }
}

impl Config {
    /// Parse a config from TOML text.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] when the text is not valid TOML or a value
    /// has the wrong type. `origin` only labels the error.
    pub fn from_toml(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Load `path`, falling back to the defaults when it does not exist.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] when the file exists but cannot be read, and
    /// [`ConfigError::Parse`] when its contents are invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(text) => Self::from_toml(&text, path),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use weft_term::color::CellColor;

    fn parse(text: &str) -> Config {
        Config::from_toml(text, Path::new("test.toml")).unwrap()
    }

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(parse(""), Config::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = parse(
            r##"
            [edit]
            tab_width = 2

            [edit.palette]
            keyword = "#5fafff"

            [demo.rows]
            selected_bg = "28"
            "##,
        );
        assert_eq!(config.edit.tab_width, 2);
        assert_eq!(config.edit.indent_width, 4);
        assert_eq!(config.edit.palette.keyword, CellColor::Rgb(0x5f, 0xaf, 0xff));
        assert_eq!(config.demo.rows.selected_bg, CellColor::Ansi256(28));
        assert_eq!(config.demo.rows.row_bg_alt, RowColors::default().row_bg_alt);
        assert_eq!(config.demo.initial_text, default_initial_text());
    }

    #[test]
    fn wrong_type_is_a_parse_error() {
        let err = Config::from_toml("[edit]\ntab_width = \"wide\"", Path::new("bad.toml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().starts_with("invalid config in bad.toml"));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = Config::load(Path::new("/nonexistent/weft/config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn directory_is_an_io_error() {
        let err = Config::load(&std::env::temp_dir()).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
