//! Configuration file loading for the hot-seat front end.
//!
//! Settings live in a TOML file (`hotseat.toml` by default). Every field is
//! optional and a missing file yields the defaults.

use hotseat_core::PieceKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// The default promotion names a piece a pawn cannot become.
    #[error("Pawns cannot promote to {0:?}")]
    InvalidPromotion(PieceKind),
}

/// Front-end settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct HotseatConfig {
    /// Position notation to start from instead of the standard setup.
    #[serde(default)]
    pub start_position: Option<String>,
    /// Piece a pawn becomes when a move omits the promotion letter.
    #[serde(default = "default_promotion")]
    pub default_promotion: PieceKind,
    /// Draw the board from the side to move.
    #[serde(default = "default_auto_flip")]
    pub auto_flip: bool,
    /// List the legal moves after every board.
    #[serde(default)]
    pub show_legal_moves: bool,
}

fn default_promotion() -> PieceKind {
    PieceKind::Queen
}

fn default_auto_flip() -> bool {
    true
}

impl Default for HotseatConfig {
    fn default() -> Self {
        HotseatConfig {
            start_position: None,
            default_promotion: default_promotion(),
            auto_flip: default_auto_flip(),
            show_legal_moves: false,
        }
    }
}

impl HotseatConfig {
    /// Loads the configuration from `path`, or the defaults if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// [`ConfigError::ParseError`] if it is not valid TOML, and
    /// [`ConfigError::InvalidPromotion`] for a pawn or king default promotion.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::parse(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parses and validates configuration text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: HotseatConfig = toml::from_str(content)?;
        if !config.default_promotion.is_promotion_target() {
            return Err(ConfigError::InvalidPromotion(config.default_promotion));
        }
        Ok(config)
    }

    /// The default configuration path, `hotseat.toml` in the working directory.
    pub fn default_path() -> PathBuf {
        PathBuf::from("hotseat.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
start_position = "4k3/8/8/8/8/8/8/4K3 w - - 0 1"
default_promotion = "knight"
auto_flip = false
show_legal_moves = true
"#;

        let config = HotseatConfig::parse(toml_content).unwrap();

        assert_eq!(
            config.start_position.as_deref(),
            Some("4k3/8/8/8/8/8/8/4K3 w - - 0 1")
        );
        assert_eq!(config.default_promotion, PieceKind::Knight);
        assert!(!config.auto_flip);
        assert!(config.show_legal_moves);
    }

    #[test]
    fn test_empty_config_defaults() {
        let config = HotseatConfig::parse("").unwrap();
        assert_eq!(config, HotseatConfig::default());
        assert_eq!(config.default_promotion, PieceKind::Queen);
        assert!(config.auto_flip);
        assert!(!config.show_legal_moves);
    }

    #[test]
    fn test_rejects_king_promotion() {
        let result = HotseatConfig::parse("default_promotion = \"king\"");
        match result {
            Err(ConfigError::InvalidPromotion(kind)) => assert_eq!(kind, PieceKind::King),
            other => panic!("Expected InvalidPromotion, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_invalid_toml() {
        let result = HotseatConfig::parse("auto_flip = maybe");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let path = Path::new("definitely/not/here/hotseat.toml");
        let config = HotseatConfig::load(path).unwrap();
        assert_eq!(config, HotseatConfig::default());
    }

    #[test]
    fn test_default_path() {
        assert_eq!(HotseatConfig::default_path(), PathBuf::from("hotseat.toml"));
    }
}
