use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::processing::{DateNormalizer, DateOrder};
use crate::utils::PassportError;

/// How line boundaries in the OCR text are interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    /// Newlines separate MRZ lines.
    #[default]
    Lines,
    /// Newlines are ignored and the text is cut every 44 characters.
    Fixed44,
}

impl std::str::FromStr for InputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lines" => Ok(InputMode::Lines),
            "fixed44" | "fixed-44" | "fixed_44" => Ok(InputMode::Fixed44),
            other => Err(format!("unknown input mode: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeConfig {
    pub date_order: DateOrder,
    pub input_mode: InputMode,
    /// Apply field-aware OCR character correction after decoding.
    pub correct_ocr: bool,
    pub consensus_window: usize,
    pub consensus_required: usize,
    pub store_path: Option<PathBuf>,
    /// Overrides the wall-clock year for birth-date century selection.
    pub reference_year: Option<i32>,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        IntakeConfig {
            date_order: DateOrder::MonthFirst,
            input_mode: InputMode::Lines,
            correct_ocr: false,
            consensus_window: 5,
            consensus_required: 3,
            store_path: None,
            reference_year: None,
        }
    }
}

impl IntakeConfig {
    pub fn load(path: &Path) -> Result<Self, PassportError> {
        let contents = std::fs::read_to_string(path)?;
        let config: IntakeConfig = serde_json::from_str(&contents)?;
        config.check()?;
        Ok(config)
    }

    pub fn check(&self) -> Result<(), PassportError> {
        if self.consensus_window == 0 {
            return Err(PassportError::Config(
                "consensus_window must be at least 1".to_string(),
            ));
        }
        if self.consensus_required == 0 || self.consensus_required > self.consensus_window {
            return Err(PassportError::Config(format!(
                "consensus_required must be between 1 and {}",
                self.consensus_window
            )));
        }
        Ok(())
    }

    pub fn normalizer(&self) -> DateNormalizer {
        let normalizer = DateNormalizer::new(self.date_order);
        match self.reference_year {
            Some(year) => normalizer.with_reference_year(year),
            None => normalizer,
        }
    }
}
