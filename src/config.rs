//! Tutor configuration (TOML).

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TutorError};

/// Top-level configuration. Missing fields fall back to the defaults below.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct TutorConfig {
    pub oracle: OracleConfig,

    /// Replacement exercise catalog. The built-in catalog is used when unset.
    pub catalog: Option<PathBuf>,
}

/// Sampling policy for the answer checker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OracleConfig {
    /// The single problem variable answers are differentiated against.
    pub variable: String,

    /// Points both sides are evaluated at unless an exercise supplies its own.
    pub sample_points: Vec<i64>,

    /// Precision of the textual comparison.
    pub significant_figures: usize,

    /// Normalized answers longer than this are rejected before parsing.
    pub max_input_len: usize,

    /// Parsed answers with more nodes than this are not differentiated.
    pub max_expr_size: usize,

    /// Parsed answers nested deeper than this are not differentiated.
    pub max_expr_depth: usize,

    /// Derivatives with more nodes than this are not evaluated.
    pub max_derivative_size: usize,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            variable: "x".to_string(),
            sample_points: vec![1, 2, 3, 4, 5],
            significant_figures: 5,
            max_input_len: 256,
            max_expr_size: 64,
            max_expr_depth: 24,
            max_derivative_size: 4096,
        }
    }
}

impl OracleConfig {
    pub fn validate(&self) -> Result<()> {
        if self.variable.trim().is_empty() {
            return Err(TutorError::Config("oracle.variable must be non-empty".to_string()));
        }
        if self.sample_points.is_empty() {
            return Err(TutorError::Config(
                "oracle.sample_points must be a non-empty array".to_string(),
            ));
        }
        if !(1..=15).contains(&self.significant_figures) {
            return Err(TutorError::Config(
                "oracle.significant_figures must be between 1 and 15".to_string(),
            ));
        }
        let limits = [
            ("max_input_len", self.max_input_len),
            ("max_expr_size", self.max_expr_size),
            ("max_expr_depth", self.max_expr_depth),
            ("max_derivative_size", self.max_derivative_size),
        ];
        if let Some((name, _)) = limits.iter().find(|(_, value)| *value == 0) {
            return Err(TutorError::Config(format!("oracle.{name} must be > 0")));
        }
        Ok(())
    }
}

impl TutorConfig {
    pub fn validate(&self) -> Result<()> {
        self.oracle.validate()
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `TutorConfig::default()`.
pub fn load_config(path: &Path) -> Result<TutorConfig> {
    if !path.exists() {
        let cfg = TutorConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path)
        .map_err(|e| TutorError::Config(format!("read {}: {e}", path.display())))?;
    let cfg: TutorConfig = toml::from_str(&contents)
        .map_err(|e| TutorError::Config(format!("parse {}: {e}", path.display())))?;
    cfg.validate()?;
    Ok(cfg)
}
