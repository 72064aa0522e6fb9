//! Run configuration read from a TOML file.
//!
//! ```toml
//! input = "HAT-P-36_TESS_DVT_lc.dat"
//!
//! [ephemeris]
//! period = 1.32735
//! duration = 0.09604
//! reference_epoch = 1899.4769
//! occurrences = 21
//! ```
//!
//! Everything outside `input` and `[ephemeris]` has a default.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, SeparatorError};
use crate::windowing::ephemeris::Ephemeris;

pub const DEFAULT_CONFIG_FILE: &str = "transit_separator.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub input: PathBuf,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    pub ephemeris: EphemerisSettings,
    #[serde(default)]
    pub extraction: ExtractionSettings,
    #[serde(default)]
    pub plot: PlotSettings,
}

/// Values as read from the DV report; validated by [`Config::ephemeris`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EphemerisSettings {
    pub period: f64,
    /// Transit duration (t14), same units as `period`.
    pub duration: f64,
    /// Reference epoch (t0) in the survey's own time base.
    pub reference_epoch: f64,
    /// Occurrences to try, counting the mid-sector gap.
    pub occurrences: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtractionSettings {
    /// Added to `reference_epoch` to reach the light-curve time base.
    #[serde(default = "default_survey_time_offset")]
    pub survey_time_offset: f64,
    /// Window half width in units of the transit duration.
    #[serde(default = "default_half_width_factor")]
    pub half_width_factor: f64,
    /// Windows need strictly more points than this to be written.
    #[serde(default = "default_min_points")]
    pub min_points: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotSettings {
    #[serde(default = "default_plot_enabled")]
    pub enabled: bool,
    #[serde(default = "default_plot_directory")]
    pub directory: PathBuf,
    /// Wait for Enter after each plot.
    #[serde(default = "default_plot_pause")]
    pub pause: bool,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_survey_time_offset() -> f64 {
    2457000.0
}

fn default_half_width_factor() -> f64 {
    1.5
}

fn default_min_points() -> usize {
    20
}

fn default_plot_enabled() -> bool {
    true
}

fn default_plot_pause() -> bool {
    true
}

fn default_plot_directory() -> PathBuf {
    PathBuf::from("plots")
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            survey_time_offset: default_survey_time_offset(),
            half_width_factor: default_half_width_factor(),
            min_points: default_min_points(),
        }
    }
}

impl Default for PlotSettings {
    fn default() -> Self {
        Self {
            enabled: default_plot_enabled(),
            directory: default_plot_directory(),
            pause: default_plot_pause(),
        }
    }
}

impl ExtractionSettings {
    pub fn validate(&self) -> Result<()> {
        if !self.survey_time_offset.is_finite() {
            return Err(SeparatorError::Config(
                "survey_time_offset must be finite".to_string(),
            ));
        }
        if !(self.half_width_factor.is_finite() && self.half_width_factor > 0.0) {
            return Err(SeparatorError::Config(format!(
                "half_width_factor must be positive, got {}",
                self.half_width_factor
            )));
        }
        Ok(())
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            SeparatorError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| SeparatorError::Config(format!("failed to parse config: {}", e)))?;
        config.extraction.validate()?;
        Ok(config)
    }

    pub fn ephemeris(&self) -> Result<Ephemeris> {
        let e = &self.ephemeris;
        Ephemeris::new(e.period, e.reference_epoch, e.duration, e.occurrences)
    }

    /// File name of the input, used to key output artifacts.
    pub fn target_name(&self) -> Result<String> {
        self.input
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .ok_or_else(|| {
                SeparatorError::Config(format!(
                    "input path {} has no file name",
                    self.input.display()
                ))
            })
    }
}

#[cfg(test)]
pub mod test {
    use super::*;

    const MINIMAL: &str = r#"
input = "data/HAT-P-36_TESS_DVT_lc.dat"

[ephemeris]
period = 1.32735
duration = 0.09604
reference_epoch = 1899.4769
occurrences = 21
"#;

    #[test]
    pub fn defaults_fill_optional_sections() {
        let config = Config::from_toml(MINIMAL).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert_eq!(config.extraction, ExtractionSettings::default());
        assert_eq!(config.extraction.survey_time_offset, 2457000.0);
        assert_eq!(config.extraction.half_width_factor, 1.5);
        assert_eq!(config.extraction.min_points, 20);
        assert!(config.plot.enabled);
        assert!(config.plot.pause);
        assert_eq!(config.plot.directory, PathBuf::from("plots"));
        assert_eq!(config.target_name().unwrap(), "HAT-P-36_TESS_DVT_lc.dat");
    }

    #[test]
    pub fn overrides_are_honoured() {
        let toml = format!(
            "{MINIMAL}\n[extraction]\nmin_points = 5\nhalf_width_factor = 2.0\n\n[plot]\nenabled = false\npause = false\n"
        );
        let config = Config::from_toml(&toml).unwrap();
        assert_eq!(config.extraction.min_points, 5);
        assert_eq!(config.extraction.half_width_factor, 2.0);
        assert_eq!(config.extraction.survey_time_offset, 2457000.0);
        assert!(!config.plot.enabled);
        assert!(!config.plot.pause);
    }

    #[test]
    pub fn missing_ephemeris_is_a_config_error() {
        let err = Config::from_toml("input = \"lc.dat\"\n").unwrap_err();
        assert!(matches!(err, SeparatorError::Config(_)));
    }

    #[test]
    pub fn non_positive_half_width_is_rejected() {
        let toml = format!("{MINIMAL}\n[extraction]\nhalf_width_factor = 0.0\n");
        assert!(matches!(
            Config::from_toml(&toml),
            Err(SeparatorError::Config(_))
        ));
    }

    #[test]
    pub fn zero_occurrences_fail_ephemeris_validation() {
        let toml = MINIMAL.replace("occurrences = 21", "occurrences = 0");
        let config = Config::from_toml(&toml).unwrap();
        assert!(matches!(
            config.ephemeris(),
            Err(SeparatorError::InvalidEphemeris(_))
        ));
    }
}
