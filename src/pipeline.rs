use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{Config, ExtractionSettings};
use crate::data_access::{load_light_curve, LightCurve};
use crate::error::{Result, SeparatorError};
use crate::plotting::Renderer;
use crate::statistical_methods::statistics::{expected_points, median_cadence};
use crate::windowing::{extract, persist_window, Ephemeris, WindowOutcome};

pub const WING_WARNING: &str = "WARNING: light curves are written exactly as plotted. If the transit wings lack data, adjust the transit duration (t14).";
pub const SEPARATOR_LINE: &str = "-----------------------------------------------------------------------------------------------------------------------";
pub const PARTIAL_TRANSIT_WARNING: &str = "Even with a correct t14 some transits may have too little data in their wings. Inspect the full light curve.";
pub const COUNT_CHECK_WARNING: &str = "WARNING: make sure the number of files written equals the number of observed transits.";

#[derive(Debug, Clone, Serialize)]
pub struct WindowReport {
    pub index: usize,
    pub center: f64,
    #[serde(flatten)]
    pub outcome: WindowOutcome,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub target: String,
    pub ephemeris: Ephemeris,
    pub windows: Vec<WindowReport>,
}

impl RunSummary {
    pub fn persisted(&self) -> usize {
        self.windows
            .iter()
            .filter(|w| matches!(w.outcome, WindowOutcome::Persisted { .. }))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.windows.len() - self.persisted()
    }

    /// Saves the summary as pretty JSON.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| SeparatorError::write(path, std::io::Error::other(e)))?;
        fs::write(path, json).map_err(|e| SeparatorError::write(path, e))
    }
}

pub fn print_opening_advisories() {
    println!("{WING_WARNING}");
    println!("{SEPARATOR_LINE}");
    println!("{PARTIAL_TRANSIT_WARNING}");
}

pub fn print_closing_advisory() {
    println!("{COUNT_CHECK_WARNING}");
}

/// Logs how many points a full window should hold at this cadence.
fn check_cadence(light_curve: &LightCurve, ephemeris: &Ephemeris, settings: &ExtractionSettings) {
    let Some(cadence) = median_cadence(light_curve.time()) else {
        log::warn!("cannot estimate cadence from {} rows", light_curve.len());
        return;
    };
    let width = 2.0 * settings.half_width_factor * ephemeris.duration();
    let expected = expected_points(width, cadence);
    log::info!(
        "median cadence {:.6}, about {:.0} points per full window",
        cadence,
        expected
    );
    if expected <= settings.min_points as f64 {
        log::warn!(
            "full windows hold about {:.0} points, not above the {} needed; every window will be skipped",
            expected,
            settings.min_points
        );
    }
}

/// Renders every window and writes the ones with enough points.
pub fn separate_transits<R: Renderer + ?Sized>(
    light_curve: &LightCurve,
    ephemeris: &Ephemeris,
    settings: &ExtractionSettings,
    output_dir: &Path,
    target: &str,
    renderer: &mut R,
) -> Result<RunSummary> {
    check_cadence(light_curve, ephemeris, settings);

    let mut windows = Vec::with_capacity(ephemeris.occurrences());
    for window in extract(light_curve, ephemeris, settings) {
        log::info!("{}", window);
        renderer.render_window(&window)?;

        let outcome = persist_window(&window, output_dir, target, settings.min_points)?;
        match &outcome {
            WindowOutcome::Persisted { path, .. } => {
                log::info!("transit {} written to {}", window.index(), path.display())
            }
            WindowOutcome::Skipped { points } => {
                log::debug!("transit {} skipped with {} points", window.index(), points)
            }
        }
        windows.push(WindowReport {
            index: window.index(),
            center: window.center(),
            outcome,
        });
    }

    Ok(RunSummary {
        target: target.to_string(),
        ephemeris: *ephemeris,
        windows,
    })
}

pub fn summary_path(output_dir: &Path, target: &str) -> PathBuf {
    output_dir.join(format!("{target}.summary.json"))
}

/// Full run: load, advise, render the overview, separate, advise.
pub fn run<R: Renderer + ?Sized>(config: &Config, renderer: &mut R) -> Result<RunSummary> {
    let ephemeris = config.ephemeris()?;
    let target = config.target_name()?;
    log::info!("target {}: {}", target, ephemeris);

    let light_curve = load_light_curve(&config.input)?;
    log::info!(
        "loaded {} observations from {}",
        light_curve.len(),
        config.input.display()
    );

    fs::create_dir_all(&config.output_dir)
        .map_err(|e| SeparatorError::write(&config.output_dir, e))?;

    renderer.render_overview(&light_curve)?;
    print_opening_advisories();

    let summary = separate_transits(
        &light_curve,
        &ephemeris,
        &config.extraction,
        &config.output_dir,
        &target,
        renderer,
    )?;

    summary.write_json(&summary_path(&config.output_dir, &target))?;
    println!(
        "{} of {} windows written to {}",
        summary.persisted(),
        summary.windows.len(),
        config.output_dir.display()
    );
    print_closing_advisory();
    Ok(summary)
}

#[cfg(test)]
pub mod test {
    use super::*;
    use crate::windowing::TransitWindow;

    #[derive(Default)]
    struct RecordingRenderer {
        overviews: usize,
        rendered: Vec<(usize, usize)>,
    }

    impl Renderer for RecordingRenderer {
        fn render_overview(&mut self, _light_curve: &LightCurve) -> Result<()> {
            self.overviews += 1;
            Ok(())
        }

        fn render_window(&mut self, window: &TransitWindow) -> Result<()> {
            self.rendered.push((window.index(), window.len()));
            Ok(())
        }
    }

    #[test]
    pub fn every_window_is_rendered_but_only_full_ones_written() {
        let dir = tempfile::tempdir().unwrap();
        // cadence 0.1, centers at 10, 20, 30; half width 1.5 * 1.0
        let time: Vec<f64> = (0..250).map(|i| i as f64 * 0.1).collect();
        let n = time.len();
        let lc = LightCurve::new(time, vec![1.0; n], vec![0.01; n]).unwrap();
        let eph = Ephemeris::new(10.0, 0.0, 1.0, 3).unwrap();
        let settings = ExtractionSettings {
            survey_time_offset: 0.0,
            ..ExtractionSettings::default()
        };

        let mut renderer = RecordingRenderer::default();
        let summary =
            separate_transits(&lc, &eph, &settings, dir.path(), "lc.dat", &mut renderer).unwrap();

        let indices: Vec<usize> = renderer.rendered.iter().map(|r| r.0).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        // window 2 centered at 30 lies past the data
        assert_eq!(renderer.rendered[2].1, 0);
        assert_eq!(summary.persisted(), 2);
        assert_eq!(summary.skipped(), 1);
        assert!(dir.path().join("Transit_0_lc.dat").exists());
        assert!(dir.path().join("Transit_1_lc.dat").exists());
        assert!(!dir.path().join("Transit_2_lc.dat").exists());
    }

    #[test]
    pub fn summary_serializes_outcomes() {
        let dir = tempfile::tempdir().unwrap();
        let summary = RunSummary {
            target: "lc.dat".to_string(),
            ephemeris: Ephemeris::new(1.0, 0.0, 0.1, 1).unwrap(),
            windows: vec![WindowReport {
                index: 0,
                center: 1.0,
                outcome: WindowOutcome::Skipped { points: 3 },
            }],
        };
        let path = summary_path(dir.path(), "lc.dat");
        summary.write_json(&path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["windows"][0]["outcome"], "skipped");
        assert_eq!(value["windows"][0]["points"], 3);
        assert_eq!(value["ephemeris"]["occurrences"], 1);
    }
}
