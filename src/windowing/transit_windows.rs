use serde::Serialize;
use std::fmt::Display;
use std::path::{Path, PathBuf};

use super::ephemeris::Ephemeris;
use crate::config::ExtractionSettings;
use crate::data_access::{ascii_table, LightCurve};
use crate::error::Result;

/// Open time interval; endpoints are never inside.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct WindowBounds {
    pub lower: f64,
    pub upper: f64,
}

impl WindowBounds {
    pub fn around(center: f64, half_width: f64) -> WindowBounds {
        WindowBounds {
            lower: center - half_width,
            upper: center + half_width,
        }
    }

    pub fn contains(&self, t: f64) -> bool {
        t > self.lower && t < self.upper
    }
}

/// Rows around one predicted transit.
#[derive(Debug, Clone)]
pub struct TransitWindow {
    index: usize,
    center: f64,
    bounds: WindowBounds,
    curve: LightCurve,
}

impl TransitWindow {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn center(&self) -> f64 {
        self.center
    }

    pub fn bounds(&self) -> WindowBounds {
        self.bounds
    }

    pub fn curve(&self) -> &LightCurve {
        &self.curve
    }

    pub fn len(&self) -> usize {
        self.curve.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curve.is_empty()
    }
}

impl Display for TransitWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "transit {} at {:.5} ({:.5}..{:.5}): {} points",
            self.index,
            self.center,
            self.bounds.lower,
            self.bounds.upper,
            self.curve.len()
        )
    }
}

/// Lazily slices one window per expected occurrence.
pub struct TransitWindows<'a> {
    light_curve: &'a LightCurve,
    ephemeris: Ephemeris,
    settings: ExtractionSettings,
    next: usize,
}

impl<'a> Iterator for TransitWindows<'a> {
    type Item = TransitWindow;

    fn next(&mut self) -> Option<TransitWindow> {
        if self.next >= self.ephemeris.occurrences() {
            return None;
        }
        let index = self.next;
        self.next += 1;

        let center = self
            .ephemeris
            .predicted_center(index, self.settings.survey_time_offset);
        let half_width = self.ephemeris.duration() * self.settings.half_width_factor;
        let bounds = WindowBounds::around(center, half_width);
        // every row is scanned; input order is assumed, not relied on
        let curve = self.light_curve.select(|t| bounds.contains(t));

        Some(TransitWindow {
            index,
            center,
            bounds,
            curve,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.ephemeris.occurrences().saturating_sub(self.next);
        (left, Some(left))
    }
}

impl ExactSizeIterator for TransitWindows<'_> {}

pub fn extract<'a>(
    light_curve: &'a LightCurve,
    ephemeris: &Ephemeris,
    settings: &ExtractionSettings,
) -> TransitWindows<'a> {
    TransitWindows {
        light_curve,
        ephemeris: *ephemeris,
        settings: *settings,
        next: 0,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum WindowOutcome {
    Persisted { path: PathBuf, points: usize },
    Skipped { points: usize },
}

/// `Transit_<index>_<target>`. Windows are always written as text tables, so
/// a FITS target gets a `.dat` extension to keep the file loadable.
pub fn output_file_name(index: usize, target: &str) -> String {
    let target_path = Path::new(target);
    let is_fits = target_path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("fits"));
    if is_fits {
        let text_name = target_path.with_extension("dat");
        format!("Transit_{index}_{}", text_name.display())
    } else {
        format!("Transit_{index}_{target}")
    }
}

/// Writes the window when it holds more than `min_points` rows.
pub fn persist_window(
    window: &TransitWindow,
    output_dir: &Path,
    target: &str,
    min_points: usize,
) -> Result<WindowOutcome> {
    let points = window.len();
    if points <= min_points {
        return Ok(WindowOutcome::Skipped { points });
    }
    let path = output_dir.join(output_file_name(window.index(), target));
    ascii_table::write_light_curve(&path, window.curve())?;
    Ok(WindowOutcome::Persisted { path, points })
}
