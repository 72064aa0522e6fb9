pub mod ascii_table;
#[cfg(feature = "fits")]
pub mod fits_access;

use std::path::Path;

use crate::error::{Result, SeparatorError};

/// Column-wise photometry: one entry per observation in each vector.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LightCurve {
    time: Vec<f64>,
    flux: Vec<f64>,
    flux_err: Vec<f64>,
}

impl LightCurve {
    pub fn new(time: Vec<f64>, flux: Vec<f64>, flux_err: Vec<f64>) -> Result<LightCurve> {
        if time.len() != flux.len() || time.len() != flux_err.len() {
            return Err(SeparatorError::LengthMismatch {
                time: time.len(),
                flux: flux.len(),
                flux_err: flux_err.len(),
            });
        }
        Ok(LightCurve {
            time,
            flux,
            flux_err,
        })
    }

    pub fn time(&self) -> &[f64] {
        &self.time
    }

    pub fn flux(&self) -> &[f64] {
        &self.flux
    }

    pub fn flux_err(&self) -> &[f64] {
        &self.flux_err
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Rows as (time, flux, flux_err) triples, in stored order.
    pub fn rows(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.time
            .iter()
            .zip(self.flux.iter())
            .zip(self.flux_err.iter())
            .map(|((&t, &f), &e)| (t, f, e))
    }

    /// Copies the rows whose time satisfies `keep`, preserving order.
    pub fn select<F>(&self, mut keep: F) -> LightCurve
    where
        F: FnMut(f64) -> bool,
    {
        let mut out = LightCurve::default();
        for (t, f, e) in self.rows() {
            if keep(t) {
                out.time.push(t);
                out.flux.push(f);
                out.flux_err.push(e);
            }
        }
        out
    }

    /// (min, max) over finite times and fluxes, `None` when nothing is finite.
    pub fn extent(&self) -> Option<((f64, f64), (f64, f64))> {
        let mut t_range: Option<(f64, f64)> = None;
        let mut f_range: Option<(f64, f64)> = None;
        for (t, f, _) in self.rows() {
            if !t.is_finite() || !f.is_finite() {
                continue;
            }
            t_range = Some(match t_range {
                Some((lo, hi)) => (lo.min(t), hi.max(t)),
                None => (t, t),
            });
            f_range = Some(match f_range {
                Some((lo, hi)) => (lo.min(f), hi.max(f)),
                None => (f, f),
            });
        }
        Some((t_range?, f_range?))
    }
}

/// Loads a light curve, choosing the reader from the file extension.
pub fn load_light_curve(path: &Path) -> Result<LightCurve> {
    let is_fits = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("fits"));

    if is_fits {
        return read_fits(path);
    }

    ascii_table::read_light_curve(path)
}

#[cfg(feature = "fits")]
fn read_fits(path: &Path) -> Result<LightCurve> {
    fits_access::read_light_curve(path)
}

#[cfg(not(feature = "fits"))]
fn read_fits(path: &Path) -> Result<LightCurve> {
    Err(SeparatorError::UnsupportedFormat {
        path: path.to_path_buf(),
    })
}
