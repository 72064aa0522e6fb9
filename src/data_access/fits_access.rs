use fitsio::FitsFile;
use std::path::Path;

use super::LightCurve;
use crate::error::Result;

// TESS SPOC light-curve files keep photometry in the first extension
const LC_HDU: usize = 1;

fn load_tess_data(fptr: &mut FitsFile) -> Result<(Vec<f64>, Vec<f64>, Vec<f64>)> {
    let hdu = fptr.hdu(LC_HDU)?;
    let time: Vec<f64> = hdu.read_col(fptr, "TIME")?;
    let flux: Vec<f64> = hdu.read_col(fptr, "PDCSAP_FLUX")?;
    let flux_err: Vec<f64> = hdu.read_col(fptr, "PDCSAP_FLUX_ERR")?;
    Ok((time, flux, flux_err))
}

/// Rows are kept as stored, gaps and flagged cadences included.
pub fn read_light_curve(path: &Path) -> Result<LightCurve> {
    let mut fptr = FitsFile::open(path)?;
    let (time, flux, flux_err) = load_tess_data(&mut fptr)?;
    log::debug!("read {} cadences from {}", time.len(), path.display());
    LightCurve::new(time, flux, flux_err)
}
