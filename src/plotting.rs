use plotters::prelude::*;
use std::fs;
use std::io::{self, BufRead, Write};
use std::ops::Range;
use std::path::{Path, PathBuf};

use crate::data_access::LightCurve;
use crate::error::{Result, SeparatorError};
use crate::windowing::TransitWindow;

/// Display hook called by the pipeline. Rendering finishes before the
/// pipeline moves to the next window.
pub trait Renderer {
    /// The whole light curve, shown once before any window.
    fn render_overview(&mut self, _light_curve: &LightCurve) -> Result<()> {
        Ok(())
    }

    fn render_window(&mut self, window: &TransitWindow) -> Result<()>;
}

/// Headless runs.
#[derive(Debug, Default)]
pub struct NoopRenderer;

impl Renderer for NoopRenderer {
    fn render_window(&mut self, _window: &TransitWindow) -> Result<()> {
        Ok(())
    }
}

/// Draws time vs. flux scatter plots as SVG files.
pub struct SvgRenderer {
    directory: PathBuf,
    stem: String,
    pause: bool,
    size: (u32, u32),
    operator_input: Box<dyn BufRead>,
}

impl SvgRenderer {
    pub fn new(directory: &Path, stem: &str, pause: bool) -> Result<SvgRenderer> {
        fs::create_dir_all(directory).map_err(|e| SeparatorError::write(directory, e))?;
        Ok(SvgRenderer {
            directory: directory.to_path_buf(),
            stem: stem.to_string(),
            pause,
            size: (1024, 600),
            operator_input: Box::new(io::BufReader::new(io::stdin())),
        })
    }

    /// Replaces stdin as the source of the operator's Enter presses.
    pub fn with_operator_input(mut self, input: impl BufRead + 'static) -> SvgRenderer {
        self.operator_input = Box::new(input);
        self
    }

    pub fn overview_path(&self) -> PathBuf {
        self.directory.join(format!("{}_overview.svg", self.stem))
    }

    pub fn window_path(&self, index: usize) -> PathBuf {
        self.directory
            .join(format!("Transit_{}_{}.svg", index, self.stem))
    }

    fn draw(
        &mut self,
        path: &Path,
        caption: &str,
        x_range: Range<f64>,
        y_range: Range<f64>,
        lc: &LightCurve,
    ) -> Result<()> {
        draw_scatter(path, self.size, caption, x_range, y_range, lc)
            .map_err(|e| SeparatorError::Render(format!("{}: {}", path.display(), e)))?;
        log::info!("plot written to {}", path.display());
        if self.pause {
            wait_for_operator(&mut self.operator_input, &mut io::stdout(), path)?;
        }
        Ok(())
    }
}

impl Renderer for SvgRenderer {
    fn render_overview(&mut self, light_curve: &LightCurve) -> Result<()> {
        let (x_range, y_range) = match light_curve.extent() {
            Some(((t_lo, t_hi), (f_lo, f_hi))) => (padded(t_lo, t_hi), padded(f_lo, f_hi)),
            None => (0.0..1.0, 0.0..1.0),
        };
        let caption = format!("{} ({} points)", self.stem, light_curve.len());
        let path = self.overview_path();
        self.draw(&path, &caption, x_range, y_range, light_curve)
    }

    fn render_window(&mut self, window: &TransitWindow) -> Result<()> {
        let bounds = window.bounds();
        let y_range = match window.curve().extent() {
            Some((_, (f_lo, f_hi))) => padded(f_lo, f_hi),
            None => 0.0..1.0,
        };
        let caption = format!(
            "Transit {} at {:.4} ({} points)",
            window.index(),
            window.center(),
            window.len()
        );
        let path = self.window_path(window.index());
        self.draw(
            &path,
            &caption,
            bounds.lower..bounds.upper,
            y_range,
            window.curve(),
        )
    }
}

fn padded(lo: f64, hi: f64) -> Range<f64> {
    let span = hi - lo;
    let pad = if span > 0.0 {
        span * 0.05
    } else {
        lo.abs().max(1.0) * 1e-3
    };
    (lo - pad)..(hi + pad)
}

fn draw_scatter(
    path: &Path,
    size: (u32, u32),
    caption: &str,
    x_range: Range<f64>,
    y_range: Range<f64>,
    lc: &LightCurve,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc("time")
        .y_desc("flux")
        .draw()?;

    chart.draw_series(
        lc.rows()
            .filter(|(t, f, _)| t.is_finite() && f.is_finite())
            .map(|(t, f, _)| Circle::new((t, f), 2, RED.filled())),
    )?;

    root.present()?;
    Ok(())
}

/// Blocks until the operator sends a line. A closed input is an error, since
/// the checkpoint could never be acknowledged.
fn wait_for_operator<R, W>(input: &mut R, prompt: &mut W, path: &Path) -> Result<()>
where
    R: BufRead + ?Sized,
    W: Write,
{
    write!(prompt, "Inspect {} and press Enter to continue...", path.display())
        .and_then(|_| prompt.flush())
        .map_err(|e| SeparatorError::Render(e.to_string()))?;
    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .map_err(|e| SeparatorError::Render(e.to_string()))?;
    if read == 0 {
        return Err(SeparatorError::Render(format!(
            "operator input closed while waiting on {}; set plot.pause = false for unattended runs",
            path.display()
        )));
    }
    Ok(())
}
