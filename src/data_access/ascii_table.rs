//! Plain-text light-curve tables.
//!
//! Input tables carry a header line of column names followed by one
//! observation per line. Fields are separated by whitespace or commas, blank
//! lines and `#` comments are ignored, and columns beyond `time`, `flux` and
//! `flux_err` are tolerated. Written tables always use the three-column
//! layout so they can be read back by [`read_light_curve`].

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use super::LightCurve;
use crate::error::{Result, SeparatorError};

pub const TIME_COLUMN: &str = "time";
pub const FLUX_COLUMN: &str = "flux";
pub const FLUX_ERR_COLUMN: &str = "flux_err";

fn split_fields(line: &str) -> Vec<&str> {
    line.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|field| !field.is_empty())
        .collect()
}

fn is_skippable(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}

fn column_index(header: &[&str], column: &str, path: &Path) -> Result<usize> {
    header
        .iter()
        .position(|name| *name == column)
        .ok_or_else(|| SeparatorError::MissingColumn {
            path: path.to_path_buf(),
            column: column.to_string(),
        })
}

fn parse_field(raw: &str, column: &str, line: usize, path: &Path) -> Result<f64> {
    raw.parse::<f64>().map_err(|_| SeparatorError::ParseValue {
        path: path.to_path_buf(),
        line,
        column: column.to_string(),
        value: raw.to_string(),
    })
}

/// Parses table text; `path` only labels errors.
pub fn parse_light_curve(content: &str, path: &Path) -> Result<LightCurve> {
    let mut lines = content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line))
        .filter(|(_, line)| !is_skippable(line));

    let Some((_, header_line)) = lines.next() else {
        return Err(SeparatorError::MissingColumn {
            path: path.to_path_buf(),
            column: TIME_COLUMN.to_string(),
        });
    };
    let header = split_fields(header_line);
    let t_idx = column_index(&header, TIME_COLUMN, path)?;
    let f_idx = column_index(&header, FLUX_COLUMN, path)?;
    let e_idx = column_index(&header, FLUX_ERR_COLUMN, path)?;

    let mut time = Vec::new();
    let mut flux = Vec::new();
    let mut flux_err = Vec::new();

    for (line_no, line) in lines {
        let fields = split_fields(line);
        if fields.len() != header.len() {
            return Err(SeparatorError::MalformedRow {
                path: path.to_path_buf(),
                line: line_no,
                expected: header.len(),
                found: fields.len(),
            });
        }
        time.push(parse_field(fields[t_idx], TIME_COLUMN, line_no, path)?);
        flux.push(parse_field(fields[f_idx], FLUX_COLUMN, line_no, path)?);
        flux_err.push(parse_field(fields[e_idx], FLUX_ERR_COLUMN, line_no, path)?);
    }

    LightCurve::new(time, flux, flux_err)
}

pub fn read_light_curve(path: &Path) -> Result<LightCurve> {
    let content = fs::read_to_string(path).map_err(|e| SeparatorError::io(path, e))?;
    let lc = parse_light_curve(&content, path)?;
    log::debug!("read {} rows from {}", lc.len(), path.display());
    Ok(lc)
}

/// Writes `time flux flux_err` rows. The handle is closed before returning.
pub fn write_light_curve(path: &Path, lc: &LightCurve) -> Result<()> {
    let file = File::create(path).map_err(|e| SeparatorError::write(path, e))?;
    let mut out = BufWriter::new(file);

    let write_all = |out: &mut BufWriter<File>| -> std::io::Result<()> {
        writeln!(out, "{TIME_COLUMN} {FLUX_COLUMN} {FLUX_ERR_COLUMN}")?;
        for (t, f, e) in lc.rows() {
            // `{}` on f64 prints the shortest string that parses back exactly
            writeln!(out, "{t} {f} {e}")?;
        }
        out.flush()
    };
    write_all(&mut out).map_err(|e| SeparatorError::write(path, e))
}

#[cfg(test)]
pub mod test {
    use super::*;

    const DVT_SAMPLE: &str = "\
# HAT-P-36 TESS DVT light curve
time flux flux_err model
2458900.10 1.0001 0.0004 1.0
2458900.12 0.9987 0.0004 1.0

2458900.14,nan,0.0004,1.0
";

    #[test]
    pub fn parses_header_comments_and_mixed_delimiters() {
        let lc = parse_light_curve(DVT_SAMPLE, Path::new("lc.dat")).unwrap();
        assert_eq!(lc.len(), 3);
        assert_eq!(lc.time(), &[2458900.10, 2458900.12, 2458900.14]);
        assert_eq!(lc.flux()[1], 0.9987);
        assert!(lc.flux()[2].is_nan());
        assert_eq!(lc.flux_err(), &[0.0004, 0.0004, 0.0004]);
    }

    #[test]
    pub fn columns_are_found_by_name() {
        let text = "flux_err flux time\n0.1 5.0 100.0\n";
        let lc = parse_light_curve(text, Path::new("lc.dat")).unwrap();
        assert_eq!(lc.time(), &[100.0]);
        assert_eq!(lc.flux(), &[5.0]);
        assert_eq!(lc.flux_err(), &[0.1]);
    }

    #[test]
    pub fn missing_flux_err_is_a_load_error() {
        let err = parse_light_curve("time flux\n1 2\n", Path::new("lc.dat")).unwrap_err();
        match err {
            SeparatorError::MissingColumn { column, .. } => assert_eq!(column, "flux_err"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    pub fn short_row_reports_line_number() {
        let text = "time flux flux_err\n1 2 3\n4 5\n";
        let err = parse_light_curve(text, Path::new("lc.dat")).unwrap_err();
        assert!(matches!(
            err,
            SeparatorError::MalformedRow {
                line: 3,
                expected: 3,
                found: 2,
                ..
            }
        ));
    }

    #[test]
    pub fn unparsable_value_is_a_load_error() {
        let text = "time flux flux_err\n1 abc 3\n";
        let err = parse_light_curve(text, Path::new("lc.dat")).unwrap_err();
        assert!(err.is_load_error());
        assert!(matches!(err, SeparatorError::ParseValue { line: 2, .. }));
    }

    #[test]
    pub fn empty_file_has_no_header() {
        let err = parse_light_curve("# only a comment\n\n", Path::new("lc.dat")).unwrap_err();
        assert!(matches!(err, SeparatorError::MissingColumn { .. }));
    }

    #[test]
    pub fn missing_file_is_an_io_error() {
        let err = read_light_curve(Path::new("/nonexistent/lc.dat")).unwrap_err();
        assert!(matches!(err, SeparatorError::Io { .. }));
    }

    #[test]
    pub fn written_table_reads_back_identically() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Transit_0_lc.dat");
        let lc = LightCurve::new(
            vec![2458900.804_251_3, 2458900.9],
            vec![0.998_765_432_1, 1.000_000_000_1],
            vec![3.2e-4, 3.3e-4],
        )
        .unwrap();

        write_light_curve(&path, &lc).unwrap();
        let back = read_light_curve(&path).unwrap();
        assert_eq!(back, lc);

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("time flux flux_err\n"));
    }
}
