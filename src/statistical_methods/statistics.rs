pub fn median(data: &[f64]) -> Option<f64> {
    // NaNs would break the ordering
    let mut v: Vec<f64> = data.iter().copied().filter(|x| x.is_finite()).collect();
    if v.is_empty() {
        return None;
    }
    v.sort_by(|a, b| a.total_cmp(b));
    let mid = v.len() / 2;

    if v.len() % 2 == 0 {
        Some((v[mid - 1] + v[mid]) * 0.5)
    } else {
        Some(v[mid])
    }
}

/// Median spacing between successive finite timestamps.
pub fn median_cadence(times: &[f64]) -> Option<f64> {
    if times.len() < 2 {
        return None;
    }
    let dts: Vec<f64> = times
        .windows(2)
        .map(|w| w[1] - w[0])
        .filter(|dt| dt.is_finite() && *dt > 0.0)
        .collect();
    median(&dts)
}

/// Points a window of `width` should hold at the given cadence.
pub fn expected_points(width: f64, cadence: f64) -> f64 {
    if cadence > 0.0 {
        width / cadence
    } else {
        0.0
    }
}
