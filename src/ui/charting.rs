/// Compute X (attempt number) and Y (WPM) bounds for the history chart
pub fn compute_chart_params(points: &[(f64, f64)]) -> (f64, f64) {
    let highest_wpm = points.iter().map(|&(_, wpm)| wpm).fold(0.0, f64::max);

    let mut x_max = points.last().map(|p| p.0).unwrap_or(1.0);
    if x_max < 2.0 {
        // a single point still needs a non-empty axis
        x_max = 2.0;
    }

    let mut y_max = highest_wpm.ceil();
    if y_max < 1.0 {
        y_max = 1.0;
    }

    (x_max, y_max)
}

/// Format a simple numeric label consistently
pub fn format_label(val: f64) -> String {
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.2}")
    }
}
