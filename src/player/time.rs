/// Format seconds as `m:ss`. Anything that is not a finite, non-negative
/// number (e.g. a duration that is not known yet) renders as `0:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }
    let whole = seconds.floor() as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}

/// Elapsed time as a fraction of `total`, or 0 while the total is unknown.
pub fn progress_fraction(elapsed: f64, total: Option<f64>) -> f64 {
    match total {
        Some(total) if total.is_finite() && total > 0.0 && elapsed.is_finite() => {
            (elapsed / total).clamp(0.0, 1.0)
        }
        _ => 0.0,
    }
}

/// Map a horizontal position inside a control starting at `left` and `width`
/// wide to a fraction of that width, clamped to `[0, 1]`.
pub fn fraction_at(x: f64, left: f64, width: f64) -> f64 {
    if !(width > 0.0) {
        return 0.0;
    }
    let fraction = (x - left) / width;
    if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    }
}
