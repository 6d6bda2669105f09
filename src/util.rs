/// Division that reports 0 for an empty denominator instead of NaN.
pub fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator > 0 {
        numerator as f64 / denominator as f64
    } else {
        0.0
    }
}

/// Renders seconds as `XmYYs`.
pub fn format_duration(seconds: f64) -> String {
    let whole = seconds.max(0.0) as u64;
    format!("{}m{:02}s", whole / 60, whole % 60)
}
