/// Maps a raw feature onto `[0, max_score]` along two linear segments that
/// meet at `max_score / 2` when `value == avg_val`.
///
/// Missing and non-finite values score 0. The result is non-decreasing in
/// `value` whenever `min_val <= avg_val <= max_val` and `max_score >= 0`.
pub fn normalize(
    value: Option<f64>,
    min_val: f64,
    avg_val: f64,
    max_val: f64,
    max_score: f64,
) -> f64 {
    let value = match value {
        Some(value) if !value.is_nan() => value,
        _ => return 0.0,
    };

    if value <= min_val {
        return 0.0;
    }
    if value >= max_val {
        return max_score;
    }

    let half_score = max_score / 2.0;
    let score = if value <= avg_val {
        let denom = avg_val - min_val;
        if denom == 0.0 {
            half_score
        } else {
            (value - min_val) / denom * half_score
        }
    } else {
        let denom = max_val - avg_val;
        if denom == 0.0 {
            max_score
        } else {
            half_score + (value - avg_val) / denom * half_score
        }
    };

    score.clamp(0.0, max_score)
}
