//! Shared formatting helpers for collector fragments.
//!
//! Magnitude scaling is decimal everywhere: a count is divided by 1000 until
//! it fits in three digits, and tagged with one of `B K M G T P`.

/// Unit letters, smallest first.
const UNITS: [char; 6] = ['B', 'K', 'M', 'G', 'T', 'P'];

/// Scales a byte count into `(value, unit)` with `value <= 999` where possible.
///
/// `scale_magnitude(512)` -> `(512.0, 'B')`, `scale_magnitude(1_500_000)` -> `(1.5, 'M')`.
pub fn scale_magnitude(bytes: u64) -> (f64, char) {
    let mut value = bytes as f64;
    let mut idx = 0;
    while value > 999.0 && idx < UNITS.len() - 1 {
        value /= 1000.0;
        idx += 1;
    }
    (value, UNITS[idx])
}

/// Position of a unit letter in the scale (`B` = 0).
pub fn unit_rank(unit: char) -> usize {
    UNITS.iter().position(|&u| u == unit).unwrap_or(0)
}

/// Formats a byte count with an integer value: `"512B"`, `"12G"`.
pub fn format_magnitude(bytes: u64) -> String {
    let (value, unit) = scale_magnitude(bytes);
    format!("{}{}", value.trunc() as u64, unit)
}

/// Formats a byte count with one decimal: `"512.0B"`, `"7.8G"`.
///
/// Values that would round up to `1000.0` move to the next unit.
pub fn format_magnitude_1(bytes: u64) -> String {
    let (mut value, mut unit) = scale_magnitude(bytes);
    if value >= 999.95
        && let Some(&next) = UNITS.get(unit_rank(unit) + 1)
    {
        value /= 1000.0;
        unit = next;
    }
    format!("{:.1}{}", value, unit)
}

/// Clamps a raw percentage into `[0, 100]`.
pub fn normalize_percent(value: i64) -> u8 {
    value.clamp(0, 100) as u8
}

/// `part * 100 / whole`, clamped into `[0, 100]`.
///
/// A non-positive `whole` yields 0.
pub fn percent(part: i64, whole: i64) -> u8 {
    if whole <= 0 {
        return 0;
    }
    let raw = (part as i128 * 100) / whole as i128;
    raw.clamp(0, 100) as u8
}

/// Rounds a percentage to the nearest ten (`74` -> `70`, `75` -> `80`).
pub fn round_to_ten(perc: u8) -> u8 {
    (((perc as u16 + 5) / 10) * 10).min(100) as u8
}

/// Truncates `s` to at most `max` bytes without splitting a character.
pub fn truncate_to_boundary(s: &mut String, max: usize) {
    if s.len() <= max {
        return;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    s.truncate(end);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_magnitude_units() {
        assert_eq!(scale_magnitude(0), (0.0, 'B'));
        assert_eq!(scale_magnitude(999), (999.0, 'B'));
        assert_eq!(scale_magnitude(1000), (1.0, 'K'));
        assert_eq!(scale_magnitude(1_500_000), (1.5, 'M'));
        assert_eq!(scale_magnitude(250_000_000_000).1, 'G');
        assert_eq!(scale_magnitude(u64::MAX).1, 'P');
    }

    #[test]
    fn test_format_magnitude() {
        assert_eq!(format_magnitude(512), "512B");
        assert_eq!(format_magnitude(12_345_678), "12M");
        assert_eq!(format_magnitude_1(7_800_000_000), "7.8G");
        assert_eq!(format_magnitude_1(999), "999.0B");
    }

    #[test]
    fn test_format_magnitude_1_rounds_into_next_unit() {
        assert_eq!(format_magnitude_1(999_940), "999.9K");
        assert_eq!(format_magnitude_1(999_960), "1.0M");
        assert_eq!(format_magnitude_1(999_999_999), "1.0G");
        assert!(format_magnitude_1(u64::MAX).ends_with('P'));
    }

    #[test]
    fn test_unit_selection_is_monotonic() {
        let mut last_rank = 0;
        let mut n: u64 = 1;
        while n < 10_u64.pow(18) {
            let rank = unit_rank(scale_magnitude(n).1);
            assert!(rank >= last_rank, "unit went down at {n}");
            last_rank = rank;
            n = n * 7 / 3 + 1;
        }
    }

    #[test]
    fn test_scaled_value_reconstructs_within_one_unit() {
        let samples = [
            0_u64,
            1,
            999,
            1_000,
            1_001,
            65_535,
            999_999,
            1_000_001,
            4_294_967_296,
            123_456_789_012,
            987_654_321_098_765,
        ];
        for bytes in samples {
            let (value, unit) = scale_magnitude(bytes);
            let step = 1000_f64.powi(unit_rank(unit) as i32);
            let rebuilt = value.trunc() * step;
            let diff = (bytes as f64 - rebuilt).abs();
            assert!(diff < step, "{bytes} -> {value}{unit} off by {diff}");
        }
    }

    #[test]
    fn test_percentages_are_clamped() {
        assert_eq!(normalize_percent(-5), 0);
        assert_eq!(normalize_percent(42), 42);
        assert_eq!(normalize_percent(250), 100);

        assert_eq!(percent(4, 5), 80);
        assert_eq!(percent(-4, 5), 0);
        assert_eq!(percent(12, 5), 100);
        assert_eq!(percent(3, 0), 0);
        assert_eq!(percent(3, -7), 0);
        assert_eq!(percent(i64::MAX, 1), 100);
    }

    #[test]
    fn test_round_to_ten() {
        assert_eq!(round_to_ten(0), 0);
        assert_eq!(round_to_ten(74), 70);
        assert_eq!(round_to_ten(75), 80);
        assert_eq!(round_to_ten(100), 100);
    }

    #[test]
    fn test_truncate_to_boundary() {
        let mut s = String::from("52 °C");
        truncate_to_boundary(&mut s, 4);
        assert_eq!(s, "52 ");

        let mut short = String::from("ok");
        truncate_to_boundary(&mut short, 10);
        assert_eq!(short, "ok");
    }
}
