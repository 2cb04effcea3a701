//! Byte sizes as written by backup jobs (`452K`, `2.1M`) and as displayed.
//!
//! Multipliers are binary: `K` is 1024 bytes, `M` is 1024², and so on.

/// One kibibyte.
pub const KIB: f64 = 1024.0;

/// Display units, indexed by power of 1024.
const UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];

/// Multiplier for a size suffix, case-insensitive. `None` for unknown suffixes.
pub fn unit_multiplier(unit: char) -> Option<f64> {
    match unit.to_ascii_uppercase() {
        'K' => Some(KIB),
        'M' => Some(KIB * KIB),
        'G' => Some(KIB * KIB * KIB),
        'T' => Some(KIB * KIB * KIB * KIB),
        _ => None,
    }
}

/// Parse a size string such as `"452K"`, `"2.1M"`, `"800"` or `"3 G"` to bytes.
///
/// Accepts an unsigned decimal number, optional whitespace, and an optional
/// `K`/`M`/`G`/`T` suffix, and nothing else. Absent, empty and malformed
/// input all yield `0.0`.
pub fn parse_size_to_bytes(size: Option<&str>) -> f64 {
    size.and_then(parse_size).unwrap_or(0.0)
}

fn parse_size(s: &str) -> Option<f64> {
    let int_end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    if int_end == 0 {
        return None;
    }

    let mut number_end = int_end;
    if let Some(fraction) = s[int_end..].strip_prefix('.') {
        let digits = fraction.find(|c: char| !c.is_ascii_digit()).unwrap_or(fraction.len());
        if digits == 0 {
            return None;
        }
        number_end = int_end + 1 + digits;
    }

    let value: f64 = s[..number_end].parse().ok()?;

    let mut suffix = s[number_end..].trim_start().chars();
    let multiplier = match suffix.next() {
        None => 1.0,
        Some(unit) => unit_multiplier(unit)?,
    };
    if suffix.next().is_some() {
        return None;
    }

    Some(value * multiplier)
}

/// Format a byte count for display, e.g. `1536.0` -> `"1.5 KB"`.
///
/// Picks the largest unit up to TB that keeps the value at or above one,
/// rounds to two decimal places and drops trailing zeros. Zero, negative
/// and non-finite input render as `"0 Bytes"`.
pub fn format_bytes(bytes: f64) -> String {
    if !bytes.is_finite() || bytes <= 0.0 {
        return "0 Bytes".to_string();
    }

    let mut index = 0;
    while index + 1 < UNITS.len() && bytes >= KIB.powi(index as i32 + 1) {
        index += 1;
    }

    let scaled = bytes / KIB.powi(index as i32);
    let rounded = (scaled * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[index])
}

/// Index into the display unit table for a parsed size suffix (`""` is 0).
///
/// Useful for checking that a value round-trips into the same order of
/// magnitude it was written in.
pub fn unit_rank(unit: &str) -> Option<usize> {
    match unit.to_ascii_uppercase().as_str() {
        "" | "BYTES" => Some(0),
        "K" | "KB" => Some(1),
        "M" | "MB" => Some(2),
        "G" | "GB" => Some(3),
        "T" | "TB" => Some(4),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kilobytes() {
        assert_eq!(parse_size_to_bytes(Some("452K")), 462848.0);
        assert_eq!(parse_size_to_bytes(Some("452k")), 462848.0);
    }

    #[test]
    fn test_parse_fractional_megabytes() {
        let bytes = parse_size_to_bytes(Some("2.1M"));
        assert!((bytes - 2202009.6).abs() < 1e-6);
    }

    #[test]
    fn test_parse_plain_bytes_and_spacing() {
        assert_eq!(parse_size_to_bytes(Some("800")), 800.0);
        assert_eq!(parse_size_to_bytes(Some("3 G")), 3.0 * 1024.0 * 1024.0 * 1024.0);
        assert_eq!(parse_size_to_bytes(Some("1T")), 1024f64.powi(4));
        // Trailing whitespace only matches when there is no unit
        assert_eq!(parse_size_to_bytes(Some("12 ")), 12.0);
    }

    #[test]
    fn test_parse_malformed_is_zero() {
        assert_eq!(parse_size_to_bytes(None), 0.0);
        assert_eq!(parse_size_to_bytes(Some("")), 0.0);
        assert_eq!(parse_size_to_bytes(Some("bogus")), 0.0);
        assert_eq!(parse_size_to_bytes(Some(" 1K")), 0.0);
        assert_eq!(parse_size_to_bytes(Some("1K ")), 0.0);
        assert_eq!(parse_size_to_bytes(Some("1.K")), 0.0);
        assert_eq!(parse_size_to_bytes(Some(".5M")), 0.0);
        assert_eq!(parse_size_to_bytes(Some("1KB")), 0.0);
        assert_eq!(parse_size_to_bytes(Some("-1K")), 0.0);
        assert_eq!(parse_size_to_bytes(Some("2P")), 0.0);
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0.0), "0 Bytes");
        assert_eq!(format_bytes(512.0), "512 Bytes");
        assert_eq!(format_bytes(1024.0), "1 KB");
        assert_eq!(format_bytes(1536.0), "1.5 KB");
        assert_eq!(format_bytes(2621440.0), "2.5 MB");
        assert_eq!(format_bytes(1024f64.powi(3)), "1 GB");
    }

    #[test]
    fn test_format_bytes_clamps_to_table() {
        assert_eq!(format_bytes(1024f64.powi(5)), "1024 TB");
        assert_eq!(format_bytes(0.5), "0.5 Bytes");
        assert_eq!(format_bytes(-3.0), "0 Bytes");
        assert_eq!(format_bytes(f64::NAN), "0 Bytes");
    }

    #[test]
    fn test_format_rounds_to_two_places() {
        // 2.1M does not divide evenly; rounding keeps two decimals at most
        assert_eq!(format_bytes(parse_size_to_bytes(Some("2.1M"))), "2.1 MB");
        assert_eq!(format_bytes(1234567.0), "1.18 MB");
    }

    #[test]
    fn test_format_preserves_order_of_magnitude() {
        for (input, unit) in [
            ("7", ""),
            ("420K", "K"),
            ("1023K", "K"),
            ("1.8M", "M"),
            ("512m", "M"),
            ("3G", "G"),
            ("1.25T", "T"),
        ] {
            let rendered = format_bytes(parse_size_to_bytes(Some(input)));
            let rendered_unit = rendered.rsplit(' ').next().unwrap();
            assert_eq!(unit_rank(rendered_unit), unit_rank(unit), "{input} -> {rendered}");
        }
    }
}
