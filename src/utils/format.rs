pub struct FormatUtils;

impl FormatUtils {
    /// Human-readable size for the file rows, in binary units.
    pub fn format_size(bytes: u64) -> String {
        const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];
        if bytes < 1024 {
            return format!("{bytes} B");
        }

        let mut scaled = bytes as f64 / 1024.0;
        let mut unit = UNITS[0];
        for &next in &UNITS[1..] {
            if scaled < 1024.0 {
                break;
            }
            scaled /= 1024.0;
            unit = next;
        }
        format!("{scaled:.2} {unit}")
    }

    /// Fixed-point rendering where exact ties round away from zero.
    ///
    /// `format!("{:.N}")` breaks exact ties towards the even digit, so
    /// `0.03125` would come out as `0.0312`; this yields `0.0313`.
    /// Negative zero prints without a sign.
    pub fn to_fixed(value: f64, digits: usize) -> String {
        let value = if value == 0.0 { 0.0 } else { value };
        if !value.is_finite() {
            return value.to_string();
        }

        let exact = format!("{:.*}", digits + 40, value.abs());
        let tie = exact
            .find('.')
            .map(|dot| &exact[dot + 1 + digits..])
            .map(|tail| tail.starts_with('5') && tail[1..].bytes().all(|b| b == b'0'))
            .unwrap_or(false);

        if tie {
            let nudge = 10f64.powi(-(digits as i32 + 2));
            format!("{:.*}", digits, value + value.signum() * nudge)
        } else {
            format!("{:.*}", digits, value)
        }
    }
}
