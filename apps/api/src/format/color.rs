use once_cell::sync::Lazy;
use regex::Regex;

/// Accent used whenever the stored or requested color is not a hex color.
pub const DEFAULT_ACCENT: &str = "#3FA9F5";

static HEX_COLOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#(?:[0-9a-fA-F]{3}){1,2}$").expect("hex color pattern is valid")
});

/// Returns the trimmed value if it is a 3- or 6-digit hex color, otherwise
/// [`DEFAULT_ACCENT`].
pub fn sanitize_color(value: &str) -> String {
    let trimmed = value.trim();
    if HEX_COLOR.is_match(trimmed) {
        trimmed.to_string()
    } else {
        DEFAULT_ACCENT.to_string()
    }
}

/// Six uppercase hex digits without `#`, as DOCX run colors expect.
///
/// Input must already be sanitized.
pub fn docx_hex(color: &str) -> String {
    let digits = color.trim_start_matches('#');
    if digits.len() == 3 {
        digits
            .chars()
            .flat_map(|c| [c, c])
            .collect::<String>()
            .to_ascii_uppercase()
    } else {
        digits.to_ascii_uppercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_colors_pass_through() {
        assert_eq!(sanitize_color("#10B981"), "#10B981");
        assert_eq!(sanitize_color("#abc"), "#abc");
        assert_eq!(sanitize_color("  #1e3a8a "), "#1e3a8a");
    }

    #[test]
    fn test_invalid_colors_fall_back() {
        for bad in ["red", "", "#12", "#1234", "#ggg", "10B981", "#10B981;background:url(x)"] {
            assert_eq!(sanitize_color(bad), DEFAULT_ACCENT, "input {bad:?}");
        }
    }

    #[test]
    fn test_docx_hex_expands_short_form() {
        assert_eq!(docx_hex("#abc"), "AABBCC");
        assert_eq!(docx_hex("#3fa9f5"), "3FA9F5");
    }
}
