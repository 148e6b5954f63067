//! CSS length handling for print geometry.

const TWIPS_PER_INCH: f64 = 1440.0;

/// Default page margin (0.5in) in twips.
pub const DEFAULT_MARGIN_TWIPS: u32 = 720;

fn parse_length(token: &str) -> Option<(f64, &str)> {
    let token = token.trim();
    let split = token
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(token.len());
    let (number, unit) = token.split_at(split);
    let value: f64 = number.parse().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    Some((value, unit))
}

/// Converts a single CSS length (`in`, `cm`, `mm`, `pt`, `px`) to twips.
///
/// Returns `None` for multi-value shorthands, anything unparseable, and values
/// too large to represent; callers substitute [`DEFAULT_MARGIN_TWIPS`].
pub fn to_twips(css: &str) -> Option<u32> {
    let mut tokens = css.split_whitespace();
    let token = tokens.next()?;
    if tokens.next().is_some() {
        return None;
    }
    let (value, unit) = parse_length(token)?;
    let twips = match unit {
        "in" => value * TWIPS_PER_INCH,
        "cm" => value / 2.54 * TWIPS_PER_INCH,
        "mm" => value / 25.4 * TWIPS_PER_INCH,
        "pt" => value / 72.0 * TWIPS_PER_INCH,
        "px" => value / 96.0 * TWIPS_PER_INCH,
        // Unitless lengths are only valid CSS for zero.
        "" if value == 0.0 => 0.0,
        _ => return None,
    }
    .round();
    (twips <= f64::from(u32::MAX)).then_some(twips as u32)
}

/// Validates a page margin against a page of `page` twips.
///
/// The margin must be a single length and leave room for content: it has to
/// stay below half of the page's shorter side. Both the HTML `@page` rule and
/// the DOCX geometry go through this check, so they agree on the margin.
pub fn page_margin(css: &str, page: (u32, u32)) -> Option<u32> {
    let twips = to_twips(css)?;
    let limit = page.0.min(page.1) / 2;
    (twips < limit).then_some(twips)
}

/// Accepts a CSS padding shorthand of one to four lengths.
///
/// Anything else (including attempts to smuggle extra declarations) is
/// rejected so it never reaches a `style` attribute.
pub fn sanitize_padding(padding: &str) -> Option<String> {
    let tokens: Vec<&str> = padding.split_whitespace().collect();
    if tokens.is_empty() || tokens.len() > 4 {
        return None;
    }
    let valid = tokens.iter().all(|t| match parse_length(t) {
        Some((value, unit)) => {
            matches!(unit, "px" | "in" | "cm" | "mm" | "pt" | "em" | "rem")
                || (unit.is_empty() && value == 0.0)
        }
        None => false,
    });
    valid.then(|| tokens.join(" "))
}
