/// Escapes the five HTML-significant characters.
///
/// Applied exactly once, at serialization time, by the HTML surfaces. Layout
/// trees always carry raw user text.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Splits free text into trimmed, non-empty lines (`\n` or `\r\n`).
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

const SLUG_MAX_LEN: usize = 60;

/// Lowercase ASCII slug: non-alphanumeric runs collapse to `-`, edges are
/// trimmed, length is capped. Returns `fallback` when nothing survives.
pub fn slugify(value: &str, fallback: &str) -> String {
    let mut slug = String::new();
    let mut pending_dash = false;

    for c in value.trim().chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    // ASCII-only, so byte truncation is safe.
    slug.truncate(SLUG_MAX_LEN);
    let slug = slug.trim_end_matches('-');

    if slug.is_empty() {
        fallback.to_string()
    } else {
        slug.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html_all_specials() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_html_plain_text_unchanged() {
        assert_eq!(escape_html("Senior Engineer"), "Senior Engineer");
        assert_eq!(escape_html(""), "");
    }

    #[test]
    fn test_split_lines_drops_blank_and_trims() {
        assert_eq!(
            split_lines("  Built X \r\n\n   \nShipped Y\n"),
            vec!["Built X".to_string(), "Shipped Y".to_string()]
        );
        assert!(split_lines("   \n  ").is_empty());
    }

    #[test]
    fn test_slugify_collapses_runs() {
        assert_eq!(slugify("  My Résumé -- 2024!! ", "resume"), "my-r-sum-2024");
        assert_eq!(slugify("Senior_Backend  Engineer", "resume"), "senior-backend-engineer");
    }

    #[test]
    fn test_slugify_fallback_and_cap() {
        assert_eq!(slugify("   ", "resume"), "resume");
        assert_eq!(slugify("!!!", "resume"), "resume");
        let long = "a".repeat(100);
        assert_eq!(slugify(&long, "resume").len(), 60);
        let dashed = format!("{} b", "a".repeat(59));
        assert_eq!(slugify(&dashed, "resume"), "a".repeat(59));
    }
}
