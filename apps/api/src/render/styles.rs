//! Embedded stylesheets: one shared base plus one block per template.
//!
//! The accent only ever enters through `--accent-color`, set once on `<body>`.

use crate::models::resume::PageSize;
use crate::templates::TemplateKind;

/// Page box in CSS pixels at 96dpi.
pub fn page_box(size: PageSize) -> (u32, u32) {
    match size {
        PageSize::Letter => (816, 1056),
        PageSize::A4 => (794, 1123),
    }
}

/// Padding used when the request does not carry a valid one.
pub fn default_padding(template: TemplateKind) -> &'static str {
    match template {
        TemplateKind::Classic => "52px 64px",
        TemplateKind::Modern | TemplateKind::MinimalImage => "0",
        TemplateKind::Minimal => "56px 64px",
        TemplateKind::Technical => "48px 56px",
    }
}

/// Short class used on sections and items (`section classic`, `item mi`, ...).
pub fn variant_class(template: TemplateKind) -> &'static str {
    match template {
        TemplateKind::Classic => "classic",
        TemplateKind::Modern => "modern",
        TemplateKind::Minimal => "minimal",
        TemplateKind::MinimalImage => "mi",
        TemplateKind::Technical => "technical",
    }
}

pub fn page_class(template: TemplateKind) -> &'static str {
    match template {
        TemplateKind::Classic => "classic-template",
        TemplateKind::Modern => "modern-template",
        TemplateKind::Minimal => "minimal-template",
        TemplateKind::MinimalImage => "minimal-image-template",
        TemplateKind::Technical => "technical-template",
    }
}

fn base(size: PageSize, margin: &str) -> String {
    let (width, height) = page_box(size);
    format!(
        "*{{box-sizing:border-box}}\
html,body{{margin:0;padding:0;color:#1f2937;font-family:'Inter','Segoe UI',Arial,sans-serif}}\
@page{{size:{page};margin:{margin}}}\
.resume-page{{width:{width}px;min-height:{height}px;background:#fff;margin:0 auto}}\
h1{{margin:0;font-size:32px;font-weight:700;letter-spacing:-0.01em;color:#0f172a}}\
.headline{{margin-top:6px;font-size:15px;color:#334155}}\
.contact-line{{margin-top:10px;display:flex;flex-wrap:wrap;gap:10px;font-size:13px;color:#475569}}\
.separator{{opacity:0.5}}\
.section{{margin-bottom:32px;break-inside:avoid-page}}\
.section-title{{font-size:13px;letter-spacing:0.18em;text-transform:uppercase;font-weight:600;margin:0 0 12px;color:var(--accent-color);break-after:avoid-page}}\
.section-text{{margin:0;font-size:14px;line-height:1.6}}\
.item{{margin-bottom:18px;break-inside:avoid-page}}\
.item.timeline{{padding-left:16px;border-left:2px solid var(--accent-color)}}\
.item-header{{display:flex;justify-content:space-between;align-items:flex-start;gap:16px;margin-bottom:4px}}\
.item-title{{margin:0;font-size:16px;font-weight:600;color:#0f172a}}\
.item-subtitle{{margin:2px 0;font-size:14px;font-weight:500;color:var(--accent-color)}}\
.item-dates{{margin:0;font-size:12px;color:#475569;white-space:nowrap}}\
.chip{{display:inline-flex;padding:4px 10px;border-radius:999px;font-size:12px;font-weight:500;color:#fff;background:var(--accent-color);white-space:nowrap}}\
.meta-line{{font-size:12px;color:#475569;margin:6px 0 0}}\
.description{{font-size:13px;line-height:1.55;margin:8px 0 0}}\
ul.description{{padding-left:18px}}\
.description li{{margin-bottom:6px}}\
.list-unstyled{{margin:0;padding:0;list-style:none}}\
.list-unstyled.tight li{{margin-bottom:10px}}\
.list-item{{margin-bottom:8px;font-size:13px}}\
.bold{{font-weight:600;color:#0f172a}}\
.muted{{color:#475569;font-size:12px}}\
.skills-grid{{display:flex;flex-wrap:wrap;gap:10px;margin:0;padding:0;list-style:none}}\
.pill{{border:1px solid var(--accent-color);color:var(--accent-color);padding:6px 12px;border-radius:999px;font-size:13px;font-weight:500}}\
.badge-row{{display:flex;flex-wrap:wrap;gap:10px}}\
.badge{{background:rgba(15,23,42,0.05);color:#0f172a;padding:6px 14px;border-radius:999px;font-size:13px}}\
.skills-table{{border-collapse:collapse;width:100%;font-size:13px}}\
.skills-table th{{text-align:left;vertical-align:top;white-space:nowrap;padding:2px 24px 2px 0;color:var(--accent-color)}}\
.skills-table td{{padding:2px 0}}\
.mi-photo{{width:128px;height:128px;object-fit:cover;border-radius:50%;display:block;margin:0 auto 20px}}",
        page = size.css_name(),
    )
}

fn template_rules(template: TemplateKind) -> &'static str {
    match template {
        TemplateKind::Classic => {
            ".classic-template .resume-header{text-align:center;border-bottom:3px solid var(--accent-color);padding-bottom:24px;margin-bottom:32px}\
.classic-template .contact-line{justify-content:center}\
.classic-template .section-title{border-bottom:1px solid rgba(15,23,42,0.12);padding-bottom:6px}"
        }
        TemplateKind::Modern => {
            ".modern-template .resume-header{padding:48px 56px 32px;background:var(--accent-color);color:#fff}\
.modern-template .resume-header h1{color:#fff}\
.modern-template .resume-header .headline,.modern-template .resume-header .contact-line{color:rgba(255,255,255,0.85)}\
.modern-template .resume-body{padding:40px 56px 48px}\
.modern-template .section-title{color:#0f172a;text-transform:none;font-size:18px;letter-spacing:0;font-weight:500;border-bottom:1px solid var(--accent-color);padding-bottom:12px}"
        }
        TemplateKind::Minimal => {
            ".minimal-template{font-weight:300}\
.minimal-template .resume-header{margin-bottom:28px}\
.minimal-template .section{margin-bottom:36px}\
.minimal-template .section-title{letter-spacing:0.22em;font-size:12px;font-weight:500}\
.minimal-template .item-title{font-weight:500}"
        }
        TemplateKind::MinimalImage => {
            ".mi-grid{display:grid;grid-template-columns:280px 1fr;min-height:inherit}\
.mi-sidebar{background:#111827;color:#f8fafc;padding:44px 32px}\
.mi-sidebar h1{color:#f8fafc;font-size:28px;margin-bottom:16px}\
.mi-sidebar .contact-line{color:rgba(248,250,252,0.8);margin-bottom:24px}\
.mi-sidebar .section-title{font-size:12px;letter-spacing:0.24em}\
.mi-sidebar .section{margin-bottom:24px}\
.mi-sidebar .list-item,.mi-sidebar .muted,.mi-sidebar .bold{color:rgba(248,250,252,0.85)}\
.mi-main{padding:52px 56px}\
.mi-main .section-title{letter-spacing:0.24em;font-size:12px}\
.mi-main .item{border-bottom:1px solid rgba(15,23,42,0.08);padding-bottom:18px;margin-bottom:24px}\
.mi-main .item:last-child{border-bottom:none}"
        }
        TemplateKind::Technical => {
            ".technical-template .resume-header{border-bottom:2px solid var(--accent-color);padding-bottom:20px;margin-bottom:28px}\
.technical-template .section{margin-bottom:28px}\
.technical-template .section-title{letter-spacing:0.24em;font-size:12px}"
        }
    }
}

/// Full stylesheet for one template on one page geometry.
pub fn stylesheet(template: TemplateKind, size: PageSize, margin: &str, padding: &str) -> String {
    let mut css = base(size, margin);
    css.push_str(&format!(".resume-page{{padding:{padding}}}"));
    css.push_str(template_rules(template));
    css
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stylesheet_declares_page_and_padding() {
        let css = stylesheet(TemplateKind::Classic, PageSize::A4, "0.5in", "52px 64px");
        assert!(css.contains("@page{size:A4;margin:0.5in}"));
        assert!(css.contains(".resume-page{padding:52px 64px}"));
        assert!(css.contains("width:794px"));
        assert!(css.contains(".classic-template .resume-header"));
    }

    #[test]
    fn test_accent_only_via_custom_property() {
        for template in TemplateKind::ALL {
            let css = stylesheet(template, PageSize::Letter, "0.5in", "0");
            assert!(!css.contains("#3FA9F5"), "{template:?} hardcodes the accent");
            assert!(css.contains("var(--accent-color)"));
        }
    }
}
