//! Static HTML surface.
//!
//! Serializes a [`Layout`] into one self-contained document. Every piece of
//! user text passes through [`escape_html`] exactly once, here.

use crate::format::{escape_html, page_margin, sanitize_padding};
use crate::models::resume::{PageSettings, DEFAULT_MARGIN};
use crate::render::preview::{decorations, PreviewMode};
use crate::render::styles::{default_padding, page_class, stylesheet, variant_class};
use crate::templates::{
    Columns, Description, Entry, EntryStyle, Header, Layout, SectionBlock, SectionBody,
    SkillsView, TemplateKind,
};

/// Renders a complete HTML document for the PDF engine or the preview frame.
pub fn render_document(
    layout: &Layout,
    page: &PageSettings,
    mode: PreviewMode,
    title: &str,
) -> String {
    let margin = match page_margin(&page.margin, page.size.twips()) {
        Some(_) => page.margin.trim(),
        None => DEFAULT_MARGIN,
    };
    let padding = page
        .padding
        .as_deref()
        .and_then(sanitize_padding)
        .unwrap_or_else(|| default_padding(layout.template).to_string());

    let mut css = stylesheet(layout.template, page.size, margin, &padding);
    css.push_str(&decorations(mode, page.size));

    let title = title.trim();
    let title = if title.is_empty() { "Resume" } else { title };
    let accent = escape_html(&layout.accent);

    format!(
        "<!doctype html><html lang=\"en\"><head><meta charset=\"utf-8\"/>\
<title>{title}</title><style>{css}</style></head>\
<body style=\"--accent-color:{accent}\">{page}</body></html>",
        title = escape_html(title),
        page = render_page(layout),
    )
}

/// The `.resume-page` element alone.
pub fn render_page(layout: &Layout) -> String {
    let template = layout.template;
    let mut out = format!(
        "<div class=\"resume-page {}\" data-accent=\"{}\">",
        page_class(template),
        escape_html(&layout.accent)
    );

    match &layout.columns {
        Columns::Single(blocks) => {
            render_header(&mut out, &layout.header, template);
            if template == TemplateKind::Modern {
                out.push_str("<div class=\"resume-body modern\">");
                render_sections(&mut out, blocks, template);
                out.push_str("</div>");
            } else {
                render_sections(&mut out, blocks, template);
            }
        }
        Columns::TwoColumn { sidebar, main } => {
            out.push_str("<div class=\"mi-grid\"><aside class=\"mi-sidebar\">");
            if let Some(src) = &layout.header.photo {
                out.push_str(&format!(
                    "<img class=\"mi-photo\" src=\"{}\" alt=\"Profile\"/>",
                    escape_html(src)
                ));
            }
            out.push_str(&format!("<h1>{}</h1>", escape_html(&layout.header.name)));
            render_contact(&mut out, &layout.header.contact);
            render_sections(&mut out, sidebar, template);
            out.push_str("</aside><main class=\"mi-main\">");
            render_sections(&mut out, main, template);
            out.push_str("</main></div>");
        }
    }

    out.push_str("</div>");
    out
}

fn render_header(out: &mut String, header: &Header, template: TemplateKind) {
    out.push_str(&format!(
        "<header class=\"resume-header {}\"><h1>{}</h1>",
        variant_class(template),
        escape_html(&header.name)
    ));
    if let Some(headline) = &header.headline {
        out.push_str(&format!("<p class=\"headline\">{}</p>", escape_html(headline)));
    }
    render_contact(out, &header.contact);
    out.push_str("</header>");
}

fn render_contact(out: &mut String, contact: &[String]) {
    if contact.is_empty() {
        return;
    }
    let items: Vec<String> = contact
        .iter()
        .map(|item| format!("<span>{}</span>", escape_html(item)))
        .collect();
    out.push_str("<div class=\"contact-line\">");
    out.push_str(&items.join("<span class=\"separator\">•</span>"));
    out.push_str("</div>");
}

fn render_sections(out: &mut String, blocks: &[SectionBlock], template: TemplateKind) {
    for block in blocks {
        render_section(out, block, template);
    }
}

fn render_section(out: &mut String, block: &SectionBlock, template: TemplateKind) {
    let variant = variant_class(template);
    out.push_str(&format!(
        "<section class=\"section {variant}\" data-section=\"{}\">",
        block.id.as_str()
    ));
    if let Some(title) = &block.title {
        out.push_str(&format!(
            "<h2 class=\"section-title {variant}\">{}</h2>",
            escape_html(title)
        ));
    }

    match &block.body {
        SectionBody::Text(lines) => {
            let lines: Vec<String> = lines.iter().map(|l| escape_html(l)).collect();
            out.push_str(&format!("<p class=\"section-text\">{}</p>", lines.join("<br/>")));
        }
        SectionBody::Entries { style, items } => match style {
            EntryStyle::Compact => render_compact(out, items),
            EntryStyle::Block | EntryStyle::Timeline => {
                for entry in items {
                    render_entry(out, entry, *style, template);
                }
            }
        },
        SectionBody::Skills(view) => render_skills(out, view),
    }

    out.push_str("</section>");
}

fn render_entry(out: &mut String, entry: &Entry, style: EntryStyle, template: TemplateKind) {
    let timeline = if style == EntryStyle::Timeline { " timeline" } else { "" };
    out.push_str(&format!(
        "<div class=\"item {}{timeline}\" data-item=\"{}\"><div class=\"item-header\"><div>",
        variant_class(template),
        escape_html(&entry.id)
    ));
    out.push_str(&format!("<p class=\"item-title\">{}</p>", escape_html(&entry.title)));
    if let Some(subtitle) = &entry.subtitle {
        out.push_str(&format!("<p class=\"item-subtitle\">{}</p>", escape_html(subtitle)));
    }
    out.push_str("</div>");
    if let Some(dates) = &entry.dates {
        match template {
            TemplateKind::Modern | TemplateKind::Technical => {
                out.push_str(&format!("<span class=\"chip\">{}</span>", escape_html(dates)))
            }
            _ => out.push_str(&format!("<p class=\"item-dates\">{}</p>", escape_html(dates))),
        }
    }
    out.push_str("</div>");
    if let Some(meta) = &entry.meta {
        out.push_str(&format!("<p class=\"meta-line\">{}</p>", escape_html(meta)));
    }
    render_description(out, &entry.description);
    out.push_str("</div>");
}

fn render_description(out: &mut String, description: &Description) {
    match description {
        Description::None => {}
        Description::Paragraph(line) => {
            out.push_str(&format!("<p class=\"description\">{}</p>", escape_html(line)));
        }
        Description::Bullets(lines) => {
            out.push_str("<ul class=\"description\">");
            for line in lines {
                out.push_str(&format!("<li>{}</li>", escape_html(line)));
            }
            out.push_str("</ul>");
        }
    }
}

fn render_compact(out: &mut String, items: &[Entry]) {
    out.push_str("<ul class=\"list-unstyled tight\">");
    for entry in items {
        out.push_str(&format!(
            "<li class=\"list-item\" data-item=\"{}\"><span class=\"bold\">{}</span>",
            escape_html(&entry.id),
            escape_html(&entry.title)
        ));
        for part in [&entry.subtitle, &entry.dates].into_iter().flatten() {
            out.push_str(&format!("<span class=\"muted\"> · {}</span>", escape_html(part)));
        }
        out.push_str("</li>");
    }
    out.push_str("</ul>");
}

fn tagged(out: &mut String, open: &str, close: &str, items: &[String]) {
    for item in items {
        out.push_str(open);
        out.push_str(&escape_html(item));
        out.push_str(close);
    }
}

fn render_skills(out: &mut String, view: &SkillsView) {
    match view {
        SkillsView::Pills(items) => {
            out.push_str("<ul class=\"skills-grid\">");
            tagged(out, "<li class=\"pill\">", "</li>", items);
            out.push_str("</ul>");
        }
        SkillsView::Badges(items) => {
            out.push_str("<div class=\"badge-row\">");
            tagged(out, "<span class=\"badge\">", "</span>", items);
            out.push_str("</div>");
        }
        SkillsView::List(items) => {
            out.push_str("<ul class=\"list-unstyled tight\">");
            tagged(out, "<li>", "</li>", items);
            out.push_str("</ul>");
        }
        SkillsView::Joined { separator, items } => {
            let items: Vec<String> = items.iter().map(|s| escape_html(s)).collect();
            out.push_str(&format!(
                "<p class=\"section-text\">{}</p>",
                items.join(&escape_html(separator))
            ));
        }
        SkillsView::Table(rows) => {
            out.push_str("<table class=\"skills-table\"><tbody>");
            for row in rows {
                let skills: Vec<String> = row.skills.iter().map(|s| escape_html(s)).collect();
                out.push_str(&format!(
                    "<tr><th>{}</th><td>{}</td></tr>",
                    escape_html(&row.category),
                    skills.join(", ")
                ));
            }
            out.push_str("</tbody></table>");
        }
    }
}
