//! HTML Export Generation
//!
//! Renders document content to HTML: one element per block, list items
//! grouped into nested lists, inline styles as phrase elements, links as
//! anchors and atomic blocks as media.

use crate::document::{BlockType, ContentBlock, ContentState, InlineStyle};
use crate::editor::{block_style_class, media_block_for, MediaBlock};
use crate::error::{Error, Result};
use crate::theme::ThemeColors;
use eframe::egui::Color32;
use log::info;
use std::fs;
use std::path::Path;

// ─────────────────────────────────────────────────────────────────────────────
// HTML Generation
// ─────────────────────────────────────────────────────────────────────────────

/// Generate a complete, styled HTML document.
pub fn generate_html_document(
    content: &ContentState,
    title: &str,
    summary: &str,
    colors: &ThemeColors,
) -> Result<String> {
    let body = generate_html_fragment(content)?;
    let doc_title = if title.trim().is_empty() {
        "Untitled"
    } else {
        title
    };
    let preface = if summary.trim().is_empty() {
        String::new()
    } else {
        format!(
            "        <p class=\"ink-preface\">{}</p>\n",
            escape_text(summary)
        )
    };

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <meta name="generator" content="Inkpanel">
    <title>{title}</title>
    <style>
{base_css}
{theme_css}
    </style>
</head>
<body>
    <article class="ink-article">
        <h1 class="ink-title">{title}</h1>
{preface}{body}
    </article>
</body>
</html>"#,
        title = escape_text(doc_title),
        base_css = BASE_CSS,
        theme_css = generate_theme_css(colors),
        preface = preface,
        body = body,
    ))
}

/// Generate the HTML for the content alone, for the clipboard.
pub fn generate_html_fragment(content: &ContentState) -> Result<String> {
    let mut out = String::new();
    // Open list elements, innermost last: (tag, depth)
    let mut lists: Vec<(&'static str, u8)> = Vec::new();

    for block in content.blocks() {
        let list_tag = match block.block_type() {
            BlockType::UnorderedListItem => Some("ul"),
            BlockType::OrderedListItem => Some("ol"),
            _ => None,
        };

        match list_tag {
            Some(tag) => {
                let depth = block.depth();
                while let Some(&(open_tag, open_depth)) = lists.last() {
                    if open_depth > depth || (open_depth == depth && open_tag != tag) {
                        close_list(&mut out, &mut lists);
                    } else {
                        break;
                    }
                }
                while lists.last().map_or(true, |&(_, d)| d < depth) {
                    let next_depth = lists.last().map_or(0, |&(_, d)| d + 1).min(depth);
                    out.push_str(&format!("<{}>", tag));
                    lists.push((tag, next_depth));
                    if next_depth == depth {
                        break;
                    }
                }
                out.push_str(&format!(
                    "<li class=\"{}\">{}</li>\n",
                    block_style_class(block.block_type()).class_name(),
                    inline_html(block, content)
                ));
            }
            None => {
                while !lists.is_empty() {
                    close_list(&mut out, &mut lists);
                }
                out.push_str(&block_html(block, content)?);
                out.push('\n');
            }
        }
    }
    while !lists.is_empty() {
        close_list(&mut out, &mut lists);
    }
    Ok(out)
}

fn close_list(out: &mut String, lists: &mut Vec<(&'static str, u8)>) {
    if let Some((tag, _)) = lists.pop() {
        out.push_str(&format!("</{}>\n", tag));
    }
}

fn block_html(block: &ContentBlock, content: &ContentState) -> Result<String> {
    let class = block_style_class(block.block_type()).class_name();
    let html = match block.block_type() {
        BlockType::Atomic => match media_block_for(content, block)? {
            Some(media) => media_html(&media, class),
            None => String::new(),
        },
        BlockType::CodeBlock => format!(
            "<pre class=\"{}\"><code>{}</code></pre>",
            class,
            escape_text(block.text())
        ),
        block_type => {
            let tag = match block_type.heading_level() {
                Some(1) => "h1",
                Some(2) => "h2",
                Some(3) => "h3",
                Some(4) => "h4",
                Some(5) => "h5",
                Some(_) => "h6",
                None if *block_type == BlockType::Blockquote => "blockquote",
                None => "p",
            };
            format!(
                "<{tag} class=\"{class}\">{inner}</{tag}>",
                tag = tag,
                class = class,
                inner = inline_html(block, content)
            )
        }
    };
    Ok(html)
}

fn media_html(media: &MediaBlock, class: &str) -> String {
    match media {
        MediaBlock::Image { src, .. } => format!(
            "<figure class=\"{}\"><img src=\"{}\" alt=\"\"></figure>",
            class,
            escape_attr(src)
        ),
        MediaBlock::Video { src, .. } => format!(
            "<figure class=\"{}\"><video controls src=\"{}\"></video></figure>",
            class,
            escape_attr(src)
        ),
        MediaBlock::Divider => format!("<hr class=\"{}\">", class),
        MediaBlock::Embed { kind, src } => match src {
            Some(src) => format!(
                "<figure class=\"{}\" data-kind=\"{}\"><a href=\"{}\">{}</a></figure>",
                class,
                escape_attr(kind),
                escape_attr(src),
                escape_text(src)
            ),
            None => format!(
                "<figure class=\"{}\" data-kind=\"{}\"></figure>",
                class,
                escape_attr(kind)
            ),
        },
    }
}

/// Inline markup for a block's text.
fn inline_html(block: &ContentBlock, content: &ContentState) -> String {
    let mut out = String::new();
    for (start, end, meta) in block.style_runs() {
        let mut piece = escape_text(block.slice(start, end)).replace('\n', "<br>");
        for style in meta.style.iter().rev() {
            let tag = style_tag(*style);
            piece = format!("<{tag}>{piece}</{tag}>", tag = tag, piece = piece);
        }
        let url = meta
            .entity
            .and_then(|key| content.entity(key))
            .filter(|entity| entity.is_link())
            .and_then(|entity| entity.data.url());
        if let Some(url) = url {
            piece = format!("<a href=\"{}\">{}</a>", escape_attr(url), piece);
        }
        out.push_str(&piece);
    }
    out
}

fn style_tag(style: InlineStyle) -> &'static str {
    match style {
        InlineStyle::Bold => "strong",
        InlineStyle::Italic => "em",
        InlineStyle::Underline => "u",
        InlineStyle::Code => "code",
        InlineStyle::Strikethrough => "s",
    }
}

/// Write an HTML document to `path`.
pub fn export_to_html_file(html: &str, path: &Path) -> Result<()> {
    fs::write(path, html).map_err(|e| Error::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    info!("Exported HTML to {}", path.display());
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// CSS
// ─────────────────────────────────────────────────────────────────────────────

const BASE_CSS: &str = r#"
* { box-sizing: border-box; }
body {
    margin: 0;
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Helvetica, Arial, sans-serif;
    font-size: 16px;
    line-height: 1.7;
}
.ink-article {
    max-width: 720px;
    margin: 0 auto;
    padding: 40px 24px;
}
.ink-title { font-size: 2em; margin: 0 0 0.5em; }
.ink-preface { font-style: italic; margin-bottom: 2em; }
.ink-blockquote { margin: 1em 0; padding: 0 1em; border-left: 4px solid; }
.ink-code { padding: 12px 16px; border-radius: 4px; overflow: auto; }
.ink-atomic { margin: 1.5em 0; text-align: center; }
.ink-atomic img, .ink-atomic video { max-width: 100%; }
hr.ink-atomic { border: none; height: 1px; }
code { font-family: "SFMono-Regular", Consolas, "Liberation Mono", monospace; font-size: 0.9em; }
"#;

fn generate_theme_css(colors: &ThemeColors) -> String {
    format!(
        r#"
:root {{ color-scheme: {scheme}; }}
body {{ background-color: {bg}; color: {text}; }}
a {{ color: {link}; }}
.ink-preface {{ color: {secondary}; }}
.ink-blockquote {{ color: {quote_text}; border-left-color: {quote_border}; }}
.ink-code {{ background-color: {code_bg}; border: 1px solid {code_border}; color: {code}; }}
hr.ink-atomic {{ background-color: {divider}; }}
"#,
        scheme = if colors.is_dark() { "dark" } else { "light" },
        bg = css_color(colors.base.background),
        text = css_color(colors.text.primary),
        link = css_color(colors.text.link),
        secondary = css_color(colors.text.secondary),
        quote_text = css_color(colors.document.quote_text),
        quote_border = css_color(colors.document.quote_border),
        code_bg = css_color(colors.document.code_block_bg),
        code_border = css_color(colors.document.code_block_border),
        code = css_color(colors.text.code),
        divider = css_color(colors.document.divider),
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Utility Functions
// ─────────────────────────────────────────────────────────────────────────────

fn css_color(color: Color32) -> String {
    format!("rgb({}, {}, {})", color.r(), color.g(), color.b())
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
