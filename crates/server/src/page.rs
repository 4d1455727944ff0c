//! # Single-Page UI
//!
//! Server-rendered HTML for the content form, the notice area and the
//! formatted preview of the last result.

use crate::session::Notice;
use crate::types::SessionView;
use contentgen::ContentType;
use pulldown_cmark::{html, Event, Options, Parser};

const PAGE_STYLES: &str = r#"
    body { font-family: system-ui, sans-serif; margin: 0; display: flex; min-height: 100vh; }
    aside { width: 16rem; padding: 1.5rem; background: #f3f4f6; }
    main { flex: 1; padding: 1.5rem 2rem; max-width: 48rem; }
    label { display: block; margin-top: 0.75rem; font-weight: 600; }
    input, select { width: 100%; padding: 0.4rem; margin-top: 0.25rem; box-sizing: border-box; }
    .actions { margin-top: 1rem; display: flex; gap: 0.5rem; }
    .notice { padding: 0.75rem; border-radius: 0.25rem; margin: 1rem 0; }
    .notice.error { background: #fee2e2; color: #991b1b; }
    .notice.info { background: #dbeafe; color: #1e3a8a; }
    .preview {
      border-top: 1px solid #d1d5db; margin-top: 1.5rem; padding-top: 1rem; line-height: 1.6;
    }
"#;

/// Renders markdown to HTML. Raw HTML in the input is shown as text.
pub fn render_markdown(content: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);

    let parser = Parser::new_ext(content, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    html_output
}

/// Escapes text for use in HTML element content and quoted attributes.
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

fn content_type_options(selected: ContentType) -> String {
    ContentType::ALL
        .iter()
        .map(|ct| {
            let marker = if *ct == selected { " selected" } else { "" };
            format!(
                r#"<option value="{}"{marker}>{}</option>"#,
                ct.file_stem(),
                ct.label()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn notice_html(notice: Option<&Notice>) -> String {
    match notice {
        Some(Notice::Error(msg)) => {
            format!(r#"<div class="notice error">{}</div>"#, escape_html(msg))
        }
        Some(Notice::Info(msg)) => {
            format!(r#"<div class="notice info">{}</div>"#, escape_html(msg))
        }
        None => String::new(),
    }
}

fn key_entry_html(view: &SessionView) -> String {
    let status = if view.has_session_key {
        "<p>A key is saved for this session.</p>"
    } else {
        ""
    };
    format!(
        r#"<aside>
<h2>API Key</h2>
<form method="post" action="/credential">
<label for="api_key">OpenAI API Key</label>
<input type="password" id="api_key" name="api_key" autocomplete="off">
<div class="actions"><button type="submit">Save Key</button></div>
</form>
{status}
</aside>"#
    )
}

fn preview_html(view: &SessionView) -> String {
    match &view.result {
        Some(content) => format!(
            r#"<section class="preview">
<h2>Generated {}</h2>
{}
<p><a href="/download" download="{}">Download as PDF</a></p>
</section>"#,
            content.content_type.label(),
            render_markdown(&content.text),
            content.content_type.pdf_file_name(),
        ),
        None => String::new(),
    }
}

/// Renders the whole page for one session.
///
/// The API-key form is included only when `show_key_entry` is set, i.e. when
/// neither the secrets file nor the environment provides a key.
pub fn render_page(view: &SessionView, show_key_entry: bool) -> String {
    let sidebar = if show_key_entry {
        key_entry_html(view)
    } else {
        String::new()
    };
    let generating = if view.generating {
        r#"<p class="notice info">Generating content...</p>"#
    } else {
        ""
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Content Generator</title>
<style>{PAGE_STYLES}</style>
</head>
<body>
{sidebar}
<main>
<h1>Content Generator</h1>
{notice}
{generating}
<form method="post" action="/generate">
<label for="content_type">Content Type</label>
<select id="content_type" name="content_type">
{options}
</select>
<label for="sector">Industry Sector</label>
<input type="text" id="sector" name="sector" value="{sector}">
<label for="topic">Topic</label>
<input type="text" id="topic" name="topic" value="{topic}">
<div class="actions">
<button type="submit">Generate Content</button>
<button type="submit" formaction="/reset">Reset Fields</button>
</div>
</form>
{preview}
</main>
</body>
</html>"#,
        notice = notice_html(view.notice.as_ref()),
        options = content_type_options(view.content_type),
        sector = escape_html(&view.sector),
        topic = escape_html(&view.topic),
        preview = preview_html(view),
    )
}
