//! Minimal markdown-to-HTML conversion for the report document.
//!
//! Only what the report emits is understood: `# ` and `## ` headings and
//! top-level `- ` list items. Every other line becomes a paragraph.

const STYLE: &str = "<style>body{font-family:-apple-system,BlinkMacSystemFont,Segoe UI,Roboto,Arial,sans-serif;\
padding:24px;color:#111}h1{margin-top:0}h2{margin-top:24px}\
ul{margin:8px 0 16px 24px}code{background:#f5f5f7;padding:2px 4px;border-radius:4px}</style>";

pub fn build_html(markdown: &str) -> String {
    let mut body = Vec::new();
    let mut list_open = false;

    for line in markdown.lines() {
        if let Some(text) = line.strip_prefix("# ") {
            close_list(&mut body, &mut list_open);
            body.push(format!("<h1>{}</h1>", escape(text)));
        } else if let Some(text) = line.strip_prefix("## ") {
            close_list(&mut body, &mut list_open);
            body.push(format!("<h2>{}</h2>", escape(text)));
        } else if let Some(text) = line.strip_prefix("- ") {
            if !list_open {
                body.push("<ul>".to_string());
                list_open = true;
            }
            body.push(format!("<li>{}</li>", escape(text)));
        } else if line.trim().is_empty() && list_open {
            close_list(&mut body, &mut list_open);
        } else {
            body.push(format!("<p>{}</p>", escape(line)));
        }
    }
    close_list(&mut body, &mut list_open);

    format!(
        "<html><head><meta charset='utf-8'>{STYLE}</head><body>{}</body></html>",
        body.join("\n")
    )
}

fn close_list(body: &mut Vec<String>, list_open: &mut bool) {
    if *list_open {
        body.push("</ul>".to_string());
        *list_open = false;
    }
}

/// Escape text for HTML element content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}
