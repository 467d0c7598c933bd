//! Server-rendered HTML pages.
//!
//! The UI is deliberately small: an upload form, a file table, a share
//! confirmation page, and plain status pages. Everything user-supplied is
//! escaped before it reaches markup.

use axum::http::StatusCode;
use axum::response::Html;

use sharebox_storage::FileEntry;

/// Escape text for safe interpolation into HTML.
pub fn escape(text: &str) -> String {
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

/// Render a file size the way the listing shows it, e.g. `10.00 KB`.
pub fn format_size_kb(size_bytes: u64) -> String {
    format!("{:.2} KB", size_bytes as f64 / 1024.0)
}

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!doctype html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title} — Sharebox</title>\n</head>\n<body>\n\
         <h1>{title}</h1>\n{body}\n</body>\n</html>\n",
        title = escape(title),
    ))
}

/// The upload form, optionally with an inline validation error.
pub fn index_page(error: Option<&str>) -> Html<String> {
    let error_html = match error {
        Some(message) => format!("<p class=\"error\">{}</p>\n", escape(message)),
        None => String::new(),
    };
    let body = format!(
        "{error_html}\
         <form action=\"/upload\" method=\"post\" enctype=\"multipart/form-data\">\n\
         <input type=\"file\" name=\"file\">\n\
         <button type=\"submit\">Upload</button>\n\
         </form>\n\
         <p><a href=\"/list\">Browse files</a></p>"
    );
    layout("Upload a file", &body)
}

/// The file listing with per-file actions and an optional flash message.
pub fn files_page(files: &[FileEntry], flash: Option<(&str, &str)>) -> Html<String> {
    let flash_html = match flash {
        Some((message, kind)) => format!(
            "<p class=\"flash {}\">{}</p>\n",
            escape(kind),
            escape(message)
        ),
        None => String::new(),
    };

    let rows: String = files
        .iter()
        .map(|f| {
            let name = escape(&f.name);
            let encoded = urlencoding::encode(&f.name);
            format!(
                "<tr><td>{name}</td><td>{size}</td>\
                 <td><a href=\"/download/{encoded}\">Download</a> \
                 <a href=\"/share/{encoded}\">Share</a> \
                 <a href=\"/delete/{encoded}\">Delete</a></td></tr>\n",
                size = format_size_kb(f.size_bytes),
            )
        })
        .collect();

    let table = if files.is_empty() {
        "<p>No files uploaded yet.</p>".to_string()
    } else {
        format!(
            "<table>\n<tr><th>Name</th><th>Size</th><th>Actions</th></tr>\n{rows}</table>"
        )
    };

    let body = format!("{flash_html}{table}\n<p><a href=\"/\">Upload another file</a></p>");
    layout("Files", &body)
}

/// Confirmation page for a freshly minted share link.
pub fn share_page(file_name: &str, share_url: &str, expiration_days: i64) -> Html<String> {
    let body = format!(
        "<p>Sharing link for <strong>{name}</strong>:</p>\n\
         <p><a href=\"{url}\">{url}</a></p>\n\
         <p>This link expires in {expiration_days} days.</p>\n\
         <p><a href=\"/list\">Back to files</a></p>",
        name = escape(file_name),
        url = escape(share_url),
    );
    layout("Share link created", &body)
}

/// A plain status page, used for share resolution failures and as the
/// fallback error rendering.
pub fn message_page(status: StatusCode, message: &str) -> (StatusCode, Html<String>) {
    let title = status
        .canonical_reason()
        .unwrap_or("Error");
    let body = format!("<p>{}</p>", escape(message));
    (status, layout(title, &body))
}
