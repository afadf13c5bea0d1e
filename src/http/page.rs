//! Page assembly for the guide and the editor.

use std::time::SystemTime;

use chrono::{DateTime, Local};

use crate::render::escape_html;

const GUIDE_SCRIPT: &str = include_str!("../../resources/guide.js");

/// Everything the guide page needs to show one section
#[derive(Debug, Clone, PartialEq)]
pub struct SectionView {
    pub slug: String,
    pub name: String,
    pub error_count: usize,
    /// Rendered body fragment
    pub html: String,
}

/// Local-time stamp shown as "Last updated"
pub fn format_timestamp(time: SystemTime) -> String {
    DateTime::<Local>::from(time)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

fn badge(error_count: usize) -> String {
    if error_count > 0 {
        format!(r#"<span class="error-badge">{error_count}</span>"#)
    } else {
        r#"<span class="info-badge">ℹ</span>"#.to_string()
    }
}

fn head(title: &str) -> String {
    format!(
        r#"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="stylesheet" href="/style.css">
</head>
<body>
"#
    )
}

/// The browsable guide: filter, search box and every section
pub fn index_page(
    sections: &[SectionView],
    last_updated: Option<&str>,
    message: Option<&str>,
) -> String {
    let mut page = head("Troubleshooting Guide");

    page.push_str(
        r#"<header class="header">
    <h1>🔧 Troubleshooting Guide</h1>
    <p class="subtitle">Error codes, solutions &amp; quick reference</p>
</header>
"#,
    );

    if let Some(stamp) = last_updated {
        page.push_str(&format!(
            "<div class=\"last-updated\"><em>Last updated: {}</em></div>\n",
            escape_html(stamp)
        ));
    }

    if let Some(message) = message {
        page.push_str(&format!(
            "<div class=\"alert alert-success\" role=\"alert\">✓ {}</div>\n",
            escape_html(message)
        ));
    }

    page.push_str("<div class=\"container\">\n<div class=\"controls-section\">\n");

    if !sections.is_empty() {
        page.push_str(
            "<div class=\"control-group\">\n<label for=\"appSelect\">📂 Filter by Application:</label>\n\
             <select id=\"appSelect\" onchange=\"filterApp()\">\n\
             <option value=\"__all__\">All applications</option>\n",
        );
        for section in sections {
            page.push_str(&format!(
                "<option value=\"{}\">{}</option>\n",
                section.slug,
                escape_html(&section.name)
            ));
        }
        page.push_str("</select>\n</div>\n");
    }

    page.push_str(
        r#"<div class="control-group">
<label for="searchBox">🔍 Search:</label>
<input type="text" id="searchBox" placeholder="Type error code, error name, or keyword..." onkeyup="performSearch()" autocomplete="off">
<div id="searchResults" class="search-results" style="display: none;"></div>
<button id="collapseAll" class="small-btn">Collapse all</button>
<button id="expandAll" class="small-btn">Expand all</button>
<button id="darkModeToggle" class="small-btn">🌙</button>
</div>
</div>
<div id="sections" class="sections-container">
"#,
    );

    if sections.is_empty() {
        page.push_str(
            "<div class=\"section\"><p><em>No troubleshooting steps available yet.</em></p></div>\n",
        );
    }
    for section in sections {
        page.push_str(&format!(
            "<div class=\"section\" data-app=\"{}\"><h2>{} {}</h2>{}</div>\n",
            section.slug,
            escape_html(&section.name),
            badge(section.error_count),
            section.html
        ));
    }

    page.push_str(&format!(
        "</div>\n</div>\n<footer><p><a href=\"/editor\">📝 Edit Content</a></p></footer>\n\
         <script>\n{GUIDE_SCRIPT}</script>\n</body>\n</html>\n"
    ));

    page
}

/// The editor: append a section or replace the whole store
pub fn editor_page(raw_text: &str) -> String {
    let mut page = head("Troubleshooting Editor");

    page.push_str(&format!(
        r###"<div class="editor-container">
<header class="header"><h1>📝 Troubleshooting Editor</h1></header>
<p><a href="/">← Back to troubleshooting guide</a></p>
<div class="editor-form">
    <h2>Add New Application Section</h2>
    <form method="post" action="/editor">
        <div class="form-group">
            <label for="appName">Application Name:</label>
            <input type="text" id="appName" name="appName" placeholder="e.g. HP Printer Errors" required>
        </div>
        <div class="form-group">
            <label for="appSteps">Content:</label>
            <textarea id="appSteps" name="appSteps" placeholder="## Category Name&#10;- **Error Code**: Description and solution" required></textarea>
        </div>
        <button type="submit">Add Application</button>
    </form>
</div>
<div class="editor-form">
    <h2>Edit Full Content</h2>
    <form method="post" action="/editor">
        <div class="form-group">
            <textarea id="fullContent" name="fullContent">{}</textarea>
        </div>
        <button type="submit" name="action" value="save_full">Save Full Content</button>
    </form>
</div>
</div>
</body>
</html>
"###,
        escape_html(raw_text)
    ));

    page
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(slug: &str, name: &str, errors: usize) -> SectionView {
        SectionView {
            slug: slug.to_string(),
            name: name.to_string(),
            error_count: errors,
            html: "<p>body</p>".to_string(),
        }
    }

    #[test]
    fn test_index_lists_sections_with_badges() {
        let page = index_page(&[view("app0", "Printer", 2), view("app1", "<Wi-Fi>", 0)], None, None);

        assert!(page.contains(r#"<option value="app0">Printer</option>"#));
        assert!(page.contains(r#"<div class="section" data-app="app0"><h2>Printer <span class="error-badge">2</span></h2><p>body</p></div>"#));
        assert!(page.contains("&lt;Wi-Fi&gt; <span class=\"info-badge\">"));
    }

    #[test]
    fn test_index_escapes_message() {
        let page = index_page(&[], Some("2024-01-01 00:00:00"), Some("<script>"));

        assert!(page.contains("✓ &lt;script&gt;"));
        assert!(page.contains("Last updated: 2024-01-01 00:00:00"));
        assert!(page.contains("No troubleshooting steps available yet."));
        assert!(!page.contains("appSelect\" onchange"));
    }

    #[test]
    fn test_index_embeds_filter_script() {
        let page = index_page(&[view("app0", "Printer", 1)], None, None);

        assert!(page.contains("section.dataset.original = section.innerHTML"));
        assert!(page.contains("function highlightTerm(el, term)"));
        assert!(page.contains("topBtn.id = 'backToTop'"));
    }

    #[test]
    fn test_editor_prefills_escaped_text() {
        let page = editor_page("# A\n</textarea><b>");
        assert!(page.contains("# A\n&lt;/textarea&gt;&lt;b&gt;</textarea>"));
        assert!(page.contains(
            r###"placeholder="## Category Name&#10;- **Error Code**: Description and solution""###
        ));
    }

    #[test]
    fn test_timestamp_format() {
        let stamp = format_timestamp(SystemTime::now());
        assert_eq!(stamp.len(), 19);
        assert_eq!(&stamp[4..5], "-");
        assert_eq!(&stamp[13..14], ":");
    }
}
