//! Page shell shared by every HTML view.

use axum::response::Html;

/// Sidebar navigation shared across all pages.
pub const NAV_HTML: &str = include_str!("../../templates/nav.html");

/// ECharts is loaded from the CDN; `charts.js` mounts the options.
pub const CHART_SCRIPTS: &str = r#"<script src="https://cdn.jsdelivr.net/npm/echarts@5/dist/echarts.min.js"></script>
<script src="/static/js/charts.js"></script>"#;

/// Navigation with the link for `active_path` highlighted.
pub fn nav_html(active_path: &str) -> String {
    let needle = format!(r#"class="nav-link" data-path="{active_path}""#);
    let active = format!(r#"class="nav-link active" data-path="{active_path}""#);
    NAV_HTML.replacen(&needle, &active, 1)
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&'  => out.push_str("&amp;"),
            '<'  => out.push_str("&lt;"),
            '>'  => out.push_str("&gt;"),
            '"'  => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _    => out.push(c),
        }
    }
    out
}

/// Full HTML document around `body`. `scripts` goes right before `</body>`.
pub fn render_page(title: &str, active_path: &str, body: &str, scripts: &str) -> Html<String> {
    Html(format!(r#"<!DOCTYPE html>
<html lang="en" class="dark">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{} — EVH Legal Agent</title>
    <meta name="description" content="Entity compliance risk and document intelligence dashboard">
    <link rel="stylesheet" href="/static/css/main.css?v=1.0.0">
    <script src="/static/js/theme.js"></script>
</head>
<body>
<div class="app-container">
{}
<main class="main-content">
{}
</main>
</div>
{}
</body>
</html>"#, escape_html(title), nav_html(active_path), body, scripts))
}

/// Header block used at the top of each page.
pub fn page_header(title: &str, subtitle: &str, aside: &str) -> String {
    format!(r#"<div class="page-header">
    <div>
        <h1 class="page-title">{}</h1>
        <p class="text-muted">{}</p>
    </div>
    <div class="d-flex gap-2 align-center">{}</div>
</div>"#, escape_html(title), escape_html(subtitle), aside)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_marks_only_the_active_link() {
        let nav = nav_html("/entities");
        assert_eq!(nav.matches("nav-link active").count(), 1);
        assert!(nav.contains(r#"class="nav-link active" data-path="/entities""#));
        assert!(!nav_html("/nowhere").contains("nav-link active"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<a href="x">&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;&lt;/a&gt;");
    }

    #[test]
    fn test_overview_link_is_not_a_prefix_match() {
        // "/" must not mark every link active.
        let nav = nav_html("/");
        assert_eq!(nav.matches("nav-link active").count(), 1);
    }

    #[test]
    fn test_every_page_carries_the_theme_picker() {
        let Html(page) = render_page("Compliance", "/compliance", "<p></p>", "");
        assert!(page.contains(r#"<script src="/static/js/theme.js"></script>"#));
        assert!(page.contains("data-theme-select"));
        for theme in ["default", "garden", "dailyui"] {
            assert!(page.contains(&format!(r#"<option value="{theme}">"#)), "{theme}");
        }
    }
}
