//! Strips a fixed set of active content from user-supplied templates and stylesheets.
//!
//! Template HTML is cleaned twice: once as source, and again after Handlebars has
//! rendered it, since template syntax can split a token that rendering then rejoins.
//! Each pass repeats until nothing more is removed.

use std::sync::OnceLock;

use regex_lite::Regex;

struct Patterns {
    script_block: Regex,
    script_tag: Regex,
    event_handler: Regex,
    js_url: Regex,
    css_import: Regex,
    css_expression: Regex,
    style_close: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        script_block: compile(r"(?is)<script\b[^>]*>.*?</script\s*>"),
        script_tag: compile(r"(?i)</?script\b[^>]*>"),
        event_handler: compile(r#"(?i)[\s/]+on[a-z]+\s*=\s*("[^"]*"|'[^']*'|[^\s>]+)"#),
        js_url: compile(r"(?i)javascript\s*:"),
        css_import: compile(r"(?i)@import\b[^;]*;?"),
        css_expression: compile(r"(?i)expression\s*\("),
        style_close: compile(r"(?i)</\s*style"),
    })
}

fn compile(pattern: &str) -> Regex {
    // Patterns are literals; a failure here is a programming error caught by the tests.
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid sanitizer pattern {pattern}: {e}"))
}

/// Removes script blocks, inline event handlers and `javascript:` URLs from template HTML.
///
/// Removing one match can join its neighbours into a new one (`<sc onx="1"ript>`),
/// so passes repeat until the output is stable. Every pass only shortens the input.
pub fn sanitize_template(html: &str) -> String {
    let mut current = html.to_string();
    loop {
        let next = strip_active_html(&current);
        if next == current {
            return next;
        }
        current = next;
    }
}

fn strip_active_html(html: &str) -> String {
    let p = patterns();
    let out = p.script_block.replace_all(html, "");
    let out = p.script_tag.replace_all(&out, "");
    let out = p.event_handler.replace_all(&out, "");
    let out = p.js_url.replace_all(&out, "");
    out.into_owned()
}

/// Removes `@import`, `expression(`, `javascript:` and any attempt to close the style element.
pub fn sanitize_css(css: &str) -> String {
    let p = patterns();
    let out = p.css_import.replace_all(css, "");
    let out = p.css_expression.replace_all(&out, "(");
    let out = p.js_url.replace_all(&out, "");
    let out = p.style_close.replace_all(&out, "");
    out.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_compile() {
        let _ = patterns();
    }

    #[test]
    fn test_strips_script_block() {
        let html = "<h1>{{name}}</h1><script type=\"text/javascript\">\nalert(1)\n</script><p>x</p>";
        assert_eq!(sanitize_template(html), "<h1>{{name}}</h1><p>x</p>");
    }

    #[test]
    fn test_strips_orphan_script_tag() {
        assert_eq!(sanitize_template("<script src=\"x.js\"><p>a</p>"), "<p>a</p>");
    }

    #[test]
    fn test_strips_event_handlers() {
        let html = r#"<img src="a.png" onerror="steal()"><div onclick='x()' class="c">"#;
        assert_eq!(sanitize_template(html), r#"<img src="a.png"><div class="c">"#);
    }

    #[test]
    fn test_strips_slash_separated_event_handler() {
        assert_eq!(sanitize_template("<img src=x/onerror=alert(1)>"), "<img src=x>");
        assert_eq!(
            sanitize_template("<svg/onload=alert(1)>"),
            "<svg>"
        );
    }

    #[test]
    fn test_removal_that_rejoins_a_tag_is_caught() {
        let out = sanitize_template(r#"<sc onx="1"ript>alert(1)</script>"#);
        assert!(!out.to_lowercase().contains("<script"), "{out}");
        assert!(!out.contains("onx"));
    }

    #[test]
    fn test_strips_javascript_urls() {
        let html = r#"<a href="JavaScript:alert(1)">x</a>"#;
        assert_eq!(sanitize_template(html), r#"<a href="alert(1)">x</a>"#);
    }

    #[test]
    fn test_keeps_handlebars_and_plain_markup() {
        let html = "<section class=\"online\">{{#each skills}}<li>{{name}}</li>{{/each}}</section>";
        assert_eq!(sanitize_template(html), html);
    }

    #[test]
    fn test_css_import_and_expression() {
        let css = "@import url(evil.css);\nbody { width: expression(alert(1)); color: red; }";
        assert_eq!(
            sanitize_css(css),
            "\nbody { width: (alert(1)); color: red; }"
        );
    }

    #[test]
    fn test_css_cannot_close_style_element() {
        let css = "p{}</style><script>alert(1)</script>";
        assert!(!sanitize_css(css).to_lowercase().contains("</style"));
    }

    #[test]
    fn test_css_plain_untouched() {
        let css = "h1 { font-size: 18pt; margin: 0.5in; }";
        assert_eq!(sanitize_css(css), css);
    }
}
