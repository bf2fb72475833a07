//! The template renderer: sanitise, compile against document data, convert units,
//! and wrap the result in a standalone HTML page.

use handlebars::Handlebars;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::render::helpers::register_helpers;
use crate::render::sanitize::{sanitize_css, sanitize_template};
use crate::render::units::{convert_css_units, convert_inline_styles};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template failed to render: {0}")]
    Template(String),
}

/// Where the output is going. Preview rewrites print units to screen pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    #[default]
    Preview,
    Print,
}

/// An HTML/CSS pair to render.
#[derive(Debug, Clone)]
pub struct TemplateSource<'a> {
    pub html: &'a str,
    pub css: &'a str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedDocument {
    /// Full HTML page with the stylesheet inlined.
    pub html: String,
    pub mode: RenderMode,
}

pub struct TemplateRenderer {
    registry: Handlebars<'static>,
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer {
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(false);
        register_helpers(&mut registry);
        Self { registry }
    }

    /// Renders only the template body, without sanitising or wrapping.
    pub fn render_body(&self, html: &str, data: &Value) -> Result<String, RenderError> {
        self.registry
            .render_template(html, data)
            .map_err(|e| RenderError::Template(e.to_string()))
    }

    pub fn render(
        &self,
        source: &TemplateSource<'_>,
        data: &Value,
        mode: RenderMode,
        title: &str,
    ) -> Result<RenderedDocument, RenderError> {
        let template = sanitize_template(source.html);
        let css = sanitize_css(source.css);

        let body = sanitize_template(&self.render_body(&template, data)?);

        let (body, css) = match mode {
            RenderMode::Preview => (convert_inline_styles(&body), convert_css_units(&css)),
            RenderMode::Print => (body, css),
        };

        debug!(
            "Rendered template ({:?}): {} bytes body, {} bytes css",
            mode,
            body.len(),
            css.len()
        );

        Ok(RenderedDocument {
            html: wrap_page(title, &css, &body),
            mode,
        })
    }
}

fn wrap_page(title: &str, css: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>\n{}\n</style>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape_text(title),
        css,
        body
    )
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::builtin::{builtin_template, builtin_templates};
    use serde_json::json;

    fn resume_data() -> Value {
        json!({
            "documentType": "resume",
            "personalInfo": { "fullName": "Grace Hopper", "email": "grace@example.com", "phone": null },
            "experience": [
                { "company": "US Navy", "position": "Rear Admiral", "startDate": "1943-12", "endDate": "1986-08", "current": false },
                { "company": "Remington Rand", "position": "Senior Mathematician", "startDate": "1949-06", "current": true }
            ],
            "education": [{ "institution": "Yale", "degree": "PhD", "fieldOfStudy": "Mathematics", "endDate": "1934-06" }],
            "skills": [{ "name": "COBOL", "level": "expert" }]
        })
    }

    #[test]
    fn test_render_substitutes_and_escapes() {
        let renderer = TemplateRenderer::new();
        let source = TemplateSource {
            html: "<h1>{{personalInfo.fullName}}</h1>",
            css: "",
        };
        let data = json!({ "personalInfo": { "fullName": "<b>Eve</b>" } });
        let out = renderer
            .render(&source, &data, RenderMode::Print, "Resume")
            .unwrap();
        assert!(out.html.contains("<h1>&lt;b&gt;Eve&lt;/b&gt;</h1>"));
        assert!(out.html.starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn test_preview_converts_units_print_keeps_them() {
        let renderer = TemplateRenderer::new();
        let source = TemplateSource {
            html: "<p style=\"margin: 0.5in\">x</p>",
            css: "body { font-size: 12pt; }",
        };
        let data = json!({});

        let preview = renderer.render(&source, &data, RenderMode::Preview, "t").unwrap();
        assert!(preview.html.contains("font-size: 16px"));
        assert!(preview.html.contains("style=\"margin: 48px\""));

        let print = renderer.render(&source, &data, RenderMode::Print, "t").unwrap();
        assert!(print.html.contains("font-size: 12pt"));
        assert!(print.html.contains("style=\"margin: 0.5in\""));
    }

    #[test]
    fn test_render_sanitizes_before_compiling() {
        let renderer = TemplateRenderer::new();
        let source = TemplateSource {
            html: "<div onclick=\"x()\">{{name}}</div><script>alert(1)</script>",
            css: "@import url(x.css);",
        };
        let out = renderer
            .render(&source, &json!({ "name": "ok" }), RenderMode::Print, "t")
            .unwrap();
        assert!(out.html.contains("<div>ok</div>"));
        assert!(!out.html.contains("<script>"));
        assert!(!out.html.contains("@import"));
    }

    #[test]
    fn test_script_rejoined_by_template_comment_is_removed() {
        let renderer = TemplateRenderer::new();
        let source = TemplateSource {
            html: "<p>{{name}}</p><scr{{!x}}ipt>alert(1)</scr{{!x}}ipt>",
            css: "",
        };
        let out = renderer
            .render(&source, &json!({ "name": "a" }), RenderMode::Print, "t")
            .unwrap();
        assert!(out.html.contains("<p>a</p>"));
        assert!(!out.html.contains("<script"), "{}", out.html);
    }

    #[test]
    fn test_event_handler_rejoined_by_template_comment_is_removed() {
        let renderer = TemplateRenderer::new();
        let source = TemplateSource {
            html: "<img src=x/o{{!x}}nerror=alert(1)>",
            css: "",
        };
        let out = renderer
            .render(&source, &json!({}), RenderMode::Print, "t")
            .unwrap();
        assert!(out.html.contains("<img src=x>"));
        assert!(!out.html.contains("onerror"));
    }

    #[test]
    fn test_broken_template_is_an_error() {
        let renderer = TemplateRenderer::new();
        let source = TemplateSource {
            html: "{{#each experience}}<p>{{company}}</p>",
            css: "",
        };
        let result = renderer.render(&source, &resume_data(), RenderMode::Preview, "t");
        assert!(matches!(result, Err(RenderError::Template(_))));
    }

    #[test]
    fn test_classic_template_renders_resume() {
        let renderer = TemplateRenderer::new();
        let t = builtin_template("classic").unwrap();
        let out = renderer
            .render(
                &TemplateSource { html: t.html, css: t.css },
                &resume_data(),
                RenderMode::Preview,
                "Grace Hopper",
            )
            .unwrap();
        assert!(out.html.contains("Grace Hopper"));
        assert!(out.html.contains("Dec 1943 – Aug 1986"));
        assert!(out.html.contains("Jun 1949 – Present"));
        assert!(out.html.contains("COBOL (Expert)"));
        assert!(!out.html.contains("Personal Details"));
    }

    #[test]
    fn test_every_builtin_renders_every_document_type() {
        let renderer = TemplateRenderer::new();
        let samples = [
            resume_data(),
            json!({
                "documentType": "cv",
                "personalInfo": { "fullName": "A" },
                "education": [{ "institution": "Yale", "degree": "PhD", "endDate": "1934-06" }],
                "research": [{ "title": "Compilers", "institution": "Harvard", "endDate": "1944-05" }],
                "publications": [{ "title": "P", "year": "2020" }]
            }),
            json!({ "documentType": "biodata", "personalInfo": { "fullName": "B" }, "personalDetails": { "maritalStatus": "single" }, "family": [{ "name": "C", "relation": "father" }], "hobbies": ["chess"] }),
        ];
        for t in builtin_templates() {
            for data in &samples {
                let out = renderer.render(
                    &TemplateSource { html: t.html, css: t.css },
                    data,
                    RenderMode::Print,
                    "t",
                );
                let out = match out {
                    Ok(out) => out.html,
                    Err(e) => panic!("template {} failed: {e:?}", t.id),
                };
                // Nothing in the samples is ongoing except the resume's second job.
                assert!(!out.contains("Present – "), "template {} printed a range from Present", t.id);
                if data["documentType"] == "cv" {
                    assert!(out.contains("Jun 1934"), "template {} dropped the education date", t.id);
                }
            }
        }
    }
}
