//! Physical → screen unit conversion for preview rendering.
//!
//! Templates are authored in print units (`in`, `pt`). Browsers scale those poorly
//! inside a preview pane, so preview output rewrites them to CSS pixels at 96 dpi.

use std::sync::OnceLock;

use regex_lite::{Captures, Regex};

pub const PX_PER_INCH: f64 = 96.0;
pub const PX_PER_POINT: f64 = PX_PER_INCH / 72.0;

fn length_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(^|[^A-Za-z0-9_.])(-?\d*\.?\d+)(in|pt)\b")
            .unwrap_or_else(|e| panic!("invalid length pattern: {e}"))
    })
}

fn style_attr_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"(?i)style\s*=\s*"([^"]*)""#)
            .unwrap_or_else(|e| panic!("invalid style attribute pattern: {e}"))
    })
}

pub fn inches_to_px(inches: f64) -> f64 {
    inches * PX_PER_INCH
}

pub fn points_to_px(points: f64) -> f64 {
    points * PX_PER_POINT
}

/// Formats a pixel length with at most two decimals and no trailing zeros.
pub fn format_px(px: f64) -> String {
    let rounded = (px * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{}px", rounded as i64)
    } else {
        format!("{rounded}px")
    }
}

/// Rewrites every `<n>in` and `<n>pt` length in a stylesheet to pixels.
pub fn convert_css_units(css: &str) -> String {
    length_pattern()
        .replace_all(css, |caps: &Captures| {
            let prefix = caps.get(1).map_or("", |m| m.as_str());
            let number = caps.get(2).map_or("", |m| m.as_str());
            let unit = caps.get(3).map_or("", |m| m.as_str());
            match number.parse::<f64>() {
                Ok(n) => {
                    let px = if unit == "in" { inches_to_px(n) } else { points_to_px(n) };
                    format!("{prefix}{}", format_px(px))
                }
                Err(_) => caps.get(0).map_or(String::new(), |m| m.as_str().to_string()),
            }
        })
        .into_owned()
}

/// Applies [`convert_css_units`] to inline `style="…"` attributes only; text content is left alone.
pub fn convert_inline_styles(html: &str) -> String {
    style_attr_pattern()
        .replace_all(html, |caps: &Captures| {
            let style = caps.get(1).map_or("", |m| m.as_str());
            format!("style=\"{}\"", convert_css_units(style))
        })
        .into_owned()
}
