//! Handlebars helpers available to every template.

use chrono::NaiveDate;
use handlebars::{handlebars_helper, Handlebars};
use serde_json::Value;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

handlebars_helper!(format_date: |value: Json| format_date_value(value));
handlebars_helper!(capitalize: |value: Json| capitalize_value(value));
handlebars_helper!(eq: |a: Json, b: Json| loose_eq(a, b));
handlebars_helper!(gt: |a: Json, b: Json| loose_gt(a, b));

pub fn register_helpers(registry: &mut Handlebars<'_>) {
    registry.register_helper("formatDate", Box::new(format_date));
    registry.register_helper("capitalize", Box::new(capitalize));
    registry.register_helper("eq", Box::new(eq));
    registry.register_helper("gt", Box::new(gt));
}

/// `2021-03` / `2021-03-15` → `Mar 2021`. Empty or null means the entry is ongoing.
/// Anything else is passed through untouched.
pub fn format_date_value(value: &Value) -> String {
    let raw = match value {
        Value::Null => return "Present".to_string(),
        Value::String(s) => s.trim(),
        other => return other.to_string(),
    };
    if raw.is_empty() {
        return "Present".to_string();
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return month_year(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d") {
        return month_year(date);
    }
    raw.to_string()
}

fn month_year(date: NaiveDate) -> String {
    use chrono::Datelike;
    format!("{} {}", MONTHS[date.month0() as usize], date.year())
}

pub fn capitalize_value(value: &Value) -> String {
    let s = match value {
        Value::String(s) => s.as_str(),
        Value::Null => return String::new(),
        other => return other.to_string(),
    };
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Equality that treats `"3"` and `3` as the same value; form fields arrive as strings.
pub fn loose_eq(a: &Value, b: &Value) -> bool {
    if a == b {
        return true;
    }
    match (as_number(a), as_number(b)) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

pub fn loose_gt(a: &Value, b: &Value) -> bool {
    match (as_number(a), as_number(b)) {
        (Some(x), Some(y)) => x > y,
        _ => match (a, b) {
            (Value::String(x), Value::String(y)) => x > y,
            (Value::Array(x), Value::Array(y)) => x.len() > y.len(),
            _ => false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_date_month_precision() {
        assert_eq!(format_date_value(&json!("2021-03")), "Mar 2021");
    }

    #[test]
    fn test_format_date_day_precision() {
        assert_eq!(format_date_value(&json!("2019-12-24")), "Dec 2019");
    }

    #[test]
    fn test_format_date_empty_is_present() {
        assert_eq!(format_date_value(&json!("")), "Present");
        assert_eq!(format_date_value(&Value::Null), "Present");
    }

    #[test]
    fn test_format_date_passthrough() {
        assert_eq!(format_date_value(&json!("Summer 2020")), "Summer 2020");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize_value(&json!("advanced")), "Advanced");
        assert_eq!(capitalize_value(&json!("")), "");
        assert_eq!(capitalize_value(&json!("élan")), "Élan");
    }

    #[test]
    fn test_loose_eq_number_and_string() {
        assert!(loose_eq(&json!("3"), &json!(3)));
        assert!(loose_eq(&json!("expert"), &json!("expert")));
        assert!(!loose_eq(&json!("expert"), &json!("novice")));
    }

    #[test]
    fn test_loose_gt() {
        assert!(loose_gt(&json!(5), &json!("2")));
        assert!(!loose_gt(&json!(1), &json!(1)));
        assert!(loose_gt(&json!([1, 2]), &json!([1])));
        assert!(!loose_gt(&Value::Null, &json!(0)));
    }

    #[test]
    fn test_helpers_in_template() {
        let mut hb = Handlebars::new();
        register_helpers(&mut hb);
        let out = hb
            .render_template(
                "{{capitalize level}} since {{formatDate start}}{{#if (gt years 2)}} (senior){{/if}}{{#if (eq kind \"cv\")}} CV{{/if}}",
                &json!({ "level": "expert", "start": "2020-01", "years": "5", "kind": "cv" }),
            )
            .unwrap();
        assert_eq!(out, "Expert since Jan 2020 (senior) CV");
    }
}
