//! Embedded page templates using the Tera template engine

use anyhow::Result;
use std::collections::HashMap;
use tera::{Context, Tera};

/// Template renderer with all page templates embedded in the binary
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Markdown output is already-sanitized HTML; autoescaping here
        // would double-escape it.
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("templates/layout.html")),
            ("blog_list.html", include_str!("templates/blog_list.html")),
            ("post.html", include_str!("templates/post.html")),
            ("error.html", include_str!("templates/error.html")),
        ])?;

        tera.register_filter("full_date", full_date_filter);

        Ok(Self { tera })
    }

    /// Render a template with the given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: format a YYYY-MM-DD date string like "February 8, 2022".
/// Unparseable input is returned as-is.
fn full_date_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("full_date", "value", String, value);

    if let Ok(date) = chrono::NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
        return Ok(tera::Value::String(date.format("%B %d, %Y").to_string()));
    }

    Ok(tera::Value::String(s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_compile() {
        TemplateRenderer::new().unwrap();
    }

    #[test]
    fn test_full_date_filter() {
        let args = HashMap::new();
        let out = full_date_filter(&tera::Value::String("2022-02-08".to_string()), &args).unwrap();
        assert_eq!(out, tera::Value::String("February 08, 2022".to_string()));

        let raw = full_date_filter(&tera::Value::String("not-a-date".to_string()), &args).unwrap();
        assert_eq!(raw, tera::Value::String("not-a-date".to_string()));
    }
}
