use anyhow::Context;
use chrono::{DateTime, Utc};
use std::fmt::Write;
use std::fs;
use std::path::Path;

use crate::domain::summary::errors::SummaryError;
use crate::domain::summary::models::SummaryReport;
use crate::domain::summary::ports::SummaryRenderer;

pub const SUMMARY_EMAIL_TEMPLATE: &str = "summary_email.html";

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Fills `templates/summary_email.html` placeholders with report data.
#[derive(Debug, Clone)]
pub struct HtmlTemplateRenderer {
    template: String,
}

impl HtmlTemplateRenderer {
    pub fn new(template: String) -> Self {
        Self { template }
    }

    pub fn load(templates_dir: &Path) -> Result<Self, anyhow::Error> {
        let path = templates_dir.join(SUMMARY_EMAIL_TEMPLATE);
        let template = fs::read_to_string(&path)
            .with_context(|| format!("Failed to load template {}", path.display()))?;
        Ok(Self::new(template))
    }
}

impl SummaryRenderer for HtmlTemplateRenderer {
    fn render(&self, summary: &SummaryReport, host: &str) -> Result<String, SummaryError> {
        let mut user_rows = String::new();
        for user in &summary.users {
            writeln!(
                user_rows,
                "<tr><td>{}</td><td>{}</td></tr>",
                escape(&user.username),
                user.quantity
            )
            .map_err(|e| SummaryError::Render(e.to_string()))?;
        }

        let mut category_rows = String::new();
        for category in &summary.categories {
            writeln!(
                category_rows,
                "<tr><td>{}</td><td>{}</td></tr>",
                escape(&category.category),
                category.quantity
            )
            .map_err(|e| SummaryError::Render(e.to_string()))?;
        }

        let mut new_user_rows = String::new();
        for user in &summary.new_users {
            writeln!(
                new_user_rows,
                "<li>{} ({})</li>",
                escape(&user.username),
                format_date(user.created_at)
            )
            .map_err(|e| SummaryError::Render(e.to_string()))?;
        }

        Ok(self
            .template
            .replace("{from}", &format_date(summary.from))
            .replace("{to}", &format_date(summary.to))
            .replace("{quantity}", &summary.quantity.to_string())
            .replace("{total}", &summary.total.to_string())
            .replace("{new_users_count}", &summary.new_users.len().to_string())
            .replace("{user_rows}", &user_rows)
            .replace("{category_rows}", &category_rows)
            .replace("{new_user_rows}", &new_user_rows)
            .replace("{host}", &escape(host)))
    }
}

fn format_date(date: DateTime<Utc>) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
