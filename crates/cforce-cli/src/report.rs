//! Findings report.

use cforce_models::{Category, Finding, Severity};
use serde::Serialize;

/// One category block of the report.
#[derive(Debug, Serialize)]
pub struct Section<'a> {
    pub category: Category,
    pub label: &'static str,
    pub findings: Vec<&'a Finding>,
}

/// Findings grouped by category in report order.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub total: usize,
    pub critical: usize,
    pub high: usize,
    pub sections: Vec<Section<'a>>,
}

impl<'a> Report<'a> {
    /// Groups findings. Empty categories are kept so the layout is stable.
    pub fn new(findings: &'a [Finding]) -> Self {
        let count = |severity: Severity| findings.iter().filter(|f| f.severity == severity).count();

        let sections = Category::ALL
            .iter()
            .map(|&category| Section {
                category,
                label: category.label(),
                findings: findings.iter().filter(|f| f.category == category).collect(),
            })
            .collect();

        Self {
            total: findings.len(),
            critical: count(Severity::Critical),
            high: count(Severity::High),
            sections,
        }
    }

    /// Plain-text rendering.
    pub fn to_text(&self) -> String {
        if self.total == 0 {
            return "No findings. Run a scan first.".to_string();
        }

        let mut out = format!(
            "Findings: {} total, {} critical, {} high\n",
            self.total, self.critical, self.high
        );
        for section in &self.sections {
            out.push_str(&format!("\n{} ({})\n", section.label, section.findings.len()));
            for finding in &section.findings {
                out.push_str(&format!(
                    "  {}  {:<8} {:>4.1}  {}\n",
                    finding.id, finding.severity, finding.cvss, finding.title
                ));
                out.push_str(&format!(
                    "      {} | {}\n",
                    finding.component, finding.method
                ));
                out.push_str(&format!("      {}\n", finding.description));
            }
        }
        out
    }
}
