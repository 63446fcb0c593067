//! Vulnerability findings produced by the passive scan.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Critical => "CRITICAL",
            Severity::High => "HIGH",
            Severity::Medium => "MEDIUM",
            Severity::Low => "LOW",
            Severity::Info => "INFO",
        };
        f.pad(s)
    }
}

/// Report grouping for findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Misconfig,
    Exposed,
    Outdated,
    Ssl,
    Cve,
    InfoDisc,
}

impl Category {
    /// Report order.
    pub const ALL: [Category; 6] = [
        Category::Misconfig,
        Category::Exposed,
        Category::Outdated,
        Category::Ssl,
        Category::Cve,
        Category::InfoDisc,
    ];

    /// Human readable group heading.
    pub fn label(self) -> &'static str {
        match self {
            Category::Misconfig => "Security Misconfigurations",
            Category::Exposed => "Exposed Services",
            Category::Outdated => "Outdated Software",
            Category::Ssl => "SSL / TLS Issues",
            Category::Cve => "Known CVEs",
            Category::InfoDisc => "Information Disclosure",
        }
    }
}

/// A single finding in the scan report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub id: String,
    pub title: String,
    pub severity: Severity,
    pub cvss: f32,
    pub component: String,
    pub description: String,
    pub category: Category,
    /// Detection technique that produced the finding.
    pub method: String,
}

impl Finding {
    #[allow(clippy::too_many_arguments)]
    fn fixed(
        id: &str,
        title: &str,
        severity: Severity,
        cvss: f32,
        component: &str,
        description: &str,
        category: Category,
        method: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            severity,
            cvss,
            component: component.to_string(),
            description: description.to_string(),
            category,
            method: method.to_string(),
        }
    }
}

/// The fixed findings table a completed scan reports.
pub fn default_findings() -> Vec<Finding> {
    vec![
        Finding::fixed(
            "V-102",
            "Apache 2.4.49 Path Traversal",
            Severity::Critical,
            9.8,
            "Web Server (Apache)",
            "Version 2.4.49 is vulnerable to path traversal (CVE-2021-41773). Immediate patching required.",
            Category::Cve,
            "Passive Banner Analysis",
        ),
        Finding::fixed(
            "V-205",
            "Exposed .git Directory",
            Severity::High,
            7.5,
            "Web Root",
            "Publicly accessible .git repository allows reconstruction of source code.",
            Category::InfoDisc,
            "Passive URI Check",
        ),
        Finding::fixed(
            "V-310",
            "Open Port 3389 (RDP)",
            Severity::High,
            7.1,
            "Network / Firewall",
            "Remote Desktop Protocol exposed to public internet. High risk of brute-force attacks.",
            Category::Exposed,
            "Passive Port Sweep",
        ),
        Finding::fixed(
            "V-401",
            "Missing HSTS Header",
            Severity::Medium,
            4.5,
            "HTTP Response",
            "Strict-Transport-Security header not present, allowing potential SSL stripping.",
            Category::Misconfig,
            "Header Analysis",
        ),
    ]
}
