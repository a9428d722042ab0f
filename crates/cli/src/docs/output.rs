//! Rendering of documentation results for the terminal.

use std::fmt::Write as _;

use clap::ValueEnum;
use console::style;
use serde::Serialize;
use skyctl_docs::{CatalogEntry, DocumentationResult, IndexStats};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable listing
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize output: {e}"))?;
    println!("{json}");
    Ok(())
}

pub fn render_results(query: &str, results: &[DocumentationResult]) -> String {
    if results.is_empty() {
        return format!("No documentation found for \"{query}\"\n");
    }

    let mut out = String::new();
    for (rank, result) in results.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {} {}",
            rank + 1,
            style(&result.title).bold(),
            style(format!("({:.2})", result.score)).dim()
        );
        let _ = writeln!(out, "   {} · {}", result.section, style(&result.url).cyan());
        if result.description != result.title {
            let _ = writeln!(out, "   {}", result.description);
        }
        if let Some(excerpt) = excerpt(&result.content) {
            let _ = writeln!(out, "   {}", style(excerpt).dim());
        }
        out.push('\n');
    }
    out
}

/// Entries grouped under their section headings, in manifest order.
pub fn render_catalog(entries: &[CatalogEntry]) -> String {
    if entries.is_empty() {
        return "No documentation pages found\n".to_string();
    }

    let mut out = String::new();
    let mut current: Option<&str> = None;
    for entry in entries {
        if current != Some(entry.section.as_str()) {
            if current.is_some() {
                out.push('\n');
            }
            let heading = if entry.section.is_empty() {
                "(no section)"
            } else {
                entry.section.as_str()
            };
            let _ = writeln!(out, "{}", style(heading).bold().underlined());
            current = Some(entry.section.as_str());
        }
        let _ = writeln!(out, "  {}  {}", entry.title, style(&entry.url).cyan());
    }
    out
}

pub fn render_stats(stats: &IndexStats, elapsed: &str) -> String {
    format!(
        "✅ Documentation index rebuilt: {} documents (generation {}) in {elapsed}\n",
        stats.documents, stats.generation
    )
}

/// First non-empty line of the page, cut short for a one-line preview.
fn excerpt(content: &str) -> Option<String> {
    const MAX_CHARS: usize = 100;

    let line = content.lines().map(str::trim).find(|l| !l.is_empty())?;
    match line.char_indices().nth(MAX_CHARS) {
        Some((cut, _)) => Some(format!("{}…", &line[..cut])),
        None => Some(line.to_string()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn result(title: &str, description: &str, content: &str) -> DocumentationResult {
        DocumentationResult {
            title: title.to_string(),
            url: format!("https://docs.test/{}.md", title.to_lowercase()),
            description: description.to_string(),
            section: "Compute".to_string(),
            content: content.to_string(),
            score: 2.5,
        }
    }

    fn entry(title: &str, section: &str) -> CatalogEntry {
        CatalogEntry {
            title: title.to_string(),
            url: format!("https://docs.test/{}.md", title.to_lowercase()),
            description: title.to_string(),
            section: section.to_string(),
        }
    }

    #[test]
    fn test_render_results() {
        let out = render_results(
            "autoscaling",
            &[
                result("Autoscaling", "Scale worker counts", "\n# Autoscaling\nMore text"),
                result("Pools", "Pools", ""),
            ],
        );
        assert!(out.contains("1. "));
        assert!(out.contains("Autoscaling"));
        assert!(out.contains("https://docs.test/autoscaling.md"));
        assert!(out.contains("Scale worker counts"));
        assert!(out.contains("# Autoscaling"));
        assert!(!out.contains("More text"));
        assert!(out.contains("2. "));
    }

    #[test]
    fn test_render_no_results() {
        assert_eq!(
            render_results("zzz", &[]),
            "No documentation found for \"zzz\"\n"
        );
    }

    #[test]
    fn test_render_catalog_groups_sections() {
        let out = render_catalog(&[
            entry("Install", "Getting Started"),
            entry("Login", "Getting Started"),
            entry("Pools", "Compute"),
        ]);
        assert_eq!(out.matches("Getting Started").count(), 1);
        assert_eq!(out.matches("Compute").count(), 1);
        let install = out.find("Install").unwrap();
        let compute = out.find("Compute").unwrap();
        assert!(install < compute);
    }

    #[test]
    fn test_excerpt() {
        assert_eq!(excerpt("\n\n  hello  \nworld").as_deref(), Some("hello"));
        assert_eq!(excerpt("   \n"), None);
        let long = "x".repeat(150);
        assert_eq!(excerpt(&long).unwrap().chars().count(), 101);
    }

    #[test]
    fn test_render_stats() {
        let stats = IndexStats {
            present: true,
            generation: 2,
            documents: 14,
        };
        let out = render_stats(&stats, "120ms");
        assert!(out.contains("14 documents"));
        assert!(out.contains("generation 2"));
        assert!(out.contains("120ms"));
    }
}
