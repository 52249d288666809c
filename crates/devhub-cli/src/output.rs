//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use std::fmt::Write as _;

use anyhow::Result;
use serde::Serialize;

use devhub_core::card::{clamp, CardConfig, ComponentCard};
use devhub_core::models::Unfurl;
use devhub_core::page::{HomePage, Section};
use devhub_core::search::SearchIndex;
use devhub_core::SearchHit;

/// Column width used when wrapping card text
const CARD_WIDTH: usize = 72;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
    /// Card text limits for human output
    pub card: CardConfig,
}

impl Output {
    pub fn new(format: OutputFormat, card: CardConfig) -> Self {
        Self { format, card }
    }

    /// Print the composed home page
    pub fn print_home_page(&self, page: &HomePage) -> Result<()> {
        match self.format {
            OutputFormat::Human => print!("{}", render_home_page(page, &self.card)),
            OutputFormat::Json => print_json(page)?,
            OutputFormat::Quiet => {
                for preview in page.resource_previews() {
                    for resource in &preview.resources {
                        println!("{}", resource.id);
                    }
                }
            }
        }
        Ok(())
    }

    /// Print search hits with the titles stored in the index
    pub fn print_search_hits(&self, hits: Option<&[SearchHit]>, index: &SearchIndex) -> Result<()> {
        let hits = hits.unwrap_or_default();
        match self.format {
            OutputFormat::Human => {
                if hits.is_empty() {
                    println!("No results found.");
                    return Ok(());
                }
                for hit in hits {
                    let (title, kind) = index
                        .document(&hit.id)
                        .map(|doc| (doc.title.as_str(), doc.resource_type.as_str()))
                        .unwrap_or(("(unknown)", ""));
                    println!(
                        "{:>6.2} | {} | {} | {}",
                        hit.score,
                        truncate(hit.id.as_str(), 12),
                        truncate(title, 45),
                        kind
                    );
                }
                println!("\n{} result(s)", hits.len());
            }
            OutputFormat::Json => print_json(&hits)?,
            OutputFormat::Quiet => {
                for hit in hits {
                    println!("{}", hit.id);
                }
            }
        }
        Ok(())
    }

    /// Print metadata unfurled from a URL
    pub fn print_unfurl(&self, unfurl: &Unfurl) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                println!("Title:       {}", unfurl.title);
                if let Some(ref desc) = unfurl.description {
                    println!("Description: {}", desc);
                }
                if let Some(ref image) = unfurl.image {
                    println!("Image:       {}", image);
                }
                if let Some(ref author) = unfurl.author {
                    println!("Author:      {}", author);
                }
            }
            OutputFormat::Json => print_json(unfurl)?,
            OutputFormat::Quiet => println!("{}", unfurl.title),
        }
        Ok(())
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Human-readable rendering of a home page
pub fn render_home_page(page: &HomePage, card: &CardConfig) -> String {
    let mut out = String::new();
    if !page.query.is_empty() {
        let _ = writeln!(out, "Search: {}", page.query);
        out.push('\n');
    }

    for section in &page.sections {
        match section {
            Section::Topics { topics } => {
                let _ = writeln!(out, "── Topics ({}) ──", topics.len());
                for topic in topics {
                    let _ = writeln!(out, "{}  {}", topic.name, topic.link);
                    let counts: Vec<String> = topic
                        .resources
                        .iter()
                        .map(|(kind, resources)| format!("{} ({})", kind, resources.len()))
                        .collect();
                    if !counts.is_empty() {
                        let _ = writeln!(out, "  {}", counts.join(", "));
                    }
                }
                out.push('\n');
            }
            Section::NoResults { message } => {
                let _ = writeln!(out, "{}", message);
            }
            Section::Resources { preview } => {
                let _ = writeln!(out, "── {} ──", preview.resource_type);
                for resource in &preview.resources {
                    render_card(&mut out, &ComponentCard::from_record(resource), card);
                }
                let _ = writeln!(out, "{} → {}", preview.link.text, preview.link.to);
                out.push('\n');
            }
        }
    }
    out
}

fn render_card(out: &mut String, card: &ComponentCard, config: &CardConfig) {
    for line in clamp(&card.title, config.max_title_lines, CARD_WIDTH) {
        let _ = writeln!(out, "• {}", line);
    }
    for line in clamp(&card.description, config.max_description_lines, CARD_WIDTH) {
        let _ = writeln!(out, "  {}", line);
    }
    if !card.resource_path.is_empty() {
        let _ = writeln!(out, "  {}", card.resource_path);
    }
    if !card.source_name.is_empty() {
        let _ = writeln!(out, "  from {}", card.source_name);
    }
}

/// Truncate a string to max characters, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
