//! Page text normalization: encoding cleanup, repeated header/footer
//! stripping, whitespace collapsing
//!
//! Stages run in a fixed order: encoding cleanup first (boilerplate frequency
//! counts must see normalized text), then header/footer stripping, then
//! whitespace collapsing (which absorbs the blank lines removal leaves
//! behind).

use std::collections::{HashMap, HashSet};

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::config::CleaningConfig;
use crate::types::{CleanedDocument, Page, RawDocument};

pub struct TextCleaner {
    config: CleaningConfig,
    spaces: Regex,
    blank_lines: Regex,
    blank_groups: Regex,
    dot_runs: Regex,
}

impl TextCleaner {
    pub fn new(config: CleaningConfig) -> Self {
        Self {
            config,
            spaces: Regex::new(r"[ \t]+").expect("static regex"),
            blank_lines: Regex::new(r"\n{3,}").expect("static regex"),
            blank_groups: Regex::new(r"(?:\n\s*){3,}").expect("static regex"),
            // Runs of 4+ periods collapse to one; 1-3 dot ellipses survive.
            dot_runs: Regex::new(r"\.{4,}").expect("static regex"),
        }
    }

    /// Normalize every page of a document
    pub fn clean(&self, document: RawDocument) -> CleanedDocument {
        let mut pages: Vec<Page> = document
            .pages
            .into_iter()
            .map(|page| Page {
                index: page.index,
                content: clean_encoding(&page.content),
            })
            .collect();

        self.strip_headers_footers(&mut pages);

        for page in &mut pages {
            page.content = self.normalize_whitespace(&page.content);
        }

        CleanedDocument {
            doc_id: document.doc_id,
            pages,
            total_pages: document.total_pages,
            metadata: document.metadata,
        }
    }

    /// Remove lines that recur across pages in the same top/bottom window.
    ///
    /// Frequency is counted per region: a line frequent only at the bottom is
    /// not stripped from the top of any page.
    fn strip_headers_footers(&self, pages: &mut [Page]) {
        if pages.is_empty() {
            return;
        }
        let page_count = pages.len();

        let mut top_samples = Vec::new();
        let mut bottom_samples = Vec::new();
        for page in pages.iter() {
            let lines: Vec<&str> = page.content.lines().collect();
            for line in lines.iter().take(self.config.top_lines) {
                top_samples.push(normalize_line(line));
            }
            let bottom_start = lines.len().saturating_sub(self.config.bottom_lines);
            for line in &lines[bottom_start..] {
                bottom_samples.push(normalize_line(line));
            }
        }

        let bad_top = frequent(&top_samples, page_count, self.config.freq_threshold);
        let bad_bottom = frequent(&bottom_samples, page_count, self.config.freq_threshold);
        if bad_top.is_empty() && bad_bottom.is_empty() {
            return;
        }

        for page in pages.iter_mut() {
            let lines: Vec<&str> = page.content.lines().collect();
            let total = lines.len();
            let bottom_start = total.saturating_sub(self.config.bottom_lines);
            let kept: Vec<&str> = lines
                .iter()
                .enumerate()
                .filter(|(i, line)| {
                    let normalized = normalize_line(line);
                    if *i < self.config.top_lines && bad_top.contains(&normalized) {
                        return false;
                    }
                    if *i >= bottom_start && bad_bottom.contains(&normalized) {
                        return false;
                    }
                    true
                })
                .map(|(_, line)| *line)
                .collect();
            page.content = kept.join("\n");
        }
    }

    /// Collapse space/tab runs, blank-line runs, and long period runs
    fn normalize_whitespace(&self, text: &str) -> String {
        let text = self.spaces.replace_all(text, " ");
        let text = self.blank_lines.replace_all(&text, "\n\n");
        let text = self.blank_groups.replace_all(&text, "\n\n");
        let text = self.dot_runs.replace_all(&text, ".");
        text.trim().to_string()
    }
}

/// NFKC normalization plus removal of non-printable control characters
/// (tab, newline, and carriage return survive)
fn clean_encoding(text: &str) -> String {
    text.nfkc().filter(|c| !is_stripped_control(*c)).collect()
}

fn is_stripped_control(c: char) -> bool {
    matches!(c, '\u{00}'..='\u{08}' | '\u{0b}' | '\u{0c}' | '\u{0e}'..='\u{1f}')
}

fn normalize_line(line: &str) -> String {
    line.trim().to_lowercase()
}

/// Lines whose occurrence count across pages meets the threshold fraction
fn frequent(samples: &[String], page_count: usize, threshold: f64) -> HashSet<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for line in samples {
        if !line.is_empty() {
            *counts.entry(line.as_str()).or_default() += 1;
        }
    }
    counts
        .into_iter()
        .filter(|(_, count)| *count as f64 / page_count as f64 >= threshold)
        .map(|(line, _)| line.to_string())
        .collect()
}
