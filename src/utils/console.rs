// src/utils/console.rs

//! Console report formatting with server-style timestamps.
//!
//! Diagnostics go through the `log` facade; this module only renders the
//! human-facing report on stdout.

use chrono::Local;

/// Width of separator and header rules.
const RULE_WIDTH: usize = 60;

/// Prefix a line with the current local time.
fn stamp(message: &str) -> String {
    format!("[{}] {}", Local::now().format("%H:%M:%S"), message)
}

/// Print a boxed header.
pub fn header(title: &str) {
    let border = "═".repeat(RULE_WIDTH);
    println!("{}", stamp(&border));
    println!("{}", stamp(&format!("  {title}")));
    println!("{}", stamp(&border));
}

/// Print a multi-line block verbatim, without timestamps.
pub fn block(text: &str) {
    println!("{text}");
}

pub fn separator() {
    println!("{}", "─".repeat(RULE_WIDTH));
}

/// Print a titled list of key/value pairs.
pub fn summary(title: &str, items: &[(&str, String)]) {
    println!();
    println!("{}", stamp(&format!("[SUMMARY] {title}")));
    for line in summary_lines(items) {
        println!("{line}");
    }
}

fn summary_lines(items: &[(&str, String)]) -> Vec<String> {
    items
        .iter()
        .map(|(key, value)| format!("    {key}: {value}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_lines_are_indented() {
        let lines = summary_lines(&[("notices", "3".to_string()), ("skipped", "1".to_string())]);
        assert_eq!(lines, vec!["    notices: 3", "    skipped: 1"]);
    }

    #[test]
    fn test_stamp_prefixes_time() {
        let line = stamp("hello");
        assert!(line.starts_with('['));
        assert!(line.ends_with("] hello"));
    }
}
