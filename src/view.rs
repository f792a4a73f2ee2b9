//! Text views
//!
//! Each screen renders to a title plus a list of lines; the platform layer
//! decides how to put them on screen.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::store::{CategoryStats, Entry};

/// Screen selected in the submenu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ViewKind {
    /// Entry form plus the category's recorded entries
    #[default]
    Entries,
    /// Search by number
    Consult,
    /// Category totals
    Stats,
}

impl ViewKind {
    pub const ALL: [ViewKind; 3] = [ViewKind::Entries, ViewKind::Consult, ViewKind::Stats];

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewKind::Entries => "entries",
            ViewKind::Consult => "consult",
            ViewKind::Stats => "stats",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ViewKind::Entries => "Entries",
            ViewKind::Consult => "Consult",
            ViewKind::Stats => "Stats",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "entries" | "entry" => Some(ViewKind::Entries),
            "consult" | "search" => Some(ViewKind::Consult),
            "stats" => Some(ViewKind::Stats),
            _ => None,
        }
    }
}

/// A rendered screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub title: String,
    pub lines: Vec<String>,
}

impl fmt::Display for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        for line in &self.lines {
            writeln!(f, "  {line}")?;
        }
        Ok(())
    }
}

/// `3;7`, or a placeholder when nothing was recorded
fn format_values(values: &[u8]) -> String {
    if values.is_empty() {
        return "no value".to_string();
    }
    values
        .iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join(";")
}

pub fn entries_view(category: Category, entries: &[Entry]) -> Rendered {
    let lines = if entries.is_empty() {
        vec!["No entries".to_string()]
    } else {
        entries
            .iter()
            .map(|e| {
                format!(
                    "Num {:03}, P{} = {}",
                    e.num,
                    u16::from(e.pos) + 1,
                    format_values(&e.values)
                )
            })
            .collect()
    };
    Rendered {
        title: format!("Entries - {category} ({})", entries.len()),
        lines,
    }
}

/// Consult prompt before any search has been run
pub fn consult_view(category: Category) -> Rendered {
    Rendered {
        title: format!("Consult - {category}"),
        lines: Vec::new(),
    }
}

pub fn search_result_view(num: u16, matches: &[&Entry]) -> Rendered {
    let lines = if matches.is_empty() {
        vec!["No data for this number".to_string()]
    } else {
        matches
            .iter()
            .map(|e| format!("P{}: {}", u16::from(e.pos) + 1, format_values(&e.values)))
            .collect()
    };
    Rendered {
        title: format!("Number {num:03}:"),
        lines,
    }
}

pub fn stats_view(category: Category, stats: CategoryStats) -> Rendered {
    Rendered {
        title: format!("Stats - {category}"),
        lines: vec![
            format!("Positions filled: {}", stats.positions_filled),
            format!("Total values: {}", stats.total_values),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(num: u16, pos: u8, values: &[u8]) -> Entry {
        Entry {
            num,
            pos,
            values: values.to_vec(),
        }
    }

    #[test]
    fn test_entries_view() {
        let entries = [entry(5, 0, &[3, 7]), entry(120, 9, &[])];
        let view = entries_view(Category::GH18, &entries);
        assert_eq!(view.title, "Entries - GH18 (2)");
        assert_eq!(view.lines, ["Num 005, P1 = 3;7", "Num 120, P10 = no value"]);
    }

    #[test]
    fn test_entries_view_empty() {
        let view = entries_view(Category::CIV10, &[]);
        assert_eq!(view.title, "Entries - CIV10 (0)");
        assert_eq!(view.lines, ["No entries"]);
    }

    #[test]
    fn test_search_result_view() {
        let a = entry(7, 0, &[1]);
        let b = entry(7, 4, &[2, 2]);
        let view = search_result_view(7, &[&a, &b]);
        assert_eq!(view.title, "Number 007:");
        assert_eq!(view.lines, ["P1: 1", "P5: 2;2"]);

        let view = search_result_view(999, &[]);
        assert_eq!(view.lines, ["No data for this number"]);
    }

    #[test]
    fn test_stats_view() {
        let view = stats_view(
            Category::CIV16,
            CategoryStats {
                positions_filled: 2,
                total_values: 5,
            },
        );
        assert_eq!(view.to_string(), "Stats - CIV16\n  Positions filled: 2\n  Total values: 5\n");
    }

    #[test]
    fn test_max_u8_pos_does_not_overflow() {
        let e = entry(5, u8::MAX, &[1]);
        let view = entries_view(Category::GH18, std::slice::from_ref(&e));
        assert_eq!(view.lines, ["Num 005, P256 = 1"]);
        let view = search_result_view(5, &[&e]);
        assert_eq!(view.lines, ["P256: 1"]);
    }

    #[test]
    fn test_view_kind_from_str() {
        for kind in ViewKind::ALL {
            assert_eq!(ViewKind::from_str(kind.as_str()), Some(kind));
            assert_eq!(ViewKind::from_str(kind.label()), Some(kind));
        }
        assert_eq!(ViewKind::from_str("nope"), None);
    }
}
