//! Fixed category codes
//!
//! The dataset is partitioned into four categories. The set is closed: the
//! persisted layout always carries exactly these keys.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A fixed named partition of the dataset
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum Category {
    #[default]
    GH18,
    CIV10,
    CIV13,
    CIV16,
}

impl Category {
    /// All categories, in display order
    pub const ALL: [Category; 4] = [
        Category::GH18,
        Category::CIV10,
        Category::CIV13,
        Category::CIV16,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::GH18 => "GH18",
            Category::CIV10 => "CIV10",
            Category::CIV13 => "CIV13",
            Category::CIV16 => "CIV16",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "GH18" => Some(Category::GH18),
            "CIV10" => Some(Category::CIV10),
            "CIV13" => Some(Category::CIV13),
            "CIV16" => Some(Category::CIV16),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
