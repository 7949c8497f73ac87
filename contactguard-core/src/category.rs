//! Detection categories and their fixed application order.
//!
//! License: MIT OR APACHE 2.0

use serde::{Deserialize, Serialize};
use std::fmt;

/// The class of contact-sharing signal a rule detects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Phone numbers in local or international formats.
    #[default]
    Phone,
    /// `local@domain.tld` shaped addresses.
    Email,
    /// Off-platform channel names and circumvention phrases.
    Keyword,
    /// `@handle` mentions.
    SocialHandle,
}

impl Category {
    /// The order in which categories are applied to a message.
    ///
    /// PHONE runs first so digit runs are consumed before anything else can
    /// partially match them. SOCIAL_HANDLE runs last so the `@domain` part of
    /// an email is already gone by the time handles are searched for.
    pub const APPLICATION_ORDER: [Category; 4] = [
        Category::Phone,
        Category::Email,
        Category::Keyword,
        Category::SocialHandle,
    ];

    /// Position of this category in [`Category::APPLICATION_ORDER`].
    pub fn order(self) -> usize {
        match self {
            Category::Phone => 0,
            Category::Email => 1,
            Category::Keyword => 2,
            Category::SocialHandle => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Phone => "phone",
            Category::Email => "email",
            Category::Keyword => "keyword",
            Category::SocialHandle => "social_handle",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_order_matches_order_index() {
        for (idx, category) in Category::APPLICATION_ORDER.iter().enumerate() {
            assert_eq!(category.order(), idx);
        }
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&Category::SocialHandle).unwrap();
        assert_eq!(json, "\"social_handle\"");
        let back: Category = serde_json::from_str("\"keyword\"").unwrap();
        assert_eq!(back, Category::Keyword);
    }
}
