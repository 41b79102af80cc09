use serde::{Deserialize, Serialize};

/// Closed set of log categories.
///
/// Consumers resolve a category to presentation (icon, color) themselves;
/// the tag is data, not a handle into any UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    AiWeb3,
    Cryptography,
    SecurityAudit,
    Blockchain,
    #[default]
    General,
}

impl Category {
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::AiWeb3 => "AI_WEB3",
            Category::Cryptography => "CRYPTOGRAPHY",
            Category::SecurityAudit => "SECURITY_AUDIT",
            Category::Blockchain => "BLOCKCHAIN",
            Category::General => "GENERAL",
        }
    }
}

/// One blog post, in the wire shape of the post API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    /// Publication date as `YYYY.MM.DD`; lexical order is date order.
    pub date: String,
    pub category: Category,
    pub author: String,
    pub read_time: String,
    pub preview: String,
    pub content: String,
}

impl Post {
    /// Sorts newest-first by date, id as tie-breaker for stability.
    pub fn sort_newest_first(posts: &mut [Post]) {
        posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
    }
}
