//! Educational articles (read-only).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ArticleCategory {
    Prevention,
    Symptoms,
    Treatment,
    General,
}

impl ArticleCategory {
    pub fn label(&self) -> &'static str {
        match self {
            ArticleCategory::Prevention => "Prevention Tips",
            ArticleCategory::Symptoms => "Early Symptoms",
            ArticleCategory::Treatment => "Treatment Options",
            ArticleCategory::General => "General Eye Care",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub category: ArticleCategory,
    #[serde(default)]
    pub author_name: String,
    pub created_at: DateTime<Utc>,
}

/// Articles in `category`, or all of them for `None`.
pub fn filter_by_category(
    articles: &[Article],
    category: Option<ArticleCategory>,
) -> Vec<&Article> {
    articles
        .iter()
        .filter(|a| category.is_none_or(|c| a.category == c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn article(id: u64, category: &str) -> Article {
        serde_json::from_value(json!({
            "id": id,
            "title": "Twenty-twenty-twenty",
            "content": "Every 20 minutes look 20 feet away for 20 seconds.",
            "category": category,
            "author_name": "Dr Eze",
            "created_at": "2024-04-01T12:00:00Z",
            "is_published": true
        }))
        .unwrap()
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(article(1, "prevention").category.label(), "Prevention Tips");
        assert_eq!(ArticleCategory::General.label(), "General Eye Care");
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let result = serde_json::from_value::<Article>(json!({
            "id": 1, "title": "t", "content": "c", "category": "gossip",
            "created_at": "2024-04-01T12:00:00Z"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_filter() {
        let articles = vec![article(1, "prevention"), article(2, "symptoms")];
        assert_eq!(filter_by_category(&articles, None).len(), 2);
        let only = filter_by_category(&articles, Some(ArticleCategory::Symptoms));
        assert_eq!(only.len(), 1);
        assert_eq!(only[0].id, 2);
    }
}
