use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;
use std::str::FromStr;
use crate::domain::models::user::UnknownVariant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Portrait,
    Wedding,
    Family,
    Event,
    Commercial,
    Fashion,
    Product,
    Landscape,
    Travel,
    Corporate,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Portrait,
        Category::Wedding,
        Category::Family,
        Category::Event,
        Category::Commercial,
        Category::Fashion,
        Category::Product,
        Category::Landscape,
        Category::Travel,
        Category::Corporate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Portrait => "portrait",
            Category::Wedding => "wedding",
            Category::Family => "family",
            Category::Event => "event",
            Category::Commercial => "commercial",
            Category::Fashion => "fashion",
            Category::Product => "product",
            Category::Landscape => "landscape",
            Category::Travel => "travel",
            Category::Corporate => "corporate",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Portrait => "Portrait Photography",
            Category::Wedding => "Wedding Photography",
            Category::Family => "Family Photography",
            Category::Event => "Event Photography",
            Category::Commercial => "Commercial Photography",
            Category::Fashion => "Fashion Photography",
            Category::Product => "Product Photography",
            Category::Landscape => "Landscape Photography",
            Category::Travel => "Travel Photography",
            Category::Corporate => "Corporate Photography",
        }
    }
}

impl FromStr for Category {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownVariant { kind: "category", value: s.to_string() })
    }
}

impl TryFrom<String> for Category {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioImage {
    pub id: String,
    pub url: String,
    pub caption: Option<String>,
    pub is_featured: bool,
    pub upload_date: DateTime<Utc>,
}

impl PortfolioImage {
    pub fn new(url: String, caption: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            url,
            caption,
            is_featured: false,
            upload_date: Utc::now(),
        }
    }
}

#[derive(Debug, Serialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub id: String,
    #[serde(rename = "photographer")]
    pub photographer_id: String,
    pub title: String,
    pub description: Option<String>,
    pub images: Json<Vec<PortfolioImage>>,
    #[sqlx(try_from = "String")]
    pub category: Category,
    pub is_published: bool,
    pub views: i64,
    pub created_at: DateTime<Utc>,
}

impl Portfolio {
    pub fn new(photographer_id: String, title: String, description: Option<String>, category: Category, is_published: bool) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            photographer_id,
            title: title.trim().to_string(),
            description,
            images: Json(Vec::new()),
            category,
            is_published,
            views: 0,
            created_at: Utc::now(),
        }
    }
}
