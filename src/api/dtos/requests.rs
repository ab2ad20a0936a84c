use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use crate::domain::models::{booking::BookingStatus, portfolio::Category, user::Role};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub role: Option<Role>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub role: Option<Role>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub photographer: String,
    pub package: String,
    #[serde(deserialize_with = "booking_date")]
    pub date: DateTime<Utc>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateBookingStatusRequest {
    pub status: BookingStatus,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePackageRequest {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub duration: String,
    #[serde(default)]
    pub includes: Vec<String>,
    pub is_active: Option<bool>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePackageRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub duration: Option<String>,
    pub includes: Option<Vec<String>>,
    pub is_active: Option<bool>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePortfolioRequest {
    pub title: String,
    pub description: Option<String>,
    pub category: Category,
    pub is_published: Option<bool>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePortfolioRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub is_published: Option<bool>,
}

#[derive(Deserialize)]
pub struct ImageRequest {
    pub url: String,
    pub caption: Option<String>,
}

#[derive(Deserialize)]
pub struct AddImagesRequest {
    #[serde(default)]
    pub images: Vec<ImageRequest>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub specialty: Option<String>,
    pub location: Option<String>,
    pub price: Option<f64>,
    pub categories: Option<Vec<String>>,
    pub profile_image: Option<String>,
}

#[derive(Deserialize)]
pub struct PortfolioUrlsRequest {
    pub portfolio: Vec<String>,
}

#[derive(Deserialize)]
pub struct AvailabilityRequest {
    pub availability: Map<String, Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotographerQuery {
    /// Comma separated category ids.
    pub categories: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub search: Option<String>,
}

// Accepts a full RFC 3339 timestamp or a bare `YYYY-MM-DD` (midnight UTC).
fn booking_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(ts) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| serde::de::Error::custom(format!("invalid booking date: {}", raw)))
}
