use serde::Serialize;
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;

#[derive(Debug, Serialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: String,
    #[serde(rename = "photographer")]
    pub photographer_id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub duration: String,
    pub includes: Json<Vec<String>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

pub struct NewPackageParams {
    pub photographer_id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub duration: String,
    pub includes: Vec<String>,
    pub is_active: bool,
}

impl Package {
    pub fn new(params: NewPackageParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            photographer_id: params.photographer_id,
            name: params.name.trim().to_string(),
            description: params.description,
            price: params.price,
            duration: params.duration,
            includes: Json(params.includes),
            is_active: params.is_active,
            created_at: Utc::now(),
        }
    }
}
