use serde::Serialize;

/// Success envelope shared by every endpoint.
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self { success: true, count: None, data }
    }
}

impl<T> ApiResponse<Vec<T>> {
    pub fn list(data: Vec<T>) -> Self {
        Self { success: true, count: Some(data.len()), data }
    }
}

#[derive(Serialize)]
pub struct CategoryEntry {
    pub id: &'static str,
    pub name: &'static str,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct UploadedImages<T> {
    pub portfolio: T,
    pub uploaded: Vec<String>,
}
