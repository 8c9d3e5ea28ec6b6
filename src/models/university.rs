use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct University {
    pub id: i64,
    pub name: String,
    pub country: String,
    pub city: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub website: Option<String>,
    pub ranking: Option<i64>,
    pub established: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUniversityRequest {
    pub name: String,
    pub country: String,
    pub city: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub website: Option<String>,
    pub ranking: Option<i64>,
    pub established: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUniversityRequest {
    pub name: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub website: Option<String>,
    pub ranking: Option<i64>,
    pub established: Option<i64>,
}
