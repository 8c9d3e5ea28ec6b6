use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::types::Json;

use crate::models::University;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum CourseLevel {
    #[serde(rename = "Bachelor's")]
    #[sqlx(rename = "Bachelor's")]
    Bachelors,
    #[serde(rename = "Master's")]
    #[sqlx(rename = "Master's")]
    Masters,
    #[serde(rename = "PhD")]
    #[sqlx(rename = "PhD")]
    Phd,
    Certificate,
}

impl CourseLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseLevel::Bachelors => "Bachelor's",
            CourseLevel::Masters => "Master's",
            CourseLevel::Phd => "PhD",
            CourseLevel::Certificate => "Certificate",
        }
    }
}

impl std::str::FromStr for CourseLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Bachelor's" => Ok(CourseLevel::Bachelors),
            "Master's" => Ok(CourseLevel::Masters),
            "PhD" => Ok(CourseLevel::Phd),
            "Certificate" => Ok(CourseLevel::Certificate),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum CourseFormat {
    #[serde(rename = "On-campus")]
    #[sqlx(rename = "On-campus")]
    OnCampus,
    Online,
    Hybrid,
}

impl CourseFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseFormat::OnCampus => "On-campus",
            CourseFormat::Online => "Online",
            CourseFormat::Hybrid => "Hybrid",
        }
    }
}

impl std::str::FromStr for CourseFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "On-campus" => Ok(CourseFormat::OnCampus),
            "Online" => Ok(CourseFormat::Online),
            "Hybrid" => Ok(CourseFormat::Hybrid),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum FeesType {
    #[default]
    Total,
    Yearly,
    Monthly,
}

/// Full course record with its university embedded, returned by detail,
/// compare and saved-course endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetail {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub university: University,
    pub level: CourseLevel,
    pub subject: String,
    pub duration: String,
    pub format: CourseFormat,
    pub fees: Option<f64>,
    pub fees_type: FeesType,
    pub credits: Option<i64>,
    pub application_deadline: Option<String>,
    pub start_date: Option<String>,
    pub requirements: Option<String>,
    pub course_structure: Option<Json<Value>>,
    pub rating: Option<f64>,
    pub image_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Trimmed projection for list endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSummary {
    pub id: i64,
    pub title: String,
    pub university: University,
    pub level: CourseLevel,
    pub subject: String,
    pub duration: String,
    pub format: CourseFormat,
    pub fees: Option<f64>,
    pub fees_type: FeesType,
    pub rating: Option<f64>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourseRequest {
    pub title: String,
    pub description: Option<String>,
    pub university_id: i64,
    pub level: CourseLevel,
    pub subject: String,
    pub duration: String,
    pub format: CourseFormat,
    pub fees: Option<f64>,
    #[serde(default)]
    pub fees_type: FeesType,
    pub credits: Option<i64>,
    pub application_deadline: Option<String>,
    pub start_date: Option<String>,
    pub requirements: Option<String>,
    pub course_structure: Option<Value>,
    pub rating: Option<f64>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub university_id: Option<i64>,
    pub level: Option<CourseLevel>,
    pub subject: Option<String>,
    pub duration: Option<String>,
    pub format: Option<CourseFormat>,
    pub fees: Option<f64>,
    pub fees_type: Option<FeesType>,
    pub credits: Option<i64>,
    pub application_deadline: Option<String>,
    pub start_date: Option<String>,
    pub requirements: Option<String>,
    pub course_structure: Option<Value>,
    pub rating: Option<f64>,
    pub image_url: Option<String>,
}
