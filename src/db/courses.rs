use chrono::Utc;
use serde_json::Value;
use sqlx::types::Json;
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};

use crate::models::{
    CourseDetail, CourseFormat, CourseLevel, CourseSummary, FeesType, NewCourseRequest,
    University, UpdateCourseRequest,
};
use crate::query::CourseQuery;

/// Course columns plus the joined university columns under `u_` aliases;
/// everything that reads courses selects through this.
const COURSE_SELECT: &str = r#"
    SELECT
        c.id, c.title, c.description, c.university_id, c.level, c.subject,
        c.duration, c.format, c.fees, c.fees_type, c.credits,
        c.application_deadline, c.start_date, c.requirements,
        c.course_structure, c.rating, c.image_url, c.created_at, c.updated_at,
        u.id AS u_id, u.name AS u_name, u.country AS u_country, u.city AS u_city,
        u.description AS u_description, u.image_url AS u_image_url,
        u.website AS u_website, u.ranking AS u_ranking,
        u.established AS u_established, u.created_at AS u_created_at,
        u.updated_at AS u_updated_at
    FROM courses c
    JOIN universities u ON u.id = c.university_id
"#;

#[derive(Debug, FromRow)]
struct JoinedCourseRow {
    id: i64,
    title: String,
    description: Option<String>,
    #[allow(dead_code)]
    university_id: i64,
    level: CourseLevel,
    subject: String,
    duration: String,
    format: CourseFormat,
    fees: Option<f64>,
    fees_type: FeesType,
    credits: Option<i64>,
    application_deadline: Option<String>,
    start_date: Option<String>,
    requirements: Option<String>,
    course_structure: Option<Json<Value>>,
    rating: Option<f64>,
    image_url: Option<String>,
    created_at: String,
    updated_at: String,
    u_id: i64,
    u_name: String,
    u_country: String,
    u_city: String,
    u_description: Option<String>,
    u_image_url: Option<String>,
    u_website: Option<String>,
    u_ranking: Option<i64>,
    u_established: Option<i64>,
    u_created_at: String,
    u_updated_at: String,
}

impl JoinedCourseRow {
    fn university(&self) -> University {
        University {
            id: self.u_id,
            name: self.u_name.clone(),
            country: self.u_country.clone(),
            city: self.u_city.clone(),
            description: self.u_description.clone(),
            image_url: self.u_image_url.clone(),
            website: self.u_website.clone(),
            ranking: self.u_ranking,
            established: self.u_established,
            created_at: self.u_created_at.clone(),
            updated_at: self.u_updated_at.clone(),
        }
    }

    fn into_detail(self) -> CourseDetail {
        let university = self.university();
        CourseDetail {
            id: self.id,
            title: self.title,
            description: self.description,
            university,
            level: self.level,
            subject: self.subject,
            duration: self.duration,
            format: self.format,
            fees: self.fees,
            fees_type: self.fees_type,
            credits: self.credits,
            application_deadline: self.application_deadline,
            start_date: self.start_date,
            requirements: self.requirements,
            course_structure: self.course_structure,
            rating: self.rating,
            image_url: self.image_url,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    fn into_summary(self) -> CourseSummary {
        let university = self.university();
        CourseSummary {
            id: self.id,
            title: self.title,
            university,
            level: self.level,
            subject: self.subject,
            duration: self.duration,
            format: self.format,
            fees: self.fees,
            fees_type: self.fees_type,
            rating: self.rating,
            image_url: self.image_url,
        }
    }
}

pub async fn list(
    db: &SqlitePool,
    query: &CourseQuery,
) -> Result<Vec<CourseSummary>, sqlx::Error> {
    let mut qb: QueryBuilder<'_, Sqlite> = QueryBuilder::new(COURSE_SELECT);
    qb.push(" WHERE 1 = 1");
    query.filter.push_filters(&mut qb);
    qb.push(" ORDER BY ");
    qb.push(query.ordering.to_sql());
    qb.push(" LIMIT ").push_bind(query.limit);
    qb.push(" OFFSET ").push_bind(query.offset);

    let rows: Vec<JoinedCourseRow> = qb.build_query_as().fetch_all(db).await?;
    Ok(rows.into_iter().map(JoinedCourseRow::into_summary).collect())
}

/// Top-rated courses, newest first on rating ties. No filters apply.
pub async fn popular(db: &SqlitePool, limit: i64) -> Result<Vec<CourseSummary>, sqlx::Error> {
    let rows: Vec<JoinedCourseRow> = sqlx::query_as(&format!(
        "{COURSE_SELECT} ORDER BY c.rating DESC, c.created_at DESC LIMIT ?"
    ))
    .bind(limit)
    .fetch_all(db)
    .await?;

    Ok(rows.into_iter().map(JoinedCourseRow::into_summary).collect())
}

pub async fn find(db: &SqlitePool, id: i64) -> Result<Option<CourseDetail>, sqlx::Error> {
    let row: Option<JoinedCourseRow> =
        sqlx::query_as(&format!("{COURSE_SELECT} WHERE c.id = ?"))
            .bind(id)
            .fetch_optional(db)
            .await?;

    Ok(row.map(JoinedCourseRow::into_detail))
}

/// Batch lookup for the compare endpoint; ids without a matching course
/// are dropped silently.
pub async fn find_by_ids(
    db: &SqlitePool,
    ids: &[i64],
) -> Result<Vec<CourseDetail>, sqlx::Error> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut qb: QueryBuilder<'_, Sqlite> = QueryBuilder::new(COURSE_SELECT);
    qb.push(" WHERE c.id IN (");
    let mut separated = qb.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    qb.push(")");

    let rows: Vec<JoinedCourseRow> = qb.build_query_as().fetch_all(db).await?;
    Ok(rows.into_iter().map(JoinedCourseRow::into_detail).collect())
}

pub async fn insert(
    db: &SqlitePool,
    req: NewCourseRequest,
) -> Result<CourseDetail, sqlx::Error> {
    let now = Utc::now().to_rfc3339();

    let result = sqlx::query(
        r#"
        INSERT INTO courses
            (title, description, university_id, level, subject, duration,
            format, fees, fees_type, credits, application_deadline, start_date,
            requirements, course_structure, rating, image_url, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&req.title)
    .bind(&req.description)
    .bind(req.university_id)
    .bind(req.level)
    .bind(&req.subject)
    .bind(&req.duration)
    .bind(req.format)
    .bind(req.fees)
    .bind(req.fees_type)
    .bind(req.credits)
    .bind(&req.application_deadline)
    .bind(&req.start_date)
    .bind(&req.requirements)
    .bind(req.course_structure.map(Json))
    .bind(req.rating)
    .bind(&req.image_url)
    .bind(&now)
    .bind(&now)
    .execute(db)
    .await?;

    find(db, result.last_insert_rowid())
        .await?
        .ok_or(sqlx::Error::RowNotFound)
}

pub async fn update(
    db: &SqlitePool,
    id: i64,
    req: UpdateCourseRequest,
) -> Result<Option<CourseDetail>, sqlx::Error> {
    let mut current = match find(db, id).await? {
        Some(c) => c,
        None => return Ok(None),
    };

    let mut university_id = current.university.id;
    if let Some(new_university_id) = req.university_id {
        university_id = new_university_id;
    }
    if let Some(title) = req.title {
        current.title = title;
    }
    if let Some(description) = req.description {
        current.description = Some(description);
    }
    if let Some(level) = req.level {
        current.level = level;
    }
    if let Some(subject) = req.subject {
        current.subject = subject;
    }
    if let Some(duration) = req.duration {
        current.duration = duration;
    }
    if let Some(format) = req.format {
        current.format = format;
    }
    if let Some(fees) = req.fees {
        current.fees = Some(fees);
    }
    if let Some(fees_type) = req.fees_type {
        current.fees_type = fees_type;
    }
    if let Some(credits) = req.credits {
        current.credits = Some(credits);
    }
    if let Some(application_deadline) = req.application_deadline {
        current.application_deadline = Some(application_deadline);
    }
    if let Some(start_date) = req.start_date {
        current.start_date = Some(start_date);
    }
    if let Some(requirements) = req.requirements {
        current.requirements = Some(requirements);
    }
    if let Some(course_structure) = req.course_structure {
        current.course_structure = Some(Json(course_structure));
    }
    if let Some(rating) = req.rating {
        current.rating = Some(rating);
    }
    if let Some(image_url) = req.image_url {
        current.image_url = Some(image_url);
    }
    current.updated_at = Utc::now().to_rfc3339();

    sqlx::query(
        r#"
        UPDATE courses
        SET title = ?, description = ?, university_id = ?, level = ?, subject = ?,
            duration = ?, format = ?, fees = ?, fees_type = ?, credits = ?,
            application_deadline = ?, start_date = ?, requirements = ?,
            course_structure = ?, rating = ?, image_url = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&current.title)
    .bind(&current.description)
    .bind(university_id)
    .bind(current.level)
    .bind(&current.subject)
    .bind(&current.duration)
    .bind(current.format)
    .bind(current.fees)
    .bind(current.fees_type)
    .bind(current.credits)
    .bind(&current.application_deadline)
    .bind(&current.start_date)
    .bind(&current.requirements)
    .bind(&current.course_structure)
    .bind(current.rating)
    .bind(&current.image_url)
    .bind(&current.updated_at)
    .bind(id)
    .execute(db)
    .await?;

    // Re-read so a changed university_id comes back with its university.
    find(db, id).await
}

pub async fn delete(db: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM courses WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?;

    Ok(result.rows_affected() > 0)
}
