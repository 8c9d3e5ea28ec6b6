use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::models::{NewUniversityRequest, University, UpdateUniversityRequest};

const UNIVERSITY_COLUMNS: &str = "id, name, country, city, description, image_url, website, \
     ranking, established, created_at, updated_at";

pub async fn list(
    db: &SqlitePool,
    country: Option<&str>,
    search: Option<&str>,
) -> Result<Vec<University>, sqlx::Error> {
    let mut qb: QueryBuilder<'_, Sqlite> = QueryBuilder::new(format!(
        "SELECT {UNIVERSITY_COLUMNS} FROM universities WHERE 1 = 1"
    ));
    if let Some(country) = country {
        qb.push(" AND country = ").push_bind(country.to_string());
    }
    if let Some(search) = search {
        let pattern = crate::query::like_pattern(search);
        qb.push(" AND (lower(name) LIKE ")
            .push_bind(pattern.clone())
            .push(" ESCAPE '\\' OR lower(city) LIKE ")
            .push_bind(pattern.clone())
            .push(" ESCAPE '\\' OR lower(description) LIKE ")
            .push_bind(pattern)
            .push(" ESCAPE '\\')");
    }
    qb.push(" ORDER BY created_at DESC");

    qb.build_query_as::<University>().fetch_all(db).await
}

pub async fn find(db: &SqlitePool, id: i64) -> Result<Option<University>, sqlx::Error> {
    sqlx::query_as::<_, University>(&format!(
        "SELECT {UNIVERSITY_COLUMNS} FROM universities WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn insert(
    db: &SqlitePool,
    req: NewUniversityRequest,
) -> Result<University, sqlx::Error> {
    let now = Utc::now().to_rfc3339();

    let result = sqlx::query(
        r#"
        INSERT INTO universities
            (name, country, city, description, image_url, website,
            ranking, established, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&req.name)
    .bind(&req.country)
    .bind(&req.city)
    .bind(&req.description)
    .bind(&req.image_url)
    .bind(&req.website)
    .bind(req.ranking)
    .bind(req.established)
    .bind(&now)
    .bind(&now)
    .execute(db)
    .await?;

    Ok(University {
        id: result.last_insert_rowid(),
        name: req.name,
        country: req.country,
        city: req.city,
        description: req.description,
        image_url: req.image_url,
        website: req.website,
        ranking: req.ranking,
        established: req.established,
        created_at: now.clone(),
        updated_at: now,
    })
}

pub async fn update(
    db: &SqlitePool,
    id: i64,
    req: UpdateUniversityRequest,
) -> Result<Option<University>, sqlx::Error> {
    let mut current = match find(db, id).await? {
        Some(u) => u,
        None => return Ok(None),
    };

    if let Some(name) = req.name {
        current.name = name;
    }
    if let Some(country) = req.country {
        current.country = country;
    }
    if let Some(city) = req.city {
        current.city = city;
    }
    if let Some(description) = req.description {
        current.description = Some(description);
    }
    if let Some(image_url) = req.image_url {
        current.image_url = Some(image_url);
    }
    if let Some(website) = req.website {
        current.website = Some(website);
    }
    if let Some(ranking) = req.ranking {
        current.ranking = Some(ranking);
    }
    if let Some(established) = req.established {
        current.established = Some(established);
    }
    current.updated_at = Utc::now().to_rfc3339();

    sqlx::query(
        r#"
        UPDATE universities
        SET name = ?, country = ?, city = ?, description = ?, image_url = ?,
            website = ?, ranking = ?, established = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&current.name)
    .bind(&current.country)
    .bind(&current.city)
    .bind(&current.description)
    .bind(&current.image_url)
    .bind(&current.website)
    .bind(current.ranking)
    .bind(current.established)
    .bind(&current.updated_at)
    .bind(id)
    .execute(db)
    .await?;

    Ok(Some(current))
}

pub async fn delete(db: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM universities WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?;

    Ok(result.rows_affected() > 0)
}
