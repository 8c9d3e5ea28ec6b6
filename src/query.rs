//! Course listing query composition.
//!
//! The raw query string is deserialized into [`CourseQueryParams`] (all
//! fields optional, all text) and validated once at the boundary into a
//! typed [`CourseQuery`]. Every supplied predicate is ANDed onto the SQL
//! WHERE clause; omitted parameters impose no constraint.

use serde::Deserialize;
use sqlx::{QueryBuilder, Sqlite};

use crate::error::AppError;
use crate::models::{CourseFormat, CourseLevel};

pub const DEFAULT_LIMIT: i64 = 20;
pub const MAX_LIMIT: i64 = 100;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseQueryParams {
    pub search: Option<String>,
    pub country: Option<String>,
    pub level: Option<String>,
    pub subject: Option<String>,
    pub duration: Option<String>,
    pub format: Option<String>,
    pub min_fees: Option<String>,
    pub max_fees: Option<String>,
    pub ordering: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct CourseFilter {
    pub search: Option<String>,
    pub country: Option<String>,
    pub level: Option<CourseLevel>,
    pub subject: Option<String>,
    pub duration: Option<String>,
    pub format: Option<CourseFormat>,
    pub min_fees: Option<f64>,
    pub max_fees: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseOrdering {
    CreatedAtDesc,
    CreatedAtAsc,
    FeesAsc,
    FeesDesc,
    RatingAsc,
    RatingDesc,
}

impl Default for CourseOrdering {
    fn default() -> Self {
        CourseOrdering::CreatedAtDesc
    }
}

impl CourseOrdering {
    /// Accepts a sort token: a field name, optionally prefixed with
    /// `-` for descending.
    pub fn parse(token: &str) -> Result<Self, AppError> {
        match token {
            "created_at" => Ok(CourseOrdering::CreatedAtAsc),
            "-created_at" => Ok(CourseOrdering::CreatedAtDesc),
            "fees" => Ok(CourseOrdering::FeesAsc),
            "-fees" => Ok(CourseOrdering::FeesDesc),
            "rating" => Ok(CourseOrdering::RatingAsc),
            "-rating" => Ok(CourseOrdering::RatingDesc),
            _ => Err(AppError::BadRequest(format!(
                "invalid ordering: {token}"
            ))),
        }
    }

    pub fn to_sql(self) -> &'static str {
        match self {
            CourseOrdering::CreatedAtDesc => "c.created_at DESC",
            CourseOrdering::CreatedAtAsc => "c.created_at ASC",
            CourseOrdering::FeesAsc => "c.fees ASC",
            CourseOrdering::FeesDesc => "c.fees DESC",
            CourseOrdering::RatingAsc => "c.rating ASC",
            CourseOrdering::RatingDesc => "c.rating DESC",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CourseQuery {
    pub filter: CourseFilter,
    pub ordering: CourseOrdering,
    pub limit: i64,
    pub offset: i64,
}

impl CourseQuery {
    pub fn from_params(params: CourseQueryParams) -> Result<Self, AppError> {
        let level = params
            .level
            .as_deref()
            .map(|s| {
                s.parse::<CourseLevel>()
                    .map_err(|_| AppError::BadRequest(format!("invalid level: {s}")))
            })
            .transpose()?;

        let format = params
            .format
            .as_deref()
            .map(|s| {
                s.parse::<CourseFormat>()
                    .map_err(|_| AppError::BadRequest(format!("invalid format: {s}")))
            })
            .transpose()?;

        let min_fees = parse_numeric(params.min_fees.as_deref(), "minFees")?;
        let max_fees = parse_numeric(params.max_fees.as_deref(), "maxFees")?;

        let ordering = params
            .ordering
            .as_deref()
            .map(CourseOrdering::parse)
            .transpose()?
            .unwrap_or_default();

        let limit = parse_integer(params.limit.as_deref(), "limit")?
            .unwrap_or(DEFAULT_LIMIT)
            .clamp(1, MAX_LIMIT);
        let offset = parse_integer(params.offset.as_deref(), "offset")?
            .unwrap_or(0)
            .max(0);

        Ok(CourseQuery {
            filter: CourseFilter {
                search: params.search,
                country: params.country,
                level,
                subject: params.subject,
                duration: params.duration,
                format,
                min_fees,
                max_fees,
            },
            ordering,
            limit,
            offset,
        })
    }
}

impl CourseFilter {
    /// Appends one `AND ...` clause per supplied predicate. The builder
    /// is expected to already contain a WHERE clause (`WHERE 1 = 1`).
    pub fn push_filters(&self, qb: &mut QueryBuilder<'_, Sqlite>) {
        if let Some(search) = &self.search {
            let pattern = like_pattern(search);
            qb.push(" AND (lower(c.title) LIKE ")
                .push_bind(pattern.clone())
                .push(" ESCAPE '\\' OR lower(c.description) LIKE ")
                .push_bind(pattern.clone())
                .push(" ESCAPE '\\' OR lower(c.subject) LIKE ")
                .push_bind(pattern.clone())
                .push(" ESCAPE '\\' OR lower(u.name) LIKE ")
                .push_bind(pattern)
                .push(" ESCAPE '\\')");
        }
        if let Some(country) = &self.country {
            qb.push(" AND u.country = ").push_bind(country.clone());
        }
        if let Some(level) = self.level {
            qb.push(" AND c.level = ").push_bind(level);
        }
        if let Some(subject) = &self.subject {
            qb.push(" AND lower(c.subject) LIKE ")
                .push_bind(like_pattern(subject))
                .push(" ESCAPE '\\'");
        }
        if let Some(duration) = &self.duration {
            qb.push(" AND lower(c.duration) LIKE ")
                .push_bind(like_pattern(duration))
                .push(" ESCAPE '\\'");
        }
        if let Some(format) = self.format {
            qb.push(" AND c.format = ").push_bind(format);
        }
        if let Some(min_fees) = self.min_fees {
            qb.push(" AND c.fees >= ").push_bind(min_fees);
        }
        if let Some(max_fees) = self.max_fees {
            qb.push(" AND c.fees <= ").push_bind(max_fees);
        }
    }
}

/// Builds a `%...%` pattern with LIKE metacharacters escaped, so the
/// user's text matches literally. Clauses binding it must carry
/// `ESCAPE '\'`.
pub(crate) fn like_pattern(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    format!("%{escaped}%")
}

fn parse_numeric(value: Option<&str>, name: &str) -> Result<Option<f64>, AppError> {
    value
        .map(|s| {
            s.parse::<f64>()
                .map_err(|_| AppError::BadRequest(format!("{name} must be a number")))
        })
        .transpose()
}

fn parse_integer(value: Option<&str>, name: &str) -> Result<Option<i64>, AppError> {
    value
        .map(|s| {
            s.parse::<i64>()
                .map_err(|_| AppError::BadRequest(format!("{name} must be an integer")))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(f: impl FnOnce(&mut CourseQueryParams)) -> Result<CourseQuery, AppError> {
        let mut params = CourseQueryParams::default();
        f(&mut params);
        CourseQuery::from_params(params)
    }

    #[test]
    fn empty_params_yield_default_query() {
        let q = query(|_| {}).unwrap();
        assert_eq!(q.filter, CourseFilter::default());
        assert_eq!(q.ordering, CourseOrdering::CreatedAtDesc);
        assert_eq!(q.limit, DEFAULT_LIMIT);
        assert_eq!(q.offset, 0);
    }

    #[test]
    fn parses_all_filters() {
        let q = query(|p| {
            p.search = Some("data".into());
            p.country = Some("Germany".into());
            p.level = Some("Master's".into());
            p.subject = Some("computer".into());
            p.duration = Some("2 years".into());
            p.format = Some("Online".into());
            p.min_fees = Some("1000".into());
            p.max_fees = Some("20000.50".into());
        })
        .unwrap();
        assert_eq!(q.filter.level, Some(CourseLevel::Masters));
        assert_eq!(q.filter.format, Some(CourseFormat::Online));
        assert_eq!(q.filter.min_fees, Some(1000.0));
        assert_eq!(q.filter.max_fees, Some(20000.50));
    }

    #[test]
    fn rejects_non_numeric_fees() {
        let err = query(|p| p.min_fees = Some("cheap".into())).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(msg) if msg.contains("minFees")));

        let err = query(|p| p.max_fees = Some("10k".into())).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(msg) if msg.contains("maxFees")));
    }

    #[test]
    fn rejects_unknown_level_and_format() {
        let err = query(|p| p.level = Some("Diploma".into())).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let err = query(|p| p.format = Some("Correspondence".into())).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn parses_ordering_tokens() {
        assert_eq!(
            CourseOrdering::parse("fees").unwrap(),
            CourseOrdering::FeesAsc
        );
        assert_eq!(
            CourseOrdering::parse("-rating").unwrap(),
            CourseOrdering::RatingDesc
        );
        assert_eq!(
            CourseOrdering::parse("-created_at").unwrap(),
            CourseOrdering::CreatedAtDesc
        );
        assert!(CourseOrdering::parse("title").is_err());
    }

    #[test]
    fn clamps_limit() {
        let q = query(|p| p.limit = Some("5000".into())).unwrap();
        assert_eq!(q.limit, MAX_LIMIT);

        let q = query(|p| p.limit = Some("0".into())).unwrap();
        assert_eq!(q.limit, 1);
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("data"), "%data%");
        assert_eq!(like_pattern("C_P"), "%c\\_p%");
        assert_eq!(like_pattern("100% Online"), "%100\\% online%");
        assert_eq!(like_pattern("back\\slash"), "%back\\\\slash%");
    }

    #[test]
    fn filters_compose_into_sql() {
        let mut filter = CourseFilter::default();
        filter.search = Some("Data".into());
        filter.country = Some("Japan".into());
        filter.min_fees = Some(500.0);

        let mut qb: QueryBuilder<'_, Sqlite> = QueryBuilder::new("SELECT 1 WHERE 1 = 1");
        filter.push_filters(&mut qb);
        let sql = qb.sql();
        assert!(sql.contains("lower(c.title) LIKE"));
        assert!(sql.contains("u.country ="));
        assert!(sql.contains("c.fees >="));
        assert!(!sql.contains("c.fees <="));
    }
}
