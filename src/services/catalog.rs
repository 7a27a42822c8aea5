//! Errors and write-side validation shared by the catalog services.

use regex::Regex;
use sea_orm::{DbErr, SqlErr};
use std::sync::OnceLock;
use thiserror::Error;

use crate::db::Store;
use crate::entities::prelude::{Genres, Themes};

pub const MAX_NAME_LEN: usize = 255;
pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 2100;

/// Domain errors for catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: i32 },

    #[error("Invalid data: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl CatalogError {
    #[must_use]
    pub const fn not_found(kind: &'static str, id: i32) -> Self {
        Self::NotFound { kind, id }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

impl From<DbErr> for CatalogError {
    fn from(err: DbErr) -> Self {
        if is_unique_violation(&err) {
            Self::Conflict("A record with the same name already exists".to_string())
        } else {
            Self::Database(err.to_string())
        }
    }
}

impl From<anyhow::Error> for CatalogError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<DbErr>() {
            Ok(db_err) => Self::from(db_err),
            Err(err) => Self::Database(err.to_string()),
        }
    }
}

#[must_use]
pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// Trims `value` and checks it is non-empty and at most [`MAX_NAME_LEN`] chars.
pub fn validate_name(field: &str, value: &str) -> Result<String, CatalogError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(CatalogError::validation(format!("{field} cannot be empty")));
    }

    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(CatalogError::validation(format!(
            "{field} must be at most {MAX_NAME_LEN} characters"
        )));
    }

    Ok(trimmed.to_string())
}

pub fn validate_year(year: Option<i32>) -> Result<(), CatalogError> {
    match year {
        Some(year) if !(MIN_YEAR..=MAX_YEAR).contains(&year) => Err(CatalogError::validation(
            format!("year must be between {MIN_YEAR} and {MAX_YEAR}"),
        )),
        _ => Ok(()),
    }
}

pub fn validate_non_negative(field: &str, value: Option<i32>) -> Result<(), CatalogError> {
    match value {
        Some(value) if value < 0 => Err(CatalogError::validation(format!(
            "{field} cannot be negative"
        ))),
        _ => Ok(()),
    }
}

pub fn validate_score(score: Option<f64>) -> Result<(), CatalogError> {
    match score {
        Some(score) if !(0.0..=10.0).contains(&score) => Err(CatalogError::validation(
            "score must be between 0 and 10",
        )),
        _ => Ok(()),
    }
}

/// Sorted, de-duplicated copy of `ids`.
#[must_use]
pub fn normalize_ids(ids: &[i32]) -> Vec<i32> {
    let mut ids = ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// Every id in the (de-duplicated) lists must name an available genre or theme.
pub async fn check_taxonomy(
    store: &Store,
    genre_ids: &[i32],
    theme_ids: &[i32],
) -> Result<(), CatalogError> {
    let named = store.named_repo();

    if !genre_ids.is_empty() {
        let found = named.count_available::<Genres>(genre_ids).await?;
        if found != genre_ids.len() as u64 {
            return Err(CatalogError::validation("Unknown or unavailable genre id"));
        }
    }

    if !theme_ids.is_empty() {
        let found = named.count_available::<Themes>(theme_ids).await?;
        if found != theme_ids.len() as u64 {
            return Err(CatalogError::validation("Unknown or unavailable theme id"));
        }
    }

    Ok(())
}

/// Lowercase ASCII slug: runs of anything else collapse into a single `-`.
#[must_use]
pub fn slugify(name: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("Invalid regex"));

    let lower = name.to_lowercase();
    let slug = re.replace_all(&lower, "-");
    let slug = slug.trim_matches('-');

    if slug.is_empty() {
        "untitled".to_string()
    } else {
        slug.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_punctuation() {
        assert_eq!(slugify("Fullmetal Alchemist: Brotherhood"), "fullmetal-alchemist-brotherhood");
        assert_eq!(slugify("  Re:Zero  "), "re-zero");
        assert_eq!(slugify("進撃の巨人"), "untitled");
    }

    #[test]
    fn validate_name_trims_and_bounds() {
        assert_eq!(validate_name("name", "  Naruto ").unwrap(), "Naruto");
        assert!(validate_name("name", "   ").is_err());
        assert!(validate_name("name", &"x".repeat(256)).is_err());
        assert!(validate_name("name", &"x".repeat(255)).is_ok());
    }

    #[test]
    fn numeric_checks() {
        assert!(validate_year(Some(1899)).is_err());
        assert!(validate_year(Some(2024)).is_ok());
        assert!(validate_year(None).is_ok());
        assert!(validate_non_negative("popularity", Some(-1)).is_err());
        assert!(validate_non_negative("popularity", Some(0)).is_ok());
        assert!(validate_score(Some(10.5)).is_err());
        assert!(validate_score(Some(8.7)).is_ok());
    }

    #[test]
    fn normalize_ids_dedups() {
        assert_eq!(normalize_ids(&[3, 1, 3, 2, 1]), vec![1, 2, 3]);
    }

    #[test]
    fn anyhow_wrapped_errors_keep_their_kind() {
        let err = anyhow::Error::from(DbErr::Custom("boom".to_string()));
        assert!(matches!(CatalogError::from(err), CatalogError::Database(_)));
    }
}
