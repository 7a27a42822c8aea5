use serde::Deserialize;

use super::ApiError;
use crate::config::PaginationConfig;
use crate::domain::{ListOrdering, ListQuery, NewsTag, PageRequest};

pub fn validate_id(resource: &str, id: i32) -> Result<i32, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid {} ID: {}. ID must be a positive integer",
            resource, id
        )));
    }
    Ok(id)
}

/// `page`, `page_size`, `q` and `ordering` query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub q: Option<String>,
    pub ordering: Option<String>,
    pub tag: Option<String>,
}

impl ListParams {
    /// Page size falls back to the configured default and is capped at the maximum.
    #[must_use]
    pub fn page(&self, config: &PaginationConfig) -> PageRequest {
        let page_size = self
            .page_size
            .unwrap_or(config.default_page_size)
            .min(config.max_page_size);

        PageRequest::new(self.page.unwrap_or(1), page_size)
    }

    pub fn to_query(&self, config: &PaginationConfig) -> Result<ListQuery, ApiError> {
        let ordering = match self.ordering.as_deref().map(str::trim) {
            None | Some("") => ListOrdering::default(),
            Some(raw) => raw.parse().map_err(ApiError::validation)?,
        };

        Ok(ListQuery {
            page: self.page(config),
            search: self.q.clone(),
            ordering,
        })
    }

    pub fn news_tag(&self) -> Result<Option<NewsTag>, ApiError> {
        self.tag
            .as_deref()
            .map(str::parse)
            .transpose()
            .map_err(ApiError::validation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_id() {
        assert!(validate_id("anime", 1).is_ok());
        assert!(validate_id("anime", 0).is_err());
        assert!(validate_id("anime", -1).is_err());
    }

    #[test]
    fn test_page_size_defaults_and_cap() {
        let config = PaginationConfig::default();

        let params = ListParams::default();
        assert_eq!(params.page(&config), PageRequest::new(1, 25));

        let params = ListParams {
            page: Some(3),
            page_size: Some(500),
            ..Default::default()
        };
        assert_eq!(params.page(&config), PageRequest::new(3, 100));
    }

    #[test]
    fn test_ordering_is_validated() {
        let config = PaginationConfig::default();

        let params = ListParams {
            ordering: Some("-name".to_string()),
            ..Default::default()
        };
        assert!(params.to_query(&config).is_ok());

        let params = ListParams {
            ordering: Some("popularity".to_string()),
            ..Default::default()
        };
        assert!(params.to_query(&config).is_err());
    }

    #[test]
    fn test_news_tag() {
        let params = ListParams {
            tag: Some("industry".to_string()),
            ..Default::default()
        };
        assert_eq!(params.news_tag().unwrap(), Some(NewsTag::Industry));

        let params = ListParams {
            tag: Some("gossip".to_string()),
            ..Default::default()
        };
        assert!(params.news_tag().is_err());
    }
}
