//! Query parameter types for the list endpoints.

use serde::Deserialize;
use troupe_core::status::PartyStatus;
use troupe_db::models::party::PartyFilter;

use crate::error::AppError;

/// `GET /actors?name=`
#[derive(Debug, Default, Deserialize)]
pub struct ActorListParams {
    /// Matched against name, family and role.
    pub name: Option<String>,
}

impl ActorListParams {
    pub fn search(&self) -> Option<&str> {
        self.name.as_deref().filter(|s| !s.is_empty())
    }
}

/// `GET /parties?status=&search=`
#[derive(Debug, Default, Deserialize)]
pub struct PartyListParams {
    /// A status label, or `all` for no filter.
    pub status: Option<String>,
    pub search: Option<String>,
}

impl PartyListParams {
    pub fn into_filter(self) -> Result<PartyFilter, AppError> {
        let status = match self.status.as_deref() {
            None | Some("") | Some("all") => None,
            Some(label) => Some(
                label
                    .parse::<PartyStatus>()
                    .map_err(|e| AppError::BadRequest(e.to_string()))?,
            ),
        };
        Ok(PartyFilter {
            status,
            search: self.search.filter(|s| !s.is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_means_no_status_filter() {
        let filter = PartyListParams {
            status: Some("all".into()),
            search: Some(String::new()),
        }
        .into_filter()
        .unwrap();
        assert!(filter.status.is_none());
        assert!(filter.search.is_none());
    }

    #[test]
    fn known_status_is_parsed() {
        let filter = PartyListParams {
            status: Some("in_progress".into()),
            search: Some("hall".into()),
        }
        .into_filter()
        .unwrap();
        assert_eq!(filter.status, Some(PartyStatus::InProgress));
        assert_eq!(filter.search.as_deref(), Some("hall"));
    }

    #[test]
    fn unknown_status_is_a_bad_request() {
        let err = PartyListParams {
            status: Some("archived".into()),
            search: None,
        }
        .into_filter()
        .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(msg) if msg.contains("archived")));
    }

    #[test]
    fn blank_actor_search_is_ignored() {
        assert_eq!(ActorListParams { name: Some(String::new()) }.search(), None);
        assert_eq!(ActorListParams { name: Some("ali".into()) }.search(), Some("ali"));
    }
}
