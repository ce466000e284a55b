//! API layer query parameter types.

use serde::{Deserialize, Serialize};
use utoipa::IntoParams;
use uuid::Uuid;

/// Number of ads on one listing page
pub const ADS_PAGE_SIZE: u32 = 10;

/// Query parameters for the ad listing.
#[derive(Debug, Default, Clone, Serialize, Deserialize, IntoParams)]
pub struct ListAdsQuery {
    /// Case-insensitive keyword matched against title, description and category name
    pub q: Option<String>,
    /// Only ads in neighbourhoods of this city
    pub city_id: Option<Uuid>,
    /// 1-based page number (default 1)
    pub page: Option<u32>,
}

impl ListAdsQuery {
    /// The keyword with surrounding whitespace removed, if any is left
    pub fn keyword(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }

    /// Requested page, never below 1
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page() - 1) * i64::from(ADS_PAGE_SIZE)
    }
}

/// Query parameters for the dynamic property form fragment.
#[derive(Debug, Default, Clone, Serialize, Deserialize, IntoParams)]
pub struct PropertyFormQuery {
    pub category_id: Option<Uuid>,
    /// Existing ad used to pre-populate the fields
    pub ad_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_defaults_and_clamps() {
        let query = ListAdsQuery::default();
        assert_eq!(query.page(), 1);
        assert_eq!(query.offset(), 0);

        let query = ListAdsQuery {
            page: Some(0),
            ..Default::default()
        };
        assert_eq!(query.page(), 1);

        let query = ListAdsQuery {
            page: Some(3),
            ..Default::default()
        };
        assert_eq!(query.offset(), 20);
    }

    #[test]
    fn blank_keyword_is_ignored() {
        let query = ListAdsQuery {
            q: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(query.keyword(), None);

        let query = ListAdsQuery {
            q: Some(" phone ".to_string()),
            ..Default::default()
        };
        assert_eq!(query.keyword(), Some("phone"));
    }
}
