// ABOUTME: Query parameters for the deal list endpoint
// ABOUTME: Normalizes page and limit, and splits filters into upstream query and local filter

use lendflow_core::DealFilter;
use lendflow_store::ListQuery;
use serde::Deserialize;

/// Default page size for deal lists
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Maximum page size to prevent oversized upstream requests
pub const MAX_PAGE_SIZE: u32 = 100;

/// Minimum page number (1-indexed)
pub const MIN_PAGE: u32 = 1;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DealListParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub stage: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
}

impl DealListParams {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(MIN_PAGE).max(MIN_PAGE)
    }

    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }

    /// Parameters forwarded to the lending API
    pub fn to_list_query(&self) -> ListQuery {
        ListQuery {
            page: self.page(),
            limit: self.limit(),
            stage: non_empty(&self.stage),
            status: non_empty(&self.status),
        }
    }

    /// Filter re-applied to the page the lending API returns
    pub fn to_filter(&self) -> DealFilter {
        DealFilter {
            stage: non_empty(&self.stage),
            status: non_empty(&self.status),
            search: non_empty(&self.search),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, None, 1, 20)]
    #[case(Some(0), Some(0), 1, 1)]
    #[case(Some(3), Some(500), 3, 100)]
    fn test_normalization(
        #[case] page: Option<u32>,
        #[case] limit: Option<u32>,
        #[case] expected_page: u32,
        #[case] expected_limit: u32,
    ) {
        let params = DealListParams {
            page,
            limit,
            ..Default::default()
        };
        assert_eq!(params.page(), expected_page);
        assert_eq!(params.limit(), expected_limit);
    }

    #[test]
    fn test_blank_filters_dropped() {
        let params = DealListParams {
            stage: Some("  ".to_string()),
            status: Some("Approved".to_string()),
            search: Some("".to_string()),
            ..Default::default()
        };

        let query = params.to_list_query();
        assert_eq!(query.stage, None);
        assert_eq!(query.status.as_deref(), Some("Approved"));

        let filter = params.to_filter();
        assert_eq!(filter.search, None);
        assert!(!filter.is_empty());
    }
}
