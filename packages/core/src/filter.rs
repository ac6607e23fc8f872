use serde::Deserialize;

use crate::types::Deal;

/// Dashboard-side deal filters.
///
/// Stage and search match substrings, status matches whole values; all
/// comparisons ignore case.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DealFilter {
    pub stage: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl DealFilter {
    pub fn is_empty(&self) -> bool {
        self.stage.is_none() && self.status.is_none() && self.search.is_none()
    }

    pub fn matches(&self, deal: &Deal) -> bool {
        if let Some(stage) = &self.stage {
            if !contains_ci(&deal.stage, stage) {
                return false;
            }
        }
        if let Some(status) = &self.status {
            if !deal.status.eq_ignore_ascii_case(status) {
                return false;
            }
        }
        if let Some(search) = &self.search {
            if !contains_ci(&deal.name, search) && !contains_ci(&deal.loan_type, search) {
                return false;
            }
        }
        true
    }

    pub fn apply(&self, deals: Vec<Deal>) -> Vec<Deal> {
        if self.is_empty() {
            return deals;
        }
        deals.into_iter().filter(|d| self.matches(d)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PersistedDealRecord;
    use crate::view::record_to_deal_view;

    fn deal(name: &str, stage: &str, status: &str, loan_type: &str) -> Deal {
        record_to_deal_view(&PersistedDealRecord {
            id: Some(1),
            client_name: Some(name.to_string()),
            next_steps: Some(stage.to_string()),
            status: Some(status.to_string()),
            loan_type: Some(loan_type.to_string()),
            ..Default::default()
        })
    }

    fn fixtures() -> Vec<Deal> {
        vec![
            deal("Oakwood Commercial Center", "Underwriting", "Active", "Commercial"),
            deal("City Heights Residential", "Committee Review", "Active", "Residential"),
            deal("Riverside Warehouse", "Due Diligence", "Closed", "Industrial"),
        ]
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        assert_eq!(DealFilter::default().apply(fixtures()).len(), 3);
    }

    #[test]
    fn test_stage_substring_match() {
        let filter = DealFilter {
            stage: Some("review".to_string()),
            ..Default::default()
        };
        let result = filter.apply(fixtures());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "City Heights Residential");
    }

    #[test]
    fn test_status_requires_whole_value() {
        let filter = DealFilter {
            status: Some("active".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.apply(fixtures()).len(), 2);

        let partial = DealFilter {
            status: Some("act".to_string()),
            ..Default::default()
        };
        assert!(partial.apply(fixtures()).is_empty());
    }

    #[test]
    fn test_search_matches_name_or_type() {
        let by_name = DealFilter {
            search: Some("oakwood".to_string()),
            ..Default::default()
        };
        assert_eq!(by_name.apply(fixtures()).len(), 1);

        let by_type = DealFilter {
            search: Some("INDUSTRIAL".to_string()),
            ..Default::default()
        };
        assert_eq!(by_type.apply(fixtures())[0].name, "Riverside Warehouse");
    }
}
