//! List/search query resolution
//!
//! Turns an [`OrderQuery`] into a repository [`OrderFilter`].

use shared::models::{OrderQuery, OrderStatus};

use super::validation::{ValidationErrors, validate_status};
use crate::db::repository::order::{OrderFilter, OrderSortField};

/// Localized status names accepted in free-text search
const STATUS_SYNONYMS: &[(&str, OrderStatus)] = &[
    ("в ожидании", OrderStatus::Waiting),
    ("готов", OrderStatus::Ready),
    ("оплачено", OrderStatus::Paid),
];

/// Free-text term as understood by the search box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchTerm {
    /// Blank query, no filtering
    Any,
    /// All digits: table number or order id
    Number(i64),
    Status(OrderStatus),
    /// A word that names no status
    Unmatched,
}

pub fn parse_term(raw: &str) -> SearchTerm {
    let term = raw.trim();
    if term.is_empty() {
        return SearchTerm::Any;
    }

    if term.chars().all(|c| c.is_ascii_digit()) {
        return match term.parse::<i64>() {
            Ok(n) => SearchTerm::Number(n),
            Err(_) => SearchTerm::Unmatched,
        };
    }

    let lowered = term.to_lowercase();
    let status = STATUS_SYNONYMS
        .iter()
        .find(|(word, _)| *word == lowered)
        .map(|(_, status)| *status)
        .or_else(|| lowered.parse::<OrderStatus>().ok());

    match status {
        Some(status) => SearchTerm::Status(status),
        None => SearchTerm::Unmatched,
    }
}

/// `field` or `-field`; unknown fields fall back to insertion order
pub fn parse_ordering(raw: &str) -> Option<(OrderSortField, bool)> {
    let raw = raw.trim();
    let (name, desc) = match raw.strip_prefix('-') {
        Some(rest) => (rest, true),
        None => (raw, false),
    };
    let field = match name {
        "id" => OrderSortField::Id,
        "table_number" => OrderSortField::TableNumber,
        "total_price" => OrderSortField::TotalPrice,
        "status" => OrderSortField::Status,
        "created_at" => OrderSortField::CreatedAt,
        _ => return None,
    };
    Some((field, desc))
}

/// Resolve a query; an invalid `status` filter is a validation error
pub fn build_filter(query: &OrderQuery) -> Result<OrderFilter, ValidationErrors> {
    let mut filter = OrderFilter {
        table_number: query.table_number,
        sort: query.ordering.as_deref().and_then(parse_ordering),
        ..Default::default()
    };

    if let Some(raw) = query.status.as_deref().filter(|s| !s.trim().is_empty()) {
        filter.status = Some(validate_status(raw.trim())?);
    }

    match query.q.as_deref().map(parse_term).unwrap_or(SearchTerm::Any) {
        SearchTerm::Any => {}
        SearchTerm::Number(n) => filter.number = Some(n),
        SearchTerm::Status(status) => match filter.status {
            Some(existing) if existing != status => filter.match_nothing = true,
            _ => filter.status = Some(status),
        },
        SearchTerm::Unmatched => filter.match_nothing = true,
    }

    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(q: &str) -> OrderQuery {
        OrderQuery {
            q: Some(q.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_term_digits() {
        assert_eq!(parse_term("12"), SearchTerm::Number(12));
        assert_eq!(parse_term(" 7 "), SearchTerm::Number(7));
        assert_eq!(parse_term("99999999999999999999999"), SearchTerm::Unmatched);
        assert_eq!(parse_term("-3"), SearchTerm::Unmatched);
    }

    #[test]
    fn test_parse_term_localized_status() {
        assert_eq!(parse_term("В ожидании"), SearchTerm::Status(OrderStatus::Waiting));
        assert_eq!(parse_term("ГОТОВ"), SearchTerm::Status(OrderStatus::Ready));
        assert_eq!(parse_term("оплачено"), SearchTerm::Status(OrderStatus::Paid));
    }

    #[test]
    fn test_parse_term_english_passthrough() {
        assert_eq!(parse_term("Paid"), SearchTerm::Status(OrderStatus::Paid));
        assert_eq!(parse_term("waiting"), SearchTerm::Status(OrderStatus::Waiting));
        assert_eq!(parse_term("soup"), SearchTerm::Unmatched);
        assert_eq!(parse_term("   "), SearchTerm::Any);
    }

    #[test]
    fn test_parse_ordering() {
        assert_eq!(parse_ordering("id"), Some((OrderSortField::Id, false)));
        assert_eq!(parse_ordering("-total_price"), Some((OrderSortField::TotalPrice, true)));
        assert_eq!(parse_ordering("created_at"), Some((OrderSortField::CreatedAt, false)));
        assert_eq!(parse_ordering("-items"), None);
        assert_eq!(parse_ordering(""), None);
    }

    #[test]
    fn test_build_filter_combines_query_and_filters() {
        let filter = build_filter(&OrderQuery {
            q: Some("5".into()),
            status: Some("ready".into()),
            table_number: Some(2),
            ordering: Some("-status".into()),
        })
        .unwrap();
        assert_eq!(filter.number, Some(5));
        assert_eq!(filter.status, Some(OrderStatus::Ready));
        assert_eq!(filter.table_number, Some(2));
        assert_eq!(filter.sort, Some((OrderSortField::Status, true)));
        assert!(!filter.match_nothing);
    }

    #[test]
    fn test_build_filter_conflicting_status_matches_nothing() {
        let filter = build_filter(&OrderQuery {
            q: Some("готов".into()),
            status: Some("paid".into()),
            ..Default::default()
        })
        .unwrap();
        assert!(filter.match_nothing);
    }

    #[test]
    fn test_build_filter_unknown_word_matches_nothing() {
        assert!(build_filter(&query("pizza")).unwrap().match_nothing);
        assert_eq!(build_filter(&query("")).unwrap(), OrderFilter::default());
    }

    #[test]
    fn test_build_filter_rejects_invalid_status_filter() {
        let err = build_filter(&OrderQuery {
            status: Some("cooking".into()),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err.len(), 1);
    }
}
