//! Turns the two list envelope shapes into one `PageResult`.

use serde_json::Value;

use crate::domain::page::{PageRequest, PageResult};
use crate::domain::resource::{EnvelopeMode, Row};
use crate::dto::api::{ListEnvelope, ListPayload};
use crate::remote::errors::{RemoteError, RemoteResult};

fn decode_rows<T: Row>(data: Vec<Value>) -> RemoteResult<Vec<T>> {
    data.into_iter()
        .map(|value| serde_json::from_value(value).map_err(RemoteError::from))
        .collect()
}

/// Normalizes a list envelope for an endpoint declared as `mode`.
///
/// Bare endpoints return the whole filtered collection, so the requested
/// page is cut out here and `total` is the collection size.
pub fn normalize<T: Row>(
    envelope: ListEnvelope,
    mode: EnvelopeMode,
    request: &PageRequest,
) -> RemoteResult<PageResult<T>> {
    if !envelope.is_success() {
        return Err(RemoteError::Application(
            envelope
                .message
                .unwrap_or_else(|| "request was rejected".to_string()),
        ));
    }

    match (mode, envelope.payload) {
        (EnvelopeMode::Paged, Some(ListPayload::Paged { data, total })) => {
            let mut rows = decode_rows::<T>(data)?;
            rows.truncate(request.limit.get());
            let seen = request.offset() + rows.len();
            if seen > total {
                log::warn!(
                    "Server reported total {total} but page {} (limit {}) reaches row {seen}",
                    request.page,
                    request.limit
                );
            }
            Ok(PageResult::new(rows, total))
        }
        (EnvelopeMode::Bare, Some(ListPayload::Bare(data))) => {
            let total = data.len();
            let page = data
                .into_iter()
                .skip(request.offset())
                .take(request.limit.get())
                .collect();
            Ok(PageResult::new(decode_rows::<T>(page)?, total))
        }
        (EnvelopeMode::Paged, Some(ListPayload::Bare(_))) => Err(RemoteError::UnexpectedEnvelope(
            "expected {data, total}, got a bare array".to_string(),
        )),
        (EnvelopeMode::Bare, Some(ListPayload::Paged { .. })) => Err(
            RemoteError::UnexpectedEnvelope("expected a bare array, got {data, total}".to_string()),
        ),
        (_, None) => Err(RemoteError::UnexpectedEnvelope("missing payload".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::resource::JsonRow;
    use crate::domain::types::{PageLimit, PageNumber};

    fn request(page: usize, limit: usize) -> PageRequest {
        PageRequest::new(PageNumber::new(page).unwrap(), PageLimit::new(limit).unwrap())
    }

    fn rows(range: std::ops::RangeInclusive<i64>) -> Vec<Value> {
        range.map(|id| json!({ "id": id })).collect()
    }

    fn ids(result: &PageResult<JsonRow>) -> Vec<String> {
        result.rows.iter().map(|r| r.row_id().to_string()).collect()
    }

    #[test]
    fn paged_keeps_server_total() {
        let result: PageResult<JsonRow> = normalize(
            ListEnvelope::paged(rows(6..=10), 12),
            EnvelopeMode::Paged,
            &request(2, 5),
        )
        .unwrap();
        assert_eq!(result.total, 12);
        assert_eq!(ids(&result), vec!["6", "7", "8", "9", "10"]);
    }

    #[test]
    fn paged_total_is_not_inflated_by_short_counts() {
        let result: PageResult<JsonRow> = normalize(
            ListEnvelope::paged(rows(6..=10), 7),
            EnvelopeMode::Paged,
            &request(2, 5),
        )
        .unwrap();
        assert_eq!(result.total, 7);
        assert_eq!(result.rows.len(), 5);
    }

    #[test]
    fn bare_is_sliced_locally() {
        let result: PageResult<JsonRow> = normalize(
            ListEnvelope::bare(rows(1..=12)),
            EnvelopeMode::Bare,
            &request(3, 5),
        )
        .unwrap();
        assert_eq!(result.total, 12);
        assert_eq!(ids(&result), vec!["11", "12"]);
    }

    #[test]
    fn mismatched_shape_is_an_error() {
        let result = normalize::<JsonRow>(
            ListEnvelope::bare(rows(1..=3)),
            EnvelopeMode::Paged,
            &request(1, 5),
        );
        assert!(matches!(result, Err(RemoteError::UnexpectedEnvelope(_))));
    }

    #[test]
    fn rejected_status_carries_message() {
        let result = normalize::<JsonRow>(
            ListEnvelope::rejected("Invalid token"),
            EnvelopeMode::Paged,
            &request(1, 5),
        );
        assert!(matches!(result, Err(RemoteError::Application(ref m)) if m == "Invalid token"));
    }

    #[test]
    fn undecodable_row_is_a_decode_error() {
        let result = normalize::<JsonRow>(
            ListEnvelope::paged(vec![json!({"name": "no id"})], 1),
            EnvelopeMode::Paged,
            &request(1, 5),
        );
        assert!(matches!(result, Err(RemoteError::Decode(_))));
    }
}
