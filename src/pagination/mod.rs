//! Pagination subsystem.
//!
//! # Data Flow
//! ```text
//! RequestUrl (scheme, host, path, raw query)
//!     → paginator.rs (PageRequest from page / page-size, slice the records)
//!     → links.rs (self, first, prev, next, last)
//!     → Page { data, links, meta }
//! ```

pub mod links;
pub mod paginator;

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::http::response::Rejection;

pub use links::{build_links, Links, RequestUrl};
pub use paginator::{paginate, PageRequest, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Collection totals reported with every page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub total_records: usize,
    pub total_pages: usize,
}

/// Paged response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: T,
    pub links: Links,
    pub meta: PaginationMeta,
}

/// Slice `records` per the query of `url` and wrap the result in the envelope.
pub fn page_of<T: Clone>(records: &[T], url: &RequestUrl) -> Result<Page<Vec<T>>, Rejection> {
    let bad_request = |errors| Rejection::new(StatusCode::BAD_REQUEST, errors);

    let request = url.page_request().map_err(bad_request)?;
    let data = paginate(records, request).map_err(bad_request)?.to_vec();
    let total_records = records.len();

    Ok(Page {
        data,
        links: build_links(url, request, total_records),
        meta: PaginationMeta {
            total_records,
            total_pages: request.total_pages(total_records),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_envelope() {
        let url = RequestUrl::new("https", "holder.example", "/cds-au/v1/energy/plans?page=2&page-size=2");
        let page = page_of(&["a", "b", "c"], &url).unwrap();

        assert_eq!(page.data, vec!["c"]);
        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(value["meta"], json!({ "totalRecords": 3, "totalPages": 2 }));
        assert_eq!(value["links"]["prev"], "https://holder.example/cds-au/v1/energy/plans?page=1&page-size=2");
        assert!(value["links"].get("next").is_none());
    }

    #[test]
    fn test_invalid_page_is_bad_request() {
        let url = RequestUrl::new("https", "h", "/p?page=9");
        let rejection = page_of(&[1, 2, 3], &url).unwrap_err();
        assert_eq!(rejection.status, StatusCode::BAD_REQUEST);
        assert_eq!(rejection.codes(), vec![ErrorKind::InvalidPage.code()]);
    }
}
