//! Data shapes of the REST backend's responses.
//!
//! Every verb answers with an [`ApiResult`]; list endpoints wrap their items
//! in a [`Page`]. Only the shapes live here, so exported responses can be
//! read back from disk.

use serde::{Deserialize, Serialize};

/// `{ ok, data, details }` result returned by list/fetch, create, update and delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResult<T> {
    pub ok: bool,
    pub data: Option<T>,
    /// Error payload on failure, usually a message or a field-error map.
    #[serde(default)]
    pub details: serde_json::Value,
}

impl<T> ApiResult<T> {
    /// The data of a successful result, or `None` when `ok` is false.
    pub fn into_data(self) -> Option<T> {
        if self.ok { self.data } else { None }
    }
}

/// One page of a paginated list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub results: Vec<T>,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default = "first_page")]
    pub current_page: u64,
    #[serde(default = "first_page")]
    pub total_pages: u64,
    #[serde(default)]
    pub ids: Vec<serde_json::Value>,
}

fn first_page() -> u64 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_defaults_missing_fields() {
        let page: Page<u32> = serde_json::from_str(r#"{"results":[1,2,3]}"#).unwrap();
        assert_eq!(page.results, vec![1, 2, 3]);
        assert_eq!(page.current_page, 1);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.next, None);
    }

    #[test]
    fn page_reads_camel_case() {
        let page: Page<u32> = serde_json::from_str(
            r#"{"results":[],"count":40,"next":"/x?page=3","previous":"/x?page=1",
                "currentPage":2,"totalPages":4,"ids":[1,2]}"#,
        )
        .unwrap();
        assert_eq!(page.count, 40);
        assert_eq!(page.total_pages, 4);
        assert_eq!(page.next.as_deref(), Some("/x?page=3"));
    }

    #[test]
    fn failed_result_has_no_data() {
        let result: ApiResult<u32> =
            serde_json::from_str(r#"{"ok":false,"data":7,"details":"Network Error"}"#).unwrap();
        assert_eq!(result.details, serde_json::json!("Network Error"));
        assert_eq!(result.into_data(), None);

        let result: ApiResult<u32> = serde_json::from_str(r#"{"ok":true,"data":3}"#).unwrap();
        assert_eq!(result.into_data(), Some(3));
    }
}
