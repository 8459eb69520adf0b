use serde::{Deserialize, Serialize};

/// Pagination metadata returned with every list response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub current_page: u32,
    pub per_page: u32,
    pub total_page_count: u32,
    pub total_item_count: u64,
}

impl PageMeta {
    pub fn has_next_page(&self) -> bool {
        self.current_page < self.total_page_count
    }

    /// Page number to request next, if any.
    pub fn next_page(&self) -> Option<u32> {
        self.has_next_page().then(|| self.current_page + 1)
    }
}

/// `{data, meta}` envelope of list operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_list_envelope() {
        let json = r#"{
            "data": [1, 2, 3],
            "meta": {"currentPage": 1, "perPage": 3, "totalPageCount": 2, "totalItemCount": 5}
        }"#;
        let page: Page<u32> = serde_json::from_str(json).unwrap();
        assert_eq!(page.data, vec![1, 2, 3]);
        assert!(page.meta.has_next_page());
        assert_eq!(page.meta.next_page(), Some(2));
    }

    #[test]
    fn last_page_has_no_next() {
        let meta = PageMeta { current_page: 2, per_page: 3, total_page_count: 2, total_item_count: 5 };
        assert_eq!(meta.next_page(), None);
    }
}
