//! Paging request and response structures.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, PickFirst, serde_as};

/// Page selection sent as query parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    /// 1-based page number
    pub page_num: u32,
    pub page_size: u32,
}

impl PageQuery {
    pub fn new(page_num: u32, page_size: u32) -> Self {
        Self {
            page_num,
            page_size,
        }
    }

    /// Query-string pairs in wire naming.
    pub fn pairs(&self) -> Vec<(String, String)> {
        vec![
            ("pageNum".to_string(), self.page_num.to_string()),
            ("pageSize".to_string(), self.page_size.to_string()),
        ]
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        Self::new(1, 10)
    }
}

/// One page of results.
///
/// The server writes 64-bit integers as strings; numbers are accepted too.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default)]
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub page_num: u32,
    #[serde(default)]
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub page_size: u32,
    #[serde(default)]
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub total: u64,
    #[serde(default = "Vec::new")]
    pub list: Vec<T>,
}

impl<T> Page<T> {
    /// Number of pages needed to hold `total` items.
    pub fn page_count(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total.div_ceil(self.page_size as u64)
    }
}
