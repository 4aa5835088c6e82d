//! Bookshelf data structures.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, PickFirst, serde_as};

/// Body of an add-to-bookshelf request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BookshelfAdd {
    pub book_id: i64,
}

/// A book on the user's shelf.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct BookshelfEntry {
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub id: Option<i64>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub user_id: Option<i64>,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub book_id: i64,
    pub book_name: String,
    pub author_name: Option<String>,

    /// Cover image, possibly relative
    pub pic_url: Option<String>,
    pub book_desc: Option<String>,
    pub category_name: Option<String>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub word_count: Option<i64>,

    /// Chapter the reader stopped at
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub pre_content_id: Option<i64>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub first_chapter_id: Option<i64>,

    /// Server-local time, `yyyy-MM-dd HH:mm:ss`
    pub create_time: Option<String>,
    pub update_time: Option<String>,
}
