//! Bookshelf endpoints.

use crate::api::USER_PREFIX;
use crate::error::Result;
use crate::http::{ApiClient, ApiRequest};
use crate::models::{BookshelfAdd, BookshelfEntry, Page, PageQuery};

/// Bookshelf endpoints of the logged-in user.
pub struct BookshelfApi<'a> {
    client: &'a ApiClient,
}

impl<'a> BookshelfApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// One page of the shelf.
    pub async fn list(&self, page: &PageQuery) -> Result<Page<BookshelfEntry>> {
        let request = ApiRequest::get(format!("{USER_PREFIX}/bookshelf")).query(page.pairs());
        self.client.call(request).await
    }

    pub async fn add(&self, book_id: i64) -> Result<()> {
        let request =
            ApiRequest::post(format!("{USER_PREFIX}/bookshelf")).json(&BookshelfAdd { book_id })?;
        self.client.call_unit(request).await
    }

    pub async fn remove(&self, book_id: i64) -> Result<()> {
        let request = ApiRequest::delete(format!("{USER_PREFIX}/bookshelf/{book_id}"));
        self.client.call_unit(request).await
    }

    /// Whether the book is already on the shelf.
    pub async fn contains(&self, book_id: i64) -> Result<bool> {
        let request = ApiRequest::get(format!("{USER_PREFIX}/bookshelf/check/{book_id}"));
        self.client.call(request).await
    }
}
