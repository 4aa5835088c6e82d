//! Endpoint wrappers.
//!
//! Each facade borrows the [`ApiClient`], builds the method, path, and payload
//! for one endpoint, and returns the pipeline's result untouched.
//!
//! - `BookshelfApi`: the user's bookshelf
//! - `LikeApi`: comment likes
//! - `UserApi`: account, profile, comments, and replies
//! - `ResourceApi`: verification images and uploads

mod bookshelf;
mod like;
mod resource;
mod user;

pub use bookshelf::BookshelfApi;
pub use like::LikeApi;
pub use resource::ResourceApi;
pub use user::UserApi;

use crate::http::ApiClient;

const USER_PREFIX: &str = "/front/user";
const COMMENT_PREFIX: &str = "/front/comment";
const RESOURCE_PREFIX: &str = "/front/resource";

impl ApiClient {
    pub fn bookshelf(&self) -> BookshelfApi<'_> {
        BookshelfApi::new(self)
    }

    pub fn likes(&self) -> LikeApi<'_> {
        LikeApi::new(self)
    }

    pub fn users(&self) -> UserApi<'_> {
        UserApi::new(self)
    }

    pub fn resources(&self) -> ResourceApi<'_> {
        ResourceApi::new(self)
    }
}
