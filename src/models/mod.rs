// src/models/mod.rs

//! Domain models for the client library.
//!
//! Configuration plus the request and response bodies exchanged with the
//! server, grouped by endpoint family.

mod book;
mod comment;
mod config;
mod page;
mod resource;
mod user;

// Re-export all public types
pub use book::{BookshelfAdd, BookshelfEntry};
pub use comment::{CommentReply, CommentReplyRequest, CommentRequest, LikeToggle, UserComment};
pub use config::{ClientConfig, ENV_API_URL, ENV_IMG_URL, Messages};
pub use page::{Page, PageQuery};
pub use resource::ImgVerifyCode;
pub use user::{Feedback, LoginRequest, LoginResponse, RegisterRequest, UserInfo, UserInfoUpdate};
