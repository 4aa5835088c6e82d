//! Resource endpoint data structures.

use serde::{Deserialize, Serialize};

/// Image verification challenge.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ImgVerifyCode {
    /// Echoed back as `sessionId` when registering
    pub session_id: String,

    /// Base64-encoded image
    pub img: String,
}
