//! Account and profile data structures.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, PickFirst, serde_as};

/// Login form.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_name: String,
    pub password: String,

    /// Verification code, when the server asks for one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captcha: Option<String>,

    /// Keep the session alive across browser restarts
    #[serde(default)]
    pub remember_me: bool,
}

/// Successful login payload.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginResponse {
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub uid: Option<i64>,
    pub token: Option<String>,
    pub user_name: Option<String>,
    pub user_photo: Option<String>,
    pub nick_name: Option<String>,
    pub email: Option<String>,
    /// 0 unknown, 1 male, 2 female
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub gender: Option<i32>,
    /// 1 regular, 2 admin, 3 super admin
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub user_type: Option<i32>,
    /// Token expiry as a millisecond timestamp
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub expire_time: Option<i64>,
}

/// Registration form.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub user_name: String,
    pub password: String,
    pub confirm_password: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nick_name: Option<String>,
    #[serde(default)]
    pub gender: i32,
    /// Answer to the image verification code
    pub vel_code: String,
    /// Session id returned together with the verification image
    pub session_id: String,
}

/// Profile of the logged-in user.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct UserInfo {
    pub nick_name: Option<String>,
    pub user_photo: Option<String>,
    pub gender: Option<i32>,
}

/// Profile update; absent fields are left untouched by the server.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserInfoUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nick_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_photo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<i32>,
}

/// Free-form feedback message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feedback {
    pub content: String,
}
