//! Credential persistence.
//!
//! The session token and the user's identity fields live in a flat string
//! key-value store. The request pipeline reads the token from it and clears
//! it when the server ends the session.
//!
//! ## Storage Keys
//!
//! ```text
//! Authorization  # session token, with or without the "Bearer " prefix
//! nickName       # display name
//! userName       # login name
//! uid            # numeric user id, stored as a string
//! ```

pub mod file;
pub mod memory;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::LoginResponse;

// Re-export for convenience
pub use file::FileStore;
pub use memory::MemoryStore;

/// A field of the persisted session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CredentialField {
    Token,
    Nickname,
    Username,
    UserId,
}

impl CredentialField {
    /// Every field, in storage order.
    pub const ALL: [CredentialField; 4] = [
        CredentialField::Token,
        CredentialField::Nickname,
        CredentialField::Username,
        CredentialField::UserId,
    ];

    /// Key under which the field is persisted.
    pub fn key(&self) -> &'static str {
        match self {
            CredentialField::Token => "Authorization",
            CredentialField::Nickname => "nickName",
            CredentialField::Username => "userName",
            CredentialField::UserId => "uid",
        }
    }
}

/// Trait for credential storage backends.
///
/// Values are opaque strings; no shape validation happens here. Writes are
/// last-write-wins. Reads come from memory; writes may touch the disk and
/// leave the readable state unchanged when they fail.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Read a field, `None` when absent.
    fn get(&self, field: CredentialField) -> Option<String>;

    /// Store a field, replacing any previous value.
    async fn set(&self, field: CredentialField, value: &str) -> Result<()>;

    /// Remove a field. Removing an absent field is not an error.
    async fn remove(&self, field: CredentialField) -> Result<()>;

    /// Remove every field. Idempotent.
    async fn clear_all(&self) -> Result<()> {
        for field in CredentialField::ALL {
            self.remove(field).await?;
        }
        Ok(())
    }
}

/// Snapshot of every stored field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub token: Option<String>,
    pub nickname: Option<String>,
    pub username: Option<String>,
    pub user_id: Option<String>,
}

impl Credentials {
    /// Read all fields from a store.
    pub fn load(store: &dyn CredentialStore) -> Self {
        Self {
            token: store.get(CredentialField::Token),
            nickname: store.get(CredentialField::Nickname),
            username: store.get(CredentialField::Username),
            user_id: store.get(CredentialField::UserId),
        }
    }
}

/// Whether a session token is present.
pub fn is_logged_in(store: &dyn CredentialStore) -> bool {
    store
        .get(CredentialField::Token)
        .is_some_and(|t| !t.is_empty())
}

/// Persist the identity returned by a successful login.
///
/// Fields missing from the response are removed so that a previous user's
/// identity never outlives a new login.
pub async fn remember_login(store: &dyn CredentialStore, login: &LoginResponse) -> Result<()> {
    let uid = login.uid.map(|id| id.to_string());
    let values = [
        (CredentialField::Token, login.token.as_deref()),
        (CredentialField::Nickname, login.nick_name.as_deref()),
        (CredentialField::Username, login.user_name.as_deref()),
        (CredentialField::UserId, uid.as_deref()),
    ];
    for (field, value) in values {
        match value {
            Some(value) => store.set(field, value).await?,
            None => store.remove(field).await?,
        }
    }
    log::debug!("Stored credentials for {:?}", login.user_name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn populated() -> MemoryStore {
        let store = MemoryStore::new();
        store.set(CredentialField::Token, "abc").await.unwrap();
        store.set(CredentialField::Nickname, "Reader").await.unwrap();
        store.set(CredentialField::Username, "reader").await.unwrap();
        store.set(CredentialField::UserId, "42").await.unwrap();
        store
    }

    #[tokio::test]
    async fn clear_all_removes_every_field() {
        let store = populated().await;
        store.clear_all().await.unwrap();
        for field in CredentialField::ALL {
            assert_eq!(store.get(field), None, "{field:?} survived clear_all");
        }
    }

    #[tokio::test]
    async fn clear_all_is_idempotent() {
        let store = MemoryStore::new();
        store.clear_all().await.unwrap();
        store.clear_all().await.unwrap();
        assert_eq!(Credentials::load(&store), Credentials::default());
    }

    #[test]
    fn keys_match_wire_names() {
        let keys: Vec<_> = CredentialField::ALL.iter().map(|f| f.key()).collect();
        assert_eq!(keys, vec!["Authorization", "nickName", "userName", "uid"]);
    }

    #[tokio::test]
    async fn remember_login_replaces_previous_identity() {
        let store = populated().await;
        let login = LoginResponse {
            uid: Some(7),
            token: Some("fresh".into()),
            user_name: Some("other".into()),
            ..LoginResponse::default()
        };
        remember_login(&store, &login).await.unwrap();

        let creds = Credentials::load(&store);
        assert_eq!(creds.token.as_deref(), Some("fresh"));
        assert_eq!(creds.user_id.as_deref(), Some("7"));
        assert_eq!(creds.username.as_deref(), Some("other"));
        assert_eq!(creds.nickname, None);
        assert!(is_logged_in(&store));
    }

    #[tokio::test]
    async fn empty_token_is_not_a_session() {
        let store = MemoryStore::new();
        store.set(CredentialField::Token, "").await.unwrap();
        assert!(!is_logged_in(&store));
    }
}
