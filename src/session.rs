// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use log::warn;
use secrecy::{ExposeSecret as _, SecretString};

use crate::{error::Result, model::Usuario, storage::Storage};

const TOKEN_KEY: &str = "token";
const USER_KEY: &str = "usuario";

#[derive(Debug)]
pub(crate) struct Session {
    pub(crate) token: SecretString,
    pub(crate) user: Usuario,
}

/// Owns the persisted session and the in-memory current user. Nothing else
/// writes either of them.
pub(crate) struct Manager<S> {
    storage: S,
    current_user: Option<Usuario>,
}

impl<S: Storage> Manager<S> {
    pub(crate) const fn new(storage: S) -> Self {
        Self {
            storage,
            current_user: None,
        }
    }

    pub(crate) const fn current_user(&self) -> Option<&Usuario> {
        self.current_user.as_ref()
    }

    /// Reads the persisted session. A half-written or undecodable session is
    /// removed and reported as absent.
    pub(crate) async fn load(&mut self) -> Result<Option<Session>> {
        let token = self.storage.get(TOKEN_KEY).await?;
        let user = self.storage.get(USER_KEY).await?;

        let session = match (token, user) {
            (Some(token), Some(user)) => match serde_json::from_str::<Usuario>(&user) {
                Ok(user) => Some(Session {
                    token: SecretString::new(token),
                    user,
                }),
                Err(e) => {
                    warn!("The stored user record could not be read, so we are discarding the session: {}", e);
                    self.clear().await?;
                    None
                }
            },
            (None, None) => None,
            (Some(_), None) | (None, Some(_)) => {
                warn!("Only part of the session was stored, so we are discarding it");
                self.clear().await?;
                None
            }
        };

        self.current_user = session.as_ref().map(|s| s.user.clone());
        Ok(session)
    }

    /// The token of the persisted session, if there is one. Leaves the current
    /// user alone.
    pub(crate) async fn token(&self) -> Result<Option<SecretString>> {
        if self.storage.get(USER_KEY).await?.is_none() {
            return Ok(None);
        }
        Ok(self.storage.get(TOKEN_KEY).await?.map(SecretString::new))
    }

    pub(crate) async fn save(&mut self, token: &SecretString, user: &Usuario) -> Result<()> {
        let user_json = serde_json::to_string(user)?;
        self.storage
            .set(&[
                (TOKEN_KEY, token.expose_secret()),
                (USER_KEY, &user_json),
            ])
            .await
    }

    pub(crate) async fn clear(&mut self) -> Result<()> {
        self.current_user = None;
        self.storage.remove(&[TOKEN_KEY, USER_KEY]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Memory;

    fn ana() -> Usuario {
        Usuario {
            id: 1,
            nome: "Ana".to_owned(),
            email: "ana@example.com".to_owned(),
        }
    }

    #[tokio::test]
    async fn save_then_load() {
        let storage = Memory::new();
        let mut manager = Manager::new(storage.clone());

        manager
            .save(&SecretString::new("abc".to_owned()), &ana())
            .await
            .unwrap();
        let session = manager.load().await.unwrap().unwrap();

        assert_eq!(session.token.expose_secret(), "abc");
        assert_eq!(session.user, ana());
        assert_eq!(manager.current_user(), Some(&ana()));
        assert!(storage.get(USER_KEY).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn clear_removes_both_keys() {
        let storage = Memory::new();
        let mut manager = Manager::new(storage.clone());
        manager
            .save(&SecretString::new("abc".to_owned()), &ana())
            .await
            .unwrap();
        let _ = manager.load().await.unwrap();

        manager.clear().await.unwrap();

        assert_eq!(manager.current_user(), None);
        assert_eq!(storage.get(TOKEN_KEY).await.unwrap(), None);
        assert_eq!(storage.get(USER_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn partial_session_is_discarded() {
        let mut storage = Memory::new();
        storage.set(&[(TOKEN_KEY, "abc")]).await.unwrap();
        let mut manager = Manager::new(storage.clone());

        assert!(manager.load().await.unwrap().is_none());
        assert_eq!(storage.get(TOKEN_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn undecodable_user_is_discarded() {
        let mut storage = Memory::new();
        storage
            .set(&[(TOKEN_KEY, "abc"), (USER_KEY, "not json")])
            .await
            .unwrap();
        let mut manager = Manager::new(storage.clone());

        assert!(manager.load().await.unwrap().is_none());
        assert_eq!(storage.get(USER_KEY).await.unwrap(), None);
        assert_eq!(manager.current_user(), None);
    }
}
