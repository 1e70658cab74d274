//! Who is signed in.

use super::ServiceError;
use crate::model::AppUser;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Supplies the signed-in principal.
///
/// The cart and checkout layers only rely on getting a stable [`AppUser::id`] or nothing.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AppUser, ServiceError>;

    /// Creates an account and signs it in.
    async fn sign_up(&self, email: &str, name: &str, password: &str)
        -> Result<AppUser, ServiceError>;

    async fn sign_out(&self) -> Result<(), ServiceError>;

    async fn current_user(&self) -> Option<AppUser>;
}

#[derive(Debug, Clone)]
struct Account {
    user: AppUser,
    password: String,
}

/// An [`IdentityProvider`] holding accounts in memory, keyed by email.
///
/// Passwords are stored and compared as given.
#[derive(Debug, Default)]
pub struct InMemoryIdentityProvider {
    accounts: RwLock<HashMap<String, Account>>,
    current: RwLock<Option<AppUser>>,
}

impl InMemoryIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    #[instrument(skip(self, password))]
    async fn sign_in(&self, email: &str, password: &str) -> Result<AppUser, ServiceError> {
        let user = {
            let accounts = self.accounts.read().await;
            match accounts.get(email) {
                Some(account) if account.password == password => account.user.clone(),
                _ => {
                    warn!("Rejected sign-in");
                    return Err(ServiceError::InvalidCredentials);
                }
            }
        };

        *self.current.write().await = Some(user.clone());
        info!(user_id = %user.id, "Signed in");
        Ok(user)
    }

    #[instrument(skip(self, password))]
    async fn sign_up(
        &self,
        email: &str,
        name: &str,
        password: &str,
    ) -> Result<AppUser, ServiceError> {
        let user = {
            let mut accounts = self.accounts.write().await;
            if accounts.contains_key(email) {
                return Err(ServiceError::AlreadyExists(email.to_string()));
            }

            let user = AppUser::new(Uuid::new_v4().to_string(), email, name);
            accounts.insert(
                email.to_string(),
                Account {
                    user: user.clone(),
                    password: password.to_string(),
                },
            );
            user
        };

        *self.current.write().await = Some(user.clone());
        info!(user_id = %user.id, "Signed up");
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn sign_out(&self) -> Result<(), ServiceError> {
        if let Some(user) = self.current.write().await.take() {
            info!(user_id = %user.id, "Signed out");
        }
        Ok(())
    }

    async fn current_user(&self) -> Option<AppUser> {
        self.current.read().await.clone()
    }
}
