//! LDAP directory client.
//!
//! Every operation opens its own connection, runs a short bind/search/bind or
//! bind/bind/modify sequence on it, and unbinds before returning. Supports
//! plain LDAP and LDAPS.

use std::collections::HashSet;

use async_trait::async_trait;
use ldap3::{
    ldap_escape, DerefAliases, Ldap, LdapConnAsync, LdapConnSettings, Mod, Scope, SearchEntry,
    SearchOptions,
};
use tracing::{debug, info, warn};

use super::repositories::{AuthRepository, UserRepository};
use crate::config::{DirectoryConfig, PASSWORD_ATTRIBUTE};
use crate::domain::{NewPassword, PasswordChange, User};
use crate::errors::{AppError, AppResult};

/// Directory-backed implementation of both repository capabilities.
pub struct LdapDirectory {
    config: DirectoryConfig,
}

impl LdapDirectory {
    pub fn new(config: DirectoryConfig) -> Self {
        Self { config }
    }

    /// Connect and, if configured, bind as the service account.
    pub async fn check_connection(&self) -> AppResult<()> {
        let mut ldap = self.connect().await?;
        let result = self.bind_service_account(&mut ldap).await;
        close(ldap).await;
        result
    }

    /// Search filter for `username`, with filter metacharacters escaped.
    pub fn user_filter(&self, username: &str) -> String {
        self.config.user_filter_for(&ldap_escape(username))
    }

    /// Open a connection with the configured TLS policy.
    async fn connect(&self) -> AppResult<Ldap> {
        let mut settings = LdapConnSettings::new();
        if self.config.use_tls && self.config.tls_skip_verify {
            settings = settings.set_no_tls_verify(true);
        }

        let url = self.config.url();
        debug!("Connecting to LDAP server: {}", url);

        let (conn, ldap) = LdapConnAsync::with_settings(settings, &url)
            .await
            .map_err(|e| AppError::DirectoryConnection(format!("failed to connect to {}: {}", url, e)))?;

        ldap3::drive!(conn);

        Ok(ldap)
    }

    /// Bind as the service account; anonymous when none is configured.
    async fn bind_service_account(&self, ldap: &mut Ldap) -> AppResult<()> {
        let Some(bind_dn) = self.config.bind_dn.as_deref() else {
            return Ok(());
        };

        ldap.simple_bind(bind_dn, self.config.bind_password())
            .await
            .and_then(|res| res.success())
            .map_err(|e| {
                AppError::DirectoryBind(format!("failed to bind with service account: {}", e))
            })?;

        Ok(())
    }

    /// Resolve the DN of the single entry matching `username`.
    async fn find_user_dn(&self, ldap: &mut Ldap, username: &str) -> AppResult<String> {
        let filter = self.user_filter(username);
        debug!("Searching for user with filter: {}", filter);

        let (entries, _res) = ldap
            .with_search_options(SearchOptions::new().deref(DerefAliases::Never))
            .search(&self.config.base_dn, Scope::Subtree, &filter, vec!["dn"])
            .await
            .and_then(|res| res.success())
            .map_err(|e| AppError::DirectorySearch(format!("failed to search for user: {}", e)))?;

        let entry = single_entry(entries)?;
        Ok(SearchEntry::construct(entry).dn)
    }

    async fn authenticate_on(
        &self,
        ldap: &mut Ldap,
        username: &str,
        password: &str,
    ) -> AppResult<User> {
        self.bind_service_account(ldap).await?;

        let user_dn = self.find_user_dn(ldap, username).await?;
        debug!("Found user DN: {}", user_dn);

        // An empty password would be an unauthenticated bind, which many servers accept
        if password.is_empty() {
            return Err(AppError::DirectoryBind("invalid credentials".to_string()));
        }

        ldap.simple_bind(&user_dn, password)
            .await
            .and_then(|res| res.success())
            .map_err(|e| {
                debug!("User bind failed for {}: {}", user_dn, e);
                AppError::DirectoryBind("invalid credentials".to_string())
            })?;

        Ok(User::new(username, user_dn))
    }

    async fn change_password_on(
        &self,
        ldap: &mut Ldap,
        change: &PasswordChange,
        new_password: &NewPassword,
    ) -> AppResult<()> {
        if change.current_password.is_empty() {
            return Err(AppError::DirectoryBind("invalid current password".to_string()));
        }

        ldap.simple_bind(&change.user_dn, &change.current_password)
            .await
            .and_then(|res| res.success())
            .map_err(|e| {
                debug!("Current password bind failed for {}: {}", change.user_dn, e);
                AppError::DirectoryBind("invalid current password".to_string())
            })?;

        // Most servers only let a privileged identity write the password attribute
        self.bind_service_account(ldap).await?;

        let mods = vec![Mod::Replace(
            PASSWORD_ATTRIBUTE.as_bytes().to_vec(),
            HashSet::from([new_password.to_unicode_pwd()]),
        )];

        ldap.modify(&change.user_dn, mods)
            .await
            .and_then(|res| res.success())
            .map_err(|e| AppError::DirectoryModify(format!("failed to modify password: {}", e)))?;

        Ok(())
    }
}

#[async_trait]
impl AuthRepository for LdapDirectory {
    async fn authenticate(&self, username: &str, password: &str) -> AppResult<User> {
        let mut ldap = self.connect().await?;
        let result = self.authenticate_on(&mut ldap, username, password).await;
        close(ldap).await;

        if let Ok(user) = &result {
            info!("Directory bind succeeded for {}", user.username);
        }
        result
    }
}

#[async_trait]
impl UserRepository for LdapDirectory {
    async fn change_password(
        &self,
        change: &PasswordChange,
        new_password: &NewPassword,
    ) -> AppResult<()> {
        let mut ldap = self.connect().await?;
        let result = self.change_password_on(&mut ldap, change, new_password).await;
        close(ldap).await;
        result
    }
}

/// Require exactly one search result; zero or several is an error, never "pick first".
fn single_entry<T>(mut entries: Vec<T>) -> AppResult<T> {
    match entries.len() {
        1 => entries
            .pop()
            .ok_or_else(|| AppError::internal("search result vanished")),
        n => {
            debug!("User search returned {} entries", n);
            Err(AppError::DirectorySearch(
                "user not found or too many entries returned".to_string(),
            ))
        }
    }
}

async fn close(mut ldap: Ldap) {
    if let Err(e) = ldap.unbind().await {
        warn!("LDAP unbind failed: {}", e);
    }
}
