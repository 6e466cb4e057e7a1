//! Check command - Verifies directory connectivity.

use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::LdapDirectory;

/// Execute the check command
pub async fn execute(config: Config) -> AppResult<()> {
    config.validate()?;

    let directory = &config.directory;
    match &directory.bind_dn {
        Some(bind_dn) => tracing::info!("Checking {} as {}", directory.url(), bind_dn),
        None => tracing::info!("Checking {} anonymously", directory.url()),
    }

    LdapDirectory::new(directory.clone()).check_connection().await?;

    tracing::info!("Directory connection OK");
    Ok(())
}
