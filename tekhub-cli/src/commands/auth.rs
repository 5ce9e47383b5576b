//! Login and logout

use anyhow::{Context, Result};
use colored::*;

use crate::config::Config;

pub async fn login(config: &Config, code: &str) -> Result<()> {
    let client = config.hub_client();
    let login = client.login(code).await.context("Failed to log in")?;

    println!("{}", "✓ Logged in successfully!".green().bold());
    if let Some(id) = login.id {
        println!("  User ID: {}", id);
    }
    println!("  Credentials stored in {}", config.credentials_path.display());
    Ok(())
}

pub fn logout(config: &Config) -> Result<()> {
    config.hub_client().logout().context("Failed to log out")?;
    println!("{}", "✓ Logged out.".green().bold());
    Ok(())
}
