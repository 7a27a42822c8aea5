//! API user management commands

use anyhow::Context;

use crate::config::Config;
use crate::db::Store;
use crate::domain::Role;

pub async fn cmd_create_user(config: &Config, username: &str, role: Role) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;

    if store.get_user_by_username(username).await?.is_some() {
        println!("User '{username}' already exists.");
        println!("Use `beehive rotate-key {username}` to issue a new key.");
        return Ok(());
    }

    let user = store
        .create_user(username, role)
        .await
        .with_context(|| format!("Failed to create user {username}"))?;

    println!("✓ Created {} '{}' (id {})", user.role, user.username, user.id);
    println!();
    println!("API key: {}", user.api_key);
    println!("Send it as `X-Api-Key: <key>` or `Authorization: Bearer <key>`.");

    Ok(())
}

pub async fn cmd_rotate_key(config: &Config, username: &str) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;

    if store.get_user_by_username(username).await?.is_none() {
        println!("No user named '{username}'.");
        return Ok(());
    }

    let key = store.regenerate_api_key(username).await?;

    println!("✓ New API key for '{username}': {key}");
    println!("The previous key no longer works.");

    Ok(())
}

pub async fn cmd_list_users(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let users = store.list_users().await?;

    if users.is_empty() {
        println!("No users yet.");
        println!();
        println!("Add one with: beehive create-user <name> --role staff");
        return Ok(());
    }

    println!("Users ({} total)", users.len());
    println!("{:-<50}", "");

    for user in users {
        println!("{:>4}  {:<24} {}", user.id, user.username, user.role);
    }

    Ok(())
}
