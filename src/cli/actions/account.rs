use anyhow::Result;
use secrecy::SecretString;

use crate::cli::{actions::user_facing, globals::GlobalArgs};

#[derive(Debug)]
pub struct RegisterArgs {
    pub globals: GlobalArgs,
    pub name: String,
    pub email: String,
    pub password: SecretString,
    pub confirmation: Option<SecretString>,
}

#[derive(Debug)]
pub struct PasswordArgs {
    pub globals: GlobalArgs,
    pub password: SecretString,
    pub confirmation: Option<SecretString>,
}

/// # Errors
/// Returns an error if validation fails or the server rejects the registration.
pub async fn register(args: RegisterArgs) -> Result<()> {
    let auth = args.globals.connect()?;

    let ack = auth
        .register(
            &args.name,
            &args.email,
            &args.password,
            args.confirmation.as_ref(),
        )
        .await
        .map_err(user_facing)?;

    println!(
        "{}",
        ack.message
            .as_deref()
            .unwrap_or("Account created. Please login.")
    );
    Ok(())
}

/// # Errors
/// Returns an error if there is no session or the server rejects the change.
pub async fn change_password(args: PasswordArgs) -> Result<()> {
    let auth = args.globals.connect()?;
    auth.initialize(false).await;

    let ack = auth
        .change_password(&args.password, args.confirmation.as_ref())
        .await
        .map_err(user_facing)?;

    println!(
        "{}",
        ack.message.as_deref().unwrap_or("Password changed")
    );
    Ok(())
}

/// # Errors
/// Returns an error if there is no session or the server rejects the removal.
pub async fn remove(globals: &GlobalArgs) -> Result<()> {
    let auth = globals.connect()?;
    auth.initialize(false).await;

    let ack = auth.remove_account().await.map_err(user_facing)?;

    println!(
        "{}",
        ack.message.as_deref().unwrap_or("Account removed")
    );
    Ok(())
}
