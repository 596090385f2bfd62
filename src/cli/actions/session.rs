use anyhow::Result;
use secrecy::SecretString;
use tracing::debug;

use crate::{
    cli::{actions::user_facing, globals::GlobalArgs},
    session::User,
};

#[derive(Debug)]
pub struct LoginArgs {
    pub globals: GlobalArgs,
    pub email: String,
    pub password: SecretString,
}

/// # Errors
/// Returns an error if the credentials are rejected or the session cannot be stored.
pub async fn login(args: LoginArgs) -> Result<()> {
    let auth = args.globals.connect()?;
    auth.initialize(false).await;

    let session = auth
        .login(&args.email, &args.password)
        .await
        .map_err(|err| anyhow::anyhow!(err.login_message()))?;

    println!("Signed in as {}", describe(&session.user));
    Ok(())
}

/// # Errors
/// Returns an error if the session file cannot be located.
pub async fn logout(globals: &GlobalArgs) -> Result<()> {
    let auth = globals.connect()?;
    auth.initialize(false).await;
    auth.logout();

    println!("Signed out");
    Ok(())
}

/// # Errors
/// Returns an error if the session file cannot be located.
pub async fn whoami(globals: &GlobalArgs, revalidate: bool) -> Result<()> {
    let auth = globals.connect()?;
    let state = auth.initialize(revalidate).await;

    match state.user() {
        Some(user) => {
            println!("{}", describe(user));
            if !user.roles.is_empty() {
                println!("roles: {}", user.roles.join(", "));
            }
        }
        None => println!("Not signed in"),
    }
    Ok(())
}

/// # Errors
/// Returns an error if the server rejects the stored token or cannot be reached.
pub async fn validate(globals: &GlobalArgs) -> Result<()> {
    let auth = globals.connect()?;
    auth.initialize(false).await;

    let ack = auth.validate_session().await.map_err(user_facing)?;
    debug!(message = ?ack.message, "session validated");

    println!("Session is valid");
    Ok(())
}

fn describe(user: &User) -> String {
    format!("{} <{}>", user.name, user.email)
}
