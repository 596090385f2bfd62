use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::ArgMatches;
use secrecy::SecretString;

use crate::cli::{
    actions::{
        account::{PasswordArgs, RegisterArgs},
        session::LoginArgs,
        Action,
    },
    commands::{account, client},
    globals::GlobalArgs,
};

/// # Errors
/// Returns an error if required arguments are missing.
pub fn handler(matches: &ArgMatches) -> Result<Action> {
    let globals = globals(matches)?;

    let (name, sub) = matches
        .subcommand()
        .context("missing subcommand, see --help")?;

    let action = match name {
        "login" => Action::Login(LoginArgs {
            globals,
            email: required(sub, account::ARG_EMAIL)?,
            password: secret(sub, account::ARG_PASSWORD)?,
        }),
        "register" => Action::Register(RegisterArgs {
            globals,
            name: required(sub, account::ARG_NAME)?,
            email: required(sub, account::ARG_EMAIL)?,
            password: secret(sub, account::ARG_PASSWORD)?,
            confirmation: optional_secret(sub, account::ARG_CONFIRM_PASSWORD),
        }),
        "passwd" => Action::ChangePassword(PasswordArgs {
            globals,
            password: secret(sub, account::ARG_PASSWORD)?,
            confirmation: optional_secret(sub, account::ARG_CONFIRM_PASSWORD),
        }),
        "logout" => Action::Logout(globals),
        "whoami" => Action::Whoami {
            globals,
            revalidate: sub.get_flag(account::ARG_REVALIDATE),
        },
        "validate" => Action::Validate(globals),
        "remove-account" => {
            if !sub.get_flag(account::ARG_YES) {
                return Err(anyhow!("refusing to remove the account without --yes"));
            }
            Action::RemoveAccount(globals)
        }
        "notices" => Action::Notices(globals),
        "subjects" => Action::Subjects(globals),
        other => return Err(anyhow!("unknown subcommand: {other}")),
    };

    Ok(action)
}

fn globals(matches: &ArgMatches) -> Result<GlobalArgs> {
    let mut globals = GlobalArgs::new(required(matches, client::ARG_API_URL)?);
    globals.session_file = matches
        .get_one::<std::path::PathBuf>(client::ARG_SESSION_FILE)
        .cloned();
    if let Some(secs) = matches.get_one::<u64>(client::ARG_TIMEOUT) {
        globals.timeout = Duration::from_secs(*secs);
    }
    Ok(globals)
}

fn required(matches: &ArgMatches, id: &str) -> Result<String> {
    matches
        .get_one::<String>(id)
        .cloned()
        .with_context(|| format!("missing required argument: --{id}"))
}

fn secret(matches: &ArgMatches, id: &str) -> Result<SecretString> {
    required(matches, id).map(SecretString::from)
}

fn optional_secret(matches: &ArgMatches, id: &str) -> Option<SecretString> {
    matches.get_one::<String>(id).cloned().map(SecretString::from)
}
