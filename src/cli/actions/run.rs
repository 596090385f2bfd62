use crate::cli::actions::{account, content, session, Action};
use anyhow::Result;

/// Execute the provided action.
// Single dispatch point for all CLI actions.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Login(args) => session::login(args).await,
        Action::Logout(globals) => session::logout(&globals).await,
        Action::Whoami {
            globals,
            revalidate,
        } => session::whoami(&globals, revalidate).await,
        Action::Validate(globals) => session::validate(&globals).await,
        Action::Register(args) => account::register(args).await,
        Action::ChangePassword(args) => account::change_password(args).await,
        Action::RemoveAccount(globals) => account::remove(&globals).await,
        Action::Notices(globals) => content::notices(&globals).await,
        Action::Subjects(globals) => content::subjects(&globals).await,
    }
}
