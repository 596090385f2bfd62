pub mod account;
pub mod content;
pub mod session;

// Internal "interpreter" for `Action`.
mod run;

use crate::{cli::globals::GlobalArgs, error::ApiError};

#[derive(Debug)]
pub enum Action {
    Login(session::LoginArgs),
    Logout(GlobalArgs),
    Whoami { globals: GlobalArgs, revalidate: bool },
    Validate(GlobalArgs),
    Register(account::RegisterArgs),
    ChangePassword(account::PasswordArgs),
    RemoveAccount(GlobalArgs),
    Notices(GlobalArgs),
    Subjects(GlobalArgs),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }
}

/// Turns an operation error into the text shown to the user.
pub(crate) fn user_facing(err: ApiError) -> anyhow::Error {
    anyhow::anyhow!(err.user_message())
}
