use clap::{Arg, ArgAction, Command};

pub const ARG_EMAIL: &str = "email";
pub const ARG_NAME: &str = "name";
pub const ARG_PASSWORD: &str = "password";
pub const ARG_CONFIRM_PASSWORD: &str = "confirm-password";
pub const ARG_REVALIDATE: &str = "revalidate";
pub const ARG_YES: &str = "yes";

fn email() -> Arg {
    Arg::new(ARG_EMAIL)
        .short('e')
        .long("email")
        .help("Account email address")
        .env("STUDYHUB_EMAIL")
        .required(true)
}

fn password(help: &'static str) -> Arg {
    Arg::new(ARG_PASSWORD)
        .short('p')
        .long("password")
        .help(help)
        .env("STUDYHUB_PASSWORD")
        .hide_env_values(true)
        .required(true)
}

fn confirm_password() -> Arg {
    Arg::new(ARG_CONFIRM_PASSWORD)
        .long("confirm-password")
        .help("Repeat the password; must match exactly")
        .env("STUDYHUB_CONFIRM_PASSWORD")
        .hide_env_values(true)
}

pub fn subcommands() -> Vec<Command> {
    vec![
        Command::new("login")
            .about("Sign in and store the session")
            .arg(email())
            .arg(password("Account password")),
        Command::new("register")
            .about("Create an account (does not sign in)")
            .arg(
                Arg::new(ARG_NAME)
                    .short('n')
                    .long("name")
                    .help("Display name, at least 2 characters")
                    .required(true),
            )
            .arg(email())
            .arg(password(
                "At least 8 characters with at least one letter and one number",
            ))
            .arg(confirm_password()),
        Command::new("passwd")
            .about("Change the signed-in user's password")
            .arg(password("New password"))
            .arg(confirm_password()),
        Command::new("logout").about("Discard the stored session"),
        Command::new("whoami")
            .about("Show the stored session's user")
            .arg(
                Arg::new(ARG_REVALIDATE)
                    .long("revalidate")
                    .help("Check the stored token against the server first")
                    .action(ArgAction::SetTrue),
            ),
        Command::new("validate").about("Ask the server whether the stored token is still accepted"),
        Command::new("remove-account")
            .about("Delete the signed-in account and sign out")
            .arg(
                Arg::new(ARG_YES)
                    .long("yes")
                    .help("Confirm account removal")
                    .action(ArgAction::SetTrue),
            ),
        Command::new("notices").about("List notices"),
        Command::new("subjects").about("List subjects"),
    ]
}
