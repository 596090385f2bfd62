pub mod account;
pub mod client;
pub mod logging;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    ColorChoice, Command,
};

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("studyhub")
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommands(account::subcommands());

    let command = client::with_args(command);
    logging::with_args(command)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const ENV_VARS: [&str; 8] = [
        "STUDYHUB_API_URL",
        "STUDYHUB_SESSION_FILE",
        "STUDYHUB_TIMEOUT",
        "STUDYHUB_LOG_LEVEL",
        "STUDYHUB_LOG_JSON",
        "STUDYHUB_PASSWORD",
        "STUDYHUB_CONFIRM_PASSWORD",
        "STUDYHUB_EMAIL",
    ];

    fn clean_env<F: FnOnce()>(f: F) {
        temp_env::with_vars(ENV_VARS.map(|key| (key, None::<String>)), f);
    }

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "studyhub");
        assert_eq!(
            command.get_about().unwrap().to_string(),
            env!("CARGO_PKG_DESCRIPTION")
        );
        assert_eq!(
            command.get_version().unwrap().to_string(),
            env!("CARGO_PKG_VERSION")
        );
    }

    #[test]
    fn test_defaults() {
        clean_env(|| {
            let matches = new().get_matches_from(vec!["studyhub", "logout"]);
            assert_eq!(
                matches.get_one::<String>(client::ARG_API_URL).cloned(),
                Some("http://localhost:8081".to_string())
            );
            assert_eq!(matches.get_one::<u64>(client::ARG_TIMEOUT).copied(), Some(10));
            assert!(matches.get_one::<PathBuf>(client::ARG_SESSION_FILE).is_none());
            assert_eq!(matches.subcommand_name(), Some("logout"));
        });
    }

    #[test]
    fn test_global_args_after_subcommand() {
        clean_env(|| {
            let matches = new().get_matches_from(vec![
                "studyhub",
                "login",
                "--email",
                "john@example.com",
                "--password",
                "abcd1234",
                "--api-url",
                "https://api.studyhub.dev",
            ]);
            assert_eq!(
                matches.get_one::<String>(client::ARG_API_URL).cloned(),
                Some("https://api.studyhub.dev".to_string())
            );
            let (name, sub) = matches.subcommand().unwrap();
            assert_eq!(name, "login");
            assert_eq!(
                sub.get_one::<String>(account::ARG_EMAIL).cloned(),
                Some("john@example.com".to_string())
            );
        });
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("STUDYHUB_API_URL", Some("https://api.studyhub.dev")),
                ("STUDYHUB_SESSION_FILE", Some("/tmp/studyhub-session.json")),
                ("STUDYHUB_TIMEOUT", Some("30")),
                ("STUDYHUB_LOG_LEVEL", Some("info")),
                ("STUDYHUB_PASSWORD", Some("abcd1234")),
            ],
            || {
                let matches = new().get_matches_from(vec!["studyhub", "passwd"]);
                assert_eq!(
                    matches.get_one::<String>(client::ARG_API_URL).cloned(),
                    Some("https://api.studyhub.dev".to_string())
                );
                assert_eq!(
                    matches.get_one::<PathBuf>(client::ARG_SESSION_FILE).cloned(),
                    Some(PathBuf::from("/tmp/studyhub-session.json"))
                );
                assert_eq!(matches.get_one::<u64>(client::ARG_TIMEOUT).copied(), Some(30));
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(2)
                );
                let sub = matches.subcommand_matches("passwd").unwrap();
                assert_eq!(
                    sub.get_one::<String>(account::ARG_PASSWORD).cloned(),
                    Some("abcd1234".to_string())
                );
            },
        );
    }

    #[test]
    fn test_check_log_level_env() {
        let levels = ["error", "warn", "info", "debug", "trace"];
        for (index, &level) in levels.iter().enumerate() {
            temp_env::with_vars([("STUDYHUB_LOG_LEVEL", Some(level))], || {
                let matches = new().get_matches_from(vec!["studyhub", "logout"]);
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(u8::try_from(index).unwrap())
                );
            });
        }
    }

    #[test]
    fn test_check_log_level_verbosity() {
        for index in 0..5usize {
            clean_env(|| {
                let mut args = vec!["studyhub".to_string(), "logout".to_string()];
                if index > 0 {
                    args.push(format!("-{}", "v".repeat(index)));
                }

                let matches = new().get_matches_from(args);

                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(u8::try_from(index).unwrap())
                );
            });
        }
    }

    #[test]
    fn test_remove_account_yes_flag() {
        clean_env(|| {
            let matches = new().get_matches_from(vec!["studyhub", "remove-account", "--yes"]);
            let sub = matches.subcommand_matches("remove-account").unwrap();
            assert!(sub.get_flag(account::ARG_YES));
        });
    }

    #[test]
    fn test_login_requires_password() {
        clean_env(|| {
            assert!(new()
                .try_get_matches_from(vec!["studyhub", "login", "-e", "john@example.com"])
                .is_err());
        });
    }
}
