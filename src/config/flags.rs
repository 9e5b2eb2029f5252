//! Command-line flag layer
//!
//! The flag schema is generated from the default table, so every declared
//! setting gets a long flag (and a short one where declared). No flag carries
//! a clap default: a setting only lands in this layer when it was typed on the
//! command line, which keeps unsupplied flags from shadowing env or file
//! values.

use super::defaults::SETTINGS;
use crate::domain::{RawValue, Setting, SettingKind, Source, SourceValues};
use crate::utils::split_csv;
use clap::parser::ValueSource;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Args, Command, FromArgMatches};
use std::ffi::OsString;
use std::path::PathBuf;

const CONFIG_ARG: &str = "config";

/// Flags as typed by the user, still untyped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagArgs {
    /// Explicit config file path from `--config`.
    pub config: Option<PathBuf>,
    values: SourceValues,
}

impl Default for FlagArgs {
    fn default() -> Self {
        Self { config: None, values: SourceValues::new(Source::Flag) }
    }
}

impl FlagArgs {
    /// A standalone command carrying just the setting flags.
    pub fn command() -> Command {
        Self::augment_args(Command::new("gonzo").args_override_self(true))
    }

    /// Parse flags from an argument list (first item is the program name).
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Self::command().try_get_matches_from(args)?;
        Self::from_arg_matches(&matches)
    }

    /// The values that were explicitly supplied.
    pub fn values(&self) -> &SourceValues {
        &self.values
    }
}

/// Build the flag layer.
pub fn read_flags(args: &FlagArgs) -> SourceValues {
    args.values.clone()
}

fn setting_arg(setting: &'static Setting) -> Arg {
    let help = if setting.default.is_empty() {
        setting.help.to_string()
    } else {
        format!("{} [default: {}]", setting.help, setting.default)
    };

    let mut arg = Arg::new(setting.key).long(setting.flag).help(help);
    if let Some(short) = setting.short {
        arg = arg.short(short);
    }

    match setting.kind {
        SettingKind::Int => arg.value_name("INT"),
        SettingKind::Duration => arg.value_name("DURATION"),
        SettingKind::String => arg.value_name("STRING"),
        SettingKind::StringList => arg.value_name("LIST").action(ArgAction::Append),
        // `--follow` means true; `--follow=false` is also accepted.
        SettingKind::Bool => arg
            .value_name("BOOL")
            .num_args(0..=1)
            .require_equals(true)
            .default_missing_value("true"),
    }
}

impl Args for FlagArgs {
    fn augment_args(cmd: Command) -> Command {
        let cmd = cmd.arg(
            Arg::new(CONFIG_ARG)
                .long("config")
                .value_name("PATH")
                .value_parser(value_parser!(OsString))
                .help("Config file (default is $HOME/.config/gonzo/config.yml)"),
        );
        SETTINGS.iter().fold(cmd, |cmd, setting| cmd.arg(setting_arg(setting)))
    }

    fn augment_args_for_update(cmd: Command) -> Command {
        Self::augment_args(cmd)
    }
}

impl FromArgMatches for FlagArgs {
    fn from_arg_matches(matches: &ArgMatches) -> Result<Self, clap::Error> {
        let mut args = Self::default();
        args.update_from_arg_matches(matches)?;
        Ok(args)
    }

    fn update_from_arg_matches(&mut self, matches: &ArgMatches) -> Result<(), clap::Error> {
        // `--config=` is the same as not passing it: discovery still runs.
        if let Some(path) = matches.get_one::<OsString>(CONFIG_ARG).filter(|p| !p.is_empty()) {
            self.config = Some(PathBuf::from(path));
        }

        for setting in SETTINGS {
            if matches.value_source(setting.key) != Some(ValueSource::CommandLine) {
                continue;
            }
            let mut occurrences: Vec<String> = matches
                .get_many::<String>(setting.key)
                .map(|values| values.cloned().collect())
                .unwrap_or_default();

            let raw = match setting.kind {
                // Each occurrence may itself be comma-separated: `-f a.log,b.log`.
                SettingKind::StringList => {
                    RawValue::List(occurrences.iter().flat_map(|o| split_csv(o)).collect())
                }
                _ => match occurrences.pop() {
                    Some(value) => RawValue::Scalar(value),
                    None => continue,
                },
            };
            self.values.insert(setting.key, raw);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> FlagArgs {
        let mut argv = vec!["gonzo"];
        argv.extend_from_slice(args);
        FlagArgs::try_parse_from(argv).expect("valid flags")
    }

    #[test]
    fn test_no_flags_yields_empty_layer() {
        let flags = parse(&[]);
        assert!(flags.config.is_none());
        assert!(read_flags(&flags).is_empty());
        assert_eq!(read_flags(&flags).source(), Source::Flag);
    }

    #[test]
    fn test_only_supplied_flags_are_present() {
        let values = read_flags(&parse(&["--memory-size=5000", "-s", "dracula"]));
        assert_eq!(values.len(), 2);
        assert_eq!(values.get("memory-size"), Some(&RawValue::scalar("5000")));
        assert_eq!(values.get("skin"), Some(&RawValue::scalar("dracula")));
        assert!(!values.contains("vmlogs-query"));
        assert!(!values.contains("update-interval"));
    }

    #[test]
    fn test_short_flags() {
        let values = read_flags(&parse(&["-m", "10", "-u", "2s", "-b", "20", "-t", "-f", "a.log"]));
        assert_eq!(values.get("memory-size"), Some(&RawValue::scalar("10")));
        assert_eq!(values.get("update-interval"), Some(&RawValue::scalar("2s")));
        assert_eq!(values.get("log-buffer"), Some(&RawValue::scalar("20")));
        assert_eq!(values.get("test-mode"), Some(&RawValue::scalar("true")));
        assert_eq!(values.get("files"), Some(&RawValue::list(["a.log"])));
    }

    #[test]
    fn test_bool_flags_with_and_without_value() {
        let values = read_flags(&parse(&["--follow", "--otlp-enabled=false"]));
        assert_eq!(values.get("follow"), Some(&RawValue::scalar("true")));
        assert_eq!(values.get("otlp-enabled"), Some(&RawValue::scalar("false")));
    }

    #[test]
    fn test_file_flag_is_repeatable() {
        let values = read_flags(&parse(&["-f", "app.log", "--file", "error.log", "-f", "/var/log/*.log"]));
        assert_eq!(
            values.get("files"),
            Some(&RawValue::list(["app.log", "error.log", "/var/log/*.log"]))
        );
    }

    #[test]
    fn test_stop_words_split_per_occurrence() {
        let values = read_flags(&parse(&["--stop-words=foo,bar,baz", "--stop-words", "foo"]));
        assert_eq!(values.get("stop-words"), Some(&RawValue::list(["foo", "bar", "baz", "foo"])));
    }

    #[test]
    fn test_malformed_values_are_not_rejected_here() {
        let values = read_flags(&parse(&["--otlp-grpc-port=notanumber"]));
        assert_eq!(values.get("otlp-grpc-port"), Some(&RawValue::scalar("notanumber")));
    }

    #[test]
    fn test_repeated_scalar_flag_last_wins() {
        let values = read_flags(&parse(&["--skin", "a", "--skin", "b"]));
        assert_eq!(values.get("skin"), Some(&RawValue::scalar("b")));
    }

    #[test]
    fn test_config_flag() {
        let flags = parse(&["--config", "/etc/gonzo.yml"]);
        assert_eq!(flags.config, Some(PathBuf::from("/etc/gonzo.yml")));
        assert!(flags.values().is_empty());
    }

    #[test]
    fn test_empty_config_flag_means_discovery() {
        let flags = parse(&["--config="]);
        assert!(flags.config.is_none());
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        assert!(FlagArgs::try_parse_from(["gonzo", "--no-such-flag"]).is_err());
    }

    #[test]
    fn test_every_setting_has_a_flag() {
        let cmd = FlagArgs::command();
        for setting in SETTINGS {
            let arg = cmd.get_arguments().find(|a| a.get_id().as_str() == setting.key);
            let arg = arg.unwrap_or_else(|| panic!("missing flag for {}", setting.key));
            assert_eq!(arg.get_long(), Some(setting.flag));
            assert_eq!(arg.get_short(), setting.short);
        }
    }
}
