//! Tests for CLI subcommand parsing.

use clap::Parser;
use std::path::PathBuf;
use zone_status::config::{Cli, Command, LogFormat};

#[test]
fn test_cli_check_command_parsing() {
    let args = ["zone_status", "check", "example.com"];
    let cli = Cli::try_parse_from(args.iter()).expect("Should parse check command");

    match cli.command {
        Command::Check(cmd) => {
            assert_eq!(cmd.zones, ["example.com"]);
            assert_eq!(cmd.profile, "mail");
            assert_eq!(cmd.profile_file, None);
        }
        _ => panic!("Should parse as Check command"),
    }
}

#[test]
fn test_cli_check_command_with_multiple_zones() {
    let args = ["zone_status", "check", "example.com,example.org", "other.example"];
    let cli = Cli::try_parse_from(args.iter()).expect("Should parse check command");

    match cli.command {
        Command::Check(cmd) => {
            // splitting on commas happens in parse_zone_args, not in clap
            assert_eq!(cmd.zones, ["example.com,example.org", "other.example"]);
        }
        _ => panic!("Should parse as Check command"),
    }
}

#[test]
fn test_cli_check_command_with_profile_file() {
    let args = [
        "zone_status",
        "check",
        "example.com",
        "--profile-file",
        "mail.json",
    ];
    let cli = Cli::try_parse_from(args.iter()).expect("Should parse check command");

    match cli.command {
        Command::Check(cmd) => {
            assert_eq!(cmd.profile_file, Some(PathBuf::from("mail.json")));
        }
        _ => panic!("Should parse as Check command"),
    }
}

#[test]
fn test_cli_check_requires_zones() {
    let args = ["zone_status", "check"];
    let result = Cli::try_parse_from(args.iter());
    assert!(result.is_err(), "Should fail without zone arguments");
}

#[test]
fn test_cli_probe_command_parsing() {
    let args = ["zone_status", "probe", "example.com"];
    let cli = Cli::try_parse_from(args.iter()).expect("Should parse probe command");

    match cli.command {
        Command::Probe(cmd) => assert_eq!(cmd.zone, "example.com"),
        _ => panic!("Should parse as Probe command"),
    }
}

#[test]
fn test_cli_missing_subcommand_error() {
    let args = ["zone_status", "example.com"];
    let result = Cli::try_parse_from(args.iter());

    assert!(result.is_err(), "Should fail when subcommand is missing");
    let error_msg = result.unwrap_err().to_string();
    assert!(
        error_msg.contains("subcommand") || error_msg.contains("unrecognized"),
        "Error message should mention the subcommand problem: {}",
        error_msg
    );
}

#[test]
fn test_cli_global_log_options() {
    let args = [
        "zone_status",
        "check",
        "example.com",
        "--log-level",
        "debug",
        "--log-format",
        "json",
    ];
    let cli = Cli::try_parse_from(args.iter()).expect("Should parse log options");

    assert_eq!(
        log::LevelFilter::from(cli.log_level.clone()),
        log::LevelFilter::Debug
    );
    match cli.log_format {
        LogFormat::Json => {}
        LogFormat::Plain => panic!("Should be Json format"),
    }
}
