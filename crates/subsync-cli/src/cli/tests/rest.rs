//! Tests for fetch, sources and inspect.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use std::path::Path;

#[test]
fn cli_parse_fetch() {
    match parse(&["subsync", "fetch", "trojan"]) {
        CliCommand::Fetch { key, output } => {
            assert_eq!(key, "trojan");
            assert!(output.is_none());
        }
        _ => panic!("expected Fetch"),
    }
}

#[test]
fn cli_parse_fetch_output() {
    match parse(&["subsync", "fetch", "trojan", "--output", "out/t.txt"]) {
        CliCommand::Fetch { key, output } => {
            assert_eq!(key, "trojan");
            assert_eq!(output.as_deref(), Some(Path::new("out/t.txt")));
        }
        _ => panic!("expected Fetch with --output"),
    }
}

#[test]
fn cli_parse_fetch_requires_key() {
    assert!(Cli::try_parse_from(["subsync", "fetch"]).is_err());
}

#[test]
fn cli_parse_sources() {
    assert!(matches!(parse(&["subsync", "sources"]), CliCommand::Sources));
}

#[test]
fn cli_parse_inspect() {
    match parse(&["subsync", "inspect", "subscriptions/Germany.txt"]) {
        CliCommand::Inspect { path } => {
            assert_eq!(path, Path::new("subscriptions/Germany.txt"));
        }
        _ => panic!("expected Inspect"),
    }
}

#[test]
fn cli_parse_config_before_subcommand() {
    let cli = Cli::try_parse_from(["subsync", "--config", "c.toml", "sources"]).unwrap();
    assert_eq!(cli.config.as_deref(), Some(Path::new("c.toml")));
}

#[test]
fn cli_parse_unknown_subcommand_fails() {
    assert!(Cli::try_parse_from(["subsync", "status"]).is_err());
}
