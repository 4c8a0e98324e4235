//! CLI argument parsing tests

use clap::Parser;
use promptcraftctl::cli::{Cli, Commands, KeyCommands};
use promptcraftctl::commands::basics::draft_from_args;
use promptcraftctl::commands::Session;

#[test]
fn parses_compose_with_optional_fields() {
    let cli = Cli::try_parse_from([
        "promptcraftctl",
        "compose",
        "--task",
        "Schreibe eine E-Mail",
        "--tone",
        "freundlich",
        "--dry-run",
    ])
    .unwrap();

    let Commands::Compose(args) = cli.command else {
        panic!("expected compose");
    };
    assert!(args.dry_run);
    assert!(args.context.is_none());

    let draft = draft_from_args(&args);
    assert_eq!(
        draft.build_prompt(),
        "Aufgabe: Schreibe eine E-Mail\nTonfall: freundlich\n"
    );
}

#[test]
fn compose_requires_task() {
    assert!(Cli::try_parse_from(["promptcraftctl", "compose", "--tone", "x"]).is_err());
}

#[test]
fn chain_collects_steps_in_order() {
    let cli = Cli::try_parse_from([
        "promptcraftctl",
        "chain",
        "--step",
        "Recherche",
        "--step",
        "Analyse",
        "--step",
        "Text",
    ])
    .unwrap();

    match cli.command {
        Commands::Chain { steps } => assert_eq!(steps, vec!["Recherche", "Analyse", "Text"]),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn chain_needs_at_least_one_step() {
    assert!(Cli::try_parse_from(["promptcraftctl", "chain"]).is_err());
}

#[test]
fn global_gateway_flag_after_subcommand() {
    let cli = Cli::try_parse_from([
        "promptcraftctl",
        "consistency",
        "2+2?",
        "--per-run",
        "--gateway",
        "http://10.0.0.2:3001",
    ])
    .unwrap();

    assert_eq!(cli.gateway.as_deref(), Some("http://10.0.0.2:3001"));
    assert!(matches!(
        cli.command,
        Commands::Consistency { per_run: true, .. }
    ));
}

#[test]
fn key_subcommands() {
    let cli = Cli::try_parse_from(["promptcraftctl", "key", "set", "sk-or-1"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Key { action: KeyCommands::Set { ref key } } if key == "sk-or-1"
    ));
}

#[test]
fn explicit_gateway_wins() {
    assert_eq!(
        Session::discover_gateway_url(Some("http://example:1")),
        "http://example:1"
    );
}
