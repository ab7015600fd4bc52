//! Library integration tests.

use depsupply::SupplyError;

#[test]
fn error_types_are_public() {
    let err = SupplyError::CommandFailed {
        command: "npm install".into(),
        code: Some(1),
    };
    assert!(err.to_string().contains("npm install"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> depsupply::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use depsupply::cli::{Cli, Commands};

    let cli = Cli::parse_from(["depsupply", "plan", "--json"]);

    if let Commands::Plan(args) = cli.command {
        assert!(args.json);
    } else {
        panic!("Expected Plan command");
    }
}
