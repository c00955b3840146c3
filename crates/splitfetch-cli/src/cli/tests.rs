use super::*;

fn parse(args: &[&str]) -> CliCommand {
    let cli = Cli::try_parse_from(args).unwrap();
    cli.command
}

#[test]
fn cli_parse_download() {
    match parse(&["splitfetch", "download", "https://example.com/file.iso"]) {
        CliCommand::Download { url } => assert_eq!(url, "https://example.com/file.iso"),
    }
}

#[test]
fn cli_rejects_missing_subcommand() {
    assert!(Cli::try_parse_from(["splitfetch"]).is_err());
}

#[test]
fn cli_rejects_download_without_url() {
    assert!(Cli::try_parse_from(["splitfetch", "download"]).is_err());
}

#[test]
fn cli_rejects_extra_arguments() {
    assert!(Cli::try_parse_from(["splitfetch", "download", "https://a/x", "https://b/y"]).is_err());
}

#[test]
fn cli_rejects_unknown_subcommand() {
    assert!(Cli::try_parse_from(["splitfetch", "fetch", "https://a/x"]).is_err());
}
