use std::env;

const HELP: &str = include_str!("./cli-help.txt");

/// Prints the help text and the current configuration if the server was started with any arguments at all.
///
/// Returns `true` when it did so, in which case the caller should exit instead of starting the server.
pub fn handle_command_line_args() -> bool {
    if env::args().len() <= 1 {
        return false;
    }
    println!("\n{HELP}\n");
    println!("Configuration from the environment (secrets are never shown):");
    for line in environment_report(|name| env::var(name).ok()) {
        println!("{line}");
    }
    true
}

/// The variables documented in the help text, minus the ones marked `(secret)`.
fn public_variables() -> Vec<&'static str> {
    let documented = HELP
        .lines()
        .filter(|line| line.starts_with("  SSB_"))
        .filter(|line| !line.contains("(secret)"))
        .filter_map(|line| line.split_whitespace().next());
    std::iter::once("RUST_LOG").chain(documented).collect()
}

fn environment_report<F>(lookup: F) -> Vec<String>
where F: Fn(&str) -> Option<String> {
    public_variables()
        .into_iter()
        .map(|name| {
            let value = lookup(name).unwrap_or_else(|| "(unset)".into());
            format!("  {name:<35} {value}")
        })
        .collect()
}
