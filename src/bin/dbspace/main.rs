use anyhow::Result;
use clap::Parser;

mod cli;
mod util;
mod cmd_overview;
mod cmd_report;
mod cmd_tables;

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = cli::Cli::parse();
    match cli.cmd {
        cli::Cmd::Overview { path, json } =>
            cmd_overview::exec(path, json),

        cli::Cmd::Tables { path, separate, json } =>
            cmd_tables::exec(path, separate, json),

        cli::Cmd::Report { path, name, json } =>
            cmd_report::exec(path, name, json),
    }
}
