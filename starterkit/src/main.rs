//! Polymer Starter Kit Plus project generator.
//!
//! Asks a handful of questions (or reads them from an answers file), writes the
//! project into the destination directory and runs `npm install` and
//! `bower install` there.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use starterkit::exit_codes;
use starterkit::generate::{install, scaffold};
use starterkit::io::answers::{AnswerSource, FileAnswers, TerminalCollector, load_answers};
use starterkit::io::config::{DEFAULT_CONFIG_FILE, load_config};
use starterkit::io::installer::{CommandInstaller, InstallOptions};
use starterkit::io::templates::TemplateTree;
use starterkit::logging;
use starterkit::plan::plan_project;
use tracing::error;

#[derive(Parser)]
#[command(
    name = "starterkit",
    version,
    about = "Scaffold a Polymer Starter Kit Plus project"
)]
struct Cli {
    /// Debug logging for this crate (overridden by `RUST_LOG`).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a project, interactively unless `--answers` is given.
    New(NewArgs),
    /// Print the resolved context and every rule with its run/skip decision.
    Plan {
        /// TOML answers file keyed by question name.
        #[arg(long)]
        answers: PathBuf,
    },
}

#[derive(Args)]
struct NewArgs {
    /// Directory to generate into (created if missing).
    #[arg(long, default_value = ".")]
    dest: PathBuf,

    /// TOML answers file; skips the interview.
    #[arg(long)]
    answers: Option<PathBuf>,

    /// Generator config (defaults to `starterkit.toml` when present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Do not run the dependency installer.
    #[arg(long)]
    skip_install: bool,

    /// Do not print installer messages.
    #[arg(long)]
    skip_install_message: bool,

    /// Read templates from this directory instead of the bundled tree.
    #[arg(long, hide = true)]
    template_root: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let code = match run(cli.command) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:#}", err);
            exit_codes::INVALID
        }
    };
    std::process::exit(code);
}

fn run(command: Command) -> Result<i32> {
    match command {
        Command::New(args) => cmd_new(args),
        Command::Plan { answers } => cmd_plan(&answers),
    }
}

fn cmd_new(args: NewArgs) -> Result<i32> {
    let config_path = args
        .config
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let config = load_config(&config_path)?;
    let templates = match &args.template_root {
        Some(root) => TemplateTree::Dir(root),
        None => TemplateTree::Bundled,
    };

    let mut source: Box<dyn AnswerSource + '_> = match &args.answers {
        Some(path) => Box::new(FileAnswers::new(path)),
        None => Box::new(TerminalCollector::new(io::stdin().lock(), io::stdout())),
    };

    let mut out = io::stdout();
    scaffold(source.as_mut(), templates, &args.dest, &mut out)?;
    out.flush()?;

    let installer = CommandInstaller::new(config.installer);
    let options = InstallOptions {
        skip_install: args.skip_install,
        skip_message: args.skip_install_message,
    };
    match install(&installer, &args.dest, options, &mut out) {
        Ok(_) => Ok(exit_codes::OK),
        Err(err) => {
            error!(error = %format!("{err:#}"), "installer failed");
            eprintln!("{:#}", err);
            Ok(exit_codes::INSTALL_FAILED)
        }
    }
}

fn cmd_plan(answers_path: &Path) -> Result<i32> {
    let answers = load_answers(answers_path)?;
    let plan = plan_project(&answers);
    let json = serde_json::to_string_pretty(&plan).context("serialize plan")?;
    println!("{json}");
    Ok(exit_codes::OK)
}
