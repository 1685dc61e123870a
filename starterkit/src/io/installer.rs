//! Dependency installation for a freshly generated project.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Result, bail};
use tracing::info;

use super::config::InstallerConfig;
use super::process::run_command_streaming;

/// Invocation options passed through from the command line.
///
/// These are independent of the interview answers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstallOptions {
    /// Do not run the installer at all.
    pub skip_install: bool,
    /// Do not print installer progress messages.
    pub skip_message: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallRequest {
    pub workdir: PathBuf,
    pub options: InstallOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    Installed,
    Skipped,
}

pub trait Installer {
    fn install(&self, request: &InstallRequest, out: &mut dyn Write) -> Result<InstallOutcome>;
}

/// Runs the configured package manager commands in order (`npm install`, `bower install`).
pub struct CommandInstaller {
    config: InstallerConfig,
}

impl CommandInstaller {
    pub fn new(config: InstallerConfig) -> Self {
        Self { config }
    }

    fn tool_names(&self) -> String {
        self.config
            .commands
            .iter()
            .map(|cmd| cmd.join(" "))
            .collect::<Vec<_>>()
            .join(" & ")
    }
}

impl Installer for CommandInstaller {
    fn install(&self, request: &InstallRequest, out: &mut dyn Write) -> Result<InstallOutcome> {
        let options = request.options;
        if options.skip_install {
            if !options.skip_message {
                writeln!(
                    out,
                    "To install dependencies, run `{}`.",
                    self.config.command_line()
                )?;
            }
            return Ok(InstallOutcome::Skipped);
        }

        if !options.skip_message {
            writeln!(
                out,
                "I'm all done. Running {} for you to install the required dependencies. \
                 If this fails, try running the command yourself.",
                self.tool_names()
            )?;
        }

        for argv in &self.config.commands {
            run_install_command(argv, &request.workdir, &self.config, out)?;
        }
        Ok(InstallOutcome::Installed)
    }
}

fn run_install_command(
    argv: &[String],
    workdir: &Path,
    config: &InstallerConfig,
    out: &mut dyn Write,
) -> Result<()> {
    let Some((program, args)) = argv.split_first() else {
        bail!("empty installer command");
    };
    let line = argv.join(" ");
    info!(command = %line, workdir = %workdir.display(), "running installer");

    let mut cmd = Command::new(program);
    cmd.args(args).current_dir(workdir);
    let output = run_command_streaming(cmd, config.timeout(), config.stderr_tail_bytes, out)?;

    if output.timed_out {
        bail!("`{line}` timed out after {}s", config.timeout_secs.unwrap_or_default());
    }
    if !output.status.success() {
        bail!(
            "`{line}` failed ({}): {}",
            output.status,
            output.stderr_tail_lossy()
        );
    }
    Ok(())
}
