//! Command dispatch

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::{parse_channels, ChannelKind};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::Message;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;
use crate::util::path::expand_env_vars;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let dir = cli
        .dir
        .clone()
        .or_else(|| std::env::current_dir().ok());
    let settings = Settings::load(dir.as_deref())?;
    let container = ServiceContainer::new(settings);

    match &cli.command {
        Some(Commands::Cost { manifest, tree }) => cmd_cost(&container, manifest, *tree),
        Some(Commands::Notify { message, via }) => cmd_notify(&container, message, via),
        Some(Commands::Config { command }) => cmd_config(&container, command, dir.as_deref()),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Ok(()),
    }
}

/// One line of `rcompose cost` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CostLine {
    Tree(String),
    Hierarchy { name: String, summary: String },
    Total(i64),
}

#[instrument(skip(container))]
fn cmd_cost(container: &ServiceContainer, manifest: &str, tree: bool) -> CliResult<()> {
    for line in cost_lines(container, manifest, tree)? {
        match line {
            CostLine::Tree(rendered) => output::info(&rendered),
            CostLine::Hierarchy { name, summary } => output::action(&name, &summary),
            CostLine::Total(total) => output::header(&format!("Total cost: {}", total)),
        }
    }
    Ok(())
}

/// Cost output for `manifest`; trees come first when `tree` or `show_tree` is set.
fn cost_lines(
    container: &ServiceContainer,
    manifest: &str,
    tree: bool,
) -> CliResult<Vec<CostLine>> {
    let path = PathBuf::from(expand_env_vars(manifest));
    debug!("manifest path: {}", path.display());

    let report = container.cost_service().report(&path)?;

    let mut lines = Vec::new();
    if tree || container.settings.show_tree {
        lines.extend(
            report
                .render_trees()
                .iter()
                .map(|rendered| CostLine::Tree(rendered.trim_end().to_string())),
        );
    }
    lines.extend(report.totals().into_iter().map(|cost| CostLine::Hierarchy {
        name: cost.name,
        summary: format!("{} ({} items, depth {})", cost.total, cost.leaves, cost.depth),
    }));
    lines.push(CostLine::Total(report.grand_total()));
    Ok(lines)
}

#[instrument(skip(container))]
fn cmd_notify(container: &ServiceContainer, message: &str, via: &[String]) -> CliResult<()> {
    let channels: Vec<ChannelKind> = if via.is_empty() {
        parse_channels(container.settings.default_channels.as_slice())?
    } else {
        parse_channels(via)?
    };

    let delivered = container
        .notification_service()
        .send(&channels, &Message::new(message))?;
    debug!("delivered through {} channels", delivered);
    Ok(())
}

fn cmd_config(
    container: &ServiceContainer,
    command: &ConfigCommands,
    dir: Option<&Path>,
) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&container.settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Template => {
            output::info(&Settings::template());
            Ok(())
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::action("global", &path.display()),
                None => output::action("global", "<unavailable>"),
            }
            if let Some(dir) = dir {
                output::action("local", &local_config_path(dir).display());
            }
            Ok(())
        }
        ConfigCommands::Init { global } => {
            let path = if *global {
                global_config_path().ok_or_else(|| {
                    CliError::Usage("cannot determine global config directory".to_string())
                })?
            } else {
                let dir = dir.ok_or_else(|| {
                    CliError::Usage("cannot determine current directory".to_string())
                })?;
                local_config_path(dir)
            };
            init_config(&path)
        }
    }
}

fn init_config(path: &Path) -> CliResult<()> {
    if path.exists() {
        return Err(CliError::Usage(format!(
            "config already exists: {}",
            path.display()
        )));
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| InfraError::io(format!("create {}", parent.display()), e))?;
    }
    std::fs::write(path, Settings::template())
        .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
    output::success(&format!("created {}", path.display()));
    output::detail("edit it to set default channels and sender");
    Ok(())
}
