mod common;
mod package_manager;
mod ui;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use package_manager::{
    DETECTION_PRIORITY, PACKAGE_MANAGER_ENV, PackageManager, ResolveOptions, Resolver,
    available_package_managers, command_pattern, detect_from_lock_file, detect_from_package_json,
    selection_prompt,
};
use serde_json::json;
use std::path::PathBuf;
use ui::prelude::*;

/// nodepm main parser
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Activate debug mode
    #[arg(short, long, global = true)]
    debug: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text", global = true)]
    output: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Project directory (defaults to the current directory)
    #[arg(short = 'C', long, global = true)]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show which package manager governs the project and why
    Detect {
        /// Also show the raw package.json and lock-file signals
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print the command that runs a script (install, test, build, dev or any custom script)
    Run {
        /// Script name
        script: String,
        /// Use this package manager instead of detecting one
        #[arg(long)]
        pm: Option<PackageManager>,
    },

    /// Print the command that runs a binary without installing it (npx, dlx, bunx)
    Exec {
        /// Binary or package name, e.g. prettier or @angular/cli
        binary: String,
        /// Extra arguments appended to the command
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
        /// Use this package manager instead of detecting one
        #[arg(long)]
        pm: Option<PackageManager>,
    },

    /// Print a regex matching any package manager's form of an action
    Pattern {
        /// Action name, e.g. install, test or lint
        action: String,
    },

    /// Persist a package manager choice for the project or globally
    Set {
        /// npm, pnpm, yarn or bun
        name: String,
        /// Store as the global preference instead of the project choice
        #[arg(short, long)]
        global: bool,
    },

    /// List supported package managers and how to choose one
    List,
}

fn main() {
    let cli = Cli::parse();

    ui::init(cli.output, !cli.no_color);
    ui::set_debug_mode(cli.debug);

    if let Err(e) = run(&cli) {
        emit(Level::Error, "error", &format!("Error: {e:#}"), None);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let resolver = Resolver::system();
    let project_dir = match &cli.dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("determining current directory")?,
    };
    let options = ResolveOptions::in_dir(&project_dir);

    match &cli.command {
        Some(Commands::Detect { verbose }) => {
            let resolved = resolver.get_package_manager(&options);
            emit(
                Level::Info,
                "detect",
                &format!("{} (source: {})", resolved.name(), resolved.source),
                Some(json!({
                    "packageManager": resolved.name(),
                    "source": resolved.source,
                    "lockFile": resolved.config().lock_file,
                })),
            );

            if *verbose {
                let signal = |pm: Option<PackageManager>| pm.map_or("none", |pm| pm.name());
                let package_json = detect_from_package_json(&project_dir);
                let lock_file = detect_from_lock_file(&project_dir);
                emit(
                    Level::Info,
                    "detect.signals",
                    &format!(
                        "package.json: {}\nlock file:    {}",
                        signal(package_json),
                        signal(lock_file)
                    ),
                    Some(json!({
                        "packageJson": package_json,
                        "lockFile": lock_file,
                    })),
                );
            }
        }
        Some(Commands::Run { script, pm }) => {
            let options = ResolveOptions {
                package_manager: *pm,
                ..options
            };
            let command = resolver.get_run_command(script, &options)?;
            emit(
                Level::Info,
                "run",
                &command,
                Some(json!({ "script": script, "command": command })),
            );
        }
        Some(Commands::Exec { binary, args, pm }) => {
            let options = ResolveOptions {
                package_manager: *pm,
                ..options
            };
            let args = args.join(" ");
            let command = resolver.get_exec_command(binary, Some(args.as_str()), &options)?;
            emit(
                Level::Info,
                "exec",
                &command,
                Some(json!({ "binary": binary, "command": command })),
            );
        }
        Some(Commands::Pattern { action }) => {
            let pattern = command_pattern(action);
            emit(
                Level::Info,
                "pattern",
                &pattern,
                Some(json!({ "action": action, "pattern": pattern })),
            );
        }
        Some(Commands::Set { name, global }) => {
            let store = resolver.store();
            let (choice, scope) = if *global {
                (store.set_preferred_package_manager(name)?, "global")
            } else {
                (
                    store.set_project_package_manager(name, &project_dir)?,
                    "project",
                )
            };
            emit(
                Level::Success,
                &format!("set.{scope}"),
                &format!("Set {} as the {scope} package manager", choice.package_manager),
                Some(serde_json::to_value(&choice)?),
            );
        }
        Some(Commands::List) => {
            let resolved = resolver.get_package_manager(&options);
            let available = available_package_managers();
            handle_list(resolved.package_manager, &available);

            if matches!(get_output_format(), OutputFormat::Text) {
                emit(
                    Level::Info,
                    "list.prompt",
                    &selection_prompt(&resolved, &available),
                    None,
                );
            }
        }
        None => {
            emit(
                Level::Info,
                "usage",
                "nodepm: run with --help for usage",
                None,
            );
        }
    }

    Ok(())
}

fn handle_list(current: PackageManager, available: &[PackageManager]) {
    for pm in DETECTION_PRIORITY {
        let marker = if pm == current { "*" } else { " " };
        let installed = available.contains(&pm);
        emit(
            Level::Info,
            "list.manager",
            &format!(
                "{marker} {:<5} {:<18} {}",
                pm.name(),
                pm.lock_file(),
                if installed { "installed" } else { "not installed" }
            ),
            Some(json!({
                "name": pm.name(),
                "lockFile": pm.lock_file(),
                "installed": installed,
                "current": pm == current,
            })),
        );
    }

    if ui::is_debug_enabled() {
        emit(
            Level::Debug,
            "list.env",
            &format!("Override with {PACKAGE_MANAGER_ENV}=<name>"),
            None,
        );
    }
}
