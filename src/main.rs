use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use gomod::config::{Config, config_path};
use gomod::inventory::{self, report};
use gomod::manifest::GoModParser;
use gomod::toolchain::GoTool;
use gomod::upgrade::{Outcome, Upgrader};
use gomod::version::resolver::create_default_resolver;

#[derive(Parser)]
#[command(name = "gomod")]
#[command(version, about = "go mod manager")]
struct Cli {
    /// Config file (defaults to $XDG_CONFIG_HOME/gomod/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Manifest to read dependencies from
    #[arg(long, global = true, default_value = "go.mod")]
    manifest: PathBuf,

    /// Directory the go commands run in
    #[arg(short = 'C', long = "dir", global = true)]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Update project dependencies to latest
    #[command(visible_alias = "u")]
    Upgrade {
        /// Upgrade indirect dependencies too
        #[arg(short, long)]
        indirect: bool,
    },
    /// Analyze project dependencies
    #[command(visible_alias = "a")]
    Analyzed,
    /// List dependencies with an available update
    #[command(visible_alias = "l")]
    Updates,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config_file = Config::locate(cli.config.as_deref());
    let config = Config::load(config_file.as_deref())?;
    let _guard = gomod::logging::init(config.log.file.as_deref()).context("init logging")?;

    match &config_file {
        Some(path) => debug!("Loaded config from {}", path.display()),
        None => debug!("No config file at {}, using defaults", config_path().display()),
    }

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(cli, config))
}

async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    let manifest = match &cli.dir {
        Some(dir) if cli.manifest.is_relative() => dir.join(&cli.manifest),
        _ => cli.manifest.clone(),
    };
    check_manifest(&manifest)?;

    let go = GoTool::new("go", cli.dir.clone());

    match cli.command {
        Command::Upgrade { indirect } => {
            let parser = GoModParser::new();
            let records = parser
                .parse_file(&manifest)
                .context("get go.mod file failed")?
                .records();
            let resolver = create_default_resolver(&config);
            let include_indirect = indirect || config.upgrade.include_indirect;

            let reports = Upgrader::new(&resolver, &go, include_indirect)
                .run(&records)
                .await;

            let count = |f: fn(&Outcome) -> bool| reports.iter().filter(|r| f(&r.outcome)).count();
            info!(
                upgraded = count(|o| matches!(o, Outcome::Upgraded(_))),
                fell_back = count(|o| matches!(o, Outcome::FellBack)),
                failed = count(|o| matches!(o, Outcome::Failed(_))),
                skipped = count(|o| matches!(o, Outcome::Skipped)),
                "upgrade finished"
            );
        }
        Command::Analyzed => {
            let modules = inventory::collect(&go, false)
                .await
                .context("analyzed project dependencies failed")?;
            let rows = report::inventory_rows(&modules, &GoModParser::new());
            print_table(&report::INVENTORY_HEADERS, &rows, "No dependencies found.");
        }
        Command::Updates => {
            let modules = inventory::collect(&go, true)
                .await
                .context("check for updates failed")?;
            let rows = report::update_rows(&modules);
            print_table(
                &report::UPDATE_HEADERS,
                &rows,
                "All of your dependencies are up to date.",
            );
        }
    }

    Ok(())
}

fn check_manifest(path: &Path) -> anyhow::Result<()> {
    match std::fs::metadata(path) {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            bail!("go.mod file not found: {}", path.display())
        }
        Err(e) => Err(e).with_context(|| format!("check go.mod file {} failed", path.display())),
    }
}

fn print_table(headers: &[&str], rows: &[Vec<String>], empty_notice: &str) {
    if rows.is_empty() {
        println!(" ✔ {}", empty_notice);
    } else {
        print!("{}", report::render_table(headers, rows));
    }
}
