use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use git_easy_tagger::cli::{apply_plan, plan_tag, TagWorkflowArgs};
use git_easy_tagger::config::{self, Config};
use git_easy_tagger::domain::VersionBump;
use git_easy_tagger::git::Git2Repository;
use git_easy_tagger::ui;

#[derive(clap::Parser)]
#[command(
    name = "git-easy-tagger",
    version,
    about = "Create the next semantic version tag in a git repository",
    after_help = "Examples:\n  \
        git-easy-tagger -p            Increment patch version (1.0.0 -> 1.0.1)\n  \
        git-easy-tagger -m            Increment minor version (1.0.0 -> 1.1.0)\n  \
        git-easy-tagger -M            Increment major version (1.0.0 -> 2.0.0)\n  \
        git-easy-tagger -p -u         Increment patch and push to remote\n  \
        git-easy-tagger -p --dry-run  Preview without making changes"
)]
#[command(group(
    ArgGroup::new("bump")
        .required(true)
        .args(["patch", "minor", "major"])
))]
struct Args {
    #[arg(short, long, help = "Increment patch version (x.x.PATCH)")]
    patch: bool,

    #[arg(short, long, help = "Increment minor version (x.MINOR.0)")]
    minor: bool,

    #[arg(short = 'M', long, help = "Increment major version (MAJOR.0.0)")]
    major: bool,

    #[arg(short = 'u', long, help = "Push the new tag to the remote")]
    push: bool,

    #[arg(long, help = "Pull from the remote before creating the tag")]
    pull: bool,

    #[arg(long, help = "Preview what would happen without making changes")]
    dry_run: bool,

    #[arg(short, long, help = "Remote to pull from and push to")]
    remote: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(
        short = 'C',
        long = "repo",
        default_value = ".",
        help = "Path inside the repository"
    )]
    repo: String,

    #[arg(
        short,
        long,
        action = clap::ArgAction::Count,
        help = "Increase verbosity (-v for INFO, -vv for DEBUG)"
    )]
    verbose: u8,
}

impl Args {
    fn bump(&self) -> VersionBump {
        if self.major {
            VersionBump::Major
        } else if self.minor {
            VersionBump::Minor
        } else {
            VersionBump::Patch
        }
    }

    /// Command-line flags combined with the configured behavior defaults
    fn workflow_args(&self, config: &Config) -> TagWorkflowArgs {
        TagWorkflowArgs {
            bump: self.bump(),
            push: self.push || config.behavior.push_by_default,
            pull: self.pull || config.behavior.pull_before_tag,
            dry_run: self.dry_run,
            remote: self.remote.clone(),
        }
    }
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(&args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let repo = Git2Repository::open(&args.repo)?;
    let workdir = repo.workdir().unwrap_or_else(|| Path::new(&args.repo));
    let config = config::load_config_from(args.config.as_deref(), workdir)
        .context("Error loading config")?;
    let workflow_args = args.workflow_args(&config);
    tracing::debug!(?workflow_args, "parsed arguments");

    let plan = plan_tag(&repo, &workflow_args, &config).context("Cannot determine next tag")?;
    for warning in &plan.warnings {
        ui::display_boundary_warning(warning);
    }
    ui::display_proposed_tag(plan.previous_tag.as_deref(), &plan.tag);

    let remote = plan.remote.clone();
    if !workflow_args.dry_run {
        ui::display_status(&format!("Creating tag: {}", plan.tag));
    }

    let result = apply_plan(&repo, plan, &workflow_args)
        .with_context(|| format!("Failed to publish tag using remote '{}'", remote))?;
    ui::display_result(&result, &remote, workflow_args.push);
    Ok(())
}

/// Console logging on stderr. `RUST_LOG` wins over `-v` when set.
fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr)
                .with_filter(filter),
        )
        .init();
}
