//! `tracker` command-line entry point.
//!
//! # Responsibility
//! - Resolve configuration, start logging and open the tracker store.
//! - Map subcommands onto `Tracker` operations and print their results.
//!
//! # Invariants
//! - Deletes happen only when a matching confirmation token is supplied.
//! - Storage details never reach stdout; they go to the log file.

mod render;

use anyhow::{bail, Context};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use log::{error, info};
use std::path::{Path, PathBuf};
use tracker_core::views::months::{current_month_label, month_options, MONTH_OPTION_COUNT};
use tracker_core::{
    init_logging, AllocationPct, ConfigOverrides, ConfirmationToken, DeleteTarget, MilestoneType,
    NewMilestone, NewProject, NewResource, Phase, ProjectId, ProjectListQuery, ProjectStatus,
    RecordId, RepoError, Role, Tracker, TrackerConfig,
};

#[derive(Parser)]
#[command(name = "tracker")]
#[command(about = "Track project intake, milestones and resource allocation")]
#[command(version)]
struct Cli {
    /// SQLite database file (overrides TRACKER_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// trace|debug|info|warn|error (overrides TRACKER_LOG_LEVEL)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Directory for rotating log files (overrides TRACKER_LOG_DIR)
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Project intake and lifecycle
    #[command(subcommand)]
    Project(ProjectCommand),
    /// Milestones of a project
    #[command(subcommand)]
    Milestone(MilestoneCommand),
    /// Resource allocations
    #[command(subcommand)]
    Resource(ResourceCommand),
    /// Management release view for one delivery month
    Release {
        /// Delivery month label, e.g. "Mar 2026"; defaults to the current month
        #[arg(long)]
        month: Option<String>,
    },
    /// Status metrics, optionally for one delivery month
    Dashboard {
        #[arg(long)]
        month: Option<String>,
    },
    /// Delivery-month labels accepted by intake and filters
    Months,
}

#[derive(Subcommand)]
enum ProjectCommand {
    /// Submit a new project
    Add(ProjectAddArgs),
    /// List projects, newest first
    List {
        #[arg(long)]
        month: Option<String>,
        /// Case-insensitive substring of the product
        #[arg(long)]
        product: Option<String>,
        /// Repeat to match any of several statuses
        #[arg(long = "status", value_parser = parse_status)]
        statuses: Vec<ProjectStatus>,
    },
    /// Show one project with its milestones
    Show { id: ProjectId },
    /// Change a project's status
    Status {
        id: ProjectId,
        #[arg(value_parser = parse_status)]
        status: ProjectStatus,
    },
    /// Replace a project's notes; omit the text to clear them
    Notes { id: ProjectId, text: Option<String> },
    /// Delete a project with its milestones and resources
    Delete(DeleteArgs),
}

#[derive(Args)]
struct ProjectAddArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    product: String,
    /// Business owner / stakeholders
    #[arg(long)]
    owner: Option<String>,
    #[arg(long)]
    scrum_master: Option<String>,
    /// Comma-separated platforms, e.g. "iOS, Android"
    #[arg(long)]
    platforms: Option<String>,
    /// Planned go-live date (YYYY-MM-DD)
    #[arg(long)]
    go_live: Option<NaiveDate>,
    #[arg(long, value_parser = parse_status, default_value = "New Request")]
    status: ProjectStatus,
    /// Delivery month label; defaults to the current month
    #[arg(long)]
    month: Option<String>,
    #[arg(long)]
    notes: Option<String>,
}

#[derive(Subcommand)]
enum MilestoneCommand {
    /// Record a milestone for a project
    Add(MilestoneAddArgs),
    /// List a project's milestones by planned date
    List { project: ProjectId },
    Delete(DeleteArgs),
}

#[derive(Args)]
struct MilestoneAddArgs {
    #[arg(long)]
    project: ProjectId,
    /// DEV_START, DEV_COMPLETE, HANDOVER_TO_QA, QA_END, STAKEHOLDER_DEMO or GO_LIVE
    #[arg(long = "type", value_parser = parse_milestone_type)]
    milestone_type: MilestoneType,
    #[arg(long)]
    planned: NaiveDate,
    #[arg(long)]
    revised: Option<NaiveDate>,
    #[arg(long, requires = "revised")]
    reason: Option<String>,
    /// Accept the suggestion to mark the project Delayed
    #[arg(long)]
    mark_delayed: bool,
}

#[derive(Subcommand)]
enum ResourceCommand {
    /// Allocate an employee to a project
    Add(ResourceAddArgs),
    /// List all allocations, newest first
    List,
    Delete(DeleteArgs),
}

#[derive(Args)]
struct ResourceAddArgs {
    #[arg(long)]
    name: String,
    /// FE, BE, iOS, Android or QA
    #[arg(long, value_parser = parse_role)]
    role: Role,
    #[arg(long)]
    project: ProjectId,
    /// DEV or QA
    #[arg(long, value_parser = parse_phase)]
    phase: Phase,
    /// Percentage in steps of 5
    #[arg(long, default_value = "100", value_parser = parse_allocation)]
    allocation: AllocationPct,
}

#[derive(Args)]
struct DeleteArgs {
    id: RecordId,
    /// Token printed by a previous delete request
    #[arg(long)]
    confirm: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = TrackerConfig::from_env(ConfigOverrides {
        db_path: cli.db.clone(),
        log_level: cli.log_level.clone(),
        log_dir: cli.log_dir.clone(),
    })?;
    let log_dir = absolute(&config.log_dir)?;
    init_logging(config.log_level, &log_dir)?;

    if let Some(parent) = config.db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create `{}`", parent.display()))?;
    }
    let tracker = Tracker::open(&config.db_path)
        .with_context(|| format!("failed to open tracker at `{}`", config.db_path.display()))?;
    info!(
        "event=cli_start module=cli status=ok db_path={}",
        config.db_path.display()
    );

    let today = Local::now().date_naive();
    run(&tracker, cli.command, today).map_err(|err| match err.downcast::<RepoError>() {
        Ok(repo_err) => {
            error!("event=cli_command module=cli status=error error={repo_err}");
            anyhow::anyhow!(repo_err.user_message())
        }
        Err(other) => other,
    })
}

fn run(tracker: &Tracker, command: Commands, today: NaiveDate) -> anyhow::Result<()> {
    match command {
        Commands::Project(command) => run_project(tracker, command, today),
        Commands::Milestone(command) => run_milestone(tracker, command),
        Commands::Resource(command) => run_resource(tracker, command),
        Commands::Release { month } => {
            let month = month.unwrap_or_else(|| current_month_label(today));
            let rows = tracker.release_view(&month)?;
            render::release(&month, &rows);
            Ok(())
        }
        Commands::Dashboard { month } => {
            let metrics = tracker.dashboard(month.as_deref())?;
            render::dashboard(month.as_deref(), &metrics);
            Ok(())
        }
        Commands::Months => {
            for label in month_options(today, MONTH_OPTION_COUNT) {
                println!("{label}");
            }
            Ok(())
        }
    }
}

fn run_project(tracker: &Tracker, command: ProjectCommand, today: NaiveDate) -> anyhow::Result<()> {
    match command {
        ProjectCommand::Add(args) => {
            let project = NewProject {
                business_owner: args.owner,
                scrum_master: args.scrum_master,
                platforms: args.platforms,
                planned_go_live: args.go_live,
                status: args.status,
                delivery_month: Some(args.month.unwrap_or_else(|| current_month_label(today))),
                notes: args.notes,
                ..NewProject::new(args.name, args.product)
            };
            let id = tracker.create_project(&project)?;
            println!("created project {id}");
        }
        ProjectCommand::List {
            month,
            product,
            statuses,
        } => {
            let query = ProjectListQuery {
                delivery_month: month,
                product_contains: product,
                statuses,
            };
            render::projects(&tracker.list_projects(&query)?);
        }
        ProjectCommand::Show { id } => {
            let Some(project) = tracker.get_project(id)? else {
                bail!("project {id} does not exist");
            };
            let milestones = tracker.list_milestones(id)?;
            render::project_detail(&project, &milestones);
        }
        ProjectCommand::Status { id, status } => {
            tracker.update_project_status(id, status)?;
            println!("project {id} is now {status}");
        }
        ProjectCommand::Notes { id, text } => {
            tracker.update_project_notes(id, text.as_deref())?;
            println!("updated notes for project {id}");
        }
        ProjectCommand::Delete(args) => {
            confirm_or_prompt(tracker, DeleteTarget::project(args.id), args.confirm)?;
        }
    }
    Ok(())
}

fn run_milestone(tracker: &Tracker, command: MilestoneCommand) -> anyhow::Result<()> {
    match command {
        MilestoneCommand::Add(args) => {
            let mut milestone = NewMilestone::new(args.project, args.milestone_type, args.planned);
            if let Some(revised) = args.revised {
                milestone = milestone.with_revision(revised, args.reason);
            }
            let added = tracker.add_milestone(&milestone)?;
            println!("created milestone {}", added.id);

            if let Some(suggestion) = added.delay_suggestion {
                if args.mark_delayed {
                    tracker.accept_delay_suggestion(&suggestion)?;
                    println!("project {} marked Delayed", suggestion.project_id);
                } else {
                    println!(
                        "revised date {} is after planned {}; rerun with --mark-delayed or use `project status {} Delayed`",
                        suggestion.revised_date, suggestion.planned_date, suggestion.project_id
                    );
                }
            }
        }
        MilestoneCommand::List { project } => {
            render::milestones(&tracker.list_milestones(project)?);
        }
        MilestoneCommand::Delete(args) => {
            confirm_or_prompt(tracker, DeleteTarget::milestone(args.id), args.confirm)?;
        }
    }
    Ok(())
}

fn run_resource(tracker: &Tracker, command: ResourceCommand) -> anyhow::Result<()> {
    match command {
        ResourceCommand::Add(args) => {
            let resource = NewResource::new(
                args.name,
                args.role,
                args.project,
                args.phase,
                args.allocation,
            );
            let id = tracker.add_resource(&resource)?;
            println!("created resource {id}");
        }
        ResourceCommand::List => render::resources(&tracker.list_resources()?),
        ResourceCommand::Delete(args) => {
            confirm_or_prompt(tracker, DeleteTarget::resource(args.id), args.confirm)?;
        }
    }
    Ok(())
}

/// Prints a fresh token, or performs the delete when `confirm` names `target`.
fn confirm_or_prompt(
    tracker: &Tracker,
    target: DeleteTarget,
    confirm: Option<String>,
) -> anyhow::Result<()> {
    let Some(text) = confirm else {
        let token = tracker.request_delete(target);
        println!("about to delete {target}; rerun with --confirm {token}");
        return Ok(());
    };

    let token: ConfirmationToken = text.parse()?;
    if token.target() != target {
        bail!("token was issued for {}, not {target}", token.target());
    }
    let deleted = tracker.confirm_delete(token)?;
    println!("deleted {deleted}");
    Ok(())
}

fn absolute(path: &Path) -> anyhow::Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    Ok(std::env::current_dir()
        .context("failed to resolve current directory")?
        .join(path))
}

fn parse_status(value: &str) -> Result<ProjectStatus, String> {
    ProjectStatus::parse(value).ok_or_else(|| {
        let known: Vec<&str> = ProjectStatus::ALL.iter().map(|s| s.as_str()).collect();
        format!("expected one of: {}", known.join(", "))
    })
}

fn parse_milestone_type(value: &str) -> Result<MilestoneType, String> {
    MilestoneType::parse(&value.to_ascii_uppercase())
        .ok_or_else(|| format!("unknown milestone type `{value}`"))
}

fn parse_role(value: &str) -> Result<Role, String> {
    Role::parse(value).ok_or_else(|| format!("unknown role `{value}`"))
}

fn parse_phase(value: &str) -> Result<Phase, String> {
    Phase::parse(&value.to_ascii_uppercase()).ok_or_else(|| format!("unknown phase `{value}`"))
}

fn parse_allocation(value: &str) -> Result<AllocationPct, String> {
    let pct: u8 = value
        .parse()
        .map_err(|_| format!("`{value}` is not a percentage"))?;
    AllocationPct::new(pct).map_err(|err| err.to_string())
}
