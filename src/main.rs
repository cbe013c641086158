use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use classtable_tools::assignment::ParseOptions;
use classtable_tools::io::{docx_file, grid_write};
use classtable_tools::session::{self, ScheduleState};
use classtable_tools::{Result, ScheduleError, render};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    init_logging()?;
    match cli.command {
        Command::Render(args) => execute_render(args),
        Command::Preview(args) => execute_preview(args),
        Command::List(args) => execute_list(args),
    }
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| ScheduleError::Logging(error.to_string()))
}

fn execute_render(args: RenderArgs) -> Result<()> {
    let state = ingest_state(&args.inputs)?;
    let template = docx_file::load_template(&args.template)?;

    let document = match args.view {
        ViewKind::Class => {
            let class_ids = if args.entity.is_empty() {
                state.class_ids()
            } else {
                args.entity.clone()
            };
            render::render_class_batch(&state, &template, &class_ids)?
        }
        ViewKind::Teacher => {
            let teachers = if args.entity.is_empty() {
                state.teacher_names()
            } else {
                args.entity.clone()
            };
            render::render_teacher_batch(&state, &template, &teachers)?
        }
    };

    docx_file::save_document(document, &args.output)?;
    info!(output = %args.output.display(), "document written");
    Ok(())
}

fn execute_preview(args: PreviewArgs) -> Result<()> {
    let state = ingest_state(&args.inputs)?;
    grid_write::write_preview(&args.output, &state)?;
    info!(output = %args.output.display(), "preview workbook written");
    Ok(())
}

fn execute_list(args: ListArgs) -> Result<()> {
    let state = ingest_state(&args.inputs)?;

    if args.json {
        let listing = Listing::from_state(&state);
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    for class_id in state.class_ids() {
        match state.homeroom(&class_id) {
            Some(homeroom) => println!("{class_id}\t導師 {homeroom}"),
            None => println!("{class_id}"),
        }
    }
    for teacher in state.teacher_names() {
        let hours = state.teacher_metrics(&teacher);
        println!(
            "{teacher}\t應授 {} 節\t總計 {} 節\t兼代 {} 節",
            hours.base, hours.total, hours.extra
        );
    }
    Ok(())
}

fn ingest_state(inputs: &InputArgs) -> Result<ScheduleState> {
    for path in [Some(&inputs.assignment), Some(&inputs.timetable), inputs.ordering.as_ref()]
        .into_iter()
        .flatten()
    {
        if !path.exists() {
            return Err(ScheduleError::MissingInput(path.clone()));
        }
    }

    let options = ParseOptions {
        drop_unknown_sentinel: !inputs.keep_unknown_sentinel,
    };
    session::ingest(
        &inputs.assignment,
        &inputs.timetable,
        inputs.ordering.as_deref(),
        &options,
    )
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Reconcile school assignment and timetable tables into schedule documents."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fill a schedule template for selected entities, merged into one file.
    Render(RenderArgs),
    /// Export the reconciled grids as a browsable XLSX workbook.
    Preview(PreviewArgs),
    /// Print the class list and teacher roster with hour metrics.
    List(ListArgs),
}

#[derive(clap::Args)]
struct InputArgs {
    /// Teaching-assignment table (csv or xlsx).
    #[arg(long)]
    assignment: PathBuf,

    /// Weekly timetable table (csv or xlsx).
    #[arg(long)]
    timetable: PathBuf,

    /// Optional teacher ordering/workload table (csv or xlsx).
    #[arg(long)]
    ordering: Option<PathBuf>,

    /// Keep the literal unknown-teacher sentinel as an assignment token
    /// instead of dropping it.
    #[arg(long)]
    keep_unknown_sentinel: bool,
}

#[derive(clap::Args)]
struct RenderArgs {
    #[command(flatten)]
    inputs: InputArgs,

    /// Which schedule view to render.
    #[arg(long, value_enum)]
    view: ViewKind,

    /// DOCX template carrying the view's tokens.
    #[arg(long)]
    template: PathBuf,

    /// Entity to render; repeat for a subset. All entities when omitted.
    #[arg(long)]
    entity: Vec<String>,

    /// Output document path.
    #[arg(long)]
    output: PathBuf,
}

#[derive(clap::Args)]
struct PreviewArgs {
    #[command(flatten)]
    inputs: InputArgs,

    /// Output workbook path.
    #[arg(long)]
    output: PathBuf,
}

#[derive(clap::Args)]
struct ListArgs {
    #[command(flatten)]
    inputs: InputArgs,

    /// Emit the listing as JSON instead of text.
    #[arg(long)]
    json: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ViewKind {
    Class,
    Teacher,
}

#[derive(Serialize)]
struct Listing {
    classes: Vec<ClassListing>,
    teachers: Vec<TeacherListing>,
}

#[derive(Serialize)]
struct ClassListing {
    class_id: String,
    homeroom: Option<String>,
}

#[derive(Serialize)]
struct TeacherListing {
    name: String,
    base: i32,
    total: i32,
    extra: i32,
}

impl Listing {
    fn from_state(state: &ScheduleState) -> Self {
        let classes = state
            .class_ids()
            .into_iter()
            .map(|class_id| {
                let homeroom = state.homeroom(&class_id).map(str::to_string);
                ClassListing { class_id, homeroom }
            })
            .collect();
        let teachers = state
            .teacher_names()
            .into_iter()
            .map(|name| {
                let hours = state.teacher_metrics(&name);
                TeacherListing {
                    name,
                    base: hours.base,
                    total: hours.total,
                    extra: hours.extra,
                }
            })
            .collect();
        Self { classes, teachers }
    }
}
