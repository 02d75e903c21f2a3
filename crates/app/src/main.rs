use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{
    AppServices, Clock, DashboardService, DashboardSummary, DayPlan, PlannerConfig,
    PlannerService,
};
use study_core::model::StudyState;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

const DEFAULT_DATA_PATH: &str = "exam_data.json";
const DEFAULT_EXAM_DATE: (i32, u32, u32) = (2025, 5, 1);

/// Subjects created on first launch, when the data file has none.
const DEFAULT_SUBJECTS: [&str; 6] = [
    "Financial Reporting",
    "Advanced Financial Management",
    "Advanced Auditing, Assurance, and Professional Ethics",
    "Direct Tax Law & Tax and International Taxation",
    "Indirect Tax & Laws",
    "Integrated Business Solutions",
];

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidExamDate { raw: String },
    InvalidDataPath { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidExamDate { raw } => {
                write!(f, "invalid --exam-date value: {raw} (expected YYYY-MM-DD)")
            }
            ArgsError::InvalidDataPath { raw } => write!(f, "invalid --data value: {raw:?}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui      [--data <path>] [--exam-date <YYYY-MM-DD>]");
    eprintln!("  cargo run -p app -- summary [--data <path>] [--exam-date <YYYY-MM-DD>] [--json]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --data {DEFAULT_DATA_PATH}");
    eprintln!("  --exam-date 2025-05-01");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  STUDY_DATA_PATH, STUDY_EXAM_DATE, STUDY_LOG (tracing filter, default info)");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Summary,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "summary" => Some(Self::Summary),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Args {
    data_path: PathBuf,
    exam_date: NaiveDate,
    json: bool,
}

impl Args {
    /// Flags win over environment values, which win over defaults.
    fn parse(
        command: Command,
        args: &mut impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut data_path = env("STUDY_DATA_PATH")
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_PATH), PathBuf::from);
        let mut exam_date = match env("STUDY_EXAM_DATE") {
            Some(raw) => parse_exam_date(raw)?,
            None => default_exam_date(),
        };
        let mut json = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--data" => {
                    let value = require_value(args, "--data")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDataPath { raw: value });
                    }
                    data_path = PathBuf::from(value);
                }
                "--exam-date" => {
                    exam_date = parse_exam_date(require_value(args, "--exam-date")?)?;
                }
                "--json" if command == Command::Summary => json = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            data_path,
            exam_date,
            json,
        })
    }

    fn planner_config(&self) -> PlannerConfig {
        PlannerConfig {
            data_path: self.data_path.clone(),
            exam_date: self.exam_date,
            default_subjects: DEFAULT_SUBJECTS.iter().map(|s| (*s).to_owned()).collect(),
        }
    }
}

fn parse_exam_date(raw: String) -> Result<NaiveDate, ArgsError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| ArgsError::InvalidExamDate { raw })
}

fn default_exam_date() -> NaiveDate {
    let (year, month, day) = DEFAULT_EXAM_DATE;
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

fn init_tracing() {
    let filter = std::env::var("STUDY_LOG").unwrap_or_else(|_| "info".to_owned());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&filter).unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
}

struct DesktopApp {
    planner: Arc<PlannerService>,
    dashboard: DashboardService,
    initial_state: StudyState,
}

impl UiApp for DesktopApp {
    fn planner(&self) -> Arc<PlannerService> {
        Arc::clone(&self.planner)
    }

    fn dashboard(&self) -> DashboardService {
        self.dashboard
    }

    fn initial_state(&self) -> StudyState {
        self.initial_state.clone()
    }
}

fn render_summary(summary: &DashboardSummary, plan: &DayPlan) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Time Left Until Exams: {} days ({})\n",
        summary.days_left, summary.exam_date
    ));
    match summary.overall_progress {
        Some(progress) => out.push_str(&format!(
            "Overall Progress: {progress:.2}% ({}/{} subtopics)\n",
            summary.completed_subtopics, summary.total_subtopics
        )),
        None => out.push_str("No topics added yet.\n"),
    }
    out.push('\n');
    for row in &summary.subjects {
        out.push_str(&format!(
            "{:>7.2}%  {}  [{}/{} topics]",
            row.progress, row.name, row.complete_topics, row.topics
        ));
        if let Some(due) = row.due_date {
            out.push_str(&format!("  due {due}"));
        }
        out.push('\n');
    }
    out.push('\n');
    if plan.is_empty() {
        out.push_str(&format!("No schedule for {} yet.\n", plan.date));
    } else {
        out.push_str(&format!("Schedule for {}:\n", plan.date));
        for (subject, hours) in &plan.allocations {
            out.push_str(&format!("- {subject}: {hours} hours\n"));
        }
    }
    out
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // No subcommand launches the UI.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(cmd, &mut iter, |key| std::env::var(key).ok()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    init_tracing();
    tracing::info!(
        data = %parsed.data_path.display(),
        exam_date = %parsed.exam_date,
        "starting study planner"
    );

    let clock = Clock::default_clock();
    let services = AppServices::new_json_file(&parsed.planner_config(), clock).await?;
    if services.seeded() {
        tracing::info!(count = DEFAULT_SUBJECTS.len(), "seeded default subjects");
    }

    match cmd {
        Command::Ui => {
            let app = DesktopApp {
                planner: services.planner(),
                dashboard: services.dashboard(),
                initial_state: services.initial_state().clone(),
            };
            let app: Arc<dyn UiApp> = Arc::new(app);
            let context = build_app_context(&app);

            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Study Planner")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Summary => {
            let dashboard = services.dashboard();
            let state = services.initial_state();
            let summary = dashboard.summary(state);
            let plan = dashboard.day_plan(state, dashboard.today());
            if parsed.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", render_summary(&summary, &plan));
            }
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
