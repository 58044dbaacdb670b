use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use montecarlo::api::{
    report_template, run_experiments, sample_scatter, summarize, write_report_to, AggregateStats,
    ChartSink, ConvergenceChart, ReportError, RunConfig, SheetLayout, UniformTrials, Workbook,
    WrittenReport, DEFAULT_SHEET_NAME,
};
use montecarlo::cfg::DEFAULT_SAMPLE_SIZES;
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;
mod sinks;

use provenance::{write_sidecar, Payload};
use sinks::{export_results, load_workbook, save_workbook, JsonChartSink};

#[derive(Parser)]
#[command(name = "montecarlo")]
#[command(about = "Circle/rectangle Monte Carlo experiment runner")]
struct Cmd {
    /// Log per-experiment detail
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Run experiments; optionally update a workbook and write chart/table artifacts
    Run(RunArgs),
    /// Create a workbook with a blank report sheet
    InitWorkbook {
        #[arg(long)]
        path: PathBuf,
        #[arg(long, default_value = DEFAULT_SHEET_NAME)]
        sheet: String,
        #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_SAMPLE_SIZES.to_vec())]
        sizes: Vec<u64>,
    },
    /// Print a small provenance JSON block
    Report,
}

#[derive(Args, Clone, Debug)]
struct RunArgs {
    /// Experiments per sample size
    #[arg(long)]
    experiments: u32,
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_SAMPLE_SIZES.to_vec())]
    sizes: Vec<u64>,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Write the convergence chart artifact here
    #[arg(long)]
    chart: Option<PathBuf>,
    /// Workbook (JSON) whose report sheet gets replaced
    #[arg(long)]
    workbook: Option<PathBuf>,
    #[arg(long, default_value = DEFAULT_SHEET_NAME)]
    sheet: String,
    /// Also draw this many marbles for the scatter illustration
    #[arg(long)]
    marbles: Option<usize>,
    #[arg(long, default_value = "data/marble_drop.json")]
    marbles_out: PathBuf,
    /// Export per-experiment rows (.csv or .parquet)
    #[arg(long)]
    table: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct RunSummary {
    means: Vec<AggregateStats>,
    /// `None` when no workbook was requested or its sheet was missing.
    report: Option<ReportSummary>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct ReportSummary {
    sheet: String,
    experiments: u32,
    rounds: u32,
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .init();
    match cmd.action {
        Action::Run(args) => {
            let summary = run(args)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
            Ok(())
        }
        Action::InitWorkbook { path, sheet, sizes } => init_workbook(path, sheet, sizes),
        Action::Report => report(),
    }
}

fn run(args: RunArgs) -> Result<RunSummary> {
    let cfg = RunConfig {
        sample_sizes: args.sizes.clone(),
        experiments: args.experiments,
        seed: args.seed,
    };
    tracing::info!(
        experiments = cfg.experiments,
        sizes = ?cfg.sample_sizes,
        seed = cfg.seed,
        "run"
    );
    // Reject bad input before touching the generator or any file.
    let sizes = cfg.validate()?;
    let params = serde_json::to_value(&cfg)?;
    let mut charts = JsonChartSink {
        convergence_out: args.chart.clone(),
        scatter_out: args.marbles.map(|_| args.marbles_out.clone()),
        params: params.clone(),
    };

    let mut source = UniformTrials::seeded(cfg.seed);
    if let Some(count) = args.marbles {
        let scatter = sample_scatter(count, source.rng_mut())?;
        charts.render_scatter(&scatter)?;
    }

    let results = run_experiments(&sizes, cfg.experiments, &mut source)?;
    let means = summarize(&results)?;
    for s in &means {
        tracing::info!(
            n = s.sample_size.get(),
            mean = s.mean,
            abs_error = s.abs_error(),
            "statistical summary"
        );
    }
    charts.render_convergence(&ConvergenceChart::from_stats(&means))?;

    if let Some(table) = &args.table {
        export_results(table, &results)?;
        write_sidecar(table, Payload::new(params.clone()))?;
    }

    let mut report = None;
    if let Some(path) = &args.workbook {
        let mut book = load_workbook(path)?;
        match write_report_to(&mut book, &args.sheet, &SheetLayout::default(), &results) {
            Ok(WrittenReport {
                experiments,
                rounds,
                ..
            }) => {
                save_workbook(path, &book)?;
                write_sidecar(path, Payload::new(params).with_input(path))?;
                tracing::info!(
                    sheet = %args.sheet,
                    path = %path.display(),
                    "report sheet replaced"
                );
                report = Some(ReportSummary {
                    sheet: args.sheet.clone(),
                    experiments,
                    rounds,
                });
            }
            Err(err @ ReportError::SheetNotFound { .. }) => {
                tracing::warn!(%err, path = %path.display(), "skipping workbook update");
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(RunSummary { means, report })
}

fn init_workbook(path: PathBuf, sheet: String, sizes: Vec<u64>) -> Result<()> {
    tracing::info!(path = %path.display(), sheet, "init-workbook");
    let mut book = if path.exists() {
        load_workbook(&path)?
    } else {
        Workbook::new()
    };
    book.insert_sheet(
        sheet.clone(),
        report_template(&SheetLayout::default(), &sheet, &sizes),
    );
    save_workbook(&path, &book)?;
    write_sidecar(&path, Payload::new(serde_json::json!({ "sheet": sheet, "sizes": sizes })))?;
    Ok(())
}

fn report() -> Result<()> {
    let obj = serde_json::json!({
        "code_rev": provenance::current_git_rev(),
        "tool_version": montecarlo::VERSION,
        "default_sizes": DEFAULT_SAMPLE_SIZES,
        "sheet": DEFAULT_SHEET_NAME,
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
