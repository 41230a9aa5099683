use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tl_app::{
    AppResult, LogSource, ProcessRequest, ProcessResponse, config_service, log_service, query,
    run_service,
};
use tl_core::Channel;
use tl_series::{Metric, MetricStats};

#[derive(Parser)]
#[command(name = "tl-cli")]
#[command(about = "ThermoLog CLI - calibrate and derive metrics from thermal rig logs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a rig configuration file
    Validate {
        /// Path to the rig YAML or JSON file
        config_path: PathBuf,
    },
    /// Derive metrics for a log and write the computed log
    Process {
        /// Path to the rig YAML or JSON file
        config_path: PathBuf,
        /// Logger CSV (defaults to the newest data_*.csv in --log-dir)
        log_path: Option<PathBuf>,
        /// Directory searched when no log is given
        #[arg(long, default_value = ".")]
        log_dir: PathBuf,
        /// Output CSV file path (defaults to computed_<log name>)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Process rows in parallel
        #[arg(long)]
        parallel: bool,
    },
    /// Print summary statistics for a log
    Summary {
        /// Path to the rig YAML or JSON file
        config_path: PathBuf,
        /// Logger CSV (defaults to the newest data_*.csv in --log-dir)
        log_path: Option<PathBuf>,
        #[arg(long, default_value = ".")]
        log_dir: PathBuf,
    },
    /// Export one derived column as a time series
    ExportSeries {
        /// Path to the rig YAML or JSON file
        config_path: PathBuf,
        /// Logger CSV
        log_path: PathBuf,
        /// Derived column name (e.g., Q_dot, efficiency, delta_p)
        column: String,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show the last rows of a log with derived values
    Tail {
        /// Path to the rig YAML or JSON file
        config_path: PathBuf,
        /// Logger CSV (defaults to the newest data_*.csv in --log-dir)
        log_path: Option<PathBuf>,
        #[arg(long, default_value = ".")]
        log_dir: PathBuf,
        /// Number of rows
        #[arg(short, default_value_t = 10)]
        n: usize,
    },
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Validate { .. } => "validate",
            Commands::Process { .. } => "process",
            Commands::Summary { .. } => "summary",
            Commands::ExportSeries { .. } => "export-series",
            Commands::Tail { .. } => "tail",
        }
    }
}

fn main() -> AppResult<()> {
    // Initialize tracing; stderr keeps exported CSV on stdout clean
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    tracing::info!(command = cli.command.name(), "tl-cli start");

    match cli.command {
        Commands::Validate { config_path } => cmd_validate(&config_path),
        Commands::Process {
            config_path,
            log_path,
            log_dir,
            output,
            parallel,
        } => cmd_process(&config_path, log_path, &log_dir, output, parallel),
        Commands::Summary {
            config_path,
            log_path,
            log_dir,
        } => cmd_summary(&config_path, log_path, &log_dir),
        Commands::ExportSeries {
            config_path,
            log_path,
            column,
            output,
        } => cmd_export_series(&config_path, &log_path, &column, output.as_deref()),
        Commands::Tail {
            config_path,
            log_path,
            log_dir,
            n,
        } => cmd_tail(&config_path, log_path, &log_dir, n),
    }
}

fn resolve_log(log_path: Option<PathBuf>, log_dir: &Path) -> AppResult<PathBuf> {
    match log_path {
        Some(path) => Ok(path),
        None => log_service::latest_log(log_dir),
    }
}

fn load(config_path: &Path, log_path: &Path) -> AppResult<ProcessResponse> {
    run_service::process_log(&ProcessRequest::new(config_path, LogSource::File(log_path)))
}

fn cmd_validate(config_path: &Path) -> AppResult<()> {
    println!("Validating rig configuration: {}", config_path.display());
    let (config, profile) = config_service::load_profile(config_path)?;
    let summary = config_service::summarize_config(&config, &profile);

    println!("✓ Configuration is valid");
    println!("  Name: {}", summary.name);
    println!("  Version: {}", summary.version);
    println!(
        "  ADC full scale: thermistor {}, pressure {}",
        summary.thermistor_adc_max, summary.pressure_adc_max
    );
    println!("  Pressure unit: {}", summary.pressure_unit);
    println!("  Mass flow: {:.6} kg/s", summary.mass_flow_kg_s);
    println!("  Power taps: {}", yes_no(summary.power_taps));
    println!("  Fixed heater supply: {}", yes_no(summary.heater_supply));
    println!("  Heat flux: {}", yes_no(summary.heat_flux));
    Ok(())
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

fn cmd_process(
    config_path: &Path,
    log_path: Option<PathBuf>,
    log_dir: &Path,
    output: Option<PathBuf>,
    parallel: bool,
) -> AppResult<()> {
    let log_path = resolve_log(log_path, log_dir)?;
    let output = output.unwrap_or_else(|| log_service::computed_path(&log_path));
    println!("Processing {}", log_path.display());

    let mut request = ProcessRequest::new(config_path, LogSource::File(&log_path));
    request.output_path = Some(output);
    request.parallel = parallel;
    let response = run_service::process_log(&request)?;

    print_rejected(&response);
    if let Some(out) = &response.output_path {
        println!(
            "✓ Wrote {} rows to {}",
            response.records.len(),
            out.display()
        );
    }
    print_headline(&response);

    let t = &response.timing;
    println!("\nTiming:");
    println!("  Load:    {:.3} s", t.load_s);
    println!("  Process: {:.3} s", t.process_s);
    println!("  Write:   {:.3} s", t.write_s);
    println!("  Total:   {:.3} s", t.total_s);
    Ok(())
}

fn cmd_summary(config_path: &Path, log_path: Option<PathBuf>, log_dir: &Path) -> AppResult<()> {
    let log_path = resolve_log(log_path, log_dir)?;
    let response = load(config_path, &log_path)?;

    println!("Rig: {}", response.config_name);
    println!("Log: {}", response.log_path.display());
    println!(
        "Rows: {} read, {} processed",
        response.rows_read,
        response.records.len()
    );
    print_rejected(&response);

    println!("\n{:<20} {:>6} {:>14} {:>14} {:>14}", "column", "count", "mean", "min", "max");
    for (metric, stats) in response.summary.populated() {
        println!(
            "{:<20} {:>6} {:>14} {:>14} {:>14}",
            metric.column(),
            stats.count,
            fmt_opt(stats.mean),
            fmt_opt(stats.min),
            fmt_opt(stats.max)
        );
    }
    Ok(())
}

fn cmd_export_series(
    config_path: &Path,
    log_path: &Path,
    column: &str,
    output: Option<&Path>,
) -> AppResult<()> {
    let response = load(config_path, log_path)?;
    let series = query::extract_series(&response.records, column)?;

    if let Some(path) = output {
        log_service::write_series(std::fs::File::create(path)?, column, &series)?;
        println!(
            "✓ Exported {} data points to {}",
            series.len(),
            path.display()
        );
    } else {
        log_service::write_series(std::io::stdout().lock(), column, &series)?;
    }

    Ok(())
}

fn cmd_tail(config_path: &Path, log_path: Option<PathBuf>, log_dir: &Path, n: usize) -> AppResult<()> {
    let log_path = resolve_log(log_path, log_dir)?;
    let response = load(config_path, &log_path)?;

    let columns = [
        Metric::for_channel(Channel::FluidIn),
        Metric::for_channel(Channel::FluidOut),
        Metric::DeltaP,
        Metric::QDot,
        Metric::HeaterPower,
        Metric::Efficiency,
    ];

    print!("{:<26}", "time");
    for m in columns {
        print!(" {:>14}", m.column());
    }
    println!();
    for record in query::tail(&response.records, n) {
        print!("{:<26}", record.sample().time.to_string());
        for m in columns {
            print!(" {:>14}", fmt_opt(record.get(m)));
        }
        println!();
    }
    Ok(())
}

fn print_rejected(response: &ProcessResponse) {
    if response.rejected.is_empty() {
        return;
    }
    println!("⚠ {} rows rejected:", response.rejected.len());
    for row in &response.rejected {
        println!("  line {}: {}", row.line, row.message);
    }
}

fn print_headline(response: &ProcessResponse) {
    println!("\nSummary ({} rows):", response.summary.rows);
    for (metric, stats) in query::headline(&response.summary) {
        print_stats(metric, &stats);
    }
}

fn print_stats(metric: Metric, stats: &MetricStats) {
    println!(
        "  {:<18} avg {:>12}  max {:>12}  ({} values)",
        metric.column(),
        fmt_opt(stats.mean),
        fmt_opt(stats.max),
        stats.count
    );
}

fn fmt_opt(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.4}", v),
        None => "-".to_string(),
    }
}
