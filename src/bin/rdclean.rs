use std::io::Write;
use std::path::PathBuf;
use chrono::Local;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn, LevelFilter};
use rdclean::{
    Clusterer,
    Normalizer,
    RawIndex,
    RdCleanConfig,
    Result,
    matcher::{Assignment, CloseCall, GroupingObserver},
    utils::{load_rows, write_clusters_file, write_report_file, ReviewLogger, RunReport},
};

/// Group vendor records whose normalized names are similar.
#[derive(Debug, Parser)]
#[command(name = "rdclean", version)]
struct Args {
    /// INI file to read settings from; built-in defaults otherwise
    config: Option<PathBuf>,

    /// Input CSV file
    #[arg(long)]
    input: Option<PathBuf>,

    /// Directory for clusters, summary and close-call files
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Similarity threshold, strictly between 0 and 1
    #[arg(long)]
    threshold: Option<f64>,

    /// Similarity mode: name or full_record
    #[arg(long)]
    mode: Option<String>,

    /// Width of the close-call band on each side of the threshold
    #[arg(long)]
    tolerance: Option<f64>,

    /// Print the first N indexed records before grouping
    #[arg(long, num_args = 0..=1, default_missing_value = "5")]
    inspect: Option<usize>,

    /// Log level: error, warn, info, debug, trace or none
    #[arg(long)]
    log_level: Option<String>,
}

impl Args {
    /// Loads the INI file (if any) and layers command-line values on top.
    fn into_config(self) -> Result<RdCleanConfig> {
        let mut config = match &self.config {
            Some(path) => RdCleanConfig::from_ini(path)?,
            None => RdCleanConfig::default(),
        };

        if let Some(input) = self.input {
            config.files.input_file = input;
        }
        if let Some(output_dir) = self.output_dir {
            config.files.output_dir = output_dir;
        }
        if let Some(threshold) = self.threshold {
            config.matcher.threshold = threshold;
        }
        if let Some(mode) = self.mode {
            config.matcher.mode = mode.parse()?;
        }
        if let Some(tolerance) = self.tolerance {
            config.matcher.tolerance = tolerance;
        }
        if let Some(level) = self.log_level {
            config.logging.level = level;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Ticks the progress bar and forwards close calls to the review log.
struct RunObserver {
    progress: ProgressBar,
    review: ReviewLogger,
    clusters: usize,
}

impl GroupingObserver for RunObserver {
    fn on_close_call(&mut self, event: &CloseCall) {
        debug!("{}", event);
        self.review.on_close_call(event);
    }

    fn on_key_assigned(&mut self, _key: &str, assignment: Assignment<'_>) {
        if assignment == Assignment::NewCluster {
            self.clusters += 1;
            self.progress.set_message(format!("{} clusters", self.clusters));
        }
        self.progress.inc(1);
    }
}

fn init_logging(config: &RdCleanConfig) -> Result<()> {
    let level: LevelFilter = config.logging.get_log_level();
    let mut builder = env_logger::Builder::new();
    builder
        .format(|buf, record| {
            writeln!(buf,
                "{} [{}] - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter(None, level);

    if let Some(dir) = &config.logging.log_dir {
        std::fs::create_dir_all(dir)?;
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join(format!("rdclean_{}.log", timestamp)))?;
        builder.target(env_logger::Target::Pipe(Box::new(log_file)));
    }

    builder.init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let inspect = args.inspect;
    let config = args.into_config()?;
    init_logging(&config)?;

    info!("Starting rdclean with log level: {:?}", config.logging.get_log_level());

    let normalizer = Normalizer::from_config(&config.normalizer)?;
    info!("Normalization: {}", config.normalizer.describe());

    let rows = load_rows(&config.files.input_file, &config.input)?;
    let raw = RawIndex::from_rows(rows, &config.input.layout, &normalizer)?;
    if raw.is_empty() {
        warn!("No records found in {:?}", config.files.input_file);
    }

    if let Some(n) = inspect {
        for (key, attributes) in raw.head(n) {
            println!("{} {:?}", key, attributes);
        }
        println!();
    }

    let clusterer = Clusterer::from_config(raw, &config)?;
    println!("{}", clusterer);

    config.files.ensure_output_dir()?;
    let progress = ProgressBar::new(clusterer.raw_index().len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut observer = RunObserver {
        progress,
        review: ReviewLogger::with_file(config.files.close_calls_path())?,
        clusters: 0,
    };

    println!("\n======== Cleaning Starts! =========");
    let clusters = clusterer.group_with_observer(&mut observer)?;
    observer.progress.finish_with_message(format!("{} clusters", clusters.len()));
    observer.review.flush()?;

    let summary = clusterer.summarize(&clusters);
    if summary.total_rows != clusters.total_count() {
        debug!(
            "Cluster counts cover {} of {} rows (count policy {})",
            clusters.total_count(),
            summary.total_rows,
            config.matcher.count_policy.as_str()
        );
    }

    write_clusters_file(config.files.clusters_path(), &clusters)?;
    let report = RunReport::new(summary, &clusters, observer.review.entries());
    write_report_file(config.files.summary_path(), &report)?;

    println!("{}", report.summary);
    println!("close calls for review: {} ({:?})", report.close_calls, config.files.close_calls_path());
    Ok(())
}
