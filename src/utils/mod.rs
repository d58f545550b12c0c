pub mod loader;
pub mod logger;
pub mod report;

pub use self::loader::{load_rows, read_rows};
pub use self::logger::ReviewLogger;
pub use self::report::{RunReport, write_clusters, write_clusters_file, write_report_file};
