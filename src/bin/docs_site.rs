use std::path::PathBuf;
use std::process::ExitCode;

use client_reporter::config::SiteConfig;
use client_reporter::{export_docs_site, init_logging, run_docs_site};
use tracing::{error, info};

const USAGE: &str = "usage: docs-site [serve | export <out-dir>]";

#[tokio::main]
async fn main() -> ExitCode {
    let config = SiteConfig::from_env();
    let _guard = init_logging(&config.log_dir, "docs-site.log");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let result = match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        [] | ["serve"] => run_docs_site(config).await,
        ["export", out_dir] => export_docs_site(&config, &PathBuf::from(out_dir)).map(|count| {
            info!("Wrote {} pages to {}", count, out_dir);
        }),
        _ => {
            eprintln!("{}", USAGE);
            return ExitCode::from(2);
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("docs-site failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
