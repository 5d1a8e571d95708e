mod platform;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use platform::logging::LogDestination;
use platform::AppConfig;
use summary_engine::SubmitSettings;

#[derive(Parser, Debug)]
#[command(
    name = "summary_app",
    about = "Stage documents and request executive summaries from the summary service"
)]
struct Cli {
    /// Origin of the summary service.
    #[arg(long, env = "SUMMARY_SERVER_URL", default_value = "http://localhost:8000")]
    server: String,

    /// Directory downloaded summaries are saved into.
    #[arg(long, env = "SUMMARY_OUTPUT_DIR", default_value = "output")]
    output_dir: PathBuf,

    /// Give up on a submission after this many seconds (default: wait forever).
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Where log records go.
    #[arg(long, value_enum, default_value_t = LogDestination::File)]
    log: LogDestination,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    platform::logging::initialize(cli.log);

    let settings = SubmitSettings {
        base_url: cli.server,
        request_timeout: cli.timeout_secs.map(Duration::from_secs),
        ..SubmitSettings::default()
    };
    platform::run_app(AppConfig {
        settings,
        output_dir: cli.output_dir,
    })
}
