use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

use xhsnote::app::AppContext;
use xhsnote::cli::{commands, Cli};
use xhsnote::config::Settings;
use xhsnote::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::resolve(&cli)
        .unwrap_or_else(|e| Cli::command().error(ErrorKind::InvalidValue, e).exit());

    let _log_guard = logging::init(settings.log_level, &settings.log_dir, settings.save_log)?;

    let urls = commands::collect_input_urls(&cli.urls, settings.input_file.as_deref())
        .unwrap_or_else(|e| Cli::command().error(ErrorKind::Io, e).exit());
    if urls.is_empty() {
        Cli::command()
            .error(
                ErrorKind::MissingRequiredArgument,
                "provide at least one URL or an --input-file",
            )
            .exit();
    }

    let ctx = AppContext::new(&settings)?;
    let summary = commands::run_batch(&ctx, &urls, &settings.output_dir).await;

    if !summary.is_success() {
        anyhow::bail!(
            "{} of {} URL(s) failed to parse",
            summary.failures.len(),
            summary.total()
        );
    }

    Ok(())
}
