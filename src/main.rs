use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let args = toggl_dinero::args::parse();
    let log_level = toggl_dinero::logging::level_for_verbosity(args.verbose);
    toggl_dinero::logging::init(log_level);
    toggl_dinero::cli::main(args, log_level).await
}
