mod app;
mod cli;

use hbquery::config::Config;

fn main() {
    let cli = cli::parse();

    // Config problems are reported after logging is up
    let loaded = Config::load();
    let config = loaded.as_ref().cloned().unwrap_or_default();

    let level = cli.log_level.unwrap_or_else(|| config.log_level());
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Err(e) = &loaded {
        tracing::warn!("Using default config: {:#}", e);
    }

    app::run(cli.command, &config);
}
