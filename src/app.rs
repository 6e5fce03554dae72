use crate::cli::Commands;
use anyhow::{Context, Result};
use hbquery::config::Config;
use hbquery::engine::{self, EncodingOptions, PresetApplier, QueryBuilder, QueryMode, TitleOption};
use std::fs;
use std::path::Path;
use std::process;

pub fn run(command: Commands, config: &Config) {
    let result = match command {
        Commands::Encode {
            settings,
            preview,
            json,
            auto_name,
        } => handle_encode(config, &settings, preview, json, auto_name),
        Commands::Preset {
            query,
            base,
            titles,
        } => handle_preset(&query, base.as_deref(), &titles),
        Commands::LongestTitle { titles } => handle_longest_title(&titles),
        Commands::Chapters { start, finish } => {
            handle_chapters(start, finish);
            Ok(())
        }
        Commands::InitConfig => {
            handle_init_config();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn load_settings(path: &Path) -> Result<EncodingOptions> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
    toml::from_str(&contents)
        .with_context(|| format!("Failed to parse settings file: {}", path.display()))
}

fn handle_encode(
    config: &Config,
    settings: &Path,
    preview: bool,
    json: bool,
    auto_name: bool,
) -> Result<()> {
    let mut options = load_settings(settings)?;

    if auto_name || config.defaults.auto_name {
        if let Some(dest) = engine::auto_destination(&options, &config.defaults.destination_dir) {
            tracing::info!("Auto-named destination: {}", dest);
            options.destination.path = dest;
        }
    }

    let mode = if preview {
        QueryMode::Preview
    } else {
        QueryMode::Full
    };
    let encoded = QueryBuilder::new(config.temp_dir()).build(&options, mode);

    if json {
        let out =
            serde_json::to_string_pretty(&encoded).context("Failed to serialize query as JSON")?;
        println!("{}", out);
    } else {
        for warning in &encoded.warnings {
            eprintln!("Warning: {}", warning);
        }
        println!("{}", encoded.query);
    }
    Ok(())
}

fn handle_preset(query: &str, base: Option<&Path>, titles: &[String]) -> Result<()> {
    let parsed = engine::parse_query(query).context("Failed to read query")?;

    let titles = titles
        .iter()
        .map(|label| label.parse::<TitleOption>())
        .collect::<Result<Vec<_>, _>>()
        .context("Invalid --title")?;

    let applier = PresetApplier::new().with_titles(titles);
    let options = match base {
        Some(path) => applier.apply_onto(load_settings(path)?, &parsed),
        None => applier.apply(&parsed),
    };

    let out = toml::to_string_pretty(&options).context("Failed to serialize settings")?;
    print!("{}", out);
    Ok(())
}

fn handle_longest_title(labels: &[String]) -> Result<()> {
    let titles = labels
        .iter()
        .map(|label| label.parse::<TitleOption>())
        .collect::<Result<Vec<_>, _>>()
        .context("Invalid title label")?;

    match engine::select_longest_title(&titles) {
        Some(title) => println!("{}", title),
        None => println!("Automatic"),
    }
    Ok(())
}

fn handle_chapters(start: u32, finish: u32) {
    let names = engine::default_chapter_names(Some(start), Some(finish));
    print!("{}", engine::chapter_csv(&names));
}

fn handle_init_config() {
    match Config::load() {
        Ok(cfg) => {
            match Config::config_path() {
                Ok(path) => println!("Config loaded successfully from {}", path.display()),
                Err(e) => println!("Config loaded, but config path unknown: {:#}", e),
            }
            println!("{:#?}", cfg);
        }
        Err(e) => {
            println!("Config missing or invalid: {:#}", e);
            println!("Creating default config...");

            let cfg = Config::default();
            if let Err(err) = cfg.save() {
                eprintln!("Failed to save default config: {:#}", err);
                process::exit(1);
            } else {
                match Config::config_path() {
                    Ok(path) => println!("Default config saved to {}", path.display()),
                    Err(e) => println!("Default config saved (path unknown): {:#}", e),
                }
            }
        }
    }
}
