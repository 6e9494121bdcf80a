use clap::{Parser, Subcommand};

use weatherbar_core::{Cache, Config, ProviderId, Summary, fetch, provider};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherbar", version, about = "Weather summary updater for the status bar")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure credentials for a specific provider.
    Configure {
        /// Provider short name, e.g. "openweathermap" or "darkskynet".
        provider: String,
    },

    /// Fetch a forecast and store the raw response in the cache.
    Fetch {
        /// Provider short name; defaults to the configured default provider.
        provider: Option<String>,
    },

    /// Normalize the cached raw forecast into the summary file, offline.
    Summarize {
        /// Provider short name; defaults to the configured default provider.
        provider: Option<String>,
    },

    /// Fetch, cache, and write a fresh summary in one go.
    Update {
        /// Provider short name; defaults to the configured default provider.
        provider: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { provider } => configure(&provider),
            Command::Fetch { provider } => fetch_raw(provider.as_deref()).await,
            Command::Summarize { provider } => summarize(provider.as_deref()),
            Command::Update { provider } => update(provider.as_deref()).await,
        }
    }
}

/// Explicit argument wins; otherwise fall back to the config default.
fn resolve_provider(arg: Option<&str>, config: &Config) -> anyhow::Result<ProviderId> {
    match arg {
        Some(s) => Ok(ProviderId::try_from(s)?),
        None => Ok(config.default_provider_id()?),
    }
}

fn configure(name: &str) -> anyhow::Result<()> {
    let id = ProviderId::try_from(name)?;
    let mut config = Config::load()?;

    let api = inquire::Password::new("API key:")
        .without_confirmation()
        .prompt()?;
    let location = inquire::Text::new("Location:").prompt()?;

    config.upsert_provider(id, api, location);
    config.save()?;

    println!(
        "Saved credentials for {id} to {}",
        Config::config_file_path()?.display()
    );

    Ok(())
}

async fn fetch_raw(arg: Option<&str>) -> anyhow::Result<()> {
    let config = Config::load()?;
    let id = resolve_provider(arg, &config)?;
    let creds = config.credentials(id)?;

    let cache = Cache::open()?;
    let http = fetch::client()?;

    let raw = provider(id).fetch(&http, &creds).await?;
    let path = cache.store_raw(id, &raw)?;

    println!("Stored {id} forecast at {}", path.display());

    Ok(())
}

fn summarize(arg: Option<&str>) -> anyhow::Result<()> {
    let config = Config::load()?;
    let id = resolve_provider(arg, &config)?;

    let cache = Cache::open()?;
    let raw = cache.load_raw(id)?;

    let summary = provider(id).normalize(&raw)?;
    let path = cache.store_summary(&summary)?;

    print_summary(&summary);
    println!("Wrote summary to {}", path.display());

    Ok(())
}

async fn update(arg: Option<&str>) -> anyhow::Result<()> {
    let config = Config::load()?;
    let id = resolve_provider(arg, &config)?;
    let creds = config.credentials(id)?;

    let cache = Cache::open()?;
    let http = fetch::client()?;
    let p = provider(id);

    let raw = p.fetch(&http, &creds).await?;
    cache.store_raw(id, &raw)?;

    let summary = p.normalize(&raw)?;
    let path = cache.store_summary(&summary)?;

    print_summary(&summary);
    println!("Wrote summary to {}", path.display());

    Ok(())
}

fn print_summary(summary: &Summary) {
    let today = &summary.today;
    println!(
        "{}: {} {:.1}°C, humidity {:.0}% ({})",
        today.date,
        today.summary,
        today.temp,
        today.humidity * 100.0,
        today.icon
    );

    for day in &summary.days {
        println!(
            "  {}: {:.1}°C .. {:.1}°C ({})",
            day.date, day.min, day.max, day.icon
        );
    }
}
