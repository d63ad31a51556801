use anyhow::Result;
use jailscrape::{config::ScrapeConfig, fetch, scrape};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();
    info!("startup");

    let cfg = ScrapeConfig::from_env()?;
    info!(
        url = %cfg.base_url,
        start = cfg.start,
        count = cfg.count,
        step = cfg.step,
        out_dir = %cfg.out_dir.display(),
        "configured"
    );

    let client = fetch::build_client()?;
    scrape::run(&cfg, &client)?;

    info!("all done");
    Ok(())
}
