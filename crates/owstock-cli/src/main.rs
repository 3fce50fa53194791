mod check;
mod prompt;

use std::num::NonZeroUsize;
use std::sync::Arc;

use clap::builder::{PossibleValuesParser, TypedValueParser};
use clap::Parser;
use owstock_client::{FileCache, OfficeworksClient, ResponseCache};
use owstock_core::{ProductQuery, Region, RegionFilter};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "owstock", version)]
#[command(about = "Check Officeworks in-store stock for a product code, store by store")]
struct Cli {
    /// State to check (case-insensitive)
    #[arg(long, default_value = "all", ignore_case = true, value_parser = state_parser())]
    state: RegionFilter,

    /// Product to search for (prompted when omitted)
    #[arg(long)]
    productid: Option<String>,

    /// Skip lookup, useful for items delisted
    #[arg(long, overrides_with = "no_skiplookup")]
    skiplookup: bool,

    /// Look the product up before checking stores (default)
    #[arg(long = "no-skiplookup", overrides_with = "skiplookup")]
    no_skiplookup: bool,

    /// Maximum number of store availability requests in flight
    #[arg(long)]
    concurrency: Option<NonZeroUsize>,
}

fn state_parser() -> impl TypedValueParser<Value = RegionFilter> {
    let choices: Vec<&'static str> = Region::ALL
        .into_iter()
        .map(Region::code)
        .chain(["all"])
        .collect();
    PossibleValuesParser::new(choices).try_map(|state| state.parse::<RegionFilter>())
}

impl Cli {
    fn skip_lookup(&self) -> bool {
        self.skiplookup && !self.no_skiplookup
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = owstock_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let product_code = match cli.productid.clone() {
        Some(code) => code,
        None => prompt::prompt_product_id(&mut std::io::stdin().lock(), &mut std::io::stdout())?,
    };

    let query = ProductQuery {
        product_code,
        region: cli.state,
        skip_lookup: cli.skip_lookup(),
    };

    let cache: Arc<dyn ResponseCache> =
        Arc::new(FileCache::new(&config.cache_dir, config.cache_ttl_days));
    let client = OfficeworksClient::from_config(&config, cache)
        .map_err(|e| anyhow::anyhow!("failed to build Officeworks client: {e}"))?;

    let concurrency = cli
        .concurrency
        .map_or(config.max_concurrent_probes, NonZeroUsize::get);

    let mut stdout = std::io::stdout().lock();
    let outcome = check::run_check(&client, &query, concurrency, &mut stdout).await?;
    tracing::debug!(?outcome, "run finished");

    Ok(())
}
