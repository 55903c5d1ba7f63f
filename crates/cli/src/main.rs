use anyhow::Context;
use clap::{Parser, Subcommand};
use stockdash_core::client::http::HttpStockApi;
use stockdash_core::client::StockApi;
use stockdash_core::config::Settings;
use stockdash_core::store::StockStore;
use stockdash_core::view::{SortKey, StockQuery, StockRow, DEFAULT_PAGE_SIZE};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod render;

#[derive(Debug, Parser)]
#[command(name = "stockdash", about = "Analyst rating changes and buy recommendations")]
struct Args {
    /// Stock API base URL. Overrides STOCK_API_URL.
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Print JSON instead of tables.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List rating changes as a searchable, sortable table.
    Stocks {
        /// Filter on ticker, company or brokerage (case-insensitive).
        #[arg(long)]
        search: Option<String>,

        /// ticker, company, brokerage, time, target-change or rating-change.
        #[arg(long)]
        sort: Option<SortKey>,

        #[arg(long)]
        desc: bool,

        #[arg(long, default_value_t = 1)]
        page: usize,

        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: usize,
    },

    /// Show one stock by ticker.
    Show { ticker: String },

    /// List server-scored recommendations.
    Recommendations {
        /// As-of date (YYYY-MM-DD). Defaults to the latest data.
        #[arg(long)]
        date: Option<String>,
    },

    /// Ask the backend to re-ingest ratings, then reload them.
    Sync,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let settings = Settings::from_env()?.with_api_url(args.api_url.clone());
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let api = HttpStockApi::from_settings(&settings)?;
    let store = StockStore::new(api);

    let result = run(&store, &args).await;
    if let Err(err) = &result {
        sentry_anyhow::capture_anyhow(err);
    }
    result
}

async fn run<A: StockApi>(store: &StockStore<A>, args: &Args) -> anyhow::Result<()> {
    match &args.command {
        Command::Stocks {
            search,
            sort,
            desc,
            page,
            page_size,
        } => {
            let stocks = store.fetch_stocks().await;
            ensure_no_error(store).await?;
            let stocks = stocks.unwrap_or_default();

            let query = StockQuery {
                search: search.clone(),
                sort: *sort,
                descending: *desc,
                page: *page,
                page_size: *page_size,
            };
            let page = query.apply(&stocks);

            if args.json {
                let rows: Vec<StockRow> = page.items.iter().map(|s| StockRow::from(*s)).collect();
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                print!("{}", render::stocks_table(&page));
            }
        }
        Command::Show { ticker } => {
            let stock = store.fetch_stock_by_ticker(ticker).await;
            ensure_no_error(store).await?;
            let stock = stock.with_context(|| format!("no stock returned for {ticker}"))?;

            if args.json {
                println!("{}", serde_json::to_string_pretty(&stock)?);
            } else {
                print!("{}", render::stock_card(&stock));
            }
        }
        Command::Recommendations { date } => {
            if let Some(date) = date.as_deref() {
                chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d")
                    .with_context(|| format!("--date must be YYYY-MM-DD (got {date})"))?;
            }

            let recommendations = store.fetch_recommendations(date.as_deref()).await;
            ensure_no_error(store).await?;

            if args.json {
                println!("{}", serde_json::to_string_pretty(&recommendations)?);
            } else {
                print!("{}", render::recommendations_table(&recommendations));
            }
        }
        Command::Sync => {
            let synced = store.sync_stocks().await;
            ensure_no_error(store).await?;
            anyhow::ensure!(synced, "sync did not complete");

            let snapshot = store.snapshot().await;
            tracing::info!(count = snapshot.stocks.len(), "sync complete");
            println!("Synced. {} stocks loaded.", snapshot.stocks.len());
        }
    }
    Ok(())
}

async fn ensure_no_error<A: StockApi>(store: &StockStore<A>) -> anyhow::Result<()> {
    match store.error().await {
        Some(message) => anyhow::bail!("{message} (api: {})", store.api().base_url()),
        None => Ok(()),
    }
}

fn init_sentry(settings: &Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
