use agent::FaultResponder;
use alloy_primitives::Address;
use challenger::{
    check_game,
    config::Config,
    metrics::{install_prometheus_exporter, Metrics},
    run_cycle, CycleOptions,
};
use clap::{Parser, Subcommand};
use game::{FactoryContract, GameLoader, GameStatusContract, LoaderError};
use tokio::time;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "challenger")]
#[command(about = "Monitor dispute games and resolve the ones whose outcome the operator disputes")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Private key for signing resolve transactions (hex string, with or without 0x prefix)
    #[arg(short = 'k', long, env = "PRIVATE_KEY", hide_env_values = true)]
    private_key: Option<String>,

    /// Dry-run mode: log decisions without executing transactions
    #[arg(long)]
    dry_run: bool,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Poll the factory and resolve games until interrupted
    Run,

    /// Print every game known to the factory
    ListGames,

    /// Print whether one game should be resolved; an unreadable status prints false
    Check {
        /// Address of the game proxy
        game: Address,
    },
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let mut config = Config::from_file(&cli.config)?;
    // CLI flag wins over the config file
    if cli.dry_run {
        config.dry_run = true;
    }

    let network = config.network_config();

    info!("Loaded config:");
    info!("  Network: {:?}", config.network);
    info!("  DisputeGameFactory: {}", network.l2.dispute_game_factory);
    info!(
        "  Agree with proposed output: {}",
        config.agree_with_proposed_output
    );
    if config.dry_run {
        info!("  Mode: DRY-RUN (no transactions will be executed)");
    }

    let provider = client::create_provider(&config.l1_rpc_url)?;
    let loader = GameLoader::new(FactoryContract::new(
        provider.clone(),
        network.l2.dispute_game_factory,
    ));
    let fetcher = GameStatusContract::new(provider.clone());

    let cancel = CancellationToken::new();
    let shutdown = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received");
        }
        shutdown.cancel();
    });

    match cli.command {
        Command::ListGames => {
            let games = loader.fetch_all_games(&cancel).await?;
            for (index, game) in games.iter().enumerate() {
                println!("{index}\t{}\t{}", game.proxy, game.timestamp);
            }
            info!(count = games.len(), "Listed dispute games");
        }
        Command::Check { game } => {
            // Deciding never signs, so the responder gets no key
            let responder = FaultResponder::new(
                provider.clone(),
                client::disabled_signer_fn(),
                config.from_address.unwrap_or(Address::ZERO),
            );
            let resolve = check_game(
                &fetcher,
                &responder,
                game,
                config.agree_with_proposed_output,
                &cancel,
            )
            .await;
            println!("{game}\tshould_resolve={resolve}");
        }
        Command::Run => {
            let (signer, from) = match cli.private_key.as_deref() {
                Some(key) => (
                    client::local_signer_fn(key, network.l1.chain_id, provider.clone())?,
                    client::signer_address(key)?,
                ),
                None if config.dry_run => (
                    client::disabled_signer_fn(),
                    config.from_address.unwrap_or(Address::ZERO),
                ),
                None => eyre::bail!("A private key is required unless running in dry-run mode"),
            };
            if let Some(configured) = config.from_address.filter(|a| *a != from) {
                warn!(%configured, signer = %from, "Ignoring from_address, resolving as the signer");
            }

            let responder = FaultResponder::new(provider.clone(), signer, from);

            if let Some(port) = config.metrics_port {
                install_prometheus_exporter(port)?;
                info!(port, "Prometheus exporter listening");
            }
            let metrics = Metrics::new();

            let options = CycleOptions {
                agree_with_proposed_output: config.agree_with_proposed_output,
                dry_run: config.dry_run,
            };

            info!("Starting monitoring loop...");
            let mut interval = time::interval(config.poll_interval());

            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = interval.tick() => {}
                }

                match run_cycle(&loader, &fetcher, &responder, options, &metrics, &cancel).await {
                    Ok(report) => info!(
                        games = report.games,
                        resolved = report.resolved,
                        would_resolve = report.would_resolve,
                        unresolvable = report.unresolvable,
                        failures = report.failures,
                        "Cycle complete"
                    ),
                    Err(LoaderError::Cancelled) => break,
                    // Already logged by the cycle; try again next tick
                    Err(_) => continue,
                }
            }

            info!("Challenger stopped");
        }
    }

    Ok(())
}
