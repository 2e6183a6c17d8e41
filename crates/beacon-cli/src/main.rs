use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use rand::Rng;
use tokio::time::{Duration, sleep};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use beacon_core::app::{ServiceBuilder, StatusUpdateService};
use beacon_core::config::BeaconConfig;
use beacon_core::domain::{
    CallerContext, EdgeStack, EdgeStackId, Endpoint, EndpointId, StatusKind, StatusUpdateError,
    StoreError,
};
use beacon_core::impls::InMemoryEndpointDirectory;
use beacon_core::ports::StackStore;

#[derive(Debug, Parser)]
#[command(name = "beacon", about = "Simulate edge agents reporting stack status")]
struct Args {
    /// Stack that every simulated agent reports against.
    #[arg(long, default_value_t = 1)]
    stack_id: u64,

    #[arg(long, default_value = "web")]
    stack_name: String,

    /// Number of concurrent edge agents.
    #[arg(long, default_value_t = 8)]
    reporters: u64,

    /// Overrides BEACON_DATA_DIR.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Overrides BEACON_SYNC_WRITES.
    #[arg(long)]
    sync_writes: Option<bool>,

    /// tracing filter, e.g. "info" or "beacon_core=debug".
    #[arg(long, default_value = "info")]
    log: String,
}

fn edge_id_for(n: u64) -> String {
    format!("agent-{n:04}")
}

/// One agent: Deploying, a short pause, then Success or Error.
async fn run_agent(
    service: Arc<StatusUpdateService>,
    stack_id: EdgeStackId,
    n: u64,
) -> Result<(), StatusUpdateError> {
    let endpoint_id = EndpointId::new(n);
    let caller = CallerContext::edge_agent(edge_id_for(n));

    service
        .update_endpoint_status(stack_id, endpoint_id, StatusKind::Deploying, "", &caller)
        .await?;

    let (pause, failed) = {
        let mut rng = rand::thread_rng();
        (rng.gen_range(5..50), rng.gen_bool(0.2))
    };
    sleep(Duration::from_millis(pause)).await;

    if failed {
        service
            .update_endpoint_status(
                stack_id,
                endpoint_id,
                StatusKind::Error,
                "image pull failed",
                &caller,
            )
            .await?;
    } else {
        service
            .update_endpoint_status(stack_id, endpoint_id, StatusKind::Success, "", &caller)
            .await?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&args.log))
        .init();

    let mut config = BeaconConfig::from_env();
    if let Some(dir) = args.data_dir {
        config.data_dir = Some(dir);
    }
    if let Some(sync) = args.sync_writes {
        config.sync_writes = sync;
    }
    info!(data_dir = ?config.data_dir, sync_writes = config.sync_writes, "starting");

    // (A) endpoint 台帳: 1..=N の edge endpoint
    let directory = InMemoryEndpointDirectory::with_endpoints(
        (1..=args.reporters)
            .map(|n| Endpoint::edge(EndpointId::new(n), format!("site-{n}"), edge_id_for(n))),
    );

    // (B) サービス構築（data_dir があれば journal から復元）
    let service = ServiceBuilder::new()
        .directory(Arc::new(directory))
        .store_from_config(&config)
        .await?
        .build()?;
    let service = Arc::new(service);

    // (C) スタック作成（復元済みならそのまま使う）
    let stack_id = EdgeStackId::new(args.stack_id);
    match service
        .store()
        .create(EdgeStack::new(stack_id, args.stack_name.clone()))
        .await
    {
        Ok(_) => info!(stack = %stack_id, "created stack"),
        Err(StoreError::AlreadyExists(_)) => info!(stack = %stack_id, "reusing restored stack"),
        Err(err) => return Err(err.into()),
    }

    // (D) agent を並行に走らせる
    let mut handles = Vec::new();
    for n in 1..=args.reporters {
        handles.push(tokio::spawn(run_agent(service.clone(), stack_id, n)));
    }
    for handle in handles {
        if let Err(err) = handle.await? {
            warn!(error = %err, retryable = err.is_retryable(), "agent gave up");
        }
    }

    // (E) 集計とスナップショット
    let counts = service.counts(stack_id).await?;
    info!(
        total = counts.total,
        settled = counts.settled,
        failed = counts.failed,
        "final counts"
    );
    let snapshot = service.store().get(stack_id).await?;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
