//! buildsignal Relay
//!
//! Lambda function that forwards build pipeline completion to a wait handle.

use clap::Parser;
use lambda_runtime::service_fn;
use tracing::info;

use buildsignal_core::SignalRelay;
use buildsignal_core::tracing_init::init_tracing;
use buildsignal_relay::{RelayArgs, handle_event, replay_file};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = RelayArgs::parse();

    init_tracing("buildsignal_relay=info,buildsignal_core=info", args.log_json);

    let relay = SignalRelay::new(args.relay_config())?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        has_callback_url = relay.config().callback_url.is_some(),
        watch_target = ?relay.config().watch_target(),
        "Starting buildsignal-relay"
    );

    if let Some(path) = &args.replay {
        let request_id = args
            .request_id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let outcome = replay_file(&relay, path, &request_id).await?;
        info!(?outcome, "Replay finished");
        return Ok(());
    }

    let relay = &relay;
    lambda_runtime::run(service_fn(move |event| async move {
        handle_event(relay, event).await
    }))
    .await
    .map_err(|e| anyhow::anyhow!(e))?;

    info!("Relay stopped");
    Ok(())
}
