use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdout},
    signal::unix::{SignalKind, signal},
    sync::mpsc,
};

use foodflow::{
    cli,
    config::Config,
    dispatch::RecommendationSet,
    logging,
    prediction::{
        HttpPredictionClient, PredictionBackend, PredictionError, fetch_spoilage_overview,
    },
    protocol::{ClientMessage, ServerMessage, encode_server_message, parse_client_message},
    session::{DashboardSession, RefreshOutcome, RefreshTicket},
};

enum Flow {
    Continue,
    Exit,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::args_from_env()?;
    let config = Config::load(&args.config_path)
        .with_context(|| format!("failed to load config from {}", args.config_path.display()))?;

    if args.check_config {
        println!("configuration OK: {}", args.config_path.display());
        return Ok(());
    }

    let logging_guard = logging::init_tracing(&config.logging)?;

    let backend: Arc<dyn PredictionBackend> = Arc::new(HttpPredictionClient::new(
        &config.prediction,
        config.session.forecast_horizon_days,
    ));
    let session = DashboardSession::default();

    run_adapter(config, backend, session, logging_guard.run_id().to_string()).await
}

async fn run_adapter(
    config: Config,
    backend: Arc<dyn PredictionBackend>,
    mut session: DashboardSession,
    run_id: String,
) -> Result<()> {
    let (fetch_tx, mut fetch_rx) =
        mpsc::channel::<(RefreshTicket, Result<RecommendationSet, PredictionError>)>(8);

    let mut stdin_lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    let mut sigint = signal(SignalKind::interrupt()).context("unable to listen for SIGINT")?;
    let mut sigterm = signal(SignalKind::terminate()).context("unable to listen for SIGTERM")?;

    emit(&mut stdout, &ServerMessage::Ready { run_id }).await?;

    loop {
        tokio::select! {
            line = stdin_lines.next_line() => {
                let Some(line) = line.context("failed to read stdin")? else {
                    break;
                };
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                match parse_client_message(trimmed) {
                    Err(err) => {
                        emit(
                            &mut stdout,
                            &ServerMessage::ProtocolError {
                                message: err.to_string(),
                            },
                        )
                        .await?;
                    }
                    Ok(message) => {
                        let flow = handle_message(
                            message,
                            &config,
                            &backend,
                            &mut session,
                            &fetch_tx,
                            &mut stdout,
                        )
                        .await?;
                        if matches!(flow, Flow::Exit) {
                            break;
                        }
                    }
                }
            }
            Some((ticket, result)) = fetch_rx.recv() => {
                let reply = match session.apply_refresh(ticket, result) {
                    RefreshOutcome::Installed { item_count } => ServerMessage::RefreshInstalled {
                        ticket: ticket.0,
                        item_count,
                    },
                    RefreshOutcome::Failed { error } => ServerMessage::RefreshFailed {
                        ticket: ticket.0,
                        error,
                    },
                    RefreshOutcome::Superseded => continue,
                };
                emit(&mut stdout, &reply).await?;
            }
            _ = sigint.recv() => {
                tracing::info!(target: "adapter", "received SIGINT; shutting down");
                break;
            }
            _ = sigterm.recv() => {
                tracing::info!(target: "adapter", "received SIGTERM; shutting down");
                break;
            }
        }
    }

    emit(&mut stdout, &ServerMessage::Exiting).await?;
    Ok(())
}

async fn handle_message(
    message: ClientMessage,
    config: &Config,
    backend: &Arc<dyn PredictionBackend>,
    session: &mut DashboardSession,
    fetch_tx: &mpsc::Sender<(RefreshTicket, Result<RecommendationSet, PredictionError>)>,
    stdout: &mut Stdout,
) -> Result<Flow> {
    match message {
        ClientMessage::Refresh => {
            let ticket = session.begin_refresh();
            let backend = Arc::clone(backend);
            let fetch_tx = fetch_tx.clone();
            tokio::spawn(async move {
                let result = backend.fetch_route_recommendations().await;
                let _ = fetch_tx.send((ticket, result)).await;
            });
            emit(stdout, &ServerMessage::RefreshStarted { ticket: ticket.0 }).await?;
        }
        ClientMessage::Routes => {
            emit(
                stdout,
                &ServerMessage::Routes {
                    store_location: session.set().store_location(),
                    refresh_in_flight: session.refresh_in_flight(),
                    cards: session.route_cards(),
                },
            )
            .await?;
        }
        ClientMessage::Status { item_id } => {
            let status = session.status_of(&item_id);
            emit(stdout, &ServerMessage::Status { item_id, status }).await?;
        }
        ClientMessage::Dispatch {
            item_id,
            recipient_id,
        } => {
            let reply = match session.dispatch(&item_id, &recipient_id) {
                Ok(receipt) => ServerMessage::Dispatched { receipt },
                Err(error) => ServerMessage::DispatchRejected {
                    kind: error.kind,
                    message: error.message,
                },
            };
            emit(stdout, &reply).await?;
        }
        ClientMessage::Demand { product_id } => {
            let reply = match backend.fetch_demand(&product_id).await {
                Ok(forecast) => ServerMessage::Demand { forecast },
                Err(error) => ServerMessage::PredictionFailed { error },
            };
            emit(stdout, &reply).await?;
        }
        ClientMessage::Spoilage { product_id, date } => {
            let reply = match backend.fetch_spoilage(&product_id, date.as_deref()).await {
                Ok(outlook) => ServerMessage::Spoilage { outlook },
                Err(error) => ServerMessage::PredictionFailed { error },
            };
            emit(stdout, &reply).await?;
        }
        ClientMessage::Overview => {
            let entries =
                fetch_spoilage_overview(backend.as_ref(), &config.session.overview_products).await;
            emit(stdout, &ServerMessage::Overview { entries }).await?;
        }
        ClientMessage::Health => {
            let reply = match backend.health().await {
                Ok(health) => ServerMessage::Health { health },
                Err(error) => ServerMessage::PredictionFailed { error },
            };
            emit(stdout, &reply).await?;
        }
        ClientMessage::Exit => return Ok(Flow::Exit),
    }
    Ok(Flow::Continue)
}

async fn emit(stdout: &mut Stdout, message: &ServerMessage) -> Result<()> {
    let encoded = encode_server_message(message).context("failed to encode reply")?;
    stdout.write_all(encoded.as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await?;
    Ok(())
}
