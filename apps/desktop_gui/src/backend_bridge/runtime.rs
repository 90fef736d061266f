//! Runtime bridge between the UI command queue and the HTTP activity runner.

use std::thread;

use anyhow::Context as _;
use catalog::protocol::RunRequest;
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("failed to build backend runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let http = reqwest::Client::new();
            let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::SubmitRun {
                        server_url,
                        request,
                    } => match submit_run(&http, &server_url, &request).await {
                        Ok(()) => {
                            tracing::info!(
                                activities = request.activities.len(),
                                "activity runner accepted run request"
                            );
                            let _ = ui_tx.try_send(UiEvent::SubmissionAccepted {
                                activity_count: request.activities.len(),
                            });
                        }
                        Err(err) => {
                            let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                                UiErrorContext::Submit,
                                format!("{err:#}"),
                            )));
                        }
                    },
                    BackendCommand::ProbeServer { server_url } => {
                        match probe_server(&http, &server_url).await {
                            Ok(detail) => {
                                let _ = ui_tx.try_send(UiEvent::ServerProbed { detail });
                            }
                            Err(err) => {
                                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                                    UiErrorContext::Probe,
                                    format!("{err:#}"),
                                )));
                            }
                        }
                    }
                }
            }
        });
    });
}

fn runner_endpoint(server_url: &str) -> String {
    format!("{}/cgi-bin/run_activity", server_url.trim_end_matches('/'))
}

async fn submit_run(
    http: &reqwest::Client,
    server_url: &str,
    request: &RunRequest,
) -> anyhow::Result<()> {
    let endpoint = runner_endpoint(server_url);
    let response = http
        .post(&endpoint)
        .form(&request.form_pairs())
        .send()
        .await
        .with_context(|| format!("failed to connect to {endpoint}"))?;

    let status = response.status();
    if !status.is_success() {
        anyhow::bail!("activity runner returned {status} for {endpoint}");
    }
    Ok(())
}

async fn probe_server(http: &reqwest::Client, server_url: &str) -> anyhow::Result<String> {
    let response = http
        .get(server_url)
        .send()
        .await
        .with_context(|| format!("failed to connect to {server_url}"))?;
    Ok(format!("{server_url} responded with {}", response.status()))
}
