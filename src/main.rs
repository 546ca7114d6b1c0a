mod adapters;
mod config;
mod domain;
mod error;
mod pipeline;
mod ports;
mod server;
mod utils;

use adapters::services::crm::SalesforceClient;
use adapters::services::llm::OpenAiAnalyzer;
use adapters::services::mail::ResendMailer;
use adapters::services::sheets::GoogleSheetsClient;
use adapters::services::video::TavusClient;
use config::AppConfig;
use pipeline::Pipeline;
use ports::video::VideoAgentPort;
use server::AppState;
use std::sync::Arc;

/// Wire the pipeline from whatever credentials the environment provides.
///
/// Every collaborator handle is constructed exactly once here and shared for
/// the life of the process; a missing credential leaves the corresponding
/// step disabled rather than failing startup.
fn build_pipeline(config: &Arc<AppConfig>) -> (Pipeline, Option<Arc<dyn VideoAgentPort>>) {
    let mut pipeline = Pipeline::new(config.clone());

    let video: Option<Arc<dyn VideoAgentPort>> = match &config.video_api_key {
        Some(api_key) => {
            let client = Arc::new(
                TavusClient::new(api_key.clone()).with_base_url(config.video_api_url.clone()),
            );
            log::info!("Metadata enrichment enabled");
            Some(client)
        }
        None => {
            log::warn!("No platform API key configured; metadata enrichment disabled");
            None
        }
    };
    if let Some(video) = &video {
        pipeline = pipeline.with_video(video.clone());
    }

    match &config.openai_api_key {
        Some(api_key) => {
            log::info!("Lead analysis enabled (model: {})", config.openai_model);
            pipeline = pipeline.with_analyzer(Arc::new(OpenAiAnalyzer::new(
                api_key.clone(),
                config.openai_model.clone(),
            )));
        }
        None => log::warn!("No analysis API key configured; leads will use fallback data"),
    }

    match &config.resend_api_key {
        Some(api_key) => {
            log::info!("Mail sink enabled (internal: {})", config.internal_address);
            pipeline = pipeline.with_mailer(Arc::new(ResendMailer::new(api_key.clone())));
        }
        // The mail sink is considered mandatory for lead capture, so its
        // absence is loud, unlike the optional sinks below.
        None => log::error!("No mail API key configured; lead emails cannot be sent"),
    }

    match (&config.sheets_access_token, &config.sheet_id) {
        (Some(token), Some(sheet_id)) => {
            log::info!("Spreadsheet sink enabled");
            pipeline = pipeline.with_spreadsheet(Arc::new(GoogleSheetsClient::new(
                token.clone(),
                sheet_id.clone(),
            )));
        }
        _ => log::info!("Spreadsheet sink not configured"),
    }

    if config.crm_enabled {
        match (
            &config.crm_login_url,
            &config.crm_client_id,
            &config.crm_client_secret,
        ) {
            (Some(login_url), Some(client_id), Some(client_secret)) => {
                log::info!("CRM sink enabled");
                pipeline = pipeline.with_crm(Arc::new(SalesforceClient::new(
                    login_url.clone(),
                    client_id.clone(),
                    client_secret.clone(),
                )));
            }
            _ => log::error!("CRM sync enabled but credentials are incomplete; sink disabled"),
        }
    }

    (pipeline, video)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = Arc::new(AppConfig::from_env());
    log::info!("Starting lead-relay v{}", env!("CARGO_PKG_VERSION"));

    let (pipeline, video) = build_pipeline(&config);
    let state = AppState::new(config.clone(), Arc::new(pipeline), video);

    let app = server::build_router(state);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    log::info!("Listening on http://{}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
