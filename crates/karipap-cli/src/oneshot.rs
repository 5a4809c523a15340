//! Non-interactive subcommands.
//!
//! They reuse the same validation, client and result card as the TUI and
//! print to stdout. A detection that ends in an error result exits non-zero.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{anyhow, bail};
use karipap_models::{DetectionRequest, DetectionTab, ModelError, SelectedImage};
use karipap_sdk::DetectorClient;

use crate::config::AppConfig;
use crate::effects::load_image;
use crate::i18n::t;
use crate::ui::result_view::ResultView;
use crate::update::load_error_message;

fn client(config: &AppConfig) -> anyhow::Result<DetectorClient> {
    Ok(DetectorClient::with_timeout(config.endpoints.clone(), config.request_timeout)?)
}

/// `karipap health`
pub async fn health(config: &AppConfig) -> anyhow::Result<ExitCode> {
    let s = t(config.locale);
    let health = client(config)?.check_health().await;
    let label = if health.is_healthy() { s.backend_online } else { s.backend_offline };
    println!("{label} ({})", config.endpoints);
    println!("{}: {}", s.backend_status, health.status);
    if let Some(vision) = &health.vision_api {
        println!("{}: {vision}", s.vision_api);
    }
    Ok(if health.is_healthy() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// `karipap detect text <TEXT> [--tab …]`
pub async fn detect_text(
    config: &AppConfig,
    text: String,
    tab: DetectionTab,
) -> anyhow::Result<ExitCode> {
    let s = t(config.locale);
    if !config.contract().supports(tab) {
        bail!(s.under_development);
    }
    let request = match DetectionRequest::text(tab, text) {
        Ok(request) => request,
        Err(ModelError::EmptyText) => bail!(s.enter_text_error),
        Err(e) => return Err(e.into()),
    };
    detect(config, &request).await
}

/// `karipap detect image <PATH>`
pub async fn detect_image(config: &AppConfig, path: &Path) -> anyhow::Result<ExitCode> {
    let image = select_image(config, path)?;
    println!("{}", crate::ui::describe_image(&image));
    detect(config, &DetectionRequest::image(image.payload)).await
}

/// `karipap ocr <PATH>`
pub async fn ocr(config: &AppConfig, path: &Path) -> anyhow::Result<ExitCode> {
    let image = select_image(config, path)?;
    let probe = client(config)?.test_ocr(&image.payload).await?;
    if probe.success {
        println!("{}", config.locale.ocr_test_succeeded(probe.length));
        println!();
        println!("{}", probe.text);
        Ok(ExitCode::SUCCESS)
    } else {
        println!("{}", config.locale.ocr_test_failed(&probe.text));
        Ok(ExitCode::FAILURE)
    }
}

fn select_image(config: &AppConfig, path: &Path) -> anyhow::Result<SelectedImage> {
    let max_bytes = config.max_image_bytes;
    load_image(path, max_bytes)
        .and_then(|file| Ok(SelectedImage::accept(file, max_bytes)?))
        .map_err(|e| anyhow!("{}: {}", path.display(), load_error_message(config.locale, &e)))
}

async fn detect(config: &AppConfig, request: &DetectionRequest) -> anyhow::Result<ExitCode> {
    let outcome = client(config)?.detect_or_error(request).await;
    for line in ResultView::build(&outcome, config.locale).to_lines() {
        println!("{line}");
    }
    Ok(if outcome.result.is_error() { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}
