use crate::cli::CLI;
use crate::config::ClientConfig;
use crate::errors::{AppError, Result};
use crate::models::kyc::{IdType, ImageSide, LocalImage, VerificationDraft};
use crate::models::tier::TierLevel;
use crate::services::kyc_service::KycService;
use crate::services::ocr_service::OcrService;
use crate::services::poller::StatusPoller;
use crate::services::session::EnvSession;
use crate::services::tier_service::TierService;
use crate::utils::validation::Validator;
use colored::Colorize;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Read an image from disk into a draft-ready form. Size and type are
/// enforced when the image is attached to the draft.
pub fn load_image(path_str: &str) -> Result<LocalImage> {
    let path = Path::new(path_str);
    let content_type = Validator::image_content_type(path)?;
    let bytes = std::fs::read(path)
        .map_err(|e| AppError::IoError(format!("Could not read {}: {}", path_str, e)))?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("image")
        .to_string();

    Ok(LocalImage {
        file_name,
        content_type: content_type.to_string(),
        bytes,
    })
}

pub async fn handle_kyc_command(args: &[String]) -> Result<()> {
    if args.is_empty() {
        println!("{}", "KYC command usage:".cyan().bold());
        println!("  kyc status");
        println!("  kyc submit <id_type> <front_image> <back_image>");
        println!("  kyc watch");
        return Ok(());
    }

    let config = ClientConfig::from_env();
    let session = Arc::new(EnvSession::new());
    let service = Arc::new(KycService::new(&config, session));

    match args[0].as_str() {
        "status" => match service.fetch_status().await {
            Ok(report) => {
                println!("Verification status: {}", report.status.to_string().yellow());
                if let Some(reason) = report.rejection_reason {
                    println!("Rejection reason: {}", reason.red());
                }
            }
            Err(e) => CLI::print_error(&e.to_string()),
        },
        "submit" => {
            if args.len() < 4 {
                CLI::print_error("Usage: kyc submit <id_type> <front_image> <back_image>");
                CLI::display_id_types();
                return Ok(());
            }

            let Some(id_type) = IdType::parse(&args[1]) else {
                CLI::print_error(&format!("Unknown ID type '{}'", args[1]));
                CLI::display_id_types();
                return Ok(());
            };

            let mut draft = VerificationDraft::new();
            draft.id_type = Some(id_type);
            service.attach_image(&mut draft, ImageSide::Front, load_image(&args[2])?)?;
            service.attach_image(&mut draft, ImageSide::Back, load_image(&args[3])?)?;

            // Text extraction is advisory; never let it stop the submission.
            let ocr = OcrService::new(&config);
            extract_draft_text(&ocr, &mut draft).await;

            // The gate needs the backend's answer, not the cold default.
            if let Err(e) = service.fetch_status().await {
                CLI::print_info(&format!("Continuing without a status check: {}", e));
            }

            match service.submit(&mut draft).await {
                Ok(receipt) => {
                    CLI::print_success(&receipt.message);
                    println!(
                        "Submitted at: {}",
                        receipt
                            .submitted_at
                            .format("%Y-%m-%d %H:%M:%S UTC")
                            .to_string()
                            .blue()
                    );
                }
                Err(e) => CLI::print_error(&e.to_string()),
            }
        }
        "watch" => {
            let cell = service.status_cell();
            let poller = StatusPoller::spawn(service.clone(), config.poll_interval());
            CLI::print_info(&format!(
                "Watching verification status every {}s. Press Ctrl-C to stop.",
                config.poll_interval_secs
            ));

            let mut last = cell.status();
            println!("Status: {}", last.to_string().yellow());
            loop {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => break,
                    _ = tokio::time::sleep(Duration::from_millis(500)) => {
                        let current = cell.status();
                        if current != last {
                            println!("Status: {}", current.to_string().yellow());
                            last = current;
                        }
                    }
                }
            }
            poller.stop().await;
            println!("{}", "Stopped watching.".yellow());
        }
        _ => {
            CLI::print_error("Unknown kyc command");
            println!("Available: status, submit, watch");
        }
    }

    Ok(())
}

pub async fn handle_tier_command(args: &[String]) -> Result<()> {
    if args.is_empty() {
        println!("{}", "Tier command usage:".cyan().bold());
        println!("  tier status");
        println!("  tier upgrade <elite|premium>");
        return Ok(());
    }

    let config = ClientConfig::from_env();
    let session = Arc::new(EnvSession::new());
    let service = TierService::new(&config, session);

    match args[0].as_str() {
        "status" => match service.fetch_standing().await {
            Ok(standing) => {
                let name = TierLevel::from_number(standing.level)
                    .map(|level| level.name())
                    .unwrap_or("Unknown");
                println!("Current tier: {} (level {})", name.green(), standing.level);
                println!("Upgrade request: {}", standing.request.to_string().yellow());
            }
            Err(e) => CLI::print_error(&e.to_string()),
        },
        "upgrade" => {
            if args.len() < 2 {
                CLI::print_error("Usage: tier upgrade <elite|premium>");
                return Ok(());
            }
            let Some(target) = TierLevel::parse(&args[1]) else {
                CLI::print_error(&format!("Unknown tier '{}'", args[1]));
                return Ok(());
            };

            if !CLI::confirm_action(&format!("Request an upgrade to {}?", target))? {
                println!("{}", "Upgrade request cancelled.".yellow());
                return Ok(());
            }

            match service.request_upgrade(target).await {
                Ok(message) => CLI::print_success(&message),
                Err(e) => CLI::print_error(&e.to_string()),
            }
        }
        _ => {
            CLI::print_error("Unknown tier command");
            println!("Available: status, upgrade <elite|premium>");
        }
    }

    Ok(())
}

/// Populate the draft's advisory text fields from whatever sides are still
/// local. Failures are reported and swallowed.
pub async fn extract_draft_text(ocr: &OcrService, draft: &mut VerificationDraft) {
    use crate::models::kyc::ImageSlot;

    let sides = [
        (ImageSide::Front, draft.front.clone()),
        (ImageSide::Back, draft.back.clone()),
    ];

    for (side, slot) in sides {
        let Some(ImageSlot::Local(image)) = slot else {
            continue;
        };
        match ocr.extract_text(&image).await {
            Ok(text) if !text.is_empty() => {
                CLI::print_info(&format!(
                    "Extracted {} characters from the {} image",
                    text.len(),
                    side
                ));
                match side {
                    ImageSide::Front => draft.front_text = Some(text),
                    ImageSide::Back => draft.back_text = Some(text),
                }
            }
            Ok(_) => CLI::print_info(&format!("No text found in the {} image", side)),
            Err(e) => CLI::print_info(&format!(
                "Text extraction skipped for the {} image: {}",
                side, e
            )),
        }
    }
}
