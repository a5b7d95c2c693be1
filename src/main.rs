use colored::Colorize;
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use vaultclient::cli::{self, CLI};
use vaultclient::models::kyc::{IdType, ImageSide, VerificationDraft};
use vaultclient::models::tier::TierLevel;
use vaultclient::services::kyc_service::KycService;
use vaultclient::services::ocr_service::OcrService;
use vaultclient::services::poller::StatusPoller;
use vaultclient::services::session::MemorySession;
use vaultclient::services::tier_service::TierService;
use vaultclient::ClientConfig;

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().json().flatten_event(true))
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();
    dotenv::dotenv().ok();

    if let Err(e) = run().await {
        eprintln!("{}", format!("Application error: {}", e).red());
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();

    // If no arguments provided, show interactive menu
    if args.len() == 1 {
        return run_interactive().await;
    }

    match args[1].as_str() {
        "kyc" => {
            cli::handle_kyc_command(&args[2..]).await?;
        }
        "tier" => {
            cli::handle_tier_command(&args[2..]).await?;
        }
        "help" => {
            CLI::print_help();
        }
        _ => {
            println!(
                "{}",
                "Unknown command. Use 'help' to see available commands.".red()
            );
        }
    }

    Ok(())
}

async fn run_interactive() -> Result<(), Box<dyn std::error::Error>> {
    CLI::print_header();

    let config = ClientConfig::from_env();
    let session = Arc::new(MemorySession::new());
    let kyc = Arc::new(KycService::new(&config, session.clone()));
    let tier = TierService::new(&config, session.clone());
    let ocr = OcrService::new(&config);

    let mut draft = VerificationDraft::new();

    loop {
        println!("\n{}", "🛡️  Identity Verification".cyan().bold());
        println!("{}", "=".repeat(40).blue());
        println!("1. 🔑 Set Session Token");
        println!("2. 📋 Check Verification Status");
        println!("3. 🪪 Select ID Type");
        println!("4. 🖼️  Attach Front Image");
        println!("5. 🖼️  Attach Back Image");
        println!("6. 🔍 Extract Document Text");
        println!("7. 📤 Submit for Verification");
        println!("8. 👀 Watch Verification Status");
        println!("9. ⭐ Account Tier Status");
        println!("10. ⬆️  Request Tier Upgrade");
        println!("{}", "─".repeat(40).blue());
        println!("0. 🚪 Exit");

        let choice = CLI::get_input("Select an option:")?;

        match choice.trim() {
            "1" => {
                let token = CLI::get_secret("🔑 Paste your session token:")?;
                if token.is_empty() {
                    session.clear();
                    CLI::print_info("Session token cleared.");
                } else {
                    session.set_token(token);
                    CLI::print_success("Session token set.");
                }
            }
            "2" => match kyc.fetch_status().await {
                Ok(report) => {
                    println!("Verification status: {}", report.status.to_string().yellow());
                    if let Some(reason) = report.rejection_reason {
                        println!("Rejection reason: {}", reason.red());
                    }
                }
                Err(e) => CLI::print_error(&format!("Status check failed: {}", e)),
            },
            "3" => {
                CLI::display_id_types();
                let input = CLI::get_input("ID type:")?;
                match IdType::parse(&input) {
                    Some(id_type) => {
                        draft.id_type = Some(id_type);
                        CLI::print_success(&format!("ID type set to {}", id_type.label()));
                    }
                    None => CLI::print_error(&format!("Unknown ID type '{}'", input)),
                }
            }
            "4" => attach_interactive(&kyc, &mut draft, ImageSide::Front),
            "5" => attach_interactive(&kyc, &mut draft, ImageSide::Back),
            "6" => {
                if draft.front.is_none() && draft.back.is_none() {
                    CLI::print_error("Attach at least one image first.");
                } else {
                    cli::extract_draft_text(&ocr, &mut draft).await;
                }
            }
            "7" => match kyc.submit(&mut draft).await {
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
                    draft = VerificationDraft::new();
                }
                Err(e) => CLI::print_error(&format!("Submission failed: {}", e)),
            },
            "8" => {
                watch_interactive(&config, kyc.clone()).await;
            }
            "9" => match tier.fetch_standing().await {
                Ok(standing) => {
                    let name = TierLevel::from_number(standing.level)
                        .map(|level| level.name())
                        .unwrap_or("Unknown");
                    println!("Current tier: {} (level {})", name.green(), standing.level);
                    println!("Upgrade request: {}", standing.request.to_string().yellow());
                }
                Err(e) => CLI::print_error(&format!("Tier status failed: {}", e)),
            },
            "10" => {
                let input = CLI::get_input("Upgrade to (elite/premium):")?;
                match TierLevel::parse(&input) {
                    Some(target) => {
                        if CLI::confirm_action(&format!("Request an upgrade to {}?", target))? {
                            match tier.request_upgrade(target).await {
                                Ok(message) => CLI::print_success(&message),
                                Err(e) => CLI::print_error(&format!("Upgrade failed: {}", e)),
                            }
                        }
                    }
                    None => CLI::print_error(&format!("Unknown tier '{}'", input)),
                }
            }
            "0" => {
                println!("{}", "👋 Goodbye!".green().bold());
                break;
            }
            _ => {
                CLI::print_error("Invalid option. Please try again.");
            }
        }
    }

    Ok(())
}

fn attach_interactive(kyc: &KycService, draft: &mut VerificationDraft, side: ImageSide) {
    let path = match CLI::get_input(&format!("Path to the {} image:", side)) {
        Ok(path) => path,
        Err(e) => {
            CLI::print_error(&format!("Failed to read input: {}", e));
            return;
        }
    };

    let image = match cli::load_image(&path) {
        Ok(image) => image,
        Err(e) => {
            CLI::print_error(&e.to_string());
            return;
        }
    };

    let size = image.bytes.len();
    match kyc.attach_image(draft, side, image) {
        Ok(()) => CLI::print_success(&format!("Attached {} image ({} bytes)", side, size)),
        Err(e) => CLI::print_error(&e.to_string()),
    }
}

async fn watch_interactive(config: &ClientConfig, kyc: Arc<KycService>) {
    let cell = kyc.status_cell();
    let poller = StatusPoller::spawn(kyc, config.poll_interval());
    CLI::print_info(&format!(
        "Polling every {}s. Press Enter to stop.",
        config.poll_interval_secs
    ));

    let printer_cell = cell.clone();
    let printer = tokio::spawn(async move {
        let mut last = printer_cell.status();
        println!("Status: {}", last.to_string().yellow());
        loop {
            tokio::time::sleep(std::time::Duration::from_millis(500)).await;
            let current = printer_cell.status();
            if current != last {
                println!("Status: {}", current.to_string().yellow());
                last = current;
            }
        }
    });

    // Blocks this task only; the poller and printer run on other workers.
    let _ = CLI::get_input("");

    printer.abort();
    poller.stop().await;
    println!("{}", "Stopped watching.".yellow());
}
