mod commands;
pub use commands::*;

use crate::errors::{AppError, Result};
use crate::models::kyc::IdType;
use colored::Colorize;
use std::io::{self, Write};

pub struct CLI;

impl CLI {
    pub fn print_header() {
        println!("{}", "=".repeat(50).bright_blue());
        println!(
            "{}",
            "    🛡️  Vault Wallet - Identity Verification    "
                .bright_yellow()
                .bold()
        );
        println!("{}", "=".repeat(50).bright_blue());
        println!();
    }

    pub fn print_success(message: &str) {
        println!("{} {}", "✅".green(), message.green());
    }

    pub fn print_error(message: &str) {
        println!("{} {}", "❌".red(), message.red());
    }

    pub fn print_info(message: &str) {
        println!("{} {}", "ℹ️".blue(), message.blue());
    }

    pub fn get_input(prompt: &str) -> Result<String> {
        print!("{} ", prompt.cyan());
        io::stdout()
            .flush()
            .map_err(|e| AppError::InternalError(format!("IO error: {}", e)))?;

        let mut input = String::new();
        io::stdin()
            .read_line(&mut input)
            .map_err(|e| AppError::InternalError(format!("Failed to read input: {}", e)))?;

        Ok(input.trim().to_string())
    }

    pub fn get_secret(prompt: &str) -> Result<String> {
        print!("{} ", prompt.cyan());
        io::stdout()
            .flush()
            .map_err(|e| AppError::InternalError(format!("IO error: {}", e)))?;

        rpassword::read_password()
            .map_err(|e| AppError::InternalError(format!("Failed to read input: {}", e)))
    }

    pub fn confirm_action(prompt: &str) -> Result<bool> {
        loop {
            let input = Self::get_input(&format!("{} (y/n):", prompt))?;
            match input.to_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => Self::print_error("Please enter 'y' for yes or 'n' for no"),
            }
        }
    }

    pub fn display_id_types() {
        println!("{}", "Accepted ID types:".yellow().bold());
        for id_type in IdType::ALL {
            println!("  • {} ({})", id_type.label(), id_type.as_str());
        }
        println!();
    }

    pub fn print_help() {
        println!("\n{}", "Available Commands:".cyan().bold());
        println!("  kyc status");
        println!("    Show the current verification status");
        println!();
        println!("  kyc submit <id_type> <front_image> <back_image>");
        println!("    Upload both document images and submit for verification");
        println!();
        println!("  kyc watch");
        println!("    Poll the verification status until interrupted (Ctrl-C)");
        println!();
        println!("  tier status");
        println!("    Show the current account tier and any upgrade request");
        println!();
        println!("  tier upgrade <elite|premium>");
        println!("    Request an account tier upgrade");
        println!();
        println!("  help");
        println!("    Show this help message");
        println!();
        println!(
            "{}",
            "Set VAULT_SESSION_TOKEN for authenticated commands.".yellow()
        );
        println!();
    }
}
