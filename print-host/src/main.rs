use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use print_host::{HostBridge, HostConfig, logger};
use serde::Serialize;
use shared::{PrintContent, PrintRequest, PrinterBridge, PrinterRole};

/// Printer bridge host
#[derive(Parser, Debug)]
#[command(name = "print-host", version, about = "Printer bridge host")]
struct Cli {
    /// Working directory (role mapping and logs)
    #[arg(long, env = "WORK_DIR", global = true)]
    work_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the effective role mapping
    Config,

    /// List printers known to this machine
    List,

    /// Assign a printer to a role (empty printer clears it)
    SetRole {
        /// invoice-k80, invoice-a4 or label
        role: PrinterRole,
        /// Printer name or address (e.g. 192.168.1.50:9100)
        printer: String,
    },

    /// Send a print job
    Print {
        /// Target role
        #[arg(long, conflicts_with = "printer", required_unless_present = "printer")]
        role: Option<PrinterRole>,
        /// Target printer name or address
        #[arg(long)]
        printer: Option<String>,
        /// File with raw ESC/POS bytes
        #[arg(long, conflicts_with = "text", required_unless_present = "text")]
        file: Option<PathBuf>,
        /// Text lines to print
        #[arg(long, num_args = 1..)]
        text: Vec<String>,
        #[arg(long, default_value_t = 1)]
        copies: u32,
    },
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = HostConfig::from_env();
    if let Some(dir) = cli.work_dir {
        config.work_dir = dir;
    }

    let _guard = logger::init_logger_with_file(
        &config.log_level,
        config.log_json,
        Some(config.log_dir().as_path()),
    )?;
    tracing::debug!(work_dir = %config.work_dir.display(), "print-host starting");

    let bridge = HostBridge::new(config).context("failed to load printer mapping")?;

    match cli.command {
        Commands::Config => print_json(&bridge.get_printer_config().await)?,
        Commands::List => print_json(&bridge.list_printers().await)?,
        Commands::SetRole { role, printer } => {
            let updated = bridge.set_printer_role(role, &printer).await?;
            print_json(&updated)?;
        }
        Commands::Print {
            role,
            printer,
            file,
            text,
            copies,
        } => {
            let content = match file {
                Some(path) => {
                    let data = std::fs::read(&path)
                        .with_context(|| format!("failed to read {}", path.display()))?;
                    PrintContent::raw(&data)
                }
                None => PrintContent::text(text),
            };
            let request = PrintRequest {
                role,
                printer_name: printer,
                copies,
                content,
            };

            let response = bridge.print(request).await;
            print_json(&response)?;
            if !response.is_success() {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
