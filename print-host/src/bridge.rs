//! `PrinterBridge` implementation for the host process

use async_trait::async_trait;
use bridge_printer::{DriverPrinter, NetworkPrinter, Printer, driver_printers, print_driver_sync};
use shared::{
    PrintRequest, PrintResponse, PrinterBridge, PrinterConfig, PrinterInfo, PrinterRole,
    normalize_default,
};
use tokio::sync::RwLock;
use tracing::{error, info, instrument, warn};

use crate::config::HostConfig;
use crate::error::{HostError, HostResult};
use crate::render::Renderer;
use crate::store::ConfigStore;
use crate::target::PrinterTarget;

pub struct HostBridge {
    config: HostConfig,
    store: ConfigStore,
    mapping: RwLock<PrinterConfig>,
    renderer: Renderer,
}

impl HostBridge {
    /// Create a bridge backed by `{work_dir}/printers.json`
    pub fn new(config: HostConfig) -> HostResult<Self> {
        let store = ConfigStore::new(config.store_path());
        Self::with_store(config, store)
    }

    pub fn with_store(config: HostConfig, store: ConfigStore) -> HostResult<Self> {
        let mapping = store.load()?;
        let renderer = Renderer::new(config.paper_width, config.encoding);
        info!(
            path = %store.path().display(),
            width = config.paper_width,
            "Printer bridge ready"
        );
        Ok(Self {
            config,
            store,
            mapping: RwLock::new(mapping),
            renderer,
        })
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Effective mapping: persisted roles with environment overrides on top
    pub async fn effective_config(&self) -> PrinterConfig {
        let mut config = self.mapping.read().await.clone();
        config.merge(&self.config.printer_overrides);
        config
    }

    /// Assign a printer to a role and persist the mapping
    ///
    /// Returns the effective mapping after the change.
    #[instrument(skip(self))]
    pub async fn set_printer_role(&self, role: PrinterRole, name: &str) -> HostResult<PrinterConfig> {
        {
            // Writers stay serialized until the file and the in-memory copy agree
            let mut mapping = self.mapping.write().await;
            let mut updated = mapping.clone();
            updated.set(role, name.trim());

            let store = self.store.clone();
            let to_save = updated.clone();
            tokio::task::spawn_blocking(move || store.save(&to_save))
                .await
                .map_err(|e| HostError::Io(std::io::Error::other(e)))??;
            *mapping = updated;
        }
        info!(%role, printer = name, "Printer role updated");
        Ok(self.effective_config().await)
    }

    async fn resolve_target(&self, request: &PrintRequest) -> HostResult<PrinterTarget> {
        if let Some(name) = request
            .printer_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
        {
            return Ok(PrinterTarget::parse(name)?);
        }

        let role = request.role.ok_or(HostError::NoPrinterSpecified)?;
        let config = self.effective_config().await;
        let name = config
            .printer_for(role)
            .ok_or(HostError::RoleNotConfigured(role))?;
        Ok(PrinterTarget::parse(name)?)
    }

    async fn try_print(&self, request: &PrintRequest) -> HostResult<()> {
        let target = self.resolve_target(request).await?;
        let data = self.renderer.render(&request.content, request.copies)?;
        info!(%target, bytes = data.len(), "Dispatching print job");

        match target {
            PrinterTarget::Network(addr) => {
                NetworkPrinter::from_socket_addr(addr)
                    .with_timeout(self.config.print_timeout())
                    .print(&data)
                    .await?;
            }
            PrinterTarget::Driver(name) => {
                tokio::task::spawn_blocking(move || print_driver_sync(&name, &data))
                    .await
                    .map_err(|e| HostError::Io(std::io::Error::other(e)))??;
            }
        }
        Ok(())
    }
}

fn to_printer_info(printer: DriverPrinter) -> PrinterInfo {
    let description = [&printer.comment, &printer.driver, &printer.port]
        .into_iter()
        .find(|s| !s.trim().is_empty())
        .cloned()
        .unwrap_or_default();
    PrinterInfo {
        display_name: printer.name.clone(),
        name: printer.name,
        description,
        status: i64::from(printer.status),
        is_default: printer.is_default,
    }
}

#[async_trait]
impl PrinterBridge for HostBridge {
    async fn get_printer_config(&self) -> PrinterConfig {
        self.effective_config().await
    }

    #[instrument(skip(self, request), fields(role = ?request.role, printer = ?request.printer_name, copies = request.copies))]
    async fn print(&self, request: PrintRequest) -> PrintResponse {
        match self.try_print(&request).await {
            Ok(()) => {
                info!("Print job completed");
                PrintResponse::ok()
            }
            Err(e) => {
                error!(code = %e.code(), error = %e, "Print job failed");
                e.into()
            }
        }
    }

    #[instrument(skip(self))]
    async fn list_printers(&self) -> Vec<PrinterInfo> {
        let printers = match tokio::task::spawn_blocking(driver_printers).await {
            Ok(Ok(printers)) => printers,
            Ok(Err(e)) => {
                warn!(error = %e, "Printer enumeration failed");
                Vec::new()
            }
            Err(e) => {
                warn!(error = %e, "Printer enumeration task failed");
                Vec::new()
            }
        };

        let mut infos: Vec<PrinterInfo> = printers.into_iter().map(to_printer_info).collect();
        normalize_default(&mut infos);
        info!(count = infos.len(), "Printers enumerated");
        infos
    }
}
