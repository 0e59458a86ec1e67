use clap::Subcommand;

use crate::cli::client::ApiClient;
use crate::cli::utils::output_record;
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum ServerCommands {
    #[command(about = "Show server information from API root endpoint")]
    Info,

    #[command(about = "Check server health status from API /api/health endpoint")]
    Health,
}

pub async fn handle(cmd: ServerCommands, client: &ApiClient, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        ServerCommands::Info => {
            let info = client.get("/", None).await?.into_success()?;
            output_record(&output_format, &info, &["name", "version", "description"])
        }
        ServerCommands::Health => {
            // An unhealthy server still answers with a diagnostic body worth showing
            let reply = client.get("/api/health", None).await?;
            output_record(
                &output_format,
                &reply.body,
                &["status", "database", "propertiesCount", "error", "timestamp"],
            )?;
            if !reply.status.is_success() {
                anyhow::bail!("server reported unhealthy ({})", reply.status.as_u16());
            }
            Ok(())
        }
    }
}
