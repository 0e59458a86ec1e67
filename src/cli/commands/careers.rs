use clap::Subcommand;

use crate::cli::client::ApiClient;
use crate::cli::utils::output_record;
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum CareerCommands {
    #[command(about = "Show an active career posting by id")]
    Get {
        #[arg(help = "Posting id")]
        id: String,
    },
}

pub async fn handle(cmd: CareerCommands, client: &ApiClient, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        CareerCommands::Get { id } => {
            let posting = client
                .get_segments(&["api", "career-postings", id.as_str()], None)
                .await?
                .into_success()?;
            output_record(
                &output_format,
                &posting,
                &["title", "department", "location", "employmentType", "salaryRange", "requirements"],
            )
        }
    }
}
