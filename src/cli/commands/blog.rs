use clap::Subcommand;

use crate::cli::client::ApiClient;
use crate::cli::utils::output_record;
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum BlogCommands {
    #[command(about = "Show a published post by slug")]
    Get {
        #[arg(help = "Post slug")]
        slug: String,
    },
}

pub async fn handle(cmd: BlogCommands, client: &ApiClient, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        BlogCommands::Get { slug } => {
            let post = client
                .get_segments(&["api", "blog", "posts", slug.as_str()], None)
                .await?
                .into_success()?;
            output_record(
                &output_format,
                &post,
                &["title", "slug", "author.name", "publishedAt", "tags", "excerpt"],
            )
        }
    }
}
