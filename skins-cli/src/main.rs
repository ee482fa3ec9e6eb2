//! Skins CLI
//!
//! Command-line interface for the skin store API.

use anyhow::Result;
use clap::{Parser, Subcommand};

use skins_client::SkinsClient;
use skins_types::{PurchaseId, SkinId};

#[derive(Parser)]
#[command(name = "skins")]
#[command(author, version, about = "Skin store API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the skin store API
    #[arg(long, env = "SKINS_API_URL", default_value = "http://localhost:5042")]
    api_url: String,

    /// User id sent as the bearer token
    #[arg(long, env = "SKINS_USER_ID")]
    user_id: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Catalog operations
    Skin {
        #[command(subcommand)]
        action: SkinCommands,
    },
    /// Purchase operations
    Purchase {
        #[command(subcommand)]
        action: PurchaseCommands,
    },
    /// Check API health
    Health,
}

#[derive(Subcommand)]
enum SkinCommands {
    /// List the catalog
    List,
    /// Get skin details
    Get {
        /// Skin ID
        id: i64,
    },
}

#[derive(Subcommand)]
enum PurchaseCommands {
    /// Buy a skin
    Buy {
        /// Skin ID
        skin_id: i64,
    },
    /// List your purchases
    History,
    /// Get one of your purchases
    Get {
        /// Purchase ID
        id: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut client = SkinsClient::new(&cli.api_url);
    if let Some(user) = cli.user_id {
        client = client.with_user_id(user);
    }

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Skin { action } => match action {
            SkinCommands::List => {
                let skins = client.list_skins().await?;
                println!("{}", serde_json::to_string_pretty(&skins)?);
            }
            SkinCommands::Get { id } => {
                let skin = client.get_skin(SkinId::new(id)).await?;
                println!("{}", serde_json::to_string_pretty(&skin)?);
            }
        },

        Commands::Purchase { action } => match action {
            PurchaseCommands::Buy { skin_id } => {
                let purchase = client.buy_skin(SkinId::new(skin_id)).await?;
                println!("{}", serde_json::to_string_pretty(&purchase)?);
            }
            PurchaseCommands::History => {
                let purchases = client.purchase_history().await?;
                println!("{}", serde_json::to_string_pretty(&purchases)?);
            }
            PurchaseCommands::Get { id } => {
                let purchase = client.get_purchase(PurchaseId::new(id)).await?;
                println!("{}", serde_json::to_string_pretty(&purchase)?);
            }
        },
    }

    Ok(())
}
