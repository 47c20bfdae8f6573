use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::{json, Map, Value};

#[derive(Parser)]
#[command(name = "directory-cli")]
#[command(about = "Management CLI for the facility directory", long_about = None)]
struct Cli {
    #[arg(short, long, env = "DIRECTORY_URL", default_value = "http://localhost:3000")]
    url: String,

    #[arg(short, long, env = "ADMIN_API_KEY", default_value = "")]
    key: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check service and database health
    Health,
    /// List leads, newest first
    Leads {
        /// Only leads with this status
        #[arg(long)]
        status: Option<String>,
        #[arg(long, default_value_t = 20)]
        limit: i64,
    },
    /// Update a lead after review
    Review {
        id: i32,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long)]
        contacted: Option<bool>,
    },
    /// Search facilities
    Search {
        query: String,
        #[arg(long, default_value_t = 10)]
        limit: i64,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", cli.key))?,
    );

    match cli.command {
        Commands::Health => {
            let res = client.get(format!("{}/api/health", cli.url)).send().await?;
            print_response(res).await?;
        }
        Commands::Leads { status, limit } => {
            let mut query = vec![("limit", limit.to_string())];
            if let Some(status) = status {
                query.push(("status", status));
            }
            let res = client
                .get(format!("{}/admin/leads", cli.url))
                .headers(headers)
                .query(&query)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Review {
            id,
            status,
            priority,
            notes,
            contacted,
        } => {
            let mut body = Map::new();
            if let Some(status) = status {
                body.insert("status".into(), json!(status));
            }
            if let Some(priority) = priority {
                body.insert("priority".into(), json!(priority));
            }
            if let Some(notes) = notes {
                body.insert("notes".into(), json!(notes));
            }
            if let Some(contacted) = contacted {
                body.insert("contacted".into(), json!(contacted));
            }
            let res = client
                .patch(format!("{}/admin/leads/{}", cli.url, id))
                .headers(headers)
                .json(&Value::Object(body))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Search { query, limit } => {
            let res = client
                .get(format!("{}/api/search", cli.url))
                .query(&[("q", query), ("limit", limit.to_string())])
                .send()
                .await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
