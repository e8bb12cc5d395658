use std::process;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use posts_client::{NewPost, Post, PostQuery, PostsClient, PostsClientError};

const DEFAULT_SERVER: &str = "http://127.0.0.1:8080";

#[derive(Debug, Parser)]
#[command(name = "posts-cli", version, about = "Command-line client for posts-server")]
struct Cli {
    /// Server address; falls back to POSTS_SERVER, then the local default.
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create a post.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: i64,
        /// Authored time in epoch milliseconds (defaults to now).
        #[arg(long)]
        timestamp: Option<i64>,
        /// Publish immediately instead of saving a draft.
        #[arg(long)]
        published: bool,
    },
    /// List posts.
    List {
        #[arg(long)]
        author: Option<i64>,
        #[arg(long)]
        published: Option<bool>,
    },
    /// Fetch a post by id.
    Get {
        #[arg(long)]
        id: i64,
    },
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let server = resolve_server(cli.server.or_else(|| std::env::var("POSTS_SERVER").ok()));
    let client = PostsClient::new(server).context("failed to build HTTP client")?;

    match cli.command {
        Command::Create {
            title,
            author,
            timestamp,
            published,
        } => {
            let payload = NewPost {
                title,
                author,
                timestamp: timestamp.unwrap_or_else(|| Utc::now().timestamp_millis()),
                is_published: published,
            };
            let post = client
                .create_post(&payload)
                .await
                .map_err(map_client_error)?;
            print_post("Post created", &post);
        }
        Command::List { author, published } => {
            let query = PostQuery {
                author,
                is_published: published,
            };
            let posts = client.list_posts(&query).await.map_err(map_client_error)?;
            print_list(&posts);
        }
        Command::Get { id } => {
            let post = client.get_post(id).await.map_err(map_client_error)?;
            print_post("Post", &post);
        }
    }

    Ok(())
}

fn resolve_server(server: Option<String>) -> String {
    let raw = server.unwrap_or_else(|| DEFAULT_SERVER.to_string());
    normalize_server(raw)
}

fn normalize_server(server: String) -> String {
    if server.starts_with("http://") || server.starts_with("https://") {
        return server;
    }

    format!("http://{server}")
}

fn map_client_error(err: PostsClientError) -> anyhow::Error {
    let message = match err {
        PostsClientError::NotFound => "post not found".to_string(),
        PostsClientError::MethodNotAllowed => "posts cannot be modified".to_string(),
        PostsClientError::Server(message) => format!("server error: {message}"),
        PostsClientError::InvalidRequest(message) => format!("invalid request: {message}"),
        PostsClientError::Http(err) => format!("HTTP error: {err}"),
    };
    anyhow::anyhow!(message)
}

fn print_post(title: &str, post: &Post) {
    println!("{title}");
    println!("id: {}", post.id);
    println!("title: {}", post.title);
    println!("author: {}", post.author);
    println!("timestamp: {}", post.timestamp);
    println!("published: {}", post.is_published);
    if let Some(published_date) = post.published_date {
        println!("published_date: {published_date}");
    }
}

fn print_list(posts: &[Post]) {
    println!("Posts: {}", posts.len());

    for post in posts {
        let state = if post.is_published { "published" } else { "draft" };
        println!(
            "- [{}] {} (author={}, {state})",
            post.id, post.title, post.author
        );
    }
}
