// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand};
use notion_blog::utils::logging::{format_error, format_info, format_success, format_warning};
use notion_blog::{
    Config, ExportOptions, HealthCheck, HealthReport, HealthStatus, MarkdownExporter,
    OperationTimer, PostRepository, Validator,
};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "notion_blog")]
#[command(author = "cipher")]
#[command(version)]
#[command(about = "Fetch Notion blog posts as metadata and markdown", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = "NOTION_BLOG_CONFIG",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List published posts, newest first
    List {
        #[arg(long)]
        json: bool,
    },

    /// Print one post by slug
    Post {
        slug: String,

        #[arg(long)]
        json: bool,

        /// Render nested blocks as well
        #[arg(long)]
        full: bool,
    },

    /// Write every published post to disk
    Export {
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(short, long)]
        pretty: bool,

        #[arg(long)]
        html: bool,
    },

    /// Check that the database is reachable with the configured token
    Verify,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    notion_blog::utils::logging::init_logger(cli.color, cli.verbose);

    if !cli.config.exists() {
        info!(
            "Config file {} not found, using environment only",
            cli.config.display()
        );
    }

    let config =
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?;

    match cli.command {
        Commands::List { json } => {
            cmd_list(&config, json).await?;
        }
        Commands::Post { slug, json, full } => {
            cmd_post(&config, &slug, json, full).await?;
        }
        Commands::Export {
            output,
            pretty,
            html,
        } => {
            cmd_export(&config, output, pretty, html, cli.color).await?;
        }
        Commands::Verify => {
            cmd_verify(&config).await?;
        }
    }

    Ok(())
}

async fn cmd_list(config: &Config, json: bool) -> Result<()> {
    let repository = PostRepository::from_config(config);
    let timer = OperationTimer::new("list published posts");

    let posts = repository
        .list_published()
        .await
        .context("Failed to list published posts")?;

    timer.warn_if_slow(Duration::from_secs(10));
    timer.finish_with_count(posts.len());

    if json {
        println!("{}", serde_json::to_string_pretty(&posts)?);
        return Ok(());
    }

    if posts.is_empty() {
        println!("{}", format_warning("No published posts"));
        return Ok(());
    }

    for post in &posts {
        println!(
            "{}  {}  {}",
            post.date.format("%Y-%m-%d"),
            post.slug,
            post.title
        );
        if !post.tags.is_empty() {
            println!("            tags: {}", post.tags.join(", "));
        }
        if let Some(description) = &post.description {
            println!("            {}", Validator::truncate_text(description, 80));
        }
    }

    println!(
        "\n{}",
        format_success(&format!("{} published posts", posts.len()))
    );
    Ok(())
}

async fn cmd_post(config: &Config, slug: &str, json: bool, full: bool) -> Result<()> {
    let repository = PostRepository::from_config(config);

    let Some(bundle) = repository
        .find_post_by_slug(slug)
        .await
        .with_context(|| format!("Failed to fetch post '{}'", slug))?
    else {
        bail!("No post with slug '{}'", slug);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&bundle)?);
    } else if full {
        println!("{}", bundle.render());
    } else {
        println!("{}", bundle.md_string);
    }

    let nested = bundle.nested().count();
    if nested > 0 && !json && !full {
        eprintln!(
            "{}",
            format_info(&format!(
                "{} blocks have nested content, use --full to include it",
                nested
            ))
        );
    }

    Ok(())
}

async fn cmd_export(
    config: &Config,
    output: Option<PathBuf>,
    pretty: bool,
    html: bool,
    color: bool,
) -> Result<()> {
    let output_dir = output.unwrap_or_else(|| config.export.output_dir.clone());
    let repository = PostRepository::from_config(config);
    let exporter = MarkdownExporter::new(&output_dir)
        .with_context(|| format!("Cannot use output directory {}", output_dir.display()))?;

    let options = ExportOptions {
        pretty: pretty || config.export.pretty,
        html: html || config.export.html,
        show_progress: true,
        colored: color,
    };

    let timer = OperationTimer::new("export posts");
    let (manifest, stats) = exporter
        .export_all(&repository, &options)
        .await
        .context("Export failed")?;
    timer.finish_with_count(manifest.total_posts);

    println!(
        "{}",
        format_success(&format!(
            "Exported {} posts ({} bytes) to {}",
            stats.posts_exported,
            stats.bytes_written,
            exporter.output_dir().display()
        ))
    );

    if !manifest.failed_posts.is_empty() {
        warn!("Failed posts: {}", manifest.failed_posts.join(", "));
        println!(
            "{}",
            format_warning(&format!(
                "{} posts failed ({:.1}% success)",
                stats.posts_failed,
                stats.success_rate()
            ))
        );
    }

    Ok(())
}

async fn cmd_verify(config: &Config) -> Result<()> {
    let repository = PostRepository::from_config(config);
    let mut checks = Vec::new();

    let start = Instant::now();
    let check = match repository.probe().await {
        Ok(0) => HealthCheck::degraded(
            "notion_database",
            "Database is reachable but returned no pages".to_string(),
            start.elapsed(),
        ),
        Ok(_) if start.elapsed() > Duration::from_secs(5) => HealthCheck::degraded(
            "notion_database",
            "Database responded slowly".to_string(),
            start.elapsed(),
        ),
        Ok(_) => HealthCheck::healthy("notion_database", start.elapsed()),
        Err(e) => HealthCheck::unhealthy("notion_database", e.to_string(), start.elapsed()),
    };
    checks.push(check);

    let report = HealthReport::new(checks, env!("CARGO_PKG_VERSION").to_string());
    print!("{}", report.format());

    match report.overall_status {
        HealthStatus::Healthy => {}
        HealthStatus::Degraded => {
            println!("{}", format_warning("Verification finished with warnings"))
        }
        HealthStatus::Unhealthy => println!("{}", format_error("Notion database is unreachable")),
    }

    Ok(())
}
