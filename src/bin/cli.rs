//! CLI binary for paperscribe.
//!
//! Tracing goes to stderr so stdout carries only results.

use anyhow::Context;
use clap::{Parser, Subcommand};
use paperscribe::graph::PaperGraph;
use paperscribe::output::save_blog;
use paperscribe::{ScribeConfig, SearchSource, Workflow};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// paperscribe: find a research paper, analyse it and draft a blog post.
#[derive(Parser)]
#[command(name = "paperscribe", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Command,
}

/// Available commands.
#[derive(Subcommand)]
enum Command {
    /// Search for papers and print the ranked list.
    Search {
        /// Research topic (prompted for when omitted).
        topic: Option<String>,

        /// Paper source: arxiv or google_scholar.
        #[arg(long)]
        source: Option<SearchSource>,

        /// Number of papers to keep after ranking.
        #[arg(short = 'n', long)]
        max_results: Option<usize>,

        /// Print the paper graph as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Search, select a paper, analyse it and write a blog post.
    Run {
        /// Research topic (prompted for when omitted).
        topic: Option<String>,

        /// Paper source: arxiv or google_scholar.
        #[arg(long)]
        source: Option<SearchSource>,

        /// Paper to use, numbered from 1 as listed by `search`.
        #[arg(short, long, default_value_t = 1)]
        paper: usize,

        /// Save the blog post to a Markdown file.
        #[arg(long)]
        save: bool,

        /// Directory for the saved blog post (overrides the config).
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Write the default configuration file.
    InitConfig {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("paperscribe=info,paper_search=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::InitConfig { force } => init_config(cli.config, force),
        Command::Search {
            topic,
            source,
            max_results,
            json,
        } => {
            let mut config = ScribeConfig::load(cli.config.as_deref())?;
            apply_search_overrides(&mut config, source, max_results);
            let topic = resolve_topic(topic, &config)?;
            run_search(&config, &topic, json).await
        }
        Command::Run {
            topic,
            source,
            paper,
            save,
            output_dir,
        } => {
            let mut config = ScribeConfig::load(cli.config.as_deref())?;
            apply_search_overrides(&mut config, source, None);
            if let Some(dir) = output_dir {
                config.output.directory = dir;
            }
            let topic = resolve_topic(topic, &config)?;
            run_pipeline(&config, &topic, paper.saturating_sub(1), save).await
        }
    }
}

fn apply_search_overrides(
    config: &mut ScribeConfig,
    source: Option<SearchSource>,
    max_results: Option<usize>,
) {
    if let Some(source) = source {
        config.search.source = source;
    }
    if let Some(max) = max_results {
        config.search.max_results = max;
        config.search.candidate_pool = config.search.candidate_pool.max(max);
    }
}

/// Use the topic argument, else prompt on stdin, else the configured default.
fn resolve_topic(topic: Option<String>, config: &ScribeConfig) -> anyhow::Result<String> {
    if let Some(topic) = topic.filter(|t| !t.trim().is_empty()) {
        return Ok(topic.trim().to_owned());
    }

    let mut stderr = std::io::stderr();
    write!(
        stderr,
        "Enter a research topic (default: {}): ",
        config.default_topic
    )?;
    stderr.flush()?;

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read topic from stdin")?;

    let answer = line.trim();
    if answer.is_empty() {
        Ok(config.default_topic.clone())
    } else {
        Ok(answer.to_owned())
    }
}

async fn run_search(config: &ScribeConfig, topic: &str, json: bool) -> anyhow::Result<()> {
    let scored = paper_search::search_scored(topic, &config.search).await?;

    if json {
        let graph = PaperGraph::from_scored(paper_search::build_query(topic), &scored);
        println!("{}", graph.to_json()?);
        return Ok(());
    }

    if scored.is_empty() {
        println!("No papers found for \"{topic}\".");
        return Ok(());
    }

    println!(
        "Top {} papers on \"{topic}\" from {}:\n",
        scored.len(),
        config.search.source
    );
    for (i, entry) in scored.iter().enumerate() {
        let paper = &entry.paper;
        let mut authors = paper
            .authors
            .iter()
            .take(3)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ");
        if paper.authors.len() > 3 {
            authors.push_str(" et al.");
        }
        println!("{}. {} (score {:.1})", i + 1, paper.title, entry.score);
        if !authors.is_empty() {
            println!("   {authors}");
        }
        if let Some(published) = paper.published {
            println!("   {}", published.format("%Y-%m-%d"));
        }
        if !paper.url.is_empty() {
            println!("   {}", paper.url);
        }
    }
    Ok(())
}

async fn run_pipeline(
    config: &ScribeConfig,
    topic: &str,
    paper_index: usize,
    save: bool,
) -> anyhow::Result<()> {
    let workflow = Workflow::from_config(config)?;
    let state = workflow.run(topic, paper_index).await?;

    if let Some(paper) = &state.selected_paper {
        println!("# Selected paper\n");
        println!("{} ({})\n", paper.title, paper.url);
    }
    println!("# Analysis\n\n{}\n", state.analysis);
    println!("# Blog post\n\n{}", state.blog_post);

    if save {
        let path = save_blog(&config.output.directory, topic, &state.blog_post)?;
        eprintln!("Blog post saved to {}", path.display());
    }
    Ok(())
}

fn init_config(path: Option<PathBuf>, force: bool) -> anyhow::Result<()> {
    let path = path.unwrap_or_else(ScribeConfig::default_config_path);
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    ScribeConfig::default()
        .save_to_file(&path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}
