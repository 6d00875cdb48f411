//! Grammatik CLI - German grammar exercise progression tracker.

mod catalog;

use std::path::PathBuf;
use anyhow::Result;
use clap::{Parser, Subcommand};
use grammatik_core::{Level, Topic, TopicList, LEVEL_ORDER};
use grammatik_progress::{get_next_level, CompletionStore, ProgressionEngine};
use grammatik_storage::JsonFileStore;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grammatik")]
#[command(about = "Track German grammar exercise completion and curriculum progression", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory holding persisted progress
    #[arg(short, long, global = true, default_value = ".grammatik")]
    storage: PathBuf,

    /// Exercise catalog (JSON array of exercises)
    #[arg(short, long, global = true)]
    catalog: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Mark an exercise as completed
    Complete {
        /// Exercise ID
        id: String,
        /// Level of the exercise
        #[arg(long)]
        level: Level,
        /// Topic tag (repeatable)
        #[arg(long = "topic")]
        topics: Vec<Topic>,
    },
    /// Show whether an exercise is completed
    Status {
        /// Exercise ID
        id: String,
    },
    /// List completed exercises
    List,
    /// Show the next incomplete topic after the given one
    NextTopic {
        #[arg(long)]
        level: Level,
        #[arg(long)]
        topic: Topic,
    },
    /// Show the level after the given one
    NextLevel {
        /// Level tag (case-insensitive)
        level: String,
    },
    /// Decide whether to advance from the given position
    Progression {
        #[arg(long)]
        level: Level,
        #[arg(long)]
        topic: Topic,
    },
    /// Recommend where to resume
    Recommend,
    /// Show per-topic progress
    Summary {
        /// Only this level
        #[arg(long)]
        level: Option<Level>,
    },
    /// Remove all completion data
    Clear,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut store = CompletionStore::new(JsonFileStore::new(&cli.storage)?);
    let catalog_path = cli.catalog.as_deref();

    match cli.command {
        Commands::Complete { id, level, topics } => {
            store.mark_exercise_completed(&id, level, &topics);
            println!("Completed: {} ({} | {})", id, level, TopicList(&topics));
        }
        Commands::Status { id } => {
            let data = store.get_completion_data();
            match data.get(&id) {
                Some(record) => {
                    println!("{}: DONE", id);
                    println!("  Level: {}", record.level);
                    println!("  Topics: {}", TopicList(&record.topics));
                    if let Some(at) = record.completed_at_time() {
                        println!("  Completed: {}", at);
                    }
                }
                None => println!("{}: OPEN", id),
            }
        }
        Commands::List => {
            let data = store.get_completion_data();
            println!("Completed exercises ({})", data.len());
            for record in data.iter() {
                println!("  {} | {} | {}",
                    record.exercise_id,
                    record.level,
                    TopicList(&record.topics),
                );
            }
        }
        Commands::NextTopic { level, topic } => {
            let exercises = catalog::require_catalog(catalog_path)?;
            let engine = ProgressionEngine::new(&store);
            match engine.get_next_topic(level, topic, &exercises) {
                Some(next) => println!("{}", next),
                None => println!("No incomplete topic after {} at {}", topic, level),
            }
        }
        Commands::NextLevel { level } => match get_next_level(&level) {
            Some(next) => println!("{}", next),
            None => println!("No level after {:?}", level),
        },
        Commands::Progression { level, topic } => {
            let exercises = catalog::require_catalog(catalog_path)?;
            let engine = ProgressionEngine::new(&store);
            let status = engine.get_current_progression(level, topic, &exercises);

            println!("Position: {} / {}", level, topic.label());
            match status.next_topic {
                Some(next) => println!("  Advance topic: yes -> {}", next.label()),
                None => println!("  Advance topic: no"),
            }
            match status.next_level {
                Some(next) => println!("  Advance level: yes -> {}", next),
                None => println!("  Advance level: no"),
            }
        }
        Commands::Recommend => {
            let exercises = catalog::require_catalog(catalog_path)?;
            let engine = ProgressionEngine::new(&store);
            let rec = engine.get_recommended_progression(&exercises);
            println!("{} / {}", rec.level, rec.topic);
        }
        Commands::Summary { level } => {
            let exercises = catalog::require_catalog(catalog_path)?;
            let engine = ProgressionEngine::new(&store);
            let levels: Vec<Level> = match level {
                Some(l) => vec![l],
                None => LEVEL_ORDER.to_vec(),
            };

            for level in levels {
                let summary = engine.get_level_summary(level, &exercises);
                let (completed, total) = summary.totals();
                println!("{} ({}/{}){}",
                    level,
                    completed,
                    total,
                    if summary.is_complete() { " DONE" } else { "" },
                );
                for topic in &summary.topics {
                    println!("  {:<14} {:>3}/{:<3} {:>5.1}%",
                        topic.topic.label(),
                        topic.completed,
                        topic.total,
                        topic.percentage(),
                    );
                }
            }
        }
        Commands::Clear => {
            store.clear_completion_data();
            println!("Cleared completion data");
        }
    }

    Ok(())
}
