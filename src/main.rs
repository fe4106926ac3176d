use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use yt_archive::analytics;
use yt_archive::config::{self, ArchiveConfig};
use yt_archive::db::{schema, Database};
use yt_archive::output::chart::{ChartSink, TerminalBarChart};
use yt_archive::output::{json as json_out, table};
use yt_archive::pipeline::TranscriptPipeline;
use yt_archive::prompt;
use yt_archive::provider::ytdlp::YtDlp;
use yt_archive::provider::{validate_url, VideoDownloader};
use yt_archive::sink::{Sink, SinkKind};
use yt_archive::transcript::CaptionFormat;

const CHART_WIDTH: usize = 60;

#[derive(Parser)]
#[command(name = "yta", version, about = "Archive YouTube transcripts and chart their most spoken words")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Path to database file (default: ~/.yt-archive/archive.db)
    #[arg(long, global = true, env = "YTA_DB")]
    db: Option<PathBuf>,

    /// Path to config file (default: ~/.yt-archive/config.toml)
    #[arg(long, global = true, env = "YTA_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a video's transcript and save it to a text file or the database
    Transcribe {
        /// Video URL (prompted for when omitted)
        url: Option<String>,

        /// Where to save: file or db
        #[arg(long)]
        sink: Option<String>,

        /// File format: text or json
        #[arg(long)]
        format: Option<String>,

        /// Directory for transcript files
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// Download a video
    Download {
        /// Video URL (prompted for when omitted)
        url: Option<String>,

        /// Output file (default: video title with .mp4)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Chart the most frequent dictionary words in transcript files
    Analyze {
        /// Transcript files or glob patterns (prompted for when omitted)
        paths: Vec<String>,

        /// Word list used to drop non-words
        #[arg(long)]
        words: Option<PathBuf>,

        /// Number of words to chart
        #[arg(long)]
        top: Option<usize>,
    },

    /// Create the archive tables if they don't exist
    InitDb,

    /// Manage the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write a default config file
    Init,
    /// Print the effective configuration
    Show,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let json_output = cli.json;
    let cfg = ArchiveConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Transcribe {
            url,
            sink,
            format,
            out_dir,
        } => {
            let url = match url {
                Some(u) => validate_url(&u)?.to_string(),
                None => ask_url(&cfg, "Please input the url to the video you wish to transcribe: ")?,
            };

            let format: CaptionFormat = format.as_deref().unwrap_or(&cfg.output.format).parse()?;
            let sink_kind: SinkKind = sink.as_deref().unwrap_or(&cfg.output.sink).parse()?;

            let provider = YtDlp::new(&cfg.provider);
            let db = match sink_kind {
                SinkKind::Database => Some(open_db(cli.db.as_deref(), &cfg)?),
                SinkKind::File => None,
            };
            let target = match &db {
                Some(db) => Sink::Database {
                    db,
                    segments_per_part: cfg.database.segments_per_part,
                },
                None => Sink::File {
                    dir: out_dir.unwrap_or_else(|| cfg.output.dir.clone()),
                },
            };

            let report = TranscriptPipeline::new(&provider, &provider, target, format)
                .run(&url)
                .with_context(|| format!("Failed to archive {url}"))?;

            if json_output {
                json_out::print_json(&report)?;
            } else {
                table::print_report(&report);
            }
        }

        Commands::Download { url, output } => {
            let url = match url {
                Some(u) => validate_url(&u)?.to_string(),
                None => ask_url(&cfg, "Please type the YT url of the video you wish to download: ")?,
            };

            let provider = YtDlp::new(&cfg.provider);
            match provider.download(&url, output.as_deref()) {
                Ok(path) => {
                    if json_output {
                        json_out::print_json(&serde_json::json!({
                            "url": url,
                            "saved": true,
                            "path": path.display().to_string(),
                        }))?;
                    } else {
                        println!("Video was saved successfully: {}", path.display());
                    }
                }
                Err(e) => {
                    if json_output {
                        json_out::print_json(&serde_json::json!({
                            "url": url,
                            "saved": false,
                            "error": e.to_string(),
                        }))?;
                    }
                    return Err(e).context("There was a problem in trying to save the video");
                }
            }
        }

        Commands::Analyze { paths, words, top } => {
            let paths = if paths.is_empty() {
                let mut stdin = std::io::stdin().lock();
                vec![prompt::prompt_for_path(
                    &mut stdin,
                    &mut std::io::stderr(),
                    "Please input the filename of the file you wish to plot text data from: ",
                    cfg.input.max_attempts,
                )?]
            } else {
                paths
            };

            let word_list = words.unwrap_or_else(|| cfg.analytics.word_list.clone());
            let dictionary = analytics::load_word_list(&word_list)
                .with_context(|| format!("Failed to load word list: {}", word_list.display()))?;
            let n = top.unwrap_or(cfg.analytics.top_n);

            let mut reports = Vec::new();
            for file in expand_paths(&paths)? {
                reports.push(analytics::analyze_file(&file, &dictionary, n)?);
            }

            if json_output {
                json_out::print_json(&reports)?;
            } else {
                let mut chart = TerminalBarChart::new(std::io::stdout(), CHART_WIDTH);
                for report in &reports {
                    chart.render(&report.title, &report.top)?;
                }
            }
        }

        Commands::InitDb => {
            let db = open_db(cli.db.as_deref(), &cfg)?;
            let tables = [schema::video_info(), schema::transcription_data()];
            if json_output {
                json_out::print_json(&serde_json::json!({
                    "db_path": db.path.display().to_string(),
                    "tables": tables.iter().map(|t| &t.name).collect::<Vec<_>>(),
                }))?;
            } else {
                println!("Database: {}", db.path.display());
                for t in &tables {
                    println!("  {:<20} {} rows", t.name, db.row_count(&t.name)?);
                }
            }
        }

        Commands::Config { action } => match action {
            ConfigAction::Init => {
                let path = match cli.config.as_deref() {
                    Some(p) => p.to_path_buf(),
                    None => config::config_path()?,
                };
                if config::init_config(Some(path.as_path()))? {
                    println!("Created {}", path.display());
                } else {
                    println!("Config already exists: {}", path.display());
                }
            }
            ConfigAction::Show => {
                print!("{}", cfg.to_toml()?);
            }
        },
    }

    Ok(())
}

fn ask_url(cfg: &ArchiveConfig, message: &str) -> Result<String> {
    let mut stdin = std::io::stdin().lock();
    Ok(prompt::prompt_for_url(
        &mut stdin,
        &mut std::io::stderr(),
        message,
        cfg.input.max_attempts,
    )?)
}

fn open_db(flag: Option<&Path>, cfg: &ArchiveConfig) -> Result<Database> {
    let path = match flag.or(cfg.database.path.as_deref()) {
        Some(p) => p.to_path_buf(),
        None => Database::default_db_path()?,
    };
    Database::open(&path).with_context(|| format!("Failed to open database: {}", path.display()))
}

/// Resolve plain paths and glob patterns to files.
fn expand_paths(paths: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path_str in paths {
        let path = Path::new(path_str);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }

        let matches: Vec<_> = glob::glob(path_str)
            .with_context(|| format!("Invalid path or glob pattern: {path_str}"))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();

        if matches.is_empty() {
            bail!("No files found matching: {path_str}");
        }
        files.extend(matches);
    }
    Ok(files)
}
