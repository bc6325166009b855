//! Resume Merger
//!
//! Opens a small window that merges a resume and a cover letter into one
//! PDF. The `merge` subcommand does the same from the terminal.

use std::path::PathBuf;
use std::process;

use anyhow::{anyhow, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use resume_merger::config::{ExecutorChoice, ExternalLink, Settings};
use resume_merger::session::MergeSession;
use resume_merger::surface::{Banner, MergeFlow};
use resume_merger::window::{self, MergerWindow};
use resume_merger::MergeRequest;

/// Resume Merger - combine a resume and a cover letter into one PDF
#[derive(Parser)]
#[command(name = "resume-merger")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Open the window
    resume-merger

    # Merge from the terminal without opening the result
    resume-merger --open-result false merge --resume cv.pdf --cover-letter letter.pdf -o Resume.pdf

    # Use a different executor program
    resume-merger --executor ./my-merger merge --resume cv.pdf --cover-letter cl.pdf -o out.pdf")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Merge executor program (defaults to merge-executor next to this binary)
    #[arg(long, global = true, env = "RESUME_MERGER_EXECUTOR")]
    executor: Option<PathBuf>,

    /// Merge inside this process instead of starting an executor (overrides --executor)
    #[arg(long, global = true)]
    in_process: bool,

    /// Open the merged PDF after a successful merge
    #[arg(
        long,
        global = true,
        env = "RESUME_MERGER_OPEN_RESULT",
        default_value_t = true,
        action = ArgAction::Set
    )]
    open_result: bool,

    /// Footer link shown in the window, as LABEL=URL (repeatable)
    #[arg(long = "link", global = true, value_name = "LABEL=URL")]
    links: Vec<ExternalLink>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the merge window (default)
    Window,

    /// Merge two PDFs without opening the window
    Merge {
        /// Resume PDF (first in the output)
        #[arg(long)]
        resume: PathBuf,

        /// Cover letter PDF (second in the output)
        #[arg(long)]
        cover_letter: PathBuf,

        /// Output PDF file path
        #[arg(short, long)]
        output: PathBuf,
    },
}

impl Cli {
    fn settings(&self) -> Settings {
        let executor = match (&self.executor, self.in_process) {
            (_, true) => ExecutorChoice::InProcess,
            (Some(program), false) => ExecutorChoice::Program(program.clone()),
            (None, false) => ExecutorChoice::Bundled,
        };

        Settings {
            executor,
            open_on_success: self.open_result,
            links: self.links.clone(),
        }
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    let settings = cli.settings();
    tracing::debug!(?settings, "resolved settings");

    let result = match cli.command {
        None | Some(Commands::Window) => cmd_window(&settings),
        Some(Commands::Merge {
            resume,
            cover_letter,
            output,
        }) => cmd_merge(&settings, MergeRequest::new(resume, cover_letter, output)),
    };

    match result {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

/// Run the window until it is closed
fn cmd_window(settings: &Settings) -> Result<bool> {
    let flow = MergeFlow::new(MergeSession::new(settings.dispatcher()));
    let window = MergerWindow::new(flow, settings.opener(), settings.links.clone());

    window::run(window).map_err(|e| anyhow!("Window failed: {}", e))?;
    Ok(true)
}

/// Dispatch one request and print the banner; `false` on an error result
fn cmd_merge(settings: &Settings, request: MergeRequest) -> Result<bool> {
    let result = settings.dispatcher().dispatch(&request);
    let banner = Banner::from(&result);

    if result.is_success() {
        println!("{}", banner.headline());
    } else {
        eprintln!("{}", banner.headline());
    }

    Ok(result.is_success())
}
