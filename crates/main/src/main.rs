use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

/// Renders and inspects the speech-therapy materials from the command line.
///
/// Text is transliterated to Latin unless a TrueType font is given with `--font` or the
/// `LOGOPED_FONT_PATH` environment variable.
#[derive(Parser)]
#[command(author, version, about = "Command line access to the logoped materials")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Regular TrueType face; overrides `LOGOPED_FONT_PATH`.
    #[arg(long, global = true)]
    font: Option<PathBuf>,

    /// Bold TrueType face; overrides `LOGOPED_BOLD_FONT_PATH`.
    #[arg(long, global = true)]
    bold_font: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the catalog.
    #[command(name = "list", aliases = ["ls"])]
    List,

    /// Render one material to a PDF file.
    #[command(name = "render")]
    Render {
        /// Material id, e.g. `games`.
        id: String,
        /// Output path; defaults to the catalog file name.
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Add one outline bookmark per entry (needs the `bookmarks` feature).
        #[arg(long)]
        bookmarks: bool,
    },

    /// Render every material into a directory.
    #[command(name = "render-all", aliases = ["render_all", "all"])]
    RenderAll {
        /// Output directory.
        #[arg(short, long, default_value = commands::DEFAULT_OUTPUT_DIR)]
        dir: PathBuf,
        /// Add one outline bookmark per entry (needs the `bookmarks` feature).
        #[arg(long)]
        bookmarks: bool,
    },

    /// Run one handler variant against a synthetic request and print the response.
    #[command(name = "invoke")]
    Invoke {
        /// Which handler to call.
        #[arg(value_enum)]
        variant: commands::Variant,
        /// Request method.
        #[arg(long, default_value = "GET")]
        method: String,
        /// Value of the `id` query parameter.
        #[arg(long)]
        id: Option<String>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let settings = commands::settings(cli.font, cli.bold_font);

    let result = match cli.command {
        Commands::List => commands::list(),
        Commands::Render {
            id,
            output,
            bookmarks,
        } => commands::render(&settings, &id, output, bookmarks),
        Commands::RenderAll { dir, bookmarks } => {
            commands::render_all(&settings, &dir, bookmarks)
        }
        Commands::Invoke {
            variant,
            method,
            id,
        } => commands::invoke(settings, variant, &method, id),
    };

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        print_error_sources(err.as_ref());
        std::process::exit(1);
    }
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}
