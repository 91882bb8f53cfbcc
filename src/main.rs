use bosworth_scanner::{
    open_corpus, page_text, scan_pages, AbbreviationTable, EntryParser, PageSink,
    PartOfSpeechTable, ScanError, Stats,
};
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::process::ExitCode;

/// Output layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// One pretty-printed JSON file per page plus index.json
    Dir,
    /// One JSON object per page, one page per line
    Jsonl,
}

#[derive(Parser)]
#[command(name = "bosworth-scanner")]
#[command(about = "Converts the SGML-tagged Bosworth-Toller corpus into per-page JSON")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse every page of the corpus and write JSON output
    Compile {
        /// Corpus file (.txt or .txt.bz2)
        corpus: PathBuf,

        /// YAML abbreviation document (source headings and their spellings)
        #[arg(short, long)]
        abbreviations: PathBuf,

        /// Output directory (dir format) or file (jsonl format)
        #[arg(short, long, default_value = "data")]
        output: PathBuf,

        /// Output layout
        #[arg(short, long, value_enum, default_value_t = Format::Dir)]
        format: Format,

        /// Path to a part-of-speech schema YAML file (default: built-in table)
        #[arg(long)]
        pos_schema: Option<PathBuf>,

        /// Limit number of pages to write (for testing)
        #[arg(long)]
        page_limit: Option<usize>,

        /// Quiet mode - warnings and errors only
        #[arg(short, long)]
        quiet: bool,
    },

    /// Print the raw lines of a single page
    PageText {
        /// Corpus file (.txt or .txt.bz2)
        corpus: PathBuf,

        /// Page number as it appears in the marker, e.g. b0004
        number: String,
    },
}

fn init_logging(quiet: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn print_stats(stats: &Stats, pages_written: usize) {
    println!();
    println!("============================================================");
    println!("Lines read: {}", stats.lines_read);
    println!("Pages scanned: {}", stats.pages);
    println!("Pages written: {}", pages_written);
    println!("Entries parsed: {}", stats.entries);
    println!("Avg entries/page: {:.2}", stats.entries as f64 / stats.pages.max(1) as f64);
    println!("------------------------------------------------------------");
    println!("Examples: {}", stats.examples);
    println!("References: {}", stats.references);
    println!("Skipped (not an entry): {}", stats.skipped);
    println!("Before first page: {}", stats.orphaned);
    println!("Time: {}m {}s", stats.elapsed.as_secs() / 60, stats.elapsed.as_secs() % 60);
    println!("============================================================");
}

fn run_compile(
    corpus: PathBuf,
    abbreviations: PathBuf,
    output: PathBuf,
    format: Format,
    pos_schema: Option<PathBuf>,
    page_limit: Option<usize>,
    quiet: bool,
) -> Result<(), ScanError> {
    let abbreviations = AbbreviationTable::load(&abbreviations)?;
    let parts_of_speech = match &pos_schema {
        Some(path) => PartOfSpeechTable::load(path)?,
        None => PartOfSpeechTable::default(),
    };
    let parser = EntryParser::new(&abbreviations, &parts_of_speech);

    if !quiet {
        println!("Parsing: {}", corpus.display());
        println!("Output: {} ({:?})", output.display(), format);
        if let Some(limit) = page_limit {
            println!("Page limit: {}", limit);
        }
        println!();
    }

    let reader = open_corpus(&corpus)?;
    let mut sink = match format {
        Format::Dir => PageSink::directory(&output)?,
        Format::Jsonl => PageSink::lines(&output)?,
    };

    let pb = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} {msg}") {
            pb.set_style(style);
        }
        pb
    };

    let mut pages_written = 0;
    let mut write_error = None;

    let stats = scan_pages(reader, &parser, |page| {
        if page_limit.is_some_and(|limit| pages_written >= limit) {
            return false;
        }
        if let Err(e) = sink.write_page(&page) {
            write_error = Some(e);
            return false;
        }
        pages_written += 1;
        if pages_written % 50 == 0 {
            pb.set_message(format!("Pages: {} | Last: {}", pages_written, page.number));
        }
        page_limit.map_or(true, |limit| pages_written < limit)
    })?;

    if let Some(e) = write_error {
        pb.abandon();
        return Err(e);
    }

    sink.finish()?;
    pb.finish_and_clear();

    if !quiet {
        print_stats(&stats, pages_written);
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let result = match args.command {
        Command::Compile {
            corpus,
            abbreviations,
            output,
            format,
            pos_schema,
            page_limit,
            quiet,
        } => {
            init_logging(quiet);
            run_compile(corpus, abbreviations, output, format, pos_schema, page_limit, quiet)
        }
        Command::PageText { corpus, number } => {
            init_logging(true);
            open_corpus(&corpus)
                .and_then(|reader| page_text(reader, &number))
                .map(|text| match text {
                    Some(text) => println!("{}", text),
                    None => {
                        eprintln!("Error: page {} not found in {}", number, corpus.display());
                        std::process::exit(1);
                    }
                })
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
