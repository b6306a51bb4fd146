use std::error::Error;
use std::path::PathBuf;

use clap::Parser;

mod content;

const DEFAULT_OUTPUT: &str = "docs/Project_Documentation.pdf";

/// Renders the pdf_flow project documentation.
///
/// Every run regenerates the document from scratch. Set `RUST_LOG` to change log verbosity.
#[derive(Parser)]
#[command(author, version, about = "Render the pdf_flow project documentation to PDF")]
struct Cli {
    /// Where to write the PDF.
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        eprintln!("Error: {}", err);
        print_error_sources(err.as_ref());
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let builder = content::project_documentation();
    #[cfg(feature = "bookmarks")]
    let builder = builder.with_bookmarks(true);

    let rendered = builder.save(&cli.output)?;
    log::info!(
        "wrote {} ({} pages, {} headings)",
        cli.output.display(),
        rendered.page_count,
        rendered.toc.len()
    );
    println!("{}", cli.output.display());
    Ok(())
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}
