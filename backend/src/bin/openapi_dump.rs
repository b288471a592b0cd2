//! Print the OpenAPI document as JSON.

use bookstore::doc::ApiDoc;
use clap::Parser;
use utoipa::OpenApi;

/// Command-line flags for `openapi-dump`.
#[derive(Debug, Parser)]
#[command(about = "Print the bookstore OpenAPI document")]
struct Args {
    /// Emit single-line JSON instead of pretty-printed output.
    #[arg(long)]
    compact: bool,
}

#[allow(clippy::print_stdout, reason = "the document is the program's output")]
fn main() -> Result<(), serde_json::Error> {
    let args = Args::parse();
    let doc = ApiDoc::openapi();
    let json = if args.compact {
        doc.to_json()?
    } else {
        doc.to_pretty_json()?
    };
    println!("{json}");
    Ok(())
}
