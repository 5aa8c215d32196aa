use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::Parser;

use trendcrawl::{store, ExtractionSpec, RenderConfig, RenderRequest, Renderer, StaticRenderer};

/// Render a page to its scrolled-out state and extract named node sets
#[derive(Parser, Debug)]
#[command(name = "trendcrawl", version, about)]
struct Args {
    /// Target address
    url: String,

    /// Structural selector; repeat once per field
    #[arg(long = "select", required = true)]
    selectors: Vec<String>,

    /// Field name for the matching --select, in the same order
    #[arg(long = "name", required = true)]
    names: Vec<String>,

    /// Page-load timeout in milliseconds
    #[arg(long, default_value_t = 5000)]
    timeout_ms: u64,

    /// Stop after this many observed content changes (0 = unbounded)
    #[arg(long, default_value_t = 0)]
    scroll_limit: u32,

    /// Fetch once over HTTP instead of driving a browser
    #[arg(long)]
    no_scroll: bool,

    /// Write the extracted text table to this JSON file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn run(args: Args) -> trendcrawl::Result<()> {
    let selectors: Vec<&str> = args.selectors.iter().map(String::as_str).collect();
    let names: Vec<&str> = args.names.iter().map(String::as_str).collect();
    let spec = ExtractionSpec::from_pairs(&selectors, &names)?;

    let config = RenderConfig {
        nav_timeout_ms: args.timeout_ms,
        ..Default::default()
    };

    let renderer: Box<dyn Renderer> = if args.no_scroll {
        Box::new(StaticRenderer::new(config))
    } else {
        #[cfg(feature = "browser")]
        {
            Box::new(trendcrawl::ChromeRenderer::new(config))
        }
        #[cfg(not(feature = "browser"))]
        {
            eprintln!("Built without the browser backend; fetching without scrolling");
            Box::new(StaticRenderer::new(config))
        }
    };

    let request = RenderRequest::new(&args.url)?
        .timeout_budget(Duration::from_millis(args.timeout_ms))
        .scroll_limit(args.scroll_limit);

    let doc = renderer.render(&request)?;
    let table = trendcrawl::extract(&doc, &spec);

    let json = table.to_json_texts();
    match &args.output {
        Some(path) => store::write_json_atomic(path, &json)?,
        None => println!("{}", serde_json::to_string_pretty(&json)?),
    }

    Ok(())
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("trendcrawl: {}", e);
        process::exit(1);
    }
}
