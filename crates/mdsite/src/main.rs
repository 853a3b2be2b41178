use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

use mdsite::site;

#[derive(Parser)]
#[command(name = "mdsite")]
#[command(about = "Generate a static HTML site from Markdown files")]
struct Cli {
    /// Directory copied verbatim into the output directory
    #[arg(long, default_value = "static")]
    static_dir: PathBuf,

    /// Directory containing the Markdown pages
    #[arg(long, default_value = "content")]
    content_dir: PathBuf,

    /// HTML template with {{ Title }} and {{ Content }} placeholders
    #[arg(long, default_value = "template.html")]
    template: PathBuf,

    /// Output directory, deleted and recreated on every run
    #[arg(short, long, default_value = "public")]
    output_dir: PathBuf,

    /// Log every copied file
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    if let Err(e) = run(&cli) {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    site::copy_tree(&cli.static_dir, &cli.output_dir)?;
    let pages = site::generate_pages(&cli.content_dir, &cli.template, &cli.output_dir)?;
    log::info!("Generated {pages} page(s) in {}", cli.output_dir.display());
    Ok(())
}
