use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use mdsite::Config;
use mdsite::site::{self, LogReporter};

#[derive(Parser)]
#[command(name = "mdsite")]
#[command(about = "Generate a static HTML site from Markdown")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Copy static assets and render every page
    Build {
        /// Site config file
        #[arg(short, long, default_value = "mdsite.toml")]
        config: PathBuf,

        /// Prefix for root-relative URLs, e.g. /repo-name/
        #[arg(long)]
        basepath: Option<String>,

        /// Directory of Markdown sources
        #[arg(long)]
        content: Option<PathBuf>,

        /// Directory of static assets
        #[arg(long = "static")]
        static_dir: Option<PathBuf>,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// HTML page template
        #[arg(long)]
        template: Option<PathBuf>,
    },
    /// Convert a single Markdown file to an HTML fragment
    Render {
        /// Input Markdown file
        input: PathBuf,

        /// Output HTML file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Build {
            config,
            basepath,
            content,
            static_dir,
            output,
            template,
        } => {
            let mut config = match Config::load(&config) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            };
            if let Some(basepath) = basepath {
                config.basepath = basepath;
            }
            if let Some(content) = content {
                config.content_dir = content;
            }
            if let Some(static_dir) = static_dir {
                config.static_dir = static_dir;
            }
            if let Some(output) = output {
                config.output_dir = output;
            }
            if let Some(template) = template {
                config.template = template;
            }

            match site::build_site(&config, &LogReporter) {
                Ok(pages) => log::info!(
                    "Built {} page(s) into {}",
                    pages,
                    config.output_dir.display()
                ),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Command::Render { input, output } => {
            let markdown = match fs::read_to_string(&input) {
                Ok(content) => content,
                Err(e) => {
                    eprintln!("Error reading {}: {}", input.display(), e);
                    std::process::exit(1);
                }
            };

            let html = match mdsite::markdown_to_html(&markdown) {
                Ok(html) => html,
                Err(e) => {
                    eprintln!("Error in {}: {}", input.display(), e);
                    std::process::exit(1);
                }
            };

            match output {
                Some(output) => {
                    if let Err(e) = fs::write(&output, html) {
                        eprintln!("Error writing {}: {}", output.display(), e);
                        std::process::exit(1);
                    }
                    log::info!("Created {}", output.display());
                }
                None => println!("{}", html),
            }
        }
    }
}
