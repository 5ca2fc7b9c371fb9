use chrono::Datelike;
use clap::{Parser, Subcommand};
use digest_press::{config, content, generate, logging, output, scaffold};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "digest-press")]
#[command(about = "Static site generator for daily news digests")]
#[command(long_about = "\
Static site generator for daily news digests

Every markdown file in the content directory is one digest. Its YAML
frontmatter must carry a title, a pubDate and a description; a single
invalid file stops the build before anything is written.

Content structure:

  content/
  ├── config.toml        # Site title, base URL, colors (optional)
  ├── assets/            # Copied verbatim to the output root (optional)
  ├── 2025-06-06.md      # One digest per file, slug = file stem
  └── 2025-06-07.md

Digest file:

  ---
  title: \"News Digest - June 7, 2025\"
  pubDate: \"2025-06-07\"
  description: \"Top AI stories of the day.\"
  ---

  ## 🧠 Summary

  First line here becomes the excerpt on the listing page.

Run 'digest-press new' to scaffold today's digest and 'digest-press
gen-config' to print a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate content and render the site
    Build,
    /// Validate content without writing anything
    Check,
    /// Create the digest file for a day
    New {
        /// Day to create (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Overwrite an existing digest file
        #[arg(short, long)]
        force: bool,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Command::Build => {
            println!("==> Loading {}", cli.source.display());
            let manifest = content::load(&cli.source)?;
            output::print_load_output(&manifest, &cli.source);

            println!("==> Generating HTML → {}", cli.output.display());
            let year = chrono::Local::now().year();
            let report = generate::generate(&manifest, &cli.output, year)?;
            output::print_generate_output(&report);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = content::load(&cli.source)?;
            output::print_load_output(&manifest, &cli.source);
            println!("==> Content is valid");
        }
        Command::New { date, force } => {
            let date = match date {
                Some(value) => scaffold::parse_date_arg(&value)?,
                None => chrono::Local::now().date_naive(),
            };
            let path = scaffold::new_digest(&cli.source, date, force)?;
            println!("Created {}", path.display());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
