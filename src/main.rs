use clap::{Parser, Subcommand};
use docsite::sidebar::SidebarBuilder;
use docsite::{config, output, site};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "docsite")]
#[command(about = "Documentation site configuration with generated sidebars")]
#[command(long_about = "\
Documentation site configuration with generated sidebars

Site metadata and navigation come from docsite.toml in the documentation
root. Each configured sidebar section is a folder of markdown files that
becomes one sidebar group.

Documentation structure:

  docs/
  ├── docsite.toml               # Site config (optional)
  └── resources/                 # Section \"resources\"
      ├── README.md              # Index page → \"\" entry (top-level only)
      ├── intro.md               # → \"intro.md\"
      └── 01-changes/            # Section \"resources/01-changes\"
          ├── README.md          # Skipped
          └── filters.md         # → \"01-changes/filters.md\"

Only regular files ending in .md are listed, README.md excluded (any case).
Pages keep directory listing order.

Run 'docsite gen-config' to print a documented docsite.toml.")]
#[command(version)]
struct Cli {
    /// Documentation root directory
    #[arg(long, default_value = "docs", global = true)]
    source: PathBuf,

    /// Enable debug logging (otherwise RUST_LOG, default warn)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build one sidebar group and print it as JSON
    Sidebar {
        /// Folder relative to the documentation root
        folder: String,
        /// Group title
        title: String,
    },
    /// Assemble the site configuration and write it as JSON
    Build {
        /// Output file
        #[arg(long, default_value = ".docsite/config.json")]
        output: PathBuf,
    },
    /// Assemble the site configuration without writing anything
    Check,
    /// Print a stock docsite.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Sidebar { folder, title } => {
            let group = SidebarBuilder::new(&cli.source).build(&folder, &title)?;
            println!("{}", serde_json::to_string_pretty(&group)?);
        }
        Command::Build { output: out_path } => {
            println!("==> Assembling {}", cli.source.display());
            let manifest = site::load(&cli.source)?;
            if let Some(parent) = out_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let json = serde_json::to_string_pretty(&manifest)?;
            std::fs::write(&out_path, json)?;
            output::print_site_output(&manifest);
            println!("==> Wrote {}", out_path.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = site::load(&cli.source)?;
            output::print_site_output(&manifest);
            println!("==> Configuration is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// `--verbose` enables debug logging, otherwise `RUST_LOG` decides with a
/// `warn` fallback. Logs go to stderr so JSON on stdout stays clean.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
