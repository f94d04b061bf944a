use clap::{Parser, Subcommand};
use docsync::{nav, output, sync};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "docsync")]
#[command(about = "Sync component documentation into a parent docs site")]
#[command(long_about = "\
Sync component documentation into a parent docs site

Copies a component's markdown tree into the parent site's components/
directory, rewrites relative links so they survive the move, and emits a
navigation fragment for insertion into the parent manifest.

Source structure:

  docs/
  ├── order.yml                # Ordering manifest (optional)
  ├── component.yml            # Display-name override (optional)
  ├── index.md                 # Always placed first in navigation
  ├── getting-started.md
  └── internals/               # Grouped under \"Internals\" in navigation
      ├── design.md
      └── wire-format.md

Ordering manifest (order.yml):

  - getting-started.md: Getting Started
  - advanced.md: Advanced Topics
  # - drafts.md: commented entries are skipped

With order.yml, navigation preserves manifest order; without one, every
markdown file is discovered and navigation is sorted by title.

Relative links like ](../index.md) are rewritten to the component's
absolute location (](/components/<name>/index/)); external URLs and
already-absolute paths are left untouched.

The navigation fragment prints to stdout, or substitutes the placeholder
%%<name>%% in a template via --template/--output.")]
#[command(version = version_string())]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Copy docs into the destination, rewriting links, and emit navigation
    Sync(SyncArgs),
    /// Validate the source tree and ordering manifest without writing
    Check(CheckArgs),
}

#[derive(clap::Args)]
struct SyncArgs {
    /// Component name, used in rewritten links and the navigation fragment
    component: String,

    /// Source directory containing the component's markdown docs
    source: PathBuf,

    /// Destination directory inside the parent docs tree (replaced wholesale)
    dest: PathBuf,

    /// Base indentation for the navigation fragment
    #[arg(long, default_value_t = 8)]
    indent: usize,

    /// Template file containing a %%<component>%% placeholder
    #[arg(long)]
    template: Option<PathBuf>,

    /// Write the substituted template here instead of stdout
    #[arg(long, requires = "template")]
    output: Option<PathBuf>,
}

#[derive(clap::Args)]
struct CheckArgs {
    /// Source directory containing the component's markdown docs
    source: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Sync(args) => {
            let report = sync::sync(&args.component, &args.source, &args.dest)?;
            output::print_sync_output(&report);

            let fragment = nav::synthesize(
                &args.component,
                &report.nav_docs,
                args.indent,
                report.ordered,
                report.display_name.as_deref(),
            );

            match args.template {
                Some(template_path) => {
                    if !template_path.is_file() {
                        return Err(format!(
                            "template file does not exist: {}",
                            template_path.display()
                        )
                        .into());
                    }
                    let template = std::fs::read_to_string(&template_path)?;
                    let substituted = nav::substitute(&template, &args.component, &fragment);
                    match args.output {
                        Some(output_path) => {
                            std::fs::write(&output_path, substituted)?;
                            println!("Wrote {}", output_path.display());
                        }
                        None => print!("{substituted}"),
                    }
                }
                None => {
                    println!();
                    println!("{fragment}");
                }
            }
        }
        Command::Check(args) => {
            println!("==> Checking {}", args.source.display());
            let resolution = sync::check(&args.source)?;
            output::print_check_output(&resolution);
            if resolution.warnings.is_empty() {
                println!("==> Content is valid");
            } else {
                println!(
                    "==> Completed with {} warning(s)",
                    resolution.warnings.len()
                );
            }
        }
    }

    Ok(())
}
