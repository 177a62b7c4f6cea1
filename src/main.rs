use clap::{Parser, Subcommand};
use rulegen::cli;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rulegen")]
#[command(about = "Generate DVM ruleset XML from Excel workbooks and declarative macro definitions")]
#[command(long_about = "Rulegen - DVM ruleset generation

Turns declarative macro definitions plus an Excel workbook into ruleset XML
documents. Definitions are auto-detected by sheet presence: every registered
macro whose target sheet exists in the workbook runs, producing one document
per filter partition.

COMMANDS:
  run   - Auto-detect applicable macros and write ruleset XML
  list  - List available macro definitions
  show  - Show the parsed configuration of one definition

EXAMPLES:
  rulegen run workbook.xlsx --release R2.1
  rulegen run workbook.xlsx --release R1.0 --dry-run
  rulegen list --macros-dir macros
  rulegen show int_assign --json")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Auto-detect and execute all applicable macros.

Every registered macro definition whose target sheet exists in the workbook
is executed. Each execution produces one XML document per filter partition;
a failing macro is reported alongside the others and never blocks them.

The release identifier picks the filter value set: legacy releases (202109,
R1.0*) use the old set, everything else the current one.

Use --dry-run to preview the run without writing files.")]
    /// Auto-detect applicable macros and write ruleset XML
    Run {
        /// Path to the Excel workbook (.xlsx)
        workbook: PathBuf,

        /// Directory holding macro definition documents
        #[arg(short, long, default_value = "macros", env = "RULEGEN_MACROS_DIR")]
        macros_dir: PathBuf,

        /// Directory to write produced XML files into
        #[arg(short, long, default_value = "out")]
        out_dir: PathBuf,

        /// Release identifier (drives the filter value set choice)
        #[arg(short, long, default_value = "")]
        release: String,

        /// Environment label (recorded in the run summary only)
        #[arg(short, long, default_value = "development")]
        environment: String,

        /// Preview the run without writing files
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Emit a JSON run summary instead of the text report
        #[arg(long)]
        json: bool,

        /// Show verbose progress
        #[arg(short, long)]
        verbose: bool,
    },

    /// List available macro definitions
    List {
        /// Directory holding macro definition documents
        #[arg(short, long, default_value = "macros", env = "RULEGEN_MACROS_DIR")]
        macros_dir: PathBuf,
    },

    /// Show the parsed configuration of one macro definition
    Show {
        /// Definition name (file stem)
        name: String,

        /// Directory holding macro definition documents
        #[arg(short, long, default_value = "macros", env = "RULEGEN_MACROS_DIR")]
        macros_dir: PathBuf,

        /// Emit the configuration as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            workbook,
            macros_dir,
            out_dir,
            release,
            environment,
            dry_run,
            json,
            verbose,
        } => cli::run(
            workbook,
            macros_dir,
            out_dir,
            release,
            environment,
            dry_run,
            json,
            verbose,
        )?,

        Commands::List { macros_dir } => cli::list(macros_dir)?,

        Commands::Show {
            name,
            macros_dir,
            json,
        } => cli::show(name, macros_dir, json)?,
    }

    Ok(())
}
