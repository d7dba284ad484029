use anyhow::Result;
use clap::{Parser, Subcommand};
use fixwidth_cli::{commands, parse_prefix_rule};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "fixwidth")]
#[command(about = "Fixwidth - Schema-driven fixed-width record codec", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List sources, record types and field windows of a schema
    Inspect {
        /// Schema document (YAML)
        #[arg(short, long)]
        schema: String,
    },

    /// Decode fixed-width lines into JSON
    Decode {
        /// Schema document (YAML)
        #[arg(short, long)]
        schema: String,

        /// Source name
        #[arg(long)]
        source: String,

        /// Record type shared by every line
        #[arg(short, long, conflicts_with = "detect", required_unless_present = "detect")]
        record_type: Option<String>,

        /// Detect the record type by leading text (PREFIX=TYPE, repeatable)
        #[arg(long, value_parser = parse_prefix_rule)]
        detect: Vec<(String, String)>,

        /// Input file, or - for stdin
        #[arg(short, long)]
        input: String,

        /// Output JSON file for decoded records
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Check every line against its record type
    Validate {
        /// Schema document (YAML)
        #[arg(short, long)]
        schema: String,

        /// Source name
        #[arg(long)]
        source: String,

        /// Record type
        #[arg(short, long)]
        record_type: String,

        /// Input file, or - for stdin
        #[arg(short, long)]
        input: String,
    },

    /// Encode a JSON array of objects into fixed-width lines
    Encode {
        /// Schema document (YAML)
        #[arg(short, long)]
        schema: String,

        /// Source name
        #[arg(long)]
        source: String,

        /// Record type
        #[arg(short, long)]
        record_type: String,

        /// Input JSON file (array of objects)
        #[arg(short, long)]
        input: String,

        /// Output file for encoded lines
        #[arg(short, long)]
        output: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    // Execute command
    match cli.command {
        Commands::Inspect { schema } => commands::inspect::execute(&schema),

        Commands::Decode {
            schema,
            source,
            record_type,
            detect,
            input,
            output,
        } => commands::decode::execute(
            &schema,
            &source,
            record_type.as_deref(),
            &detect,
            &input,
            output.as_deref(),
        ),

        Commands::Validate {
            schema,
            source,
            record_type,
            input,
        } => commands::validate::execute(&schema, &source, &record_type, &input),

        Commands::Encode {
            schema,
            source,
            record_type,
            input,
            output,
        } => commands::encode::execute(&schema, &source, &record_type, &input, &output),
    }
}
