use clap::{Parser, Subcommand, ValueEnum};
use immutable_gen::cmds;
use immutable_gen::schema::OptionOverrides;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "immutable-gen")]
#[command(about = "Immutable type and builder synthesis tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /* Synthesize every eligible type and write one output file per type */
    Generate {
        /* Input YAML schema files */
        #[arg(short = 'f', long = "files", value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /* Include directories for imported schema files */
        #[arg(short = 'i', long = "include-dir", value_name = "DIR")]
        include_dirs: Vec<PathBuf>,

        /* Output directory for generated files */
        #[arg(
            short = 'o',
            long = "output",
            value_name = "DIR",
            default_value = "generated"
        )]
        output_dir: PathBuf,

        /* Output format */
        #[arg(long = "format", value_enum, default_value = "outline")]
        format: OutputFormat,

        /* Name of the static default-instance member */
        #[arg(long = "default-member", value_name = "NAME")]
        default_member: Option<String>,

        /* Name of the nested builder type */
        #[arg(long = "builder-name", value_name = "NAME")]
        builder_name: Option<String>,

        /* Enable verbose output */
        #[arg(short = 'v', long = "verbose")]
        verbose: bool,
    },

    /* Show base resolution, flattened properties and diagnostics per type */
    Analyze {
        /* Input YAML schema files */
        #[arg(short = 'f', long = "files", value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /* Include directories for imported schema files */
        #[arg(short = 'i', long = "include-dir", value_name = "DIR")]
        include_dirs: Vec<PathBuf>,

        /* Print the member outline of a specific type */
        #[arg(long = "print-plan", value_name = "TYPE")]
        print_plan: Option<String>,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum OutputFormat {
    /* Readable member outline */
    Outline,
    /* Structured plan as JSON */
    Json,
    /* Structured plan as YAML */
    Yaml,
}

impl From<OutputFormat> for cmds::generate::Format {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Outline => cmds::generate::Format::Outline,
            OutputFormat::Json => cmds::generate::Format::Json,
            OutputFormat::Yaml => cmds::generate::Format::Yaml,
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            files,
            include_dirs,
            output_dir,
            format,
            default_member,
            builder_name,
            verbose,
        } => {
            init_tracing(verbose);
            let overrides = OptionOverrides {
                default_member,
                builder_name,
                ..OptionOverrides::default()
            };
            cmds::generate::run(files, include_dirs, output_dir, format.into(), overrides, verbose)?;
        }

        Commands::Analyze {
            files,
            include_dirs,
            print_plan,
        } => {
            init_tracing(false);
            cmds::analyze::run(files, include_dirs, print_plan)?;
        }
    }

    Ok(())
}
