use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use act_idl::config::{DEFAULT_DIFF_OUTPUT, TOOL_VERSION};
use act_idl::{
    diff_files, load_and_validate, write_diff, Config, DiffFormat, LoadOptions, SchemaMode,
};

#[derive(Parser)]
#[command(name = "act")]
#[command(version = TOOL_VERSION)]
#[command(about = "Validate ACT component descriptions and diff API versions", long_about = None)]
struct Cli {
    /// Component description file
    file: PathBuf,

    /// Diff against another description instead of only validating
    #[arg(short, long, value_name = "OTHER")]
    diff: Option<PathBuf>,

    /// Where to write the diff
    #[arg(long, env = "ACT_DIFF_OUTPUT", default_value = DEFAULT_DIFF_OUTPUT)]
    diff_output: PathBuf,

    /// Diff output format
    #[arg(long, value_enum, default_value_t = DiffFormat::Xml)]
    format: DiffFormat,

    /// Document grammar check
    #[arg(long, value_enum, env = "ACT_SCHEMA_MODE", default_value_t = SchemaMode::Warn)]
    schema: SchemaMode,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            load: LoadOptions::new().with_schema(self.schema),
            diff_output: self.diff_output.clone(),
            diff_format: self.format,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.config();

    let Some(other) = &cli.diff else {
        let component = load_and_validate(&cli.file, &config)?;
        let model = &component.model;
        println!(
            "✓ {} - {} {} OK ({} classes, {} imports)",
            cli.file.display(),
            model.namespace,
            model.version,
            model.classes.len(),
            model.imported.len()
        );
        return Ok(());
    };

    let script = diff_files(&cli.file, other, &config)?;
    let rendered = write_diff(&script, &config)?;
    println!("{}", rendered);

    if cli.verbose {
        eprintln!(
            "wrote {} diff entries to {}",
            script.len(),
            config.diff_output.display()
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Messages already embed their causes
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
