use anyhow::{Context, Result};
use clap::Parser;
use sendbench::cli::{Cli, Command, GenerateArgs, OutputFormat, ParseArgs, VerifyArgs};
use sendbench::csv_output::CsvOutput;
use sendbench::json_output::JsonOutput;
use sendbench::{
    generate_fixtures, reconstruct_file, text_output, verify_transfer, FieldSchema, FileFilter,
    FixtureConfig,
};
use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber; `--debug` raises the level to TRACE
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_schema(args: &ParseArgs) -> Result<FieldSchema> {
    let schema = match &args.schema {
        Some(path) => FieldSchema::from_toml(path)
            .with_context(|| format!("Failed to load field schema {}", path.display()))?,
        None => FieldSchema::default_send_log().context("Built-in field schema is invalid")?,
    };

    match &args.terminator {
        Some(name) => schema
            .with_terminator(name)
            .with_context(|| format!("Cannot use '{}' as the terminator field", name)),
        None => Ok(schema),
    }
}

fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create output directory for {}", path.display())
                    })?;
                }
            }
            fs::write(path, content)
                .with_context(|| format!("Failed to write output file {}", path.display()))
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}

fn run_parse(args: ParseArgs) -> Result<()> {
    let schema = load_schema(&args)?;

    let (mut dataset, stats) = reconstruct_file(&args.log, &schema)
        .with_context(|| format!("Failed to reconstruct records from {}", args.log.display()))?;

    if let Some(columns) = &args.columns {
        if let Some(unknown) = columns.iter().find(|c| schema.field(c).is_none()) {
            anyhow::bail!(
                "Unknown column '{}'. Known fields: {}",
                unknown,
                schema.field_names().collect::<Vec<_>>().join(", ")
            );
        }
        let present: Vec<&str> = columns
            .iter()
            .map(String::as_str)
            .filter(|c| {
                let seen = dataset.has_column(c);
                if !seen {
                    tracing::warn!(column = %c, "no record logged this field; column omitted");
                }
                seen
            })
            .collect();
        dataset = dataset.select(&present)?;
    }

    let rendered = match args.format {
        OutputFormat::Text => text_output::render_table(&dataset),
        OutputFormat::Json => {
            let mut json = JsonOutput::new(&dataset).to_json()?;
            json.push('\n');
            json
        }
        OutputFormat::Csv => CsvOutput::new(&dataset).to_csv()?,
    };
    write_output(args.output.as_deref(), &rendered)?;

    eprintln!(
        "Reconstructed {} records from {} lines{}",
        stats.records_sealed,
        stats.lines_read,
        if stats.incomplete_dropped {
            " (dropped an unterminated trailing block)"
        } else {
            ""
        }
    );
    Ok(())
}

fn run_generate(args: GenerateArgs) -> Result<()> {
    let config = FixtureConfig {
        dir: args.dir,
        count: args.count,
        unit: args.unit,
        prefix: args.prefix,
    };

    let paths = generate_fixtures(&config)
        .with_context(|| format!("Failed to generate fixtures in {}", config.dir.display()))?;
    for path in &paths {
        println!("{}", path.display());
    }
    eprintln!("Generated {} files in {}", paths.len(), config.dir.display());
    Ok(())
}

fn run_verify(args: VerifyArgs) -> Result<()> {
    if args.no_color || !io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let filter = FileFilter {
        prefix: args.prefix,
        suffix: args.suffix,
    };
    let report = verify_transfer(&args.sent, &args.received, &filter)
        .with_context(|| format!("Failed to verify files in {}", args.sent.display()))?;

    print!("{}", report);

    if args.strict && !report.all_passed() {
        anyhow::bail!(
            "{} of {} files failed verification",
            report.failed(),
            report.checks().len()
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.debug);

    match cli.command {
        Command::Parse(args) => run_parse(args),
        Command::Generate(args) => run_generate(args),
        Command::Verify(args) => run_verify(args),
    }
}
