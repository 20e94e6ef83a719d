//! CLI binary for sii-converter.
//!
//! A thin shim over the library crate: `serve` runs the HTTP service,
//! `convert` runs one conversion on a local file.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use sii_converter::{
    convert, serve, ConversionRequest, ConversionResult, OutputFormat, Plugins, ServiceConfig,
    ServiceConfigBuilder,
};
use std::io::{self, Write};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"EXAMPLES:
  # Run the service on the default address (127.0.0.1:7071)
  sii-converter serve

  # Require ?code=<key> on every conversion request
  sii-converter serve --bind 0.0.0.0:8080 --function-key s3cret

  # Convert a request body captured from a client
  sii-converter convert body.json --format iso -o taskdata.zip

  # Convert a plain SII document (not yet wrapped in a JSON string)
  sii-converter convert shipment.json --raw --format adm -o adm.zip

  # Call the running service
  curl -X POST -H 'content-type: application/vnd.aggateway.adapt.iso+zip' \
       --data-binary @body.json http://127.0.0.1:7071/api/Converter -o taskdata.zip

ENVIRONMENT VARIABLES:
  SII_BIND              Listen address for `serve`
  SII_RESOURCES_DIR     Directory holding the codec lookup tables
  SII_WORK_DIR          Parent directory for per-request working directories
  SII_MAX_BODY_BYTES    Request body limit for `serve`
  SII_FUNCTION_KEY      Key required in the `code` query parameter
  RUST_LOG              Overrides --verbose / --quiet
"#;

/// Convert shipped item instance JSON to ISO-XML and ADAPT ADM packages.
#[derive(Parser, Debug)]
#[command(
    name = "sii-converter",
    version,
    about = "Convert shipped item instance JSON to ISO-XML and ADAPT ADM packages",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, global = true, env = "SII_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true, env = "SII_QUIET")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP conversion service.
    Serve(ServeArgs),
    /// Convert one local file.
    Convert(ConvertArgs),
}

/// Settings shared by both subcommands.
#[derive(Args, Debug)]
struct CommonArgs {
    /// Directory holding UnitSystem.xml, RepresentationSystem.xml, ddiExport.txt
    /// and IsoUnitOfMeasure.xml.
    #[arg(long, env = "SII_RESOURCES_DIR", default_value = "Resources")]
    resources_dir: PathBuf,

    /// Parent directory for per-request working directories (default: system temp).
    #[arg(long, env = "SII_WORK_DIR")]
    work_dir: Option<PathBuf>,
}

impl CommonArgs {
    fn builder(&self) -> ServiceConfigBuilder {
        let builder = ServiceConfig::builder().resources_dir(&self.resources_dir);
        match &self.work_dir {
            Some(dir) => builder.work_root(dir),
            None => builder,
        }
    }
}

#[derive(Args, Debug)]
struct ServeArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Listen address.
    #[arg(long, env = "SII_BIND", default_value = "127.0.0.1:7071")]
    bind: SocketAddr,

    /// Maximum request body in bytes.
    #[arg(long, env = "SII_MAX_BODY_BYTES", default_value_t = 4 * 1024 * 1024)]
    max_body_bytes: usize,

    /// Require this value in the `code` query parameter.
    #[arg(long, env = "SII_FUNCTION_KEY", hide_env_values = true)]
    function_key: Option<String>,
}

#[derive(Args, Debug)]
struct ConvertArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Request body file: a JSON string holding the SII document.
    input: PathBuf,

    /// Output format.
    #[arg(short, long, value_enum, default_value = "native")]
    format: FormatArg,

    /// Write the result to this file (required for iso and adm).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// The input is the bare SII document; wrap it in a JSON string first.
    #[arg(long)]
    raw: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Native,
    Iso,
    Adm,
}

impl From<FormatArg> for OutputFormat {
    fn from(v: FormatArg) -> Self {
        match v {
            FormatArg::Native => OutputFormat::Native,
            FormatArg::Iso => OutputFormat::Iso,
            FormatArg::Adm => OutputFormat::Adm,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Command::Serve(args) => run_serve(args).await,
        Command::Convert(args) => run_convert(args, cli.quiet).await,
    }
}

async fn run_serve(args: ServeArgs) -> Result<()> {
    let mut builder = args
        .common
        .builder()
        .bind_addr(args.bind)
        .max_body_bytes(args.max_body_bytes);
    if let Some(key) = args.function_key {
        builder = builder.function_key(key);
    }
    let config = builder.build().context("Invalid configuration")?;
    let plugins = Plugins::from_config(&config).context("Failed to load conversion plugins")?;

    serve(config, plugins).await.context("Server failed")?;
    Ok(())
}

async fn run_convert(args: ConvertArgs, quiet: bool) -> Result<()> {
    let format = OutputFormat::from(args.format);
    if format.is_archive() && args.output.is_none() {
        bail!("--format {} produces a zip archive; pass -o <file>", format);
    }

    let config = args.common.builder().build().context("Invalid configuration")?;
    let plugins = Plugins::from_config(&config).context("Failed to load conversion plugins")?;

    let bytes = tokio::fs::read(&args.input)
        .await
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let body = if args.raw {
        let text = String::from_utf8(bytes)
            .with_context(|| format!("{} is not UTF-8 text", args.input.display()))?;
        serde_json::to_vec(&text).context("Failed to encode input")?
    } else {
        bytes
    };

    let request = ConversionRequest::with_format(format, body);
    let result = convert(request, &plugins, &config)
        .await
        .context("Conversion failed")?;

    match (&args.output, result) {
        (Some(path), result) => {
            let len = result.len();
            tokio::fs::write(path, result.into_bytes())
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            if !quiet {
                eprintln!("Wrote {} ({} bytes, {})", path.display(), len, format);
            }
        }
        (None, ConversionResult::Passthrough(text)) => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", text).context("Failed to write to stdout")?;
        }
        (None, ConversionResult::Archive(_)) => {
            bail!("Refusing to write a zip archive to stdout; pass -o <file>");
        }
    }
    Ok(())
}
