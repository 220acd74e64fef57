use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use glob::glob;
use log::{debug, info};
use rfpulse_core::{
    CodecConfig, CodecError, EncodeRequest, LineSource, PulseProtocol, State, find_protocol,
    receive_file, receive_source, registry,
};
use serde::Serialize;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("RFPULSE_BUILD_COMMIT"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "rfpulse")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Decode and encode 433 MHz remote-control pulse trains.",
    long_about = None,
    after_help = "Examples:\n  rfpulse decode capture.txt\n  rfpulse send -p mcvoice_rm1011b -u 1234567 --on\n  rfpulse protocols describe mcvoice_rm1011b"
)]
struct Cli {
    /// Codec configuration file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the gateway pulse divisor
    #[arg(long, global = true)]
    pulse_div: Option<u32>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, global = true)]
    quiet: bool,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Inspect registered protocols.
    Protocols {
        #[command(subcommand)]
        command: ProtocolCommands,
    },
    /// Decode captured pulse trains (one per line) into messages.
    #[command(alias = "receive")]
    Decode {
        /// Capture file, glob pattern, or '-' for stdin
        input: PathBuf,

        /// Only try this protocol
        #[arg(short, long)]
        protocol: Option<String>,

        /// Output report path (JSON); defaults to stdout
        #[arg(short = 'o', long)]
        report: Option<PathBuf>,

        /// Exit with a non-zero code if no frame decodes
        #[arg(long)]
        strict: bool,
    },
    /// Encode a command into a pulse train for transmission.
    Send {
        /// Protocol identifier
        #[arg(short, long)]
        protocol: String,

        /// Unit code of the target device
        #[arg(short, long)]
        unitcode: Option<String>,

        /// Send an on signal
        #[arg(short = 't', long, conflicts_with = "off")]
        on: bool,

        /// Send an off signal
        #[arg(short = 'f', long)]
        off: bool,

        /// Gateway-style JSON arguments, e.g. '{"unitcode":1234567,"on":1}'
        #[arg(long, conflicts_with_all = ["unitcode", "on", "off"])]
        json: Option<String>,

        /// Print only the pulse train
        #[arg(long)]
        raw: bool,
    },
}

#[derive(Subcommand, Debug)]
enum ProtocolCommands {
    /// List protocol identifiers and devices.
    List,
    /// Show protocol metadata as JSON.
    Describe {
        id: String,

        /// Print the send options instead of JSON metadata
        #[arg(long)]
        help_options: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = load_config(cli.config.as_deref(), cli.pulse_div).and_then(|config| {
        let output = Output {
            pretty: cli.pretty,
            quiet: cli.quiet,
        };
        match cli.command {
            Commands::Protocols { command } => match command {
                ProtocolCommands::List => cmd_protocols_list(&config),
                ProtocolCommands::Describe { id, help_options } => {
                    cmd_protocols_describe(&id, help_options, &config, &output)
                }
            },
            Commands::Decode {
                input,
                protocol,
                report,
                strict,
            } => cmd_decode(&input, protocol.as_deref(), report, strict, &config, &output),
            Commands::Send {
                protocol,
                unitcode,
                on,
                off,
                json,
                raw,
            } => cmd_send(&protocol, unitcode, on, off, json, raw, &config, &output),
        }
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let default = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{:#}", err), None)
    }
}

impl From<CodecError> for CliError {
    fn from(err: CodecError) -> Self {
        let hint = match &err {
            CodecError::MissingField { field: "state" } => {
                Some("use --on or --off".to_string())
            }
            CodecError::MissingField { .. } => Some("use -u/--unitcode".to_string()),
            CodecError::UnknownProtocol { .. } => {
                Some("run `rfpulse protocols list` to see available ids".to_string())
            }
            _ => None,
        };
        CliError::new(err.to_string(), hint)
    }
}

struct Output {
    pretty: bool,
    quiet: bool,
}

impl Output {
    fn to_json<T: Serialize>(&self, value: &T) -> Result<String, CliError> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        json.context("JSON serialization failed").map_err(Into::into)
    }

    fn status(&self, message: impl std::fmt::Display) {
        if !self.quiet {
            eprintln!("{}", message);
        }
    }
}

fn load_config(path: Option<&Path>, pulse_div: Option<u32>) -> Result<CodecConfig, CliError> {
    let config = match path {
        Some(path) => CodecConfig::load(path).map_err(|err| {
            CliError::new(
                format!("failed to load config {}: {}", path.display(), err),
                Some("expected JSON such as {\"pulse_div\": 34}".to_string()),
            )
        })?,
        None => CodecConfig::default(),
    };
    let config = match pulse_div {
        Some(pulse_div) => config.with_pulse_div(pulse_div).map_err(|err| {
            CliError::new(err.to_string(), Some("--pulse-div must be at least 1".to_string()))
        })?,
        None => config,
    };
    debug!("codec config: {:?}", config);
    Ok(config)
}

fn lookup_protocol(id: &str) -> Result<&'static dyn PulseProtocol, CliError> {
    find_protocol(id).ok_or_else(|| CodecError::UnknownProtocol { id: id.to_string() }.into())
}

fn cmd_protocols_list(config: &CodecConfig) -> Result<(), CliError> {
    for protocol in registry() {
        let info = protocol.describe(config);
        for device in &info.devices {
            println!("{}\t{}\t{}", info.id, device.id, device.name);
        }
    }
    Ok(())
}

fn cmd_protocols_describe(
    id: &str,
    help_options: bool,
    config: &CodecConfig,
    output: &Output,
) -> Result<(), CliError> {
    let info = lookup_protocol(id)?.describe(config);
    if help_options {
        for line in info.help_lines() {
            println!("\t {}", line);
        }
        return Ok(());
    }
    println!("{}", output.to_json(&info)?);
    Ok(())
}

fn cmd_decode(
    input: &Path,
    protocol: Option<&str>,
    report: Option<PathBuf>,
    strict: bool,
    config: &CodecConfig,
    output: &Output,
) -> Result<(), CliError> {
    let protocol = protocol.map(lookup_protocol).transpose()?;

    let reports = if input.as_os_str() == "-" {
        let source = LineSource::new(io::stdin().lock());
        vec![receive_source("-", source, config, protocol).context("decoding stdin failed")?]
    } else {
        let inputs = resolve_inputs(input)?;
        if report.is_some() && inputs.len() > 1 {
            return Err(CliError::new(
                format!("multiple files match '{}' but --report names one file", input.display()),
                Some("drop --report to print every report, or run once per file".to_string()),
            ));
        }
        let mut reports = Vec::with_capacity(inputs.len());
        for path in &inputs {
            validate_input_file(path)?;
            let rep = receive_file(path, config, protocol)
                .with_context(|| format!("decoding {} failed", path.display()))?;
            reports.push(rep);
        }
        reports
    };

    for rep in &reports {
        info!(
            "{}: {} of {} frames decoded",
            rep.input, rep.frames_decoded, rep.frames_total
        );
    }

    match report {
        Some(report_path) => {
            let json = output.to_json(&reports[0])?;
            write_report(&report_path, &json)?;
            output.status(format_args!("OK: report written -> {}", report_path.display()));
        }
        None => {
            for rep in &reports {
                println!("{}", output.to_json(rep)?);
            }
        }
    }

    if strict && reports.iter().all(|rep| rep.frames_decoded == 0) {
        return Err(CliError::new(
            "no frames decoded",
            Some("check the capture or the --pulse-div setting; -v lists rejected lines".to_string()),
        ));
    }
    Ok(())
}

fn write_report(path: &Path, json: &str) -> Result<(), CliError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    fs::write(path, json).with_context(|| format!("Failed to write report: {}", path.display()))?;
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_send(
    protocol: &str,
    unitcode: Option<String>,
    on: bool,
    off: bool,
    json: Option<String>,
    raw: bool,
    config: &CodecConfig,
    output: &Output,
) -> Result<(), CliError> {
    let protocol = lookup_protocol(protocol)?;

    let request = match json {
        Some(json) => {
            let args: serde_json::Value = serde_json::from_str(&json).map_err(|err| {
                CliError::new(
                    format!("invalid --json arguments: {}", err),
                    Some("expected an object such as {\"unitcode\":1234567,\"on\":1}".to_string()),
                )
            })?;
            EncodeRequest::from_json(&args)?
        }
        None => EncodeRequest {
            unitcode: unitcode
                .as_deref()
                .map(|value| parse_unitcode(protocol, config, value))
                .transpose()?,
            state: if off {
                Some(State::Off)
            } else if on {
                Some(State::On)
            } else {
                None
            },
        },
    };

    let transmission = protocol.encode(&request, config)?;
    if raw {
        println!("{}", transmission.pulses);
    } else {
        println!("{}", output.to_json(&transmission)?);
    }
    Ok(())
}

fn parse_unitcode(
    protocol: &dyn PulseProtocol,
    config: &CodecConfig,
    value: &str,
) -> Result<u32, CliError> {
    let info = protocol.describe(config);
    if let Some(option) = info.option("unitcode") {
        if !option.accepts(value) {
            return Err(CliError::new(
                format!("invalid unitcode '{}'", value),
                option
                    .pattern
                    .map(|pattern| format!("{} expects a value matching {}", info.id, pattern)),
            ));
        }
    }
    value.parse::<u32>().map_err(|err| {
        CliError::new(format!("invalid unitcode '{}': {}", value, err), None)
    })
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("pass a text capture with one pulse train per line".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("pass a text capture with one pulse train per line".to_string()),
        ));
    }
    Ok(())
}

fn resolve_inputs(input: &Path) -> Result<Vec<PathBuf>, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(vec![input.to_path_buf()]);
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        ));
    }
    matches.sort();
    Ok(matches)
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}

#[cfg(test)]
mod tests {
    use super::{is_glob_pattern, load_config};

    #[test]
    fn glob_detection() {
        assert!(is_glob_pattern("captures/*.txt"));
        assert!(!is_glob_pattern("captures/one.txt"));
    }

    #[test]
    fn pulse_div_override_is_validated() {
        assert!(load_config(None, Some(0)).is_err());
        assert_eq!(load_config(None, Some(12)).unwrap().pulse_div, 12);
    }
}
