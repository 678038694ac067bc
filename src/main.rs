#![deny(unsafe_code)]

use clap::{Parser, Subcommand};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use vectool::emitter::{self, EmitError};
use vectool::logging;
use vectool::probe::{ProbeConfig, ProbeError, Prober};

#[derive(Debug, Parser)]
#[command(
    version,
    about,
    long_about = None,
    arg_required_else_help = true,
)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[arg(short, long, global = true)]
    /// log debug-level detail to stderr
    verbose: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// regenerate entries.txt, the hardware-interrupt registration table
    Gen,
    /// exercise a UDP endpoint with fixed-payload datagrams
    Probe(ProbeArgs),
}

#[derive(Debug, clap::Args)]
struct ProbeArgs {
    /// host the payload is sent to
    host: String,

    /// destination port on that host
    port: u16,

    #[arg(short, long, value_name = "PORT", default_value_t = 8000)]
    /// local port to bind before talking
    bind_port: u16,

    #[arg(short, long, value_name = "TEXT", default_value = "hello, from ubuntu")]
    /// fixed payload sent on every exchange
    payload: String,

    #[arg(short, long, value_name = "MS")]
    /// send blindly every [ms] instead of replying per received datagram
    interval: Option<u64>,

    #[arg(short, long, value_name = "MS")]
    /// give up when no datagram arrives within [ms]
    timeout: Option<u64>,

    #[arg(short, long, value_name = "INT", default_value_t = 0)]
    /// halt after this many exchanges (will run forever if unset)
    count: usize,
}

#[derive(Debug, Error)]
enum VectoolErr {
    #[error("{0}")]
    ArgParse(clap::Error),
    #[error("{0}")]
    Emit(EmitError),
    #[error("{0}")]
    Probe(ProbeError),
}
impl From<clap::Error> for VectoolErr {
    fn from(value: clap::Error) -> Self { Self::ArgParse(value) }
}
impl From<EmitError> for VectoolErr {
    fn from(value: EmitError) -> Self { Self::Emit(value) }
}
impl From<ProbeError> for VectoolErr {
    fn from(value: ProbeError) -> Self { Self::Probe(value) }
}

fn vectool_main() -> Result<(), VectoolErr> {
    let args = Args::try_parse()?;
    logging::init(args.verbose);

    match args.command {
        Command::Gen => {
            let written = emitter::emit(Path::new(emitter::DEFAULT_OUTPUT))?;
            log::info!("wrote {} rows to {}", written, emitter::DEFAULT_OUTPUT);
        }
        Command::Probe(probe) => {
            let config = ProbeConfig {
                host:      probe.host,
                port:      probe.port,
                bind_port: probe.bind_port,
                payload:   probe.payload,
                interval:  probe.interval.map(Duration::from_millis),
                timeout:   probe.timeout.map(Duration::from_millis),
                limit:     probe.count,
            };
            Prober::bind(config)?.run()?;
        }
    }
    Ok(())
}

fn main() {
    match vectool_main() {
        Ok(()) => {}
        Err(VectoolErr::ArgParse(err)) => err.exit(),
        Err(err) => {
            log::error!("{err}");
            std::process::exit(1);
        }
    }
}
