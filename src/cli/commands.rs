use crate::dispatcher::Dispatcher;
use crate::echo::EchoHandler;
use crate::handler::OperationHandler;
use crate::logging::{init_logging, LogConfig};
use crate::route::RouteTable;
use crate::runtime_config::{parse_size, RuntimeConfig};
use crate::server::{HttpServer, ServerHandle};
use crate::spec::{bind_operations, load_operations};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Command-line interface of the `brrtcore` binary.
#[derive(Parser, Debug)]
#[command(name = "brrtcore")]
#[command(
    version,
    about = "Serve or inspect OpenAPI operations with the brrtcore dispatcher",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the server for a spec using echo handlers
    Serve {
        /// Path to the OpenAPI specification file (YAML or JSON)
        #[arg(short, long)]
        spec: PathBuf,

        /// Address and port to bind the server to
        #[arg(long, env = "BRRTCORE_ADDR", default_value = crate::runtime_config::DEFAULT_ADDR)]
        addr: String,

        /// Coroutine stack size in bytes (decimal or 0x hex)
        #[arg(long, env = "BRRTCORE_STACK_SIZE", value_parser = parse_stack_size)]
        stack_size: Option<usize>,
    },
    /// Print the route table a spec produces, in match order
    Routes {
        /// Path to the OpenAPI specification file (YAML or JSON)
        #[arg(short, long)]
        spec: PathBuf,

        /// Print operations as JSON instead of table lines
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn parse_stack_size(raw: &str) -> Result<usize, String> {
    parse_size(raw).ok_or_else(|| format!("invalid stack size: {raw}"))
}

/// Route table serving every operation in `spec` with an [`EchoHandler`].
///
/// # Errors
///
/// Fails when the document cannot be read or a path does not compile.
pub fn echo_table(spec: &Path) -> Result<RouteTable> {
    let operations = load_operations(spec)
        .with_context(|| format!("failed to load spec {}", spec.display()))?;
    let table = bind_operations(RouteTable::builder(), &operations, |op| {
        Some(Arc::new(EchoHandler::new(op.operation_id.as_str())) as Arc<dyn OperationHandler>)
    })?;
    Ok(table)
}

/// Execute the CLI command provided by the user
///
/// # Errors
///
/// Returns an error if:
/// - The OpenAPI spec cannot be loaded or parsed
/// - Logging cannot be initialized
/// - The server fails to start
pub fn run_cli() -> Result<()> {
    run(Cli::parse())
}

/// Execute an already parsed command line.
///
/// # Errors
///
/// See [`run_cli`].
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Serve {
            spec,
            addr,
            stack_size,
        } => {
            let _logging = init_logging(&LogConfig::from_env())?;

            let mut runtime = RuntimeConfig::from_env();
            if let Some(stack_size) = stack_size {
                runtime.stack_size = stack_size;
            }
            runtime.addr = addr;
            runtime.apply();

            let table = echo_table(&spec)?;
            let dispatcher = Dispatcher::new(table);
            let handle = HttpServer::new(dispatcher)
                .start(runtime.addr.as_str())
                .with_context(|| format!("failed to bind {}", runtime.addr))?;
            tracing::info!(
                addr = %handle.local_addr(),
                stack_size = runtime.stack_size,
                spec = %spec.display(),
                "Server listening"
            );

            wait_for_shutdown(handle)
        }
        Commands::Routes { spec, json } => {
            let operations = load_operations(&spec)
                .with_context(|| format!("failed to load spec {}", spec.display()))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&operations)?);
            } else {
                for op in &operations {
                    println!("{} {} -> {}", op.method, op.path, op.operation_id);
                }
            }
            Ok(())
        }
    }
}

#[cfg(unix)]
fn wait_for_shutdown(handle: ServerHandle) -> Result<()> {
    use signal_hook::consts::{SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;

    let mut signals = Signals::new([SIGINT, SIGTERM]).context("failed to install signal handlers")?;
    if let Some(signal) = signals.forever().next() {
        tracing::info!(signal, "Shutdown signal received, stopping server");
    }
    handle.stop();
    Ok(())
}

#[cfg(not(unix))]
fn wait_for_shutdown(handle: ServerHandle) -> Result<()> {
    handle
        .join()
        .map_err(|e| anyhow::anyhow!("server coroutine panicked: {e:?}"))
}
