use std::time::Duration;

use clap::{CommandFactory, Parser, Subcommand};
use nomad_blinkt::{display_reading, GpioPort};
use nomad_blinkt_core::{Blinkt, MAX_BRIGHTNESS, MIN_BRIGHTNESS};
use nomad_blinkt_metrics::{Client, Config, Resource};
use rppal::hal::Delay;
use tokio::signal::unix::{signal, SignalKind};

/// Pause between the startup animation and the first reading.
const STARTUP_PAUSE: Duration = Duration::from_millis(100);

/// Nomad node utilization indicator
///
/// Polls the metrics of a Nomad client node and shows the utilization of the chosen
/// resource on the Blinkt! LED strip.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Resource to monitor: allocations, cpu, memory or disk
    #[arg(short, long, default_value = "allocations")]
    resource: Resource,
    /// Maximum allowed number of allocations, used with the allocations resource
    #[arg(short, long, default_value = "8")]
    max: u32,
    /// Brightness of the lit pixels
    #[arg(short, long, default_value = "0.5", value_parser = parse_brightness)]
    brightness: f32,
    /// Polling interval
    #[arg(short, long, default_value = "5000", value_name = "MS")]
    interval: u64,
    /// Address of the Nomad agent [env: NOMAD_ADDR] [default: http://127.0.0.1:4646]
    #[arg(short, long)]
    address: Option<String>,
    /// Path to a CA certificate file or directory [env: NOMAD_CACERT]
    #[arg(long, value_name = "PATH")]
    ca_cert: Option<String>,
    /// Path to the client certificate [env: NOMAD_CLIENT_CERT]
    #[arg(long, value_name = "PATH")]
    client_cert: Option<String>,
    /// Path to the client certificate key [env: NOMAD_CLIENT_KEY]
    #[arg(long, value_name = "PATH")]
    client_key: Option<String>,
    /// Do not verify the agent certificate [env: NOMAD_SKIP_VERIFY]
    #[arg(long)]
    skip_verify: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate shell completions
    Completions {
        /// The shell to generate the completions for
        #[arg(value_enum)]
        shell: clap_complete_command::Shell,
    },
}

impl Cli {
    /// Applies the explicitly given flags on top of the given configuration.
    fn metrics_config(&self, mut config: Config) -> Config {
        let overrides = [
            (&mut config.tls.ca_cert, &self.ca_cert),
            (&mut config.tls.client_cert, &self.client_cert),
            (&mut config.tls.client_key, &self.client_key),
        ];
        for (value, flag) in overrides {
            if flag.is_some() {
                value.clone_from(flag);
            }
        }
        if let Some(address) = &self.address {
            config.address.clone_from(address);
        }
        config.tls.insecure |= self.skip_verify;
        config
    }
}

fn parse_brightness(value: &str) -> Result<f32, String> {
    let brightness: f32 = value.parse().map_err(|err| format!("{err}"))?;
    if (MIN_BRIGHTNESS..=MAX_BRIGHTNESS).contains(&brightness) {
        Ok(brightness)
    } else {
        Err(format!(
            "Supplied brightness was {brightness:?} - value should be between: {MIN_BRIGHTNESS:?} and {MAX_BRIGHTNESS:?}"
        ))
    }
}

/// Resolves when the process receives SIGINT or SIGTERM.
async fn shutdown_signal() -> anyhow::Result<()> {
    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        result = tokio::signal::ctrl_c() => result?,
        _ = terminate.recv() => {}
    }
    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let client = Client::new(cli.metrics_config(Config::from_env()))?;
    let interval = Duration::from_millis(cli.interval);

    let mut blinkt = Blinkt::with_brightness(GpioPort::new()?, Delay::new(), cli.brightness);
    blinkt.setup()?;
    log::info!(
        "Monitoring {} of the {} every {:?}",
        cli.resource,
        client.metrics_url(),
        interval
    );

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    tokio::time::sleep(STARTUP_PAUSE).await;
    loop {
        tokio::select! {
            result = &mut shutdown => {
                result?;
                break;
            }
            reading = client.utilization(cli.resource, cli.max) => {
                display_reading(&mut blinkt, cli.resource, reading, cli.brightness)?;
            }
        }

        tokio::select! {
            result = &mut shutdown => {
                result?;
                break;
            }
            () = tokio::time::sleep(interval) => {}
        }
    }

    log::info!("Processing exit");
    blinkt.cleanup()?;
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    if let Some(Command::Completions { shell }) = cli.command {
        shell.generate(&mut Cli::command(), &mut std::io::stdout());
        return Ok(());
    }

    run(cli).await
}
