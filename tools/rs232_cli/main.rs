// tools/rs232_cli/main.rs
//
// Command-line front end for rs232: resolves port configurations, prints the
// parameter tables and lists the serial devices present on this machine.
//
// Build with: cargo build --features cli --bin rs232_cli

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use rs232_lib::config::{default_config_path, PortConfig};
use rs232_lib::dump::{ascii_dump, hex_dump};
use rs232_lib::params::LINE_DOMAINS;
use rs232_lib::{logging, serial, summary, ErrorCode, Result};

#[derive(Parser, Debug)]
#[command(name = "rs232_cli", about = "Inspect serial port line configurations")]
struct Cli {
    /// Trace every codec and accessor call to stderr
    #[arg(long, global = true, action = clap::ArgAction::SetTrue)]
    trace: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve a port configuration and print its summary
    Show(ShowArgs),
    /// List available serial devices
    List,
    /// Print the backend error code table
    Errors,
    /// Print every line parameter table
    Domains,
    /// Hex and ASCII dump of the given text
    Dump { text: String },
}

#[derive(Args, Debug)]
struct ShowArgs {
    /// TOML or JSON config file (defaults to the user config path if present)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[arg(short, long)]
    device: Option<String>,

    #[arg(short, long)]
    baud: Option<String>,

    #[arg(long)]
    data_bits: Option<String>,

    #[arg(long)]
    parity: Option<String>,

    #[arg(long)]
    stop_bits: Option<String>,

    #[arg(long)]
    flow: Option<String>,

    #[arg(long)]
    dtr: Option<String>,

    #[arg(long)]
    rts: Option<String>,

    /// Print the resolved descriptor as JSON instead of the summary line
    #[arg(long, action = clap::ArgAction::SetTrue)]
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::set_trace(cli.trace);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("rs232_cli: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Show(args) => show(args),
        Command::List => list(),
        Command::Errors => {
            for code in ErrorCode::ALL {
                println!("{:>2}  {}", code.index(), code);
            }
            Ok(())
        }
        Command::Domains => {
            for domain in LINE_DOMAINS {
                let values: Vec<&str> = domain.entries().map(|(_, s)| s).collect();
                println!("{:<13} {}", domain.name(), values.join(", "));
            }
            Ok(())
        }
        Command::Dump { text } => {
            println!("hex:   {}", hex_dump(text.as_bytes()));
            println!("ascii: {}", ascii_dump(text.as_bytes()));
            Ok(())
        }
    }
}

fn show(args: ShowArgs) -> Result<()> {
    let config_path = args.config.clone().or_else(|| {
        let path = default_config_path();
        path.exists().then_some(path)
    });

    let mut config = match config_path {
        Some(path) => PortConfig::load(&path)?,
        None => PortConfig::new(args.device.clone().unwrap_or_default()),
    };

    let overrides = [
        (&mut config.baud, args.baud),
        (&mut config.data_bits, args.data_bits),
        (&mut config.parity, args.parity),
        (&mut config.stop_bits, args.stop_bits),
        (&mut config.flow_control, args.flow),
        (&mut config.dtr, args.dtr),
        (&mut config.rts, args.rts),
    ];
    for (field, value) in overrides {
        if let Some(value) = value {
            *field = value;
        }
    }
    if let Some(device) = args.device {
        config.device = device;
    }

    let port = config.into_descriptor()?;
    if args.json {
        let json = serde_json::to_string_pretty(&port)
            .map_err(|e| rs232_lib::Error::Config(format!("Failed to serialize descriptor: {}", e)))?;
        println!("{}", json);
    } else {
        println!("{}", summary(&port));
    }
    Ok(())
}

fn list() -> Result<()> {
    let devices = serial::available_devices()?;
    if devices.is_empty() {
        println!("No serial devices found");
    }
    for device in devices {
        match (device.vid, device.pid) {
            (Some(vid), Some(pid)) => println!(
                "{}  {} {:04x}:{:04x} {}",
                device.port_name,
                device.port_type,
                vid,
                pid,
                device.product.unwrap_or_default()
            ),
            _ => println!("{}  {}", device.port_name, device.port_type),
        }
    }
    Ok(())
}
