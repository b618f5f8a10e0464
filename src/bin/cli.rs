//! ipmikit CLI
//!
//! Command-line interface for querying a BMC.

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use ipmikit::pef::PefParamSelector;
use ipmikit::sdr::SdrRecordType;
use ipmikit::{Client, ClientConfig, TcpTransport};

/// ipmikit CLI
#[derive(Parser, Debug)]
#[command(name = "ipmikit-cli")]
#[command(about = "Query SDR and PEF data from a BMC")]
#[command(version)]
struct Args {
    /// Controller address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:6230")]
    addr: String,

    /// Exchange timeout in milliseconds
    #[arg(short, long, default_value = "5000")]
    timeout_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List SDR repository records
    Sdr {
        /// Only show records of this type (e.g. 1 = full sensor); all types
        /// when omitted
        #[arg(short, long)]
        record_type: Option<u8>,
    },

    /// Show the PEF configuration
    Pef,

    /// Fetch one raw PEF configuration parameter
    PefParam {
        /// Parameter selector (0-15)
        selector: u8,

        /// Set selector
        #[arg(short, long, default_value = "0")]
        set: u8,

        /// Block selector
        #[arg(short, long, default_value = "0")]
        block: u8,
    },
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,ipmikit=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let args = Args::parse();

    let config = ClientConfig::builder()
        .addr(&args.addr)
        .connect_timeout_ms(args.timeout_ms)
        .read_timeout_ms(args.timeout_ms)
        .write_timeout_ms(args.timeout_ms)
        .build();

    let transport = match TcpTransport::connect(&config) {
        Ok(t) => t,
        Err(e) => {
            tracing::error!("Failed to connect to {}: {}", config.addr, e);
            std::process::exit(1);
        }
    };
    let mut client = Client::new(transport);

    let result = match args.command {
        Commands::Sdr { record_type } => run_sdr(&mut client, record_type),
        Commands::Pef => run_pef(&mut client),
        Commands::PefParam {
            selector,
            set,
            block,
        } => run_pef_param(&mut client, selector, set, block),
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {}", e);
        std::process::exit(1);
    }
}

fn run_sdr(
    client: &mut Client<TcpTransport>,
    record_type: Option<u8>,
) -> ipmikit::Result<()> {
    let filter = record_type.map(SdrRecordType::from_byte);
    let records = client.get_sdrs(filter)?;

    println!("{:<8} {:<6} {:<6} NAME", "ID", "TYPE", "LEN");
    for record in &records {
        println!(
            "{:#06x}   {:#04x}   {:<6} {}",
            record.header.record_id,
            record.header.record_type.to_byte(),
            record.header.data_len,
            record.name().unwrap_or("-"),
        );
    }
    println!("{} records", records.len());
    Ok(())
}

fn run_pef(client: &mut Client<TcpTransport>) -> ipmikit::Result<()> {
    let config = client.get_pef_config()?;

    if let Some(control) = &config.control {
        println!("PEF enabled          : {}", control.pef_enabled);
        println!("Event messages       : {}", control.event_messages_enabled);
    }
    if let Some(delay) = &config.startup_delay {
        println!("Startup delay        : {}s", delay.seconds);
    }
    if let Some(count) = &config.event_filters_count {
        println!("Event filters        : {}", count.value);
    }
    if let Some(count) = &config.alert_policies_count {
        println!("Alert policies       : {}", count.value);
    }
    if let Some(count) = &config.alert_strings_count {
        println!("Alert strings        : {}", count.value);
    }
    if let Some(count) = &config.group_controls_count {
        println!("Group controls       : {}", count.value);
    }
    if let Some(guid) = &config.system_guid {
        let hex: Vec<String> = guid.guid.iter().map(|b| format!("{:02x}", b)).collect();
        println!("System GUID          : {}", hex.join(""));
    }
    Ok(())
}

fn run_pef_param(
    client: &mut Client<TcpTransport>,
    selector: u8,
    set: u8,
    block: u8,
) -> ipmikit::Result<()> {
    let selector = match selector {
        0 => PefParamSelector::SetInProgress,
        1 => PefParamSelector::PefControl,
        2 => PefParamSelector::ActionGlobalControl,
        3 => PefParamSelector::StartupDelay,
        4 => PefParamSelector::AlertStartupDelay,
        5 => PefParamSelector::NumberOfEventFilters,
        6 => PefParamSelector::EventFilter,
        7 => PefParamSelector::EventFilterData1,
        8 => PefParamSelector::NumberOfAlertPolicies,
        9 => PefParamSelector::AlertPolicy,
        10 => PefParamSelector::SystemGuid,
        11 => PefParamSelector::NumberOfAlertStrings,
        12 => PefParamSelector::AlertStringKey,
        13 => PefParamSelector::AlertString,
        14 => PefParamSelector::NumberOfGroupControls,
        15 => PefParamSelector::GroupControl,
        other => {
            return Err(ipmikit::IpmiError::Protocol(format!(
                "no such PEF parameter selector: {}",
                other
            )))
        }
    };

    let response = client.get_pef_config_params(false, selector, set, block)?;
    println!("Parameter revision : {:#04x}", response.param_revision);
    let hex: Vec<String> = response.data.iter().map(|b| format!("{:02x}", b)).collect();
    println!("Parameter data     : {}", hex.join(" "));
    Ok(())
}
