use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};
use clap::Parser;
use session_core::{
    endpoint::HttpDeviceEndpoint,
    surface::{PresentationSurface, RosterEntry},
    SessionController,
};
use url::Url;

#[derive(Parser, Debug)]
struct Args {
    /// Base URL of the link device, e.g. http://192.168.4.1
    #[arg(long)]
    device_url: String,
    /// 1-based roster slot to trade once the roster has loaded.
    #[arg(long)]
    trade_slot: Option<u16>,
}

/// Renders the session onto stdout.
#[derive(Default)]
struct ConsoleSurface {
    roster: Mutex<Vec<RosterEntry>>,
}

impl ConsoleSurface {
    fn record_at_display_slot(&self, display_slot: u16) -> Option<shared::protocol::StoredRecord> {
        self.roster
            .lock()
            .unwrap()
            .iter()
            .filter_map(|entry| entry.record.as_ref())
            .find(|record| record.slot.display() == display_slot)
            .cloned()
    }
}

impl PresentationSurface for ConsoleSurface {
    fn set_status(&self, text: &str) {
        println!("Device status: {text}");
    }

    fn replace_roster(&self, entries: &[RosterEntry]) {
        *self.roster.lock().unwrap() = entries.to_vec();
        println!("Stored Pokemon:");
        for entry in entries {
            let marker = if entry.selectable { "*" } else { " " };
            println!(" {marker} {}", entry.label);
        }
    }

    fn set_selection(&self, text: &str) {
        println!("Selected for trade: {text}");
    }

    fn append_transcript(&self, line: &str) {
        println!("[log] {line}");
    }

    fn notify(&self, message: &str) {
        println!("*** {message}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let device_url = Url::parse(&args.device_url)?;
    let surface = Arc::new(ConsoleSurface::default());
    let endpoint = Arc::new(HttpDeviceEndpoint::new(
        device_url.as_str().trim_end_matches('/'),
    ));
    let controller = SessionController::new(endpoint, surface.clone());

    controller.bootstrap().await;

    if let Some(display_slot) = args.trade_slot {
        if display_slot == 0 || display_slot as usize > shared::domain::MAX_ROSTER_SLOTS {
            bail!(
                "slot {display_slot} is out of range; the device stores slots 1 through {}",
                shared::domain::MAX_ROSTER_SLOTS
            );
        }
        let Some(record) = surface.record_at_display_slot(display_slot) else {
            bail!("slot {display_slot} holds no tradeable Pokemon");
        };
        controller.select_record(record, display_slot).await;
        controller.initiate_transfer().await;
    }

    Ok(())
}
