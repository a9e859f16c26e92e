//! Session controller for a link-device control session.
//!
//! One controller instance owns the mutable state of a single operator
//! session: the last known device status, the cached roster, the current
//! trade selection, and the transcript. It mediates between the device's
//! HTTP endpoint and the presentation surface; no error from either
//! collaborator propagates past it — every failure path ends in a transcript
//! line plus sentinel state or a notification.

use std::sync::Arc;

use shared::{
    domain::SlotIndex,
    protocol::{StatusResponse, StoredRecord},
};
use tokio::sync::Mutex;
use tracing::{info, warn};

pub mod endpoint;
pub mod surface;

use endpoint::{DeviceEndpoint, EndpointError};
use surface::{PresentationSurface, RosterEntry};

/// Status text shown when the device status cannot be obtained.
pub const STATUS_ERROR_SENTINEL: &str = "Error";
/// Display name for a valid record whose name field is absent.
pub const UNKNOWN_RECORD_NAME: &str = "Unknown Pokemon";

/// The operator's current trade pick: the record plus its 0-based slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub record: StoredRecord,
    pub slot: SlotIndex,
}

struct SessionState {
    status: String,
    selected: Option<Selection>,
    roster: Vec<StoredRecord>,
    transcript: Vec<String>,
    // Generation counters for the two refresh operations. A response whose
    // captured generation is older than the latest issued one is stale and
    // must not touch state or the surface.
    status_generation: u64,
    roster_generation: u64,
}

impl SessionState {
    fn new() -> Self {
        Self {
            status: STATUS_ERROR_SENTINEL.to_string(),
            selected: None,
            roster: Vec::new(),
            transcript: Vec::new(),
            status_generation: 0,
            roster_generation: 0,
        }
    }
}

pub struct SessionController {
    endpoint: Arc<dyn DeviceEndpoint>,
    surface: Arc<dyn PresentationSurface>,
    state: Mutex<SessionState>,
}

impl SessionController {
    pub fn new(
        endpoint: Arc<dyn DeviceEndpoint>,
        surface: Arc<dyn PresentationSurface>,
    ) -> Arc<Self> {
        Arc::new(Self {
            endpoint,
            surface,
            state: Mutex::new(SessionState::new()),
        })
    }

    /// Runs the one-time session start sequence: one status refresh, one
    /// roster refresh, then the initialization transcript line.
    pub async fn bootstrap(&self) {
        self.refresh_status().await;
        self.refresh_roster().await;
        self.log_line("Pokemon link session initialized.").await;
    }

    /// Queries the device status and replaces the status snapshot. Absent
    /// field or any failure collapses to the error sentinel; the outcome is
    /// always recorded in the transcript.
    pub async fn refresh_status(&self) {
        let generation = {
            let mut state = self.state.lock().await;
            state.status_generation += 1;
            state.status_generation
        };
        self.log_line("Fetching device status...").await;

        let outcome = self.endpoint.fetch_status().await;

        let mut state = self.state.lock().await;
        if state.status_generation != generation {
            info!(generation, "discarding superseded status response");
            return;
        }
        let (status, line) = match outcome {
            Ok(StatusResponse {
                status: Some(status),
            }) => {
                let line = format!("Status updated: {status}");
                (status, line)
            }
            Ok(StatusResponse { status: None }) => (
                STATUS_ERROR_SENTINEL.to_string(),
                "Status updated: Error fetching status".to_string(),
            ),
            Err(err) => {
                warn!(error = %err, "status query failed");
                (
                    STATUS_ERROR_SENTINEL.to_string(),
                    format!("Error fetching status: {err}"),
                )
            }
        };
        state.status = status.clone();
        state.transcript.push(line.clone());
        drop(state);

        self.surface.set_status(&status);
        self.surface.append_transcript(&line);
    }

    /// Queries the roster and fully replaces the rendered list. A payload
    /// that is not a sequence leaves the previous rendering in place and
    /// appends a diagnostic line instead.
    pub async fn refresh_roster(&self) {
        let generation = {
            let mut state = self.state.lock().await;
            state.roster_generation += 1;
            state.roster_generation
        };
        self.log_line("Fetching stored Pokemon list...").await;

        let outcome = self.endpoint.fetch_roster().await;

        let mut state = self.state.lock().await;
        if state.roster_generation != generation {
            info!(generation, "discarding superseded roster response");
            return;
        }
        match outcome {
            Ok(records) => {
                let entries: Vec<RosterEntry> = records.iter().map(roster_entry).collect();
                info!(records = records.len(), "roster replaced");
                state.roster = records;
                let line = "Pokemon list updated.".to_string();
                state.transcript.push(line.clone());
                drop(state);
                self.surface.replace_roster(&entries);
                self.surface.append_transcript(&line);
            }
            Err(err @ EndpointError::Schema(_)) => {
                warn!(error = %err, "roster payload is not a sequence");
                let line = "Pokemon list data is not an array or is empty.".to_string();
                state.transcript.push(line.clone());
                drop(state);
                self.surface.append_transcript(&line);
            }
            Err(err) => {
                warn!(error = %err, "roster query failed");
                let line = format!("Error fetching Pokemon list: {err}");
                state.transcript.push(line.clone());
                drop(state);
                self.surface.append_transcript(&line);
            }
        }
    }

    /// Stores the operator's pick, overwriting any earlier one. Callers only
    /// invoke this for records rendered as selectable, so `record` is valid.
    pub async fn select_record(&self, record: StoredRecord, display_slot: u16) {
        let name = selection_name(&record);
        let slot = SlotIndex(display_slot.saturating_sub(1) as u8);
        {
            let mut state = self.state.lock().await;
            state.selected = Some(Selection { record, slot });
        }
        self.surface
            .set_selection(&format!("{name} (from Slot {display_slot})"));
        self.log_line(format!("Selected for trade: {name} from Slot {display_slot}"))
            .await;
    }

    /// Serializes the selected record's 0-based slot into a transfer-start
    /// command. Without a selection this is a locally-handled condition: one
    /// blocking notification, one transcript line, no network call.
    pub async fn initiate_transfer(&self) {
        let selection = { self.state.lock().await.selected.clone() };
        let Some(selection) = selection else {
            self.log_line("No Pokemon selected for trade.").await;
            self.surface.notify("Please select a Pokemon to trade first.");
            return;
        };

        let name = selection_name(&selection.record);
        self.log_line(format!("Initiating trade with device for {name}..."))
            .await;

        match self.endpoint.start_trade(selection.slot).await {
            Ok(response) => {
                info!(slot = selection.slot.0, "trade command accepted");
                self.log_line(format!("Trade initiated: {}", response.message))
                    .await;
                self.surface
                    .notify(&format!("Trade response: {}", response.message));
            }
            Err(err) => {
                warn!(slot = selection.slot.0, error = %err, "trade command failed");
                self.log_line(format!("Error initiating trade: {err}")).await;
                self.surface.notify("Error initiating trade.");
            }
        }
    }

    pub async fn status(&self) -> String {
        self.state.lock().await.status.clone()
    }

    pub async fn selected(&self) -> Option<Selection> {
        self.state.lock().await.selected.clone()
    }

    pub async fn roster(&self) -> Vec<StoredRecord> {
        self.state.lock().await.roster.clone()
    }

    /// Full transcript so far, oldest line first.
    pub async fn transcript(&self) -> Vec<String> {
        self.state.lock().await.transcript.clone()
    }

    async fn log_line(&self, line: impl Into<String>) {
        let line = line.into();
        self.state.lock().await.transcript.push(line.clone());
        self.surface.append_transcript(&line);
    }
}

fn roster_entry(record: &StoredRecord) -> RosterEntry {
    let display_slot = record.slot.display();
    if record.valid {
        RosterEntry {
            label: format!(
                "Slot {display_slot}: {} (Gen {}, Lvl {})",
                record_label_name(record),
                field_or_na(record.gen),
                field_or_na(record.level),
            ),
            selectable: true,
            record: Some(record.clone()),
        }
    } else {
        RosterEntry {
            label: format!("Slot {display_slot}: Empty"),
            selectable: false,
            record: None,
        }
    }
}

fn record_label_name(record: &StoredRecord) -> String {
    match (&record.name, record.species_id) {
        (Some(name), _) => name.clone(),
        (None, Some(species_id)) => format!("Pokemon {species_id}"),
        (None, None) => "Pokemon Unknown".to_string(),
    }
}

fn selection_name(record: &StoredRecord) -> String {
    record
        .name
        .clone()
        .unwrap_or_else(|| UNKNOWN_RECORD_NAME.to_string())
}

fn field_or_na<T: std::fmt::Display>(field: Option<T>) -> String {
    match field {
        Some(value) => value.to_string(),
        None => "N/A".to_string(),
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
