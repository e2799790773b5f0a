//! JSON topology loader.
//!
//! # File format
//!
//! ```json
//! {
//!   "lines": {
//!     "red":  ["Harvard", "Central", "MIT"],
//!     "pink": ["Porter", "Harvard", "Davis"]
//!   },
//!   "trips": {
//!     "Abby": ["Central", "MIT"]
//!   }
//! }
//! ```
//!
//! Object key order is meaningful: lines are registered in file order, which
//! fixes the `train_to_board` tie-break when several lines serve the same
//! station pair (hence the `preserve_order` feature on `serde_json`).
//! `trips` may be omitted for a passenger-free network.
//!
//! All topology validation — line length, duplicate names, journeys through
//! unserved stations or legs — happens in `add_line`/`add_journey` and
//! surfaces here as a fatal [`SimError`].

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use transit_net::Network;

use crate::{SimError, SimResult};

// ── Config schema ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ConfigFile {
    lines: Map<String, Value>,
    #[serde(default)]
    trips: Map<String, Value>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`Network`] from a JSON topology file.
pub fn load_network(path: &Path) -> SimResult<Network> {
    let file = std::fs::File::open(path).map_err(SimError::Io)?;
    load_network_reader(std::io::BufReader::new(file))
}

/// Like [`load_network`] but accepts any `Read` source.
///
/// Useful for testing (pass a byte slice) or loading from network streams.
pub fn load_network_reader<R: Read>(reader: R) -> SimResult<Network> {
    let config: ConfigFile =
        serde_json::from_reader(reader).map_err(|e| SimError::Parse(e.to_string()))?;

    let mut net = Network::new();
    for (name, stations) in &config.lines {
        let stations = station_list("line", name, stations)?;
        net.add_line(name, &stations)?;
    }
    for (name, stations) in &config.trips {
        let stations = station_list("trip", name, stations)?;
        net.add_journey(name, &stations)?;
    }
    Ok(net)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn station_list(kind: &str, name: &str, value: &Value) -> SimResult<Vec<String>> {
    let Value::Array(items) = value else {
        return Err(SimError::Parse(format!(
            "{kind} {name:?}: expected an array of station names"
        )));
    };
    items
        .iter()
        .map(|item| match item {
            Value::String(s) => Ok(s.clone()),
            other => Err(SimError::Parse(format!(
                "{kind} {name:?}: station entries must be strings, got {other}"
            ))),
        })
        .collect()
}
