//! Farm location picked during the location phase.
//!
//! Address lookups run asynchronously. Each pick issues a [`LookupTicket`];
//! an address is only attached if its ticket is still the latest one, so a
//! slow answer for an earlier click never overwrites a newer pick.

use agriscout_core::models::Coordinate;
use serde::{Deserialize, Serialize};

/// Sequence number identifying one location pick
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LookupTicket(pub u64);

/// The chosen point and, once resolved, its address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedLocation {
    pub coordinate: Coordinate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub ticket: LookupTicket,
}

#[derive(Debug, Clone, Default)]
pub struct LocationSelection {
    current: Option<SelectedLocation>,
    last_ticket: u64,
}

impl LocationSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new pick, superseding any pending lookup
    pub fn choose(&mut self, coordinate: Coordinate) -> LookupTicket {
        self.last_ticket += 1;
        let ticket = LookupTicket(self.last_ticket);
        self.current = Some(SelectedLocation { coordinate, address: None, ticket });
        ticket
    }

    /// Attach an address if `ticket` is still current; returns whether it was applied
    pub fn resolve(&mut self, ticket: LookupTicket, address: impl Into<String>) -> bool {
        match self.current.as_mut() {
            Some(location) if location.ticket == ticket => {
                location.address = Some(address.into());
                true
            }
            _ => false,
        }
    }

    pub fn current(&self) -> Option<&SelectedLocation> {
        self.current.as_ref()
    }
}
