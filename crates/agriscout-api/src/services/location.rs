use agriscout_core::models::Coordinate;
use agriscout_draw::LookupTicket;
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::state::AppState;

/// Resolve the address of a chosen location in the background.
///
/// The session lock is only taken once the address is known, so clicks
/// are never blocked by a slow geocoder. A result for a superseded ticket
/// is dropped by the session.
pub fn spawn_lookup(
    state: Arc<AppState>,
    coordinate: Coordinate,
    ticket: LookupTicket,
) -> JoinHandle<bool> {
    tokio::spawn(async move {
        let address = state.geocoder.reverse(coordinate).await;
        let applied = state.session.write().await.resolve_location(ticket, address);
        tracing::debug!(ticket = ticket.0, applied, "Location lookup finished");
        applied
    })
}
