//! Index of connected clients, keyed by id, window and gateway window.

use crate::client::{Client, WindowHandle};
use crate::observability::events;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

const COMPONENT: &str = "client_registry";

/// Central registry of connected clients.
///
/// Lookups by id, window and gateway window are O(1). Registering a client whose id or
/// window handles are already indexed overwrites those entries (last write wins).
#[derive(Default)]
pub struct ClientRegistry {
    by_id: HashMap<String, Arc<Client>>,
    by_gateway_window: HashMap<WindowHandle, Arc<Client>>,
    by_window: HashMap<WindowHandle, Arc<Client>>,
}

impl ClientRegistry {
    /// Creates an empty client registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexes `client` under its id, gateway window and window.
    pub fn register_client(&mut self, client: Client) {
        let client = Arc::new(client);
        self.by_id.insert(client.id.clone(), client.clone());
        self.by_gateway_window
            .insert(client.gateway_window.clone(), client.clone());
        self.by_window.insert(client.window.clone(), client.clone());

        debug!(
            event = events::CLIENT_REGISTERED,
            component = COMPONENT,
            client_id = client.id.as_str(),
            application = client.application.symbolic_name.as_str(),
            window = client.window.label(),
            "client registered"
        );
    }

    /// Removes `client` from all indices. Unknown clients are ignored.
    ///
    /// Window entries are only dropped while they still index a client with the same id.
    pub fn unregister_client(&mut self, client: &Client) {
        if self.by_id.remove(&client.id).is_none() {
            return;
        }
        remove_if_owned(&mut self.by_gateway_window, &client.gateway_window, &client.id);
        remove_if_owned(&mut self.by_window, &client.window, &client.id);

        debug!(
            event = events::CLIENT_UNREGISTERED,
            component = COMPONENT,
            client_id = client.id.as_str(),
            "client unregistered"
        );
    }

    pub fn get_by_client_id(&self, id: &str) -> Option<Arc<Client>> {
        self.by_id.get(id).cloned()
    }

    pub fn get_by_gateway_window(&self, window: &WindowHandle) -> Option<Arc<Client>> {
        self.by_gateway_window.get(window).cloned()
    }

    pub fn get_by_window(&self, window: &WindowHandle) -> Option<Arc<Client>> {
        self.by_window.get(window).cloned()
    }

    /// Returns every client owned by the application `symbolic_name`, in no particular order.
    pub fn get_by_application(&self, symbolic_name: &str) -> Vec<Arc<Client>> {
        self.by_id
            .values()
            .filter(|client| client.application.symbolic_name == symbolic_name)
            .cloned()
            .collect()
    }

    pub fn clients(&self) -> impl Iterator<Item = &Arc<Client>> {
        self.by_id.values()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

fn remove_if_owned(
    index: &mut HashMap<WindowHandle, Arc<Client>>,
    window: &WindowHandle,
    client_id: &str,
) {
    if index
        .get(window)
        .is_some_and(|indexed| indexed.id == client_id)
    {
        index.remove(window);
    }
}
