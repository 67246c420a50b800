//! Network actor - runs requests against the address service in the Tokio runtime

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::ApiClient;

/// Network actor that executes address service commands.
///
/// Every command runs as its own task, so overlapping requests are allowed
/// and responses come back in completion order, not issue order.
pub struct NetworkActor {
    client: ApiClient,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(client: ApiClient, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            client,
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::Shutdown) | None => {
                            self.active_requests.abort_all();
                            break;
                        }
                        Some(command) => {
                            let response_tx = self.response_tx.clone();
                            let client = self.client.clone();

                            self.active_requests.spawn(async move {
                                let name = command.name();
                                tracing::info!(op = name, command = ?command, "Executing request");
                                if let Some(response) = execute(&client, command).await {
                                    if response.is_ok() {
                                        tracing::info!(op = name, id = response.id(), "Request completed");
                                    } else {
                                        tracing::warn!(op = name, id = response.id(), response = ?response, "Request failed");
                                    }
                                    let _ = response_tx.send(response);
                                }
                            });
                        }
                    }
                }

                // Clean up completed tasks
                Some(_result) = self.active_requests.join_next() => {}
            }
        }
    }
}

/// Execute one command and wrap its outcome in the matching response
pub async fn execute(client: &ApiClient, command: NetworkCommand) -> Option<NetworkResponse> {
    let response = match command {
        NetworkCommand::ListAddresses { id } => NetworkResponse::Addresses {
            id,
            result: client.list_addresses().await,
        },
        NetworkCommand::AddAddress { id, address } => {
            let result = client.add_address(&address).await;
            NetworkResponse::AddressAdded { id, address, result }
        }
        NetworkCommand::RemoveAddress { id, address } => {
            let result = client.remove_address(&address).await;
            NetworkResponse::AddressRemoved { id, address, result }
        }
        NetworkCommand::SyncAddress { id, address } => {
            let result = client.sync_address(&address).await;
            NetworkResponse::AddressSynced { id, address, result }
        }
        NetworkCommand::ListTransactions { id, address } => {
            let result = client.list_transactions(&address).await;
            NetworkResponse::Transactions { id, address, result }
        }
        NetworkCommand::Shutdown => return None,
    };
    Some(response)
}
