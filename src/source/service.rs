//! Mock review backend.
//!
//! Row actions from the grids arrive here over an unbounded channel. The
//! service applies them to its copy of the dataset after a simulated latency
//! and publishes the result as a new [`PortalSnapshot`]. The grids never wait
//! for it: outcomes reach the UI as new rows on a later poll.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use super::{ChannelSource, PortalSnapshot};
use crate::data::{action, PortalData, ReviewStatus, Table};
use crate::grid::ActionHandler;

/// Where the service loads its dataset from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// The built-in mock dataset.
    Sample,
    /// A JSON file, re-read on every reload.
    File(PathBuf),
}

impl Origin {
    pub fn load(&self) -> Result<PortalData> {
        match self {
            Origin::Sample => Ok(PortalData::sample()),
            Origin::File(path) => PortalData::load(path),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Origin::Sample => "sample data".to_string(),
            Origin::File(path) => path.display().to_string(),
        }
    }
}

/// Requests understood by the review service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceCommand {
    /// Apply a row action.
    Action {
        table: Table,
        action: String,
        id: String,
    },
    /// Re-read the origin and replace the dataset.
    Reload,
}

/// Cloneable sending side of the service's command channel.
#[derive(Debug, Clone)]
pub struct ServiceHandle {
    commands: mpsc::UnboundedSender<ServiceCommand>,
}

impl ServiceHandle {
    pub fn new(commands: mpsc::UnboundedSender<ServiceCommand>) -> Self {
        Self { commands }
    }

    /// A handle plus the receiving end of its command channel.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ServiceCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    /// Queue a row action. Returns false if the service has stopped.
    pub fn send_action(&self, table: Table, action: &str, id: &str) -> bool {
        self.commands
            .send(ServiceCommand::Action {
                table,
                action: action.to_string(),
                id: id.to_string(),
            })
            .is_ok()
    }

    /// Queue a reload. Returns false if the service has stopped.
    pub fn reload(&self) -> bool {
        self.commands.send(ServiceCommand::Reload).is_ok()
    }

    /// An action handler that forwards a table's row actions to the service.
    pub fn action_handler(&self, table: Table) -> impl ActionHandler<String> + 'static {
        let handle = self.clone();
        move |action: &str, id: &String| {
            if !handle.send_action(table, action, id) {
                tracing::warn!(table = table.key(), action, id = %id, "review service is gone");
            }
        }
    }
}

/// The mock backend task.
#[derive(Debug)]
pub struct ReviewService {
    origin: Origin,
    data: PortalData,
    dataset: u64,
    revision: u64,
    latency: Duration,
    commands: mpsc::UnboundedReceiver<ServiceCommand>,
    snapshots: watch::Sender<PortalSnapshot>,
}

impl ReviewService {
    /// Load the origin and spawn the service on the current tokio runtime.
    ///
    /// Returns the source to poll for snapshots, the handle to send commands
    /// with, and the task itself. The task ends once every handle is dropped.
    ///
    /// ```
    /// use std::time::Duration;
    /// use portal_grid::source::{DataSource, Origin, ReviewService};
    ///
    /// # tokio_test::block_on(async {
    /// let (mut source, handle, task) =
    ///     ReviewService::spawn(Origin::Sample, Duration::ZERO).unwrap();
    /// let snapshot = source.poll().unwrap();
    /// assert_eq!(snapshot.dataset, 1);
    ///
    /// drop(handle);
    /// task.await.unwrap();
    /// # });
    /// ```
    pub fn spawn(
        origin: Origin,
        latency: Duration,
    ) -> Result<(ChannelSource, ServiceHandle, JoinHandle<()>)> {
        let data = origin.load()?;
        let (snapshots, receiver) = watch::channel(PortalSnapshot::new(1, data.clone()));
        let (handle, commands) = ServiceHandle::channel();
        let source = ChannelSource::new(receiver, &origin.describe());

        let service = Self {
            origin,
            data,
            dataset: 1,
            revision: 0,
            latency,
            commands,
            snapshots,
        };
        let task = tokio::spawn(service.run());
        Ok((source, handle, task))
    }

    async fn run(mut self) {
        tracing::info!(origin = %self.origin.describe(), "review service started");
        while let Some(command) = self.commands.recv().await {
            self.handle(command).await;
        }
        tracing::debug!("review service stopped");
    }

    async fn handle(&mut self, command: ServiceCommand) {
        match command {
            ServiceCommand::Action { table, action, id } => {
                if !self.latency.is_zero() {
                    tokio::time::sleep(self.latency).await;
                }
                let notice = match self.apply(table, &action, &id) {
                    Ok(notice) => {
                        tracing::info!(table = table.key(), action = %action, id = %id, "action applied");
                        notice
                    }
                    Err(notice) => {
                        tracing::warn!(table = table.key(), action = %action, id = %id, reason = %notice, "action ignored");
                        notice
                    }
                };
                self.publish(Some(notice));
            }
            ServiceCommand::Reload => match self.origin.load() {
                Ok(data) => {
                    self.data = data;
                    self.dataset += 1;
                    tracing::info!(dataset = self.dataset, "dataset reloaded");
                    let notice = format!("Reloaded {}", self.origin.describe());
                    self.publish(Some(notice));
                }
                Err(e) => {
                    tracing::warn!(error = %e, "reload failed");
                    self.publish(Some(format!("Reload failed: {}", e)));
                }
            },
        }
    }

    /// Apply one action to the dataset. The error is a user-facing reason.
    fn apply(&mut self, table: Table, name: &str, id: &str) -> Result<String, String> {
        match (table, name) {
            (Table::Documents, action::APPROVE | action::REJECT) => {
                let doc = self
                    .data
                    .document_mut(id)
                    .ok_or_else(|| format!("Document {} not found", id))?;
                if !doc.is_pending() {
                    return Err(format!(
                        "{} is already {}",
                        id,
                        doc.status.label().to_lowercase()
                    ));
                }
                doc.status = if name == action::APPROVE {
                    ReviewStatus::Approved
                } else {
                    ReviewStatus::Rejected
                };
                Ok(format!("{} {}", id, doc.status.label().to_lowercase()))
            }
            (Table::Roles, action::DELETE) => {
                let role = self
                    .data
                    .roles
                    .iter()
                    .find(|r| r.id == id)
                    .ok_or_else(|| format!("Role {} not found", id))?;
                if role.members > 0 {
                    return Err(format!("Role {} still has {} members", role.name, role.members));
                }
                let removed = self
                    .data
                    .remove_role(id)
                    .ok_or_else(|| format!("Role {} not found", id))?;
                Ok(format!("Deleted role {}", removed.name))
            }
            (Table::Users, action::ACTIVATE | action::DEACTIVATE) => {
                let user = self
                    .data
                    .user_mut(id)
                    .ok_or_else(|| format!("User {} not found", id))?;
                user.active = name == action::ACTIVATE;
                let verb = if user.active { "activated" } else { "deactivated" };
                Ok(format!("{} {}", user.name, verb))
            }
            _ => Err(format!("Unsupported action '{}' on {}", name, table.label())),
        }
    }

    fn publish(&mut self, notice: Option<String>) {
        self.revision += 1;
        let snapshot = PortalSnapshot {
            dataset: self.dataset,
            revision: self.revision,
            data: Arc::new(self.data.clone()),
            notice,
        };
        if self.snapshots.send(snapshot).is_err() {
            tracing::debug!("no snapshot receivers left");
        }
    }
}
