//! Org-chart command service.
//!
//! # Responsibility
//! - Own the current tree plus transient selection state.
//! - Apply commands synchronously and trigger detached persistence.
//!
//! # Invariants
//! - Exactly one logical writer; each command completes before the next.
//! - Transient selection state is reset on every mutating command.
//! - The persisted slot converges on the latest mutation: saves carry a
//!   monotonic sequence and a stale save never overwrites a newer one.
//! - A failed save never rolls back or blocks the in-memory mutation.

use crate::model::employee::{Employee, EmployeeId, EmployeePatch, EmployeeValidationError};
use crate::persist::{ChartStore, StoreResult};
use crate::tree;
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex};

/// Commands accepted by the chart service.
///
/// The closed set the presentation layer dispatches; handling is an
/// exhaustive match, so an unhandled command cannot compile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Append a new employee under an existing parent.
    Add {
        parent_id: EmployeeId,
        new_employee: Employee,
    },
    /// Merge edited fields into an existing employee.
    Edit(EmployeePatch),
    /// Remove a non-root employee and its subtree.
    Delete(EmployeeId),
    /// Mark an employee (or nothing) as selected.
    Select(Option<EmployeeId>),
    /// Start adding a child under `parent_id`.
    OpenAdd(EmployeeId),
    /// Dismiss selection and any pending add.
    CloseAdd,
    /// Re-persist the current tree without changing state.
    Save,
}

/// Errors rejected by `dispatch` before the tree is touched.
///
/// Stale ids are deliberately not errors: a missing add-parent or edit
/// target leaves the tree unchanged, silently.
#[derive(Debug)]
pub enum CommandError {
    /// Payload failed the required-field rule.
    Validation(EmployeeValidationError),
    /// Attempt to delete the root node.
    RootUndeletable(EmployeeId),
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::RootUndeletable(id) => write!(f, "root employee cannot be deleted: {id}"),
        }
    }
}

impl Error for CommandError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::RootUndeletable(_) => None,
        }
    }
}

impl From<EmployeeValidationError> for CommandError {
    fn from(value: EmployeeValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Returns the tree used when no prior save exists.
pub fn default_tree() -> Employee {
    Employee::with_id("1", "John Doe", Some("CEO".to_string()))
}

/// Single-writer state machine over one org chart.
pub struct ChartService {
    store: Arc<dyn ChartStore + Send + Sync>,
    tree: Employee,
    selected_id: Option<EmployeeId>,
    pending_add_parent_id: Option<EmployeeId>,
    is_adding: bool,
    next_save_seq: u64,
    last_saved_seq: Arc<Mutex<u64>>,
}

impl ChartService {
    /// Opens a service over `store`, restoring the persisted chart.
    ///
    /// Falls back to `default_tree()` when no save exists or the saved
    /// data is corrupt; corruption is logged, never fatal.
    pub fn open(store: Arc<dyn ChartStore + Send + Sync>) -> Self {
        let tree = match store.load() {
            Ok(Some(tree)) => {
                info!(
                    "event=chart_open module=service status=ok source=store nodes={}",
                    tree.node_count()
                );
                tree
            }
            Ok(None) => {
                info!("event=chart_open module=service status=ok source=default");
                default_tree()
            }
            Err(err) => {
                warn!(
                    "event=chart_open module=service status=fallback source=default error={err}"
                );
                default_tree()
            }
        };
        Self::with_tree(store, tree)
    }

    /// Creates a service over an explicit starting tree.
    ///
    /// Skips the startup load; used by tests and import paths where the
    /// tree is already in hand.
    pub fn with_tree(store: Arc<dyn ChartStore + Send + Sync>, tree: Employee) -> Self {
        Self {
            store,
            tree,
            selected_id: None,
            pending_add_parent_id: None,
            is_adding: false,
            next_save_seq: 0,
            last_saved_seq: Arc::new(Mutex::new(0)),
        }
    }

    /// Applies one command and publishes the resulting snapshot.
    ///
    /// Mutating commands trigger a detached save of the full new tree.
    ///
    /// # Errors
    /// - `Validation` when an `Add`/`Edit` payload has a blank name.
    /// - `RootUndeletable` when `Delete` targets the root id.
    pub fn dispatch(&mut self, command: Command) -> Result<(), CommandError> {
        match command {
            Command::Add {
                parent_id,
                new_employee,
            } => {
                new_employee.validate()?;
                let normalized = normalize(new_employee);
                self.tree = tree::insert_child(&self.tree, &parent_id, normalized);
                self.clear_transient();
                self.schedule_save();
            }
            Command::Edit(patch) => {
                patch.validate()?;
                self.tree = tree::update(&self.tree, &patch);
                self.clear_transient();
                self.schedule_save();
            }
            Command::Delete(id) => {
                if id == self.tree.id {
                    return Err(CommandError::RootUndeletable(id));
                }
                self.tree = tree::remove(&self.tree, &id);
                self.clear_transient();
                self.schedule_save();
            }
            Command::Select(id) => {
                self.selected_id = id;
                self.is_adding = false;
            }
            Command::OpenAdd(parent_id) => {
                self.pending_add_parent_id = Some(parent_id);
                self.is_adding = true;
                self.selected_id = None;
            }
            Command::CloseAdd => {
                self.clear_transient();
            }
            Command::Save => {
                self.schedule_save();
            }
        }
        Ok(())
    }

    /// Returns the current tree snapshot.
    pub fn tree(&self) -> &Employee {
        &self.tree
    }

    /// Returns the selected employee id, if any.
    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    /// Resolves the current selection against the tree.
    ///
    /// `None` when nothing is selected or the selected id has since
    /// been removed.
    pub fn selected(&self) -> Option<&Employee> {
        self.selected_id
            .as_deref()
            .and_then(|id| tree::find(&self.tree, id))
    }

    /// Returns the parent id a not-yet-submitted child will attach to.
    pub fn pending_add_parent_id(&self) -> Option<&str> {
        self.pending_add_parent_id.as_deref()
    }

    /// Returns whether an add form is open.
    pub fn is_adding(&self) -> bool {
        self.is_adding
    }

    /// Persists the current tree synchronously.
    ///
    /// Shares the sequence guard with detached saves, so an in-flight
    /// older save cannot later clobber this write.
    pub fn save_now(&mut self) -> StoreResult<()> {
        self.next_save_seq += 1;
        let seq = self.next_save_seq;
        let mut last_saved = lock_seq(&self.last_saved_seq);
        self.store.save(&self.tree)?;
        *last_saved = seq;
        Ok(())
    }

    fn clear_transient(&mut self) {
        self.selected_id = None;
        self.pending_add_parent_id = None;
        self.is_adding = false;
    }

    /// Fire-and-forget save of the new tree.
    ///
    /// The guard mutex serializes writers; a save whose sequence is not
    /// newer than the last completed one has been superseded and skips
    /// the write entirely, so the slot converges on the newest tree.
    fn schedule_save(&mut self) {
        self.next_save_seq += 1;
        let seq = self.next_save_seq;
        let snapshot = self.tree.clone();
        let store = Arc::clone(&self.store);
        let last_saved_seq = Arc::clone(&self.last_saved_seq);
        std::thread::spawn(move || {
            let mut last_saved = lock_seq(&last_saved_seq);
            if seq <= *last_saved {
                debug!("event=chart_save module=service status=skipped seq={seq} reason=superseded");
                return;
            }
            match store.save(&snapshot) {
                Ok(()) => *last_saved = seq,
                Err(err) => {
                    error!("event=chart_save module=service status=error seq={seq} error={err}");
                }
            }
        });
    }
}

fn lock_seq(guard: &Mutex<u64>) -> std::sync::MutexGuard<'_, u64> {
    match guard.lock() {
        Ok(inner) => inner,
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn normalize(mut employee: Employee) -> Employee {
    employee.name = employee.name.trim().to_string();
    employee.title = employee.title.map(|title| title.trim().to_string());
    employee
}

#[cfg(test)]
mod tests {
    use super::{default_tree, normalize, ChartService, Command};
    use crate::model::employee::Employee;
    use crate::persist::MemoryStore;
    use std::sync::Arc;

    #[test]
    fn default_tree_is_the_lone_root() {
        let tree = default_tree();
        assert_eq!(tree.id, "1");
        assert_eq!(tree.title.as_deref(), Some("CEO"));
        assert!(tree.children.is_empty());
    }

    #[test]
    fn normalize_trims_name_and_title() {
        let employee = normalize(Employee::with_id("9", "  Ada  ", Some(" VP ".to_string())));
        assert_eq!(employee.name, "Ada");
        assert_eq!(employee.title.as_deref(), Some("VP"));
    }

    #[test]
    fn select_survives_open_close_cycle() {
        let mut service = ChartService::with_tree(Arc::new(MemoryStore::new()), default_tree());

        service
            .dispatch(Command::Select(Some("1".to_string())))
            .unwrap();
        assert_eq!(service.selected_id(), Some("1"));
        assert_eq!(service.selected().unwrap().name, "John Doe");

        service.dispatch(Command::OpenAdd("1".to_string())).unwrap();
        assert!(service.is_adding());
        assert_eq!(service.pending_add_parent_id(), Some("1"));
        assert_eq!(service.selected_id(), None);

        service.dispatch(Command::CloseAdd).unwrap();
        assert!(!service.is_adding());
        assert_eq!(service.pending_add_parent_id(), None);
    }
}
