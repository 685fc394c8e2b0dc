use serde::{Deserialize, Serialize};

/// Work-order lifecycle state.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkOrderState {
    Scheduled,
    InProgress,
    Completed,
}

/// The allowed transition graph, as an explicit adjacency table: each state
/// maps to its single permitted successor. Checked by lookup so the graph is
/// testable on its own.
const TRANSITIONS: [(WorkOrderState, WorkOrderState); 2] = [
    (WorkOrderState::Scheduled, WorkOrderState::InProgress),
    (WorkOrderState::InProgress, WorkOrderState::Completed),
];

impl WorkOrderState {
    /// The single state this one may advance to, if any.
    pub fn successor(self) -> Option<WorkOrderState> {
        TRANSITIONS
            .iter()
            .find(|(from, _)| *from == self)
            .map(|(_, to)| *to)
    }

    pub fn can_transition_to(self, target: WorkOrderState) -> bool {
        self.successor() == Some(target)
    }

    pub fn is_terminal(self) -> bool {
        self.successor().is_none()
    }
}

impl core::fmt::Display for WorkOrderState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            WorkOrderState::Scheduled => "Scheduled",
            WorkOrderState::InProgress => "InProgress",
            WorkOrderState::Completed => "Completed",
        };
        f.write_str(s)
    }
}
