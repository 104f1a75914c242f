//! Drag gesture state machine.
//!
//! # Responsibility
//! - Track one pointer gesture from drag-start to drag-end on one board.
//! - Hand the finished gesture to reconciliation and commit the result.
//!
//! # Invariants
//! - `drag_end` always leaves the session `Idle`, whether or not anything
//!   was committed.
//! - `drag_over` never mutates the store.

use crate::drag::drag_id::{DragId, DragIdError};
use crate::drag::reconcile::{plan_drop, DropPlan};
use crate::model::ids::{BoardId, ProjectId};
use crate::store::{BoardStore, Outcome};
use log::debug;

/// Gesture state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    Idle,
    /// An element is being dragged; `over` is the last hovered target.
    Dragging {
        active: DragId,
        over: Option<DragId>,
    },
    /// Transient state while a drop is reconciled and committed.
    Resolving { active: DragId },
}

/// What a finished gesture did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// `drag_end` arrived without a preceding `drag_start`.
    NotDragging,
    /// Dropped outside any droppable, or on an unrecognized target.
    NoTarget,
    /// Target resolved to a no-op (same position, self drop, stale ids).
    NoChange,
    /// A plan was committed to the store.
    Applied(DropPlan),
}

/// Drag session bound to one board.
#[derive(Debug)]
pub struct DragSession {
    project_id: ProjectId,
    board_id: BoardId,
    state: DragState,
}

impl DragSession {
    pub fn new(project_id: ProjectId, board_id: BoardId) -> Self {
        Self {
            project_id,
            board_id,
            state: DragState::Idle,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    /// Id of the element currently being dragged, for drag overlays.
    pub fn active(&self) -> Option<DragId> {
        match self.state {
            DragState::Idle => None,
            DragState::Dragging { active, .. } | DragState::Resolving { active } => Some(active),
        }
    }

    /// Starts a gesture. A start while already dragging replaces the active
    /// element. Unparseable ids leave the state unchanged.
    pub fn drag_start(&mut self, active_id: &str) -> Result<DragId, DragIdError> {
        let active = active_id.parse::<DragId>()?;
        debug!("event=drag_start module=drag status=ok active={active}");
        self.state = DragState::Dragging { active, over: None };
        Ok(active)
    }

    /// Records the hovered target. Unrecognized ids clear it.
    pub fn drag_over(&mut self, over_id: Option<&str>) {
        if let DragState::Dragging { active, .. } = self.state {
            self.state = DragState::Dragging {
                active,
                over: over_id.and_then(|raw| raw.parse().ok()),
            };
        }
    }

    /// Ends the gesture, committing at most one transformation.
    pub fn drag_end(&mut self, store: &mut BoardStore, over_id: Option<&str>) -> DropOutcome {
        let active = match self.state {
            DragState::Dragging { active, .. } => active,
            DragState::Idle | DragState::Resolving { .. } => {
                self.state = DragState::Idle;
                return DropOutcome::NotDragging;
            }
        };
        self.state = DragState::Resolving { active };
        let outcome = self.resolve(store, active, over_id);
        self.state = DragState::Idle;
        outcome
    }

    /// Abandons the gesture without touching the store.
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }

    fn resolve(&self, store: &mut BoardStore, active: DragId, over_id: Option<&str>) -> DropOutcome {
        let Some(over) = over_id.and_then(|raw| raw.parse::<DragId>().ok()) else {
            debug!("event=drag_end module=drag status=skip reason=no_target active={active}");
            return DropOutcome::NoTarget;
        };
        let Some(plan) = plan_drop(
            store.current(),
            self.project_id,
            self.board_id,
            active,
            Some(over),
        ) else {
            debug!("event=drag_end module=drag status=skip reason=no_change active={active} over={over}");
            return DropOutcome::NoChange;
        };
        match plan.commit(store, self.project_id, self.board_id) {
            Outcome::Applied => {
                debug!("event=drag_end module=drag status=ok active={active} over={over}");
                DropOutcome::Applied(plan)
            }
            Outcome::Skipped(reason) => {
                debug!("event=drag_end module=drag status=skip reason={reason} active={active}");
                DropOutcome::NoChange
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DragSession, DragState, DropOutcome};
    use crate::model::ids::{BoardId, ProjectId};
    use crate::store::BoardStore;

    #[test]
    fn drag_end_without_start_is_reported() {
        let mut store = BoardStore::new();
        let mut session = DragSession::new(ProjectId::new(), BoardId::new());
        assert_eq!(session.drag_end(&mut store, None), DropOutcome::NotDragging);
        assert_eq!(session.state(), DragState::Idle);
    }

    #[test]
    fn bad_start_id_keeps_session_idle() {
        let mut session = DragSession::new(ProjectId::new(), BoardId::new());
        assert!(session.drag_start("widget-1").is_err());
        assert_eq!(session.state(), DragState::Idle);
        assert!(session.active().is_none());
    }
}
