//! Pure drop reconciliation.
//!
//! # Responsibility
//! - Turn a finished gesture `(active, over)` into at most one tree
//!   transformation: a list reorder or a card move.
//!
//! # Invariants
//! - Reconciliation reads the snapshot only; it never mutates.
//! - Any unresolved list/card yields no plan, leaving the tree untouched.
//! - Dropping a card onto itself yields no plan.

use crate::drag::drag_id::DragId;
use crate::model::ids::{BoardId, CardId, ListId, ProjectId};
use crate::store::snapshot::{Snapshot, Transform};
use crate::store::{BoardStore, Outcome};

/// The single transformation a drop resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropPlan {
    /// Replace the board's list order with `order`.
    ReorderLists { order: Vec<ListId> },
    /// Move one card to `index` of `to_list_id`.
    MoveCard {
        card_id: CardId,
        from_list_id: ListId,
        to_list_id: ListId,
        index: usize,
    },
}

impl DropPlan {
    /// Applies the plan to a snapshot without touching any store.
    pub fn apply_to(
        &self,
        snapshot: &Snapshot,
        project_id: ProjectId,
        board_id: BoardId,
    ) -> Transform {
        match self {
            Self::ReorderLists { order } => {
                snapshot.with_lists_reordered(project_id, board_id, order)
            }
            Self::MoveCard {
                card_id,
                from_list_id,
                to_list_id,
                index,
            } => snapshot.with_card_moved(
                project_id,
                board_id,
                *card_id,
                *from_list_id,
                *to_list_id,
                *index,
            ),
        }
    }

    /// Commits the plan through the store's public operations.
    pub fn commit(&self, store: &mut BoardStore, project_id: ProjectId, board_id: BoardId) -> Outcome {
        match self {
            Self::ReorderLists { order } => store.reorder_lists(project_id, board_id, order),
            Self::MoveCard {
                card_id,
                from_list_id,
                to_list_id,
                index,
            } => store.move_card(
                project_id,
                board_id,
                *card_id,
                *from_list_id,
                *to_list_id,
                *index,
            ),
        }
    }
}

/// Resolves a drop against the board `project_id/board_id`.
///
/// Returns `None` for every no-op case: no target, same-position list drop,
/// list dropped on a card, card dropped on itself, or any id that does not
/// resolve on this board.
pub fn plan_drop(
    snapshot: &Snapshot,
    project_id: ProjectId,
    board_id: BoardId,
    active: DragId,
    over: Option<DragId>,
) -> Option<DropPlan> {
    let over = over?;
    let board = snapshot.board_in(project_id, board_id)?;

    match (active, over) {
        (DragId::List(active_list), DragId::List(over_list)) => {
            let old_index = board.lists.iter().position(|id| *id == active_list)?;
            let new_index = board.lists.iter().position(|id| *id == over_list)?;
            if old_index == new_index {
                return None;
            }
            Some(DropPlan::ReorderLists {
                order: array_move(&board.lists, old_index, new_index),
            })
        }
        (DragId::List(_), DragId::Card(_)) => None,
        (DragId::Card(card_id), target) => {
            let source = snapshot.list_containing(board_id, card_id)?;
            let (to_list_id, index) = match target {
                DragId::List(list_id) => {
                    snapshot.list_in(project_id, board_id, list_id)?;
                    (list_id, 0)
                }
                DragId::Card(over_card) => {
                    let list = snapshot.list_containing(board_id, over_card)?;
                    (list.id, list.position_of(over_card)?)
                }
            };
            if source.id == to_list_id && active == over {
                return None;
            }
            Some(DropPlan::MoveCard {
                card_id,
                from_list_id: source.id,
                to_list_id,
                index,
            })
        }
    }
}

/// Computes the tree a drop produces. Returns an unchanged handle for no-ops.
pub fn reconcile(
    snapshot: &Snapshot,
    project_id: ProjectId,
    board_id: BoardId,
    active: DragId,
    over: Option<DragId>,
) -> Snapshot {
    plan_drop(snapshot, project_id, board_id, active, over)
        .and_then(|plan| plan.apply_to(snapshot, project_id, board_id).ok())
        .unwrap_or_else(|| snapshot.clone())
}

/// Removes the element at `from` and reinserts it at `to`.
///
/// Out-of-range `from` returns the input unchanged; `to` is clamped.
pub fn array_move<T: Clone>(items: &[T], from: usize, to: usize) -> Vec<T> {
    let mut moved = items.to_vec();
    if from >= moved.len() {
        return moved;
    }
    let item = moved.remove(from);
    let to = to.min(moved.len());
    moved.insert(to, item);
    moved
}
