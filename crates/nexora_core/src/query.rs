//! Read-only dashboard and notification projections.
//!
//! # Responsibility
//! - Derive search, sort and summary views from a snapshot.
//!
//! # Invariants
//! - Query functions never mutate; they borrow the snapshot they are given.
//! - Sort order is deterministic: ties fall back to project id.

use crate::model::board::{Board, Project};
use crate::model::ids::{BoardId, ProjectId};
use crate::store::snapshot::Snapshot;
use std::cmp::Ordering;

/// Dashboard sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectSortField {
    /// Case-insensitive title.
    Name,
    /// `created_at`.
    Creation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl ProjectSortField {
    /// Direction the dashboard picks when the field is first selected:
    /// A-Z for names, newest first for creation time.
    pub fn default_order(self) -> SortOrder {
        match self {
            Self::Name => SortOrder::Ascending,
            Self::Creation => SortOrder::Descending,
        }
    }
}

/// Summary numbers shown on a board header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardStats {
    pub list_count: usize,
    pub card_count: usize,
    pub overdue_count: usize,
    pub member_count: usize,
}

/// Projects whose title or description contains `text`, case-insensitively.
///
/// Blank `text` matches every project. Result keeps display order.
pub fn search_projects<'a>(snapshot: &'a Snapshot, text: &str) -> Vec<&'a Project> {
    let needle = text.trim().to_lowercase();
    snapshot
        .projects()
        .filter(|project| {
            needle.is_empty()
                || project.title.to_lowercase().contains(&needle)
                || project.description.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Sorts projects in place by `field` and `order`.
pub fn sort_projects(projects: &mut [&Project], field: ProjectSortField, order: SortOrder) {
    projects.sort_by(|left, right| {
        let primary = match field {
            ProjectSortField::Name => compare_titles(&left.title, &right.title),
            ProjectSortField::Creation => left.created_at.cmp(&right.created_at),
        };
        let ordered = match order {
            SortOrder::Ascending => primary,
            SortOrder::Descending => primary.reverse(),
        };
        ordered.then_with(|| left.id.cmp(&right.id))
    });
}

/// Number of notifications not yet marked read.
pub fn unread_count(snapshot: &Snapshot) -> usize {
    snapshot
        .notifications()
        .iter()
        .filter(|notification| !notification.read)
        .count()
}

/// Board header numbers. `now_ms` decides which due dates are overdue.
pub fn board_stats(
    snapshot: &Snapshot,
    project_id: ProjectId,
    board_id: BoardId,
    now_ms: i64,
) -> Option<BoardStats> {
    let board = snapshot.board_in(project_id, board_id)?;
    let lists = snapshot.board_lists(board_id);
    let overdue_count = lists
        .iter()
        .flat_map(|list| snapshot.list_cards(list.id))
        .filter(|card| card.is_overdue(now_ms))
        .count();
    Some(BoardStats {
        list_count: lists.len(),
        card_count: snapshot.board_card_count(board_id),
        overdue_count,
        member_count: board.members.len(),
    })
}

/// Board a project opens on from the dashboard.
pub fn first_board(snapshot: &Snapshot, project_id: ProjectId) -> Option<&Board> {
    let project = snapshot.project(project_id)?;
    project
        .boards
        .iter()
        .find_map(|board_id| snapshot.board(*board_id))
}

/// Compares two project titles the way the dashboard displays them.
pub fn compare_titles(left: &str, right: &str) -> Ordering {
    left.to_lowercase().cmp(&right.to_lowercase())
}
