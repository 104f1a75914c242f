//! Immutable arena snapshot of the board hierarchy.
//!
//! # Responsibility
//! - Store projects, boards, lists and cards in flat id-keyed tables with
//!   parent/child links as id references.
//! - Provide pure transformations (`&self -> new Snapshot`) for every store
//!   mutation.
//!
//! # Invariants
//! - A snapshot never changes after construction. Transformations clone the
//!   touched tables and records lazily through `Arc::make_mut`, so handles to
//!   older snapshots keep observing their original values.
//! - A card id appears in exactly one list's `cards` sequence, and that list
//!   is the card's `list_id`.
//! - Deleting a container removes every descendant record.

use crate::model::board::{Board, List, Project};
use crate::model::card::Card;
use crate::model::ids::{BoardId, CardId, ListId, NotificationId, ProjectId};
use crate::model::notification::Notification;
use crate::store::patch::{BoardPatch, CardPatch, ProjectPatch};
use crate::store::SkipReason;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

type Table<K, V> = Arc<HashMap<K, Arc<V>>>;

/// Result of a pure snapshot transformation.
pub type Transform = Result<Snapshot, SkipReason>;

/// Point-in-time value of all projects and notifications.
///
/// Cloning is cheap: tables are shared until one side writes.
/// Equality is structural (deep) equality.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    project_order: Arc<Vec<ProjectId>>,
    projects: Table<ProjectId, Project>,
    boards: Table<BoardId, Board>,
    lists: Table<ListId, List>,
    cards: Table<CardId, Card>,
    notifications: Arc<Vec<Notification>>,
}

impl Snapshot {
    /// Returns an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    // ----- reads -------------------------------------------------------

    /// Projects in display order.
    pub fn projects(&self) -> impl Iterator<Item = &Project> + '_ {
        self.project_order
            .iter()
            .filter_map(|id| self.projects.get(id).map(Arc::as_ref))
    }

    pub fn project_count(&self) -> usize {
        self.project_order.len()
    }

    pub fn project(&self, id: ProjectId) -> Option<&Project> {
        self.projects.get(&id).map(Arc::as_ref)
    }

    pub fn board(&self, id: BoardId) -> Option<&Board> {
        self.boards.get(&id).map(Arc::as_ref)
    }

    pub fn list(&self, id: ListId) -> Option<&List> {
        self.lists.get(&id).map(Arc::as_ref)
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.get(&id).map(Arc::as_ref)
    }

    pub fn notifications(&self) -> &[Notification] {
        self.notifications.as_slice()
    }

    /// Resolves a board only when it belongs to `project_id`.
    pub fn board_in(&self, project_id: ProjectId, board_id: BoardId) -> Option<&Board> {
        self.project(project_id)?;
        self.board(board_id)
            .filter(|board| board.project_id == project_id)
    }

    /// Resolves a list only when it belongs to the given project/board path.
    pub fn list_in(
        &self,
        project_id: ProjectId,
        board_id: BoardId,
        list_id: ListId,
    ) -> Option<&List> {
        self.board_in(project_id, board_id)?;
        self.list(list_id).filter(|list| list.board_id == board_id)
    }

    /// Resolves a card only when it currently sits in `list_id`.
    pub fn card_in(
        &self,
        project_id: ProjectId,
        board_id: BoardId,
        list_id: ListId,
        card_id: CardId,
    ) -> Option<&Card> {
        self.list_in(project_id, board_id, list_id)?;
        self.card(card_id).filter(|card| card.list_id == list_id)
    }

    /// Lists of a board in display order.
    pub fn board_lists(&self, board_id: BoardId) -> Vec<&List> {
        self.board(board_id)
            .map(|board| {
                board
                    .lists
                    .iter()
                    .filter_map(|id| self.list(*id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Cards of a list in display order.
    pub fn list_cards(&self, list_id: ListId) -> Vec<&Card> {
        self.list(list_id)
            .map(|list| list.cards.iter().filter_map(|id| self.card(*id)).collect())
            .unwrap_or_default()
    }

    /// Returns the list of `board_id` that currently holds `card_id`.
    pub fn list_containing(&self, board_id: BoardId, card_id: CardId) -> Option<&List> {
        let card = self.card(card_id)?;
        self.list(card.list_id)
            .filter(|list| list.board_id == board_id)
    }

    /// Total number of cards across all lists of a board.
    pub fn board_card_count(&self, board_id: BoardId) -> usize {
        self.board_lists(board_id)
            .iter()
            .map(|list| list.cards.len())
            .sum()
    }

    // ----- project transforms -----------------------------------------

    /// Appends a project. Its board sequence must be empty.
    pub(crate) fn with_project_added(&self, project: Project) -> Transform {
        if self.projects.contains_key(&project.id) {
            return Err(SkipReason::DuplicateId);
        }
        if !project.boards.is_empty() {
            return Err(SkipReason::NonEmptyChildren);
        }
        let mut next = self.clone();
        Arc::make_mut(&mut next.project_order).push(project.id);
        Arc::make_mut(&mut next.projects).insert(project.id, Arc::new(project));
        Ok(next)
    }

    pub fn with_project_updated(&self, id: ProjectId, patch: &ProjectPatch) -> Transform {
        self.project(id).ok_or(SkipReason::ProjectNotFound)?;
        let mut next = self.clone();
        let project = next
            .project_mut(id)
            .ok_or(SkipReason::ProjectNotFound)?;
        patch.apply_to(project);
        Ok(next)
    }

    /// Removes a project with all of its boards, lists and cards.
    pub fn without_project(&self, id: ProjectId) -> Transform {
        let project = self.project(id).ok_or(SkipReason::ProjectNotFound)?;
        let board_ids = project.boards.clone();
        let mut next = self.clone();
        Arc::make_mut(&mut next.project_order).retain(|project_id| *project_id != id);
        Arc::make_mut(&mut next.projects).remove(&id);
        for board_id in board_ids {
            next.purge_board(board_id);
        }
        Ok(next)
    }

    // ----- board transforms -------------------------------------------

    /// Appends a board to a project. Its list sequence must be empty.
    pub(crate) fn with_board_added(&self, project_id: ProjectId, board: Board) -> Transform {
        self.project(project_id)
            .ok_or(SkipReason::ProjectNotFound)?;
        if self.boards.contains_key(&board.id) {
            return Err(SkipReason::DuplicateId);
        }
        if !board.lists.is_empty() {
            return Err(SkipReason::NonEmptyChildren);
        }
        let mut next = self.clone();
        next.project_mut(project_id)
            .ok_or(SkipReason::ProjectNotFound)?
            .boards
            .push(board.id);
        let board = Board {
            project_id,
            ..board
        };
        Arc::make_mut(&mut next.boards).insert(board.id, Arc::new(board));
        Ok(next)
    }

    pub fn with_board_updated(
        &self,
        project_id: ProjectId,
        board_id: BoardId,
        patch: &BoardPatch,
    ) -> Transform {
        self.board_in(project_id, board_id)
            .ok_or(SkipReason::BoardNotFound)?;
        let mut next = self.clone();
        let board = next.board_mut(board_id).ok_or(SkipReason::BoardNotFound)?;
        patch.apply_to(board);
        Ok(next)
    }

    pub fn without_board(&self, project_id: ProjectId, board_id: BoardId) -> Transform {
        self.board_in(project_id, board_id)
            .ok_or(SkipReason::BoardNotFound)?;
        let mut next = self.clone();
        next.project_mut(project_id)
            .ok_or(SkipReason::ProjectNotFound)?
            .boards
            .retain(|id| *id != board_id);
        next.purge_board(board_id);
        Ok(next)
    }

    // ----- list transforms --------------------------------------------

    /// Appends a list to a board. Its card sequence must be empty.
    pub(crate) fn with_list_added(
        &self,
        project_id: ProjectId,
        board_id: BoardId,
        list: List,
    ) -> Transform {
        self.board_in(project_id, board_id)
            .ok_or(SkipReason::BoardNotFound)?;
        if self.lists.contains_key(&list.id) {
            return Err(SkipReason::DuplicateId);
        }
        if !list.cards.is_empty() {
            return Err(SkipReason::NonEmptyChildren);
        }
        let mut next = self.clone();
        next.board_mut(board_id)
            .ok_or(SkipReason::BoardNotFound)?
            .lists
            .push(list.id);
        let list = List { board_id, ..list };
        Arc::make_mut(&mut next.lists).insert(list.id, Arc::new(list));
        Ok(next)
    }

    pub fn with_list_renamed(
        &self,
        project_id: ProjectId,
        board_id: BoardId,
        list_id: ListId,
        title: &str,
    ) -> Transform {
        self.list_in(project_id, board_id, list_id)
            .ok_or(SkipReason::ListNotFound)?;
        let mut next = self.clone();
        next.list_mut(list_id).ok_or(SkipReason::ListNotFound)?.title = title.to_string();
        Ok(next)
    }

    /// Removes a list and its cards.
    pub fn without_list(&self, project_id: ProjectId, board_id: BoardId, list_id: ListId) -> Transform {
        self.list_in(project_id, board_id, list_id)
            .ok_or(SkipReason::ListNotFound)?;
        let mut next = self.clone();
        next.board_mut(board_id)
            .ok_or(SkipReason::BoardNotFound)?
            .lists
            .retain(|id| *id != list_id);
        next.purge_list(list_id);
        Ok(next)
    }

    /// Replaces a board's list order with a permutation of its current lists.
    pub fn with_lists_reordered(
        &self,
        project_id: ProjectId,
        board_id: BoardId,
        order: &[ListId],
    ) -> Transform {
        let board = self
            .board_in(project_id, board_id)
            .ok_or(SkipReason::BoardNotFound)?;
        if !is_permutation(&board.lists, order) {
            return Err(SkipReason::NotAPermutation);
        }
        let mut next = self.clone();
        next.board_mut(board_id).ok_or(SkipReason::BoardNotFound)?.lists = order.to_vec();
        Ok(next)
    }

    // ----- card transforms --------------------------------------------

    /// Appends a card to a list. The card id must be new.
    pub(crate) fn with_card_added(
        &self,
        project_id: ProjectId,
        board_id: BoardId,
        list_id: ListId,
        card: Card,
    ) -> Transform {
        self.list_in(project_id, board_id, list_id)
            .ok_or(SkipReason::ListNotFound)?;
        if self.cards.contains_key(&card.id) {
            return Err(SkipReason::DuplicateId);
        }
        let mut next = self.clone();
        next.list_mut(list_id)
            .ok_or(SkipReason::ListNotFound)?
            .cards
            .push(card.id);
        let card = Card { list_id, ..card };
        Arc::make_mut(&mut next.cards).insert(card.id, Arc::new(card));
        Ok(next)
    }

    pub fn with_card_updated(
        &self,
        project_id: ProjectId,
        board_id: BoardId,
        list_id: ListId,
        card_id: CardId,
        patch: &CardPatch,
    ) -> Transform {
        self.with_card_edited(project_id, board_id, list_id, card_id, |card| {
            patch.apply_to(card)
        })
    }

    /// Applies an arbitrary edit to one card addressed by its full path.
    pub fn with_card_edited<F>(
        &self,
        project_id: ProjectId,
        board_id: BoardId,
        list_id: ListId,
        card_id: CardId,
        edit: F,
    ) -> Transform
    where
        F: FnOnce(&mut Card),
    {
        self.card_in(project_id, board_id, list_id, card_id)
            .ok_or(SkipReason::CardNotFound)?;
        let mut next = self.clone();
        edit(next.card_mut(card_id).ok_or(SkipReason::CardNotFound)?);
        Ok(next)
    }

    pub fn without_card(
        &self,
        project_id: ProjectId,
        board_id: BoardId,
        list_id: ListId,
        card_id: CardId,
    ) -> Transform {
        self.card_in(project_id, board_id, list_id, card_id)
            .ok_or(SkipReason::CardNotFound)?;
        let mut next = self.clone();
        next.list_mut(list_id)
            .ok_or(SkipReason::ListNotFound)?
            .cards
            .retain(|id| *id != card_id);
        Arc::make_mut(&mut next.cards).remove(&card_id);
        Ok(next)
    }

    /// Moves a card from one list to another (or within one list).
    ///
    /// The card is removed from `from_list_id` first, then inserted at
    /// `min(new_index, len)` of the destination sequence as it stands after
    /// the removal.
    pub fn with_card_moved(
        &self,
        project_id: ProjectId,
        board_id: BoardId,
        card_id: CardId,
        from_list_id: ListId,
        to_list_id: ListId,
        new_index: usize,
    ) -> Transform {
        self.list_in(project_id, board_id, from_list_id)
            .ok_or(SkipReason::ListNotFound)?;
        self.list_in(project_id, board_id, to_list_id)
            .ok_or(SkipReason::ListNotFound)?;
        self.card_in(project_id, board_id, from_list_id, card_id)
            .ok_or(SkipReason::CardNotFound)?;

        let mut next = self.clone();
        next.list_mut(from_list_id)
            .ok_or(SkipReason::ListNotFound)?
            .cards
            .retain(|id| *id != card_id);
        let destination = &mut next.list_mut(to_list_id).ok_or(SkipReason::ListNotFound)?.cards;
        let index = new_index.min(destination.len());
        destination.insert(index, card_id);
        if from_list_id != to_list_id {
            next.card_mut(card_id).ok_or(SkipReason::CardNotFound)?.list_id = to_list_id;
        }
        Ok(next)
    }

    // ----- notification transforms ------------------------------------

    pub fn with_notification_pushed(&self, notification: Notification) -> Snapshot {
        let mut next = self.clone();
        Arc::make_mut(&mut next.notifications).push(notification);
        next
    }

    pub fn with_notification_read(&self, id: NotificationId) -> Transform {
        let position = self
            .notifications
            .iter()
            .position(|notification| notification.id == id)
            .ok_or(SkipReason::NotificationNotFound)?;
        let mut next = self.clone();
        Arc::make_mut(&mut next.notifications)[position].read = true;
        Ok(next)
    }

    pub fn without_notification(&self, id: NotificationId) -> Transform {
        if !self.notifications.iter().any(|notification| notification.id == id) {
            return Err(SkipReason::NotificationNotFound);
        }
        let mut next = self.clone();
        Arc::make_mut(&mut next.notifications).retain(|notification| notification.id != id);
        Ok(next)
    }

    pub fn without_notifications(&self) -> Snapshot {
        Snapshot {
            notifications: Arc::new(Vec::new()),
            ..self.clone()
        }
    }

    // ----- internals ---------------------------------------------------

    fn project_mut(&mut self, id: ProjectId) -> Option<&mut Project> {
        Arc::make_mut(&mut self.projects)
            .get_mut(&id)
            .map(Arc::make_mut)
    }

    fn board_mut(&mut self, id: BoardId) -> Option<&mut Board> {
        Arc::make_mut(&mut self.boards).get_mut(&id).map(Arc::make_mut)
    }

    fn list_mut(&mut self, id: ListId) -> Option<&mut List> {
        Arc::make_mut(&mut self.lists).get_mut(&id).map(Arc::make_mut)
    }

    fn card_mut(&mut self, id: CardId) -> Option<&mut Card> {
        Arc::make_mut(&mut self.cards).get_mut(&id).map(Arc::make_mut)
    }

    fn purge_board(&mut self, board_id: BoardId) {
        let Some(board) = Arc::make_mut(&mut self.boards).remove(&board_id) else {
            return;
        };
        for list_id in &board.lists {
            self.purge_list(*list_id);
        }
    }

    fn purge_list(&mut self, list_id: ListId) {
        let Some(list) = Arc::make_mut(&mut self.lists).remove(&list_id) else {
            return;
        };
        let cards = Arc::make_mut(&mut self.cards);
        for card_id in &list.cards {
            cards.remove(card_id);
        }
    }
}

fn is_permutation(current: &[ListId], proposed: &[ListId]) -> bool {
    if current.len() != proposed.len() {
        return false;
    }
    let current: HashSet<&ListId> = current.iter().collect();
    let proposed_set: HashSet<&ListId> = proposed.iter().collect();
    proposed_set.len() == proposed.len() && current == proposed_set
}
