//! Observable store wrapping snapshot transformations.
//!
//! # Responsibility
//! - Validate payloads, apply the matching snapshot transformation, swap the
//!   canonical snapshot and broadcast it to observers.
//! - Emit metadata-only diagnostic events for applied and skipped writes.
//!
//! # Invariants
//! - Observers run after the new snapshot is installed, never mid-write.
//! - Skipped operations neither replace the snapshot nor notify.

use crate::model::board::{Board, List, Member, MemberRole, Project};
use crate::model::card::{Card, Comment};
use crate::model::ids::{BoardId, CardId, ListId, NotificationId, ProjectId};
use crate::model::notification::Notification;
use crate::model::now_epoch_ms;
use crate::model::validation::{normalize_email, normalize_title, ValidationError};
use crate::store::patch::{BoardDraft, BoardPatch, CardDraft, CardPatch, ProjectDraft, ProjectPatch};
use crate::store::seed;
use crate::store::snapshot::{Snapshot, Transform};
use crate::store::{Outcome, SkipReason, StoreError, StoreResult};
use log::{debug, warn};

/// Callback invoked with every newly installed snapshot.
pub type Observer = Box<dyn Fn(&Snapshot) + Send>;

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Authoritative holder of the board snapshot.
pub struct BoardStore {
    snapshot: Snapshot,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl Default for BoardStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardStore {
    /// Creates a store holding an empty snapshot.
    pub fn new() -> Self {
        Self::from_snapshot(Snapshot::new())
    }

    /// Creates a store around an existing snapshot.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            snapshot,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Creates a store seeded with the sample "Website Redesign" project.
    pub fn with_demo_data() -> Self {
        match seed::demo_snapshot() {
            Ok(snapshot) => Self::from_snapshot(snapshot),
            Err(reason) => {
                warn!("event=store_seed module=store status=error reason={reason}");
                Self::new()
            }
        }
    }

    /// Borrows the current snapshot.
    pub fn current(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Returns a handle to the current snapshot that stays valid after
    /// later mutations.
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot.clone()
    }

    pub fn subscribe(&mut self, observer: Observer) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, observer));
        id
    }

    /// Removes an observer. Returns `false` when the id is unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(subscription, _)| *subscription != id);
        self.observers.len() != before
    }

    // ----- projects ----------------------------------------------------

    pub fn add_project(&mut self, draft: ProjectDraft) -> StoreResult<ProjectId> {
        let title = validated("project_add", normalize_title("project", &draft.title))?;
        let project = Project {
            id: ProjectId::new(),
            title,
            description: draft.description,
            created_at: now_epoch_ms(),
            boards: Vec::new(),
        };
        let id = project.id;
        let next = self.snapshot.with_project_added(project).map_err(|reason| {
            warn!("event=project_add module=store status=error reason={reason}");
            StoreError::InconsistentState("fresh project id collided with an existing project")
        })?;
        self.install(next);
        debug!("event=project_add module=store status=ok project_id={id}");
        Ok(id)
    }

    /// Creates a project together with the default starter board.
    ///
    /// The whole tree lands in one snapshot replacement.
    pub fn add_project_with_starter_board(
        &mut self,
        draft: ProjectDraft,
        owner_email: &str,
    ) -> StoreResult<(ProjectId, BoardId)> {
        let title = validated("project_add_starter", normalize_title("project", &draft.title))?;
        let owner = validated("project_add_starter", normalize_email(owner_email))?;
        let project = Project {
            id: ProjectId::new(),
            title,
            description: draft.description,
            created_at: now_epoch_ms(),
            boards: Vec::new(),
        };
        let project_id = project.id;
        let owner = Member {
            email: owner,
            role: MemberRole::Manager,
        };
        let (board_id, next) = self
            .snapshot
            .with_project_added(project)
            .and_then(|with_project| seed::starter_board(&with_project, project_id, owner))
            .map_err(|reason| {
                warn!("event=project_add_starter module=store status=error reason={reason}");
                StoreError::InconsistentState("starter board could not attach to new project")
            })?;
        self.install(next);
        debug!(
            "event=project_add_starter module=store status=ok project_id={project_id} board_id={board_id}"
        );
        Ok((project_id, board_id))
    }

    pub fn update_project(&mut self, id: ProjectId, patch: ProjectPatch) -> StoreResult<Outcome> {
        let patch = validated("project_update", patch.normalized())?;
        let transform = self.snapshot.with_project_updated(id, &patch);
        Ok(self.commit("project_update", transform))
    }

    /// Deletes a project and every board, list and card under it.
    pub fn delete_project(&mut self, id: ProjectId) -> Outcome {
        let transform = self.snapshot.without_project(id);
        self.commit("project_delete", transform)
    }

    // ----- boards ------------------------------------------------------

    /// Appends a board. Returns `None` when the project does not exist.
    pub fn add_board(
        &mut self,
        project_id: ProjectId,
        draft: BoardDraft,
    ) -> StoreResult<Option<BoardId>> {
        let draft = validated("board_add", draft.normalized())?;
        let board = Board {
            id: BoardId::new(),
            project_id,
            title: draft.title,
            lists: Vec::new(),
            members: draft.members,
        };
        let id = board.id;
        let transform = self.snapshot.with_board_added(project_id, board);
        Ok(self.commit("board_add", transform).is_applied().then_some(id))
    }

    /// Merges board fields. A `members` value replaces the member set.
    pub fn update_board(
        &mut self,
        project_id: ProjectId,
        board_id: BoardId,
        patch: BoardPatch,
    ) -> StoreResult<Outcome> {
        let patch = validated("board_update", patch.normalized())?;
        let transform = self.snapshot.with_board_updated(project_id, board_id, &patch);
        Ok(self.commit("board_update", transform))
    }

    pub fn delete_board(&mut self, project_id: ProjectId, board_id: BoardId) -> Outcome {
        let transform = self.snapshot.without_board(project_id, board_id);
        self.commit("board_delete", transform)
    }

    // ----- lists -------------------------------------------------------

    pub fn add_list(
        &mut self,
        project_id: ProjectId,
        board_id: BoardId,
        title: &str,
    ) -> StoreResult<Option<ListId>> {
        let title = validated("list_add", normalize_title("list", title))?;
        let list = List {
            id: ListId::new(),
            board_id,
            title,
            cards: Vec::new(),
        };
        let id = list.id;
        let transform = self.snapshot.with_list_added(project_id, board_id, list);
        Ok(self.commit("list_add", transform).is_applied().then_some(id))
    }

    pub fn update_list(
        &mut self,
        project_id: ProjectId,
        board_id: BoardId,
        list_id: ListId,
        title: &str,
    ) -> StoreResult<Outcome> {
        let title = validated("list_update", normalize_title("list", title))?;
        let transform = self
            .snapshot
            .with_list_renamed(project_id, board_id, list_id, &title);
        Ok(self.commit("list_update", transform))
    }

    pub fn delete_list(&mut self, project_id: ProjectId, board_id: BoardId, list_id: ListId) -> Outcome {
        let transform = self.snapshot.without_list(project_id, board_id, list_id);
        self.commit("list_delete", transform)
    }

    /// Replaces the board's list order with `order`.
    ///
    /// `order` must be a permutation of the current list ids; anything else
    /// is skipped with `SkipReason::NotAPermutation`.
    pub fn reorder_lists(
        &mut self,
        project_id: ProjectId,
        board_id: BoardId,
        order: &[ListId],
    ) -> Outcome {
        let transform = self
            .snapshot
            .with_lists_reordered(project_id, board_id, order);
        self.commit("lists_reorder", transform)
    }

    // ----- cards -------------------------------------------------------

    pub fn add_card(
        &mut self,
        project_id: ProjectId,
        board_id: BoardId,
        list_id: ListId,
        draft: CardDraft,
    ) -> StoreResult<Option<CardId>> {
        let draft = validated("card_add", draft.normalized())?;
        let card = card_from_draft(list_id, draft);
        let id = card.id;
        let transform = self
            .snapshot
            .with_card_added(project_id, board_id, list_id, card);
        Ok(self.commit("card_add", transform).is_applied().then_some(id))
    }

    pub fn update_card(
        &mut self,
        project_id: ProjectId,
        board_id: BoardId,
        list_id: ListId,
        card_id: CardId,
        patch: CardPatch,
    ) -> StoreResult<Outcome> {
        let patch = validated("card_update", patch.normalized())?;
        let transform = self
            .snapshot
            .with_card_updated(project_id, board_id, list_id, card_id, &patch);
        Ok(self.commit("card_update", transform))
    }

    pub fn delete_card(
        &mut self,
        project_id: ProjectId,
        board_id: BoardId,
        list_id: ListId,
        card_id: CardId,
    ) -> Outcome {
        let transform = self
            .snapshot
            .without_card(project_id, board_id, list_id, card_id);
        self.commit("card_delete", transform)
    }

    /// Moves a card to `new_index` of `to_list_id`.
    ///
    /// Skipped unless both lists belong to the board and the card currently
    /// sits in `from_list_id`.
    pub fn move_card(
        &mut self,
        project_id: ProjectId,
        board_id: BoardId,
        card_id: CardId,
        from_list_id: ListId,
        to_list_id: ListId,
        new_index: usize,
    ) -> Outcome {
        let transform = self.snapshot.with_card_moved(
            project_id,
            board_id,
            card_id,
            from_list_id,
            to_list_id,
            new_index,
        );
        self.commit("card_move", transform)
    }

    /// Appends a timestamped comment to a card.
    pub fn add_comment(
        &mut self,
        project_id: ProjectId,
        board_id: BoardId,
        list_id: ListId,
        card_id: CardId,
        author: &str,
        text: &str,
    ) -> StoreResult<Outcome> {
        let author = author.trim();
        if author.is_empty() {
            return validated("card_comment", Err(ValidationError::EmptyAuthor));
        }
        let text = text.trim();
        if text.is_empty() {
            return validated("card_comment", Err(ValidationError::EmptyComment));
        }
        let comment = Comment {
            author: author.to_string(),
            text: text.to_string(),
            timestamp: now_epoch_ms(),
        };
        let transform = self
            .snapshot
            .with_card_edited(project_id, board_id, list_id, card_id, |card| {
                card.comments.push(comment)
            });
        Ok(self.commit("card_comment", transform))
    }

    /// Appends an opaque attachment reference to a card.
    pub fn add_attachment(
        &mut self,
        project_id: ProjectId,
        board_id: BoardId,
        list_id: ListId,
        card_id: CardId,
        name: &str,
    ) -> StoreResult<Outcome> {
        let name = name.trim();
        if name.is_empty() {
            return validated("card_attach", Err(ValidationError::EmptyAttachmentName));
        }
        let name = name.to_string();
        let transform = self
            .snapshot
            .with_card_edited(project_id, board_id, list_id, card_id, |card| {
                card.attachments.push(name)
            });
        Ok(self.commit("card_attach", transform))
    }

    // ----- notifications ---------------------------------------------

    /// Records an unread notification produced by an application event.
    pub fn push_notification(&mut self, message: impl Into<String>) -> NotificationId {
        let notification = Notification::new(message, now_epoch_ms());
        let id = notification.id;
        let next = self.snapshot.with_notification_pushed(notification);
        self.install(next);
        debug!("event=notification_push module=store status=ok notification_id={id}");
        id
    }

    pub fn mark_notification_read(&mut self, id: NotificationId) -> Outcome {
        let transform = self.snapshot.with_notification_read(id);
        self.commit("notification_read", transform)
    }

    pub fn delete_notification(&mut self, id: NotificationId) -> Outcome {
        let transform = self.snapshot.without_notification(id);
        self.commit("notification_delete", transform)
    }

    pub fn clear_notifications(&mut self) -> Outcome {
        let next = self.snapshot.without_notifications();
        self.commit("notification_clear", Ok(next))
    }

    // ----- internals ---------------------------------------------------

    fn commit(&mut self, event: &'static str, transform: Transform) -> Outcome {
        match transform {
            Ok(next) => {
                self.install(next);
                debug!("event={event} module=store status=ok");
                Outcome::Applied
            }
            Err(SkipReason::NotAPermutation) => {
                warn!("event={event} module=store status=skip reason=not_a_permutation");
                Outcome::Skipped(SkipReason::NotAPermutation)
            }
            Err(reason) => {
                debug!("event={event} module=store status=skip reason={reason}");
                Outcome::Skipped(reason)
            }
        }
    }

    fn install(&mut self, next: Snapshot) {
        self.snapshot = next;
        for (_, observer) in &self.observers {
            observer(&self.snapshot);
        }
    }
}

fn validated<T>(event: &'static str, result: Result<T, ValidationError>) -> StoreResult<T> {
    result.map_err(|err| {
        warn!("event={event} module=store status=error error={err}");
        StoreError::Validation(err)
    })
}

pub(crate) fn card_from_draft(list_id: ListId, draft: CardDraft) -> Card {
    Card {
        id: CardId::new(),
        list_id,
        title: draft.title,
        description: draft.description,
        labels: draft.labels,
        assigned_members: draft.assigned_members,
        due_date: draft.due_date,
        attachments: draft.attachments,
        comments: draft.comments,
    }
}
