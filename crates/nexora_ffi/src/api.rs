//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose board, drag and notification use-cases to Dart via FRB.
//! - Own the process-wide `BoardStore` instance the UI mutates.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Ids cross the boundary as canonical UUID strings; drag ids keep their
//!   `list-`/`card-` prefix.
//! - Board reads are JSON trees materialized from one snapshot.

use log::warn;
use nexora_core::query::unread_count;
use nexora_core::{
    core_version as core_version_inner, init_logging_from, ping as ping_inner, BoardDraft,
    BoardId, BoardPatch, BoardStore, CardDraft, CardId, CardPatch, DragSession, DropOutcome,
    ListId, Member, NotificationId, Outcome, ProjectDraft, ProjectId, ProjectPatch, StoreResult,
};
use once_cell::sync::Lazy;
use std::fmt::Display;
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard, PoisonError};

static STORE: Lazy<Mutex<BoardStore>> = Lazy::new(|| Mutex::new(BoardStore::with_demo_data()));

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Reconfiguration attempts with different level or directory return error.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_from(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Generic action response envelope for board commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether the store applied the operation.
    pub ok: bool,
    /// Created or affected entity ID, when there is one.
    pub id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, id: Option<String>) -> Self {
        Self {
            ok: true,
            id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            message: message.into(),
        }
    }
}

/// Board member as entered in the share dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberInput {
    pub email: String,
    /// `member` or `manager`.
    pub role: String,
}

/// Replaces the process-wide store.
///
/// `seed_demo = true` restores the sample workspace; `false` starts empty.
#[flutter_rust_bridge::frb(sync)]
pub fn store_reset(seed_demo: bool) -> ActionResponse {
    let mut store = lock_store();
    *store = if seed_demo {
        BoardStore::with_demo_data()
    } else {
        BoardStore::new()
    };
    ActionResponse::success("Store reset.", None)
}

/// Returns every project as a nested JSON tree, in display order.
///
/// # FFI contract
/// - Never panics; returns `[]` if serialization fails.
#[flutter_rust_bridge::frb(sync)]
pub fn projects_json() -> String {
    let trees = lock_store().current().project_trees();
    to_json("projects_json", &trees, "[]")
}

/// Returns one board as a nested JSON tree, or `null` if it does not resolve.
#[flutter_rust_bridge::frb(sync)]
pub fn board_json(project_id: String, board_id: String) -> String {
    let (Ok(project_id), Ok(board_id)) = (
        parse_id::<ProjectId>("project_id", &project_id),
        parse_id::<BoardId>("board_id", &board_id),
    ) else {
        return "null".to_string();
    };
    let tree = lock_store().current().board_tree(project_id, board_id);
    to_json("board_json", &tree, "null")
}

#[flutter_rust_bridge::frb(sync)]
pub fn project_create(title: String, description: String) -> ActionResponse {
    created(
        "project_create",
        "Project created.",
        lock_store()
            .add_project(ProjectDraft::new(title, description))
            .map(Some),
    )
}

/// Creates a project with the default three-column starter board.
///
/// The returned `id` is the project id.
#[flutter_rust_bridge::frb(sync)]
pub fn project_create_with_board(
    title: String,
    description: String,
    owner_email: String,
) -> ActionResponse {
    let result = lock_store()
        .add_project_with_starter_board(ProjectDraft::new(title, description), &owner_email)
        .map(|(project_id, _)| Some(project_id));
    created("project_create_with_board", "Project created.", result)
}

#[flutter_rust_bridge::frb(sync)]
pub fn project_update(
    project_id: String,
    title: Option<String>,
    description: Option<String>,
) -> ActionResponse {
    let project_id = match parse_id::<ProjectId>("project_id", &project_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let patch = ProjectPatch { title, description };
    applied(
        "project_update",
        "Project updated.",
        lock_store().update_project(project_id, patch),
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn project_delete(project_id: String) -> ActionResponse {
    let project_id = match parse_id::<ProjectId>("project_id", &project_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    applied(
        "project_delete",
        "Project deleted.",
        Ok(lock_store().delete_project(project_id)),
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn board_add(project_id: String, title: String) -> ActionResponse {
    let project_id = match parse_id::<ProjectId>("project_id", &project_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    created(
        "board_add",
        "Board created.",
        lock_store().add_board(project_id, BoardDraft::new(title)),
    )
}

/// Replaces the board's member set with `members`.
#[flutter_rust_bridge::frb(sync)]
pub fn board_set_members(
    project_id: String,
    board_id: String,
    members: Vec<MemberInput>,
) -> ActionResponse {
    let ids = parse_id::<ProjectId>("project_id", &project_id)
        .and_then(|p| parse_id::<BoardId>("board_id", &board_id).map(|b| (p, b)));
    let (project_id, board_id) = match ids {
        Ok(ids) => ids,
        Err(response) => return response,
    };
    let members = match members
        .iter()
        .map(|input| {
            input
                .role
                .parse()
                .and_then(|role| Member::new(&input.email, role))
        })
        .collect::<Result<Vec<_>, _>>()
    {
        Ok(members) => members,
        Err(err) => return ActionResponse::failure(format!("board_set_members failed: {err}")),
    };
    applied(
        "board_set_members",
        "Board members updated.",
        lock_store().update_board(project_id, board_id, BoardPatch::members(members)),
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn board_rename(project_id: String, board_id: String, title: String) -> ActionResponse {
    let (project_id, board_id) = match parse_board_path(&project_id, &board_id) {
        Ok(path) => path,
        Err(response) => return response,
    };
    let patch = BoardPatch {
        title: Some(title),
        members: None,
    };
    applied(
        "board_rename",
        "Board renamed.",
        lock_store().update_board(project_id, board_id, patch),
    )
}

/// Deletes a board with its lists and cards.
#[flutter_rust_bridge::frb(sync)]
pub fn board_delete(project_id: String, board_id: String) -> ActionResponse {
    let (project_id, board_id) = match parse_board_path(&project_id, &board_id) {
        Ok(path) => path,
        Err(response) => return response,
    };
    applied(
        "board_delete",
        "Board deleted.",
        Ok(lock_store().delete_board(project_id, board_id)),
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn list_add(project_id: String, board_id: String, title: String) -> ActionResponse {
    let ids = parse_id::<ProjectId>("project_id", &project_id)
        .and_then(|p| parse_id::<BoardId>("board_id", &board_id).map(|b| (p, b)));
    let (project_id, board_id) = match ids {
        Ok(ids) => ids,
        Err(response) => return response,
    };
    created(
        "list_add",
        "List created.",
        lock_store().add_list(project_id, board_id, &title),
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn list_rename(
    project_id: String,
    board_id: String,
    list_id: String,
    title: String,
) -> ActionResponse {
    let (project_id, board_id, list_id) = match parse_list_path(&project_id, &board_id, &list_id) {
        Ok(path) => path,
        Err(response) => return response,
    };
    applied(
        "list_rename",
        "List renamed.",
        lock_store().update_list(project_id, board_id, list_id, &title),
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn list_delete(project_id: String, board_id: String, list_id: String) -> ActionResponse {
    let (project_id, board_id, list_id) = match parse_list_path(&project_id, &board_id, &list_id) {
        Ok(path) => path,
        Err(response) => return response,
    };
    applied(
        "list_delete",
        "List deleted.",
        Ok(lock_store().delete_list(project_id, board_id, list_id)),
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn card_add(
    project_id: String,
    board_id: String,
    list_id: String,
    title: String,
    description: Option<String>,
) -> ActionResponse {
    let (project_id, board_id, list_id) = match parse_list_path(&project_id, &board_id, &list_id) {
        Ok(path) => path,
        Err(response) => return response,
    };
    let mut draft = CardDraft::new(title);
    draft.description = description;
    created(
        "card_add",
        "Card created.",
        lock_store().add_card(project_id, board_id, list_id, draft),
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn card_rename(
    project_id: String,
    board_id: String,
    list_id: String,
    card_id: String,
    title: String,
) -> ActionResponse {
    let (project_id, board_id, list_id) = match parse_list_path(&project_id, &board_id, &list_id) {
        Ok(path) => path,
        Err(response) => return response,
    };
    let card_id = match parse_id::<CardId>("card_id", &card_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    applied(
        "card_rename",
        "Card updated.",
        lock_store().update_card(project_id, board_id, list_id, card_id, CardPatch::title(title)),
    )
}

/// `None` clears the description.
#[flutter_rust_bridge::frb(sync)]
pub fn card_set_description(
    project_id: String,
    board_id: String,
    list_id: String,
    card_id: String,
    description: Option<String>,
) -> ActionResponse {
    let patch = CardPatch {
        description: Some(description),
        ..CardPatch::default()
    };
    edit_card(
        "card_set_description",
        [&project_id, &board_id, &list_id, &card_id],
        patch,
    )
}

/// Replaces the card labels. Labels are trimmed and deduplicated.
#[flutter_rust_bridge::frb(sync)]
pub fn card_set_labels(
    project_id: String,
    board_id: String,
    list_id: String,
    card_id: String,
    labels: Vec<String>,
) -> ActionResponse {
    let patch = CardPatch {
        labels: Some(labels),
        ..CardPatch::default()
    };
    edit_card(
        "card_set_labels",
        [&project_id, &board_id, &list_id, &card_id],
        patch,
    )
}

/// Replaces the assigned member emails.
#[flutter_rust_bridge::frb(sync)]
pub fn card_set_assignees(
    project_id: String,
    board_id: String,
    list_id: String,
    card_id: String,
    emails: Vec<String>,
) -> ActionResponse {
    let patch = CardPatch {
        assigned_members: Some(emails),
        ..CardPatch::default()
    };
    edit_card(
        "card_set_assignees",
        [&project_id, &board_id, &list_id, &card_id],
        patch,
    )
}

/// Sets the due date in epoch milliseconds; `None` clears it.
#[flutter_rust_bridge::frb(sync)]
pub fn card_set_due_date(
    project_id: String,
    board_id: String,
    list_id: String,
    card_id: String,
    due_date_ms: Option<i64>,
) -> ActionResponse {
    let patch = CardPatch {
        due_date: Some(due_date_ms),
        ..CardPatch::default()
    };
    edit_card(
        "card_set_due_date",
        [&project_id, &board_id, &list_id, &card_id],
        patch,
    )
}

/// Appends an attachment reference (a file name) to the card.
#[flutter_rust_bridge::frb(sync)]
pub fn card_attach(
    project_id: String,
    board_id: String,
    list_id: String,
    card_id: String,
    name: String,
) -> ActionResponse {
    let (project_id, board_id, list_id, card_id) =
        match parse_card_path([&project_id, &board_id, &list_id, &card_id]) {
            Ok(path) => path,
            Err(response) => return response,
        };
    applied(
        "card_attach",
        "Attachment added.",
        lock_store().add_attachment(project_id, board_id, list_id, card_id, &name),
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn card_delete(
    project_id: String,
    board_id: String,
    list_id: String,
    card_id: String,
) -> ActionResponse {
    let (project_id, board_id, list_id) = match parse_list_path(&project_id, &board_id, &list_id) {
        Ok(path) => path,
        Err(response) => return response,
    };
    let card_id = match parse_id::<CardId>("card_id", &card_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    applied(
        "card_delete",
        "Card deleted.",
        Ok(lock_store().delete_card(project_id, board_id, list_id, card_id)),
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn card_comment(
    project_id: String,
    board_id: String,
    list_id: String,
    card_id: String,
    author: String,
    text: String,
) -> ActionResponse {
    let (project_id, board_id, list_id) = match parse_list_path(&project_id, &board_id, &list_id) {
        Ok(path) => path,
        Err(response) => return response,
    };
    let card_id = match parse_id::<CardId>("card_id", &card_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    applied(
        "card_comment",
        "Comment added.",
        lock_store().add_comment(project_id, board_id, list_id, card_id, &author, &text),
    )
}

/// Resolves a finished drag gesture against one board and commits it.
///
/// Input semantics:
/// - `active_id` / `over_id`: composite `list-<uuid>` / `card-<uuid>` ids.
/// - `over_id = None` means the element was dropped outside any target.
///
/// # FFI contract
/// - `ok = true` only when the drop changed the board.
/// - Never panics; unresolvable gestures report `ok = false`.
#[flutter_rust_bridge::frb(sync)]
pub fn drag_end(
    project_id: String,
    board_id: String,
    active_id: String,
    over_id: Option<String>,
) -> ActionResponse {
    let ids = parse_id::<ProjectId>("project_id", &project_id)
        .and_then(|p| parse_id::<BoardId>("board_id", &board_id).map(|b| (p, b)));
    let (project_id, board_id) = match ids {
        Ok(ids) => ids,
        Err(response) => return response,
    };
    let mut session = DragSession::new(project_id, board_id);
    if let Err(err) = session.drag_start(&active_id) {
        return ActionResponse::failure(format!("drag_end failed: {err}"));
    }
    match session.drag_end(&mut lock_store(), over_id.as_deref()) {
        DropOutcome::Applied(_) => ActionResponse::success("Drop applied.", Some(active_id)),
        DropOutcome::NoTarget => ActionResponse::failure("Dropped outside any target."),
        DropOutcome::NoChange => ActionResponse::failure("Drop changed nothing."),
        DropOutcome::NotDragging => ActionResponse::failure("No drag in progress."),
    }
}

/// Returns notifications as a JSON array, oldest first.
#[flutter_rust_bridge::frb(sync)]
pub fn notifications_json() -> String {
    let store = lock_store();
    to_json("notifications_json", store.current().notifications(), "[]")
}

#[flutter_rust_bridge::frb(sync)]
pub fn notification_unread_count() -> u32 {
    u32::try_from(unread_count(lock_store().current())).unwrap_or(u32::MAX)
}

#[flutter_rust_bridge::frb(sync)]
pub fn notification_mark_read(notification_id: String) -> ActionResponse {
    let id = match parse_id::<NotificationId>("notification_id", &notification_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    applied(
        "notification_mark_read",
        "Notification marked as read.",
        Ok(lock_store().mark_notification_read(id)),
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn notification_delete(notification_id: String) -> ActionResponse {
    let id = match parse_id::<NotificationId>("notification_id", &notification_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    applied(
        "notification_delete",
        "Notification deleted.",
        Ok(lock_store().delete_notification(id)),
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn notification_clear() -> ActionResponse {
    applied(
        "notification_clear",
        "Notifications cleared.",
        Ok(lock_store().clear_notifications()),
    )
}

fn lock_store() -> MutexGuard<'static, BoardStore> {
    // A panicking observer cannot leave a half-written snapshot behind.
    STORE.lock().unwrap_or_else(PoisonError::into_inner)
}

fn parse_id<T>(field: &'static str, raw: &str) -> Result<T, ActionResponse>
where
    T: FromStr,
    T::Err: Display,
{
    raw.parse::<T>().map_err(|err| {
        warn!("event=ffi_parse_id module=ffi status=error field={field}");
        ActionResponse::failure(format!("invalid {field}: {err}"))
    })
}

fn parse_board_path(project_id: &str, board_id: &str) -> Result<(ProjectId, BoardId), ActionResponse> {
    Ok((
        parse_id("project_id", project_id)?,
        parse_id("board_id", board_id)?,
    ))
}

fn parse_list_path(
    project_id: &str,
    board_id: &str,
    list_id: &str,
) -> Result<(ProjectId, BoardId, ListId), ActionResponse> {
    Ok((
        parse_id("project_id", project_id)?,
        parse_id("board_id", board_id)?,
        parse_id("list_id", list_id)?,
    ))
}

fn parse_card_path(
    [project_id, board_id, list_id, card_id]: [&str; 4],
) -> Result<(ProjectId, BoardId, ListId, CardId), ActionResponse> {
    let (project_id, board_id, list_id) = parse_list_path(project_id, board_id, list_id)?;
    Ok((project_id, board_id, list_id, parse_id("card_id", card_id)?))
}

fn edit_card(op: &'static str, path: [&str; 4], patch: CardPatch) -> ActionResponse {
    let (project_id, board_id, list_id, card_id) = match parse_card_path(path) {
        Ok(path) => path,
        Err(response) => return response,
    };
    applied(
        op,
        "Card updated.",
        lock_store().update_card(project_id, board_id, list_id, card_id, patch),
    )
}

fn created<T: Display>(
    op: &'static str,
    message: &str,
    result: StoreResult<Option<T>>,
) -> ActionResponse {
    match result {
        Ok(Some(id)) => ActionResponse::success(message, Some(id.to_string())),
        Ok(None) => ActionResponse::failure(format!("{op} skipped: parent not found")),
        Err(err) => ActionResponse::failure(format!("{op} failed: {err}")),
    }
}

fn applied(op: &'static str, message: &str, result: StoreResult<Outcome>) -> ActionResponse {
    match result {
        Ok(Outcome::Applied) => ActionResponse::success(message, None),
        Ok(Outcome::Skipped(reason)) => ActionResponse::failure(format!("{op} skipped: {reason}")),
        Err(err) => ActionResponse::failure(format!("{op} failed: {err}")),
    }
}

fn to_json<T: serde::Serialize + ?Sized>(op: &'static str, value: &T, fallback: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|err| {
        warn!("event={op} module=ffi status=error error={err}");
        fallback.to_string()
    })
}
