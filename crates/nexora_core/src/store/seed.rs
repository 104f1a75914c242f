//! Built-in board content: the demo workspace and the starter board.

use crate::model::board::{Board, List, Member, MemberRole, Project};
use crate::model::ids::{BoardId, ListId, ProjectId};
use crate::model::notification::Notification;
use crate::model::now_epoch_ms;
use crate::store::board_store::card_from_draft;
use crate::store::patch::CardDraft;
use crate::store::snapshot::{Snapshot, Transform};
use crate::store::SkipReason;

const STARTER_BOARD_TITLE: &str = "Main Board";
const HOUR_MS: i64 = 60 * 60 * 1000;
/// 2025-11-01T00:00:00Z
const DEMO_DUE_DATE_MS: i64 = 1_761_955_200_000;

/// Sample workspace: one project, one board with three lists, one card,
/// two members and two unread notifications.
pub(crate) fn demo_snapshot() -> Transform {
    let now = now_epoch_ms();
    let project_id = ProjectId::new();
    let board_id = BoardId::new();
    let snapshot = Snapshot::new().with_project_added(Project {
        id: project_id,
        title: "Website Redesign".to_string(),
        description: "Complete overhaul of company website".to_string(),
        created_at: now,
        boards: Vec::new(),
    })?;
    let snapshot = snapshot.with_board_added(
        project_id,
        empty_board(
            board_id,
            project_id,
            vec![
                Member {
                    email: "designer@nexora.io".to_string(),
                    role: MemberRole::Manager,
                },
                Member {
                    email: "dev@nexora.io".to_string(),
                    role: MemberRole::Member,
                },
            ],
        ),
    )?;

    let mut draft = CardDraft::new("Design homepage mockup")
        .with_description("Create initial design concepts")
        .with_labels(["design", "high-priority"])
        .with_due_date(DEMO_DUE_DATE_MS);
    draft.assigned_members = vec!["designer@nexora.io".to_string()];

    let snapshot = with_lists(
        snapshot,
        project_id,
        board_id,
        vec![("To Do", vec![draft]), ("In Progress", Vec::new()), ("Done", Vec::new())],
    )?;

    Ok(snapshot
        .with_notification_pushed(Notification::new(
            "New task assigned: Design homepage mockup",
            now,
        ))
        .with_notification_pushed(Notification::new(
            "Project \"Website Redesign\" updated",
            now - HOUR_MS,
        )))
}

/// Attaches the default three-column board to an existing, empty project.
pub(crate) fn starter_board(
    snapshot: &Snapshot,
    project_id: ProjectId,
    owner: Member,
) -> Result<(BoardId, Snapshot), SkipReason> {
    let board_id = BoardId::new();
    let snapshot = snapshot.with_board_added(project_id, empty_board(board_id, project_id, vec![owner]))?;
    let snapshot = with_lists(
        snapshot,
        project_id,
        board_id,
        vec![
            (
                "To Do",
                vec![
                    CardDraft::new("Welcome to your board!")
                        .with_description(
                            "This is your first card. You can edit it by clicking on it.",
                        )
                        .with_labels(["welcome"]),
                    CardDraft::new("Drag and drop cards")
                        .with_description("Try moving this card to \"In Progress\" or \"Done\"")
                        .with_labels(["tutorial"]),
                ],
            ),
            (
                "In Progress",
                vec![CardDraft::new("Sample task in progress")
                    .with_description(
                        "This card shows how tasks look when they are being worked on",
                    )
                    .with_labels(["sample", "in-progress"])],
            ),
            (
                "Done",
                vec![CardDraft::new("Completed task example")
                    .with_description("This is how completed tasks appear in your board")
                    .with_labels(["sample", "completed"])],
            ),
        ],
    )?;
    Ok((board_id, snapshot))
}

fn empty_board(id: BoardId, project_id: ProjectId, members: Vec<Member>) -> Board {
    Board {
        id,
        project_id,
        title: STARTER_BOARD_TITLE.to_string(),
        lists: Vec::new(),
        members,
    }
}

fn with_lists(
    mut snapshot: Snapshot,
    project_id: ProjectId,
    board_id: BoardId,
    lists: Vec<(&str, Vec<CardDraft>)>,
) -> Transform {
    for (title, cards) in lists {
        let list_id = ListId::new();
        snapshot = snapshot.with_list_added(
            project_id,
            board_id,
            List {
                id: list_id,
                board_id,
                title: title.to_string(),
                cards: Vec::new(),
            },
        )?;
        for draft in cards {
            snapshot = snapshot.with_card_added(
                project_id,
                board_id,
                list_id,
                card_from_draft(list_id, draft),
            )?;
        }
    }
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::{demo_snapshot, starter_board};
    use crate::model::board::{Member, MemberRole, Project};
    use crate::model::ids::ProjectId;
    use crate::store::snapshot::Snapshot;

    #[test]
    fn demo_snapshot_matches_sample_workspace() {
        let snapshot = demo_snapshot().unwrap();
        let project = snapshot.projects().next().unwrap();
        assert_eq!(project.title, "Website Redesign");

        let board = snapshot.board(project.boards[0]).unwrap();
        let titles: Vec<&str> = snapshot
            .board_lists(board.id)
            .iter()
            .map(|list| list.title.as_str())
            .collect();
        assert_eq!(titles, vec!["To Do", "In Progress", "Done"]);
        assert_eq!(snapshot.board_card_count(board.id), 1);
        assert_eq!(board.members.len(), 2);
        assert_eq!(snapshot.notifications().len(), 2);
        assert!(snapshot.notifications().iter().all(|n| !n.read));
    }

    #[test]
    fn starter_board_requires_existing_project() {
        let owner = Member {
            email: "owner@nexora.io".to_string(),
            role: MemberRole::Manager,
        };
        assert!(starter_board(&Snapshot::new(), ProjectId::new(), owner.clone()).is_err());

        let project_id = ProjectId::new();
        let snapshot = Snapshot::new().with_project_added(Project {
            id: project_id,
            title: "New".to_string(),
            description: String::new(),
            created_at: 0,
            boards: Vec::new(),
        })
        .unwrap();
        let (board_id, snapshot) = starter_board(&snapshot, project_id, owner).unwrap();
        assert_eq!(snapshot.board_card_count(board_id), 4);
    }
}
