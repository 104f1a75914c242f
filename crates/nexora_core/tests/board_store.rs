use nexora_core::{
    BoardDraft, BoardId, BoardPatch, BoardStore, CardDraft, CardId, CardPatch, ListId, Member,
    MemberRole, Outcome, ProjectDraft, ProjectId, ProjectPatch, SkipReason, StoreError,
    ValidationError,
};

struct Fixture {
    store: BoardStore,
    project_id: ProjectId,
    board_id: BoardId,
    lists: Vec<ListId>,
}

fn setup(list_titles: &[&str]) -> Fixture {
    let mut store = BoardStore::new();
    let project_id = store
        .add_project(ProjectDraft::new("Launch", "Q3 launch plan"))
        .unwrap();
    let board_id = store
        .add_board(project_id, BoardDraft::new("Main"))
        .unwrap()
        .expect("project exists");
    let lists = list_titles
        .iter()
        .map(|title| {
            store
                .add_list(project_id, board_id, title)
                .unwrap()
                .expect("board exists")
        })
        .collect();
    Fixture {
        store,
        project_id,
        board_id,
        lists,
    }
}

fn add_card(fixture: &mut Fixture, list_id: ListId, title: &str) -> CardId {
    fixture
        .store
        .add_card(
            fixture.project_id,
            fixture.board_id,
            list_id,
            CardDraft::new(title),
        )
        .unwrap()
        .expect("list exists")
}

fn card_ids(fixture: &Fixture, list_id: ListId) -> Vec<CardId> {
    fixture
        .store
        .current()
        .list(list_id)
        .map(|list| list.cards.clone())
        .unwrap_or_default()
}

#[test]
fn missing_ids_leave_snapshot_untouched() {
    let mut fixture = setup(&["To Do"]);
    let list_id = fixture.lists[0];
    add_card(&mut fixture, list_id, "Write brief");
    let before = fixture.store.snapshot();
    let (project_id, board_id) = (fixture.project_id, fixture.board_id);
    let store = &mut fixture.store;

    assert_eq!(
        store
            .update_project(ProjectId::new(), ProjectPatch {
                title: Some("Renamed".to_string()),
                description: None,
            })
            .unwrap(),
        Outcome::Skipped(SkipReason::ProjectNotFound)
    );
    assert_eq!(
        store.delete_board(project_id, BoardId::new()),
        Outcome::Skipped(SkipReason::BoardNotFound)
    );
    assert_eq!(
        store.delete_list(project_id, board_id, ListId::new()),
        Outcome::Skipped(SkipReason::ListNotFound)
    );
    assert_eq!(
        store
            .update_card(project_id, board_id, list_id, CardId::new(), CardPatch::title("x"))
            .unwrap(),
        Outcome::Skipped(SkipReason::CardNotFound)
    );
    assert_eq!(
        store
            .add_list(ProjectId::new(), board_id, "Orphan")
            .unwrap(),
        None
    );

    assert_eq!(store.current(), &before);
}

#[test]
fn update_project_with_unknown_id_keeps_every_project() {
    let mut fixture = setup(&[]);
    let before = fixture.store.snapshot();

    let outcome = fixture
        .store
        .update_project(ProjectId::new(), ProjectPatch::default())
        .unwrap();

    assert!(!outcome.is_applied());
    assert_eq!(fixture.store.current(), &before);
    assert_eq!(fixture.store.current().project_count(), 1);
}

#[test]
fn delete_project_cascades_to_descendants() {
    let mut fixture = setup(&["To Do", "Done"]);
    let first = fixture.lists[0];
    let card_id = add_card(&mut fixture, first, "Ship it");

    assert_eq!(
        fixture.store.delete_project(fixture.project_id),
        Outcome::Applied
    );

    let snapshot = fixture.store.current();
    assert!(snapshot.project(fixture.project_id).is_none());
    assert!(snapshot.board(fixture.board_id).is_none());
    assert!(fixture.lists.iter().all(|id| snapshot.list(*id).is_none()));
    assert!(snapshot.card(card_id).is_none());
}

#[test]
fn delete_list_removes_its_cards_only() {
    let mut fixture = setup(&["To Do", "Done"]);
    let (todo, done) = (fixture.lists[0], fixture.lists[1]);
    let doomed = add_card(&mut fixture, todo, "Doomed");
    let survivor = add_card(&mut fixture, done, "Survivor");

    let outcome = fixture
        .store
        .delete_list(fixture.project_id, fixture.board_id, todo);

    assert_eq!(outcome, Outcome::Applied);
    let snapshot = fixture.store.current();
    assert!(snapshot.card(doomed).is_none());
    assert!(snapshot.card(survivor).is_some());
    assert_eq!(snapshot.board(fixture.board_id).unwrap().lists, vec![done]);
}

#[test]
fn move_card_between_lists_keeps_single_membership() {
    let mut fixture = setup(&["L1", "L2"]);
    let (l1, l2) = (fixture.lists[0], fixture.lists[1]);
    let a = add_card(&mut fixture, l1, "A");
    let b = add_card(&mut fixture, l1, "B");

    let outcome = fixture
        .store
        .move_card(fixture.project_id, fixture.board_id, a, l1, l2, 0);

    assert_eq!(outcome, Outcome::Applied);
    assert_eq!(card_ids(&fixture, l1), vec![b]);
    assert_eq!(card_ids(&fixture, l2), vec![a]);
    assert_eq!(fixture.store.current().card(a).unwrap().list_id, l2);
    assert_eq!(fixture.store.current().board_card_count(fixture.board_id), 2);
}

#[test]
fn move_card_clamps_index_after_removal() {
    let mut fixture = setup(&["L1"]);
    let l1 = fixture.lists[0];
    let a = add_card(&mut fixture, l1, "A");
    let b = add_card(&mut fixture, l1, "B");
    let c = add_card(&mut fixture, l1, "C");

    fixture
        .store
        .move_card(fixture.project_id, fixture.board_id, a, l1, l1, 99);
    assert_eq!(card_ids(&fixture, l1), vec![b, c, a]);

    fixture
        .store
        .move_card(fixture.project_id, fixture.board_id, c, l1, l1, 0);
    assert_eq!(card_ids(&fixture, l1), vec![c, b, a]);
}

#[test]
fn move_card_lands_at_clamped_index_for_every_target() {
    let layout: [usize; 3] = [3, 1, 0];

    for from in 0..layout.len() {
        for position in 0..layout[from] {
            for to in 0..layout.len() {
                let len_after_removal = if from == to { layout[to] - 1 } else { layout[to] };
                for new_index in 0..=len_after_removal + 1 {
                    let mut fixture = setup(&["L1", "L2", "L3"]);
                    let lists = fixture.lists.clone();
                    for (list, count) in lists.iter().zip(layout) {
                        for n in 0..count {
                            add_card(&mut fixture, *list, &format!("card {n}"));
                        }
                    }
                    let card = card_ids(&fixture, lists[from])[position];
                    let mut expected = card_ids(&fixture, lists[to]);
                    expected.retain(|id| *id != card);
                    expected.insert(new_index.min(len_after_removal), card);

                    let outcome = fixture.store.move_card(
                        fixture.project_id,
                        fixture.board_id,
                        card,
                        lists[from],
                        lists[to],
                        new_index,
                    );

                    assert_eq!(outcome, Outcome::Applied);
                    assert_eq!(card_ids(&fixture, lists[to]), expected);
                    let holders = lists
                        .iter()
                        .filter(|list| card_ids(&fixture, **list).contains(&card))
                        .count();
                    assert_eq!(holders, 1, "from={from} to={to} index={new_index}");
                    assert_eq!(
                        fixture.store.current().card(card).unwrap().list_id,
                        lists[to]
                    );
                    assert_eq!(
                        fixture.store.current().board_card_count(fixture.board_id),
                        layout.iter().sum::<usize>()
                    );
                }
            }
        }
    }
}

#[test]
fn move_card_requires_card_in_source_list() {
    let mut fixture = setup(&["L1", "L2"]);
    let (l1, l2) = (fixture.lists[0], fixture.lists[1]);
    let a = add_card(&mut fixture, l1, "A");
    let before = fixture.store.snapshot();

    let outcome = fixture
        .store
        .move_card(fixture.project_id, fixture.board_id, a, l2, l1, 0);

    assert_eq!(outcome, Outcome::Skipped(SkipReason::CardNotFound));
    assert_eq!(fixture.store.current(), &before);
}

#[test]
fn reorder_lists_accepts_only_permutations() {
    let mut fixture = setup(&["L1", "L2", "L3"]);
    let (l1, l2, l3) = (fixture.lists[0], fixture.lists[1], fixture.lists[2]);
    let (project_id, board_id) = (fixture.project_id, fixture.board_id);

    assert_eq!(
        fixture.store.reorder_lists(project_id, board_id, &[l3, l1, l2]),
        Outcome::Applied
    );
    assert_eq!(
        fixture.store.current().board(board_id).unwrap().lists,
        vec![l3, l1, l2]
    );

    let rejected = [
        vec![l1, l2],
        vec![l1, l1, l2],
        vec![l1, l2, ListId::new()],
    ];
    for order in rejected {
        assert_eq!(
            fixture.store.reorder_lists(project_id, board_id, &order),
            Outcome::Skipped(SkipReason::NotAPermutation)
        );
    }
    assert_eq!(
        fixture.store.current().board(board_id).unwrap().lists,
        vec![l3, l1, l2]
    );
}

#[test]
fn old_snapshot_handles_stay_unchanged() {
    let mut fixture = setup(&["L1"]);
    let l1 = fixture.lists[0];
    let card_id = add_card(&mut fixture, l1, "Original");
    let before = fixture.store.snapshot();

    fixture
        .store
        .update_card(
            fixture.project_id,
            fixture.board_id,
            l1,
            card_id,
            CardPatch::title("Edited"),
        )
        .unwrap();

    assert_eq!(before.card(card_id).unwrap().title, "Original");
    assert_eq!(
        fixture.store.current().card(card_id).unwrap().title,
        "Edited"
    );
    assert_ne!(fixture.store.current(), &before);
}

#[test]
fn add_then_delete_card_restores_list() {
    let mut fixture = setup(&["L1"]);
    let l1 = fixture.lists[0];
    add_card(&mut fixture, l1, "Existing");
    let before = card_ids(&fixture, l1);

    let new_card = add_card(&mut fixture, l1, "New Card");
    assert_eq!(card_ids(&fixture, l1).last(), Some(&new_card));

    let outcome =
        fixture
            .store
            .delete_card(fixture.project_id, fixture.board_id, l1, new_card);
    assert_eq!(outcome, Outcome::Applied);
    assert_eq!(card_ids(&fixture, l1), before);
    assert!(fixture.store.current().card(new_card).is_none());
}

#[test]
fn blank_titles_are_rejected_before_mutation() {
    let mut fixture = setup(&["L1"]);
    let before = fixture.store.snapshot();
    let (project_id, board_id, l1) = (fixture.project_id, fixture.board_id, fixture.lists[0]);

    assert_eq!(
        fixture.store.add_project(ProjectDraft::new("   ", "")),
        Err(StoreError::Validation(ValidationError::EmptyTitle("project")))
    );
    assert!(matches!(
        fixture.store.add_list(project_id, board_id, ""),
        Err(StoreError::Validation(ValidationError::EmptyTitle("list")))
    ));
    assert!(matches!(
        fixture.store.add_card(project_id, board_id, l1, CardDraft::new("\t")),
        Err(StoreError::Validation(ValidationError::EmptyTitle("card")))
    ));
    assert_eq!(fixture.store.current(), &before);
}

#[test]
fn card_draft_labels_are_trimmed_and_deduplicated() {
    let mut fixture = setup(&["L1"]);
    let l1 = fixture.lists[0];
    let card_id = fixture
        .store
        .add_card(
            fixture.project_id,
            fixture.board_id,
            l1,
            CardDraft::new("  Labelled  ").with_labels([" ui ", "ui", "", "api"]),
        )
        .unwrap()
        .unwrap();

    let card = fixture.store.current().card(card_id).unwrap();
    assert_eq!(card.title, "Labelled");
    assert_eq!(card.labels, vec!["ui".to_string(), "api".to_string()]);
}

#[test]
fn update_card_can_clear_optional_fields() {
    let mut fixture = setup(&["L1"]);
    let l1 = fixture.lists[0];
    let card_id = fixture
        .store
        .add_card(
            fixture.project_id,
            fixture.board_id,
            l1,
            CardDraft::new("Due").with_due_date(1_000).with_description("soon"),
        )
        .unwrap()
        .unwrap();

    let patch = CardPatch {
        description: Some(None),
        due_date: Some(None),
        ..CardPatch::default()
    };
    fixture
        .store
        .update_card(fixture.project_id, fixture.board_id, l1, card_id, patch)
        .unwrap();

    let card = fixture.store.current().card(card_id).unwrap();
    assert_eq!(card.title, "Due");
    assert_eq!(card.description, None);
    assert_eq!(card.due_date, None);
}

#[test]
fn comments_and_attachments_append_to_card() {
    let mut fixture = setup(&["L1"]);
    let l1 = fixture.lists[0];
    let card_id = add_card(&mut fixture, l1, "Discuss");
    let (project_id, board_id) = (fixture.project_id, fixture.board_id);

    let commented = fixture
        .store
        .add_comment(project_id, board_id, l1, card_id, "ana@nexora.io", " Looks good ")
        .unwrap();
    let attached = fixture
        .store
        .add_attachment(project_id, board_id, l1, card_id, "mockup.png")
        .unwrap();
    assert_eq!(commented, Outcome::Applied);
    assert_eq!(attached, Outcome::Applied);

    assert_eq!(
        fixture
            .store
            .add_comment(project_id, board_id, l1, card_id, "ana@nexora.io", "  "),
        Err(StoreError::Validation(ValidationError::EmptyComment))
    );
    assert_eq!(
        fixture
            .store
            .add_comment(project_id, board_id, l1, card_id, " ", "Anonymous note"),
        Err(StoreError::Validation(ValidationError::EmptyAuthor))
    );

    let card = fixture.store.current().card(card_id).unwrap();
    assert_eq!(card.comments.len(), 1);
    assert_eq!(card.comments[0].text, "Looks good");
    assert_eq!(card.attachments, vec!["mockup.png".to_string()]);
}

#[test]
fn board_members_are_replaced_wholesale() {
    let mut fixture = setup(&[]);
    let (project_id, board_id) = (fixture.project_id, fixture.board_id);
    let members = vec![
        Member::new("lead@nexora.io", MemberRole::Manager).unwrap(),
        Member::new("dev@nexora.io", MemberRole::Member).unwrap(),
        Member::new("dev@nexora.io", MemberRole::Member).unwrap(),
    ];

    fixture
        .store
        .update_board(project_id, board_id, BoardPatch::members(members.clone()))
        .unwrap();
    assert_eq!(
        fixture.store.current().board(board_id).unwrap().members,
        members
    );

    fixture
        .store
        .update_board(project_id, board_id, BoardPatch::members(Vec::new()))
        .unwrap();
    assert!(fixture
        .store
        .current()
        .board(board_id)
        .unwrap()
        .members
        .is_empty());
}

#[test]
fn blank_member_emails_are_rejected() {
    let mut fixture = setup(&[]);
    let (project_id, board_id) = (fixture.project_id, fixture.board_id);
    let before = fixture.store.snapshot();
    let blank = Member {
        email: "   ".to_string(),
        role: MemberRole::Member,
    };

    assert_eq!(
        fixture
            .store
            .update_board(project_id, board_id, BoardPatch::members(vec![blank.clone()])),
        Err(StoreError::Validation(ValidationError::EmptyEmail))
    );
    assert_eq!(
        fixture.store.add_board(
            project_id,
            BoardDraft::new("Side").with_members(vec![Member {
                email: String::new(),
                ..blank
            }]),
        ),
        Err(StoreError::Validation(ValidationError::EmptyEmail))
    );
    assert_eq!(fixture.store.current(), &before);

    let added = fixture
        .store
        .add_board(
            project_id,
            BoardDraft::new("Side").with_members(vec![Member {
                email: " qa@nexora.io ".to_string(),
                role: MemberRole::Member,
            }]),
        )
        .unwrap()
        .unwrap();
    assert_eq!(
        fixture.store.current().board(added).unwrap().members[0].email,
        "qa@nexora.io"
    );
}

#[test]
fn starter_board_is_committed_in_one_notification() {
    let mut store = BoardStore::new();
    let notified = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let counter = std::sync::Arc::clone(&notified);
    store.subscribe(Box::new(move |_| {
        counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    }));

    let (project_id, board_id) = store
        .add_project_with_starter_board(ProjectDraft::new("Onboarding", ""), "owner@nexora.io")
        .unwrap();

    assert_eq!(notified.load(std::sync::atomic::Ordering::SeqCst), 1);
    let snapshot = store.current();
    assert_eq!(snapshot.project(project_id).unwrap().boards, vec![board_id]);
    let board = snapshot.board(board_id).unwrap();
    assert_eq!(board.title, "Main Board");
    assert_eq!(board.members.len(), 1);
    assert_eq!(board.members[0].role, MemberRole::Manager);

    let counts = snapshot
        .board_lists(board_id)
        .iter()
        .map(|list| (list.title.clone(), list.cards.len()))
        .collect::<Vec<_>>();
    assert_eq!(
        counts,
        vec![
            ("To Do".to_string(), 2),
            ("In Progress".to_string(), 1),
            ("Done".to_string(), 1),
        ]
    );
}

#[test]
fn starter_board_rejects_blank_owner() {
    let mut store = BoardStore::new();
    assert_eq!(
        store.add_project_with_starter_board(ProjectDraft::new("Onboarding", ""), "  "),
        Err(StoreError::Validation(ValidationError::EmptyEmail))
    );
    assert_eq!(store.current().project_count(), 0);
}

#[test]
fn demo_data_matches_sample_workspace() {
    let store = BoardStore::with_demo_data();
    let snapshot = store.current();

    let project = snapshot.projects().next().expect("demo project");
    assert_eq!(project.title, "Website Redesign");
    let board_id = project.boards[0];
    let titles = snapshot
        .board_lists(board_id)
        .iter()
        .map(|list| list.title.as_str())
        .collect::<Vec<_>>();
    assert_eq!(titles, vec!["To Do", "In Progress", "Done"]);
    assert_eq!(snapshot.board_card_count(board_id), 1);
    assert_eq!(snapshot.board(board_id).unwrap().members.len(), 2);
    assert_eq!(snapshot.notifications().len(), 2);
    assert!(snapshot.notifications().iter().all(|n| !n.read));
}

#[test]
fn notification_lifecycle() {
    let mut store = BoardStore::new();
    let first = store.push_notification("Card assigned");
    let second = store.push_notification("Board shared");

    assert_eq!(store.mark_notification_read(first), Outcome::Applied);
    assert!(store.current().notifications()[0].read);
    assert!(!store.current().notifications()[1].read);

    assert_eq!(store.delete_notification(second), Outcome::Applied);
    assert_eq!(
        store.delete_notification(second),
        Outcome::Skipped(SkipReason::NotificationNotFound)
    );
    assert_eq!(store.current().notifications().len(), 1);

    assert_eq!(store.clear_notifications(), Outcome::Applied);
    assert!(store.current().notifications().is_empty());
}
