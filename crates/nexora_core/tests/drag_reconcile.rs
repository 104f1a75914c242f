use nexora_core::{
    plan_drop, reconcile, BoardDraft, BoardId, BoardStore, CardDraft, CardId, DragId,
    DragSession, DragState, DropOutcome, DropPlan, ListId, ProjectDraft, ProjectId,
};

struct Board {
    store: BoardStore,
    project_id: ProjectId,
    board_id: BoardId,
    lists: Vec<ListId>,
}

impl Board {
    fn with_lists(titles: &[&str]) -> Self {
        let mut store = BoardStore::new();
        let project_id = store.add_project(ProjectDraft::new("Drag", "")).unwrap();
        let board_id = store
            .add_board(project_id, BoardDraft::new("Main"))
            .unwrap()
            .unwrap();
        let lists = titles
            .iter()
            .map(|title| store.add_list(project_id, board_id, title).unwrap().unwrap())
            .collect();
        Self {
            store,
            project_id,
            board_id,
            lists,
        }
    }

    fn card(&mut self, list_index: usize, title: &str) -> CardId {
        self.store
            .add_card(
                self.project_id,
                self.board_id,
                self.lists[list_index],
                CardDraft::new(title),
            )
            .unwrap()
            .unwrap()
    }

    fn session(&self) -> DragSession {
        DragSession::new(self.project_id, self.board_id)
    }

    fn cards(&self, list_index: usize) -> Vec<CardId> {
        self.store
            .current()
            .list(self.lists[list_index])
            .unwrap()
            .cards
            .clone()
    }

    fn list_order(&self) -> Vec<ListId> {
        self.store.current().board(self.board_id).unwrap().lists.clone()
    }

    fn drag(&mut self, active: DragId, over: Option<DragId>) -> DropOutcome {
        let mut session = self.session();
        session.drag_start(&active.to_string()).unwrap();
        let over = over.map(|id| id.to_string());
        session.drag_over(over.as_deref());
        let outcome = session.drag_end(&mut self.store, over.as_deref());
        assert_eq!(session.state(), DragState::Idle);
        outcome
    }
}

#[test]
fn card_dropped_on_empty_list_moves_to_top() {
    let mut board = Board::with_lists(&["L1", "L2"]);
    let a = board.card(0, "A");
    let b = board.card(0, "B");
    let l2 = board.lists[1];

    let outcome = board.drag(DragId::Card(a), Some(DragId::List(l2)));

    assert!(matches!(outcome, DropOutcome::Applied(DropPlan::MoveCard { index: 0, .. })));
    assert_eq!(board.cards(0), vec![b]);
    assert_eq!(board.cards(1), vec![a]);
}

#[test]
fn list_dropped_on_first_list_moves_to_front() {
    let mut board = Board::with_lists(&["L1", "L2", "L3"]);
    let (l1, l2, l3) = (board.lists[0], board.lists[1], board.lists[2]);

    let outcome = board.drag(DragId::List(l3), Some(DragId::List(l1)));

    assert_eq!(
        outcome,
        DropOutcome::Applied(DropPlan::ReorderLists {
            order: vec![l3, l1, l2]
        })
    );
    assert_eq!(board.list_order(), vec![l3, l1, l2]);
}

#[test]
fn card_dropped_on_card_in_other_list_takes_its_position() {
    let mut board = Board::with_lists(&["L1", "L2"]);
    let a = board.card(0, "A");
    let x = board.card(1, "X");
    let y = board.card(1, "Y");

    board.drag(DragId::Card(a), Some(DragId::Card(y)));

    assert!(board.cards(0).is_empty());
    assert_eq!(board.cards(1), vec![x, a, y]);
    assert_eq!(board.store.current().card(a).unwrap().list_id, board.lists[1]);
}

#[test]
fn card_reordered_within_same_list() {
    let mut board = Board::with_lists(&["L1"]);
    let a = board.card(0, "A");
    let b = board.card(0, "B");
    let c = board.card(0, "C");

    board.drag(DragId::Card(a), Some(DragId::Card(c)));

    assert_eq!(board.cards(0), vec![b, c, a]);
}

#[test]
fn no_op_drops_leave_snapshot_untouched() {
    let mut board = Board::with_lists(&["L1", "L2"]);
    let a = board.card(0, "A");
    let l1 = board.lists[0];
    let before = board.store.snapshot();

    assert_eq!(board.drag(DragId::Card(a), None), DropOutcome::NoTarget);
    assert_eq!(
        board.drag(DragId::Card(a), Some(DragId::Card(a))),
        DropOutcome::NoChange
    );
    assert_eq!(
        board.drag(DragId::List(l1), Some(DragId::List(l1))),
        DropOutcome::NoChange
    );
    assert_eq!(
        board.drag(DragId::List(l1), Some(DragId::Card(a))),
        DropOutcome::NoChange
    );
    assert_eq!(
        board.drag(DragId::Card(CardId::new()), Some(DragId::List(l1))),
        DropOutcome::NoChange
    );

    assert_eq!(board.store.current(), &before);
}

#[test]
fn unrecognized_target_is_treated_as_no_target() {
    let mut board = Board::with_lists(&["L1"]);
    let a = board.card(0, "A");
    let before = board.store.snapshot();
    let mut session = board.session();

    session.drag_start(&DragId::Card(a).to_string()).unwrap();
    let outcome = session.drag_end(&mut board.store, Some("column-42"));

    assert_eq!(outcome, DropOutcome::NoTarget);
    assert_eq!(session.state(), DragState::Idle);
    assert_eq!(board.store.current(), &before);
}

#[test]
fn drag_over_never_mutates_store() {
    let mut board = Board::with_lists(&["L1", "L2"]);
    let a = board.card(0, "A");
    let l2 = board.lists[1];
    let before = board.store.snapshot();
    let mut session = board.session();

    session.drag_start(&DragId::Card(a).to_string()).unwrap();
    let over = DragId::List(l2).to_string();
    session.drag_over(Some(over.as_str()));

    assert_eq!(
        session.state(),
        DragState::Dragging {
            active: DragId::Card(a),
            over: Some(DragId::List(l2)),
        }
    );
    assert_eq!(board.store.current(), &before);

    session.cancel();
    assert_eq!(session.state(), DragState::Idle);
    assert_eq!(board.store.current(), &before);
}

#[test]
fn second_drag_start_replaces_active_element() {
    let mut board = Board::with_lists(&["L1", "L2"]);
    let a = board.card(0, "A");
    let b = board.card(0, "B");
    let l2 = board.lists[1];
    let mut session = board.session();

    session.drag_start(&DragId::Card(a).to_string()).unwrap();
    session.drag_start(&DragId::Card(b).to_string()).unwrap();
    assert_eq!(session.active(), Some(DragId::Card(b)));

    let over = DragId::List(l2).to_string();
    session.drag_end(&mut board.store, Some(over.as_str()));
    assert_eq!(board.cards(0), vec![a]);
    assert_eq!(board.cards(1), vec![b]);
}

#[test]
fn reconcile_is_pure_and_preserves_card_count() {
    let mut board = Board::with_lists(&["L1", "L2", "L3"]);
    let ids = (0..3)
        .flat_map(|list| (0..2).map(move |n| (list, n)))
        .map(|(list, n)| board.card(list, &format!("card {list}-{n}")))
        .collect::<Vec<_>>();
    let snapshot = board.store.snapshot();

    for active in &ids {
        for over in &ids {
            let next = reconcile(
                &snapshot,
                board.project_id,
                board.board_id,
                DragId::Card(*active),
                Some(DragId::Card(*over)),
            );
            assert_eq!(next.board_card_count(board.board_id), ids.len());
            let holders = board
                .lists
                .iter()
                .filter(|list| next.list(**list).unwrap().cards.contains(active))
                .count();
            assert_eq!(holders, 1);
        }
    }
    assert_eq!(board.store.current(), &snapshot);
}

#[test]
fn plan_drop_ignores_ids_from_other_boards() {
    let mut board = Board::with_lists(&["L1"]);
    let a = board.card(0, "A");
    let other = Board::with_lists(&["Elsewhere"]);

    let plan = plan_drop(
        board.store.current(),
        board.project_id,
        board.board_id,
        DragId::Card(a),
        Some(DragId::List(other.lists[0])),
    );

    assert_eq!(plan, None);
}
