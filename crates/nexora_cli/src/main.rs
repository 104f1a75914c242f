//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `nexora_core` linkage.
//! - Run one demo drag end to end and print the resulting board tree.

use nexora_core::query::first_board;
use nexora_core::{BoardStore, DragId, DragSession};

fn main() {
    println!("nexora_core ping={}", nexora_core::ping());
    println!("nexora_core version={}", nexora_core::core_version());

    let mut store = BoardStore::with_demo_data();
    let Some((project_id, board_id)) = store.current().projects().next().and_then(|project| {
        first_board(store.current(), project.id).map(|board| (project.id, board.id))
    }) else {
        eprintln!("demo workspace has no board");
        std::process::exit(1);
    };

    // Drop the first card of the first list onto the last list.
    let lists = store
        .current()
        .board(board_id)
        .map(|board| board.lists.clone())
        .unwrap_or_default();
    let card = lists
        .first()
        .and_then(|list_id| store.current().list(*list_id))
        .and_then(|list| list.cards.first().copied());
    if let (Some(card_id), Some(target)) = (card, lists.last()) {
        let mut session = DragSession::new(project_id, board_id);
        let over = DragId::List(*target).to_string();
        match session.drag_start(&DragId::Card(card_id).to_string()) {
            Ok(_) => println!("drop={:?}", session.drag_end(&mut store, Some(over.as_str()))),
            Err(err) => eprintln!("drag_start failed: {err}"),
        }
    }

    match serde_json::to_string_pretty(&store.current().board_tree(project_id, board_id)) {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("board serialization failed: {err}"),
    }
}
