//! Nested read models materialized from a snapshot.
//!
//! Views and the FFI layer consume boards as nested trees; the snapshot
//! keeps flat tables. These types are rebuilt on demand and never written
//! back.

use crate::model::board::{Member, Project};
use crate::model::card::Card;
use crate::model::ids::{BoardId, ListId, ProjectId};
use crate::store::snapshot::Snapshot;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectTree {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    pub created_at: i64,
    pub boards: Vec<BoardTree>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardTree {
    pub id: BoardId,
    pub title: String,
    pub lists: Vec<ListTree>,
    pub members: Vec<Member>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListTree {
    pub id: ListId,
    pub title: String,
    pub cards: Vec<Card>,
}

impl Snapshot {
    /// Materializes every project in display order.
    pub fn project_trees(&self) -> Vec<ProjectTree> {
        self.projects()
            .map(|project| self.build_project_tree(project))
            .collect()
    }

    pub fn project_tree(&self, project_id: ProjectId) -> Option<ProjectTree> {
        self.project(project_id)
            .map(|project| self.build_project_tree(project))
    }

    pub fn board_tree(&self, project_id: ProjectId, board_id: BoardId) -> Option<BoardTree> {
        let board = self.board_in(project_id, board_id)?;
        Some(BoardTree {
            id: board.id,
            title: board.title.clone(),
            lists: self
                .board_lists(board.id)
                .into_iter()
                .map(|list| ListTree {
                    id: list.id,
                    title: list.title.clone(),
                    cards: self.list_cards(list.id).into_iter().cloned().collect(),
                })
                .collect(),
            members: board.members.clone(),
        })
    }

    fn build_project_tree(&self, project: &Project) -> ProjectTree {
        ProjectTree {
            id: project.id,
            title: project.title.clone(),
            description: project.description.clone(),
            created_at: project.created_at,
            boards: project
                .boards
                .iter()
                .filter_map(|board_id| self.board_tree(project.id, *board_id))
                .collect(),
        }
    }
}
