//! Drag-and-drop reconciliation engine.
//!
//! # Responsibility
//! - Model drag gestures as an explicit Idle → Dragging → Resolving → Idle
//!   state machine, independent of any UI event framework.
//! - Resolve finished gestures into list reorders or card moves.
//!
//! # Invariants
//! - Reconciliation is a pure function of (snapshot, active, over).
//! - A gesture commits at most one store mutation.

pub mod drag_id;
pub mod reconcile;
pub mod session;
