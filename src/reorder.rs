//! Drag-and-drop reordering as an explicit state machine.
//!
//! ```text
//!            drag_start(id)              drag_enter(other)
//!   Idle ─────────────────▶ Dragging ─────────────────────▶ HoveringTarget
//!    ▲                        │  ▲                              │
//!    │   drag_end / drop_on   │  └──── drag_leave(hovered) ─────┘
//!    └────────────────────────┴──────── drag_end / drop_on ─────┘
//! ```
//!
//! The engine only records which page is moving and which row is hovered.
//! Row styling is derived from that state through
//! [`ReorderEngine::affordance`]; nothing outside the engine toggles
//! highlight flags. The only order change happens in
//! [`ReorderEngine::drop_on`], through
//! [`PageCollection::move_before`].

use crate::collection::PageCollection;
use crate::types::PageId;

/// Where a drag gesture currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        moving: PageId,
    },
    HoveringTarget {
        moving: PageId,
        hovered: PageId,
    },
}

/// Visual cue a row should show, derived purely from [`DragState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAffordance {
    None,
    /// The row being dragged.
    Moving,
    /// The row under the pointer; a drop lands before it.
    DropTarget,
}

#[derive(Debug, Default)]
pub struct ReorderEngine {
    state: DragState,
}

impl ReorderEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn moving(&self) -> Option<PageId> {
        match self.state {
            DragState::Idle => None,
            DragState::Dragging { moving } | DragState::HoveringTarget { moving, .. } => {
                Some(moving)
            }
        }
    }

    pub fn hovered(&self) -> Option<PageId> {
        match self.state {
            DragState::HoveringTarget { hovered, .. } => Some(hovered),
            _ => None,
        }
    }

    pub fn affordance(&self, id: PageId) -> RowAffordance {
        if self.moving() == Some(id) {
            RowAffordance::Moving
        } else if self.hovered() == Some(id) {
            RowAffordance::DropTarget
        } else {
            RowAffordance::None
        }
    }

    /// Begin dragging `id`. Replaces any gesture already in progress.
    pub fn drag_start(&mut self, id: PageId) {
        self.state = DragState::Dragging { moving: id };
    }

    /// The pointer entered `target`'s row.
    ///
    /// Entering the moving page's own row clears the hover; with no drag in
    /// progress this does nothing.
    pub fn drag_enter(&mut self, target: PageId) {
        let Some(moving) = self.moving() else {
            return;
        };
        self.state = if target == moving {
            DragState::Dragging { moving }
        } else {
            DragState::HoveringTarget {
                moving,
                hovered: target,
            }
        };
    }

    /// The pointer left `target`'s row. Only clears the hover if `target` is
    /// the hovered row.
    pub fn drag_leave(&mut self, target: PageId) {
        if let DragState::HoveringTarget { moving, hovered } = self.state {
            if hovered == target {
                self.state = DragState::Dragging { moving };
            }
        }
    }

    /// Drop onto `target`'s row.
    ///
    /// Moves the dragged page immediately before `target` when both are still
    /// in the collection and differ. Every other case is a silent no-op. The
    /// engine is back to `Idle` afterwards either way. Returns whether the
    /// order changed.
    pub fn drop_on(&mut self, target: PageId, collection: &mut PageCollection) -> bool {
        let moving = self.moving();
        self.state = DragState::Idle;

        let Some(moving) = moving else {
            return false;
        };
        let moved = collection.move_before(moving, target);
        if moved {
            log::debug!("moved page {moving} before {target}");
        }
        moved
    }

    /// The gesture ended without a drop.
    pub fn drag_end(&mut self) {
        self.state = DragState::Idle;
    }
}

/// Run one whole gesture: pick up `moved`, hover `target`, drop.
///
/// This is how non-pointer front ends (the CLI's `--move`) reorder pages.
pub fn apply_move(collection: &mut PageCollection, moved: PageId, target: PageId) -> bool {
    let mut engine = ReorderEngine::new();
    engine.drag_start(moved);
    engine.drag_enter(target);
    engine.drop_on(target, collection)
}
