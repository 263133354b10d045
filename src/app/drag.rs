//! Drag-to-reorder for the favorites panel.
//!
//! ```text
//! Idle ──press──▶ Pressed ──hold──▶ Dragging ──release inside──▶ Idle (dropped)
//!                    │                  │
//!                    └──release──▶ Idle └──release outside / Esc──▶ Idle (cancelled)
//! ```
//!
//! At most one drag is in progress. The placeholder is a slot index in `0..=len`: the
//! dragged card is inserted before the card currently at that slot.

use crate::ui::layout::CardHit;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,

    /// Button pressed on a card; becomes a drag on the first hold.
    Pressed { index: usize, id: String },

    Dragging {
        index: usize,
        id: String,
        placeholder: Option<usize>,
    },
}

/// Result of releasing the pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOutcome {
    /// No drag was in progress (a plain click, or nothing at all).
    Click,
    /// Dropped inside the panel; the full new id order to commit.
    Dropped { id: String, order: Vec<String> },
    Cancelled,
}

impl DragState {
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    /// Index of the card being dragged.
    #[must_use]
    pub const fn dragged_index(&self) -> Option<usize> {
        match self {
            Self::Dragging { index, .. } => Some(*index),
            _ => None,
        }
    }

    #[must_use]
    pub const fn placeholder(&self) -> Option<usize> {
        match self {
            Self::Dragging { placeholder, .. } => *placeholder,
            _ => None,
        }
    }

    pub fn press(&mut self, index: usize, id: impl Into<String>) {
        *self = Self::Pressed {
            index,
            id: id.into(),
        };
    }

    /// Pointer moved with the button held over `hit` in a list of `len` cards.
    ///
    /// Starts the drag if the button was pressed on a card. Returns whether the visible
    /// state changed.
    pub fn hover(&mut self, hit: CardHit, len: usize) -> bool {
        match std::mem::take(self) {
            Self::Idle => false,
            Self::Pressed { index, id } => {
                tracing::debug!(index, id = %id, "drag started");
                let placeholder = placeholder_slot(index, hit, len);
                *self = Self::Dragging {
                    index,
                    id,
                    placeholder,
                };
                true
            }
            Self::Dragging {
                index,
                id,
                placeholder,
            } => {
                let next = match hit {
                    CardHit::Outside => placeholder,
                    hit => placeholder_slot(index, hit, len),
                };
                *self = Self::Dragging {
                    index,
                    id,
                    placeholder: next,
                };
                next != placeholder
            }
        }
    }

    /// Pointer released. `inside` is whether the release point lies within the panel;
    /// `order` is the current id order of the list.
    pub fn release(&mut self, inside: bool, order: &[String]) -> DragOutcome {
        match std::mem::take(self) {
            Self::Idle | Self::Pressed { .. } => DragOutcome::Click,
            Self::Dragging { .. } if !inside => {
                tracing::debug!("drag released outside panel");
                DragOutcome::Cancelled
            }
            Self::Dragging {
                index,
                id,
                placeholder,
            } => {
                // The list may have changed since the press.
                let Some(from) = order.iter().position(|o| *o == id) else {
                    tracing::debug!(id = %id, "dragged card no longer listed");
                    return DragOutcome::Cancelled;
                };
                if from != index {
                    tracing::debug!(id = %id, pressed = index, from, "dragged card moved");
                }
                let order = match placeholder {
                    Some(slot) => move_to_slot(order, from, slot),
                    None => order.to_vec(),
                };
                tracing::debug!(id = %id, from, slot = ?placeholder, "drag dropped");
                DragOutcome::Dropped { id, order }
            }
        }
    }

    /// Abandons any drag. Returns whether one was in progress.
    pub fn cancel(&mut self) -> bool {
        let was_dragging = self.is_dragging();
        if was_dragging {
            tracing::debug!("drag cancelled");
        }
        *self = Self::Idle;
        was_dragging
    }
}

/// Placeholder slot for dragging card `dragged` over `hit`, or `None` when dropping there
/// would leave the order unchanged.
#[must_use]
pub fn placeholder_slot(dragged: usize, hit: CardHit, len: usize) -> Option<usize> {
    let slot = match hit {
        CardHit::Card { index, upper, .. } => {
            if upper {
                index
            } else {
                index + 1
            }
        }
        CardHit::BelowLast => len,
        CardHit::Outside => return None,
    };

    if slot == dragged || slot == dragged + 1 {
        None
    } else {
        Some(slot.min(len))
    }
}

/// `order` with the element at `from` reinserted before the element at `slot`.
#[must_use]
pub fn move_to_slot(order: &[String], from: usize, slot: usize) -> Vec<String> {
    let mut ids = order.to_vec();
    if from >= ids.len() {
        return ids;
    }

    let moved = ids.remove(from);
    let target = if slot > from { slot - 1 } else { slot };
    ids.insert(target.min(ids.len()), moved);
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(ids: &[&str]) -> Vec<String> {
        ids.iter().map(ToString::to_string).collect()
    }

    fn card(index: usize, upper: bool) -> CardHit {
        CardHit::Card {
            index,
            upper,
            on_button: false,
        }
    }

    #[test]
    fn adjacent_slots_show_no_placeholder() {
        assert_eq!(placeholder_slot(1, card(1, true), 3), None);
        assert_eq!(placeholder_slot(1, card(1, false), 3), None);
        assert_eq!(placeholder_slot(1, card(0, false), 3), None);
        assert_eq!(placeholder_slot(1, card(2, true), 3), None);
        assert_eq!(placeholder_slot(1, card(0, true), 3), Some(0));
        assert_eq!(placeholder_slot(1, card(2, false), 3), Some(3));
        assert_eq!(placeholder_slot(0, CardHit::BelowLast, 3), Some(3));
        assert_eq!(placeholder_slot(2, CardHit::BelowLast, 3), None);
    }

    #[test]
    fn move_to_slot_handles_both_directions() {
        let ids = order(&["a", "b", "c", "d"]);
        assert_eq!(move_to_slot(&ids, 0, 3), order(&["b", "c", "a", "d"]));
        assert_eq!(move_to_slot(&ids, 3, 0), order(&["d", "a", "b", "c"]));
        assert_eq!(move_to_slot(&ids, 1, 4), order(&["a", "c", "d", "b"]));
    }

    #[test]
    fn press_without_hold_is_a_click() {
        let mut drag = DragState::default();
        drag.press(0, "a");
        assert_eq!(drag.release(true, &order(&["a", "b"])), DragOutcome::Click);
        assert_eq!(drag, DragState::Idle);
    }

    #[test]
    fn drag_to_end_then_drop() {
        let ids = order(&["a", "b", "c"]);
        let mut drag = DragState::default();

        drag.press(0, "a");
        drag.hover(card(0, true), 3);
        assert_eq!(drag.placeholder(), None);

        assert!(drag.hover(CardHit::BelowLast, 3));
        assert_eq!(drag.placeholder(), Some(3));

        assert_eq!(
            drag.release(true, &ids),
            DragOutcome::Dropped {
                id: "a".to_string(),
                order: order(&["b", "c", "a"]),
            }
        );
    }

    #[test]
    fn release_outside_cancels() {
        let mut drag = DragState::default();
        drag.press(2, "c");
        drag.hover(card(0, true), 3);

        assert_eq!(drag.release(false, &order(&["a", "b", "c"])), DragOutcome::Cancelled);
        assert_eq!(drag, DragState::Idle);
    }

    #[test]
    fn release_moves_the_dragged_id_from_where_it_is_now() {
        let mut drag = DragState::default();
        drag.press(0, "a");
        drag.hover(card(2, false), 3);
        assert_eq!(drag.placeholder(), Some(3));

        let outcome = drag.release(true, &order(&["b", "a", "c"]));
        assert_eq!(
            outcome,
            DragOutcome::Dropped {
                id: "a".to_string(),
                order: order(&["b", "c", "a"]),
            }
        );
    }

    #[test]
    fn release_cancels_when_the_dragged_id_is_gone() {
        let mut drag = DragState::default();
        drag.press(0, "a");
        drag.hover(card(2, false), 3);

        assert_eq!(drag.release(true, &order(&["b", "c"])), DragOutcome::Cancelled);
        assert_eq!(drag, DragState::Idle);
    }

    #[test]
    fn leaving_the_panel_keeps_last_placeholder() {
        let mut drag = DragState::default();
        drag.press(2, "c");
        drag.hover(card(0, true), 3);
        assert!(!drag.hover(CardHit::Outside, 3));
        assert_eq!(drag.placeholder(), Some(0));
        assert!(drag.cancel());
    }
}
