use crate::state::row_identity::RowId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragInput {
    Pointer,
    Keyboard,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragSession {
    pub active: RowId,
    pub over: Option<RowId>,
    pub input: DragInput,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragCommit {
    pub active: RowId,
    pub over: RowId,
}

/// Drag gesture lifecycle. `Committing` only exists while a drop is applied.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
    Committing(DragCommit),
}

/// Vertical extent of a rendered row, in client coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct RowRect {
    pub id: RowId,
    pub top: f64,
    pub height: f64,
}

impl RowRect {
    pub fn center(&self) -> f64 {
        self.top + self.height / 2.0
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Row whose vertical center is nearest to `y`. Horizontal position is
/// ignored. A pointer above the first or below the last row has no target.
pub fn closest_center(y: f64, rects: &[RowRect]) -> Option<&RowId> {
    let top = rects.iter().map(|r| r.top).fold(f64::INFINITY, f64::min);
    let bottom = rects
        .iter()
        .map(RowRect::bottom)
        .fold(f64::NEG_INFINITY, f64::max);
    if rects.is_empty() || y < top || y > bottom {
        return None;
    }

    rects
        .iter()
        .min_by(|a, b| {
            let da = (a.center() - y).abs();
            let db = (b.center() - y).abs();
            da.total_cmp(&db)
        })
        .map(|rect| &rect.id)
}

/// Removes the item at `from` and reinserts it at `to`.
pub fn array_move<T>(mut items: Vec<T>, from: usize, to: usize) -> Vec<T> {
    if from >= items.len() || to >= items.len() || from == to {
        return items;
    }
    let item = items.remove(from);
    items.insert(to, item);
    items
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn active(&self) -> Option<&RowId> {
        match &self.state {
            DragState::Dragging(session) => Some(&session.active),
            _ => None,
        }
    }

    pub fn over(&self) -> Option<&RowId> {
        match &self.state {
            DragState::Dragging(session) => session.over.as_ref(),
            _ => None,
        }
    }

    pub fn input(&self) -> Option<DragInput> {
        match &self.state {
            DragState::Dragging(session) => Some(session.input),
            _ => None,
        }
    }

    /// Picks up `active`. An unfinished gesture is abandoned without a commit.
    pub fn begin(&mut self, active: RowId, input: DragInput) {
        if self.is_dragging() {
            log::debug!("drag restarted before drop; previous gesture discarded");
        }
        let over = match input {
            DragInput::Keyboard => Some(active.clone()),
            DragInput::Pointer => None,
        };
        self.state = DragState::Dragging(DragSession {
            active,
            over,
            input,
        });
    }

    pub fn hover(&mut self, over: Option<RowId>) {
        if let DragState::Dragging(session) = &mut self.state {
            session.over = over;
        }
    }

    pub fn pointer_move(&mut self, y: f64, rects: &[RowRect]) {
        if self.is_dragging() {
            let over = closest_center(y, rects).cloned();
            self.hover(over);
        }
    }

    /// Moves the keyboard target one step through `order` (the rendered rows).
    pub fn step(&mut self, direction: MoveDirection, order: &[RowId]) {
        let DragState::Dragging(session) = &mut self.state else {
            return;
        };
        let current = session.over.as_ref().unwrap_or(&session.active);
        let Some(pos) = order.iter().position(|id| id == current) else {
            return;
        };
        let next = match direction {
            MoveDirection::Up => pos.checked_sub(1),
            MoveDirection::Down => (pos + 1 < order.len()).then_some(pos + 1),
        };
        if let Some(next) = next {
            session.over = Some(order[next].clone());
        }
    }

    /// Ends the gesture. Returns a commit only when the row was dropped on a
    /// different row; otherwise the controller goes straight back to idle.
    pub fn drop_active(&mut self) -> Option<DragCommit> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging(DragSession {
                active,
                over: Some(over),
                ..
            }) if over != active => {
                let commit = DragCommit { active, over };
                self.state = DragState::Committing(commit.clone());
                Some(commit)
            }
            _ => None,
        }
    }

    pub fn finish(&mut self) {
        self.state = DragState::Idle;
    }

    /// Returns true if a gesture was in flight.
    pub fn cancel(&mut self) -> bool {
        let was_dragging = self.is_dragging();
        self.state = DragState::Idle;
        was_dragging
    }
}
