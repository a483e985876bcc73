use super::grid::Coordinate;
use std::collections::VecDeque;

/// Snake state
///
/// The segments are ordered from the head (front) to the tip of the tail
/// (back).  There is always at least one segment.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SnakeState {
    segments: VecDeque<Coordinate>,
}

impl SnakeState {
    /// Create a snake consisting of just a head at `head`
    pub fn new(head: Coordinate) -> SnakeState {
        SnakeState {
            segments: VecDeque::from([head]),
        }
    }

    /// Create a snake from its segments, head first.  Returns `None` if
    /// `segments` is empty.
    pub fn from_segments<I: IntoIterator<Item = Coordinate>>(segments: I) -> Option<SnakeState> {
        let segments = segments.into_iter().collect::<VecDeque<_>>();
        (!segments.is_empty()).then_some(SnakeState { segments })
    }

    /// Return the position of the snake's head
    pub fn head(&self) -> Coordinate {
        // Never fails, as the deque is never left empty
        self.segments.front().copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always `false`, as a snake has at least one segment
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Return the positions of the segments, head first
    pub fn segments(&self) -> &VecDeque<Coordinate> {
        &self.segments
    }

    /// Move the head to `new_head`.  Unless `grow` is true, the tail segment
    /// is dropped so that the length stays the same.
    pub fn advance(&mut self, new_head: Coordinate, grow: bool) {
        self.segments.push_front(new_head);
        if !grow {
            let _ = self.segments.pop_back();
        }
    }

    /// Test whether `c` is occupied by any segment other than the head.
    ///
    /// When `c` is the position the head is about to move to, this checks it
    /// against the body as it is *before* the move, so the tail segment that
    /// is about to be vacated still counts.
    pub fn collides_with_self(&self, c: Coordinate) -> bool {
        self.segments.iter().skip(1).any(|&p| p == c)
    }

    /// Test whether any segment, head included, is at `c`
    pub fn occupies(&self, c: Coordinate) -> bool {
        self.segments.contains(&c)
    }
}
