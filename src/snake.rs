use std::collections::VecDeque;

use crate::config::GridSize;
use crate::input::Direction;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Neighbouring cell one step in `direction`; `None` for [`Direction::None`].
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<Self> {
        let (dx, dy) = direction.delta()?;
        Some(Self {
            x: self.x + dx,
            y: self.y + dy,
        })
    }
}

/// Snake body, head first, bounded by a fixed capacity.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    body: VecDeque<Position>,
    capacity: usize,
}

impl Snake {
    /// Straight horizontal snake with its head at `head`, extending leftward.
    #[must_use]
    pub fn horizontal(head: Position, length: usize, capacity: usize) -> Self {
        let body = (0..length)
            .map(|offset| Position {
                x: head.x - offset as i32,
                y: head.y,
            })
            .collect();

        Self { body, capacity }
    }

    /// Creates a snake from explicit body segments (front is head).
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, capacity: usize) -> Self {
        debug_assert!(!segments.is_empty() && segments.len() <= capacity);

        Self {
            body: VecDeque::from(segments),
            capacity,
        }
    }

    /// Moves every segment into its predecessor's cell and puts `new_head` in front.
    ///
    /// With `grow` set and room left, the former tail cell is kept as the new
    /// last segment. Returns whether the snake actually got longer.
    pub fn advance(&mut self, new_head: Position, grow: bool) -> bool {
        let grew = grow && self.body.len() < self.capacity;

        self.body.push_front(new_head);
        if !grew {
            let _ = self.body.pop_back();
        }

        grew
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns the current tail position.
    #[must_use]
    pub fn tail(&self) -> Position {
        *self
            .body
            .back()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment occupies `position`, the tail included.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Upper bound on [`Snake::len`].
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}
