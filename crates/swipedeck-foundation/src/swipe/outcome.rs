use std::fmt;

use swipedeck_core::Offset;

/// Lifecycle of a controller. See [`super::SwipeGestureController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwipeState {
    Idle,
    Tracking,
    /// Outcome decided, card animating toward its resting point.
    Resolving,
}

impl fmt::Display for SwipeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SwipeState::Idle => "idle",
            SwipeState::Tracking => "tracking",
            SwipeState::Resolving => "resolving",
        };
        f.write_str(name)
    }
}

/// Direction a committed card leaves the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    Left,
    Right,
    /// Super like.
    Up,
}

impl SwipeDirection {
    /// Unit vector pointing off-screen in this direction.
    pub fn unit(&self) -> Offset {
        match self {
            SwipeDirection::Left => Offset::new(-1.0, 0.0),
            SwipeDirection::Right => Offset::new(1.0, 0.0),
            SwipeDirection::Up => Offset::new(0.0, -1.0),
        }
    }

    pub(crate) fn horizontal(dx: f32) -> Self {
        if dx > 0.0 {
            SwipeDirection::Right
        } else {
            SwipeDirection::Left
        }
    }
}

/// Resolution of a gesture or forced swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwipeOutcome {
    Commit(SwipeDirection),
    Reset,
}

impl SwipeOutcome {
    pub const LEFT: SwipeOutcome = SwipeOutcome::Commit(SwipeDirection::Left);
    pub const RIGHT: SwipeOutcome = SwipeOutcome::Commit(SwipeDirection::Right);
    pub const UP: SwipeOutcome = SwipeOutcome::Commit(SwipeDirection::Up);

    pub fn is_commit(&self) -> bool {
        matches!(self, SwipeOutcome::Commit(_))
    }

    pub fn direction(&self) -> Option<SwipeDirection> {
        match self {
            SwipeOutcome::Commit(direction) => Some(*direction),
            SwipeOutcome::Reset => None,
        }
    }
}

/// Pointer state for the gesture in progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureSample {
    /// Cumulative displacement since the gesture started.
    pub translation: Offset,
    /// Latest reported velocity in px/s, if the host tracks it.
    pub velocity: Option<Offset>,
}

impl GestureSample {
    pub const ZERO: GestureSample = GestureSample {
        translation: Offset::ZERO,
        velocity: None,
    };
}

/// Where the card is drawn: offset from its resting place and tilt.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CardPosition {
    pub offset: Offset,
    pub rotation_degrees: f32,
}

impl CardPosition {
    pub const ORIGIN: CardPosition = CardPosition {
        offset: Offset::ZERO,
        rotation_degrees: 0.0,
    };

    pub fn x(&self) -> f32 {
        self.offset.x
    }

    pub fn y(&self) -> f32 {
        self.offset.y
    }

    pub fn rotation_radians(&self) -> f32 {
        self.rotation_degrees.to_radians()
    }
}
