//! Weighted structural facts.
//!
//! Every fact is a piece of classifier evidence about the tree of one
//! sentence. Facts are created once by the constraint builder and addressed
//! afterwards through their dense [`FactId`].

use std::fmt;
use std::str::FromStr;

use crate::error::FactError;
use crate::TokenIndex;

/// Dense identifier of a fact inside its [`FactSet`](crate::FactSet).
///
/// # Example
///
/// ```
/// use depforge_core::FactId;
///
/// let id = FactId::new(3);
/// assert_eq!(id.index(), 3);
/// assert!(FactId::new(1) < id);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FactId(u32);

impl FactId {
    /// Creates an id from a position in the fact set.
    #[inline]
    pub const fn new(index: u32) -> Self {
        FactId(index)
    }

    /// Returns the position in the fact set.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for FactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where a token's head lies, or that the token is the root.
///
/// # Example
///
/// ```
/// use depforge_core::Direction;
///
/// let dir: Direction = "LEFT".parse().unwrap();
/// assert_eq!(dir, Direction::Left);
/// assert_eq!(Direction::between(1, 2), Direction::Left);
/// assert_eq!(Direction::between(3, 2), Direction::Right);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// The token is the sentence root.
    Root,
    /// The head precedes the token.
    Left,
    /// The head follows the token.
    Right,
}

impl Direction {
    /// Returns the direction of `head` as seen from `dependent`.
    ///
    /// A head at index 0 is the virtual root.
    pub fn between(head: TokenIndex, dependent: TokenIndex) -> Self {
        if head == crate::ROOT {
            Direction::Root
        } else if head < dependent {
            Direction::Left
        } else {
            Direction::Right
        }
    }

    /// Returns the classifier label of this direction.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Root => "ROOT",
            Direction::Left => "LEFT",
            Direction::Right => "RIGHT",
        }
    }
}

impl FromStr for Direction {
    type Err = FactError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ROOT" => Ok(Direction::Root),
            "LEFT" => Ok(Direction::Left),
            "RIGHT" => Ok(Direction::Right),
            other => Err(FactError::UnknownDirection(other.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of a [`Constraint`], used for counting and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    Dependency,
    Direction,
    IncomingRelation,
}

impl ConstraintKind {
    /// Returns a short lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            ConstraintKind::Dependency => "dependency",
            ConstraintKind::Direction => "direction",
            ConstraintKind::IncomingRelation => "incoming_relation",
        }
    }
}

/// A weighted structural fact about one sentence.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Constraint {
    /// `dependent` attaches to `head` (0 = root) with relation `label`.
    Dependency {
        dependent: TokenIndex,
        head: TokenIndex,
        label: String,
        weight: f64,
    },

    /// `token`'s head lies in `direction`, or `token` is the root.
    Direction {
        token: TokenIndex,
        direction: Direction,
        weight: f64,
    },

    /// `token` receives an incoming edge labelled `label`, from any head.
    IncomingRelation {
        token: TokenIndex,
        label: String,
        weight: f64,
    },
}

impl Constraint {
    /// Creates a dependency fact.
    pub fn dependency(
        dependent: TokenIndex,
        head: TokenIndex,
        label: impl Into<String>,
        weight: f64,
    ) -> Self {
        Constraint::Dependency {
            dependent,
            head,
            label: label.into(),
            weight,
        }
    }

    /// Creates a direction fact.
    pub fn direction(token: TokenIndex, direction: Direction, weight: f64) -> Self {
        Constraint::Direction {
            token,
            direction,
            weight,
        }
    }

    /// Creates an incoming-relation fact.
    pub fn incoming_relation(token: TokenIndex, label: impl Into<String>, weight: f64) -> Self {
        Constraint::IncomingRelation {
            token,
            label: label.into(),
            weight,
        }
    }

    /// Returns the weight of this fact.
    #[inline]
    pub fn weight(&self) -> f64 {
        match self {
            Constraint::Dependency { weight, .. }
            | Constraint::Direction { weight, .. }
            | Constraint::IncomingRelation { weight, .. } => *weight,
        }
    }

    /// Returns the token the fact is about (the dependent for dependency facts).
    #[inline]
    pub fn token_index(&self) -> TokenIndex {
        match self {
            Constraint::Dependency { dependent, .. } => *dependent,
            Constraint::Direction { token, .. } | Constraint::IncomingRelation { token, .. } => {
                *token
            }
        }
    }

    /// Returns the relation label, if the fact carries one.
    pub fn label(&self) -> Option<&str> {
        match self {
            Constraint::Dependency { label, .. } | Constraint::IncomingRelation { label, .. } => {
                Some(label)
            }
            Constraint::Direction { .. } => None,
        }
    }

    /// Returns the kind of this fact.
    pub fn kind(&self) -> ConstraintKind {
        match self {
            Constraint::Dependency { .. } => ConstraintKind::Dependency,
            Constraint::Direction { .. } => ConstraintKind::Direction,
            Constraint::IncomingRelation { .. } => ConstraintKind::IncomingRelation,
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::Dependency {
                dependent,
                head,
                label,
                weight,
            } => write!(f, "dependency({dependent} <- {head}, {label}, {weight})"),
            Constraint::Direction {
                token,
                direction,
                weight,
            } => write!(f, "direction({token}, {direction}, {weight})"),
            Constraint::IncomingRelation {
                token,
                label,
                weight,
            } => write!(f, "incoming({token}, {label}, {weight})"),
        }
    }
}
