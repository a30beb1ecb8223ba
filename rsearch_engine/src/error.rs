
use crate::types::*;

use std::fmt;
use std::io;
use std::error::Error;

pub type ConfigResult<T> = Result<T, ConfigError>;
pub type TreeResult<T> = Result<T, TreeError>;

/// Error when loading an engine configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error.
    Read { error: io::Error },
    /// Not valid JSON, or fields of the wrong type.
    Parse { error: serde_json::Error },
    /// Parsed, but out of range.
    Invalid {
        field:   &'static str,
        reason:  String,
    },
}

impl ConfigError {
    pub fn invalid<S: Into<String>>(field: &'static str, reason: S) -> Self {
        ConfigError::Invalid { field, reason: reason.into() }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { error }  => write!(f, "failed to read config: {}", error),
            ConfigError::Parse { error } => write!(f, "failed to parse config: {}", error),
            ConfigError::Invalid { field, reason } =>
                write!(f, "invalid config field {}: {}", field, reason),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigError::Read { error }  => Some(error),
            ConfigError::Parse { error } => Some(error),
            _                            => None,
        }
    }
}

/// Error when declaring or loading a game tree.
#[derive(Debug)]
pub enum TreeError {
    Read { error: io::Error },
    Parse { error: serde_json::Error },
    BadCoord(String),
    /// Two pieces declared on one square.
    Occupied(Coord),
    /// The moving piece is not on the from square.
    NoPieceAt {
        at:      Coord,
        piece:   Piece,
        side:    Color,
    },
    /// The move's victim does not match what stands on the target square.
    VictimMismatch {
        at:      Coord,
        found:   Option<Piece>,
    },
    UnknownNode(usize),
    /// A child index points outside the tree.
    BadChild {
        node:    usize,
        child:   usize,
    },
    Empty,
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::Read { error }  => write!(f, "failed to read tree: {}", error),
            TreeError::Parse { error } => write!(f, "failed to parse tree: {}", error),
            TreeError::BadCoord(s)     => write!(f, "bad square: {:?}", s),
            TreeError::Occupied(c0)    => write!(f, "square {} declared twice", c0),
            TreeError::NoPieceAt { at, piece, side } =>
                write!(f, "no {:?} {:?} on {}", side, piece, at),
            TreeError::VictimMismatch { at, found } =>
                write!(f, "victim on {} does not match, found {:?}", at, found),
            TreeError::UnknownNode(id) => write!(f, "no node {}", id),
            TreeError::BadChild { node, child } =>
                write!(f, "node {} has child {} outside the tree", node, child),
            TreeError::Empty           => write!(f, "tree has no root node"),
        }
    }
}

impl Error for TreeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            TreeError::Read { error }  => Some(error),
            TreeError::Parse { error } => Some(error),
            _                          => None,
        }
    }
}
