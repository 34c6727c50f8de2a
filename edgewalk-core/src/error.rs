//! Error types for the edgewalk core library.
//!
//! Defines the error enum exposed by the public API, its stable error codes,
//! and a convenient result alias.

use std::fmt;

use thiserror::Error;

use crate::builder::ExecutionStrategy;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Broad failure classes used to decide how a caller should react.
///
/// Invalid arguments are caller mistakes, internal-consistency failures
/// indicate a broken chain invariant, and unavailable backends depend on the
/// features compiled into the current build.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorClass {
    /// A caller supplied an argument the sampler cannot accept.
    InvalidArgument,
    /// A graph invariant (connectivity, legal move availability) was broken.
    InternalConsistency,
    /// The requested execution backend is not part of this build.
    Unavailable,
}

/// Error type produced while building graphs or running the sampler.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SamplerError {
    /// The sampler was given an empty vertex list.
    #[error("the vertex set must contain at least one vertex")]
    EmptyVertexSet,
    /// A vertex coordinate was NaN or infinite.
    #[error("vertex {index} has a non-finite coordinate")]
    NonFiniteCoordinate {
        /// Position of the offending vertex in input order.
        index: usize,
    },
    /// Two vertices share the same coordinate.
    #[error("vertices {first} and {second} share the same coordinate")]
    DuplicateVertex {
        /// Index of the first occurrence.
        first: usize,
        /// Index of the repeated occurrence.
        second: usize,
    },
    /// A vertex index exceeded the vertex count.
    #[error("vertex index {index} is out of bounds for {vertex_count} vertices")]
    VertexOutOfBounds {
        /// The requested vertex index.
        index: usize,
        /// Number of vertices in the graph.
        vertex_count: usize,
    },
    /// An edge or proposal named the same vertex twice.
    #[error("vertex {vertex} cannot be joined to itself")]
    SelfLoop {
        /// The repeated vertex index.
        vertex: usize,
    },
    /// Removal was requested for an edge that is not in the graph.
    #[error("edge ({left}, {right}) is not present in the graph")]
    EdgeAbsent {
        /// Lower endpoint of the missing edge.
        left: usize,
        /// Upper endpoint of the missing edge.
        right: usize,
    },
    /// Temperature must be strictly positive and finite.
    #[error("temperature must be positive and finite (got {got})")]
    InvalidTemperature {
        /// The rejected temperature.
        got: f64,
    },
    /// Edge-cost coefficient must be finite.
    #[error("edge cost coefficient must be finite (got {got})")]
    InvalidEdgeCost {
        /// The rejected coefficient.
        got: f64,
    },
    /// Worker count must be greater than zero.
    #[error("worker count must be at least 1 (got {got})")]
    InvalidWorkerCount {
        /// The rejected worker count.
        got: usize,
    },
    /// The requested execution strategy is unavailable in the current build.
    #[error("the requested execution strategy {requested:?} is not available in this build")]
    BackendUnavailable {
        /// Strategy that could not be satisfied by the current build.
        requested: ExecutionStrategy,
    },
    /// A vertex could not be reached from the reference vertex.
    #[error("vertex {target} is unreachable from vertex {source_vertex}")]
    Unreachable {
        /// Vertex the path query started from.
        source_vertex: usize,
        /// First vertex found without a path.
        target: usize,
    },
    /// A candidate graph admitted no legal move, so its proposal density is undefined.
    #[error("graph with {edges} edges admits no legal move")]
    NoLegalMoves {
        /// Edge count of the offending graph.
        edges: usize,
    },
    /// Pair sampling failed to find a legal move within the attempt cap.
    #[error("no legal move found after {attempts} proposal attempts")]
    ProposalLivelock {
        /// Number of pairs drawn before giving up.
        attempts: usize,
    },
    /// A worker chain failed, aborting the whole run.
    #[error("chain worker {worker} failed: {source}")]
    WorkerFailed {
        /// Index of the failing worker.
        worker: usize,
        /// Failure reported by the worker chain.
        #[source]
        source: Box<SamplerError>,
    },
}

define_error_codes! {
    /// Stable codes describing [`SamplerError`] variants.
    enum SamplerErrorCode for SamplerError {
        /// The sampler was given an empty vertex list.
        EmptyVertexSet => EmptyVertexSet => "EDGEWALK_EMPTY_VERTEX_SET",
        /// A vertex coordinate was NaN or infinite.
        NonFiniteCoordinate => NonFiniteCoordinate { .. } => "EDGEWALK_NON_FINITE_COORDINATE",
        /// Two vertices share the same coordinate.
        DuplicateVertex => DuplicateVertex { .. } => "EDGEWALK_DUPLICATE_VERTEX",
        /// A vertex index exceeded the vertex count.
        VertexOutOfBounds => VertexOutOfBounds { .. } => "EDGEWALK_VERTEX_OUT_OF_BOUNDS",
        /// An edge or proposal named the same vertex twice.
        SelfLoop => SelfLoop { .. } => "EDGEWALK_SELF_LOOP",
        /// Removal was requested for an edge that is not in the graph.
        EdgeAbsent => EdgeAbsent { .. } => "EDGEWALK_EDGE_ABSENT",
        /// Temperature must be strictly positive and finite.
        InvalidTemperature => InvalidTemperature { .. } => "EDGEWALK_INVALID_TEMPERATURE",
        /// Edge-cost coefficient must be finite.
        InvalidEdgeCost => InvalidEdgeCost { .. } => "EDGEWALK_INVALID_EDGE_COST",
        /// Worker count must be greater than zero.
        InvalidWorkerCount => InvalidWorkerCount { .. } => "EDGEWALK_INVALID_WORKER_COUNT",
        /// The requested execution strategy is unavailable in the current build.
        BackendUnavailable => BackendUnavailable { .. } => "EDGEWALK_BACKEND_UNAVAILABLE",
        /// A vertex could not be reached from the reference vertex.
        Unreachable => Unreachable { .. } => "EDGEWALK_UNREACHABLE",
        /// A candidate graph admitted no legal move.
        NoLegalMoves => NoLegalMoves { .. } => "EDGEWALK_NO_LEGAL_MOVES",
        /// Pair sampling failed to find a legal move within the attempt cap.
        ProposalLivelock => ProposalLivelock { .. } => "EDGEWALK_PROPOSAL_LIVELOCK",
        /// A worker chain failed, aborting the whole run.
        WorkerFailed => WorkerFailed { .. } => "EDGEWALK_WORKER_FAILED",
    }
}

impl SamplerError {
    /// Classify the error into the broad failure classes of the sampler.
    ///
    /// Worker failures report the class of the error that aborted the worker.
    ///
    /// # Examples
    /// ```
    /// use edgewalk_core::{ErrorClass, SamplerError};
    ///
    /// let err = SamplerError::SelfLoop { vertex: 2 };
    /// assert_eq!(err.class(), ErrorClass::InvalidArgument);
    /// ```
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::EmptyVertexSet
            | Self::NonFiniteCoordinate { .. }
            | Self::DuplicateVertex { .. }
            | Self::VertexOutOfBounds { .. }
            | Self::SelfLoop { .. }
            | Self::EdgeAbsent { .. }
            | Self::InvalidTemperature { .. }
            | Self::InvalidEdgeCost { .. }
            | Self::InvalidWorkerCount { .. } => ErrorClass::InvalidArgument,
            Self::BackendUnavailable { .. } => ErrorClass::Unavailable,
            Self::Unreachable { .. } | Self::NoLegalMoves { .. } | Self::ProposalLivelock { .. } => {
                ErrorClass::InternalConsistency
            }
            Self::WorkerFailed { source, .. } => source.class(),
        }
    }

    /// Retrieve the code of the error that aborted a worker, if any.
    #[must_use]
    pub fn worker_code(&self) -> Option<SamplerErrorCode> {
        match self {
            Self::WorkerFailed { source, .. } => Some(source.code()),
            _ => None,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, SamplerError>;
