//! Error types for the arborist core library.
//!
//! Input validation failures surface as [`InvalidGraphError`], graphs with no
//! spanning arborescence surface as [`UnreachableVertexError`], and both are
//! wrapped by [`MsaError`] at the solver boundary.

use std::fmt;

use thiserror::Error;

use crate::graph::VertexId;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident<V> {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? $( ( $($tuple:tt)* ) )? => $code:expr
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
            #[must_use]
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

        impl<V: VertexId> $ErrTy<V> {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? $( ( $($tuple)* ) )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Malformed input detected before any algorithmic work starts.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum InvalidGraphError<V: VertexId> {
    /// The vertex set was empty.
    #[error("cannot compute an arborescence for an empty graph")]
    EmptyGraph,
    /// An edge endpoint is not a member of the vertex set.
    #[error("edge ({tail:?}, {head:?}) references vertex {vertex:?}, which is not in the vertex set")]
    UnknownVertex {
        /// Tail of the offending edge.
        tail: V,
        /// Head of the offending edge.
        head: V,
        /// The endpoint that is missing from the vertex set.
        vertex: V,
    },
    /// An edge starts and ends at the same vertex.
    #[error("edge ({vertex:?}, {vertex:?}) is a self-loop")]
    SelfLoop {
        /// The vertex on both ends of the edge.
        vertex: V,
    },
    /// The weight map has no entry for an edge.
    #[error("edge ({tail:?}, {head:?}) has no weight entry")]
    MissingWeight {
        /// Tail of the unweighted edge.
        tail: V,
        /// Head of the unweighted edge.
        head: V,
    },
    /// An edge weight is NaN or infinite.
    #[error("edge ({tail:?}, {head:?}) has non-finite weight {weight}")]
    NonFiniteWeight {
        /// Tail of the offending edge.
        tail: V,
        /// Head of the offending edge.
        head: V,
        /// The rejected weight.
        weight: f64,
    },
    /// The requested root is not a member of the vertex set.
    #[error("root {root:?} is not in the vertex set")]
    RootNotFound {
        /// The rejected root.
        root: V,
    },
}

define_error_codes! {
    /// Stable codes describing [`InvalidGraphError`] variants.
    enum InvalidGraphErrorCode for InvalidGraphError<V> {
        /// The vertex set was empty.
        EmptyGraph => EmptyGraph => "INVALID_GRAPH_EMPTY",
        /// An edge endpoint is not a member of the vertex set.
        UnknownVertex => UnknownVertex { .. } => "INVALID_GRAPH_UNKNOWN_VERTEX",
        /// An edge starts and ends at the same vertex.
        SelfLoop => SelfLoop { .. } => "INVALID_GRAPH_SELF_LOOP",
        /// The weight map has no entry for an edge.
        MissingWeight => MissingWeight { .. } => "INVALID_GRAPH_MISSING_WEIGHT",
        /// An edge weight is NaN or infinite.
        NonFiniteWeight => NonFiniteWeight { .. } => "INVALID_GRAPH_NON_FINITE_WEIGHT",
        /// The requested root is not a member of the vertex set.
        RootNotFound => RootNotFound { .. } => "INVALID_GRAPH_ROOT_NOT_FOUND",
    }
}

/// A non-root vertex cannot be reached from the root, so no arborescence
/// exists.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("vertex {vertex:?} is unreachable from the root")]
pub struct UnreachableVertexError<V: VertexId> {
    vertex: V,
}

impl<V: VertexId> UnreachableVertexError<V> {
    pub(crate) const fn new(vertex: V) -> Self {
        Self { vertex }
    }

    /// Returns a vertex with no path from the root.
    #[must_use]
    #[rustfmt::skip]
    pub const fn vertex(&self) -> V { self.vertex }
}

/// Error returned by the arborescence solvers.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum MsaError<V: VertexId> {
    /// The input graph, weights or root were malformed.
    #[error(transparent)]
    InvalidGraph(#[from] InvalidGraphError<V>),
    /// Some vertex has no path from the root.
    #[error(transparent)]
    Unreachable(#[from] UnreachableVertexError<V>),
}

define_error_codes! {
    /// Stable codes describing [`MsaError`] variants.
    enum MsaErrorCode for MsaError<V> {
        /// The input graph, weights or root were malformed.
        InvalidGraph => InvalidGraph(..) => "MSA_INVALID_GRAPH",
        /// Some vertex has no path from the root.
        UnreachableVertex => Unreachable(..) => "MSA_UNREACHABLE_VERTEX",
    }
}

impl<V: VertexId> MsaError<V> {
    /// Retrieve the inner [`InvalidGraphErrorCode`] when the input was rejected.
    #[must_use]
    pub const fn invalid_graph_code(&self) -> Option<InvalidGraphErrorCode> {
        match self {
            Self::InvalidGraph(error) => Some(error.code()),
            Self::Unreachable(_) => None,
        }
    }
}

/// Convenient alias for results returned by the solvers.
pub type Result<T, V> = core::result::Result<T, MsaError<V>>;
