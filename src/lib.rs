//! # The either crate
//! This crate contains a disjoint union of two alternatives and the combinators to work with it
//!
//! An `Either<L, R>` holds exactly one value, which is either a `Left(L)` or a `Right(R)`.
//! Calling code uses it to represent "one of two outcomes" (success or failure, this type
//! or that type) as an ordinary immutable value and composes operations over it without
//! branching by hand.
//!
//! ## Design
//! The crate is made of four cooperating parts. Type descriptors (`EitherType`,
//! `TypeDescriptor`) describe the pair of alternative types and construct values from
//! producers, lifting a failed computation into the left alternative when asked to.
//! `Either` is the value itself. Projections (`LeftProjection`, `RightProjection`) are
//! side-specific views exposing the optional-value algebra: a projection is active when
//! the value sits on its side, otherwise every combinator behaves like an absent value.
//! The `Matcher` dispatches over ordered cases, each naming a side and optionally the
//! runtime type of the payload.
//!
//! ```
//! use either::{type_for, Left, Right};
//!
//! let value = type_for::<String, i32>().wrap(|| "foo".to_string()).unwrap();
//! let said = value.matching(|m| {
//!     m.case(Left, |_| "I'm a string!")
//!      .case(Right, |_| "I'm a number!")
//! });
//!
//! assert_eq!(said.unwrap(), "I'm a string!");
//! ```
//!
//! ## Static checks
//! Several failures that a dynamically typed Either must detect at runtime are compile
//! errors here. Alternatives must be concrete, sized types:
//!
//! ```compile_fail
//! let _ = either::type_for::<str, i32>();
//! ```
//!
//! A `flat_map` handler must return an `Either` of the right shape:
//!
//! ```compile_fail
//! use either::Either;
//!
//! let value: Either<i32, String> = Either::Left(5);
//! let _ = value.left().flat_map(|v| v * 2);
//! ```
//!
//! A match case must name a side marker:
//!
//! ```compile_fail
//! use either::Either;
//!
//! let value: Either<i32, String> = Either::Left(5);
//! let _ = value.matching(|m| m.case(String::new(), |_| 1));
//! ```

#[macro_use]
extern crate log;

pub mod descriptor;
pub mod either;
pub mod matcher;
pub mod projection;

use std::result;
use thiserror::Error;

pub use descriptor::{type_for, EitherType, TypeDescriptor, TypeRegistry, TypeTag};
pub use either::{partition, Either};
pub use matcher::{Matcher, Narrow, Pattern, Typed};
pub use projection::{Left, LeftProjection, Projection, Right, RightProjection, Side};

/// Represents either a value or an error raised by this crate
pub type Result<T> = result::Result<T, Error>;

/// Represents a type of error for the crate error type
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidValue,
    ProjectionType,
    NoMatch,
    Raised,
}

/// Represents an error raised while building or inspecting an Either
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// A value of neither alternative type was offered to a descriptor
    #[error("value must be either a {left} or a {right}, got a {actual} instead")]
    InvalidValue {
        left: String,
        right: String,
        actual: String,
    },

    /// The payload was requested from a projection of the other side
    #[error("not a {side} projection")]
    ProjectionType { side: &'static str },

    /// No case of a matcher accepted the value and no fallback was registered
    #[error("no case matched a value of {label}")]
    NoMatch { label: String },

    /// A failure built from a message by a projection
    #[error("{0}")]
    Raised(String),
}

impl Error {
    /// Returns the kind of this error
    pub fn kind(&self) -> ErrorKind {
        match *self {
            Error::InvalidValue { .. } => ErrorKind::InvalidValue,
            Error::ProjectionType { .. } => ErrorKind::ProjectionType,
            Error::NoMatch { .. } => ErrorKind::NoMatch,
            Error::Raised(_) => ErrorKind::Raised,
        }
    }
}

impl From<String> for Error {
    fn from(message: String) -> Error {
        Error::Raised(message)
    }
}
