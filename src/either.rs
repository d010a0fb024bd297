//! # The either module
//! This module contains the Either type and implementations

use std::any::type_name;
use std::fmt;
use std::result;
use std::sync::Arc;

use crate::descriptor::{short_type_name, TypeDescriptor, TypeRegistry};
use crate::matcher::Matcher;
use crate::projection::{LeftProjection, RightProjection};
use crate::Result;

/// Either is a type that represents either of two types
///
/// It is split up into a right and a left value, similar
/// to how the Result type functions. By convention a failure
/// is held on the left and a success on the right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Either<L, R> {
    Left(L),
    Right(R)
}

impl <L, R> Either<L, R> {

    /// Returns true if the Either contains an element of type L
    pub fn is_left(&self) -> bool {
        match *self {
            Either::Left(_) => true,
            Either::Right(_) => false
        }
    }

    /// Returns true if the Either contains an element of type R
    pub fn is_right(&self) -> bool {
        !self.is_left()
    }

    /// Returns a projection over the left side
    ///
    /// The projection is active when the value is a Left; otherwise
    /// every combinator on it behaves as if no value were present.
    /// Use `as_ref().left()` to project without giving up the value.
    pub fn left(self) -> LeftProjection<L, R> {
        LeftProjection::new(self)
    }

    /// Returns a projection over the right side
    pub fn right(self) -> RightProjection<L, R> {
        RightProjection::new(self)
    }

    /// Converts the Either into an Option, returning Some(L) or None
    pub fn left_value(self) -> Option<L> {
        match self {
            Either::Left(val) => Some(val),
            Either::Right(_) => None
        }
    }

    /// Converts the Either into an Option, returning Some(R) or None
    pub fn right_value(self) -> Option<R> {
        match self {
            Either::Left(_) => None,
            Either::Right(val) => Some(val)
        }
    }

    /// Converts from `&Either<L, R>` to `Either<&L, &R>`
    pub fn as_ref(&self) -> Either<&L, &R> {
        match *self {
            Either::Left(ref val) => Either::Left(val),
            Either::Right(ref val) => Either::Right(val)
        }
    }

    /// Converts from `&mut Either<L, R>` to `Either<&mut L, &mut R>`
    pub fn as_mut(&mut self) -> Either<&mut L, &mut R> {
        match *self {
            Either::Left(ref mut val) => Either::Left(val),
            Either::Right(ref mut val) => Either::Right(val)
        }
    }

    /// Swaps the two sides, turning a Left into a Right and vice versa
    pub fn flip(self) -> Either<R, L> {
        match self {
            Either::Left(val) => Either::Right(val),
            Either::Right(val) => Either::Left(val)
        }
    }

    /// Applies one of two functions depending on the side and returns its result
    pub fn either<T, F, G>(self, on_left: F, on_right: G) -> T
        where F: FnOnce(L) -> T, G: FnOnce(R) -> T {
        match self {
            Either::Left(val) => on_left(val),
            Either::Right(val) => on_right(val)
        }
    }

    /// Converts the Either into a Result, a Right being the success
    pub fn into_result(self) -> result::Result<R, L> {
        self.into()
    }

    /// Starts a case-based dispatch over this value
    ///
    /// Cases are registered on the returned Matcher and evaluated in
    /// registration order once `resolve` is called.
    pub fn matcher<'a, T>(self) -> Matcher<'a, L, R, T>
        where L: 'a, R: 'a, T: 'a {
        Matcher::new(self)
    }

    /// Dispatches over this value with the cases registered by `build`
    ///
    /// The first case whose side (and payload type, when narrowed) fits
    /// the value runs and its result is returned. With no fitting case the
    /// fallback runs, if one was registered, otherwise `Error::NoMatch`
    /// is returned.
    ///
    /// ```
    /// use either::{Either, Left, Right};
    ///
    /// let value: Either<i32, String> = Either::Right("five".to_string());
    /// let len = value.matching(|m| m.case(Left, |_| 0).case(Right, |s| s.len()));
    ///
    /// assert_eq!(len.unwrap(), 4);
    /// ```
    pub fn matching<'a, T, F>(self, build: F) -> Result<T>
        where L: 'a, R: 'a, T: 'a, F: FnOnce(Matcher<'a, L, R, T>) -> Matcher<'a, L, R, T> {
        build(self.matcher()).resolve()
    }

    /// Returns a readable label of this value's type, such as `Either[i32, String]`
    ///
    /// Alternatives that are themselves Either values are labelled recursively.
    pub fn type_label(&self) -> String {
        short_type_name(type_name::<Self>())
    }

    /// Returns the interned descriptor of this value's type pair in `registry`
    pub fn descriptor_in(&self, registry: &TypeRegistry) -> Arc<TypeDescriptor>
        where L: 'static, R: 'static {
        registry.descriptor::<L, R>()
    }
}

impl <L, R> From<result::Result<R, L>> for Either<L, R> {
    fn from(result: result::Result<R, L>) -> Either<L, R> {
        match result {
            Ok(val) => Either::Right(val),
            Err(err) => Either::Left(err)
        }
    }
}

impl <L, R> From<Either<L, R>> for result::Result<R, L> {
    fn from(either: Either<L, R>) -> result::Result<R, L> {
        match either {
            Either::Left(err) => Err(err),
            Either::Right(val) => Ok(val)
        }
    }
}

impl <L: fmt::Display, R: fmt::Display> fmt::Display for Either<L, R> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let payload: &dyn fmt::Display = match self {
            Either::Left(val) => val,
            Either::Right(val) => val
        };
        write!(fmt, "{}({})", self.type_label(), payload)
    }
}

/// Splits a sequence of Either values into its lefts and its rights
///
/// Both returned Vecs keep the order the values were yielded in.
pub fn partition<L, R, I>(eithers: I) -> (Vec<L>, Vec<R>)
    where I: IntoIterator<Item = Either<L, R>> {
    let mut lefts = Vec::new();
    let mut rights = Vec::new();

    for either in eithers {
        match either {
            Either::Left(l) => lefts.push(l),
            Either::Right(r) => rights.push(r)
        }
    }

    (lefts, rights)
}

#[cfg(test)]
impl <L: quickcheck::Arbitrary, R: quickcheck::Arbitrary> quickcheck::Arbitrary for Either<L, R> {
    fn arbitrary(g: &mut quickcheck::Gen) -> Either<L, R> {
        if <bool as quickcheck::Arbitrary>::arbitrary(g) {
            Either::Left(L::arbitrary(g))
        } else {
            Either::Right(R::arbitrary(g))
        }
    }
}
