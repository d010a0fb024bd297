//! # The projection module
//! This module contains the side-specific views over an Either
//!
//! A projection focuses on one side of an Either. It is active when the value sits on
//! that side and exposes the payload through combinators; when inactive every
//! combinator behaves like an absent value and the other side's payload is carried
//! along untouched. Both sides share one implementation: a projection stores the value
//! reoriented so that its own side comes first, and its `Side` marker restores the
//! caller's orientation whenever a combinator hands an Either back.

use std::any::type_name;
use std::marker::PhantomData;
use std::option;
use std::result;

use crate::descriptor::short_type_name;
use crate::either::Either;
use crate::{Error, Result};

/// A side of an Either, used to orient projections and to name match cases
pub trait Side: Copy + 'static {
    /// The side's name, `Left` or `Right`
    const NAME: &'static str;

    /// The Either holding `A` on this side and `O` on the other one
    type Shape<A, O>;

    /// Reorients a value so this side's type comes first
    fn focus<A, O>(either: Self::Shape<A, O>) -> Either<A, O>;

    /// Restores the orientation of a focused value
    fn release<A, O>(focused: Either<A, O>) -> Self::Shape<A, O>;
}

/// The left side marker
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Left;

/// The right side marker
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Right;

impl Side for Left {
    const NAME: &'static str = "Left";

    type Shape<A, O> = Either<A, O>;

    fn focus<A, O>(either: Either<A, O>) -> Either<A, O> {
        either
    }

    fn release<A, O>(focused: Either<A, O>) -> Either<A, O> {
        focused
    }
}

impl Side for Right {
    const NAME: &'static str = "Right";

    type Shape<A, O> = Either<O, A>;

    fn focus<A, O>(either: Either<O, A>) -> Either<A, O> {
        either.flip()
    }

    fn release<A, O>(focused: Either<A, O>) -> Either<O, A> {
        focused.flip()
    }
}

/// A view over one side of an Either
///
/// `A` is the type of the projected side and `O` the type of the other side.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Projection<A, O, S: Side> {
    focused: Either<A, O>,
    side: PhantomData<S>,
}

/// A view over the left side of an `Either<L, R>`
pub type LeftProjection<L, R> = Projection<L, R, Left>;

/// A view over the right side of an `Either<L, R>`
pub type RightProjection<L, R> = Projection<R, L, Right>;

impl <A, O, S: Side> Projection<A, O, S> {

    /// Creates a projection over `either`
    pub fn new(either: S::Shape<A, O>) -> Projection<A, O, S> {
        Projection { focused: S::focus(either), side: PhantomData }
    }

    /// Gives the Either back
    pub fn into_either(self) -> S::Shape<A, O> {
        S::release(self.focused)
    }

    /// Returns true if the value sits on this projection's side
    pub fn is_present(&self) -> bool {
        self.focused.is_left()
    }

    /// Returns true if the value sits on the other side
    pub fn is_empty(&self) -> bool {
        !self.is_present()
    }

    /// Returns the payload, or `Error::ProjectionType` when inactive
    pub fn get(self) -> Result<A> {
        match self.focused {
            Either::Left(val) => Ok(val),
            Either::Right(_) => Err(Error::ProjectionType { side: S::NAME })
        }
    }

    /// Runs `fallback` if the projection is inactive
    ///
    /// An active projection needs no default: the fallback is not run and
    /// `None` is returned.
    pub fn get_or_else<T, F>(self, fallback: F) -> Option<T>
        where F: FnOnce() -> T {
        match self.focused {
            Either::Left(_) => None,
            Either::Right(_) => Some(fallback())
        }
    }

    /// Returns the payload, or the default value of its type when inactive
    pub fn or_default(self) -> A
        where A: Default {
        self.into_option().unwrap_or_default()
    }

    /// Returns the payload as an Option
    pub fn into_option(self) -> Option<A> {
        self.focused.left_value()
    }

    /// Calls `f` with the payload when active
    pub fn each<F>(&self, f: F)
        where F: FnOnce(&A) {
        if let Either::Left(ref val) = self.focused {
            f(val)
        }
    }

    /// Calls `f` with the payload when active and returns the projection unchanged
    pub fn inside<F>(self, f: F) -> Self
        where F: FnOnce(&A) {
        self.each(f);
        self
    }

    /// Applies `on_present` to the payload, or returns `on_empty()` when inactive
    pub fn fold<T, E, P>(self, on_empty: E, on_present: P) -> T
        where E: FnOnce() -> T, P: FnOnce(A) -> T {
        match self.focused {
            Either::Left(val) => on_present(val),
            Either::Right(_) => on_empty()
        }
    }

    /// Returns true if active and the payload satisfies `pred`
    pub fn exists<P>(&self, pred: P) -> bool
        where P: FnOnce(&A) -> bool {
        match self.focused {
            Either::Left(ref val) => pred(val),
            Either::Right(_) => false
        }
    }

    /// Returns true if active and the payload equals `value`
    pub fn includes(&self, value: &A) -> bool
        where A: PartialEq {
        self.exists(|val| val == value)
    }

    /// Keeps an active projection whose payload satisfies `pred`
    ///
    /// An active projection failing `pred` becomes absent (`None`). An
    /// inactive projection is returned as it is, whatever `pred` says.
    pub fn filter<P>(self, pred: P) -> Option<Self>
        where P: FnOnce(&A) -> bool {
        if self.is_empty() || self.exists(pred) {
            Some(self)
        } else {
            None
        }
    }

    /// Returns the projection when active, otherwise a projection over the Either `f` produces
    pub fn or_else<F>(self, f: F) -> Self
        where F: FnOnce() -> S::Shape<A, O> {
        if self.is_present() {
            self
        } else {
            Projection::new(f())
        }
    }

    /// Maps the payload, giving a new Either
    ///
    /// The other side keeps its type while this side takes the type `f`
    /// returns. An inactive projection carries the other payload over.
    ///
    /// ```
    /// use either::Either;
    ///
    /// let value: Either<i32, String> = Either::Left(5);
    /// let doubled: Either<f64, String> = value.left().map(|v| v as f64 * 2.0);
    ///
    /// assert_eq!(doubled, Either::Left(10.0));
    /// ```
    pub fn map<B, F>(self, f: F) -> S::Shape<B, O>
        where F: FnOnce(A) -> B {
        S::release(match self.focused {
            Either::Left(val) => Either::Left(f(val)),
            Either::Right(other) => Either::Right(other)
        })
    }

    /// Chains a computation that itself produces an Either
    ///
    /// The Either returned by `f` is the result. An inactive projection
    /// carries the other payload over without calling `f`.
    pub fn flat_map<B, F>(self, f: F) -> S::Shape<B, O>
        where F: FnOnce(A) -> S::Shape<B, O> {
        match self.focused {
            Either::Left(val) => f(val),
            Either::Right(other) => S::release(Either::Right(other))
        }
    }

    /// Returns the projection when active, otherwise fails with the other side's payload
    pub fn error(self) -> result::Result<Self, O> {
        match self.focused {
            Either::Left(val) => Ok(Projection { focused: Either::Left(val), side: PhantomData }),
            Either::Right(other) => Err(other)
        }
    }

    /// Returns the projection when active, otherwise fails with `err`
    pub fn error_with<E>(self, err: E) -> result::Result<Self, E> {
        if self.is_present() {
            Ok(self)
        } else {
            Err(err)
        }
    }

    /// Returns the projection when active, otherwise fails with an error of kind `E` built from `message`
    ///
    /// ```
    /// use either::{Either, Error};
    ///
    /// let value: Either<i32, String> = Either::Right("oops".to_string());
    /// let err = value.left().error_msg::<Error>("expected a number").unwrap_err();
    ///
    /// assert_eq!(err.to_string(), "expected a number");
    /// ```
    pub fn error_msg<E>(self, message: impl Into<String>) -> result::Result<Self, E>
        where E: From<String> {
        if self.is_present() {
            Ok(self)
        } else {
            Err(E::from(message.into()))
        }
    }

    /// Returns the payload in a Vec, which is empty when inactive
    pub fn to_vec(self) -> Vec<A> {
        self.into_iter().collect()
    }

    /// Returns the readable name of this side's type
    pub fn type_label(&self) -> String {
        short_type_name(type_name::<A>())
    }
}

impl <L, R> LeftProjection<Either<L, R>, R> {

    /// Removes one level of nesting from a left projection over a nested Either
    pub fn flatten(self) -> LeftProjection<L, R> {
        match self.focused {
            Either::Left(inner) => inner.left(),
            Either::Right(other) => Either::Right(other).left()
        }
    }
}

impl <L, R> RightProjection<L, Either<L, R>> {

    /// Removes one level of nesting from a right projection over a nested Either
    pub fn flatten(self) -> RightProjection<L, R> {
        match self.focused {
            Either::Left(inner) => inner.right(),
            Either::Right(other) => Either::Left(other).right()
        }
    }
}

impl <A, O, S: Side> IntoIterator for Projection<A, O, S> {
    type Item = A;
    type IntoIter = option::IntoIter<A>;

    fn into_iter(self) -> option::IntoIter<A> {
        self.into_option().into_iter()
    }
}
