//! # The matcher module
//! This module contains the case-based dispatcher over Either values
//!
//! A Matcher is an ordered list of cases plus an optional fallback. Each case names a
//! side and, for type-erased payloads, the runtime type the payload must have. Cases
//! are tried in registration order when the matcher is resolved: the first case that
//! fits runs and its result is the result of the match, the cases after it never run.

use std::any::{type_name, Any};
use std::error;
use std::marker::PhantomData;
use std::result;

use crate::descriptor::short_type_name;
use crate::either::Either;
use crate::projection::{Left, Right, Side};
use crate::{Error, Result};

/// A pattern that a match case tests an Either against
///
/// `bind` takes the value and either extracts the binding the case's
/// handler receives or hands the value back untouched for the next case.
pub trait Pattern<L, R> {
    type Binding;

    fn bind(&self, subject: Either<L, R>) -> result::Result<Self::Binding, Either<L, R>>;

    /// Returns a readable description of the pattern, such as `Left` or `Right<String>`
    fn describe(&self) -> String;
}

impl <L, R> Pattern<L, R> for Left {
    type Binding = L;

    fn bind(&self, subject: Either<L, R>) -> result::Result<L, Either<L, R>> {
        match subject {
            Either::Left(val) => Ok(val),
            other => Err(other)
        }
    }

    fn describe(&self) -> String {
        Left::NAME.to_string()
    }
}

impl <L, R> Pattern<L, R> for Right {
    type Binding = R;

    fn bind(&self, subject: Either<L, R>) -> result::Result<R, Either<L, R>> {
        match subject {
            Either::Right(val) => Ok(val),
            other => Err(other)
        }
    }

    fn describe(&self) -> String {
        Right::NAME.to_string()
    }
}

/// Runtime narrowing of a type-erased payload to a concrete type
pub trait Narrow<T>: Sized {

    /// Returns the payload as a `T`, or gives it back when it is not one
    fn narrow(self) -> result::Result<Box<T>, Self>;
}

impl <T: Any> Narrow<T> for Box<dyn Any> {
    fn narrow(self) -> result::Result<Box<T>, Box<dyn Any>> {
        self.downcast()
    }
}

impl <T: Any> Narrow<T> for Box<dyn Any + Send> {
    fn narrow(self) -> result::Result<Box<T>, Box<dyn Any + Send>> {
        self.downcast()
    }
}

impl <T: error::Error + 'static> Narrow<T> for Box<dyn error::Error> {
    fn narrow(self) -> result::Result<Box<T>, Box<dyn error::Error>> {
        self.downcast()
    }
}

impl <T: error::Error + 'static> Narrow<T> for Box<dyn error::Error + Send + Sync> {
    fn narrow(self) -> result::Result<Box<T>, Box<dyn error::Error + Send + Sync>> {
        self.downcast()
    }
}

/// A side pattern narrowed to payloads of type `T`
#[derive(Debug)]
pub struct Typed<S, T> {
    side: S,
    payload: PhantomData<fn() -> T>,
}

impl Left {

    /// Narrows the left pattern to payloads holding a `T`
    ///
    /// Only type-erased payloads can be narrowed: `Box<dyn Any>`, `Box<dyn Any + Send>`
    /// and boxed errors. For a concrete payload type the side decides on its own, so
    /// use the bare `Left` marker instead.
    ///
    /// ```compile_fail
    /// use either::{Either, Left};
    ///
    /// let value: Either<String, i32> = Either::Left("foo".to_string());
    /// let _ = value.matching(|m| m.case(Left.holding::<String>(), |s| s.len()));
    /// ```
    pub fn holding<T>(self) -> Typed<Left, T> {
        Typed { side: self, payload: PhantomData }
    }
}

impl Right {

    /// Narrows the right pattern to payloads holding a `T`
    ///
    /// Only type-erased payloads can be narrowed: `Box<dyn Any>`, `Box<dyn Any + Send>`
    /// and boxed errors. For a concrete payload type the side decides on its own, so
    /// use the bare `Right` marker instead.
    pub fn holding<T>(self) -> Typed<Right, T> {
        Typed { side: self, payload: PhantomData }
    }
}

impl <L: Narrow<T>, R, T> Pattern<L, R> for Typed<Left, T> {
    type Binding = Box<T>;

    fn bind(&self, subject: Either<L, R>) -> result::Result<Box<T>, Either<L, R>> {
        match self.side.bind(subject) {
            Ok(val) => val.narrow().map_err(Either::Left),
            Err(other) => Err(other)
        }
    }

    fn describe(&self) -> String {
        format!("{}<{}>", Left::NAME, short_type_name(type_name::<T>()))
    }
}

impl <L, R: Narrow<T>, T> Pattern<L, R> for Typed<Right, T> {
    type Binding = Box<T>;

    fn bind(&self, subject: Either<L, R>) -> result::Result<Box<T>, Either<L, R>> {
        match self.side.bind(subject) {
            Ok(val) => val.narrow().map_err(Either::Right),
            Err(other) => Err(other)
        }
    }

    fn describe(&self) -> String {
        format!("{}<{}>", Right::NAME, short_type_name(type_name::<T>()))
    }
}

type Case<'a, L, R, T> = Box<dyn FnOnce(Either<L, R>) -> result::Result<T, Either<L, R>> + 'a>;

type Fallback<'a, L, R, T> = Box<dyn FnOnce(Either<L, R>) -> T + 'a>;

/// A one-shot dispatcher over an Either value
pub struct Matcher<'a, L, R, T> {
    subject: Either<L, R>,
    cases: Vec<(String, Case<'a, L, R, T>)>,
    fallback: Option<Fallback<'a, L, R, T>>,
}

impl <'a, L: 'a, R: 'a, T: 'a> Matcher<'a, L, R, T> {

    /// Creates a matcher over `subject` with no cases
    pub fn new(subject: Either<L, R>) -> Matcher<'a, L, R, T> {
        Matcher { subject, cases: Vec::new(), fallback: None }
    }

    /// Registers a case
    ///
    /// When `pattern` binds the value, `handler` is called with the binding
    /// and its return value becomes the result of the match.
    pub fn case<P, F>(mut self, pattern: P, handler: F) -> Matcher<'a, L, R, T>
        where P: Pattern<L, R> + 'a, F: FnOnce(P::Binding) -> T + 'a {
        let description = pattern.describe();
        self.cases.push((description, Box::new(move |subject: Either<L, R>| pattern.bind(subject).map(handler))));
        self
    }

    /// Registers the fallback, run with the whole value when no case fits
    ///
    /// A later fallback replaces an earlier one.
    pub fn otherwise<F>(mut self, handler: F) -> Matcher<'a, L, R, T>
        where F: FnOnce(Either<L, R>) -> T + 'a {
        self.fallback = Some(Box::new(handler));
        self
    }

    /// Tries the cases in registration order and returns the first result
    ///
    /// Fails with `Error::NoMatch` when no case fits and there is no fallback.
    pub fn resolve(self) -> Result<T> {
        let mut subject = self.subject;

        for (index, (description, case)) in self.cases.into_iter().enumerate() {
            subject = match case(subject) {
                Ok(result) => {
                    trace!("Match resolved by case {} ({})", index, description);
                    return Ok(result);
                },
                Err(subject) => subject
            };
        }

        match self.fallback {
            Some(fallback) => {
                trace!("Match resolved by the fallback");
                Ok(fallback(subject))
            },
            None => Err(Error::NoMatch { label: subject.type_label() })
        }
    }
}

// Module containing matcher tests
#[cfg(test)]
mod tests {
    use std::any::Any;
    use std::cell::Cell;
    use std::error;
    use std::io;
    use std::num::ParseIntError;

    use pretty_assertions::assert_eq;

    use super::{Matcher, Pattern, Typed};
    use crate::descriptor::type_for;
    use crate::either::Either;
    use crate::projection::{Left, Right};
    use crate::{Error, ErrorKind};

    // Tests dispatch on the side of the value
    #[test]
    fn test_match_side() {
        let value = type_for::<String, i32>().wrap(|| "foo".to_string()).unwrap();

        let said = value.matching(|m| {
            m.case(Left, |_| "I'm a string!")
             .case(Right, |_| "I'm a number!")
        });

        assert_eq!(said.unwrap(), "I'm a string!");
    }

    // Tests that handlers receive the payload
    #[test]
    fn test_match_binding() {
        let value: Either<String, i32> = Either::Right(41);

        let result = value.matching(|m| m.case(Left, |s: String| s.len() as i32).case(Right, |n| n + 1));

        assert_eq!(result.unwrap(), 42);
    }

    // The first fitting case wins and later cases never run
    #[test]
    fn test_match_first_case_wins() {
        let later_ran = Cell::new(false);
        let value: Either<u8, char> = Either::Left(1);

        let result = value.matching(|m| {
            m.case(Left, |_| "first")
             .case(Left, |_| { later_ran.set(true); "second" })
        });

        assert_eq!(result.unwrap(), "first");
        assert!(!later_ran.get());
    }

    // Tests the otherwise function
    #[test]
    fn test_match_otherwise() {
        let value: Either<u8, char> = Either::Right('x');

        let result = value.matching(|m| {
            m.otherwise(|either| either.is_right())
             .case(Left, |_| false)
        });

        assert!(result.unwrap());
    }

    // The fallback is not run when a case fits
    #[test]
    fn test_match_otherwise_skipped() {
        let value: Either<u8, char> = Either::Left(3);

        let result = value.matching(|m| m.case(Left, |n| n * 2).otherwise(|_| 0));

        assert_eq!(result.unwrap(), 6);
    }

    // Tests the NoMatch error
    #[test]
    fn test_no_match() {
        let value: Either<u8, char> = Either::Right('x');

        let err = value.matching(|m| m.case(Left, |n| n)).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NoMatch);
        assert_eq!(err, Error::NoMatch { label: "Either[u8, char]".to_string() });
    }

    // A matcher with no cases at all fails as well
    #[test]
    fn test_no_cases() {
        let value: Either<u8, char> = Either::Left(1);

        assert_eq!(Matcher::<u8, char, ()>::new(value).resolve().unwrap_err().kind(), ErrorKind::NoMatch);
    }

    // Tests narrowing a type-erased payload
    #[test]
    fn test_match_typed_any() {
        let value: Either<Box<dyn Any>, u8> = Either::Left(Box::new("text".to_string()));

        let result = value.matching(|m| {
            m.case(Left.holding::<i64>(), |n| format!("number {}", n))
             .case(Left.holding::<String>(), |s| format!("string {}", s))
             .case(Left, |_| "something else".to_string())
        });

        assert_eq!(result.unwrap(), "string text");
    }

    // A failed narrowing leaves the value for the following cases
    #[test]
    fn test_match_typed_falls_through() {
        let value: Either<u8, Box<dyn Any + Send>> = Either::Right(Box::new(2.5f32));

        let result = value.matching(|m| {
            m.case(Right.holding::<f64>(), |_| "f64")
             .case(Right, |payload| if payload.is::<f32>() { "f32" } else { "unknown" })
        });

        assert_eq!(result.unwrap(), "f32");
    }

    // Tests narrowing a captured error
    #[test]
    fn test_match_typed_error() {
        type Failure = Box<dyn error::Error + Send + Sync>;

        let parsed = type_for::<Failure, i32>().wrap_error(|| -> Result<i32, Failure> {
            "nope".parse::<i32>().map_err(Failure::from)
        }).unwrap();

        let result = parsed.matching(|m| {
            m.case(Left.holding::<io::Error>(), |_| "io")
             .case(Left.holding::<ParseIntError>(), |_| "parse")
             .case(Right, |_| "number")
        });

        assert_eq!(result.unwrap(), "parse");
    }

    // Tests the describe function of each pattern
    #[test]
    fn test_describe() {
        assert_eq!(<Left as Pattern<u8, u8>>::describe(&Left), "Left");
        assert_eq!(<Right as Pattern<u8, u8>>::describe(&Right), "Right");
        assert_eq!(<Typed<Left, String> as Pattern<Box<dyn Any>, u8>>::describe(&Left.holding()), "Left<String>");
    }
}
