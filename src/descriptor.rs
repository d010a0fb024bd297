//! # The descriptor module
//! This module contains the descriptors of Either type pairs
//!
//! `EitherType<L, R>` is the static descriptor of a pair of alternative types. It carries
//! no data: two requests for the same pair produce the same type, so identity comes for
//! free. It constructs Either values from producers whose result is classified by its
//! runtime type, the way a value of unknown origin has to be placed on a side.
//!
//! `TypeRegistry` interns runtime `TypeDescriptor`s for callers that compare type pairs
//! across a type-erased boundary. The same pair always yields the same shared descriptor.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::result;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use crate::either::Either;
use crate::{Error, Result};

// Label shown for this crate's Either in place of its full path
const EITHER: &str = "Either";

/// Returns the static descriptor of the `(L, R)` type pair
pub fn type_for<L: 'static, R: 'static>() -> EitherType<L, R> {
    EitherType::new()
}

/// The static descriptor of an Either over `L` and `R`
pub struct EitherType<L, R> {
    types: PhantomData<fn() -> (L, R)>,
}

impl <L: 'static, R: 'static> EitherType<L, R> {

    /// Creates the descriptor
    pub const fn new() -> EitherType<L, R> {
        EitherType { types: PhantomData }
    }

    /// Runs the producer and wraps its result
    ///
    /// The result lands on the left when it is an `L`, else on the right when
    /// it is an `R`. A result of neither type is an `Error::InvalidValue`.
    /// A panic in the producer is not caught.
    ///
    /// ```
    /// use either::type_for;
    ///
    /// let value = type_for::<i32, String>().wrap(|| 5).unwrap();
    /// assert_eq!(value.left().map(|v| v * 2).left().get().unwrap(), 10);
    /// ```
    pub fn wrap<V, F>(&self, producer: F) -> Result<Either<L, R>>
        where V: 'static, F: FnOnce() -> V {
        self.lift(producer())
    }

    /// Runs a fallible producer and wraps its result or its error
    ///
    /// An `Err` is captured instead of returned and classified like any
    /// other payload, so an error of type `L` materializes as a Left. Only
    /// errors are captured: a panic in the producer propagates.
    ///
    /// ```
    /// use std::num::ParseIntError;
    /// use either::type_for;
    ///
    /// let parsed = type_for::<ParseIntError, i32>().wrap_error(|| "x".parse::<i32>()).unwrap();
    /// assert!(parsed.is_left());
    /// ```
    pub fn wrap_error<V, E, F>(&self, producer: F) -> Result<Either<L, R>>
        where V: 'static, E: 'static, F: FnOnce() -> result::Result<V, E> {
        match producer() {
            Ok(val) => self.lift(val),
            Err(err) => {
                debug!("Captured a failure of type {} into {}", short_type_name(type_name::<E>()), self.label());
                self.lift(err)
            }
        }
    }

    /// Places a value on the side its runtime type belongs to
    ///
    /// When both sides have the same type the value goes to the left.
    pub fn lift<V: 'static>(&self, value: V) -> Result<Either<L, R>> {
        if TypeId::of::<L>() == TypeId::of::<R>() && TypeId::of::<V>() == TypeId::of::<L>() {
            warn!("Both sides of {} accept the value, placing it on the left", self.label());
        }

        let boxed: Box<dyn Any> = Box::new(value);
        let boxed = match boxed.downcast::<L>() {
            Ok(val) => return Ok(Either::Left(*val)),
            Err(boxed) => boxed
        };
        match boxed.downcast::<R>() {
            Ok(val) => Ok(Either::Right(*val)),
            Err(_) => Err(Error::InvalidValue {
                left: short_type_name(type_name::<L>()),
                right: short_type_name(type_name::<R>()),
                actual: short_type_name(type_name::<V>()),
            })
        }
    }

    /// Returns the readable label of the pair, such as `Either[i32, String]`
    pub fn label(&self) -> String {
        short_type_name(type_name::<Either<L, R>>())
    }

    /// Returns the descriptor of this pair interned in `registry`
    pub fn describe(&self, registry: &TypeRegistry) -> Arc<TypeDescriptor> {
        registry.descriptor::<L, R>()
    }
}

impl <L: 'static, R: 'static> Default for EitherType<L, R> {
    fn default() -> EitherType<L, R> {
        EitherType::new()
    }
}

impl <L, R> Clone for EitherType<L, R> {
    fn clone(&self) -> EitherType<L, R> {
        *self
    }
}

impl <L, R> Copy for EitherType<L, R> {}

impl <L, R> PartialEq for EitherType<L, R> {
    fn eq(&self, _: &EitherType<L, R>) -> bool {
        true
    }
}

impl <L, R> Eq for EitherType<L, R> {}

impl <L, R> fmt::Debug for EitherType<L, R> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "EitherType({})", short_type_name(type_name::<Either<L, R>>()))
    }
}

/// The runtime identity and name of one alternative type
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeTag {
    id: TypeId,
    name: &'static str,
}

impl TypeTag {

    /// Returns the tag of `T`
    pub fn of<T: 'static>() -> TypeTag {
        TypeTag { id: TypeId::of::<T>(), name: type_name::<T>() }
    }

    /// Returns the `TypeId` of the type
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Returns the full name of the type, as given by `std::any::type_name`
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the name of the type without module paths
    pub fn short_name(&self) -> String {
        short_type_name(self.name)
    }
}

/// The runtime descriptor of an Either type pair
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    left: TypeTag,
    right: TypeTag,
}

impl TypeDescriptor {

    pub fn left_type(&self) -> TypeTag {
        self.left
    }

    pub fn right_type(&self) -> TypeTag {
        self.right
    }

    /// Returns true if both alternatives are the same type
    ///
    /// Values lifted through such a pair always land on the left.
    pub fn is_ambiguous(&self) -> bool {
        self.left.id == self.right.id
    }

    /// Returns the readable label of the pair, such as `Either[i32, String]`
    pub fn label(&self) -> String {
        format!("{}[{}, {}]", EITHER, self.left.short_name(), self.right.short_name())
    }
}

/// An interning table of type descriptors
///
/// Descriptors are created on first request and kept for the lifetime of
/// the registry. Requests for the same pair from several threads all get
/// the same descriptor.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    descriptors: RwLock<HashMap<(TypeId, TypeId), Arc<TypeDescriptor>>>,
}

impl TypeRegistry {

    /// Creates an empty registry
    pub fn new() -> TypeRegistry {
        TypeRegistry::default()
    }

    /// Returns the registry shared by the whole process
    pub fn global() -> &'static TypeRegistry {
        static GLOBAL: OnceLock<TypeRegistry> = OnceLock::new();
        GLOBAL.get_or_init(TypeRegistry::new)
    }

    /// Returns the descriptor of the `(L, R)` pair, interning it on first request
    pub fn descriptor<L: 'static, R: 'static>(&self) -> Arc<TypeDescriptor> {
        let key = (TypeId::of::<L>(), TypeId::of::<R>());

        // The table is insert-only, so a poisoned lock still guards a consistent map
        if let Some(descriptor) = self.descriptors.read().unwrap_or_else(PoisonError::into_inner).get(&key) {
            return descriptor.clone();
        }

        let mut descriptors = self.descriptors.write().unwrap_or_else(PoisonError::into_inner);
        descriptors.entry(key).or_insert_with(|| {
            let descriptor = TypeDescriptor { left: TypeTag::of::<L>(), right: TypeTag::of::<R>() };
            debug!("Interned type descriptor {}", descriptor.label());
            Arc::new(descriptor)
        }).clone()
    }

    /// Returns the number of interned descriptors
    pub fn len(&self) -> usize {
        self.descriptors.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Shortens a type name from `std::any::type_name` for display
///
/// Module paths are dropped from every type in the name and this crate's
/// `Either<L, R>` is written `Either[L, R]`, so
/// `either::either::Either<i32, alloc::string::String>` becomes `Either[i32, String]`.
/// Other types named `Either` keep their angle brackets.
pub fn short_type_name(full: &str) -> String {
    let either_path = either_path();
    let mut out = String::with_capacity(full.len());
    let mut path = String::new();
    let mut segment = String::new();
    let mut closers = Vec::new();
    let mut chars = full.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            ':' if chars.peek() == Some(&':') => {
                chars.next();
                path.push_str("::");
                segment.clear();
            },
            '<' => {
                let (open, close) = if path == either_path { ('[', ']') } else { ('<', '>') };
                out.push_str(&segment);
                out.push(open);
                closers.push(close);
                path.clear();
                segment.clear();
            },
            // The arrow of a function type closes nothing
            '>' if segment.is_empty() && out.ends_with('-') => out.push('>'),
            '>' => {
                out.push_str(&segment);
                out.push(closers.pop().unwrap_or('>'));
                path.clear();
                segment.clear();
            },
            c if c.is_alphanumeric() || c == '_' => {
                path.push(c);
                segment.push(c);
            },
            _ => {
                out.push_str(&segment);
                out.push(c);
                path.clear();
                segment.clear();
            }
        }
    }
    out.push_str(&segment);

    out
}

// Full path of this crate's Either, as `type_name` spells it
fn either_path() -> &'static str {
    let name = type_name::<Either<(), ()>>();
    match name.find('<') {
        Some(end) => &name[..end],
        None => name
    }
}
