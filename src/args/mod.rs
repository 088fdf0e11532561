//! Argument types, converted values and the converter registry.

mod builtin;
mod registry;

pub use builtin::{
    BoolConverter, ChannelConverter, ContextConverter, GuildConverter, MemberConverter,
    RoleConverter, StringConverter, UserConverter, parse_bool,
};
pub use registry::{ArgumentConverter, ConverterRegistry, FnConverter};

use std::any::{Any, TypeId};
use std::hash::{Hash, Hasher};

use crate::context::InvocationContext;
use crate::error::HandlerError;

/// Key identifying which converter handles an argument position.
///
/// Equality and hashing use only the underlying [`TypeId`]; the name is kept
/// for diagnostics and help output.
#[derive(Clone, Copy)]
pub struct ArgumentTypeId {
    id: TypeId,
    name: &'static str,
}

impl ArgumentTypeId {
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The reserved "invocation context" type. Positions of this type take
    /// no token and do not count toward arity.
    pub fn context() -> Self {
        Self::of::<InvocationContext>()
    }

    /// The reserved string type. In last position it swallows every
    /// remaining token.
    pub fn string() -> Self {
        Self::of::<String>()
    }

    pub fn is_context(&self) -> bool {
        self.id == TypeId::of::<InvocationContext>()
    }

    pub fn is_string(&self) -> bool {
        self.id == TypeId::of::<String>()
    }

    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name.
    pub fn full_name(&self) -> &'static str {
        self.name
    }

    /// Type name without its module path, e.g. `User`.
    pub fn name(&self) -> &'static str {
        let base = self.name.split('<').next().unwrap_or(self.name);
        base.rsplit("::").next().unwrap_or(base)
    }
}

impl PartialEq for ArgumentTypeId {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ArgumentTypeId {}

impl Hash for ArgumentTypeId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Debug for ArgumentTypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A converted argument value.
pub type ArgValue = Box<dyn Any + Send + Sync>;

/// Converted arguments for one invocation, one per declared position
/// (context positions included).
#[derive(Default)]
pub struct Args {
    values: Vec<ArgValue>,
}

impl Args {
    pub(crate) fn new(values: Vec<ArgValue>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Borrow the value at `index` if it has type `T`.
    pub fn get<T: Any>(&self, index: usize) -> Option<&T> {
        self.values.get(index)?.downcast_ref::<T>()
    }

    /// Clone the value at `index` out as `T`.
    ///
    /// A wrong index or type is a programming error in the handler and
    /// surfaces as [`HandlerError::Internal`].
    pub fn arg<T: Any + Clone>(&self, index: usize) -> Result<T, HandlerError> {
        self.get::<T>(index).cloned().ok_or_else(|| {
            HandlerError::Internal(anyhow::anyhow!(
                "argument {index} is not a {}",
                std::any::type_name::<T>()
            ))
        })
    }

    /// Shorthand for `arg::<String>`, borrowing.
    pub fn str(&self, index: usize) -> Result<&str, HandlerError> {
        self.get::<String>(index).map(String::as_str).ok_or_else(|| {
            HandlerError::Internal(anyhow::anyhow!("argument {index} is not a string"))
        })
    }
}

impl std::fmt::Debug for Args {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Args").field("len", &self.values.len()).finish()
    }
}
