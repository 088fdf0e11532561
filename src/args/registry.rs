//! Type-keyed converter registry.
//!
//! Populated while the router is being built, then shared read-only behind an
//! `Arc` by every dispatch.

use std::any::Any;
use std::collections::HashMap;
use std::fmt::Display;
use std::marker::PhantomData;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use harmony_lexer::Snowflake;
use tracing::warn;

use super::builtin::{
    BoolConverter, ChannelConverter, ContextConverter, GuildConverter, MemberConverter,
    RoleConverter, StringConverter, UserConverter,
};
use super::{ArgValue, ArgumentTypeId};
use crate::context::InvocationContext;
use crate::error::ConvertError;

/// Turns one token into a typed value.
#[async_trait]
pub trait ArgumentConverter: Send + Sync + 'static {
    /// The type this converter produces.
    fn accepts(&self) -> ArgumentTypeId;

    /// Convert `token`. Return [`ConvertError::Mismatch`] when the token
    /// simply doesn't fit, so the next candidate variant gets a chance.
    async fn convert(&self, ctx: &InvocationContext, token: &str)
    -> Result<ArgValue, ConvertError>;
}

/// Converter backed by a synchronous closure.
pub struct FnConverter<T, F> {
    convert: F,
    _marker: PhantomData<fn() -> T>,
}

impl<T, F> FnConverter<T, F>
where
    T: Any + Send + Sync,
    F: Fn(&str) -> Result<T, ConvertError> + Send + Sync + 'static,
{
    pub fn new(convert: F) -> Self {
        Self {
            convert,
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<T, F> ArgumentConverter for FnConverter<T, F>
where
    T: Any + Send + Sync,
    F: Fn(&str) -> Result<T, ConvertError> + Send + Sync + 'static,
{
    fn accepts(&self) -> ArgumentTypeId {
        ArgumentTypeId::of::<T>()
    }

    async fn convert(
        &self,
        _ctx: &InvocationContext,
        token: &str,
    ) -> Result<ArgValue, ConvertError> {
        (self.convert)(token).map(|value| Box::new(value) as ArgValue)
    }
}

/// Registry of argument converters keyed by produced type.
pub struct ConverterRegistry {
    converters: HashMap<ArgumentTypeId, Arc<dyn ArgumentConverter>>,
}

impl ConverterRegistry {
    /// A registry holding only the two reserved converters (context and
    /// string).
    pub fn new() -> Self {
        let mut registry = Self {
            converters: HashMap::new(),
        };
        registry.register(ContextConverter);
        registry.register(StringConverter);
        registry
    }

    /// A registry with every built-in converter: numbers, booleans,
    /// snowflakes and platform entities.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_from_str::<i64>();
        registry.register_from_str::<i32>();
        registry.register_from_str::<f64>();
        registry.register_from_str::<Snowflake>();
        registry.register(BoolConverter);
        registry.register(UserConverter);
        registry.register(MemberConverter);
        registry.register(RoleConverter);
        registry.register(ChannelConverter);
        registry.register(GuildConverter);
        registry
    }

    /// Register `converter` for the type it accepts, replacing any previous
    /// converter for that type.
    pub fn register<C: ArgumentConverter>(&mut self, converter: C) -> &mut Self {
        self.register_arc(Arc::new(converter))
    }

    pub fn register_arc(&mut self, converter: Arc<dyn ArgumentConverter>) -> &mut Self {
        let type_id = converter.accepts();
        if self.converters.insert(type_id, converter).is_some() {
            warn!(type_name = type_id.full_name(), "Replaced argument converter");
        }
        self
    }

    /// Register a synchronous converter closure for `T`.
    pub fn register_fn<T, F>(&mut self, convert: F) -> &mut Self
    where
        T: Any + Send + Sync,
        F: Fn(&str) -> Result<T, ConvertError> + Send + Sync + 'static,
    {
        self.register(FnConverter::new(convert))
    }

    /// Register a converter that parses tokens with `T::from_str`; parse
    /// failures are mismatches.
    pub fn register_from_str<T>(&mut self) -> &mut Self
    where
        T: FromStr + Any + Send + Sync,
        T::Err: Display,
    {
        self.register_fn::<T, _>(|token| {
            token.parse::<T>().map_err(|e| {
                ConvertError::mismatch(format!(
                    "{token:?} is not a valid {}: {e}",
                    ArgumentTypeId::of::<T>().name()
                ))
            })
        })
    }

    pub fn get(&self, type_id: &ArgumentTypeId) -> Option<Arc<dyn ArgumentConverter>> {
        self.converters.get(type_id).cloned()
    }

    pub fn contains(&self, type_id: &ArgumentTypeId) -> bool {
        self.converters.contains_key(type_id)
    }

    pub fn len(&self) -> usize {
        self.converters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
