//! Result renderers keyed by runtime type.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use harmony_lexer::Snowflake;
use tracing::warn;

use crate::command::HelpPage;
use crate::context::InvocationContext;
use crate::model::{Channel, Guild, Member, Role, User};
use crate::output::OutputValue;

/// Sends one result value of type `T` somewhere, usually the invoking
/// channel.
#[async_trait]
pub trait ResultRenderer<T: Send + 'static>: Send + Sync + 'static {
    async fn render(&self, ctx: &InvocationContext, value: T) -> anyhow::Result<()>;
}

#[async_trait]
trait ErasedRenderer: Send + Sync {
    async fn render(&self, ctx: &InvocationContext, value: OutputValue) -> anyhow::Result<()>;
}

struct Typed<T, R> {
    renderer: R,
    _marker: PhantomData<fn(T)>,
}

#[async_trait]
impl<T, R> ErasedRenderer for Typed<T, R>
where
    T: Send + 'static,
    R: ResultRenderer<T>,
{
    async fn render(&self, ctx: &InvocationContext, value: OutputValue) -> anyhow::Result<()> {
        match value.downcast::<T>() {
            Ok(value) => self.renderer.render(ctx, *value).await,
            Err(_) => anyhow::bail!("renderer registered for the wrong type"),
        }
    }
}

/// Renders by sending `format(value)` to the invoking channel.
pub struct TextRenderer<F>(pub F);

#[async_trait]
impl<T, F> ResultRenderer<T> for TextRenderer<F>
where
    T: Send + 'static,
    F: Fn(&T) -> String + Send + Sync + 'static,
{
    async fn render(&self, ctx: &InvocationContext, value: T) -> anyhow::Result<()> {
        let text = (self.0)(&value);
        ctx.reply(&text).await?;
        Ok(())
    }
}

/// Registry of renderers keyed by result type.
pub struct RendererRegistry {
    renderers: HashMap<TypeId, Arc<dyn ErasedRenderer>>,
}

impl RendererRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            renderers: HashMap::new(),
        }
    }

    /// Text renderers for strings, numbers, booleans, snowflakes, platform
    /// entities and help pages.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry
            .register_text(|s: &String| s.clone())
            .register_text(|s: &&'static str| s.to_string())
            .register_text(|n: &i64| n.to_string())
            .register_text(|n: &i32| n.to_string())
            .register_text(|n: &u64| n.to_string())
            .register_text(|n: &u32| n.to_string())
            .register_text(|n: &usize| n.to_string())
            .register_text(|n: &f64| n.to_string())
            .register_text(|b: &bool| if *b { "True" } else { "False" }.to_string())
            .register_text(|id: &Snowflake| id.to_string())
            .register_text(User::mention)
            .register_text(Member::mention)
            .register_text(Role::mention)
            .register_text(Channel::mention)
            .register_text(|g: &Guild| g.name.clone())
            .register_text(HelpPage::to_text);
        registry
    }

    /// Register `renderer` for `T`, replacing any previous one.
    pub fn register<T, R>(&mut self, renderer: R) -> &mut Self
    where
        T: Send + 'static,
        R: ResultRenderer<T>,
    {
        let erased = Typed {
            renderer,
            _marker: PhantomData::<fn(T)>,
        };
        if self
            .renderers
            .insert(TypeId::of::<T>(), Arc::new(erased))
            .is_some()
        {
            warn!(type_name = std::any::type_name::<T>(), "Replaced result renderer");
        }
        self
    }

    /// Register a renderer that replies with `format(value)`.
    pub fn register_text<T, F>(&mut self, format: F) -> &mut Self
    where
        T: Send + 'static,
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        self.register::<T, _>(TextRenderer(format))
    }

    pub fn contains<T: Any>(&self) -> bool {
        self.renderers.contains_key(&TypeId::of::<T>())
    }

    /// Render `value` with the renderer for its runtime type.
    ///
    /// Returns `Ok(false)` when no renderer is registered for that type.
    pub async fn render(&self, ctx: &InvocationContext, value: OutputValue) -> anyhow::Result<bool> {
        let type_id = {
            let inner: &dyn Any = &*value;
            inner.type_id()
        };
        let Some(renderer) = self.renderers.get(&type_id).cloned() else {
            return Ok(false);
        };
        renderer.render(ctx, value).await?;
        Ok(true)
    }
}

impl Default for RendererRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
