//! Uncompiled command descriptions and the fluent builder producing them.
//!
//! A [`CommandSpec`] is the one shape every discovery mechanism hands to the
//! router. Whether it came from [`CommandBuilder`], a config file or a custom
//! [`CommandSource`] makes no difference once registered.

use std::any::Any;
use std::future::Future;
use std::sync::Arc;

use futures_util::future::{BoxFuture, FutureExt};

use crate::args::{ArgumentTypeId, Args};
use crate::context::InvocationContext;
use crate::error::HandlerResult;
use crate::permissions::Permissions;

/// What a handler receives.
pub struct Invocation {
    pub ctx: InvocationContext,
    pub args: Args,
}

/// A type-erased command body.
pub type Handler = Arc<dyn Fn(Invocation) -> BoxFuture<'static, HandlerResult> + Send + Sync>;

/// Wrap an async closure as a [`Handler`].
pub fn handler<F, Fut>(f: F) -> Handler
where
    F: Fn(Invocation) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    Arc::new(move |invocation| f(invocation).boxed())
}

/// One declared argument position.
#[derive(Debug, Clone)]
pub struct ArgumentInfo {
    pub type_id: ArgumentTypeId,
    pub name: String,
    pub description: Option<String>,
}

impl ArgumentInfo {
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Declare an argument of type `T`.
pub fn arg<T: Any>(name: impl Into<String>) -> ArgumentInfo {
    ArgumentInfo {
        type_id: ArgumentTypeId::of::<T>(),
        name: name.into(),
        description: None,
    }
}

/// Declare a context position. It consumes no token.
pub fn context_arg() -> ArgumentInfo {
    ArgumentInfo {
        type_id: ArgumentTypeId::context(),
        name: "context".to_string(),
        description: None,
    }
}

/// Where a command may run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChannelRestriction {
    #[default]
    All,
    DirectMessage,
    Server,
}

impl ChannelRestriction {
    /// Whether a message in a DM (`true`) or a guild (`false`) passes.
    pub fn allows(self, direct: bool) -> bool {
        match self {
            Self::All => true,
            Self::DirectMessage => direct,
            Self::Server => !direct,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::DirectMessage => "dm",
            Self::Server => "server",
        }
    }
}

/// One argument signature and its body.
#[derive(Clone)]
pub struct VariantSpec {
    pub description: Option<String>,
    pub args: Vec<ArgumentInfo>,
    pub handler: Handler,
}

/// A command as declared, before its converters are bound.
#[derive(Clone, Default)]
pub struct CommandSpec {
    pub name: String,
    pub aliases: Vec<String>,
    pub description: Option<String>,
    pub owner_only: bool,
    pub channel: ChannelRestriction,
    pub permissions: Permissions,
    pub variants: Vec<VariantSpec>,
}

impl std::fmt::Debug for CommandSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandSpec")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("owner_only", &self.owner_only)
            .field("channel", &self.channel)
            .field("permissions", &self.permissions)
            .field("variants", &self.variants.len())
            .finish()
    }
}

/// Fluent [`CommandSpec`] builder.
///
/// ```no_run
/// use harmony_router::command::{CommandBuilder, arg};
/// use harmony_router::{CommandOutput, Permissions};
///
/// let spec = CommandBuilder::new("say")
///     .alias("echo")
///     .require_permissions(Permissions::SEND_MESSAGES)
///     .variant(vec![arg::<String>("text")], |inv| async move {
///         Ok(CommandOutput::value(inv.args.arg::<String>(0)?))
///     })
///     .build();
/// assert_eq!(spec.variants.len(), 1);
/// ```
#[derive(Debug)]
pub struct CommandBuilder {
    spec: CommandSpec,
}

impl CommandBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            spec: CommandSpec {
                name: name.into(),
                ..CommandSpec::default()
            },
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.spec.aliases.push(alias.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.spec.description = Some(description.into());
        self
    }

    pub fn owner_only(mut self) -> Self {
        self.spec.owner_only = true;
        self
    }

    pub fn channel(mut self, restriction: ChannelRestriction) -> Self {
        self.spec.channel = restriction;
        self
    }

    pub fn require_permissions(mut self, permissions: Permissions) -> Self {
        self.spec.permissions |= permissions;
        self
    }

    /// Add a variant taking `args` in order.
    pub fn variant<F, Fut>(self, args: Vec<ArgumentInfo>, body: F) -> Self
    where
        F: Fn(Invocation) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.push_variant(None, args, handler(body))
    }

    pub fn described_variant<F, Fut>(
        self,
        description: impl Into<String>,
        args: Vec<ArgumentInfo>,
        body: F,
    ) -> Self
    where
        F: Fn(Invocation) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.push_variant(Some(description.into()), args, handler(body))
    }

    fn push_variant(mut self, description: Option<String>, args: Vec<ArgumentInfo>, handler: Handler) -> Self {
        self.spec.variants.push(VariantSpec {
            description,
            args,
            handler,
        });
        self
    }

    pub fn build(self) -> CommandSpec {
        self.spec
    }
}

/// A discovery mechanism producing command specs.
pub trait CommandSource {
    fn commands(&self) -> Vec<CommandSpec>;
}

impl CommandSource for Vec<CommandSpec> {
    fn commands(&self) -> Vec<CommandSpec> {
        self.clone()
    }
}
