//! The invocation pipeline.
//!
//! One inbound [`MessageEvent`] goes through:
//!
//! 1. filter (bots, empty text)
//! 2. prefix resolution (self-mention, then the [`PrefixProvider`])
//! 3. command-name extraction
//! 4. lookup, with an optional [`TypoChecker`] fallback
//! 5. gating (owner, channel type, permissions)
//! 6. tokenize, generate candidates, convert, invoke
//! 7. result routing through the [`RendererRegistry`]
//! 8. failure routing to the [`ErrorSignalHandler`] or [`UncaughtErrorHandler`]
//!
//! Each event is independent. Nothing that happens while handling one event,
//! panics included, escapes to the caller or affects other events.

mod gating;
mod hooks;
pub mod prefix;
pub mod typo;

pub use gating::{MISSING_PERMISSIONS, OWNER_ONLY};
pub use hooks::{ErrorSignalHandler, LogUncaughtErrors, ReplyWithError, UncaughtErrorHandler};
pub use prefix::{EmptyPrefix, GuildPrefixes, NoPrefix, PrefixProvider, StaticPrefix};
pub use typo::{JaroWinklerTypoChecker, ReactionPrompt, SuggestionPrompt, TypoChecker};

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures_util::{FutureExt, StreamExt};
use harmony_lexer::{nickname_mention, split_command, strip_prefix, tokenize, user_mention};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{Instrument, Span, debug, info, warn};

use crate::args::{ArgumentConverter, ConverterRegistry};
use crate::command::{
    CommandDefinition, CommandRegistry, CommandSource, CommandSpec, help_command,
};
use crate::config::{self, Config, ValidationError};
use crate::context::InvocationContext;
use crate::error::{ConvertError, HandlerError, RegistrationError};
use crate::model::{BotIdentity, MessageEvent};
use crate::output::{CommandOutput, OutputValue};
use crate::platform::Platform;
use crate::render::{RendererRegistry, ResultRenderer};
use crate::telemetry::{CommandTimer, lag_seconds, spans};
use gating::GateError;

/// What happened to one inbound event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Empty text or a bot author.
    Ignored,
    /// No recognised prefix, or nothing after it.
    NotACommand,
    /// No command by that name and no accepted suggestion.
    UnknownCommand(String),
    /// Every candidate variant failed to convert.
    NoMatchingVariant { command: String },
    /// A gate or the handler refused with a user-facing signal.
    Rejected { command: String },
    /// A handler ran successfully.
    Completed { command: String, variant: usize },
    /// A fault was routed to the uncaught-error handler.
    Failed { command: Option<String> },
}

impl DispatchOutcome {
    /// Static label for metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ignored => "ignored",
            Self::NotACommand => "not_a_command",
            Self::UnknownCommand(_) => "unknown_command",
            Self::NoMatchingVariant { .. } => "no_matching_variant",
            Self::Rejected { .. } => "rejected",
            Self::Completed { .. } => "completed",
            Self::Failed { .. } => "failed",
        }
    }
}

/// Command router bound to one bot identity and platform.
pub struct Router {
    config: Config,
    identity: BotIdentity,
    platform: Arc<dyn Platform>,
    commands: CommandRegistry,
    converters: Arc<ConverterRegistry>,
    renderers: RendererRegistry,
    prefix: Arc<dyn PrefixProvider>,
    typo: Option<Arc<dyn TypoChecker>>,
    error_signals: Arc<dyn ErrorSignalHandler>,
    uncaught: Arc<dyn UncaughtErrorHandler>,
}

impl Router {
    pub fn builder(platform: Arc<dyn Platform>, identity: BotIdentity) -> RouterBuilder {
        RouterBuilder::new(platform, identity)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn identity(&self) -> &BotIdentity {
        &self.identity
    }

    pub fn platform(&self) -> &Arc<dyn Platform> {
        &self.platform
    }

    pub fn commands(&self) -> &CommandRegistry {
        &self.commands
    }

    pub fn converters(&self) -> &ConverterRegistry {
        &self.converters
    }

    pub fn renderers(&self) -> &RendererRegistry {
        &self.renderers
    }

    // ------------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------------

    /// Compile `spec` and register it under its name and aliases.
    ///
    /// Safe to call while dispatches are running.
    pub fn register_command(
        &self,
        spec: CommandSpec,
    ) -> Result<Arc<CommandDefinition>, RegistrationError> {
        let definition = Arc::new(CommandDefinition::compile(spec, &self.converters)?);
        self.register_definition(Arc::clone(&definition));
        Ok(definition)
    }

    /// Register an already compiled definition. Last write wins.
    pub fn register_definition(&self, definition: Arc<CommandDefinition>) {
        let replaced = self.commands.insert(Arc::clone(&definition));
        info!(
            command = %definition.name,
            aliases = ?definition.aliases,
            variants = definition.variants.len(),
            replaced = replaced.is_some(),
            "Registered command"
        );
    }

    /// Register everything `source` yields. A failing command does not stop
    /// the others; failures are returned.
    pub fn register_source(&self, source: &dyn CommandSource) -> Vec<RegistrationError> {
        let mut failures = Vec::new();
        for spec in source.commands() {
            let name = spec.name.clone();
            if let Err(error) = self.register_command(spec) {
                warn!(command = %name, %error, code = error.error_code(), "Command registration failed");
                failures.push(error);
            }
        }
        failures
    }

    // ------------------------------------------------------------------------
    // Dispatch
    // ------------------------------------------------------------------------

    /// Process one event to completion.
    pub async fn dispatch(self: &Arc<Self>, event: MessageEvent) -> DispatchOutcome {
        let span = spans::dispatch(&event);
        let event = Arc::new(event);

        let outcome = async {
            crate::metrics::record_event_lag(lag_seconds(event.timestamp));

            match AssertUnwindSafe(self.process(Arc::clone(&event)))
                .catch_unwind()
                .await
            {
                Ok(outcome) => outcome,
                Err(panic) => {
                    let error = anyhow::anyhow!("handler panicked: {}", panic_message(&*panic));
                    self.uncaught.on_uncaught(&event, None, &error).await;
                    DispatchOutcome::Failed { command: None }
                }
            }
        }
        .instrument(span)
        .await;

        crate::metrics::record_dispatch(outcome.label());
        outcome
    }

    /// Process `event` on its own task.
    pub fn spawn(self: &Arc<Self>, event: MessageEvent) -> JoinHandle<DispatchOutcome> {
        let router = Arc::clone(self);
        tokio::spawn(async move { router.dispatch(event).await })
    }

    /// Consume events until the channel closes, one task per event.
    pub async fn run(self: Arc<Self>, mut events: mpsc::Receiver<MessageEvent>) {
        info!("Router started");
        while let Some(event) = events.recv().await {
            self.spawn(event);
        }
        info!("Event channel closed, router stopping");
    }

    async fn process(self: &Arc<Self>, event: Arc<MessageEvent>) -> DispatchOutcome {
        if event.author.bot || event.content.trim().is_empty() {
            return DispatchOutcome::Ignored;
        }

        let Some(line) = self.strip_prefix(&event).await else {
            return DispatchOutcome::NotACommand;
        };
        let Some((name, rest)) = split_command(line) else {
            return DispatchOutcome::NotACommand;
        };

        let ctx = InvocationContext::new(Arc::clone(self), Arc::clone(&event));

        let definition = match self.commands.get(name) {
            Some(definition) => definition,
            None => match self.suggest(&ctx, name).await {
                Some(definition) => definition,
                None => {
                    debug!(command = name, "Unknown command");
                    return DispatchOutcome::UnknownCommand(name.to_string());
                }
            },
        };
        let command = definition.name.clone();

        match gating::check(&ctx, &definition).await {
            Ok(()) => {}
            Err(GateError::Denied(message)) => {
                debug!(%command, reason = %message, "Command gated");
                self.signal(&ctx, Some(command.as_str()), Some(message.as_str())).await;
                return DispatchOutcome::Rejected { command };
            }
            Err(GateError::Fault(error)) => {
                self.uncaught.on_uncaught(&event, Some(command.as_str()), &error).await;
                return DispatchOutcome::Failed {
                    command: Some(command),
                };
            }
        }

        let tokens = tokenize(rest);
        self.invoke(&ctx, &definition, &tokens).await
    }

    /// Match the message against the self-mentions, then the textual prefix.
    async fn strip_prefix<'a>(&self, event: &'a MessageEvent) -> Option<&'a str> {
        let content = event.content.as_str();

        if self.config.prefix.mention {
            let id = self.identity.user.id;
            for mention in [user_mention(id), nickname_mention(id)] {
                if let Some(line) = strip_prefix(content, &mention) {
                    return Some(line);
                }
            }
        }

        let prefix = match event.guild_id {
            Some(guild) => self.prefix.guild_prefix(guild, event.channel_id).await,
            None => self.prefix.dm_prefix(&event.author).await,
        }?;
        strip_prefix(content, &prefix)
    }

    async fn suggest(&self, ctx: &InvocationContext, name: &str) -> Option<Arc<CommandDefinition>> {
        let checker = self.typo.as_ref()?;
        let replacement = checker.check(ctx, name).await?;
        debug!(typed = name, %replacement, "Using suggested command");
        self.commands.get(&replacement)
    }

    /// Try each candidate in order until one converts, then run it.
    async fn invoke(
        self: &Arc<Self>,
        ctx: &InvocationContext,
        definition: &CommandDefinition,
        tokens: &[String],
    ) -> DispatchOutcome {
        let command = definition.name.clone();

        for handle in definition.candidates(tokens.len()) {
            let span = spans::candidate(&command, handle.variant(), handle.arity());

            let args = match handle.convert(ctx, tokens).instrument(span.clone()).await {
                Ok(args) => args,
                Err(ConvertError::Mismatch(reason)) => {
                    debug!(parent: &span, %reason, "Candidate skipped");
                    crate::metrics::record_mismatch(&command);
                    continue;
                }
                Err(ConvertError::Fault(error)) => {
                    self.uncaught.on_uncaught(ctx.event(), Some(command.as_str()), &error).await;
                    return DispatchOutcome::Failed {
                        command: Some(command),
                    };
                }
            };

            let result = {
                let _timer = CommandTimer::new(&command);
                handle.call(ctx.clone(), args).instrument(span).await
            };

            return match result {
                Ok(output) => {
                    self.route_output(ctx, &command, output).await;
                    DispatchOutcome::Completed {
                        command,
                        variant: handle.variant(),
                    }
                }
                Err(HandlerError::Signal { message }) => {
                    self.signal(ctx, Some(command.as_str()), message.as_deref()).await;
                    DispatchOutcome::Rejected { command }
                }
                Err(HandlerError::Internal(error)) => {
                    self.uncaught.on_uncaught(ctx.event(), Some(command.as_str()), &error).await;
                    DispatchOutcome::Failed {
                        command: Some(command),
                    }
                }
            };
        }

        debug!(%command, tokens = tokens.len(), "No variant matched");
        DispatchOutcome::NoMatchingVariant { command }
    }

    async fn signal(&self, ctx: &InvocationContext, command: Option<&str>, message: Option<&str>) {
        if let Err(error) = self.error_signals.on_signal(ctx, message).await {
            self.uncaught.on_uncaught(ctx.event(), command, &error).await;
        }
    }

    async fn route_output(self: &Arc<Self>, ctx: &InvocationContext, command: &str, output: CommandOutput) {
        match output {
            CommandOutput::None => {}
            CommandOutput::Value(value) => self.render(ctx, command, value).await,
            CommandOutput::Stream(stream) => {
                let router = Arc::clone(self);
                let ctx = ctx.clone();
                let command = command.to_string();
                tokio::spawn(
                    async move {
                        let drained = AssertUnwindSafe(
                            stream.for_each(|item| router.render(&ctx, &command, item)),
                        )
                        .catch_unwind()
                        .await;
                        if let Err(panic) = drained {
                            let error =
                                anyhow::anyhow!("stream panicked: {}", panic_message(&*panic));
                            router
                                .uncaught
                                .on_uncaught(ctx.event(), Some(command.as_str()), &error)
                                .await;
                        }
                    }
                    .instrument(Span::current()),
                );
            }
        }
    }

    async fn render(&self, ctx: &InvocationContext, command: &str, value: OutputValue) {
        match self.renderers.render(ctx, value).await {
            Ok(true) => {}
            Ok(false) => debug!(command, "No renderer for result type, dropping"),
            Err(error) => self.uncaught.on_uncaught(ctx.event(), Some(command), &error).await,
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(s) = panic.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}

/// Assembles a [`Router`].
pub struct RouterBuilder {
    platform: Arc<dyn Platform>,
    identity: BotIdentity,
    config: Config,
    converters: ConverterRegistry,
    renderers: RendererRegistry,
    prefix: Option<Arc<dyn PrefixProvider>>,
    typo: Option<Arc<dyn TypoChecker>>,
    prompt: Option<Arc<dyn SuggestionPrompt>>,
    error_signals: Option<Arc<dyn ErrorSignalHandler>>,
    uncaught: Arc<dyn UncaughtErrorHandler>,
}

impl RouterBuilder {
    fn new(platform: Arc<dyn Platform>, identity: BotIdentity) -> Self {
        Self {
            platform,
            identity,
            config: Config::default(),
            converters: ConverterRegistry::with_defaults(),
            renderers: RendererRegistry::with_defaults(),
            prefix: None,
            typo: None,
            prompt: None,
            error_signals: None,
            uncaught: Arc::new(LogUncaughtErrors),
        }
    }

    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Replace the whole converter registry.
    pub fn converters(mut self, converters: ConverterRegistry) -> Self {
        self.converters = converters;
        self
    }

    /// Add or replace one converter.
    pub fn converter<C: ArgumentConverter>(mut self, converter: C) -> Self {
        self.converters.register(converter);
        self
    }

    /// Replace the whole renderer registry.
    pub fn renderers(mut self, renderers: RendererRegistry) -> Self {
        self.renderers = renderers;
        self
    }

    /// Add or replace the renderer for `T`.
    pub fn renderer<T, R>(mut self, renderer: R) -> Self
    where
        T: Send + 'static,
        R: ResultRenderer<T>,
    {
        self.renderers.register::<T, R>(renderer);
        self
    }

    /// Override the provider implied by `[prefix] mode`.
    pub fn prefix_provider<P: PrefixProvider>(mut self, provider: P) -> Self {
        self.prefix = Some(Arc::new(provider));
        self
    }

    /// Install a typo checker regardless of `[typo] enabled`.
    pub fn typo_checker<T: TypoChecker>(mut self, checker: T) -> Self {
        self.typo = Some(Arc::new(checker));
        self
    }

    /// Prompt used by the default typo checker.
    pub fn suggestion_prompt<P: SuggestionPrompt>(mut self, prompt: P) -> Self {
        self.prompt = Some(Arc::new(prompt));
        self
    }

    pub fn error_signal_handler<H: ErrorSignalHandler>(mut self, handler: H) -> Self {
        self.error_signals = Some(Arc::new(handler));
        self
    }

    pub fn uncaught_error_handler<H: UncaughtErrorHandler>(mut self, handler: H) -> Self {
        self.uncaught = Arc::new(handler);
        self
    }

    /// Check the configured [`Config`] without building.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        config::validate(&self.config)
    }

    /// Build the router. Configuration problems are logged with `warn!` but
    /// do not stop the build; call [`validate`](Self::validate) first to
    /// refuse them.
    pub fn build(self) -> Arc<Router> {
        if let Err(errors) = self.validate() {
            for error in &errors {
                warn!(%error, "Invalid router configuration");
            }
        }

        let config = self.config;

        let mut identity = self.identity;
        if let Some(owner) = config.bot.owner_id {
            identity.owner_id = owner;
        }

        let prefix = self
            .prefix
            .unwrap_or_else(|| prefix::from_config(&config.prefix));

        let typo = self.typo.or_else(|| {
            config.typo.enabled.then(|| {
                let prompt = self
                    .prompt
                    .unwrap_or_else(|| Arc::new(ReactionPrompt) as Arc<dyn SuggestionPrompt>);
                Arc::new(JaroWinklerTypoChecker::new(
                    config.typo.min_similarity,
                    config.typo.timeout(),
                    prompt,
                )) as Arc<dyn TypoChecker>
            })
        });

        let error_signals = self
            .error_signals
            .unwrap_or_else(|| {
                Arc::new(ReplyWithError::new(config.render.error_emoji.clone()))
                    as Arc<dyn ErrorSignalHandler>
            });

        let router = Arc::new(Router {
            identity,
            platform: self.platform,
            commands: CommandRegistry::new(),
            converters: Arc::new(self.converters),
            renderers: self.renderers,
            prefix,
            typo,
            error_signals,
            uncaught: self.uncaught,
            config,
        });

        if router.config.help.enabled {
            let help = help_command(&router.config.help);
            if let Err(error) = router.register_command(help) {
                warn!(%error, "Built-in help command not registered");
            }
        }

        router
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_labels_are_distinct() {
        let outcomes = [
            DispatchOutcome::Ignored,
            DispatchOutcome::NotACommand,
            DispatchOutcome::UnknownCommand("x".into()),
            DispatchOutcome::NoMatchingVariant { command: "x".into() },
            DispatchOutcome::Rejected { command: "x".into() },
            DispatchOutcome::Completed {
                command: "x".into(),
                variant: 0,
            },
            DispatchOutcome::Failed { command: None },
        ];
        let mut labels: Vec<_> = outcomes.iter().map(DispatchOutcome::label).collect();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), outcomes.len());
    }

    #[test]
    fn panic_payloads() {
        let s: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(&*s), "boom");
        let s: Box<dyn Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(&*s), "bang");
        let s: Box<dyn Any + Send> = Box::new(3_u8);
        assert_eq!(panic_message(&*s), "non-string panic payload");
    }
}
