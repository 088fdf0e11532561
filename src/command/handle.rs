//! A variant with its converters bound, ready to be tried against tokens.

use std::sync::Arc;

use futures_util::future::BoxFuture;

use super::spec::{Handler, Invocation};
use crate::args::{ArgValue, ArgumentConverter, ArgumentTypeId, Args};
use crate::context::InvocationContext;
use crate::error::{ConvertError, HandlerResult};

pub(crate) struct Slot {
    pub(crate) type_id: ArgumentTypeId,
    pub(crate) converter: Arc<dyn ArgumentConverter>,
}

pub struct InvokeHandle {
    variant: usize,
    slots: Vec<Slot>,
    arity: usize,
    collapse_trailing: bool,
    handler: Handler,
}

impl InvokeHandle {
    pub(crate) fn new(variant: usize, slots: Vec<Slot>, handler: Handler) -> Self {
        let arity = slots.iter().filter(|s| !s.type_id.is_context()).count();
        let collapse_trailing = slots.last().is_some_and(|s| s.type_id.is_string());
        Self {
            variant,
            slots,
            arity,
            collapse_trailing,
            handler,
        }
    }

    /// Index of the variant within its command, in declaration order.
    pub fn variant(&self) -> usize {
        self.variant
    }

    /// Number of tokens this variant consumes.
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Whether a trailing string position swallows surplus tokens.
    pub fn collapses_trailing(&self) -> bool {
        self.collapse_trailing
    }

    /// Fit `tokens` to this variant's arity, joining surplus tokens into the
    /// trailing string position if there is one.
    pub fn bind_tokens(&self, tokens: &[String]) -> Result<Vec<String>, ConvertError> {
        let mut tokens = tokens.to_vec();
        if self.collapse_trailing && tokens.len() >= self.arity {
            let tail = tokens.split_off(self.arity - 1);
            tokens.push(tail.join(" "));
        }

        if tokens.len() != self.arity {
            return Err(ConvertError::mismatch(format!(
                "expected {} arguments, got {}",
                self.arity,
                tokens.len()
            )));
        }
        Ok(tokens)
    }

    /// Bind and convert every position, in order.
    pub async fn convert(
        &self,
        ctx: &InvocationContext,
        tokens: &[String],
    ) -> Result<Args, ConvertError> {
        let tokens = self.bind_tokens(tokens)?;
        let mut tokens = tokens.iter();
        let mut values: Vec<ArgValue> = Vec::with_capacity(self.slots.len());

        for slot in &self.slots {
            let token = if slot.type_id.is_context() {
                ""
            } else {
                tokens
                    .next()
                    .map(String::as_str)
                    .ok_or_else(|| ConvertError::mismatch("ran out of tokens"))?
            };
            values.push(slot.converter.convert(ctx, token).await?);
        }

        Ok(Args::new(values))
    }

    pub fn call(&self, ctx: InvocationContext, args: Args) -> BoxFuture<'static, HandlerResult> {
        (self.handler)(Invocation { ctx, args })
    }
}

impl std::fmt::Debug for InvokeHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let types: Vec<_> = self.slots.iter().map(|s| s.type_id).collect();
        f.debug_struct("InvokeHandle")
            .field("variant", &self.variant)
            .field("types", &types)
            .field("arity", &self.arity)
            .finish()
    }
}
