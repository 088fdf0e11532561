//! What a command handler hands back to the router.

use std::any::Any;

use futures_util::stream::{BoxStream, Stream, StreamExt};

/// A rendered-later result value.
pub type OutputValue = Box<dyn Any + Send>;

/// Result of a successful handler.
///
/// Values are routed to the renderer registered for their runtime type.
/// Stream items are routed one by one in the background.
#[derive(Default)]
pub enum CommandOutput {
    /// Nothing to render.
    #[default]
    None,
    Value(OutputValue),
    Stream(BoxStream<'static, OutputValue>),
}

impl CommandOutput {
    pub fn value<T: Any + Send>(value: T) -> Self {
        Self::Value(Box::new(value))
    }

    pub fn stream<S, T>(stream: S) -> Self
    where
        S: Stream<Item = T> + Send + 'static,
        T: Any + Send,
    {
        Self::Stream(stream.map(|item| Box::new(item) as OutputValue).boxed())
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl std::fmt::Debug for CommandOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Value(_) => f.write_str("Value(..)"),
            Self::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}
