//! # harmony-router
//!
//! Runtime command routing for chat bots: prefix detection, quoting-aware
//! tokenizing, overload resolution across typed command variants, pluggable
//! argument converters and result renderers, and permission/channel gating.
//!
//! The router performs no network I/O. It talks to the chat service through
//! the [`Platform`] trait and receives commands as [`CommandSpec`] values from
//! whatever discovery mechanism the integrator prefers.
//!
//! ```no_run
//! # async fn demo(platform: std::sync::Arc<dyn harmony_router::Platform>, event: harmony_router::MessageEvent) {
//! use harmony_router::command::{CommandBuilder, arg};
//! use harmony_router::{BotIdentity, CommandOutput, Router, Snowflake, User};
//!
//! let identity = BotIdentity { user: User::new(1, "harmony"), owner_id: Snowflake::new(2) };
//! let router = Router::builder(platform, identity).build();
//!
//! router
//!     .register_command(
//!         CommandBuilder::new("add")
//!             .variant(vec![arg::<i64>("a"), arg::<i64>("b")], |inv| async move {
//!                 Ok(CommandOutput::value(inv.args.arg::<i64>(0)? + inv.args.arg::<i64>(1)?))
//!             })
//!             .build(),
//!     )
//!     .unwrap();
//!
//! router.dispatch(event).await;
//! # }
//! ```

pub mod args;
pub mod command;
pub mod config;
pub mod context;
pub mod error;
pub mod metrics;
pub mod model;
pub mod output;
pub mod permissions;
pub mod platform;
pub mod render;
pub mod router;
pub mod telemetry;

pub use args::{ArgumentConverter, ArgumentTypeId, Args, ConverterRegistry};
pub use command::{CommandBuilder, CommandDefinition, CommandSource, CommandSpec, HelpPage};
pub use config::Config;
pub use context::InvocationContext;
pub use error::{ConvertError, HandlerError, HandlerResult, PlatformError, RegistrationError};
pub use harmony_lexer::{self as lexer, Snowflake};
pub use model::{BotIdentity, Channel, Guild, Member, MessageEvent, Role, User};
pub use output::CommandOutput;
pub use permissions::Permissions;
pub use platform::Platform;
pub use render::{RendererRegistry, ResultRenderer};
pub use router::{DispatchOutcome, Router, RouterBuilder};
