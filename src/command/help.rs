//! Built-in `help` command.

use std::fmt::Write as _;

use super::definition::CommandDefinition;
use super::spec::{ChannelRestriction, CommandBuilder, CommandSpec, Invocation, arg};
use crate::config::HelpConfig;
use crate::error::{HandlerError, HandlerResult};
use crate::output::CommandOutput;
use crate::permissions::Permissions;

/// One titled block of a help page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpField {
    pub name: String,
    pub value: String,
}

/// Help output, rendered as text by the default renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpPage {
    pub title: String,
    pub description: Option<String>,
    pub fields: Vec<HelpField>,
}

impl HelpPage {
    fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            fields: Vec::new(),
        }
    }

    fn field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push(HelpField {
            name: name.into(),
            value: value.into(),
        });
    }

    pub fn to_text(&self) -> String {
        let mut out = format!("**{}**", self.title);
        if let Some(description) = &self.description {
            let _ = write!(out, "\n{description}");
        }
        for field in &self.fields {
            let _ = write!(out, "\n\n**{}**\n{}", field.name, field.value);
        }
        out
    }
}

/// `N. name $arg ...` for every variant.
fn usage(definition: &CommandDefinition) -> String {
    definition
        .variants
        .iter()
        .enumerate()
        .map(|(i, variant)| {
            let mut line = format!("{}. {}", i + 1, definition.name);
            for arg in variant.token_args() {
                let _ = write!(line, " ${}", arg.name);
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn lookup(inv: &Invocation, name: &str) -> Result<std::sync::Arc<CommandDefinition>, HandlerError> {
    inv.ctx
        .router()
        .commands()
        .get(name)
        .filter(|def| !def.owner_only || inv.ctx.is_owner())
        .ok_or_else(|| HandlerError::signal(format!("Command `{name}` does not exist!")))
}

async fn list_commands(inv: Invocation) -> HandlerResult {
    let owner = inv.ctx.is_owner();
    let mut page = HelpPage::new("Commands");
    page.description = Some("Use `help <command>` for details on a command.".to_string());

    for def in inv.ctx.router().commands().definitions() {
        if def.owner_only && !owner {
            continue;
        }
        page.field(
            def.name.clone(),
            def.description.clone().unwrap_or_else(|| "No description".to_string()),
        );
    }
    Ok(CommandOutput::value(page))
}

async fn describe_command(inv: Invocation) -> HandlerResult {
    let name = inv.args.arg::<String>(0)?;
    let def = lookup(&inv, &name)?;

    let mut page = HelpPage::new(def.name.clone());
    page.description = def.description.clone();
    if !def.aliases.is_empty() {
        page.field("Aliases", def.aliases.join(", "));
    }
    if def.channel != ChannelRestriction::All {
        page.field("Channels", def.channel.label());
    }
    if !def.permissions.is_empty() {
        page.field("Permissions", def.permissions.names().join(", "));
    }
    page.field("Usage", usage(&def));
    Ok(CommandOutput::value(page))
}

async fn describe_variant(inv: Invocation) -> HandlerResult {
    let name = inv.args.arg::<String>(0)?;
    let selector = inv.args.arg::<i32>(1)?;
    let def = lookup(&inv, &name)?;

    let count = def.variants.len();
    let index = usize::try_from(selector.max(1)).unwrap_or(1).min(count);
    let variant = &def.variants[index - 1];

    let mut page = HelpPage::new(format!("{} ({index}/{count})", def.name));
    page.description = variant.description.clone();
    for arg in variant.token_args() {
        page.field(
            format!("${} ({})", arg.name, arg.type_id.name()),
            arg.description.clone().unwrap_or_else(|| "No description".to_string()),
        );
    }
    Ok(CommandOutput::value(page))
}

/// Build the help command described by `config`.
pub fn help_command(config: &HelpConfig) -> CommandSpec {
    let mut builder = CommandBuilder::new(config.name.clone())
        .description("Lists commands or shows how to use one.")
        .require_permissions(Permissions::SEND_MESSAGES);
    for alias in &config.aliases {
        builder = builder.alias(alias.clone());
    }

    builder
        .described_variant("List every command.", vec![], list_commands)
        .described_variant(
            "Show a command's usage.",
            vec![arg::<String>("command").describe("Command name or alias")],
            describe_command,
        )
        .described_variant(
            "Show one variant of a command in detail.",
            vec![
                arg::<String>("command").describe("Command name or alias"),
                arg::<i32>("variant").describe("Variant number from the usage list"),
            ],
            describe_variant,
        )
        .build()
}
