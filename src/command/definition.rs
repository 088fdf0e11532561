//! Compiled, immutable command definitions.

use std::sync::Arc;

use super::handle::{InvokeHandle, Slot};
use super::spec::{ArgumentInfo, ChannelRestriction, CommandSpec};
use super::tree::{Node, generate_candidates};
use crate::args::ConverterRegistry;
use crate::error::RegistrationError;
use crate::permissions::Permissions;

/// Declared shape of one variant, kept for help output.
#[derive(Debug, Clone)]
pub struct VariantDefinition {
    pub description: Option<String>,
    pub args: Vec<ArgumentInfo>,
    /// Whether the last position collects the remaining text.
    pub remainder: bool,
}

impl VariantDefinition {
    /// Positions that consume a token.
    pub fn token_args(&self) -> impl Iterator<Item = &ArgumentInfo> {
        self.args.iter().filter(|a| !a.type_id.is_context())
    }

    pub fn arity(&self) -> usize {
        self.token_args().count()
    }
}

/// A registered command. Built once by [`CommandDefinition::compile`] and
/// never mutated afterwards.
#[derive(Debug)]
pub struct CommandDefinition {
    pub name: String,
    pub aliases: Vec<String>,
    pub description: Option<String>,
    pub owner_only: bool,
    pub channel: ChannelRestriction,
    pub permissions: Permissions,
    pub variants: Vec<VariantDefinition>,
    tree: Node,
}

fn check_name(name: &str) -> Result<(), RegistrationError> {
    if name.is_empty() {
        return Err(RegistrationError::EmptyName);
    }
    if name.chars().any(char::is_whitespace) {
        return Err(RegistrationError::InvalidName(name.to_string()));
    }
    Ok(())
}

impl CommandDefinition {
    /// Bind every variant of `spec` to its converters and build the overload
    /// tree. Fails if any position names a type without a converter.
    pub fn compile(
        spec: CommandSpec,
        converters: &ConverterRegistry,
    ) -> Result<Self, RegistrationError> {
        check_name(&spec.name)?;
        for alias in &spec.aliases {
            if alias.is_empty() {
                return Err(RegistrationError::InvalidName(alias.clone()));
            }
            check_name(alias)?;
        }
        if spec.variants.is_empty() {
            return Err(RegistrationError::NoVariants(spec.name));
        }

        let mut tree = Node::root();
        let mut variants = Vec::with_capacity(spec.variants.len());

        for (index, variant) in spec.variants.into_iter().enumerate() {
            let mut slots = Vec::with_capacity(variant.args.len());
            for info in &variant.args {
                let converter = converters.get(&info.type_id).ok_or_else(|| {
                    RegistrationError::UnregisteredType {
                        command: spec.name.clone(),
                        variant: index,
                        type_name: info.type_id.full_name(),
                    }
                })?;
                slots.push(Slot {
                    type_id: info.type_id,
                    converter,
                });
            }

            let handle = InvokeHandle::new(index, slots, variant.handler);
            let path: Vec<_> = variant
                .args
                .iter()
                .map(|a| a.type_id)
                .filter(|t| !t.is_context())
                .collect();

            variants.push(VariantDefinition {
                description: variant.description,
                args: variant.args,
                remainder: handle.collapses_trailing(),
            });
            tree.insert(&path, Arc::new(handle));
        }

        Ok(Self {
            name: spec.name,
            aliases: spec.aliases,
            description: spec.description,
            owner_only: spec.owner_only,
            channel: spec.channel,
            permissions: spec.permissions,
            variants,
            tree,
        })
    }

    /// Handlers to try for `token_count` tokens, in order.
    pub fn candidates(&self, token_count: usize) -> Vec<Arc<InvokeHandle>> {
        generate_candidates(&self.tree, token_count)
    }

    pub fn tree(&self) -> &Node {
        &self.tree
    }

    /// The name followed by every alias.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}
