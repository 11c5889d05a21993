//! Name-keyed registry of command instances sharing one context.

use super::{bundle, database, general, generate, home, model};
use super::{Collaborators, Command, CommandContext, HelpEntry};
use crate::error::RegistryError;
use crate::session::SessionSettings;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::debug;

/// Registry of available commands.
///
/// Owns the single [`CommandContext`]; every registered command holds a clone
/// of the same `Rc`.
pub struct CommandRegistry {
    context: Rc<CommandContext>,
    commands: HashMap<String, Rc<dyn Command>>,
}

impl CommandRegistry {
    /// Empty registry around a fresh session.
    pub fn new(settings: &SessionSettings, collaborators: Collaborators) -> Self {
        Self {
            context: Rc::new(CommandContext::new(settings, collaborators)),
            commands: HashMap::new(),
        }
    }

    /// Registry populated with every built-in command, `help` aliasing `?`.
    pub fn with_builtin_commands(
        settings: &SessionSettings,
        collaborators: Collaborators,
    ) -> Result<Self, RegistryError> {
        let mut registry = Self::new(settings, collaborators);
        let context = Rc::clone(&registry.context);
        let groups = [
            general::commands(&context),
            home::commands(&context),
            model::commands(&context),
            bundle::commands(&context),
            database::commands(&context),
            generate::commands(&context),
        ];
        for command in groups.into_iter().flatten() {
            registry.register(command)?;
        }
        registry.register_alias("help", "?")?;
        debug!(count = registry.commands.len(), "command registry ready");
        Ok(registry)
    }

    /// Register a command under its own name.
    pub fn register(&mut self, command: Rc<dyn Command>) -> Result<(), RegistryError> {
        let name = command.name();
        self.insert(name, command)
    }

    /// Make the command registered as `target` reachable as `alias`.
    pub fn register_alias(&mut self, alias: &str, target: &str) -> Result<(), RegistryError> {
        let command = self.commands.get(target).cloned().ok_or_else(|| {
            RegistryError::UnknownAliasTarget {
                alias: alias.to_string(),
                target: target.to_string(),
            }
        })?;
        self.insert(alias, command)
    }

    fn insert(&mut self, key: &str, command: Rc<dyn Command>) -> Result<(), RegistryError> {
        if self.commands.contains_key(key) {
            return Err(RegistryError::DuplicateCommand(key.to_string()));
        }
        self.context.add_help_entry(
            key,
            HelpEntry {
                name: command.name().to_string(),
                short_description: command.short_description().to_string(),
                description: command.description().to_string(),
                usage: command.usage().to_string(),
            },
        );
        self.commands.insert(key.to_string(), command);
        Ok(())
    }

    /// Command registered under exactly `name`.
    pub fn get_command(&self, name: &str) -> Option<Rc<dyn Command>> {
        self.commands.get(name).cloned()
    }

    /// Each distinct command once, in name order.
    pub fn all_commands(&self) -> Vec<Rc<dyn Command>> {
        let mut distinct: Vec<Rc<dyn Command>> = Vec::new();
        for command in self.commands.values() {
            if !distinct.iter().any(|c| Rc::ptr_eq(c, command)) {
                distinct.push(Rc::clone(command));
            }
        }
        distinct.sort_by(|a, b| a.name().cmp(b.name()));
        distinct
    }

    /// Shared context handed to every command.
    pub fn context(&self) -> &Rc<CommandContext> {
        &self.context
    }
}
