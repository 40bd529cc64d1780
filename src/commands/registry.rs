use super::ChatContext;
use super::handler::{
    AlarmCommand, CommandHandler, HelpCommand, PhotoCommand, QuitCommand, ResetCommand,
    ReviewCommand,
};
use crate::core::error::StepError;
use std::collections::HashMap;
use std::sync::Arc;

pub struct CommandRegistry {
    handlers: HashMap<String, Arc<dyn CommandHandler>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    pub fn register<C: CommandHandler + 'static>(&mut self, name: &str, command: C) {
        self.handlers.insert(name.to_string(), Arc::new(command));
    }

    pub fn execute(
        &self,
        name: &str,
        args: &[&str],
        ctx: &mut ChatContext,
    ) -> Result<Option<String>, StepError> {
        self.handlers
            .get(name)
            .ok_or_else(|| StepError::Input(format!("모르는 명령어예요: /{}", name)))
            .and_then(|handler| handler.execute(ctx, args))
    }

    pub fn command_names(&self) -> Vec<String> {
        self.handlers.keys().cloned().collect()
    }
}

pub fn create_command_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();

    registry.register("photo", PhotoCommand);
    registry.register("alarm", AlarmCommand);
    registry.register("review", ReviewCommand);
    registry.register("reset", ResetCommand);
    registry.register("help", HelpCommand);
    registry.register("quit", QuitCommand);

    registry
}
