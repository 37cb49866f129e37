//! Type-keyed command bus.
//!
//! Each command type maps to exactly one handler. The registry is built once
//! at startup and is read-only afterwards, so concurrent dispatch needs no
//! locking. Handler errors propagate unchanged; dispatching an unregistered
//! command is a configuration mistake and gets its own error, outside the
//! domain taxonomy.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use thiserror::Error;

use domain::DomainError;

use crate::commands::Command;

/// Handles one command type.
#[async_trait]
pub trait Handler<C: Command>: Send + Sync {
    async fn handle(&self, command: C) -> Result<C::Output, DomainError>;
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("no handler registered for command type: {command}")]
    HandlerNotRegistered { command: &'static str },
    #[error(transparent)]
    Handler(#[from] DomainError),
}

struct Registration {
    command_name: &'static str,
    handler: Box<dyn Any + Send + Sync>,
}

/// Maps command types to their handlers and executes them.
#[derive(Default)]
pub struct CommandDispatcher {
    handlers: HashMap<TypeId, Registration>,
}

impl CommandDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for a command type.
    ///
    /// Re-registering the same type overwrites the previous binding.
    pub fn register<C: Command>(&mut self, handler: Arc<dyn Handler<C>>) {
        let registration = Registration {
            command_name: C::name(),
            handler: Box::new(handler),
        };

        if self.handlers.insert(TypeId::of::<C>(), registration).is_some() {
            tracing::warn!(command = C::name(), "handler registration is being overridden");
        } else {
            tracing::debug!(command = C::name(), "registered handler");
        }
    }

    /// Dispatch a command to its registered handler.
    pub async fn dispatch<C: Command>(&self, command: C) -> Result<C::Output, DispatchError> {
        let registration = self.handlers.get(&TypeId::of::<C>()).ok_or(
            DispatchError::HandlerNotRegistered {
                command: C::name(),
            },
        )?;

        let handler = registration
            .handler
            .downcast_ref::<Arc<dyn Handler<C>>>()
            .expect("registry entries are stored under their command's TypeId");

        tracing::debug!(command = C::name(), "dispatching command");
        let start = Instant::now();

        match handler.handle(command).await {
            Ok(output) => {
                tracing::debug!(
                    command = C::name(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "command completed"
                );
                Ok(output)
            }
            Err(err) => {
                tracing::error!(
                    command = C::name(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    error = %err,
                    "command failed"
                );
                Err(DispatchError::Handler(err))
            }
        }
    }

    /// Whether a handler is registered for the given command type.
    pub fn is_registered<C: Command>(&self) -> bool {
        self.handlers.contains_key(&TypeId::of::<C>())
    }

    /// Names of all registered command types, sorted for stable output.
    pub fn registered_commands(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self
            .handlers
            .values()
            .map(|registration| registration.command_name)
            .collect();
        names.sort_unstable();
        names
    }
}
