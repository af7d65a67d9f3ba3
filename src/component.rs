//! Component descriptors and the builder used to register them.

use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::RegistrationError;
use crate::schema::{ParamAccess, ParamKind, Schema};
use crate::value::SlotValue;

lazy_static! {
    // non-empty URL-safe token with a leading slash
    static ref PATH_PATTERN: Regex = Regex::new(r"^/[A-Za-z0-9._~-]+$").unwrap();
}

/// Synchronous pure function from decoded inputs to native results.
///
/// Handlers never see the wire format. A returned error is a handler fault,
/// logged server-side and redacted from the response; a modeled "could not
/// compute" outcome is expressed through the leading success flag instead.
pub type Handler = Arc<dyn Fn(&[SlotValue]) -> anyhow::Result<Vec<SlotValue>> + Send + Sync>;

/// A registered component: path, schemas, and the bound handler.
///
/// Immutable after construction; built once at startup and shared read-only
/// across all in-flight dispatches.
#[derive(Clone)]
pub struct ComponentDescriptor {
    pub path: String,
    pub name: String,
    pub nickname: String,
    pub description: String,
    pub inputs: Vec<Schema>,
    pub outputs: Vec<Schema>,
    /// True when the first output is the reserved Boolean success slot. A
    /// handler reporting false there suppresses encoding of the remaining
    /// outputs.
    pub leading_success_flag: bool,
    pub handler: Handler,
}

impl std::fmt::Debug for ComponentDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentDescriptor")
            .field("path", &self.path)
            .field("inputs", &self.inputs.len())
            .field("outputs", &self.outputs.len())
            .field("leading_success_flag", &self.leading_success_flag)
            .finish()
    }
}

/// Builder for a component descriptor.
pub struct ComponentBuilder {
    path: String,
    name: String,
    nickname: String,
    description: String,
    inputs: Vec<Schema>,
    outputs: Vec<Schema>,
    leading_success_flag: bool,
}

impl ComponentBuilder {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: String::new(),
            nickname: String::new(),
            description: String::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            leading_success_flag: false,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = nickname.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn input(mut self, schema: Schema) -> Self {
        self.inputs.push(schema);
        self
    }

    pub fn output(mut self, schema: Schema) -> Self {
        self.outputs.push(schema);
        self
    }

    /// Declares the first output as the reserved Boolean success slot.
    pub fn leading_success_flag(mut self) -> Self {
        self.leading_success_flag = true;
        self
    }

    pub fn build<F>(self, handler: F) -> Result<ComponentDescriptor, RegistrationError>
    where
        F: Fn(&[SlotValue]) -> anyhow::Result<Vec<SlotValue>> + Send + Sync + 'static,
    {
        let invalid = |reason: &str| RegistrationError::InvalidDescriptor {
            path: self.path.clone(),
            reason: reason.to_string(),
        };

        if !PATH_PATTERN.is_match(&self.path) {
            return Err(invalid("path must be a non-empty URL-safe token"));
        }
        if self.outputs.is_empty() {
            return Err(invalid("at least one output is required"));
        }
        if self.leading_success_flag {
            let first = &self.outputs[0];
            if first.kind != ParamKind::Boolean || first.access != ParamAccess::Item {
                return Err(invalid(
                    "leading success flag requires a Boolean Item first output",
                ));
            }
        }
        for (index, input) in self.inputs.iter().enumerate() {
            if self.inputs[..index].iter().any(|other| other.name == input.name) {
                return Err(invalid(&format!("duplicate input name '{}'", input.name)));
            }
        }

        Ok(ComponentDescriptor {
            path: self.path,
            name: self.name,
            nickname: self.nickname,
            description: self.description,
            inputs: self.inputs,
            outputs: self.outputs,
            leading_success_flag: self.leading_success_flag,
            handler: Arc::new(handler),
        })
    }
}
