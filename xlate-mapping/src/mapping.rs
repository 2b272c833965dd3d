//! Expression mappings and the registry that stores them.
//!
//! A mapping is declared once, when a method or property is registered, and is shared
//! read-only by every translation that expands it.

use rustc_hash::FxHashMap;
use std::sync::Arc;
use xlate_expr::{MemberRef, Precedence, placeholder_indices};
use xlate_result::{Error, Result};

/// Template plus declared precedence for one mapped method or property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionMapping {
    template: Arc<str>,
    precedence: Precedence,
}

impl ExpressionMapping {
    /// Create a mapping with [`Precedence::Primary`]. The template is not validated.
    pub fn new(template: impl Into<Arc<str>>) -> Self {
        Self {
            template: template.into(),
            precedence: Precedence::Primary,
        }
    }

    /// Create a mapping after checking the template grammar.
    pub fn parse(template: impl Into<Arc<str>>) -> Result<Self> {
        let mapping = Self::new(template);
        placeholder_indices(&mapping.template)?;
        Ok(mapping)
    }

    pub fn with_precedence(mut self, precedence: Precedence) -> Self {
        self.precedence = precedence;
        self
    }

    pub fn template(&self) -> &Arc<str> {
        &self.template
    }

    pub fn precedence(&self) -> Precedence {
        self.precedence
    }

    /// Highest placeholder index in the template, or `None` when it has no placeholders.
    pub fn max_operand_index(&self) -> Result<Option<usize>> {
        Ok(placeholder_indices(&self.template)?.into_iter().max())
    }
}

/// Registration behaviour for [`MappingRegistry`].
#[derive(Debug, Clone)]
pub struct MappingOptions {
    /// Reject templates that do not tokenize when they are registered.
    pub validate_templates: bool,
}

impl Default for MappingOptions {
    fn default() -> Self {
        Self {
            validate_templates: true,
        }
    }
}

/// Mappings keyed by the member they translate.
#[derive(Debug, Clone, Default)]
pub struct MappingRegistry {
    mappings: FxHashMap<MemberRef, ExpressionMapping>,
    options: MappingOptions,
}

impl MappingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: MappingOptions) -> Self {
        Self {
            mappings: FxHashMap::default(),
            options,
        }
    }

    /// Register `mapping` for `member`, replacing and returning any earlier mapping.
    pub fn register(
        &mut self,
        member: MemberRef,
        mapping: ExpressionMapping,
    ) -> Result<Option<ExpressionMapping>> {
        if self.options.validate_templates {
            placeholder_indices(mapping.template()).map_err(|err| {
                Error::InvalidArgumentError(format!("mapping for {member}: {err}"))
            })?;
        }
        tracing::trace!(%member, template = %mapping.template(), "registered expression mapping");
        Ok(self.mappings.insert(member, mapping))
    }

    /// Register a template for `declaring_type.name` at the given precedence.
    pub fn register_template(
        &mut self,
        declaring_type: &str,
        name: &str,
        template: &str,
        precedence: Precedence,
    ) -> Result<()> {
        self.register(
            MemberRef::new(declaring_type, name),
            ExpressionMapping::new(template).with_precedence(precedence),
        )?;
        Ok(())
    }

    pub fn get(&self, member: &MemberRef) -> Option<&ExpressionMapping> {
        self.mappings.get(member)
    }

    pub fn contains(&self, member: &MemberRef) -> bool {
        self.mappings.contains_key(member)
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}
