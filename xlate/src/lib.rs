//! xlate: expression-template translation for query providers
//!
//! This crate is the primary entrypoint of the xlate toolkit. It re-exports the
//! translation pipeline, the mapping metadata and the expression trees from the
//! underlying `xlate-*` crates.
//!
//! # Quick Start
//!
//! Register a template for a method, describe the model, and translate:
//!
//! ```rust
//! use std::sync::Arc;
//! use xlate::{
//!     DataModel, DefaultTranslationTools, MappingRegistry, MemberRef, Precedence, SourceExpr,
//!     TranslationContext, ValueType, to_sql, translate,
//! };
//!
//! let mut functions = MappingRegistry::new();
//! functions
//!     .register_template("String", "ToUpper", "UPPER({0})", Precedence::Primary)
//!     .unwrap();
//! let model = DataModel::builder()
//!     .entity("Region", |e| {
//!         e.property("RegionDescription", ValueType::String);
//!     })
//!     .build();
//! let ctx = TranslationContext::new(Arc::new(DefaultTranslationTools::with_functions(functions)))
//!     .with_model(Arc::new(model));
//!
//! let upper = SourceExpr::call(
//!     SourceExpr::member(
//!         SourceExpr::parameter("r", ValueType::entity("Region")),
//!         MemberRef::new("Region", "RegionDescription"),
//!         ValueType::String,
//!     ),
//!     MemberRef::new("String", "ToUpper"),
//!     vec![],
//!     ValueType::String,
//! );
//! let sql = to_sql(&translate(&ctx, &upper).unwrap()).unwrap();
//! assert_eq!(sql, r#"UPPER("Region"."RegionDescription")"#);
//! ```
//!
//! # Architecture
//!
//! - **Expressions** (`xlate-expr`): the host source tree, the backend SQL tree, template
//!   grammar and SQL rendering.
//! - **Mapping** (`xlate-mapping`): expression mappings, data models, metadata readers and
//!   the per-model reader cache.
//! - **Translation** (`xlate-translate`): operand extraction, placeholder resolution,
//!   expression assembly and the default converter.
//!
//! # Re-exports
//!
//! - [`translate`] and [`translate_mapped`]: the translation entry points.
//! - [`expr`], [`mapping`]: full module trees of the lower crates.

pub use xlate_translate::{
    ExpressionConverter, MappedNode, STRICT_OPERANDS_ENV, TranslationContext, TranslationOptions,
    assemble_expression, extract_operands, resolve_operands, translate, translate_mapped,
};

pub use xlate_expr::render::to_sql;
pub use xlate_expr::{
    BinaryOp, CompareOp, Literal, MemberRef, Precedence, SourceExpr, SqlExpr, SqlExpression,
    ValueType,
};

pub use xlate_mapping::{
    ColumnDescriptor, DataModel, DefaultTranslationTools, ExpressionMapping, MappingRegistry,
    MetadataReader, MetadataReaderCache, TranslationTools,
};

pub mod expr {
    //! Source and backend expression trees, template grammar and rendering.

    pub use xlate_expr::*;
}

pub mod mapping {
    //! Mapping metadata, data models and metadata readers.

    pub use xlate_mapping::*;
}

// Re-export result types for error handling
pub use xlate_result::{Error, Result};
