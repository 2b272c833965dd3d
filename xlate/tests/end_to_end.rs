use std::sync::Arc;

use xlate::mapping::{ModelId, ModelMetadataReader};
use xlate::{
    BinaryOp, ColumnDescriptor, CompareOp, DataModel, DefaultTranslationTools, Error,
    ExpressionMapping, MappingRegistry, MemberRef, MetadataReader, MetadataReaderCache,
    Precedence, SourceExpr, TranslationContext, TranslationTools, ValueType, to_sql, translate,
};

/// Reader that upper-cases every column name of the wrapped reader.
#[derive(Debug)]
struct UpperCaseColumns(ModelMetadataReader);

impl MetadataReader for UpperCaseColumns {
    fn model_id(&self) -> Option<ModelId> {
        self.0.model_id()
    }

    fn column(&self, entity: &str, member: &str) -> Option<ColumnDescriptor> {
        self.0.column(entity, member).map(|mut column| {
            column.column_name = column.column_name.to_uppercase();
            column
        })
    }

    fn expression_mapping(&self, member: &MemberRef) -> Option<ExpressionMapping> {
        self.0.expression_mapping(member)
    }
}

#[derive(Debug, Default)]
struct UpperCaseTools {
    functions: Arc<MappingRegistry>,
}

impl TranslationTools for UpperCaseTools {
    fn create_metadata_reader(&self, model: Option<&Arc<DataModel>>) -> Arc<dyn MetadataReader> {
        Arc::new(UpperCaseColumns(ModelMetadataReader::new(
            model.cloned(),
            Arc::clone(&self.functions),
        )))
    }
}

fn functions() -> MappingRegistry {
    let mut functions = MappingRegistry::new();
    functions
        .register_template("String", "Substring", "SUBSTR({0}, {1} + 1, {2})", Precedence::Primary)
        .unwrap();
    functions
        .register_template("Math", "Abs", "ABS({0})", Precedence::Primary)
        .unwrap();
    functions
}

fn model() -> Arc<DataModel> {
    Arc::new(
        DataModel::builder()
            .entity("Employee", |e| {
                e.map_to_table("Employees");
                e.has_key("EmployeeId");
                e.property("EmployeeId", ValueType::Int32)
                    .has_column_name("EmployeeID");
                e.property("LastName", ValueType::String)
                    .is_required()
                    .has_max_length(20);
                e.property("Balance", ValueType::Decimal);
            })
            .build(),
    )
}

fn employee(member: &str, ty: ValueType) -> SourceExpr {
    SourceExpr::member(
        SourceExpr::parameter("e", ValueType::entity("Employee")),
        MemberRef::new("Employee", member),
        ty,
    )
}

fn context(functions: MappingRegistry) -> TranslationContext {
    TranslationContext::new(Arc::new(DefaultTranslationTools::with_functions(functions)))
}

/// `e.LastName.Substring(start, 3)`
fn last_name_prefix() -> SourceExpr {
    SourceExpr::call(
        employee("LastName", ValueType::String),
        MemberRef::new("String", "Substring"),
        vec![
            SourceExpr::parameter("start", ValueType::Int32),
            SourceExpr::constant(3, ValueType::Int32),
        ],
        ValueType::String,
    )
}

#[test]
fn translates_instance_calls_against_a_mapped_table() {
    let ctx = context(functions()).with_model(model());

    let out = translate(&ctx, &last_name_prefix()).unwrap();
    assert_eq!(
        to_sql(&out).unwrap(),
        r#"SUBSTR("Employees"."LastName", @start + 1, 3)"#
    );
}

#[test]
fn contexts_carry_their_own_tools() {
    let model = model();
    let default_ctx = context(functions()).with_model(Arc::clone(&model));
    let upper_ctx = TranslationContext::new(Arc::new(UpperCaseTools {
        functions: Arc::new(functions()),
    }))
    .with_model(model);

    let filter = SourceExpr::compare(
        CompareOp::Gt,
        SourceExpr::static_call(
            MemberRef::new("Math", "Abs"),
            vec![employee("Balance", ValueType::Decimal)],
            ValueType::Decimal,
        ),
        SourceExpr::constant(100, ValueType::Decimal),
    );

    assert_eq!(
        to_sql(&translate(&default_ctx, &filter).unwrap()).unwrap(),
        r#"ABS("Employees"."Balance") > 100"#
    );
    assert_eq!(
        to_sql(&translate(&upper_ctx, &filter).unwrap()).unwrap(),
        r#"ABS("Employees"."BALANCE") > 100"#
    );
}

#[test]
fn shared_reader_cache_translates_with_its_own_tools() {
    let to_upper = |template: &str| {
        let mut functions = MappingRegistry::new();
        functions
            .register_template("String", "ToUpper", template, Precedence::Primary)
            .unwrap();
        Arc::new(MetadataReaderCache::new(Arc::new(
            DefaultTranslationTools::with_functions(functions),
        )))
    };
    let upper_cache = to_upper("UPPER({0})");
    let ucase_cache = to_upper("UCASE({0})");
    let model = model();
    let upper = SourceExpr::call(
        employee("LastName", ValueType::String),
        MemberRef::new("String", "ToUpper"),
        vec![],
        ValueType::String,
    );

    let a = TranslationContext::with_reader_cache(Arc::clone(&upper_cache))
        .with_model(Arc::clone(&model));
    let b = TranslationContext::with_reader_cache(Arc::clone(&upper_cache))
        .with_model(Arc::clone(&model));
    let c = TranslationContext::with_reader_cache(ucase_cache).with_model(model);

    let render = |ctx: &TranslationContext| to_sql(&translate(ctx, &upper).unwrap()).unwrap();
    assert_eq!(render(&a), r#"UPPER("Employees"."LastName")"#);
    assert_eq!(render(&b), r#"UPPER("Employees"."LastName")"#);
    assert_eq!(render(&c), r#"UCASE("Employees"."LastName")"#);
    assert!(Arc::ptr_eq(&a.metadata_reader(), &b.metadata_reader()));
    assert!(!Arc::ptr_eq(&a.metadata_reader(), &c.metadata_reader()));
    assert_eq!(upper_cache.len(), 1);
}

#[test]
fn lower_precedence_operands_are_parenthesized_when_rendered() {
    // e.LastName.Substring(a - b, 3): the start operand binds looser than `{1} * 2`.
    let call = SourceExpr::call(
        employee("LastName", ValueType::String),
        MemberRef::new("String", "Substring"),
        vec![
            SourceExpr::binary(
                BinaryOp::Subtract,
                SourceExpr::parameter("a", ValueType::Int32),
                SourceExpr::parameter("b", ValueType::Int32),
                ValueType::Int32,
            ),
            SourceExpr::constant(3, ValueType::Int32),
        ],
        ValueType::String,
    );
    let mut mappings = MappingRegistry::new();
    mappings
        .register(
            MemberRef::new("String", "Substring"),
            ExpressionMapping::parse("SUBSTR({0}, {1} * 2, {2})")
                .unwrap()
                .with_precedence(Precedence::Multiplicative),
        )
        .unwrap();
    let ctx = context(mappings).with_model(model());

    let out = translate(&ctx, &call).unwrap();
    assert_eq!(
        to_sql(&out).unwrap(),
        r#"SUBSTR("Employees"."LastName", (@a - @b) * 2, 3)"#
    );
}

#[test]
fn invalid_templates_are_rejected_at_registration() {
    let mut registry = MappingRegistry::new();
    let err = registry
        .register_template("String", "Broken", "LEFT({0}, {n})", Precedence::Primary)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgumentError(msg) if msg.contains("String.Broken")));
    assert!(registry.is_empty());
}

#[test]
fn out_of_range_templates_fail_the_translation() {
    let mut registry = MappingRegistry::new();
    registry
        .register_template("Math", "Abs", "ABS({3})", Precedence::Primary)
        .unwrap();
    let ctx = context(registry).with_model(model());
    let abs = SourceExpr::static_call(
        MemberRef::new("Math", "Abs"),
        vec![employee("Balance", ValueType::Decimal)],
        ValueType::Decimal,
    );
    assert_eq!(
        translate(&ctx, &abs).unwrap_err(),
        Error::PlaceholderOutOfRange {
            template: "ABS({3})".into(),
            index: 3,
            operand_count: 1
        }
    );
}
