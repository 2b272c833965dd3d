use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use xlate_expr::render::to_sql;
use xlate_expr::{BinaryOp, CompareOp, MemberRef, Precedence, SourceExpr, SqlExpr, ValueType};
use xlate_mapping::{
    DataModel, DefaultTranslationTools, MappingRegistry, MetadataReader, TranslationTools,
};
use xlate_result::Error;
use xlate_test_utils::{RecordingConverter, init_tracing_for_tests};
use xlate_translate::{
    ExpressionConverter, TranslationContext, TranslationOptions, resolve_operands, translate,
};

#[derive(Debug)]
struct CountingTools {
    inner: DefaultTranslationTools,
    built: AtomicUsize,
}

impl TranslationTools for CountingTools {
    fn create_metadata_reader(&self, model: Option<&Arc<DataModel>>) -> Arc<dyn MetadataReader> {
        self.built.fetch_add(1, Ordering::SeqCst);
        thread::yield_now();
        self.inner.create_metadata_reader(model)
    }
}

fn string_functions() -> MappingRegistry {
    let mut functions = MappingRegistry::new();
    functions
        .register_template(
            "String",
            "Contains",
            "{0} LIKE '%' || {1} || '%'",
            Precedence::Comparison,
        )
        .unwrap();
    functions
        .register_template("String", "Length", "LENGTH({0})", Precedence::Primary)
        .unwrap();
    functions
        .register_template("Functions", "Now", "CURRENT_TIMESTAMP", Precedence::Primary)
        .unwrap();
    functions
}

fn northwind() -> Arc<DataModel> {
    Arc::new(
        DataModel::builder()
            .entity("Region", |e| {
                e.has_key("RegionId");
                e.property("RegionId", ValueType::Int32)
                    .has_column_name("RegionID");
                e.property("RegionDescription", ValueType::String)
                    .is_required()
                    .has_max_length(50);
            })
            .build(),
    )
}

fn region_member(name: &str, ty: ValueType) -> SourceExpr {
    SourceExpr::member(
        SourceExpr::parameter("r", ValueType::entity("Region")),
        MemberRef::new("Region", name),
        ty,
    )
}

/// `r.RegionDescription.Contains("East") && r.RegionId > 2`
fn east_regions_filter() -> SourceExpr {
    let contains = SourceExpr::call(
        region_member("RegionDescription", ValueType::String),
        MemberRef::new("String", "Contains"),
        vec![SourceExpr::constant("East", ValueType::String)],
        ValueType::Boolean,
    );
    let id_filter = SourceExpr::compare(
        CompareOp::Gt,
        region_member("RegionId", ValueType::Int32),
        SourceExpr::constant(2, ValueType::Int32),
    );
    SourceExpr::binary(BinaryOp::And, contains, id_filter, ValueType::Boolean)
}

fn northwind_context() -> TranslationContext {
    TranslationContext::new(Arc::new(DefaultTranslationTools::with_functions(
        string_functions(),
    )))
    .with_model(northwind())
}

#[test]
fn translates_and_renders_a_northwind_filter() {
    init_tracing_for_tests();
    let ctx = northwind_context();
    let out = translate(&ctx, &east_regions_filter()).unwrap();
    assert_eq!(
        to_sql(&out).unwrap(),
        r#""Region"."RegionDescription" LIKE '%' || 'East' || '%' AND "Region"."RegionID" > 2"#
    );
}

#[test]
fn composite_keeps_template_until_rendering() {
    let ctx = northwind_context();
    let length = SourceExpr::member(
        region_member("RegionDescription", ValueType::String),
        MemberRef::new("String", "Length"),
        ValueType::Int32,
    );
    let sum = SourceExpr::binary(
        BinaryOp::Multiply,
        SourceExpr::binary(
            BinaryOp::Add,
            length,
            SourceExpr::constant(1, ValueType::Int32),
            ValueType::Int32,
        ),
        SourceExpr::constant(2, ValueType::Int32),
        ValueType::Int32,
    );
    let out = translate(&ctx, &sum).unwrap();
    let SqlExpr::Binary { left, .. } = &out else {
        panic!("expected a binary node, got {out:?}");
    };
    let SqlExpr::Binary { left: length, .. } = &**left else {
        panic!("expected a binary node, got {left:?}");
    };
    assert_eq!(&*length.as_expression().unwrap().template, "LENGTH({0})");
    assert_eq!(
        to_sql(&out).unwrap(),
        r#"(LENGTH("Region"."RegionDescription") + 1) * 2"#
    );
}

#[test]
fn nullary_function_renders_its_template() {
    let ctx = northwind_context();
    let now = SourceExpr::static_call(MemberRef::new("Functions", "Now"), vec![], ValueType::DateTime);
    let out = translate(&ctx, &now).unwrap();
    assert_eq!(to_sql(&out).unwrap(), "CURRENT_TIMESTAMP");
}

#[test]
fn strict_context_rejects_templates_that_drop_operands() {
    let mut functions = string_functions();
    functions
        .register_template("String", "IsNullOrEmpty", "TRUE", Precedence::Primary)
        .unwrap();
    let ctx = TranslationContext::new(Arc::new(DefaultTranslationTools::with_functions(functions)))
        .with_model(northwind());
    let call = SourceExpr::static_call(
        MemberRef::new("String", "IsNullOrEmpty"),
        vec![region_member("RegionDescription", ValueType::String)],
        ValueType::Boolean,
    );

    let lenient = translate(&ctx, &call).unwrap();
    assert_eq!(
        lenient.as_expression().unwrap().parameters,
        vec![SqlExpr::sentinel()]
    );

    let strict = ctx.with_options(TranslationOptions::strict());
    assert_eq!(
        translate(&strict, &call).unwrap_err(),
        Error::UnreferencedOperand {
            template: "TRUE".into(),
            index: 0
        }
    );
}

#[test]
fn seeded_templates_convert_each_referenced_operand_once() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..200 {
        let operand_count = rng.random_range(1..=6usize);
        let operands: Vec<SourceExpr> = (0..operand_count)
            .map(|i| SourceExpr::parameter(format!("p{i}"), ValueType::Int32))
            .collect();
        let operand_refs: Vec<&SourceExpr> = operands.iter().collect();

        let references: Vec<usize> = (0..rng.random_range(0..10usize))
            .map(|_| rng.random_range(0..operand_count))
            .collect();
        let template = references
            .iter()
            .map(|i| format!("{{{i}}}"))
            .collect::<Vec<_>>()
            .join(" {{*}} ");

        let mut rec = RecordingConverter::default();
        let out = resolve_operands(
            &template,
            &operand_refs,
            &TranslationOptions::default(),
            |_, e, h| rec.convert(e, h),
        )
        .unwrap();

        assert_eq!(out.len(), operand_count, "template {template:?}");
        let mut first_appearance = Vec::new();
        let mut seen = HashSet::new();
        for &i in &references {
            if seen.insert(i) {
                first_appearance.push(format!("p{i}"));
            }
        }
        assert_eq!(rec.calls(), first_appearance.as_slice(), "template {template:?}");
        for (i, slot) in out.iter().enumerate() {
            if seen.contains(&i) {
                assert_eq!(slot, &SqlExpr::value(format!("p{i}"), ValueType::Int32));
            } else {
                assert!(slot.is_sentinel(), "slot {i} of {template:?}");
            }
        }
    }
}

#[test]
fn concurrent_translations_share_the_model_reader() {
    init_tracing_for_tests();
    const THREADS: usize = 8;
    let tools = Arc::new(CountingTools {
        inner: DefaultTranslationTools::with_functions(string_functions()),
        built: AtomicUsize::new(0),
    });
    let ctx = TranslationContext::new(tools.clone()).with_model(northwind());
    let filter = east_regions_filter();
    let barrier = Barrier::new(THREADS);

    let results: Vec<(Arc<dyn MetadataReader>, SqlExpr)> = thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let ctx = ctx.clone();
                let filter = &filter;
                let barrier = &barrier;
                s.spawn(move || {
                    barrier.wait();
                    let converter = ExpressionConverter::new(&ctx);
                    let out = converter.convert(&ctx, filter, None).unwrap();
                    (Arc::clone(converter.reader()), out)
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("translation thread panicked"))
            .collect()
    });

    assert_eq!(tools.built.load(Ordering::SeqCst), 1);
    let (first_reader, first_out) = &results[0];
    for (reader, out) in &results[1..] {
        assert!(Arc::ptr_eq(first_reader, reader));
        assert_eq!(out, first_out);
    }
    assert_eq!(ctx.reader_cache().len(), 1);
}
