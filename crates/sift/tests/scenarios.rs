//! End-to-end scenarios across descriptors, composition, combinators, and
//! paging.

use sift::{
    always_false, always_true, and, compose, filter_sequence, or, Accessor, CaseSensitivity,
    Comparison, Composer, ComposeOptions, Field, FilterDescriptor, Filterable, Queryable,
    SiftError, SqlSelect,
};

#[derive(Debug, Clone, PartialEq)]
struct Person {
    name: String,
    age: i32,
}

impl Person {
    const NAME: Field<Person, String> = Field::new("name", |p| &p.name);
    const AGE: Field<Person, i32> = Field::new("age", |p| &p.age);
}

impl Filterable for Person {
    fn field(name: &str) -> Option<Accessor<Self>> {
        match name {
            "name" => Some(Self::NAME.accessor()),
            "age" => Some(Self::AGE.accessor()),
            _ => None,
        }
    }

    fn field_names() -> &'static [&'static str] {
        &["name", "age"]
    }
}

fn person(name: &str, age: i32) -> Person {
    Person {
        name: name.to_string(),
        age,
    }
}

fn people() -> Vec<Person> {
    vec![person("Ann", 17), person("Bob", 20), person("Dana", 30)]
}

fn scenario_descriptors() -> Vec<FilterDescriptor<Person>> {
    vec![
        FilterDescriptor::new(Person::AGE, Comparison::GreaterThan, 18),
        FilterDescriptor::new(Person::NAME, Comparison::Contains, "an".to_string()).or(),
    ]
}

fn names(people: impl IntoIterator<Item = Person>) -> Vec<String> {
    people.into_iter().map(|p| p.name).collect()
}

// ============================================================================
// Person scenario
// ============================================================================

#[test]
fn person_scenario_matches_all_three_by_default() {
    let result = filter_sequence(people(), &scenario_descriptors()).unwrap();
    assert_eq!(names(result), ["Ann", "Bob", "Dana"]);
}

#[test]
fn person_scenario_with_sensitive_contains() {
    let composer = Composer::with_options(
        ComposeOptions::new().case_sensitivity(CaseSensitivity::Sensitive),
    );
    let result = composer
        .filter_sequence(people(), &scenario_descriptors())
        .unwrap();
    // "Ann" has no lowercase "an"; Bob passes on age.
    assert_eq!(names(result), ["Bob", "Dana"]);
}

// ============================================================================
// Composition
// ============================================================================

#[test]
fn empty_descriptor_list_returns_source_unchanged() {
    let result: Vec<Person> = filter_sequence(people(), &[]).unwrap().collect();
    assert_eq!(result, people());
}

#[test]
fn single_equal_returns_exactly_equal_elements() {
    let source = vec![person("Bob", 20), person("Eve", 20), person("Bob", 41)];
    let result: Vec<Person> = filter_sequence(source, &[Person::NAME.eq("Bob".to_string())])
        .unwrap()
        .collect();
    assert_eq!(result, vec![person("Bob", 20), person("Bob", 41)]);
}

#[test]
fn connector_joins_with_accumulated_result() {
    // ((age < 18 || age > 25) && name contains "a")
    let descriptors = [
        Person::AGE.lt(18),
        Person::AGE.gt(25).or(),
        Person::NAME.contains("a".to_string()),
    ];
    let composer = Composer::with_options(
        ComposeOptions::new().case_sensitivity(CaseSensitivity::Sensitive),
    );
    let result = composer.filter_sequence(people(), &descriptors).unwrap();
    assert_eq!(names(result), ["Dana"]);
}

#[test]
fn named_descriptors_resolve_through_filterable() {
    let descriptors = [
        FilterDescriptor::named("age", Comparison::parse_lenient("gte"), 20i32),
        FilterDescriptor::named("name", Comparison::parse_lenient("contains"), "o")
            .with_connector("and".parse().unwrap()),
    ];
    let result = filter_sequence(people(), &descriptors).unwrap();
    assert_eq!(names(result), ["Bob"]);

    let err = compose(&[FilterDescriptor::<Person>::named("email", Comparison::Equal, "x")])
        .unwrap_err();
    assert_eq!(
        err,
        SiftError::FieldResolution {
            field: "email".to_string(),
            type_name: std::any::type_name::<Person>(),
        }
    );
}

// ============================================================================
// Combinators
// ============================================================================

#[test]
fn combinators_agree_with_composer() {
    let adult = || Person::AGE.gte(18);
    let has_d = || Person::NAME.contains("d".to_string());

    let and_combined = and(compose(&[adult()]).unwrap(), compose(&[has_d()]).unwrap()).unwrap();
    let and_composed = compose(&[adult(), has_d()]).unwrap();
    assert_eq!(
        and_combined.filter_cloned(&people()),
        and_composed.filter_cloned(&people())
    );

    let or_combined = or(compose(&[adult()]).unwrap(), compose(&[has_d()]).unwrap()).unwrap();
    let or_composed = compose(&[adult(), has_d().or()]).unwrap();
    assert_eq!(
        or_combined.filter_cloned(&people()),
        or_composed.filter_cloned(&people())
    );
}

#[test]
fn always_true_is_identity_for_and() {
    let p = compose(&[Person::AGE.lt(25)]).unwrap();
    let joined = and(always_true(), p.clone()).unwrap();
    for item in people() {
        assert_eq!(joined.matches(&item), p.matches(&item));
    }
}

#[test]
fn combined_predicates_stay_independent() {
    let young = compose(&[Person::AGE.lt(18)]).unwrap();
    let old = compose(&[Person::AGE.gt(25)]).unwrap();
    let either = or(young.clone(), old.clone()).unwrap();

    assert_eq!(names(either.filter_cloned(&people())), ["Ann", "Dana"]);
    assert_eq!(names(young.filter_cloned(&people())), ["Ann"]);
    assert_eq!(names(old.filter_cloned(&people())), ["Dana"]);
}

// ============================================================================
// Paging
// ============================================================================

#[test]
fn pages_over_ten_elements() {
    let source: Vec<usize> = (0..10).collect();
    let page = |index| -> Vec<usize> { sift::page(source.clone(), index, 3).unwrap().collect() };

    assert_eq!(page(1), [0, 1, 2]);
    assert_eq!(page(4), [9]);
    assert!(page(5).is_empty());
}

#[test]
fn malformed_page_requests_are_rejected() {
    assert!(matches!(
        sift::page(people(), 1, 0),
        Err(SiftError::InvalidPageSize { size: 0 })
    ));
    assert!(matches!(
        sift::page(people(), 0, 3),
        Err(SiftError::InvalidPageIndex {
            index: 0,
            start_index: 1
        })
    ));
}

// ============================================================================
// Long descriptor chains
// ============================================================================

const LONG_CHAIN: i32 = 100_000;

#[test]
fn long_descriptor_chains_evaluate_combine_and_render() {
    let not_negative: Vec<_> = (0..LONG_CHAIN).map(|i| Person::AGE.ne(-i - 1)).collect();
    let in_range: Vec<_> = (0..LONG_CHAIN).map(|i| Person::AGE.eq(i).or()).collect();

    let not_negative = compose(&not_negative).unwrap();
    let in_range = compose(&in_range).unwrap();
    assert!(not_negative.matches(&person("Eve", 5)));
    assert!(!not_negative.matches(&person("Eve", -LONG_CHAIN)));
    assert!(in_range.matches(&person("Zed", LONG_CHAIN - 1)));
    assert!(!in_range.matches(&person("Zed", LONG_CHAIN)));

    let either = or(not_negative.clone(), always_false()).unwrap();
    assert!(either.matches(&person("Eve", 5)));

    let both = and(not_negative, in_range).unwrap();
    let leaves = 2 * LONG_CHAIN as usize;
    assert_eq!(both.body().node_count(), 2 * leaves - 1);
    assert_eq!(both.filter(&people()).len(), 3);

    let rendered = both.body().to_string();
    assert_eq!(rendered.matches(" && ").count(), LONG_CHAIN as usize);
    assert_eq!(rendered.matches(" || ").count(), LONG_CHAIN as usize - 1);

    let query = SqlSelect::<Person>::from_table("people").push_filter(both).to_sql();
    assert_eq!(query.params.len(), leaves);
    assert!(query.sql.starts_with(r#"SELECT * FROM "people" WHERE ((("#));
    assert!(query
        .sql
        .contains(r#"(("age" IS DISTINCT FROM $1 AND "age" IS DISTINCT FROM $2) AND "#));
    assert!(query.sql.ends_with(&format!(r#""age" = ${leaves}))"#)));
}

// ============================================================================
// Contains on numeric fields
// ============================================================================

macro_rules! numeric_contains_fails {
    ($($name:ident: $t:ty),* $(,)?) => {
        $(
            #[test]
            fn $name() {
                #[allow(dead_code)]
                struct Probe {
                    n: $t,
                }

                // Reading the field at all would be a failure.
                const N: Field<Probe, $t> = Field::new("n", |_| panic!("element evaluated"));

                let source = vec![Probe { n: <$t>::default() }];
                let err = filter_sequence(source, &[N.contains(<$t>::default())])
                    .map(|_| ())
                    .unwrap_err();
                assert_eq!(
                    err,
                    SiftError::UnsupportedOperation {
                        op: "contains",
                        type_name: stringify!($t),
                    }
                );
            }
        )*
    };
}

numeric_contains_fails! {
    contains_on_i8_fails: i8,
    contains_on_i16_fails: i16,
    contains_on_i32_fails: i32,
    contains_on_i64_fails: i64,
    contains_on_u8_fails: u8,
    contains_on_u16_fails: u16,
    contains_on_u32_fails: u32,
    contains_on_u64_fails: u64,
    contains_on_usize_fails: usize,
    contains_on_f32_fails: f32,
    contains_on_f64_fails: f64,
}
