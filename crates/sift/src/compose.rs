//! Folding an ordered list of descriptors into one predicate.
//!
//! Descriptors join strictly left to right with no precedence:
//!
//! ```text
//! [d0, d1 (Or), d2 (And)]  =>  ((d0 || d1) && d2)
//! ```
//!
//! The connector on the first descriptor is ignored. Grouped logic is built
//! by composing sub-predicates separately and joining them with
//! [`Predicate::and`] / [`Predicate::or`].

use tracing::debug;

use crate::build::build_expr;
use crate::descriptor::FilterDescriptor;
use crate::error::Result;
use crate::expr::{Expr, Param};
use crate::op::Connector;
use crate::options::ComposeOptions;
use crate::predicate::Predicate;
use crate::queryable::Queryable;

/// Builds predicates from descriptors under a fixed set of options.
///
/// # Example
///
/// ```
/// use sift::{CaseSensitivity, Composer, ComposeOptions, Field};
///
/// struct City {
///     name: String,
///     population: u64,
/// }
///
/// const NAME: Field<City, String> = Field::new("name", |c| &c.name);
/// const POPULATION: Field<City, u64> = Field::new("population", |c| &c.population);
///
/// let cities = vec![
///     City { name: "Lisbon".into(), population: 545_000 },
///     City { name: "Porto".into(), population: 232_000 },
///     City { name: "Braga".into(), population: 193_000 },
/// ];
///
/// let composer = Composer::with_options(
///     ComposeOptions::new().case_sensitivity(CaseSensitivity::Sensitive),
/// );
/// let predicate = composer
///     .compose(&[
///         POPULATION.gt(500_000),
///         NAME.contains("rag".to_string()).or(),
///     ])
///     .unwrap();
///
/// let names: Vec<_> = predicate.filter(&cities).iter().map(|c| c.name.as_str()).collect();
/// assert_eq!(names, ["Lisbon", "Braga"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Composer {
    options: ComposeOptions,
}

impl Composer {
    /// Creates a composer with default options.
    pub fn new() -> Self {
        Composer::default()
    }

    /// Creates a composer with the given options.
    pub fn with_options(options: ComposeOptions) -> Self {
        Composer { options }
    }

    /// Returns the options in use.
    pub fn options(&self) -> &ComposeOptions {
        &self.options
    }

    /// Folds `descriptors` into one predicate.
    ///
    /// An empty list yields a predicate that accepts everything. Any
    /// descriptor that fails to build fails the whole call.
    pub fn compose<T>(&self, descriptors: &[FilterDescriptor<T>]) -> Result<Predicate<T>> {
        let param = Param::fresh(self.options.param_name_owned());

        let mut acc: Option<Expr<T>> = None;
        for descriptor in descriptors {
            let expr = build_expr(descriptor, &param, &self.options)?;
            acc = Some(match acc {
                None => expr,
                Some(prev) => match descriptor.connector() {
                    Connector::Or => Expr::or(prev, expr),
                    Connector::And => Expr::and(prev, expr),
                },
            });
        }

        let body = acc.unwrap_or(Expr::Constant(true));
        debug!(
            descriptors = descriptors.len(),
            expr = %body,
            "composed predicate"
        );
        Ok(Predicate::closed(vec![param], body))
    }

    /// Filters an in-memory sequence with the composed predicate.
    ///
    /// The predicate is built before the first element is pulled, so a
    /// build error is reported without touching the source.
    pub fn filter_sequence<I, T>(
        &self,
        source: I,
        descriptors: &[FilterDescriptor<T>],
    ) -> Result<impl Iterator<Item = T>>
    where
        I: IntoIterator<Item = T>,
    {
        let predicate = self.compose(descriptors)?;
        Ok(source.into_iter().filter(move |item| predicate.matches(item)))
    }

    /// Pushes the composed predicate down to a queryable source.
    pub fn filter_queryable<T, Q>(
        &self,
        source: Q,
        descriptors: &[FilterDescriptor<T>],
    ) -> Result<Q>
    where
        Q: Queryable<T>,
    {
        let predicate = self.compose(descriptors)?;
        Ok(source.push_filter(predicate))
    }
}

/// Folds `descriptors` into one predicate using default options.
pub fn compose<T>(descriptors: &[FilterDescriptor<T>]) -> Result<Predicate<T>> {
    Composer::new().compose(descriptors)
}

/// Filters an in-memory sequence by `descriptors` using default options.
///
/// With no descriptors every element passes through unchanged.
pub fn filter_sequence<I, T>(
    source: I,
    descriptors: &[FilterDescriptor<T>],
) -> Result<impl Iterator<Item = T>>
where
    I: IntoIterator<Item = T>,
{
    let predicate = compose(descriptors)?;
    Ok(source.into_iter().filter(move |item| predicate.matches(item)))
}

/// Pushes the predicate built from `descriptors` down to `source`.
pub fn filter_queryable<T, Q>(source: Q, descriptors: &[FilterDescriptor<T>]) -> Result<Q>
where
    Q: Queryable<T>,
{
    Composer::new().filter_queryable(source, descriptors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SiftError;
    use crate::field::Field;
    use crate::options::CaseSensitivity;

    #[derive(Debug, Clone, PartialEq)]
    struct Person {
        name: String,
        age: i32,
    }

    impl Person {
        const NAME: Field<Person, String> = Field::new("name", |p| &p.name);
        const AGE: Field<Person, i32> = Field::new("age", |p| &p.age);
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

    #[test]
    fn empty_list_accepts_everything() {
        let pred = compose::<Person>(&[]).unwrap();
        assert!(matches!(pred.body(), Expr::Constant(true)));
        assert_eq!(pred.count(&people()), 3);
    }

    #[test]
    fn first_connector_is_ignored() {
        let pred = compose(&[Person::AGE.gt(18).or()]).unwrap();
        assert_eq!(pred.count(&people()), 2);
    }

    #[test]
    fn left_to_right_without_precedence() {
        // ((age > 25 || name == "Ann") && age < 18)
        let pred = compose(&[
            Person::AGE.gt(25),
            Person::NAME.eq("Ann".to_string()).or(),
            Person::AGE.lt(18),
        ])
        .unwrap();
        let names: Vec<_> = pred.filter(&people()).iter().map(|p| p.name.clone()).collect();
        assert_eq!(names, ["Ann"]);
        assert_eq!(pred.body().node_count(), 5);
    }

    #[test]
    fn all_descriptors_share_one_param() {
        let pred = compose(&[Person::AGE.gt(1), Person::NAME.ne("x".to_string())]).unwrap();
        assert_eq!(pred.body().params(), pred.params().to_vec());
    }

    #[test]
    fn options_set_param_name_and_case() {
        let composer = Composer::with_options(
            ComposeOptions::new()
                .param_name("p")
                .case_sensitivity(CaseSensitivity::Sensitive),
        );
        let pred = composer.compose(&[Person::NAME.contains("an".to_string())]).unwrap();
        assert_eq!(pred.to_string(), "|p| p.name.contains(\"an\")");
        assert_eq!(pred.count(&people()), 1);
    }

    #[test]
    fn build_failure_fails_the_whole_call() {
        let err = compose(&[Person::NAME.eq("Ann".to_string()), Person::AGE.contains(1)])
            .unwrap_err();
        assert!(matches!(err, SiftError::UnsupportedOperation { .. }));
    }

    #[test]
    fn filter_sequence_is_lazy_over_owned_items() {
        let adults: Vec<Person> = filter_sequence(people(), &[Person::AGE.gte(18)])
            .unwrap()
            .collect();
        assert_eq!(adults, vec![person("Bob", 20), person("Dana", 30)]);
    }
}
