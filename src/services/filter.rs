//! Client-side filtering
//!
//! Case-insensitive substring matching over name and definition fields,
//! recomputed synchronously on every keystroke. A blank query yields the
//! unfiltered list. No debouncing, no server round-trip.

use crate::models::recommendation::Recommendation;
use crate::models::relationship::RelatedTerm;
use crate::models::term::{ERObject, Term};

/// Anything the filter box can search over.
pub trait Searchable {
    fn name(&self) -> &str;
    fn definition(&self) -> &str;
}

impl Searchable for Term {
    fn name(&self) -> &str {
        &self.name
    }
    fn definition(&self) -> &str {
        &self.definition
    }
}

impl Searchable for RelatedTerm {
    fn name(&self) -> &str {
        &self.name
    }
    fn definition(&self) -> &str {
        &self.definition
    }
}

impl Searchable for Recommendation {
    fn name(&self) -> &str {
        &self.name
    }
    fn definition(&self) -> &str {
        &self.definition
    }
}

impl Searchable for ERObject {
    fn name(&self) -> &str {
        &self.name
    }
    fn definition(&self) -> &str {
        &self.description
    }
}

/// Entries whose name or definition contains the query, input order kept.
pub fn filter_entries<T: Searchable + Clone>(entries: &[T], query: &str) -> Vec<T> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return entries.to_vec();
    }

    entries
        .iter()
        .filter(|entry| {
            entry.name().to_lowercase().contains(&needle)
                || entry.definition().to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::Fake;
    use fake::faker::lorem::en::Sentence;
    use rstest::rstest;

    fn term(name: &str, definition: &str) -> Term {
        Term {
            id: name.to_lowercase().replace(' ', "-"),
            name: name.to_string(),
            definition: definition.to_string(),
            ..Term::default()
        }
    }

    fn corpus() -> Vec<Term> {
        vec![
            term("Customer ID", "Unique identifier for customer records"),
            term("Order Date", "Timestamp indicating when an order was placed"),
            term("Payment Status", "Enumerated field indicating transaction state"),
        ]
    }

    #[rstest]
    #[case("customer", &["Customer ID"])]
    #[case("ORDER", &["Order Date"])]
    #[case("indicating", &["Order Date", "Payment Status"])]
    #[case("zzz", &[])]
    fn filters_on_name_and_definition(#[case] query: &str, #[case] expected: &[&str]) {
        let names: Vec<String> = filter_entries(&corpus(), query)
            .into_iter()
            .map(|t| t.name)
            .collect();
        let expected: Vec<String> = expected.iter().map(|s| s.to_string()).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn blank_query_returns_the_unfiltered_list() {
        let corpus = corpus();
        assert_eq!(filter_entries(&corpus, ""), corpus);
        assert_eq!(filter_entries(&corpus, "   "), corpus);
    }

    #[test]
    fn filtering_is_idempotent() {
        let corpus: Vec<Term> = (0..40)
            .map(|n| term(&format!("Term {n}"), &Sentence(3..8).fake::<String>()))
            .collect();

        let once = filter_entries(&corpus, "term 1");
        let twice = filter_entries(&once, "term 1");
        assert_eq!(once, twice);
    }
}
