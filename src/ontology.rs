//! Feature type hierarchy lookup.
//!
//! Queries over a [`FeatureCollection`](crate::data_structs::FeatureCollection)
//! can be filtered by ontology term, resolving every stored type that equals
//! or descends from the term. The hierarchy itself lives outside this crate;
//! callers hand an implementor of [`OntologyQuery`] to the ontology-aware
//! operations, which consult it once per stored (type, term) pair.

/// Answers subtype relationships between feature type terms.
pub trait OntologyQuery {
    /// Whether `candidate` is a recognised subtype of `ancestor`.
    ///
    /// Callers test exact equality before consulting the hierarchy, so
    /// implementations need not treat a term as a subtype of itself.
    fn is_subtype(
        &self,
        candidate: &str,
        ancestor: &str,
    ) -> bool;
}

impl<F> OntologyQuery for F
where
    F: Fn(&str, &str) -> bool,
{
    fn is_subtype(
        &self,
        candidate: &str,
        ancestor: &str,
    ) -> bool {
        self(candidate, ancestor)
    }
}

/// An empty hierarchy in which no type descends from any other. Exact type
/// matches still succeed in ontology-filtered queries.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOntology;

impl OntologyQuery for NoOntology {
    fn is_subtype(
        &self,
        _candidate: &str,
        _ancestor: &str,
    ) -> bool {
        false
    }
}
