use serde::Deserialize;

/// Body of a successful `nex` call. Only the fields the pipeline reads are
/// modelled.
#[derive(Debug, Deserialize)]
pub(crate) struct NexResponse {
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

/// One entity spotted in the annotated text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Annotation {
    /// Canonical entity name, e.g. `"Paris"`.
    pub label: String,
    /// Linking confidence in `[0.0, 1.0]`.
    pub confidence: f64,
    /// DBpedia ontology type URIs. Present because the request asks for
    /// `include=types`.
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub uri: Option<String>,
    /// Surface form as it appeared in the text.
    #[serde(default)]
    pub spot: Option<String>,
}
