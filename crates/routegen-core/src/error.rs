/// Errors surfaced by declarative-schema validation.
///
/// The resolution engine itself is a best-effort structural merge and
/// raises nothing: unmatched fields are dropped, unset optionals fall
/// through the precedence chain, and empty groups contribute zero
/// descriptors.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("duplicate field `{field}` declared on schema {schema}")]
    DuplicateField {
        schema: &'static str,
        field: &'static str,
    },
}
