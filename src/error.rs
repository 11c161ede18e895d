/// Errors produced while turning declarations into the schema model.
///
/// Every variant carries enough declaration identity (declaration name, field
/// or case name, offending value) to print an actionable message. All of these
/// are recorded in the [`ParserContext`](crate::context::ParserContext) error
/// list; extraction skips the offending field or declaration and continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A second declaration was registered under an already-taken
    /// fully-qualified name. The first registration wins.
    DuplicateDeclaration { name: String },
    /// A field or case referenced a type name that matches no primitive,
    /// oneof wrapper, or object symbol.
    UnresolvedTypeName {
        declaration: String,
        field: String,
        type_name: String,
    },
    /// A field used a type shape outside plain / optional / array of a name.
    UnsupportedFieldShape {
        declaration: String,
        field: String,
        shape: String,
    },
    /// An endpoint is missing one of its Header/Query/Body/Response records.
    MissingNestedRecord {
        endpoint: String,
        expected: &'static str,
    },
    /// An endpoint's `method` literal is not one of get/post/put/delete.
    UnknownHttpMethod { endpoint: String, method: String },
    /// An endpoint is missing its `method` or `path` literal property.
    MissingEndpointProperty {
        endpoint: String,
        property: &'static str,
    },
}

impl std::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            SchemaError::DuplicateDeclaration { name } => {
                write!(f, "duplicate declaration: {}", name)
            }
            SchemaError::UnresolvedTypeName {
                declaration,
                field,
                type_name,
            } => write!(
                f,
                "cannot resolve type name `{}` ({}.{})",
                type_name, declaration, field
            ),
            SchemaError::UnsupportedFieldShape {
                declaration,
                field,
                shape,
            } => write!(
                f,
                "unsupported field type shape `{}` ({}.{})",
                shape, declaration, field
            ),
            SchemaError::MissingNestedRecord { endpoint, expected } => {
                write!(
                    f,
                    "endpoint {} is missing nested record {}",
                    endpoint, expected
                )
            }
            SchemaError::UnknownHttpMethod { endpoint, method } => {
                write!(
                    f,
                    "endpoint {} has unknown HTTP method `{}`",
                    endpoint, method
                )
            }
            SchemaError::MissingEndpointProperty { endpoint, property } => {
                write!(
                    f,
                    "endpoint {} is missing the `{}` property",
                    endpoint, property
                )
            }
        }
    }
}

impl std::error::Error for SchemaError {}
