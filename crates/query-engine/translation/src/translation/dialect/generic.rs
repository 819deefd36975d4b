//! A dialect for databases without a dedicated one. Quoting, qualification and null sorting
//! follow what the remote driver reported at the last schema scan.

use super::registry::DialectContext;
use super::{DialectDefinition, IdentifierQuote, NullSorting};
use crate::translation::identifiers::{IdentifierCaseHandling, IdentifierConverter};

pub const NAME: &str = "GENERIC";

pub fn definition(context: &DialectContext) -> DialectDefinition {
    let notes = &context.schema_adapter_notes;
    DialectDefinition {
        identifier_quote: IdentifierQuote::Custom(notes.identifier_quote_string.clone()),
        identifier_converter: IdentifierConverter::Standard(
            IdentifierCaseHandling::from_schema_notes(notes),
        ),
        catalog_qualified: true,
        schema_qualified: true,
        catalog_separator: notes.catalog_separator.clone(),
        null_sorting: NullSorting::from_schema_notes(notes),
        ..DialectDefinition::new(NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translation::capabilities::Capabilities;
    use crate::translation::dialect::Dialect;
    use query_engine_metadata::metadata::SchemaAdapterNotes;

    #[test]
    fn generic_follows_the_driver() {
        let context = DialectContext {
            schema_adapter_notes: SchemaAdapterNotes {
                identifier_quote_string: "`".to_string(),
                catalog_separator: ":".to_string(),
                nulls_are_sorted_low: true,
                ..SchemaAdapterNotes::default()
            },
            ..DialectContext::default()
        };
        let dialect = Dialect::new(definition(&context), &context).unwrap();
        assert_eq!(dialect.quote_identifier("T").unwrap(), "`T`");
        assert!(dialect.quote_identifier("a`b").is_err());
        assert_eq!(dialect.definition().catalog_separator, ":");
        assert!(dialect.nulls_last_by_default(false));
        assert_eq!(dialect.capabilities(), &Capabilities::empty());
    }
}
