//! Exasol, which can execute everything and can import from itself.

use query_engine_sql::sql::ast::ScalarFunction;

use super::registry::DialectContext;
use super::{DialectDefinition, ImportSupport, NullSorting};
use crate::translation::capabilities::Capabilities;

pub const NAME: &str = "EXASOL";

pub fn definition(_context: &DialectContext) -> DialectDefinition {
    let mut definition = DialectDefinition::new(NAME);
    definition.null_sorting = NullSorting::High;
    definition.omit_parentheses = [
        ScalarFunction::Sysdate,
        ScalarFunction::Systimestamp,
        ScalarFunction::CurrentSchema,
        ScalarFunction::CurrentSession,
        ScalarFunction::CurrentStatement,
        ScalarFunction::CurrentUser,
        ScalarFunction::CurrentDate,
        ScalarFunction::CurrentTimestamp,
        ScalarFunction::Localtimestamp,
        ScalarFunction::Dbtimezone,
        ScalarFunction::Sessiontimezone,
    ]
    .into_iter()
    .collect();
    definition.capabilities = Capabilities::all();
    definition.import_support = ImportSupport {
        local: true,
        from_exa: true,
        from_ora: false,
    };
    definition
}
