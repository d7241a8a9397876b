//! Combined schema document: every root-type interior under one
//! `type Query`, `type Mutation` and `type Subscription` block.

use resolvgen_analysis::SchemaModel;
use resolvgen_core::types::OperationKind;

/// Render the combined schema. Interiors appear in discovery order.
pub fn assemble_schema(model: &SchemaModel) -> String {
    let mut out = String::new();

    for (i, kind) in OperationKind::ALL.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str("type ");
        out.push_str(kind.type_name());
        out.push_str(" {\n");

        for document in model.documents_of(*kind) {
            let body = document
                .interior
                .trim_start_matches(['\n', '\r'])
                .trim_end();
            if body.is_empty() {
                continue;
            }
            out.push_str(body);
            out.push('\n');
        }

        out.push_str("}\n");
    }

    out
}
