//! Heuristic GS1 classification of decoded results.
//!
//! Not a GS1 parser. The symbology identifier is trusted first; failing
//! that, a fixed set of leading application identifiers is matched. The
//! prefix set is deliberately narrow: widening it changes which results are
//! reported as GS1.

use crate::models::DecodedResult;

/// AIM symbology identifiers that signal GS1 data (Code 128, DataBar, Data Matrix, QR)
pub const GS1_SYMBOLOGY_IDENTIFIERS: [&str; 4] = ["]C1", "]e0", "]d2", "]Q3"];

/// Leading application identifiers accepted by the text fallback
pub const GS1_AI_PREFIXES: [&str; 8] = ["01", "(01)", "02", "(02)", "10", "(10)", "21", "(21)"];

/// Shortest text the prefix fallback accepts
pub const GS1_MIN_TEXT_LEN: usize = 14;

/// Whether `result` looks like GS1-encoded data
pub fn is_gs1(result: &DecodedResult) -> bool {
    if let Some(id) = result.metadata.symbology_identifier.as_deref() {
        if GS1_SYMBOLOGY_IDENTIFIERS.contains(&id) {
            return true;
        }
    }

    let text = result.text.as_str();
    text.chars().count() >= GS1_MIN_TEXT_LEN
        && GS1_AI_PREFIXES.iter().any(|prefix| text.starts_with(prefix))
}
