//! # Customs Document Suggestion
//!
//! Per-origin tables of the customs and shipping documents required for
//! fresh-cut flower exports. This is the offline suggestion path; the
//! deployed product may overlay it with service-generated suggestions,
//! but these tables are always available and deterministic.

/// Documents required from any origin.
const DEFAULT_DOCUMENTS: &[&str] = &["Commercial Invoice", "Air Waybill (AWB)"];

/// Colombia-specific export document set.
const COLOMBIA_DOCUMENTS: &[&str] = &[
    "Commercial Invoice",
    "Air Waybill (AWB)",
    "Phytosanitary Certificate",
    "Certificate of Origin",
];

/// Ecuador-specific export document set.
const ECUADOR_DOCUMENTS: &[&str] = &[
    "Commercial Invoice",
    "Air Waybill (AWB)",
    "DAE (Documento Aduanero de Exportación)",
    "Phytosanitary Certificate",
];

/// Suggested customs documents for an origin country.
///
/// Country matching is case-insensitive; unknown origins fall back to
/// the default set.
pub fn suggested_documents(origin_country: &str) -> Vec<&'static str> {
    let documents = match origin_country.to_lowercase().as_str() {
        "colombia" => COLOMBIA_DOCUMENTS,
        "ecuador" => ECUADOR_DOCUMENTS,
        _ => DEFAULT_DOCUMENTS,
    };
    documents.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colombia_documents() {
        let docs = suggested_documents("Colombia");
        assert!(docs.contains(&"Phytosanitary Certificate"));
        assert!(docs.contains(&"Certificate of Origin"));
    }

    #[test]
    fn test_ecuador_includes_dae() {
        let docs = suggested_documents("ecuador");
        assert!(docs
            .iter()
            .any(|d| d.starts_with("DAE")));
    }

    #[test]
    fn test_unknown_origin_falls_back() {
        assert_eq!(
            suggested_documents("Costa Rica"),
            vec!["Commercial Invoice", "Air Waybill (AWB)"]
        );
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert_eq!(suggested_documents("COLOMBIA"), suggested_documents("Colombia"));
    }
}
