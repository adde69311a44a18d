use crate::entities::drug::DrugInfo;
use crate::sources::openfda::LabelRecord;

pub const UNKNOWN_NAME: &str = "Unknown";
pub const NO_INFORMATION: &str = "No information available.";
pub const WHEN_TO_TAKE_ADVISORY: &str =
    "Please consult a physician or pharmacist about when to take this medicine.";

const SECTION_SEPARATOR: &str = "\n\n";

/// Joins label paragraphs; an absent, empty, or blank-only list yields `None`.
fn joined(values: Option<&[String]>) -> Option<String> {
    let text = values?
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .collect::<Vec<_>>()
        .join(SECTION_SEPARATOR);
    if text.is_empty() { None } else { Some(text) }
}

fn first_name(values: Option<&[String]>) -> Option<&str> {
    values?.first().map(String::as_str).filter(|v| !v.is_empty())
}

fn display_name(record: &LabelRecord) -> String {
    let openfda = record.openfda.as_ref();
    first_name(openfda.and_then(|o| o.brand_name.as_deref()))
        .or_else(|| first_name(openfda.and_then(|o| o.generic_name.as_deref())))
        .unwrap_or(UNKNOWN_NAME)
        .to_string()
}

fn side_effects(record: &LabelRecord) -> Option<String> {
    let warnings = joined(record.warnings.as_deref());
    let adverse = joined(record.adverse_reactions.as_deref());
    match (warnings, adverse) {
        (Some(w), Some(a)) => Some(format!("{w}{SECTION_SEPARATOR}{a}")),
        (Some(w), None) => Some(w),
        (None, Some(a)) => Some(a),
        (None, None) => None,
    }
}

/// Maps one label record into display texts.
///
/// "When to take" reuses the dosage text; labels have no separate field for it. Its
/// fallback is an advisory rather than the generic placeholder.
pub fn render(record: &LabelRecord) -> DrugInfo {
    let dosage = joined(record.dosage_and_administration.as_deref());

    DrugInfo {
        name: display_name(record),
        benefits: joined(record.indications_and_usage.as_deref())
            .unwrap_or_else(|| NO_INFORMATION.to_string()),
        side_effects: side_effects(record).unwrap_or_else(|| NO_INFORMATION.to_string()),
        when_to_take: dosage
            .clone()
            .unwrap_or_else(|| WHEN_TO_TAKE_ADVISORY.to_string()),
        dosage: dosage.unwrap_or_else(|| NO_INFORMATION.to_string()),
    }
}
