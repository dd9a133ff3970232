//! Step 1 eligibility checklist

use super::ChecklistItem;

const fn item(id: &'static str, label: &'static str) -> ChecklistItem {
    ChecklistItem {
        id,
        label,
        red_flag: false,
    }
}

/// The eight items a validator must tick before clearing a proposal.
///
/// Masterplan verification is captured separately on the payload.
pub const ELIGIBILITY_CHECKLIST: &[ChecklistItem] = &[
    item(
        "production_area",
        "Road traverses or serves an identified agricultural production area",
    ),
    item(
        "market_linkage",
        "Road links production areas to a market, processing or trading center",
    ),
    item(
        "no_duplication",
        "No existing or funded road project covers the same alignment",
    ),
    item(
        "right_of_way",
        "Right-of-way is available or covered by a quitclaim / donation",
    ),
    item(
        "lgu_endorsement",
        "LGU endorsement and maintenance commitment are attached",
    ),
    item(
        "not_protected_area",
        "Alignment is outside protected areas and no-build zones",
    ),
    item(
        "gps_consistent",
        "GPS start/end points are consistent with the location map",
    ),
    item(
        "cost_within_ceiling",
        "Indicative cost per kilometer is within the program ceiling",
    ),
];
