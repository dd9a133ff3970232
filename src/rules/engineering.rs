//! Step 3 engineering checklist
//!
//! Four document categories, each split into lettered groups. Groups tagged
//! `red_flag` hold anomaly indicators: a "Yes" there blocks approval.

use super::ChecklistItem;

/// A lettered group of checklist questions
#[derive(Debug, Clone, Copy)]
pub struct ChecklistGroup {
    pub letter: char,
    pub title: &'static str,
    pub red_flag: bool,
    /// `(item id, question)`
    pub items: &'static [(&'static str, &'static str)],
}

/// A Step 3 document and the groups reviewed against it
#[derive(Debug, Clone, Copy)]
pub struct DocumentCategory {
    /// Attachment key of the reviewed document
    pub document: &'static str,
    pub title: &'static str,
    pub groups: &'static [ChecklistGroup],
}

pub const ENGINEERING_CHECKLIST: &[DocumentCategory] = &[
    DocumentCategory {
        document: "detailed_engineering",
        title: "Detailed Engineering Design",
        groups: &[
            ChecklistGroup {
                letter: 'A',
                title: "Completeness of plans",
                red_flag: false,
                items: &[
                    ("DED-A1", "Title sheet, index and general notes are present"),
                    ("DED-A2", "Plan and profile sheets cover the full road length"),
                    ("DED-A3", "Typical roadway sections are provided"),
                    ("DED-A4", "Drainage and slope protection details are provided"),
                ],
            },
            ChecklistGroup {
                letter: 'B',
                title: "Consistency with proposal",
                red_flag: false,
                items: &[
                    ("DED-B1", "Road length matches the approved proposal"),
                    ("DED-B2", "Alignment matches the submitted GPS coordinates"),
                    ("DED-B3", "Plans are signed and sealed by a licensed engineer"),
                ],
            },
            ChecklistGroup {
                letter: 'C',
                title: "Red flags",
                red_flag: true,
                items: &[
                    ("DED-C1", "Alignment overlaps an existing or previously funded road"),
                    ("DED-C2", "Plans appear copied from another project"),
                ],
            },
        ],
    },
    DocumentCategory {
        document: "qto",
        title: "Quantity Take-Off",
        groups: &[
            ChecklistGroup {
                letter: 'A',
                title: "Quantities",
                red_flag: false,
                items: &[
                    ("QTO-A1", "Earthwork quantities are computed from the profiles"),
                    ("QTO-A2", "Pavement volumes agree with length, width and thickness"),
                    ("QTO-A3", "Drainage structure quantities agree with the plans"),
                ],
            },
            ChecklistGroup {
                letter: 'B',
                title: "Red flags",
                red_flag: true,
                items: &[
                    ("QTO-B1", "Quantities are inflated relative to the plans"),
                    ("QTO-B2", "Pay items appear that are not shown in the plans"),
                ],
            },
        ],
    },
    DocumentCategory {
        document: "technical_specs",
        title: "Technical Specifications",
        groups: &[
            ChecklistGroup {
                letter: 'A',
                title: "Standards",
                red_flag: false,
                items: &[
                    ("SPC-A1", "Items reference the DPWH standard specifications"),
                    ("SPC-A2", "Material and testing requirements are stated"),
                ],
            },
            ChecklistGroup {
                letter: 'B',
                title: "Red flags",
                red_flag: true,
                items: &[("SPC-B1", "Specifications name a particular brand or supplier")],
            },
        ],
    },
    DocumentCategory {
        document: "abc",
        title: "Approved Budget for the Contract",
        groups: &[
            ChecklistGroup {
                letter: 'A',
                title: "Cost build-up",
                red_flag: false,
                items: &[
                    ("ABC-A1", "Unit costs are supported by a detailed cost estimate"),
                    ("ABC-A2", "Indirect costs are within allowable percentages"),
                    ("ABC-A3", "ABC is within the indicative cost of the proposal"),
                ],
            },
            ChecklistGroup {
                letter: 'B',
                title: "Red flags",
                red_flag: true,
                items: &[
                    ("ABC-B1", "Unit prices exceed prevailing market rates"),
                    ("ABC-B2", "Lump-sum items lack a cost breakdown"),
                ],
            },
        ],
    },
];

/// Flatten the taxonomy into items, inheriting the group's red-flag tag
pub fn step3_items() -> Vec<ChecklistItem> {
    ENGINEERING_CHECKLIST
        .iter()
        .flat_map(|category| category.groups.iter())
        .flat_map(|group| {
            group.items.iter().map(move |&(id, label)| ChecklistItem {
                id,
                label,
                red_flag: group.red_flag,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::STEP3_DOCUMENTS;
    use std::collections::HashSet;

    #[test]
    fn test_four_categories_cover_step3_documents() {
        assert_eq!(ENGINEERING_CHECKLIST.len(), 4);
        let documents: Vec<_> = ENGINEERING_CHECKLIST.iter().map(|c| c.document).collect();
        assert_eq!(documents, STEP3_DOCUMENTS.to_vec());
    }

    #[test]
    fn test_item_ids_unique() {
        let items = step3_items();
        let ids: HashSet<_> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids.len(), items.len());
    }

    #[test]
    fn test_red_flag_inherited_from_group() {
        let items = step3_items();
        let red: Vec<_> = items.iter().filter(|i| i.red_flag).map(|i| i.id).collect();
        assert!(red.contains(&"DED-C1"));
        assert!(red.contains(&"SPC-B1"));
        assert!(!red.contains(&"DED-A1"));
        assert_eq!(red.len(), 7);
    }

    #[test]
    fn test_every_category_has_a_red_flag_group() {
        for category in ENGINEERING_CHECKLIST {
            assert!(category.groups.iter().any(|g| g.red_flag), "{}", category.title);
        }
    }
}
