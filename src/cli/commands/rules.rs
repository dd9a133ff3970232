//! Rules command - Print the rule tables

use serde_json::json;

use crate::errors::{FmrError, Result};
use crate::rules::{
    required_intake_documents, CATEGORIES, HAZARD_ASSESSMENT, CRITERIA, ELIGIBILITY_CHECKLIST, ENGINEERING_CHECKLIST,
    MAX_TOTAL, NOTICE_OF_AWARD, PASSING_SCORE, STEP3_DOCUMENTS,
};

/// Print the checklists, scoring criteria and document requirements
pub async fn run(json: bool) -> Result<()> {
    if json {
        let out = serde_json::to_string_pretty(&rules_json())
            .map_err(|e| FmrError::InvalidJson(e.to_string()))?;
        println!("{}", out);
        return Ok(());
    }

    println!("Step 1 eligibility (all must be ticked, masterplan verified)");
    for item in ELIGIBILITY_CHECKLIST {
        println!("  {:<20} {}", item.id, item.label);
    }

    println!();
    println!("Step 2 scoring (pass at {} of {})", PASSING_SCORE, MAX_TOTAL);
    for category in CATEGORIES {
        println!("  {} [max {}]", category, category.max_points());
        for c in CRITERIA.iter().filter(|c| c.category == *category) {
            println!("    {:<4} {:>3}  {}", c.id, c.max_points, c.label);
        }
    }

    println!();
    println!("Step 3 engineering review");
    for document in ENGINEERING_CHECKLIST {
        println!("  {} ({})", document.title, document.document);
        for group in document.groups {
            let marker = if group.red_flag { " [red flag: must be No]" } else { "" };
            println!("    {}. {}{}", group.letter, group.title, marker);
            for (id, question) in group.items {
                println!("      {:<7} {}", id, question);
            }
        }
    }

    println!();
    println!("Documents");
    println!("  intake:    {}", required_intake_documents(false).join(", "));
    println!("  hazard-flagged intake adds: {}", HAZARD_ASSESSMENT);
    println!("  step 3:    {}", STEP3_DOCUMENTS.join(", "));
    println!("  award:     {}", NOTICE_OF_AWARD);
    Ok(())
}

fn rules_json() -> serde_json::Value {
    json!({
        "eligibility": ELIGIBILITY_CHECKLIST
            .iter()
            .map(|i| json!({ "id": i.id, "label": i.label }))
            .collect::<Vec<_>>(),
        "scoring": {
            "passing_score": PASSING_SCORE,
            "max_total": MAX_TOTAL,
            "categories": CATEGORIES
                .iter()
                .map(|cat| json!({
                    "letter": cat.letter(),
                    "title": cat.title(),
                    "max_points": cat.max_points(),
                    "criteria": CRITERIA
                        .iter()
                        .filter(|c| c.category == *cat)
                        .map(|c| json!({ "id": c.id, "label": c.label, "max_points": c.max_points }))
                        .collect::<Vec<_>>(),
                }))
                .collect::<Vec<_>>(),
        },
        "engineering": ENGINEERING_CHECKLIST
            .iter()
            .map(|d| json!({
                "document": d.document,
                "title": d.title,
                "groups": d.groups
                    .iter()
                    .map(|g| json!({
                        "letter": g.letter.to_string(),
                        "title": g.title,
                        "red_flag": g.red_flag,
                        "items": g.items
                            .iter()
                            .map(|(id, q)| json!({ "id": id, "question": q }))
                            .collect::<Vec<_>>(),
                    }))
                    .collect::<Vec<_>>(),
            }))
            .collect::<Vec<_>>(),
        "documents": {
            "intake": required_intake_documents(false),
            "intake_hazard_flagged": required_intake_documents(true),
            "step3": STEP3_DOCUMENTS,
            "award": NOTICE_OF_AWARD,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_json_shape() {
        let value = rules_json();
        assert_eq!(value["eligibility"].as_array().unwrap().len(), ELIGIBILITY_CHECKLIST.len());
        assert_eq!(value["scoring"]["passing_score"], 60);
        assert_eq!(value["scoring"]["categories"].as_array().unwrap().len(), 5);
        assert_eq!(value["engineering"][0]["document"], "detailed_engineering");
        assert_eq!(value["documents"]["step3"].as_array().unwrap().len(), 4);
    }
}
