//! Show command - Show details of a specific project

use std::path::Path;

use crate::errors::Result;

use super::{open_pipeline, print_project};

/// Show details of a specific project
pub async fn run(cwd: Option<&Path>, id: &str, json: bool) -> Result<()> {
    let pipeline = open_pipeline(cwd, false)?;
    let project = pipeline.get(id).await?;
    print_project(&project, json)?;

    if !json {
        let details = &project.details;
        println!(
            "  location: {}, {}, {}",
            details.location.barangay_name,
            details.location.municipality_name,
            details.location.province_name
        );
        println!(
            "  road: {:.2} km x {:.1} m {:?}, indicative cost {:.2}",
            details.road_length_km, details.road_width_m, details.surface_type, details.indicative_cost
        );
        if let Some(score) = &project.score_data {
            println!("  score: {} ({})", score.total, if score.passed { "pass" } else { "fail" });
        }
        if let Some(abc) = project.validated_abc {
            println!("  validated ABC: {:.2}", abc);
        }
        if let Some(award) = &project.step4_data {
            println!("  contractor: {} at {:.2}", award.contractor.name, award.bid_amount);
        }
        for (key, attachment) in &project.attachments {
            println!("  [{}] {} <{}>", key, attachment.name, attachment.url);
        }
    }
    Ok(())
}
