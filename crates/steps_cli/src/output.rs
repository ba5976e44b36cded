use crate::config::ReportConfig;
use anyhow::Result;
use steps_engine::{render_markdown_batch, SolutionRecord};

/// Print a batch of records according to the active report options.
pub fn print_records(records: &[SolutionRecord], config: &ReportConfig) -> Result<()> {
    if config.json {
        println!("{}", serde_json::to_string_pretty(records)?);
        return Ok(());
    }

    if config.markdown {
        println!("{}", render_markdown_batch(records));
        return Ok(());
    }

    for rec in records {
        let label = rec.category.as_deref().unwrap_or(&rec.problem_type);
        println!("Problem {} [{}]: {}", rec.number, label, rec.original);
        if config.show_steps {
            for (i, step) in rec.steps.iter().enumerate() {
                println!("  {}. {}", i + 1, step.description);
                println!("     {}", step.math);
            }
        }
        println!("  Answer: {}", rec.answer);
        if let Some(err) = &rec.error {
            println!("  Note: {}", err);
        }
        println!();
    }
    Ok(())
}
