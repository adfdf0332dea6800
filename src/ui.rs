use crate::document::SearchHit;
use anyhow::{bail, Context, Result};
use std::io::{self, BufRead, Write};

/// Narrow contract for obtaining one 0/1 relevance judgment per result,
/// index-aligned with the batch.
pub trait FeedbackCollector {
    fn collect(&mut self, results: &[SearchHit]) -> Result<Vec<u8>>;
}

/// Interactive collector: prints each result and prompts for a y/n
/// judgment on stdin, re-prompting on anything else.
pub struct ConsoleCollector;

impl FeedbackCollector for ConsoleCollector {
    fn collect(&mut self, results: &[SearchHit]) -> Result<Vec<u8>> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        collect_from(results, stdin.lock(), stdout.lock())
    }
}

fn collect_from<R: BufRead, W: Write>(
    results: &[SearchHit],
    mut input: R,
    mut output: W,
) -> Result<Vec<u8>> {
    writeln!(output, "\nSearch Results:")?;
    writeln!(output, "======================")?;

    let mut feedback = Vec::with_capacity(results.len());
    for (index, hit) in results.iter().enumerate() {
        writeln!(output, "Result {}", index + 1)?;
        writeln!(output, "[")?;
        if let Some(url) = &hit.url {
            writeln!(output, "URL: {url}")?;
        }
        writeln!(output, "Title: {}", hit.title)?;
        writeln!(output, "Summary: {}\n", hit.summary)?;
        writeln!(output, "]")?;

        loop {
            write!(output, "Relevant (y/n)? ")?;
            output.flush()?;
            let mut line = String::new();
            let read = input
                .read_line(&mut line)
                .context("failed to read feedback")?;
            if read == 0 {
                bail!("feedback input ended before all results were judged");
            }
            match line.trim().to_uppercase().as_str() {
                "Y" => {
                    feedback.push(1);
                    break;
                }
                "N" => {
                    feedback.push(0);
                    break;
                }
                _ => writeln!(output, "Invalid input. Please enter 'y' or 'n'.")?,
            }
        }
    }

    Ok(feedback)
}

/// Parameter block printed once at startup.
pub fn display_parameters(engine_id: &str, query: &str, target_precision: f64) {
    println!("\nParameters:");
    println!("Engine id  = {engine_id}");
    println!("Query      = {query}");
    println!("Precision  = {target_precision}");
}
