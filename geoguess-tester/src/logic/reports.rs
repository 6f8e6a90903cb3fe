use anyhow::Result;
use colored::Colorize;
use std::io::Write;
use std::time::Duration;

use super::ScenarioResult;

fn summary(results: &[ScenarioResult]) -> (usize, usize, f64) {
    let total = results.len();
    let passed = results.iter().filter(|r| r.passed).count();
    #[allow(clippy::cast_precision_loss)]
    let success_rate = if total == 0 {
        0.0
    } else {
        (passed as f64 / total as f64) * 100.0
    };
    (total, passed, success_rate)
}

pub fn generate_console_report<W: Write + ?Sized>(
    out: &mut W,
    results: &[ScenarioResult],
    total_duration: Duration,
) -> Result<()> {
    let (total, passed, success_rate) = summary(results);
    writeln!(out)?;
    writeln!(out, "{}", "📊 Scenario Results Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "===========================".cyan())?;
    writeln!(out, "Total runs: {total}")?;
    writeln!(out, "Passed: {}", passed.to_string().green())?;
    writeln!(out, "Failed: {}", (total - passed).to_string().red())?;
    writeln!(out, "Success rate: {success_rate:.1}%")?;
    writeln!(out, "Total time: {total_duration:?}")?;
    writeln!(out)?;

    for result in results {
        let status = if result.passed {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };
        writeln!(
            out,
            "{status} {} (seed {})",
            result.scenario_name.bold(),
            result.seed
        )?;
        writeln!(
            out,
            "   Iterations: {}/{} successful, {} rounds solved",
            result.successful_iterations, result.iterations_run, result.rounds_solved
        )?;
        writeln!(out, "   Average time: {:?}", result.average_duration)?;
        if !result.failures.is_empty() {
            writeln!(out, "   Failures:")?;
            for failure in &result.failures {
                writeln!(out, "     • {}", failure.red())?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn generate_json_report<W: Write + ?Sized>(
    out: &mut W,
    results: &[ScenarioResult],
) -> Result<()> {
    let json_output = serde_json::to_string_pretty(results)?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

pub fn generate_markdown_report<W: Write + ?Sized>(
    out: &mut W,
    results: &[ScenarioResult],
) -> Result<()> {
    let (total, passed, success_rate) = summary(results);
    writeln!(out, "# GeoGuess Scenario Results\n")?;
    writeln!(
        out,
        "_Generated {}_\n",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Total runs**: {total}")?;
    writeln!(out, "- **Passed**: {passed}")?;
    writeln!(out, "- **Failed**: {}", total - passed)?;
    writeln!(out, "- **Success rate**: {success_rate:.1}%\n")?;
    writeln!(out, "## Detailed Results\n")?;

    for result in results {
        let status = if result.passed { "✅" } else { "❌" };
        writeln!(out, "### {status} {} (seed {})\n", result.scenario_name, result.seed)?;
        writeln!(
            out,
            "- **Iterations**: {}/{} successful",
            result.successful_iterations, result.iterations_run
        )?;
        writeln!(out, "- **Rounds solved**: {}", result.rounds_solved)?;
        writeln!(out, "- **Average time**: {:?}", result.average_duration)?;
        if !result.failures.is_empty() {
            writeln!(out, "- **Failures**:")?;
            for failure in &result.failures {
                writeln!(out, "  - {failure}")?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str, passed: bool) -> ScenarioResult {
        ScenarioResult {
            scenario_name: name.into(),
            seed: 7,
            passed,
            iterations_run: 2,
            successful_iterations: usize::from(passed) * 2,
            rounds_solved: 0,
            failures: if passed {
                Vec::new()
            } else {
                vec!["Iteration 1 (seed 7): boom".into()]
            },
            average_duration: Duration::from_millis(1),
        }
    }

    #[test]
    fn markdown_lists_failures() {
        let mut out = Vec::new();
        generate_markdown_report(&mut out, &[result("smoke", true), result("denied", false)])
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("# GeoGuess Scenario Results"));
        assert!(text.contains("- **Success rate**: 50.0%"));
        assert!(text.contains("  - Iteration 1 (seed 7): boom"));
    }

    #[test]
    fn json_report_is_an_array() {
        let mut out = Vec::new();
        generate_json_report(&mut out, &[result("smoke", true)]).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed.as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn console_report_handles_empty_results() {
        colored::control::set_override(false);
        let mut out = Vec::new();
        generate_console_report(&mut out, &[], Duration::ZERO).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Total runs: 0"));
        assert!(text.contains("Success rate: 0.0%"));
    }
}
