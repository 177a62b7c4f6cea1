use crate::core::auto_detect_and_execute;
use crate::error::{RulegenError, RulegenResult};
use crate::excel::ExcelImporter;
use crate::macros::MacroRegistry;
use crate::types::MacroResult;
use colored::Colorize;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

/// Machine-readable summary of one `run` invocation
#[derive(Serialize)]
struct RunSummary<'a> {
    release: &'a str,
    environment: &'a str,
    executed: &'a [String],
    skipped: &'a [String],
    results: Vec<ResultSummary<'a>>,
}

#[derive(Serialize)]
struct ResultSummary<'a> {
    file_name: &'a str,
    success: bool,
    bytes: usize,
    error: Option<&'a str>,
}

impl<'a> ResultSummary<'a> {
    fn from_result(result: &'a MacroResult) -> Self {
        Self {
            file_name: &result.file_name,
            success: result.success,
            bytes: result.xml_content.len(),
            error: result.error.as_deref(),
        }
    }
}

/// Execute the run command: auto-detect applicable macros for a workbook and
/// write the produced ruleset documents.
#[allow(clippy::too_many_arguments)]
pub fn run(
    workbook: PathBuf,
    macros_dir: PathBuf,
    out_dir: PathBuf,
    release: String,
    environment: String,
    dry_run: bool,
    json: bool,
    verbose: bool,
) -> RulegenResult<()> {
    if !json {
        println!("{}", "⚙ Rulegen - Generating rulesets".bold().green());
        println!("   Workbook: {}", workbook.display());
        println!("   Release: {}", release.bright_yellow());
        println!();
        if dry_run {
            println!("{}", "📋 DRY RUN MODE - No files will be written\n".yellow());
        }
    }

    let dataset = ExcelImporter::new(&workbook).import()?;
    if verbose && !json {
        println!("   Loaded {} sheets", dataset.sheet_count());
    }

    let registry = MacroRegistry::new(&macros_dir);
    let detect = auto_detect_and_execute(&dataset, &registry, &release);

    if !dry_run {
        let written: Vec<&MacroResult> = detect.results.iter().filter(|r| r.success).collect();
        if !written.is_empty() {
            fs::create_dir_all(&out_dir)?;
        }
        for result in written {
            fs::write(out_dir.join(&result.file_name), &result.xml_content)?;
        }
    }

    if json {
        let summary = RunSummary {
            release: &release,
            environment: &environment,
            executed: &detect.executed,
            skipped: &detect.skipped,
            results: detect.results.iter().map(ResultSummary::from_result).collect(),
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&summary)
                .map_err(|e| RulegenError::Execution(e.to_string()))?
        );
        return Ok(());
    }

    println!("{}", "✅ Run complete:".bold().green());
    for name in &detect.executed {
        println!("   ▶ {}", name.bright_blue());
    }
    for reason in &detect.skipped {
        println!("   ⏭ {}", reason.dimmed());
    }
    println!();

    for result in &detect.results {
        if result.success {
            let status = if dry_run { "would write" } else { "wrote" };
            println!(
                "   📄 {} {} ({} bytes)",
                status,
                result.file_name.cyan(),
                result.xml_content.len()
            );
        } else {
            println!(
                "   ❌ {}",
                result.error.as_deref().unwrap_or("unknown error").red()
            );
        }
    }

    let failures = detect.results.iter().filter(|r| !r.success).count();
    if failures > 0 {
        println!();
        println!(
            "{}",
            format!("⚠️  {failures} macro(s) failed - see errors above").yellow()
        );
    }

    Ok(())
}

/// List available macro definitions
pub fn list(macros_dir: PathBuf) -> RulegenResult<()> {
    let registry = MacroRegistry::new(&macros_dir);
    let names = registry.list();

    if names.is_empty() {
        println!("{}", "No macro definitions found".yellow());
        return Ok(());
    }

    println!("{}", "Available macro definitions:".bold());
    for name in names {
        match registry.load(&name) {
            Some(def) if !def.config.xl_sheet.is_empty() => {
                println!("   {} (sheet: {})", name.bright_blue(), def.config.xl_sheet);
            }
            _ => println!("   {} {}", name.bright_blue(), "(no target sheet)".dimmed()),
        }
    }
    Ok(())
}

/// Show the parsed configuration of one macro definition
pub fn show(name: String, macros_dir: PathBuf, json: bool) -> RulegenResult<()> {
    let registry = MacroRegistry::new(&macros_dir);
    let definition = registry
        .load(&name)
        .ok_or_else(|| RulegenError::MacroNotFound(name.clone()))?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&definition.config)
                .map_err(|e| RulegenError::Execution(e.to_string()))?
        );
        return Ok(());
    }

    let config = &definition.config;
    println!("{}", format!("Macro definition: {name}").bold());
    println!("   Target sheet:      {}", display_or_dash(&config.xl_sheet));
    println!("   XL fields:         {}", display_or_dash(&config.all_xl_fields));
    println!("   Fields:            {}", display_or_dash(&config.all_fields));
    println!("   Text field:        {}", display_or_dash(&config.in_xl_text));
    println!("   Filter field:      {}", display_or_dash(&config.in_xl_filter));
    println!("   Filter values old: {}", display_or_dash(&config.in_xl_filter_values_old));
    println!("   Filter values new: {}", display_or_dash(&config.in_xl_filter_values_new));
    println!("   Input fields:      {}", display_or_dash(&config.in_fields));
    println!("   Sequence tab:      {}", display_or_dash(&config.in_fields_seq_tab));
    println!("   Output DVM:        {}", display_or_dash(&config.out_dvm));
    println!("   Output file:       {}", display_or_dash(&config.out_file));
    println!("   Return code:       {}", display_or_dash(&config.out_return_code));
    println!("   Component:         {}", display_or_dash(&config.out_bc));
    println!("   Output fields:     {}", display_or_dash(&config.out_fields));
    println!("   Defaults:          {}", display_or_dash(&config.out_default));
    println!("   Loop:              {}", config.out_loop);
    Ok(())
}

fn display_or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}
