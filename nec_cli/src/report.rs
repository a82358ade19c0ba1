//! Plain-text reports for terminal output.

use nec_core::calculations::box_fill::BoxFillResult;
use nec_core::calculations::conduit_fill::ConduitFillResult;
use nec_core::calculations::dwelling_load::DwellingLoadResult;
use nec_core::tables::nec_ref;
use nec_core::{CalcError, CalcResult, CalculationOutput, GlobalSettings, Project};

const RULE: &str = "═══════════════════════════════════════";

fn status_icon(pass: bool) -> &'static str {
    if pass { "[OK]" } else { "[FAIL]" }
}

fn banner(title: &str, label: &str, settings: &GlobalSettings) {
    println!("{}", RULE);
    if label.is_empty() {
        println!("  {} ({})", title, settings.code_edition);
    } else {
        println!("  {}: {} ({})", title, label, settings.code_edition);
    }
    println!("{}", RULE);
    println!();
}

fn verdict(pass: bool) {
    println!();
    println!("{}", RULE);
    println!("  RESULT: {}", if pass { "PASS" } else { "FAIL" });
    println!("{}", RULE);
    println!();
}

pub fn box_fill(result: &BoxFillResult, settings: &GlobalSettings) {
    banner("BOX FILL", &result.label, settings);

    if !result.box_dimensions.is_empty() {
        println!("Box:      {} ({})", result.box_dimensions, result.box_type);
    }
    println!("Volume:   {:.2} in³", result.box_volume_in3);
    println!();
    println!("Allowances ({}):", nec_ref::BOX_FILL);
    for row in &result.component_details {
        println!(
            "  {:<36} {:>3} x {:>5.2} = {:>6.2} in³  [{}]",
            row.description,
            row.quantity,
            row.volume_per_unit_in3,
            row.total_volume_in3,
            row.component_type.code_reference()
        );
    }
    for note in &result.notes {
        println!("  note: {}", note);
    }
    println!();
    println!(
        "Required: {:.2} in³ of {:.2} in³ ({:.1}%) {}",
        result.total_required_volume_in3,
        result.box_volume_in3,
        result.fill_percentage,
        status_icon(result.is_within_limits)
    );
    println!("Remaining: {:.2} in³", result.remaining_volume_in3);
    verdict(result.passes());
}

pub fn conduit_fill(result: &ConduitFillResult, settings: &GlobalSettings) {
    banner("CONDUIT FILL", &result.label, settings);

    println!("Raceway area: {:.4} in²", result.conduit_area_in2);
    println!("Fill limit:   {:.0}% ({})", result.fill_limit_percent, nec_ref::RACEWAY_FILL);
    println!();
    println!("Conductors ({}):", nec_ref::CONDUCTOR_DIMENSIONS);
    for row in &result.details {
        println!(
            "  {:>3} x {:<10} {:<5} d={:.4}\"  {:.4} in² each  {:.4} in²",
            row.quantity,
            row.wire_size.to_string(),
            row.wire_type.code(),
            row.diameter_in,
            row.area_per_wire_in2,
            row.total_area_in2
        );
    }
    println!();
    println!(
        "Used: {:.4} in² ({:.2}%) {}",
        result.total_area_used_in2,
        result.percent_filled,
        status_icon(result.is_acceptable)
    );
    println!("Remaining: {:.4} in²", result.remaining_area_in2);
    verdict(result.passes());
}

pub fn dwelling_load(result: &DwellingLoadResult, settings: &GlobalSettings) {
    banner("DWELLING LOAD", &result.label, settings);

    println!("Lighting ({}):", nec_ref::GENERAL_LIGHTING);
    println!("  General lighting:    {:>10.0} VA", result.general_lighting_load_va);
    println!("  Small appliance:     {:>10.0} VA", result.small_appliance_load_va);
    println!("  Laundry:             {:>10.0} VA", result.laundry_load_va);
    println!("  Total:               {:>10.0} VA", result.total_lighting_va);
    println!("  After demand:        {:>10.0} VA", result.lighting_demand_va);
    println!();
    println!("Loads:");
    for row in &result.details {
        println!(
            "  {:<32} {:>10.0} VA x {:.3} = {:>10.0} VA{}",
            row.name,
            row.connected_load_va,
            row.demand_factor,
            row.demand_load_va,
            row.code_reference.as_deref().map(|r| format!("  [{}]", r)).unwrap_or_default()
        );
    }
    println!();
    println!("Connected load:  {:>10.0} VA", result.total_connected_load_va);
    println!("Demand load:     {:>10.0} VA", result.total_demand_load_va);
    println!("Minimum ampacity: {:.1} A", result.minimum_ampacity);
    println!();
    println!("{}", RULE);
    println!("  SERVICE: {} A", result.service_size_amps);
    println!("{}", RULE);
    println!();
}

pub fn output(output: &CalculationOutput, settings: &GlobalSettings) {
    match output {
        CalculationOutput::BoxFill(r) => box_fill(r, settings),
        CalculationOutput::ConduitFill(r) => conduit_fill(r, settings),
        CalculationOutput::DwellingLoad(r) => dwelling_load(r, settings),
    }
}

pub fn failure(label: &str, err: &CalcError) {
    println!("{}", RULE);
    println!("  {} - ERROR [{}]", label, err.error_code());
    println!("  {}", err);
    println!("{}", RULE);
    println!();
}

pub fn project_header(project: &Project) {
    println!("Job {} - {}", project.meta.job_id, project.meta.client);
    println!("Electrician: {}", project.meta.electrician);
    println!("Code edition: {}", project.settings.code_edition);
    println!("Modified: {}", project.meta.modified.format("%Y-%m-%d %H:%M UTC"));
    println!();
}

pub fn project_summary<K>(results: &[(K, CalcResult<CalculationOutput>)]) {
    let passed = results.iter().filter(|(_, r)| matches!(r, Ok(o) if o.passes())).count();
    let failed = results.iter().filter(|(_, r)| matches!(r, Ok(o) if !o.passes())).count();
    let errors = results.iter().filter(|(_, r)| r.is_err()).count();
    println!("--- Project Summary ---");
    println!("  Passed: {}", passed);
    println!("  Failed: {}", failed);
    println!("  Errors: {}", errors);
}
