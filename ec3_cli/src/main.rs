//! # ec3 CLI
//!
//! Terminal front end for ec3_core: prints the reference tables, seeded
//! random verification tables for each engine, hole-layout limits, and runs
//! connection checks read from JSON files.
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`
//! (e.g. `RUST_LOG=ec3_core=debug ec3 check joint.json`).

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use ec3_core::calculations::bolt_resistance::{BoltLayout, BoltResistance, LongitudinalRole, TransverseRole};
use ec3_core::calculations::hole_layout::{Distance, Exposure, HoleLayoutLimits};
use ec3_core::calculations::thin_gauge::ThinGaugeBoltResistance;
use ec3_core::calculations::validity_ranges::GeometricValidityRanges;
use ec3_core::calculations::{CheckOutcome, ConnectionCheck};
use ec3_core::errors::{CalcError, CalcResult};
use ec3_core::materials::{BoltGrade, HoleType};
use ec3_core::safety_factors::SafetyFactor;
use ec3_core::units::{Kilonewtons, Newtons};
use ec3_core::{PartialSafetyFactors, ReferenceData};

#[derive(Debug, Parser)]
#[command(name = "ec3", version, about = "Eurocode 3 bolted connection design checks")]
struct Cli {
    /// Partial safety factor file (JSON, EN 1993-1-8 Table 2.1 keys)
    #[arg(long, global = true)]
    gammas: Option<PathBuf>,

    /// Print machine-readable JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the built-in reference tables
    Tables {
        #[arg(long, value_enum, default_value_t = TableKind::All)]
        table: TableKind,
    },
    /// Evaluate randomly drawn inputs (seeded) and print the results
    Sample {
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long, default_value_t = 10)]
        count: usize,
        #[arg(long, value_enum, default_value_t = Standard::General)]
        standard: Standard,
    },
    /// Print the EN 1993-1-8 Table 3.3 hole positioning limits
    Layout {
        /// Hole diameter d_0 (mm)
        #[arg(long)]
        d0: f64,
        /// Thickness of the thinnest outer part t (mm)
        #[arg(long)]
        t: f64,
    },
    /// Run connection checks from a JSON file (one check or an array)
    Check { input: PathBuf },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TableKind {
    All,
    Steel,
    Sheet,
    Bolts,
    Grades,
    Gammas,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Standard {
    /// Nominal steel strengths, EN 1993-1-1 Table 3.1
    Steel,
    /// Nominal bolt strengths, EN 1993-1-8 Table 3.1
    Grades,
    /// General bolt resistances, EN 1993-1-8 Table 3.4
    General,
    /// Thin-gauge bolt resistances, EN 1993-1-3 Table 8.4
    ThinGauge,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}

/// Returns false when a connection check ran but did not pass
fn run(cli: &Cli) -> CalcResult<bool> {
    let gammas = match &cli.gammas {
        Some(path) => {
            info!(path = %path.display(), "Using partial safety factors from file");
            PartialSafetyFactors::from_path(path)?
        }
        None => PartialSafetyFactors::builtin()?,
    };
    let data = ReferenceData::builtin()?;

    match &cli.command {
        Command::Tables { table } => print_tables(*table, data, &gammas, cli.json)?,
        Command::Sample { seed, count, standard } => {
            print_samples(*standard, *seed, *count, data, &gammas, cli.json)?
        }
        Command::Layout { d0, t } => print_layout(*d0, *t, cli.json)?,
        Command::Check { input } => return run_checks(input, &gammas, cli.json),
    }
    Ok(true)
}

fn print_json<T: Serialize>(value: &T) -> CalcResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn kn(newtons: f64) -> f64 {
    Kilonewtons::from(Newtons(newtons)).0
}

fn rule(width: usize) {
    println!("{}", "─".repeat(width));
}

// ============================================================================
// Reference Tables
// ============================================================================

fn print_tables(kind: TableKind, data: &ReferenceData, gammas: &PartialSafetyFactors, json: bool) -> CalcResult<()> {
    let show = |k: TableKind| kind == TableKind::All || kind == k;

    if json {
        let mut out = serde_json::Map::new();
        if show(TableKind::Steel) {
            out.insert("steel".into(), serde_json::to_value(data.steel_grades())?);
        }
        if show(TableKind::Sheet) {
            out.insert("sheet".into(), serde_json::to_value(data.sheet_steels())?);
        }
        if show(TableKind::Bolts) {
            out.insert("bolts".into(), serde_json::to_value(data.bolt_metrics())?);
        }
        if show(TableKind::Grades) {
            let grades: Vec<_> = data
                .bolt_grades()
                .iter()
                .map(|g| serde_json::json!({ "grade": g, "f_yb": g.f_yb(), "f_ub": g.f_ub() }))
                .collect();
            out.insert("grades".into(), serde_json::Value::Array(grades));
        }
        if show(TableKind::Gammas) {
            out.insert("gammas".into(), serde_json::to_value(gammas)?);
        }
        return print_json(&out);
    }

    if show(TableKind::Steel) {
        println!("Structural steel, EN 1993-1-1 Table 3.1 (N/mm²)");
        rule(62);
        println!("{:<10} {:<12} {:>8} {:>8} {:>10} {:>10}", "Grade", "Standard", "f_y≤40", "f_u≤40", "f_y≤80", "f_u≤80");
        rule(62);
        for g in data.steel_grades() {
            println!(
                "{:<10} {:<12} {:>8.0} {:>8.0} {:>10.0} {:>10.0}",
                g.name, g.standard, g.f_y_40, g.f_u_40, g.f_y_80, g.f_u_80
            );
        }
        println!();
    }
    if show(TableKind::Sheet) {
        println!("Sheet steel, EN 1993-1-3 Table 3.1a (N/mm²)");
        rule(40);
        println!("{:<10} {:<12} {:>7} {:>7}", "Grade", "Standard", "f_yb", "f_u");
        rule(40);
        for g in data.sheet_steels() {
            println!("{:<10} {:<12} {:>7.0} {:>7.0}", g.name, g.standard, g.f_yb, g.f_u);
        }
        println!();
    }
    if show(TableKind::Bolts) {
        println!("Bolt dimensions, normal round holes");
        rule(58);
        println!("{:<6} {:>6} {:>6} {:>8} {:>9} {:>6} {:>8}", "Metric", "d", "pitch", "d_0", "A", "A_s", "s");
        rule(58);
        for m in data.bolt_metrics() {
            let g = m.geometry(HoleType::Normal)?;
            println!(
                "{:<6} {:>6.0} {:>6.2} {:>8.0} {:>9.1} {:>6.1} {:>8.0}",
                m.designation, m.d_mm, m.pitch_mm, g.d_0_mm, g.a_mm2, g.a_s_mm2, m.s_mm
            );
        }
        println!();
    }
    if show(TableKind::Grades) {
        println!("Bolt grades, EN 1993-1-8 Table 3.1 (N/mm²)");
        rule(26);
        println!("{:<8} {:>8} {:>8}", "Grade", "f_yb", "f_ub");
        rule(26);
        for g in data.bolt_grades() {
            println!("{:<8} {:>8.0} {:>8.0}", g.code(), g.f_yb(), g.f_ub());
        }
        println!();
    }
    if show(TableKind::Gammas) {
        println!("Partial safety factors, EN 1993-1-8 Table 2.1");
        rule(76);
        for f in SafetyFactor::ALL {
            println!("{:<28} {:>5.2}   {}", f.key(), gammas.get(f), f.description());
        }
        println!();
    }
    Ok(())
}

// ============================================================================
// Random Samples
// ============================================================================

fn print_samples(
    standard: Standard,
    seed: u64,
    count: usize,
    data: &ReferenceData,
    gammas: &PartialSafetyFactors,
    json: bool,
) -> CalcResult<()> {
    let mut rng = StdRng::seed_from_u64(seed);
    match standard {
        Standard::Steel => sample_steel(&mut rng, count, data, json),
        Standard::Grades => sample_grades(&mut rng, count, json),
        Standard::General => sample_general(&mut rng, count, data, gammas, json),
        Standard::ThinGauge => sample_thin_gauge(&mut rng, count, data, gammas, json),
    }
}

fn choose<'a, T>(items: &'a [T], rng: &mut StdRng, table: &str) -> CalcResult<&'a T> {
    items
        .choose(rng)
        .ok_or_else(|| CalcError::not_found(table, "any row (table is empty)"))
}

fn sample_steel(rng: &mut StdRng, count: usize, data: &ReferenceData, json: bool) -> CalcResult<()> {
    let mut rows = Vec::with_capacity(count);
    for _ in 0..count {
        let grade = choose(data.steel_grades(), rng, "steel grades")?;
        let t: f64 = rng.gen_range(5..=80) as f64;
        rows.push(data.lookup_steel(&grade.name, t).map(|s| (t, s))?);
    }
    if json {
        let out: Vec<_> = rows
            .iter()
            .map(|(t, s)| serde_json::json!({ "t_mm": t, "strength": s }))
            .collect();
        return print_json(&out);
    }
    println!("{:<10} {:>6} {:>20} {:>7} {:>7}", "Grade", "t", "Band", "f_y", "f_u");
    rule(54);
    for (t, s) in &rows {
        let band = s.band.map(|b| b.display_name()).unwrap_or("-");
        println!("{:<10} {:>6.0} {:>20} {:>7.0} {:>7.0}", s.grade, t, band, s.f_y, s.f_u);
    }
    Ok(())
}

fn sample_grades(rng: &mut StdRng, count: usize, json: bool) -> CalcResult<()> {
    let mut rows = Vec::with_capacity(count);
    for _ in 0..count {
        let grade = *choose(&BoltGrade::ALL, rng, "bolt grades")?;
        rows.push((grade, grade.strength()));
    }
    if json {
        let out: Vec<_> = rows
            .iter()
            .map(|(g, s)| serde_json::json!({ "grade": g, "f_yb": s.f_yb, "f_ub": s.f_ub }))
            .collect();
        return print_json(&out);
    }
    println!("{:<8} {:>8} {:>8}", "Grade", "f_yb", "f_ub");
    rule(26);
    for (g, s) in &rows {
        println!("{:<8} {:>8.0} {:>8.0}", g.code(), s.f_yb, s.f_ub);
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct GeneralSample {
    metric: String,
    grade: BoltGrade,
    steel: String,
    t_mm: f64,
    f_u: f64,
    d_0_mm: f64,
    layout: BoltLayout,
    shear_resistance_n: f64,
    bearing_resistance_n: f64,
    tension_resistance_n: f64,
    punching_resistance_n: f64,
}

fn sample_general(
    rng: &mut StdRng,
    count: usize,
    data: &ReferenceData,
    gammas: &PartialSafetyFactors,
    json: bool,
) -> CalcResult<()> {
    let mut rows = Vec::with_capacity(count);
    for _ in 0..count {
        let metric = choose(data.bolt_metrics(), rng, "bolt metrics")?;
        let grade = *choose(&BoltGrade::ALL, rng, "bolt grades")?;
        let steel = choose(data.steel_grades(), rng, "steel grades")?;
        let t: f64 = rng.gen_range(5..=40) as f64;
        let f_u = data.lookup_steel(&steel.name, t)?.f_u;

        let bolt = data.lookup_bolt_metric_normal(&metric.designation)?;
        let engine = BoltResistance::new(bolt, grade, t, f_u, gammas.gamma_m2)?;
        let limits = HoleLayoutLimits::new(bolt.d_0_mm, t)?;
        let layout = BoltLayout::from_spacing_minimum(&limits, TransverseRole::Edge, LongitudinalRole::End);

        rows.push(GeneralSample {
            metric: metric.designation.clone(),
            grade,
            steel: steel.name.clone(),
            t_mm: t,
            f_u,
            d_0_mm: bolt.d_0_mm,
            layout,
            shear_resistance_n: engine.shear_resistance(true),
            bearing_resistance_n: engine.bearing_resistance(&layout)?,
            tension_resistance_n: engine.tension_resistance(false),
            punching_resistance_n: engine.punching_resistance(metric.s_mm)?,
        });
    }
    if json {
        return print_json(&rows);
    }
    println!(
        "{:<6} {:<6} {:<8} {:>4} {:>5} {:>4} {:>6} {:>6} {:>9} {:>9} {:>9} {:>9}",
        "Metric", "Grade", "Steel", "t", "f_u", "d_0", "e_1", "p_1", "F_v,Rd", "F_b,Rd", "F_t,Rd", "B_p,Rd"
    );
    rule(96);
    for r in &rows {
        println!(
            "{:<6} {:<6} {:<8} {:>4.0} {:>5.0} {:>4.0} {:>6.1} {:>6.1} {:>9.2} {:>9.2} {:>9.2} {:>9.2}",
            r.metric,
            r.grade.code(),
            r.steel,
            r.t_mm,
            r.f_u,
            r.d_0_mm,
            r.layout.e_1_mm,
            r.layout.p_1_mm,
            kn(r.shear_resistance_n),
            kn(r.bearing_resistance_n),
            kn(r.tension_resistance_n),
            kn(r.punching_resistance_n),
        );
    }
    println!();
    println!("Resistances in kN, γ_M2 = {}, layout at Table 3.3 minima", gammas.gamma_m2);
    Ok(())
}

fn sample_thin_gauge(
    rng: &mut StdRng,
    count: usize,
    data: &ReferenceData,
    gammas: &PartialSafetyFactors,
    json: bool,
) -> CalcResult<()> {
    const T_MM: f64 = 2.0;
    const F_U: f64 = 450.0;

    let mut rows = Vec::with_capacity(count);
    for _ in 0..count {
        let metric = choose(data.bolt_metrics(), rng, "bolt metrics")?;
        let grade = *choose(&BoltGrade::ALL, rng, "bolt grades")?;
        let bolt = data.lookup_bolt_metric_normal(&metric.designation)?;
        let a_s = bolt.a_s_mm2.round();
        let engine =
            ThinGaugeBoltResistance::new(bolt.d_mm, a_s, grade, bolt.d_0_mm, T_MM, F_U, gammas.gamma_m2)?;
        let ranges = GeometricValidityRanges::new(bolt.d_0_mm)?;
        rows.push((metric.designation.clone(), engine, ranges, engine.net_section_resistance()?));
    }

    if json {
        let mut out = Vec::with_capacity(rows.len());
        for (metric, engine, ranges, net) in &rows {
            out.push(serde_json::json!({
                "metric": metric,
                "engine": engine,
                "validity_ranges": {
                    "e_1_min_mm": ranges.e_1_min(),
                    "e_2_min_mm": ranges.e_2_min(),
                    "p_1_min_mm": ranges.p_1_min(),
                    "p_2_min_mm": ranges.p_2_min(),
                },
                "bearing_resistance_n": engine.bearing_resistance()?,
                "net_section": net,
                "shear_resistance_n": engine.shear_resistance(),
            }));
        }
        return print_json(&out);
    }

    println!(
        "{:<6} {:>3} {:>5} {:<5} {:>4} {:>6} {:>6} {:>6} {:>6} {:>8} {:>31} {:>8}",
        "Metric", "d", "A_s", "Grade", "d_0", "e_1", "e_2", "p_1", "p_2", "F_b,Rd", "F_n,Rd (r = 2, 1, 1/2, 1/3)", "F_v,Rd"
    );
    rule(108);
    for (metric, engine, ranges, net) in &rows {
        let f_n: Vec<String> = net.resistances_n.iter().map(|f| format!("{:.0}", f)).collect();
        println!(
            "{:<6} {:>3.0} {:>5.0} {:<5} {:>4.0} {:>6.2} {:>6.2} {:>6.2} {:>6.2} {:>8.0} {:>31} {:>8.0}",
            metric,
            engine.d_mm,
            engine.a_s_mm2,
            engine.grade.code(),
            engine.d_0_mm,
            ranges.e_1_min(),
            ranges.e_2_min(),
            ranges.p_1_min(),
            ranges.p_2_min(),
            engine.bearing_resistance()?,
            f_n.join(", "),
            engine.shear_resistance(),
        );
    }
    println!();
    println!("Resistances in N, t = {} mm, f_u = {} N/mm², γ_M2 = {}", T_MM, F_U, gammas.gamma_m2);
    Ok(())
}

// ============================================================================
// Hole Layout
// ============================================================================

fn print_layout(d_0: f64, t: f64, json: bool) -> CalcResult<()> {
    let limits = HoleLayoutLimits::new(d_0, t)?;

    if json {
        let mut out = serde_json::Map::new();
        for exposure in Exposure::ALL {
            out.insert(format!("{:?}", exposure), serde_json::to_value(limits.table(exposure))?);
        }
        return print_json(&out);
    }

    let fmt = |v: Option<f64>| v.map(|x| format!("{:.1}", x)).unwrap_or_else(|| "-".to_string());
    println!("Hole positioning, EN 1993-1-8 Table 3.3 (d_0 = {} mm, t = {} mm)", d_0, t);
    rule(72);
    println!(
        "{:<8} {:>10} {:>14} {:>16} {:>18}",
        "Distance", "Minimum", "Max exposed", "Max not exposed", "Max EN 10025-5"
    );
    rule(72);
    for distance in Distance::ALL {
        println!(
            "{:<8} {:>10} {:>14} {:>16} {:>18}",
            distance.symbol(),
            fmt(limits.minimum(distance)),
            fmt(limits.maximum(distance, Exposure::Exposed)),
            fmt(limits.maximum(distance, Exposure::NotExposed)),
            fmt(limits.maximum(distance, Exposure::WeatheringSteel)),
        );
    }
    Ok(())
}

// ============================================================================
// Connection Checks
// ============================================================================

fn load_checks(path: &Path) -> CalcResult<Vec<ConnectionCheck>> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
    let value: serde_json::Value = serde_json::from_str(&contents)?;
    if value.is_array() {
        Ok(serde_json::from_value(value)?)
    } else {
        Ok(vec![serde_json::from_value(value)?])
    }
}

fn run_checks(path: &Path, gammas: &PartialSafetyFactors, json: bool) -> CalcResult<bool> {
    let checks = load_checks(path)?;
    info!(count = checks.len(), path = %path.display(), "Running connection checks");

    let outcomes = checks
        .iter()
        .map(|c| c.run(gammas))
        .collect::<CalcResult<Vec<CheckOutcome>>>()?;
    let all_pass = outcomes.iter().all(|o| o.passes());

    if json {
        print_json(&outcomes)?;
        return Ok(all_pass);
    }

    for outcome in &outcomes {
        println!("═══════════════════════════════════════════════════════════");
        println!("  {}", if outcome.label().is_empty() { "(unlabelled)" } else { outcome.label() });
        println!("═══════════════════════════════════════════════════════════");
        match outcome {
            CheckOutcome::General(r) => {
                print!("{}", r.summary());
                if let Some((mode, u)) = r.governing_mode() {
                    println!("Utilisation {:.2} ({})", u, mode);
                }
            }
            CheckOutcome::ThinGauge(r) => {
                println!(
                    "Bolt d = {:.0} mm, d_0 = {:.0} mm, class {}, sheet t = {:.2} mm, f_u = {:.0} N/mm²",
                    r.d_mm, r.d_0_mm, r.grade, r.t_mm, r.f_u
                );
                println!("α_b = {:.3}   k_t = {:.3}   u = {:.1} mm   A_net = {:.1} mm²", r.alpha_b, r.k_t, r.u_mm, r.net_area_mm2);
                println!("{:<16} {:>10.2} kN", "Bearing", kn(r.bearing_resistance_n));
                for (ratio, f_n) in r.net_section.entries() {
                    println!("{:<16} {:>10.2} kN   r = {:.3}", "Net section", kn(f_n), ratio);
                }
                println!("{:<16} {:>10.2} kN", "Shear", kn(r.shear_resistance_n));
                println!("{:<16} {:>10.2} kN", "Tension", kn(r.tension_resistance_n));
                for v in &r.applicability_violations {
                    println!("{}: {}", if v.is_blocking() { "WARNING" } else { "NOTE" }, v);
                }
            }
        }
        let (mode, resistance) = outcome.governing_shear();
        println!();
        println!(
            "  RESULT: {} (governs: {}, {:.2} kN)",
            if outcome.passes() { "PASS" } else { "FAIL" },
            mode,
            kn(resistance)
        );
        println!();
    }
    Ok(all_pass)
}
