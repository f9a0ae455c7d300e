mod error;

use clap::{Parser, Subcommand};
use eos_core::units::{Temperature, constants, k, pa};
use eos_models::{
    EquationOfState, LoadedMaterial, Quantity, SweepDefinition, SweepResult, SweepType,
    execute_pressure_sweep, load_material, parse_quantity,
};
use error::CliResult;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "eos-cli")]
#[command(about = "Reciprocal K' equation of state for solid materials", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a material file and report defaults and parameter warnings
    Validate {
        /// Path to the material YAML or JSON file
        material_path: PathBuf,
    },
    /// Molar volume at a given pressure
    Volume {
        /// Path to the material YAML or JSON file
        material_path: PathBuf,
        /// Pressure, e.g. "25 GPa"
        #[arg(long, allow_hyphen_values = true)]
        pressure: String,
        /// Temperature, e.g. "1500 K" (defaults to 300 K)
        #[arg(long)]
        temperature: Option<String>,
    },
    /// Pressure at a given molar volume
    Pressure {
        /// Path to the material YAML or JSON file
        material_path: PathBuf,
        /// Molar volume, e.g. "10.5 cm^3/mol"
        #[arg(long)]
        volume: String,
        /// Temperature, e.g. "1500 K" (defaults to 300 K)
        #[arg(long)]
        temperature: Option<String>,
    },
    /// Full property pack at a given pressure
    Props {
        /// Path to the material YAML or JSON file
        material_path: PathBuf,
        /// Pressure, e.g. "25 GPa"
        #[arg(long, allow_hyphen_values = true)]
        pressure: String,
        /// Temperature, e.g. "1500 K" (defaults to 300 K)
        #[arg(long)]
        temperature: Option<String>,
    },
    /// Pressure sweep written as CSV
    Sweep {
        /// Path to the material YAML or JSON file
        material_path: PathBuf,
        /// First pressure of the sweep
        #[arg(long, allow_hyphen_values = true)]
        start: String,
        /// Last pressure of the sweep
        #[arg(long, allow_hyphen_values = true)]
        end: String,
        /// Number of points
        #[arg(long, default_value_t = 51)]
        points: usize,
        /// Logarithmic spacing
        #[arg(long)]
        log: bool,
        /// Temperature, e.g. "1500 K" (defaults to 300 K)
        #[arg(long)]
        temperature: Option<String>,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { material_path } => cmd_validate(&material_path),
        Commands::Volume {
            material_path,
            pressure,
            temperature,
        } => cmd_volume(&material_path, &pressure, temperature.as_deref()),
        Commands::Pressure {
            material_path,
            volume,
            temperature,
        } => cmd_pressure(&material_path, &volume, temperature.as_deref()),
        Commands::Props {
            material_path,
            pressure,
            temperature,
        } => cmd_props(&material_path, &pressure, temperature.as_deref()),
        Commands::Sweep {
            material_path,
            start,
            end,
            points,
            log,
            temperature,
            output,
        } => {
            let sweep_type = if log {
                SweepType::Logarithmic
            } else {
                SweepType::Linear
            };
            cmd_sweep(
                &material_path,
                &start,
                &end,
                points,
                sweep_type,
                temperature.as_deref(),
                output.as_deref(),
            )
        }
    }
}

fn parse_temperature(raw: Option<&str>) -> CliResult<Temperature> {
    match raw {
        Some(text) => Ok(k(parse_quantity(text, Quantity::Temperature)?)),
        None => Ok(constants::t_ref()),
    }
}

fn cmd_validate(material_path: &Path) -> CliResult<()> {
    println!("Validating material: {}", material_path.display());
    let material = load_material(material_path)?;

    for key in &material.validated.defaults_applied {
        println!("  default applied: {key}");
    }
    for warning in &material.validated.warnings {
        println!("  warning: {warning}");
    }
    println!(
        "✓ {} ({}) is valid",
        material.file.name, material.file.equation_of_state
    );
    Ok(())
}

fn cmd_volume(material_path: &Path, pressure: &str, temperature: Option<&str>) -> CliResult<()> {
    let material = load_material(material_path)?;
    let p = pa(parse_quantity(pressure, Quantity::Pressure)?);
    let t = parse_temperature(temperature)?;

    let v = material.model().volume(p, t, material.params())?;
    println!("V = {v:.6e} m³/mol");
    print_density(&material, v);
    Ok(())
}

fn cmd_pressure(material_path: &Path, volume: &str, temperature: Option<&str>) -> CliResult<()> {
    let material = load_material(material_path)?;
    let v = parse_quantity(volume, Quantity::MolarVolume)?;
    let t = parse_temperature(temperature)?;

    let p = material.model().pressure(t, v, material.params())?;
    println!("P = {:.6e} Pa ({:.4} GPa)", p.value, p.value / 1e9);
    Ok(())
}

fn cmd_props(material_path: &Path, pressure: &str, temperature: Option<&str>) -> CliResult<()> {
    let material = load_material(material_path)?;
    let p = pa(parse_quantity(pressure, Quantity::Pressure)?);
    let t = parse_temperature(temperature)?;

    let pack = material.model().property_pack(p, t, material.params())?;
    println!("{}", material.file.name);
    println!("  P    = {:.6e} Pa", pack.pressure.value);
    println!("  T    = {:.2} K", pack.temperature.value);
    println!("  V    = {:.6e} m³/mol", pack.volume);
    println!("  K_T  = {:.6e} Pa", pack.isothermal_bulk_modulus.value);
    println!("  K_S  = {:.6e} Pa", pack.adiabatic_bulk_modulus.value);
    println!("  G    = {:.6e} Pa", pack.shear_modulus.value);
    println!("  C_v  = {:.3e} J/(mol·K)", pack.heat_capacity_v);
    println!("  C_p  = {:.3e} J/(mol·K)", pack.heat_capacity_p);
    println!("  α    = {:.3e} 1/K", pack.thermal_expansivity);
    println!("  γ    = {:.3}", pack.grueneisen_parameter);
    print_density(&material, pack.volume);
    Ok(())
}

fn print_density(material: &LoadedMaterial, volume: f64) {
    // Density needs molar_mass, which is optional
    if let Ok(rho) = material.model().density(volume, material.params()) {
        println!("  ρ    = {:.3} kg/m³", rho.value);
    }
}

fn cmd_sweep(
    material_path: &Path,
    start: &str,
    end: &str,
    points: usize,
    sweep_type: SweepType,
    temperature: Option<&str>,
    output: Option<&Path>,
) -> CliResult<()> {
    let material = load_material(material_path)?;
    let t = parse_temperature(temperature)?;
    let sweep = SweepDefinition::from_text(start, end, Quantity::Pressure, points, sweep_type)?;
    tracing::info!(%sweep, material = %material.file.name, "running sweep");

    let result = execute_pressure_sweep(&material.model(), material.params(), &sweep, t)?;
    for failure in &result.failures {
        tracing::warn!(
            point = failure.point_index,
            pressure = failure.independent_value,
            "skipped: {}",
            failure.error
        );
    }

    let csv = sweep_csv(&result);
    if let Some(path) = output {
        std::fs::write(path, csv)?;
        println!(
            "✓ Exported {} data points to {}",
            result.num_successful,
            path.display()
        );
    } else {
        print!("{}", csv);
    }
    Ok(())
}

fn sweep_csv(result: &SweepResult) -> String {
    let mut csv = String::from("pressure_pa,volume_m3_per_mol,k_t_pa\n");
    for state in result.states.iter().flatten() {
        csv.push_str(&format!(
            "{},{},{}\n",
            state.pressure.value, state.volume, state.isothermal_bulk_modulus.value
        ));
    }
    csv
}
