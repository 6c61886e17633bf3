use clap::{Parser, Subcommand};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tfd_controls::{FaderBank, build_faders};
use tfd_devices::{DeviceRegistry, SimSensor, SimSensorProbe, SimSwitch, SimSwitchProbe};
use tfd_project::{Project, ProjectResult, audit_project, load_yaml};

#[derive(Parser)]
#[command(name = "tfd-cli")]
#[command(about = "Thermofade CLI - temperature fader control loop tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a project file and report droppable entries
    Validate {
        /// Path to the project YAML file
        project_path: PathBuf,
    },
    /// Run a fader bank against simulated sensors
    Run {
        /// Path to the project YAML file
        project_path: PathBuf,
        /// Number of one-second ticks to simulate
        #[arg(long, default_value_t = 240)]
        ticks: u32,
        /// Peak of the triangular temperature profile (°C)
        #[arg(long, default_value_t = 200.0)]
        peak_temp: f64,
        /// Ticks for one full heat-up/cool-down cycle
        #[arg(long, default_value_t = 120)]
        period: u32,
    },
}

fn main() -> ProjectResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Run {
            project_path,
            ticks,
            peak_temp,
            period,
        } => cmd_run(&project_path, ticks, peak_temp, period),
    }
}

fn cmd_validate(project_path: &Path) -> ProjectResult<()> {
    println!("Validating project: {}", project_path.display());
    let project = load_yaml(project_path)?;
    println!("✓ Project is valid");

    let findings = audit_project(&project);
    let buildable = project.faders.len() - findings.len();
    println!(
        "  {} fader entries, {} buildable",
        project.faders.len(),
        buildable
    );
    for finding in findings {
        println!("  ! '{}' will be dropped: {}", finding.fader_name, finding.reason);
    }
    Ok(())
}

fn cmd_run(project_path: &Path, ticks: u32, peak_temp: f64, period: u32) -> ProjectResult<()> {
    let project = load_yaml(project_path)?;
    let (mut devices, sensors, switches) = build_sim_devices(&project);

    let faders = build_faders(&project.faders, &devices);
    if faders.is_empty() {
        println!("No buildable faders in project; nothing to run");
        return Ok(());
    }
    println!("Running {} fader(s) for {} ticks", faders.len(), ticks);
    println!(
        "  triangular profile: 20.0 → {:.1} °C over {} ticks",
        peak_temp, period
    );
    let mut bank = FaderBank::from_faders(faders);

    let mut last_seen: Vec<Option<f64>> = vec![None; switches.len()];
    for t in 0..ticks {
        let temp = profile_temperature(t, period, peak_temp);
        for sensor in &sensors {
            sensor.set_temperature(temp);
        }

        bank.tick(&mut devices);

        for (i, (name, probe)) in switches.iter().enumerate() {
            let value = probe.last_value();
            if value != last_seen[i]
                && let Some(duty) = value
            {
                let state = if probe.last_state().unwrap_or(false) {
                    "on"
                } else {
                    "off"
                };
                println!("t={t:>4}s  temp={temp:6.1}°C  {name}: duty={duty:.0} ({state})");
                last_seen[i] = value;
            }
        }
    }

    Ok(())
}

/// Triangular wave from 20 °C up to the peak and back, one cycle per period.
fn profile_temperature(tick: u32, period: u32, peak: f64) -> f64 {
    let period = period.max(2);
    let phase = (tick % period) as f64 / period as f64;
    let tri = if phase < 0.5 { 2.0 * phase } else { 2.0 * (1.0 - phase) };
    20.0 + tri * (peak - 20.0)
}

/// One simulated sensor per distinct designator, one simulated switch per
/// distinct switch name, covering every enabled entry in the project.
fn build_sim_devices(
    project: &Project,
) -> (
    DeviceRegistry,
    Vec<SimSensorProbe>,
    Vec<(String, SimSwitchProbe)>,
) {
    let mut devices = DeviceRegistry::new();
    let mut sensors = Vec::new();
    let mut switches = Vec::new();
    let mut seen_tags = BTreeSet::new();
    let mut seen_names = BTreeSet::new();

    for def in &project.faders {
        if !def.enable {
            continue;
        }
        if let Some(tag) = def.resolved_designator()
            && seen_tags.insert(tag)
        {
            let sensor = SimSensor::new(tag, 20.0);
            sensors.push(sensor.probe());
            devices.register_sensor(Box::new(sensor));
        }
        if let Some(name) = def.resolved_switch()
            && seen_names.insert(name.to_string())
        {
            let switch = SimSwitch::new();
            switches.push((name.to_string(), switch.probe()));
            devices
                .register_switch(name, Box::new(switch))
                .expect("switch names deduplicated above");
        }
    }

    (devices, sensors, switches)
}
