//! Generate sample Cayenne LPP payloads.

use cayenne_lpp::{Encoder, Reading, TypeId, MAX_CAPACITY};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "lpp-gen")]
#[command(about = "Generate sample Cayenne LPP payloads")]
#[command(after_help = "CSV FORMAT:\n  \
    When using --csv, each line holds: channel,kind,value[,value,value]\n  \
    - Lines starting with # are comments\n  \
    - Empty lines are skipped\n  \
    - kind is a type name (temperature, gps, ...) or its numeric code\n  \
    - accelerometer, gyrometer and gps take three values\n\n\
KINDS:\n  \
    digital_input, digital_output, analog_input, analog_output, luminosity,\n  \
    presence, temperature, humidity, accelerometer, pressure, gyrometer, gps")]
struct Args {
    /// Output file path
    output: PathBuf,

    /// Input CSV file with channel,kind,values lines (overrides random generation)
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Number of random readings to generate
    #[arg(short, long, default_value = "8")]
    readings: usize,

    /// Payload capacity in bytes (clamped to 255; 51 fits the smallest LoRaWAN frame)
    #[arg(short, long, default_value = "51")]
    capacity: usize,

    /// Seed for reproducible random readings
    #[arg(long)]
    seed: Option<u64>,

    /// Print the payload as hex to stdout
    #[arg(long)]
    hex: bool,

    /// Log filter (e.g. "info", "lpp_gen=debug"), overridden by RUST_LOG
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// One line of input: where to put it and what to encode
struct Entry {
    channel: u8,
    type_id: TypeId,
    values: Vec<f32>,
}

/// Initialize the tracing subscriber for logging
fn init_logging(level: &str) -> Result<(), String> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| format!("invalid log level: {e}"))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();

    Ok(())
}

fn parse_kind(kind: &str) -> Result<TypeId, String> {
    if let Ok(code) = kind.parse::<u8>() {
        return TypeId::try_from(code).map_err(|e| e.to_string());
    }
    let type_id = match kind.to_lowercase().as_str() {
        "digital_input" | "din" => TypeId::DigitalInput,
        "digital_output" | "dout" => TypeId::DigitalOutput,
        "analog_input" | "ain" => TypeId::AnalogInput,
        "analog_output" | "aout" => TypeId::AnalogOutput,
        "luminosity" | "illuminance" => TypeId::Illuminance,
        "presence" => TypeId::Presence,
        "temperature" | "temp" => TypeId::Temperature,
        "humidity" | "relative_humidity" => TypeId::Humidity,
        "accelerometer" | "accel" => TypeId::Accelerometer,
        "pressure" | "barometric_pressure" => TypeId::BarometricPressure,
        "gyrometer" | "gyro" => TypeId::Gyrometer,
        "gps" => TypeId::Gps,
        other => return Err(format!("unknown kind '{other}'")),
    };
    Ok(type_id)
}

/// Read channel,kind,values lines from a CSV file
fn read_csv(path: &PathBuf) -> Result<Vec<Entry>, String> {
    let file = File::open(path).map_err(|e| format!("Failed to open CSV: {e}"))?;
    let reader = BufReader::new(file);
    let mut entries = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result.map_err(|e| format!("Failed to read line {}: {}", line_num + 1, e))?;
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = trimmed.split(',').map(str::trim).collect();
        if parts.len() < 3 {
            return Err(format!(
                "Line {}: expected 'channel,kind,value', got '{}'",
                line_num + 1,
                trimmed
            ));
        }

        let channel: u8 = parts[0]
            .parse()
            .map_err(|e| format!("Line {}: invalid channel '{}': {}", line_num + 1, parts[0], e))?;
        let type_id = parse_kind(parts[1]).map_err(|e| format!("Line {}: {}", line_num + 1, e))?;
        let values = parts[2..]
            .iter()
            .map(|v| {
                v.parse::<f32>()
                    .map_err(|e| format!("Line {}: invalid value '{}': {}", line_num + 1, v, e))
            })
            .collect::<Result<Vec<_>, _>>()?;

        entries.push(Entry { channel, type_id, values });
    }

    Ok(entries)
}

/// A plausible random reading for each sensor kind
fn random_reading(rng: &mut StdRng) -> Reading {
    match rng.random_range(0..12) {
        0 => Reading::DigitalInput { value: rng.random_range(0..=1) },
        1 => Reading::DigitalOutput { value: rng.random_range(0..=1) },
        2 => Reading::AnalogInput { value: rng.random_range(-10.0..10.0) },
        3 => Reading::AnalogOutput { value: rng.random_range(0.0..5.0) },
        4 => Reading::Luminosity { value: rng.random_range(0.0..20_000.0) },
        5 => Reading::Presence { value: rng.random_range(0..=1) },
        6 => Reading::Temperature { value: rng.random_range(-20.0..40.0) },
        7 => Reading::RelativeHumidity { value: rng.random_range(10.0..95.0) },
        8 => Reading::Accelerometer {
            x: rng.random_range(-2.0..2.0),
            y: rng.random_range(-2.0..2.0),
            z: rng.random_range(-2.0..2.0),
        },
        9 => Reading::BarometricPressure { value: rng.random_range(950.0..1050.0) },
        10 => Reading::Gyrometer {
            x: rng.random_range(-250.0..250.0),
            y: rng.random_range(-250.0..250.0),
            z: rng.random_range(-250.0..250.0),
        },
        _ => Reading::Gps {
            latitude: rng.random_range(-90.0..90.0),
            longitude: rng.random_range(-180.0..180.0),
            altitude: rng.random_range(-100.0..3000.0),
        },
    }
}

fn generate_entries(args: &Args) -> Vec<Entry> {
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };
    (0..args.readings)
        .map(|i| {
            let reading = random_reading(&mut rng);
            let (values, len) = reading.values();
            Entry {
                channel: (i % 256) as u8,
                type_id: reading.type_id(),
                values: values[..len].to_vec(),
            }
        })
        .collect()
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02X}")).collect::<Vec<_>>().join(" ")
}

fn run(args: &Args) -> Result<(), String> {
    let entries = match &args.csv {
        Some(path) => {
            let entries = read_csv(path)?;
            info!(count = entries.len(), path = %path.display(), "read entries from CSV");
            entries
        }
        None => generate_entries(args),
    };

    if args.capacity > MAX_CAPACITY {
        warn!(requested = args.capacity, max = MAX_CAPACITY, "capacity clamped");
    }
    let mut enc = Encoder::new(args.capacity);
    let mut accepted = 0usize;

    for (i, entry) in entries.iter().enumerate() {
        match enc.add_fields(entry.type_id, entry.channel, &entry.values) {
            Ok(size) => {
                accepted += 1;
                debug!(
                    index = i,
                    channel = entry.channel,
                    kind = ?entry.type_id,
                    values = ?entry.values,
                    size,
                    "added record"
                );
            }
            Err(e) => warn!(index = i, channel = entry.channel, kind = ?entry.type_id, "skipped reading: {e}"),
        }
    }

    let mut file = File::create(&args.output).map_err(|e| format!("Failed to create output file: {e}"))?;
    file.write_all(enc.as_bytes())
        .map_err(|e| format!("Failed to write payload: {e}"))?;

    info!(
        accepted,
        rejected = entries.len() - accepted,
        bytes = enc.size(),
        capacity = enc.capacity(),
        output = %args.output.display(),
        "payload written"
    );

    if args.hex {
        println!("{}", hex(enc.as_bytes()));
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = init_logging(&args.log_level) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
