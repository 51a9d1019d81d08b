//! # gridfix
//!
//! Command line front end for [`gridfix_core`]: the search screen (`parse`),
//! the home screen (`show`), grid reference conversion, distance between two
//! positions and the passage calculator.
//!
//! ## Command Line Options
//!
//! - `-v` / `-q` - More or less logging on stderr
//! - `--json` - Print results as JSON
//! - `--datum none|helmert` - WGS84 to OSGB36 datum handling
//! - `--config PATH` - Settings file instead of the platform default
//!
//! Options not given on the command line are taken from the settings file,
//! see [`config`].

use clap::{Parser, Subcommand};
use log::{debug, warn};
use std::path::PathBuf;

use gridfix_core::{
    distance_between, from_bng_with, to_bng_string_with, CoordinateParser, DatumShift,
    DistanceUnit, GeoPoint, NationalGrid, Notation, ParsedCoordinate, Passage, PassageTime,
    SpeedUnit,
};

pub mod config;
pub mod error;
pub mod output;

use config::Settings;
use error::CliError;
use output::{emit, DistanceReport, GridReport, PositionReport};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Datum {
    None,
    Helmert,
}

impl From<Datum> for DatumShift {
    fn from(datum: Datum) -> Self {
        match datum {
            Datum::None => DatumShift::None,
            Datum::Helmert => DatumShift::Helmert,
        }
    }
}

/// Quantity the passage calculator solves for
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Solve {
    Speed,
    Distance,
    Time,
}

fn parse_distance_unit(s: &str) -> Result<DistanceUnit, String> {
    DistanceUnit::try_from(s)
}

fn parse_speed_unit(s: &str) -> Result<SpeedUnit, String> {
    SpeedUnit::try_from(s)
}

#[derive(Parser, Clone, Debug)]
#[command(name = "gridfix", version, about = "Coordinate conversion for British waters")]
pub struct Cli {
    #[clap(flatten)]
    pub verbose: clap_verbosity_flag::Verbosity<clap_verbosity_flag::InfoLevel>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Datum handling between WGS84 and the national grid
    #[arg(long, global = true, value_enum)]
    pub datum: Option<Datum>,

    /// Settings file to use instead of the platform default
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Command {
    /// Detect the notation of coordinate text and show it in every notation
    Parse {
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Show a latitude/longitude in every notation
    Show {
        #[arg(allow_negative_numbers = true)]
        latitude: f64,
        #[arg(allow_negative_numbers = true)]
        longitude: f64,
    },

    /// Grid reference of a latitude/longitude
    ToBng {
        #[arg(allow_negative_numbers = true)]
        latitude: f64,
        #[arg(allow_negative_numbers = true)]
        longitude: f64,
    },

    /// Latitude/longitude of a 10-digit grid reference
    FromBng {
        #[arg(required = true, num_args = 1..)]
        grid_reference: Vec<String>,
    },

    /// Great-circle distance between two coordinates in any notation
    Distance {
        #[arg(allow_hyphen_values = true)]
        from: String,
        #[arg(allow_hyphen_values = true)]
        to: String,
    },

    /// Solve a passage for speed, distance or time given the other two
    Calc {
        #[arg(value_enum)]
        solve: Solve,

        #[arg(long)]
        distance: Option<f64>,

        #[arg(long)]
        speed: Option<f64>,

        /// Duration as H:MM[:SS] or decimal hours
        #[arg(long)]
        time: Option<PassageTime>,

        #[arg(long, value_parser = parse_distance_unit)]
        distance_unit: Option<DistanceUnit>,

        #[arg(long, value_parser = parse_speed_unit)]
        speed_unit: Option<SpeedUnit>,
    },

    /// Show the effective settings
    Settings {
        /// Store them in the settings file
        #[arg(long)]
        save: bool,
    },
}

impl Cli {
    /// Settings from the file, overridden by command line flags
    pub fn settings(&self) -> Settings {
        let mut settings = Settings::load_or_default(self.config.as_deref());
        if let Some(datum) = self.datum {
            settings.datum = datum.into();
        }
        if self.json {
            settings.json = true;
        }
        if let Command::Calc {
            distance_unit,
            speed_unit,
            ..
        } = &self.command
        {
            if let Some(unit) = distance_unit {
                settings.distance_unit = *unit;
            }
            if let Some(unit) = speed_unit {
                settings.speed_unit = *unit;
            }
        }
        settings
    }
}

fn parse_text(parser: &CoordinateParser, text: &str) -> Result<ParsedCoordinate, CliError> {
    debug!("Parsing {:?}", text);
    match parser.parse(text) {
        Ok(parsed) => {
            debug!("{:?} read as {}: {}", text, parsed.notation, parsed.point);
            Ok(parsed)
        }
        Err(e) => {
            warn!("Could not parse {:?}", text);
            Err(e.into())
        }
    }
}

fn passage(
    solve: Solve,
    distance: Option<f64>,
    speed: Option<f64>,
    time: Option<PassageTime>,
    settings: &Settings,
) -> Result<Passage, CliError> {
    let distance = || distance.ok_or(CliError::MissingInput("distance"));
    let speed = || speed.ok_or(CliError::MissingInput("speed"));
    let time = || time.ok_or(CliError::MissingInput("time"));

    Ok(match solve {
        Solve::Speed => Passage::Speed {
            distance: distance()?,
            distance_unit: settings.distance_unit,
            time: time()?,
        },
        Solve::Distance => Passage::Distance {
            speed: speed()?,
            speed_unit: settings.speed_unit,
            time: time()?,
        },
        Solve::Time => Passage::Time {
            distance: distance()?,
            distance_unit: settings.distance_unit,
            speed: speed()?,
            speed_unit: settings.speed_unit,
        },
    })
}

/// Run one command and return its rendered output
pub fn execute(cli: &Cli, settings: &Settings) -> Result<String, CliError> {
    let grid = NationalGrid::new(settings.datum);
    let parser = CoordinateParser::new(grid);
    debug!("Using datum {}", settings.datum);

    match &cli.command {
        Command::Parse { text } => {
            let text = text.join(" ");
            let parsed = parse_text(&parser, &text)?;
            let report = PositionReport::new(parsed.point, grid).with_input(&text, parsed.notation);
            emit(&report, settings.json)
        }
        Command::Show {
            latitude,
            longitude,
        } => {
            let point = GeoPoint::new(*latitude, *longitude)?;
            emit(&PositionReport::new(point, grid), settings.json)
        }
        Command::ToBng {
            latitude,
            longitude,
        } => {
            let report = GridReport {
                latitude: *latitude,
                longitude: *longitude,
                grid_reference: to_bng_string_with(*latitude, *longitude, grid),
            };
            emit(&report, settings.json)
        }
        Command::FromBng { grid_reference } => {
            let text = grid_reference.join(" ").trim().to_uppercase();
            let point = from_bng_with(&text, grid).ok_or_else(|| {
                warn!("Could not decode grid reference {:?}", text);
                CliError::GridReference(text.clone())
            })?;
            let report =
                PositionReport::new(point, grid).with_input(&text, Notation::GridReference);
            emit(&report, settings.json)
        }
        Command::Distance { from, to } => {
            let a = parse_text(&parser, from)?;
            let b = parse_text(&parser, to)?;
            let distance = distance_between(a.point, b.point);
            debug!("Distance {} -> {}: {}", a.point, b.point, distance);
            let report = DistanceReport::new(
                PositionReport::new(a.point, grid).with_input(from, a.notation),
                PositionReport::new(b.point, grid).with_input(to, b.notation),
                distance,
                settings.distance_unit,
            );
            emit(&report, settings.json)
        }
        Command::Calc {
            solve,
            distance,
            speed,
            time,
            ..
        } => {
            let passage = passage(*solve, *distance, *speed, *time, settings)?;
            debug!("Solving {:?}", passage);
            let result = passage.solve(settings.speed_unit, settings.distance_unit)?;
            emit(&result, settings.json)
        }
        Command::Settings { save } => {
            if *save {
                match cli.config.clone().or_else(config::default_settings_path) {
                    Some(path) => settings.save(&path)?,
                    None => warn!("No config directory on this platform, settings not saved"),
                }
            }
            emit(settings, settings.json)
        }
    }
}

pub fn run(cli: &Cli) -> Result<(), CliError> {
    let settings = cli.settings();
    let output = execute(cli, &settings)?;
    println!("{}", output);
    Ok(())
}
