extern crate wallcal as lib;

use chrono::{Datelike, Local, Month, Weekday};
use flexi_logger::{FileSpec, Logger};
use lib::config::{self, Config};
use lib::{
    CalendarLayout, MonthCalendar, MonthDefinition, SvgFile, YearCalendar,
    YearDefinition,
};
use num_traits::FromPrimitive;
use std::fs;
use std::path::{Path, PathBuf};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "wcal",
    author = "Julian Bigge <j.reedts@gmail.com>",
    about = "Printable wall calendar pages as SVG."
)]
pub struct Args {
    #[structopt(
        name = "CONFIG",
        short = "c",
        long = "config",
        help = "path to config file",
        parse(from_os_str)
    )]
    pub configfile: Option<PathBuf>,

    #[structopt(long = "log-file", help = "path to log file", parse(from_os_str))]
    pub log_file: Option<PathBuf>,

    #[structopt(long = "no-bom", help = "omit the UTF-8 byte order mark")]
    pub no_bom: bool,

    #[structopt(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, StructOpt)]
pub enum Command {
    /// One page per month
    Month {
        #[structopt(short = "y", long = "year", help = "defaults to the current year")]
        year: Option<i32>,

        #[structopt(
            short = "m",
            long = "month",
            help = "1-12; all twelve months if omitted",
            parse(try_from_str = parse_month)
        )]
        month: Option<u32>,

        #[structopt(short = "f", long = "first-day", help = "e.g. Mon or Sunday")]
        first_day: Option<Weekday>,

        #[structopt(
            short = "o",
            long = "output",
            help = "output file, or directory when writing all months",
            parse(from_os_str)
        )]
        output: Option<PathBuf>,
    },
    /// The whole year on a single page
    Year {
        #[structopt(short = "y", long = "year", help = "defaults to the current year")]
        year: Option<i32>,

        #[structopt(short = "f", long = "first-day", help = "e.g. Mon or Sunday")]
        first_day: Option<Weekday>,

        #[structopt(short = "o", long = "output", parse(from_os_str))]
        output: Option<PathBuf>,
    },
}

fn parse_month(s: &str) -> Result<u32, String> {
    let n: u32 = s.parse().map_err(|e| format!("{}", e))?;
    Month::from_u32(n)
        .map(|m| m.number_from_month())
        .ok_or_else(|| format!("no such month: {}", n))
}

fn month_file_name(def: &MonthDefinition) -> String {
    format!("{}-{:02}.svg", def.year, def.month)
}

fn write_month(
    config: &Config,
    def: MonthDefinition,
    path: &Path,
    bom: bool,
) -> lib::Result<()> {
    let mut options = config.month_options(def)?;
    let annotations = config.annotations(&options);
    options.set_annotations(annotations);

    let calendar = MonthCalendar::new(options)?;
    let mut sink = SvgFile::new(path).with_bom(bom);
    calendar.generate_into(&mut sink)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_args();

    const DEFAULT_LOG_LEVEL: &'static str = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    let mut logger = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?;

    if let Some(log_file) = args.log_file {
        logger = logger
            .log_to_file(FileSpec::try_from(log_file)?)
            .print_message();
    }

    logger.start()?;

    let config = config::load_suitable_config(args.configfile.as_deref())?;
    let bom = !args.no_bom;
    let this_year = Local::now().year();

    match args.cmd {
        Command::Month {
            year,
            month,
            first_day,
            output,
        } => {
            let year = year.unwrap_or(this_year);
            let first_day = first_day.unwrap_or_else(|| config.month_first_day());

            if let Some(month) = month {
                let def = MonthDefinition::new(year, month, first_day);
                let path = output.unwrap_or_else(|| PathBuf::from(month_file_name(&def)));
                write_month(&config, def, &path, bom)?;
            } else {
                let dir = output.unwrap_or_else(|| PathBuf::from("."));
                fs::create_dir_all(&dir)?;
                for month in 1..=12 {
                    let def = MonthDefinition::new(year, month, first_day);
                    write_month(&config, def, &dir.join(month_file_name(&def)), bom)?;
                }
            }
        }
        Command::Year {
            year,
            first_day,
            output,
        } => {
            let year = year.unwrap_or(this_year);
            let first_day = first_day.unwrap_or_else(|| config.year_first_day());
            let path = output.unwrap_or_else(|| PathBuf::from(format!("{}.svg", year)));

            let options = config.year_options(YearDefinition::new(year, first_day))?;
            YearCalendar::new(options)?.generate_into(&mut SvgFile::new(&path).with_bom(bom))?;
        }
    }

    Ok(())
}
