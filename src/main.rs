use clap::{Parser, Subcommand, ValueEnum};
use eyre::Result;
use hwscan::{generate_registers, parse_int, ClockLayout, Extractor, LineError};
use log::{error, LevelFilter};
use simple_logger::SimpleLogger;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

const DEFAULT_DIR: &str = "../../c2000/driverlib/f28p65x/driverlib/inc";

#[derive(Parser, Debug)]
#[command(name = "hwscan", version, about = "Extract tables from C2000 driverlib headers")]
struct Cli {
    /// Directory with the driverlib headers
    #[arg(long, value_name = "DIR", default_value = DEFAULT_DIR)]
    dir: PathBuf,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the register map of a module from hw_<module>.h
    Regs {
        /// Module name, e.g. `cputimer`
        module: String,
        /// Memory map header
        #[arg(long, value_name = "FILE", default_value = "hw_memmap.h")]
        memmap: String,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Print the PIE vector table
    Ints {
        /// Interrupt header
        #[arg(long, value_name = "FILE", default_value = "hw_ints.h")]
        file: PathBuf,
    },
    /// Print the peripheral clock control registers
    Clocks {
        /// System control header
        #[arg(long, value_name = "FILE", default_value = "sysctl.h")]
        file: PathBuf,
        /// Address of the clock control register block
        #[arg(long, value_name = "ADDR", value_parser = parse_address, default_value = "0x7010")]
        base: u32,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Bit layout table
    Text,
    /// SVD-flavoured XML
    Svd,
}

fn parse_address(src: &str) -> Result<u32, String> {
    parse_int(src).map_err(|err| err.to_string())
}

fn main() {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if let Err(err) = SimpleLogger::new().with_level(level).init() {
        eprintln!("failed to initialize logger: {}", err);
    }
    if let Err(err) = run(cli) {
        error!("extraction failed");
        match err.downcast_ref::<LineError>() {
            Some(err) => println!("{}", err),
            None => println!("{:?}", err),
        }
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut stdout = io::stdout().lock();
    match cli.command {
        Command::Regs { module, memmap, format } => {
            let map = Extractor::new(cli.dir).memmap(&memmap).register_map(&module)?;
            match format {
                Format::Text => generate_registers(&mut stdout, &map)?,
                Format::Svd => writeln!(stdout, "{}", hwscan::to_svd(&map)?)?,
            }
        }
        Command::Ints { file } => {
            Extractor::new(cli.dir).interrupts(file)?.generate(&mut stdout)?;
        }
        Command::Clocks { file, base } => {
            let layout = ClockLayout { base, ..ClockLayout::default() };
            Extractor::new(cli.dir).clocks(file, layout)?.generate(&mut stdout)?;
        }
    }
    stdout.flush()?;
    Ok(())
}
