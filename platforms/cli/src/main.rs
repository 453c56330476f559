use clap::Parser;
use ntm::loader::MachineLoader;
use ntm::machine::Simulator;
use ntm::reporter::report;
use ntm::types::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_TRANSITIONS};
use std::path::Path;
use std::process::ExitCode;

#[derive(Parser)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    /// The machine definition file (.csv) to simulate
    #[clap(short, long)]
    machine: String,

    /// The input string written on the tape
    #[clap(short, long, default_value = "")]
    input: String,

    /// Maximum number of configuration-tree levels to explore
    #[clap(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Maximum total number of transition applications
    #[clap(long, default_value_t = DEFAULT_MAX_TRANSITIONS)]
    max_transitions: usize,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let machine = match MachineLoader::load_machine(Path::new(&cli.machine)) {
        Ok(machine) => machine,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let simulator = Simulator::new(&machine);
    let outcome = simulator.run(&cli.input, cli.max_depth, cli.max_transitions);

    print!("{}", report(&outcome));

    ExitCode::SUCCESS
}
