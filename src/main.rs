use colored::Colorize;
use schema_builder::cli;

fn main() {
    let command_line_interface = cli::CommandLineInterface::load();
    let default_level = if command_line_interface.verbose() { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();
    if let Err(error) = command_line_interface.run() {
        eprintln!("{} {error:#}", "error:".red().bold());
        std::process::exit(1);
    }
}
