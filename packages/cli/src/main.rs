use clap::Parser;

use xrt_cli::Cli;

fn main() {
    let cli = Cli::parse();
    xrt_cli::init_logging(cli.verbose);

    match xrt_cli::run(cli, &mut std::io::stdout().lock()) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
