use clap::Parser;
use log::{debug, LevelFilter};

mod args;
mod run;

fn main() {
    let args = match args::Args::try_parse() {
        Ok(a) => a,
        Err(e) => {
            let code = args::usage_exit_code(e.kind());
            if code == 0 {
                e.exit();
            }
            let _ = e.print();
            std::process::exit(code);
        }
    };

    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn"),
    );
    if args.verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
    debug!("main: args: {:?}", args);

    if let Err(e) = run::run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
