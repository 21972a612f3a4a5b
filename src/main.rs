use clap::Parser;
use input_listener::discovery::list_keyboards;
use log::{error, info};
use rust_key_logger::{
    config::{Args, Config},
    error::report,
    logger_loop,
};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if args.list_devices {
        let keyboards = list_keyboards();
        if keyboards.is_empty() {
            println!("No readable keyboard devices found");
        }
        for keyboard in keyboards {
            println!("{}: {}", keyboard.path.display(), keyboard.name);
        }
        return;
    }

    info!("Starting Key Logger Application");
    if let Err(err) = logger_loop::run(Config::from(args)).await {
        error!("{}", report(&err));
        std::process::exit(1);
    }
}
