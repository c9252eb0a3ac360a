use std::collections::HashMap;
use structopt::StructOpt;

extern crate log;
#[macro_use]
extern crate rocket;

use winds::{api, config, providers};

#[derive(Debug, StructOpt)]
struct Cli {
    /// config file
    #[structopt(long = "config", short = "c", default_value = "config.yaml")]
    config_file: String,
}

#[rocket::main]
async fn main() {
    std::env::var("RUST_LOG").map_err(|_| {
        std::env::set_var("RUST_LOG", "error,winds=info");
    }).unwrap_or_default();
    env_logger::init();

    let args = Cli::from_args();

    let config: config::Config = match confy::load_path(std::path::Path::new(&args.config_file)) {
        Ok(config) => config,
        Err(e) => {
            error!("Error loading config `{}` : {:?}", args.config_file, e);
            return;
        }
    };

    let mut providers = HashMap::new();
    for provider_config in &config.providers {
        match providers::start_provider(provider_config).await {
            Ok(Some(provider)) => {
                let id = provider.state().id.clone();
                providers.insert(id, provider);
            }
            Ok(None) => {}
            Err(e) => error!("Error starting provider `{:?}` : {:?}", provider_config, e),
        }
    }

    match api::build().manage(providers).launch().await {
        Ok(_) => (),
        Err(e) => error!("Error launching server : {:?}", e),
    }
}
