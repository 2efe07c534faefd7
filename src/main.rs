mod codec;
mod config;
mod devices;
mod error;
mod hid;
mod logger;
mod mapper;
mod session;

use config::BridgeConfig;
use devices::xbox360::VirtualXbox360;
use hid::HidGamepadSource;
use logger::Verbosity;
use session::{ConsoleOperator, SessionEnd};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::AtomicBool;

const DEFAULT_CONFIG_PATH: &str = "kishi-bridge.toml";

fn main() -> ExitCode {
    println!("🚀 Iniciando Kishi Bridge...");

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    let config = match BridgeConfig::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error de configuración: {}", e);
            return ExitCode::FAILURE;
        }
    };
    logger::set_verbosity(Verbosity::from_u8(config.verbosity));

    // Sin driver virtual no hay nada que hacer: único error fatal.
    let mut pad = match VirtualXbox360::create() {
        Ok(pad) => pad,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("¿Está cargado el módulo uinput y hay permisos sobre /dev/uinput?");
            return ExitCode::FAILURE;
        }
    };
    println!("✓ Pad virtual Xbox 360 insertado en el sistema");

    let mut source = match HidGamepadSource::new(&config) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error inicializando la capa HID: {}", e);
            return ExitCode::FAILURE;
        }
    };
    println!(
        "✓ Buscando mando {:04X}:{:04X}",
        config.vendor_id, config.product_id
    );

    let mut operator = ConsoleOperator;
    let stop = AtomicBool::new(false);

    match session::run(&mut source, &mut operator, &mut pad, &config, &stop) {
        Ok(SessionEnd::OperatorAbort) => {
            println!("Saliendo a petición del operador.");
            ExitCode::SUCCESS
        }
        Ok(SessionEnd::Stopped) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error fatal: {}", e);
            ExitCode::FAILURE
        }
    }
}
