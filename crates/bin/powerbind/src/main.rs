//! # powerbind
//!
//! Composition root that binds declared controls to a power device.
//!
//! ## Responsibilities
//! - Parse configuration (env vars, config file)
//! - Initialise logging
//! - Validate and bind every declared control to one device handle
//! - Hand the bound switches to the component list and set them up
//! - Turn on each control named on the command line and drain the command
//!   queue through the dry-run transport
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer: no domain logic belongs here.

mod config;
mod dry_run;

use powerbind_app::binder::ControlBinder;
use powerbind_app::device::PowerDevice;
use powerbind_app::ports::ComponentRegistry;
use powerbind_app::registry::ComponentList;
use powerbind_domain::control::ControlKind;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::dry_run::DryRunTransport;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    // Device
    let device = PowerDevice::new(config.device.name.as_str());
    let mut components = ComponentList::default();
    components.register(device.clone());

    // Controls
    let mut binder = ControlBinder::new(&mut components);
    binder.bind(&config.controls, &device)?;

    components.setup_all();
    components.dump_config();

    // Drive
    for arg in std::env::args().skip(1) {
        let kind: ControlKind = arg.parse()?;
        match device.control(kind) {
            Some(switch) => switch.turn_on()?,
            None => tracing::warn!(control = %kind, "control not declared, skipping"),
        }
    }

    let mut transport = DryRunTransport::default();
    while device.send_next_command(&mut transport)?.is_some() {}
    tracing::info!(sent = transport.sent(), "command queue drained");

    Ok(())
}
