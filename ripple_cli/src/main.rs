//! Ripple CLI
//!
//! Entry point for the ripple netlist compiler. Builds one of the built-in
//! example circuits and emits its netlist for the downstream simulator.

mod args;

use clap::Parser;
use ripple_cli::circuits;
use ripple_netlist::NetlistBuilder;
use tracing::info;

use args::Args;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    if args.list {
        for (name, _) in circuits::CIRCUITS {
            println!("{name}");
        }
        return Ok(());
    }

    let Some(build) = circuits::find(&args.circuit) else {
        return Err(format!("unknown circuit {:?} (try --list)", args.circuit).into());
    };

    let mut builder = NetlistBuilder::new();
    builder.allow_ribbon_logic(args.ribbon);

    info!(circuit = %args.circuit, "building netlist");
    build(&mut builder)?;
    let netlist = builder.serialize()?;

    match &args.output_file {
        Some(path) => std::fs::write(path, &netlist)?,
        None => print!("{netlist}"),
    }

    Ok(())
}
