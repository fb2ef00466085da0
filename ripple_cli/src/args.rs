use std::path::PathBuf;

use clap::Parser;

/// Ripple netlist compiler - build circuit descriptions into simulator
/// netlists
#[derive(Parser, Debug)]
#[command(name = "ripple")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Name of the built-in circuit to build
    #[arg(default_value = "fulladder")]
    pub circuit: String,

    /// Write the netlist to this file instead of stdout
    #[arg(short = 'o', long)]
    pub output_file: Option<PathBuf>,

    /// List the built-in circuits and exit
    #[arg(long, default_value_t = false)]
    pub list: bool,

    /// Allow logic gates on buses wider than one bit
    #[arg(long, default_value_t = false)]
    pub ribbon: bool,
}
