//! Build script for sluice-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates sluice.toml at compile time and bakes it into constants

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use sluice_core::config::DrainConfig;

fn main() {
    setup_linker();
    let config = load_config();
    write_constants(&config);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Load and validate sluice.toml
fn load_config() -> DrainConfig {
    println!("cargo:rerun-if-changed=sluice.toml");

    let config_path = Path::new("sluice.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: sluice.toml not found!                                   ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a sluice.toml configuration file.         ║\n\
            ║  Please create one in the sluice-firmware directory.             ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read sluice.toml                               ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: DrainConfig = match toml::from_str(&config_content) {
        Ok(config) => config,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid sluice.toml                                      ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&e.to_string())
            );
        }
    };

    if let Err(e) = config.validate() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid drain configuration in sluice.toml               ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            format_error_lines(&e.to_string())
        );
    }

    println!(
        "cargo:warning=sluice.toml validated: {} byte ring, {} Hz, {} bytes/tick worst case",
        config.capacity,
        config.tick_hz,
        config.worst_case_bytes_per_tick()
    );

    config
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write the configuration as Rust constants into OUT_DIR
fn write_constants(config: &DrainConfig) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let serial = &config.serial;

    let generated = format!(
        "// Generated by build.rs from sluice.toml\n\
        pub const RING_CAPACITY: usize = {};\n\
        pub const TICK_HZ: u32 = {};\n\
        pub const DRAIN_MODE: DrainMode = DrainMode::{:?};\n\
        pub const SINK_POLICY: SinkPolicy = SinkPolicy::{:?};\n\
        pub const STATS_INTERVAL_S: u16 = {};\n\
        pub const BANNER: bool = {};\n\
        pub const SERIAL: SerialConfig = SerialConfig {{\n\
        \x20   baudrate: {},\n\
        \x20   data_bits: DataBits::{:?},\n\
        \x20   parity: Parity::{:?},\n\
        \x20   stop_bits: StopBits::{:?},\n\
        }};\n",
        config.capacity,
        config.tick_hz,
        config.mode,
        config.sink_policy,
        config.stats_interval_s,
        config.banner,
        serial.baudrate,
        serial.data_bits,
        serial.parity,
        serial.stop_bits,
    );

    fs::write(out_dir.join("sluice_config.rs"), generated).unwrap();
}
