//! Prints the labelled state of every pin on one expander.
//!
//! Usage: `port_status [ADDR] [BUS_PATH]`, e.g. `port_status 0x26 /dev/i2c-1`.

use std::env;

use mcp23008_i2c::{Mcp23008, PinLabels, Result, DEFAULT_BUS_PATH};

/// Label sets for the expanders on this board, keyed by chip address.
///
/// The driver takes whatever table the caller supplies; this is where an
/// application pins down what each GPIO actually drives.
fn board_labels(addr: u8) -> PinLabels {
    match addr {
        0x26 => PinLabels::from_names([
            "TYPE-2_NL1_ON*---->",
            "TYPE-2_L2L3_ON*--->",
            "TYPE-E/F_ON*------>",
            "LOCK_D*----------->",
            "RCD_DIS#*--------->",
            "RCD_TST#*--------->",
            "RCD_RESET#*------->",
            "------------------>",
        ]),
        0x27 => PinLabels::from_names([
            "LED_DIS#*--------->",
            "CP_DIS#*---------->",
            "PP_CS*------------>",
            "CP_CS*------------>",
            "T_CS*------------->",
            "PM_CS*------------>",
            "PM1*-------------->",
            "PM0*-------------->",
        ]),
        _ => PinLabels::new(),
    }
}

fn parse_addr(s: &str) -> u8 {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => s.parse(),
    };
    match parsed {
        Ok(addr) => addr,
        Err(_) => {
            eprintln!("Could not parse address '{}', using 0x26", s);
            0x26
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let addr = args.next().map_or(0x26, |s| parse_addr(&s));
    let bus_path = args.next().unwrap_or_else(|| DEFAULT_BUS_PATH.to_string());

    println!("Reading MCP23008 at 0x{:02x} on {}...", addr, bus_path);
    let mut dev = Mcp23008::open_on(&bus_path, addr)?.with_labels(board_labels(addr));
    if !dev.is_open() {
        eprintln!(
            "Error: could not reach the expander (last error {:?}).",
            dev.last_error()
        );
        eprintln!("Check the wiring, the bus path, and that i2c-dev is loaded.");
        return Ok(());
    }

    println!("{}", dev.snapshot()?);
    println!();
    dev.close()
}
