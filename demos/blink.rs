use std::{thread, time::Duration};

use mcp23008_i2c::{Mcp23008, Pin, Result};

// Select the expander and the pin wired to the LED.
const CHIP_ADDR: u8 = 0x20;
const BLINK_PIN_NUM: u8 = 0;

fn main() -> Result<()> {
    env_logger::init();

    println!("Opening MCP23008 at 0x{:02x} on /dev/i2c-1...", CHIP_ADDR);
    let mut dev = Mcp23008::open(CHIP_ADDR)?;
    if !dev.is_open() {
        eprintln!(
            "Error: could not reach the expander (last error {:?}).",
            dev.last_error()
        );
        eprintln!("Check the wiring, the bus path, and that i2c-dev is loaded.");
        return Ok(());
    }
    println!("Device opened.");

    let blink_pin = Pin::new(BLINK_PIN_NUM)?;
    println!("Blinking pin {} (Press Ctrl+C to stop)", blink_pin.number());
    loop {
        dev.set_pin(blink_pin)?;
        thread::sleep(Duration::from_millis(250));
        dev.reset_pin(blink_pin)?;
        thread::sleep(Duration::from_millis(250));
    }
    // Note: Loop runs forever, cleanup won't happen without Ctrl+C handling
}
