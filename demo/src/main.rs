mod config;

use std::env::var;
use std::thread::sleep;
use std::time::Duration;
use dotenv::dotenv;
use log::{debug, info, warn};
use lq_gpio::GpioDriver;
use lq_gpio::gpiod::GpiodDriver;
use lq_gpio::lcd::hd44780::driver::{GpioSignalInterface, Hd44780};
use sysinfo::System;
use crate::config::Config;

const UNKNOWN_STR: &str = "???";
const CGRAM_SLOTS: usize = 8;

fn parse_pin_bus(pin_str: &str) -> eyre::Result<[usize; 4]> {
    pin_str
        .split([',', ' ', ';'])
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.parse())
        .collect::<Result<Vec<_>, _>>()?
        .try_into()
        .map_err(|_| eyre::eyre!("Invalid number of data pins"))
}

fn main() -> eyre::Result<()> {
    // Initialize environment and logger
    dotenv().ok();
    pretty_env_logger::init();

    info!("LCD demo starting...");

    // Get pin numbers from env
    let chip_path = var("LQ_GPIO_CHIP").unwrap_or_else(|_| "/dev/gpiochip0".to_string());
    let lcd_e_pin_no: usize = var("LQ_LCD_PIN_E")?.parse()?;
    let lcd_rs_pin_no: usize = var("LQ_LCD_PIN_RS")?.parse()?;
    let lcd_data_pin_nos: [usize; 4] = parse_pin_bus(&var("LQ_LCD_PINS_DATA")?)?;

    info!("LCD @ {} E: {}, RS: {}, Data: {:?}",
        chip_path, lcd_e_pin_no, lcd_rs_pin_no, lcd_data_pin_nos);

    debug!("Trying to load config...");
    let config = if let Some(config) = Config::try_load()? {
        info!("Config loaded.");
        config
    } else {
        info!("Config not found. Using default");
        let config = Config::default();
        config.save()?;
        info!("Default config saved.");
        config
    };
    debug!("{:?}", config);

    debug!("Initializing GPIO driver...");
    let gpio = GpiodDriver::open(&chip_path)?;
    debug!("{:?} initialized.", gpio);

    debug!("Initializing LCD driver...");
    let lcd_e_out = gpio.get_output(lcd_e_pin_no)?;
    let lcd_rs_out = gpio.get_output(lcd_rs_pin_no)?;
    let lcd_data_outs = lcd_data_pin_nos
        .iter()
        .map(|&pin| gpio.get_output(pin))
        .collect::<Result<Vec<_>, _>>()?;
    let signal = GpioSignalInterface::new(
        &*lcd_e_out,
        &*lcd_rs_out,
        [
            &*lcd_data_outs[0],
            &*lcd_data_outs[1],
            &*lcd_data_outs[2],
            &*lcd_data_outs[3],
        ],
    );
    let mut lcd = Hd44780::new(signal);

    lcd.begin_with(config.display_config())?;

    if config.glyphs.len() > CGRAM_SLOTS {
        warn!("Only the first {} of {} glyphs fit in CGRAM", CGRAM_SLOTS, config.glyphs.len());
    }
    let glyph_count = config.glyphs.len().min(CGRAM_SLOTS);
    for (slot, glyph) in config.glyphs.iter().take(glyph_count).enumerate() {
        lcd.create_char(slot as u8, glyph)?;
    }

    // Uploading glyphs leaves the address counter in CGRAM
    lcd.clear()?;
    lcd.print(&config.greeting)?;
    for slot in 0..glyph_count {
        lcd.write(slot as u8)?;
    }

    if config.lines > 1 {
        lcd.set_cursor(0, 1)?;
        lcd.print(System::host_name().as_deref().unwrap_or(UNKNOWN_STR))?;
    }

    if config.cursor {
        lcd.cursor_on()?;
    }
    if config.blink {
        lcd.blink_on()?;
    }

    info!("Display ready.");

    if let Some(period) = config.marquee_ms {
        info!("Scrolling every {} ms...", period);
        loop {
            sleep(Duration::from_millis(period));
            lcd.scroll_left()?;
        }
    }

    Ok(())
}
