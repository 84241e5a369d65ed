use crate::output::print_json;
use anyhow::Result;
use minikit_core::clock::{Clock, FixedClock, SystemClock};
use minikit_core::offset::{offset, optimized_timestamp, MAX_OFFSET};

pub fn run(message: &str, now: Option<u64>, json: bool) -> Result<()> {
    let clock: Box<dyn Clock> = match now {
        Some(t) => Box::new(FixedClock(t)),
        None => Box::new(SystemClock),
    };
    let value = offset(message);
    let timestamp = optimized_timestamp(clock.as_ref(), message)?;

    if json {
        print_json(&serde_json::json!({
            "message": message,
            "offset": value,
            "max_offset": MAX_OFFSET,
            "timestamp": timestamp,
        }))?;
    } else {
        println!("offset:    {value}");
        println!("timestamp: {timestamp}");
    }
    Ok(())
}
