mod io;
mod tally;
mod types;

use std::fs::File;
use std::io::{BufWriter, Write};

const LOOKUP_PATH: &str = "lookup.csv";
const FLOW_LOG_PATH: &str = "flowlog.txt";
const TAG_REPORT_PATH: &str = "tag_output.txt";
const PORT_PROTOCOL_REPORT_PATH: &str = "port_protocol_output.txt";

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    // The table must be complete before the first lookup
    let lookup = io::load_lookup_table(LOOKUP_PATH)?;

    let mut tallies = tally::Tallies::default();

    for result in io::FlowLogReader::open(FLOW_LOG_PATH)? {
        tallies.observe(result?, &lookup);
    }

    write_report(TAG_REPORT_PATH, |f| tallies.write_tag_report(f))?;
    write_report(PORT_PROTOCOL_REPORT_PATH, |f| {
        tallies.write_port_protocol_report(f)
    })?;

    Ok(())
}

fn write_report<F>(path: &str, write: F) -> Result<(), std::io::Error>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<(), std::io::Error>,
{
    let mut out = BufWriter::new(File::create(path)?);
    write(&mut out)?;
    out.flush()
}
