use super::types::{FlowRecord, LookupKey, LookupRowFields, LookupTable};
use std::{
    fs::File,
    io::{self, BufRead, BufReader, Lines, Read},
};

/// Reads a lookup file and builds the table.
///
/// Rows with a field count other than 3 are reported to stderr and skipped;
/// whitespace-only rows are skipped silently. I/O and encoding faults abort.
pub fn load_lookup_table(path: &str) -> Result<LookupTable, Box<dyn std::error::Error>> {
    read_lookup_table(File::open(path)?)
}

pub fn read_lookup_table<R: Read>(reader: R) -> Result<LookupTable, Box<dyn std::error::Error>> {
    // quoting(false) so fields are literal comma splits, flexible(true) so a
    // wrong field count reaches our own check instead of erroring out.
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(reader);

    let mut table = LookupTable::default();
    let mut record = csv::StringRecord::new();

    while csv_reader.read_record(&mut record)? {
        if record.len() == 1 && record[0].trim().is_empty() {
            continue;
        }

        if record.len() != 3 {
            eprintln!(
                "Invalid line in lookup table: {}",
                record.iter().collect::<Vec<_>>().join(",")
            );
            continue;
        }

        let fields: LookupRowFields = record.deserialize(None)?;

        table.insert(
            LookupKey::new(fields.dst_port.trim(), fields.protocol.trim()),
            fields.tag.trim().to_string(),
        );
    }

    Ok(table)
}

/// Iterator over the structurally valid records of a flow-log file. Blank
/// lines are skipped silently; lines with fewer than 8 fields are reported
/// to stderr and skipped. Read faults surface as `Err` items.
pub struct FlowLogReader<R: BufRead> {
    lines: Lines<R>,
}

impl FlowLogReader<BufReader<File>> {
    pub fn open(path: &str) -> io::Result<Self> {
        Ok(Self::new(BufReader::new(File::open(path)?)))
    }
}

impl<R: BufRead> FlowLogReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }
}

impl<R: BufRead> Iterator for FlowLogReader<R> {
    type Item = io::Result<FlowRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e)),
            };

            if line.trim().is_empty() {
                continue;
            }

            match line.parse::<FlowRecord>() {
                Ok(record) => return Some(Ok(record)),
                Err(err) => eprintln!("{}", err),
            }
        }
    }
}
