use super::types::{FlowRecord, LookupKey, LookupTable};
use std::collections::HashMap;

/// The two aggregate counts the run produces. Iteration order of the
/// underlying maps is stable within a run but not sorted.
#[derive(Debug, Default, PartialEq)]
pub struct Tallies {
    tag_counts: HashMap<String, u64>,
    port_protocol_counts: HashMap<FlowRecord, u64>,
}

impl Tallies {
    /// Counts one flow record: one increment for its resolved tag and one
    /// for its (port, protocol) pair, whether or not a tag matched.
    pub fn observe(&mut self, record: FlowRecord, lookup: &LookupTable) {
        let key = LookupKey::new(&record.dst_port, record.protocol.as_str());
        let tag = lookup.tag_for(&key).to_string();

        *self.tag_counts.entry(tag).or_insert(0) += 1;
        *self.port_protocol_counts.entry(record).or_insert(0) += 1;
    }

    pub fn write_tag_report<W: std::io::Write>(&self, mut f: W) -> Result<(), std::io::Error> {
        writeln!(f, "Tag,Count")?;

        for (tag, count) in &self.tag_counts {
            writeln!(f, "{},{}", tag, count)?;
        }

        Ok(())
    }

    pub fn write_port_protocol_report<W: std::io::Write>(
        &self,
        mut f: W,
    ) -> Result<(), std::io::Error> {
        writeln!(f, "Port,Protocol,Count")?;

        for (record, count) in &self.port_protocol_counts {
            writeln!(f, "{},{},{}", record.dst_port, record.protocol, count)?;
        }

        Ok(())
    }
}
