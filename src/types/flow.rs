use std::{error::Error, str::FromStr};

/// IANA protocol number as it appears in a flow log, folded to the three
/// names this tool recognises. Everything outside 6/17 is `Unknown` and is
/// still tallied under that literal name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    Tcp,
    Udp,
    Unknown,
}

impl Protocol {
    pub fn from_wire(number: &str) -> Self {
        match number {
            "6" => Self::Tcp,
            "17" => Self::Udp,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tcp => "tcp",
            Self::Udp => "udp",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The slice of a flow-log line we care about: destination port (field 5,
/// kept verbatim as a string) and protocol (field 7, mapped). Also serves as
/// the port/protocol tally key, so the report writer never has to pick a
/// composite string apart again.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FlowRecord {
    pub dst_port: String,
    pub protocol: Protocol,
}

impl FlowRecord {
    pub fn new(dst_port: &str, protocol: Protocol) -> Self {
        Self {
            dst_port: dst_port.to_string(),
            protocol,
        }
    }
}

impl FromStr for FlowRecord {
    type Err = FlowLineError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = line.split_whitespace().collect();

        if fields.len() < 8 {
            return Err(FlowLineError::TooFewFields(line.to_string()));
        }

        Ok(Self::new(fields[5], Protocol::from_wire(fields[7])))
    }
}

/// This error is returned when a flow-log line doesn't have enough fields to
/// carry a destination port and protocol. It keeps the offending line so the
/// diagnostic can show it.
#[derive(Debug, PartialEq)]
pub enum FlowLineError {
    TooFewFields(String),
}

impl std::fmt::Display for FlowLineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooFewFields(line) => write!(f, "Invalid line in flow log: {}", line),
        }
    }
}

impl Error for FlowLineError {}

#[cfg(test)]
mod tests {
    use super::{FlowLineError, FlowRecord, Protocol};

    #[test]
    fn test_protocol_from_wire() {
        assert_eq!(Protocol::from_wire("6"), Protocol::Tcp);
        assert_eq!(Protocol::from_wire("17"), Protocol::Udp);

        // Everything else folds to Unknown, including real protocol numbers
        assert_eq!(Protocol::from_wire("1"), Protocol::Unknown);
        assert_eq!(Protocol::from_wire("47"), Protocol::Unknown);
        assert_eq!(Protocol::from_wire(""), Protocol::Unknown);
        assert_eq!(Protocol::from_wire("tcp"), Protocol::Unknown);
    }

    #[test]
    fn test_protocol_display_is_lowercase() {
        assert_eq!(Protocol::Tcp.to_string(), "tcp");
        assert_eq!(Protocol::Udp.to_string(), "udp");
        assert_eq!(Protocol::Unknown.to_string(), "unknown");
    }

    #[test]
    fn test_parse_vpc_style_line() {
        // A 14-field VPC flow log record; dst port is field 5, protocol field 7
        let line = "2 123456789012 eni-0a1b2c3d 10.0.1.201 198.51.100.2 443 49153 6 \
                    25 20000 1620140761 1620140821 ACCEPT OK";

        assert_eq!(
            line.parse::<FlowRecord>().unwrap(),
            FlowRecord::new("443", Protocol::Tcp)
        );
    }

    #[test]
    fn test_parse_minimal_line() {
        // Exactly 8 fields is enough
        let record = "a b c d e 8080 g 17".parse::<FlowRecord>().unwrap();
        assert_eq!(record, FlowRecord::new("8080", Protocol::Udp));
    }

    #[test]
    fn test_parse_collapses_whitespace_runs() {
        let record = "  a\tb  c d e   993 g\t6  ".parse::<FlowRecord>().unwrap();
        assert_eq!(record, FlowRecord::new("993", Protocol::Tcp));
    }

    #[test]
    fn test_parse_short_line_keeps_offending_text() {
        let line = "a b c d e 443 g";
        assert_eq!(
            line.parse::<FlowRecord>(),
            Err(FlowLineError::TooFewFields(line.to_string()))
        );
    }

    #[test]
    fn test_port_is_not_normalised() {
        // Non-numeric and zero-padded ports pass through verbatim
        let record = "a b c d e 0443 g 6".parse::<FlowRecord>().unwrap();
        assert_eq!(record.dst_port, "0443");
    }
}
