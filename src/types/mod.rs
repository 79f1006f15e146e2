mod flow;
mod lookup;

pub use flow::{FlowRecord, Protocol};
pub use lookup::{LookupKey, LookupRowFields, LookupTable, UNTAGGED};
