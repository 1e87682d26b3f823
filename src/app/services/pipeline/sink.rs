//! The consumer side of the record stream

use crate::app::models::Record;

/// A stateful consumer fed every record of one pass, in file order
///
/// Sinks own their accumulation state exclusively and read only the zone
/// snapshot carried by each record, so a pass can fan the same record out to
/// any number of them.
pub trait RecordSink {
    /// Consume one record
    fn process(&mut self, record: &Record);

    /// Short name used in log output
    fn name(&self) -> &'static str;
}
